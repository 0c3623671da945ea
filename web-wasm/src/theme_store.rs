//! テーマ設定の読み書き（URLパラメータと localStorage）
//!
//! 読み書きの失敗はすべて無視して既定値に倒す。

use preset_catalog_common::{Theme, THEME_STORAGE_KEY};
use web_sys::{Storage, UrlSearchParams};

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// `?theme=` の値
pub fn query_theme() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    UrlSearchParams::new_with_str(&search).ok()?.get("theme")
}

pub fn stored_theme() -> Option<String> {
    local_storage()?.get_item(THEME_STORAGE_KEY).ok().flatten()
}

/// 起動時のテーマ
pub fn initial_theme() -> Theme {
    Theme::resolve(query_theme().as_deref(), stored_theme().as_deref())
}

pub fn store_theme(theme: Theme) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(THEME_STORAGE_KEY, theme.as_str());
    }
}

/// body のクラスに反映
pub fn apply_theme(theme: Theme) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    let classes = body.class_list();
    let _ = match theme.body_class() {
        Some(class) => classes.add_1(class),
        None => classes.remove_1("theme-wiki"),
    };
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_store_and_read_theme() {
        store_theme(Theme::Wiki);
        assert_eq!(stored_theme().as_deref(), Some("wiki"));
        store_theme(Theme::Dark);
        assert_eq!(stored_theme().as_deref(), Some("dark"));
    }

    #[wasm_bindgen_test]
    fn wasm_apply_theme_toggles_body_class() {
        let body = web_sys::window().unwrap().document().unwrap().body().unwrap();
        apply_theme(Theme::Wiki);
        assert!(body.class_list().contains("theme-wiki"));
        apply_theme(Theme::Dark);
        assert!(!body.class_list().contains("theme-wiki"));
    }
}
