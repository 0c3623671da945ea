//! メインアプリケーションコンポーネント

use crate::api::catalog::{fetch_catalog, INDEX_JSON_URL, RAW_BASE};
use crate::components::{
    filter_bar::FilterBar, header::Header, install_modal::InstallModal, preset_table::PresetTable,
};
use crate::export::download;
use crate::theme_store;
use gloo::events::EventListener;
use leptos::prelude::*;
use preset_catalog_common::{Action, BrowserState, Catalog, ReconcileMode};
use std::sync::Arc;

/// 読み込みの状態
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState {
    Loading,
    Loaded,
    Failed(String),
}

/// ステータス行の文言
pub fn status_line(load: &LoadState, browser: Option<&BrowserState>) -> String {
    match load {
        LoadState::Loading => "Loading…".to_string(),
        LoadState::Failed(message) => format!("Failed to load: {}", message),
        LoadState::Loaded => browser
            .map(|b| b.view().status_text())
            .unwrap_or_default(),
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let (theme, set_theme) = signal(theme_store::initial_theme());
    let (catalog, set_catalog) = signal(None::<Arc<Catalog>>);
    let (browser, set_browser) = signal(None::<BrowserState>);
    let (load, set_load) = signal(LoadState::Loading);
    let (modal_open, set_modal_open) = signal(false);

    Effect::new(move |_| theme_store::apply_theme(theme.get()));

    // index.json 読み込み（失敗時は再試行しない）
    wasm_bindgen_futures::spawn_local(async move {
        match fetch_catalog(INDEX_JSON_URL).await {
            Ok(loaded) => {
                let state = BrowserState::new(&loaded, RAW_BASE, ReconcileMode::SinglePass);
                set_catalog.set(Some(Arc::new(loaded)));
                set_browser.set(Some(state));
                set_load.set(LoadState::Loaded);
            }
            Err(message) => {
                gloo::console::error!(format!("Failed to load: {}", message));
                set_load.set(LoadState::Failed(message));
            }
        }
    });

    let on_action = move |action: Action| {
        let Some(catalog) = catalog.get_untracked() else {
            return;
        };
        let mut effect = preset_catalog_common::Effect::None;
        set_browser.update(|state| {
            if let Some(state) = state {
                effect = state.dispatch(&catalog, action);
            }
        });
        if let preset_catalog_common::Effect::Download { target, format } = effect {
            wasm_bindgen_futures::spawn_local(download::download(target, format));
        }
    };

    // ドロップダウンの外側をクリックしたら閉じる
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        EventListener::new(&document, "click", move |_| {
            let any_open = browser.with_untracked(|b| {
                b.as_ref().is_some_and(|b| b.open_dropdown().is_some())
            });
            if any_open {
                on_action(Action::CloseDropdowns);
            }
        })
        .forget();
    }

    let on_toggle_theme = move |_| {
        let next = theme.get_untracked().toggled();
        theme_store::store_theme(next);
        set_theme.set(next);
    };

    view! {
        <div class="container">
            <Header
                theme=theme
                on_toggle_theme=on_toggle_theme
                on_help=move |_| set_modal_open.set(true)
            />

            <FilterBar browser=browser on_action=on_action />

            <p id="status" class="status">
                {move || browser.with(|b| load.with(|l| status_line(l, b.as_ref())))}
            </p>

            <PresetTable browser=browser on_action=on_action />

            <InstallModal open=modal_open set_open=set_modal_open />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_failed() {
        let line = status_line(&LoadState::Failed("HTTP 404".into()), None);
        assert_eq!(line, "Failed to load: HTTP 404");
    }

    #[test]
    fn test_status_line_loaded() {
        let catalog = Catalog::from_json(
            r#"{"presets":[
                {"material":"Panchroma PLA","brand":"Bambu Lab","model":"X1C","slicer":"Bambu Studio","path":"a.json"},
                {"material":"Panchroma PLA","brand":"Prusa","model":"MK4","slicer":"PrusaSlicer","path":"b.json"}
            ]}"#,
        )
        .unwrap();
        let state = BrowserState::new(&catalog, RAW_BASE, ReconcileMode::SinglePass);
        assert_eq!(
            status_line(&LoadState::Loaded, Some(&state)),
            "2 presets in 1 materials."
        );
    }
}
