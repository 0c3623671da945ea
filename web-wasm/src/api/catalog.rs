//! index.json とプリセットファイルの取得

use preset_catalog_common::{Catalog, CatalogIndex};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// ページと同じ場所に置かれた index.json
pub const INDEX_JSON_URL: &str = "./index.json";
/// プリセットファイルの配布元（同一オリジン）
pub const RAW_BASE: &str = "";

/// JsValue のエラーを表示用の文字列に
pub fn error_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// URLの内容をバイト列で取得（成功ステータス以外はエラー）
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts)?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    if !resp.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", resp.status())));
    }

    let buffer = JsFuture::from(resp.array_buffer()?).await?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// index.json を読み込んでカタログを作る
pub async fn fetch_catalog(url: &str) -> Result<Catalog, String> {
    let bytes = fetch_bytes(url).await.map_err(|e| error_message(&e))?;
    let index = CatalogIndex::from_slice(&bytes).map_err(|e| e.to_string())?;
    gloo::console::log!(format!("{} presets loaded from {}", index.presets.len(), url));
    Ok(Catalog::new(index))
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_error_message_from_js_error() {
        let error = js_sys::Error::new("network down");
        assert_eq!(error_message(&error.into()), "network down");
    }

    #[wasm_bindgen_test]
    fn wasm_error_message_from_string() {
        assert_eq!(error_message(&JsValue::from_str("HTTP 404")), "HTTP 404");
    }
}
