//! ブラウザでのファイル保存
//!
//! 取得に失敗した場合は再試行せず、URLを新しいタブで開く。

use crate::api::catalog::{error_message, fetch_bytes};
use preset_catalog_common::{single_file_archive, DownloadFormat, DownloadTarget};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// 保存時のファイル名
pub fn saved_name(target: &DownloadTarget, format: DownloadFormat) -> &str {
    match format {
        DownloadFormat::Json => &target.filename,
        DownloadFormat::Zip => &target.zip_name,
    }
}

pub fn mime_type(format: DownloadFormat) -> &'static str {
    match format {
        DownloadFormat::Json => "application/json",
        DownloadFormat::Zip => "application/zip",
    }
}

/// 取得したバイト列を保存形式に合わせて包む
pub fn package(
    bytes: Vec<u8>,
    target: &DownloadTarget,
    format: DownloadFormat,
) -> Result<Vec<u8>, String> {
    match format {
        DownloadFormat::Json => Ok(bytes),
        DownloadFormat::Zip => {
            single_file_archive(&target.filename, &bytes).map_err(|e| e.to_string())
        }
    }
}

/// Blob を作って一時的なリンクからダウンロードさせる
pub fn save_bytes(filename: &str, mime: &str, bytes: &[u8]) -> Result<(), String> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());

    let opts = BlobPropertyBag::new();
    opts.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
        .map_err(|_| "Failed to create blob".to_string())?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Unable to create download".to_string())?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("Document unavailable")?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| "Unable to create anchor")?
        .dyn_into()
        .map_err(|_| "Anchor cast failed")?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.style().set_property("display", "none").ok();

    document
        .body()
        .ok_or("Missing body")?
        .append_child(&anchor)
        .ok();
    anchor.click();
    anchor.remove();
    Url::revoke_object_url(&url).ok();
    Ok(())
}

/// 直接開く
pub fn open_fallback(url: &str) {
    if let Some(window) = web_sys::window() {
        if window
            .open_with_url_and_target_and_features(url, "_blank", "noopener")
            .is_err()
        {
            gloo::console::error!(format!("window.open failed: {}", url));
        }
    }
}

async fn fetch_and_save(target: &DownloadTarget, format: DownloadFormat) -> Result<(), String> {
    let bytes = fetch_bytes(&target.url)
        .await
        .map_err(|e| error_message(&e))?;
    let payload = package(bytes, target, format)?;
    save_bytes(saved_name(target, format), mime_type(format), &payload)
}

/// 1件のダウンロード。失敗時は URL を開く
pub async fn download(target: DownloadTarget, format: DownloadFormat) {
    if let Err(e) = fetch_and_save(&target, format).await {
        gloo::console::warn!(format!("download failed ({}), opening {}", e, target.url));
        open_fallback(&target.url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> DownloadTarget {
        DownloadTarget {
            path: "orca/pla.json".to_string(),
            url: "orca/pla.json".to_string(),
            filename: "pla - Orca Slicer.json".to_string(),
            zip_name: "pla - Orca Slicer.zip".to_string(),
        }
    }

    #[test]
    fn test_saved_name_by_format() {
        let target = target();
        assert_eq!(saved_name(&target, DownloadFormat::Json), "pla - Orca Slicer.json");
        assert_eq!(saved_name(&target, DownloadFormat::Zip), "pla - Orca Slicer.zip");
    }

    #[test]
    fn test_mime_type() {
        assert_eq!(mime_type(DownloadFormat::Json), "application/json");
        assert_eq!(mime_type(DownloadFormat::Zip), "application/zip");
    }

    #[test]
    fn test_package_json_is_unchanged() {
        let bytes = b"{\"a\":1}".to_vec();
        let packaged = package(bytes.clone(), &target(), DownloadFormat::Json).unwrap();
        assert_eq!(packaged, bytes);
    }

    #[test]
    fn test_package_zip_has_local_file_header() {
        let packaged = package(b"{}".to_vec(), &target(), DownloadFormat::Zip).unwrap();
        assert_eq!(&packaged[..4], b"PK\x03\x04");
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_save_bytes_leaves_no_anchor() {
        save_bytes("test.json", "application/json", b"{}").expect("save failed");
        let document = web_sys::window().unwrap().document().unwrap();
        let anchors = document.get_elements_by_tag_name("a");
        assert_eq!(anchors.length(), 0);
    }
}
