//! エラーケーステスト
//!
//! 読み込み・ダウンロード失敗時のエラーハンドリングを検証

use preset_catalog::catalog::{CatalogLoader, IndexSource};
use preset_catalog::error::CatalogError;
use tempfile::tempdir;

/// 存在しない index.json
#[tokio::test]
async fn test_load_nonexistent_index() {
    let loader = CatalogLoader::new(reqwest::Client::new(), None, false);
    let result = loader
        .load(&IndexSource::parse("/nonexistent/path/12345/index.json"))
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, CatalogError::CatalogLoad(_)));
    assert!(err.to_string().contains("/nonexistent/path/12345/index.json"));
}

/// 不正なJSONの index.json
#[tokio::test]
async fn test_load_invalid_index_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("index.json");
    std::fs::write(&path, "not json").expect("書き込み失敗");

    let loader = CatalogLoader::new(reqwest::Client::new(), None, false);
    let err = loader.load(&IndexSource::Local(path)).await.unwrap_err();

    let message = err.to_string();
    assert!(message.starts_with("Failed to load: JSON解析エラー"), "{}", message);
    assert!(!message.contains("アーカイブ"));
}

/// 共通ライブラリのエラーは種類ごとの変種になる
#[test]
fn test_common_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: CatalogError = preset_catalog_common::Error::Json(json_err).into();
    assert!(matches!(err, CatalogError::JsonParse(_)));

    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err: CatalogError = preset_catalog_common::Error::Io(io_err).into();
    assert!(matches!(err, CatalogError::Io(_)));

    let zip_err = preset_catalog_common::Error::Archive(zip::result::ZipError::FileNotFound);
    let err: CatalogError = zip_err.into();
    assert!(matches!(err, CatalogError::Archive(_)));
}

/// 空のオブジェクトは空のカタログとして読める
#[tokio::test]
async fn test_load_empty_object() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("index.json");
    std::fs::write(&path, "{}").expect("書き込み失敗");

    let loader = CatalogLoader::new(reqwest::Client::new(), None, false);
    let catalog = loader
        .load(&IndexSource::Local(path))
        .await
        .expect("空のカタログとして読めるはず");
    assert!(catalog.is_empty());
}

/// エラーメッセージの表示
#[test]
fn test_error_display() {
    let err = CatalogError::VariantOutOfRange {
        material: "Panchroma PLA".to_string(),
        count: 2,
    };
    assert!(err.to_string().contains("Panchroma PLA"));
    assert!(err.to_string().contains('2'));

    let err = CatalogError::HttpStatus {
        url: "https://example.com/a.json".to_string(),
        status: 404,
    };
    assert_eq!(err.to_string(), "HTTPステータス 404: https://example.com/a.json");
}

/// JSONエラーの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: CatalogError = json_err.into();
    assert!(matches!(err, CatalogError::JsonParse(_)));
}
