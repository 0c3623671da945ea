//! キャッシュ機能テスト
//!
//! index.json キャッシュと `--offline` 読み込みの動作を検証

use preset_catalog::catalog::cache::{compute_sha256, IndexCache};
use preset_catalog::catalog::{CatalogLoader, IndexSource};
use preset_catalog::error::CatalogError;
use preset_catalog_common::CatalogIndex;
use tempfile::tempdir;

const INDEX_URL: &str = "https://example.com/presets/index.json";
const INDEX_JSON: &str = r#"{
    "materials": ["Panchroma PLA"],
    "presets": [
        {"material": "Panchroma PLA", "brand": "Bambu Lab", "model": "X1C", "slicer": "Bambu Studio", "path": "bambu/pla.json"}
    ]
}"#;

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

/// 空のキャッシュファイル
#[test]
fn test_cache_file_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let cache = IndexCache::load(dir.path());

    assert_eq!(cache.len(), 0);
    assert!(cache.is_empty());
}

/// キャッシュの保存と読み込み
#[test]
fn test_cache_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");

    let mut cache = IndexCache::load(dir.path());
    let index = CatalogIndex::from_json(INDEX_JSON).expect("index.json 解析失敗");
    cache.insert(INDEX_URL.to_string(), INDEX_JSON.as_bytes(), index);
    cache.save(dir.path()).expect("キャッシュ保存失敗");

    let loaded = IndexCache::load(dir.path());
    assert_eq!(loaded.len(), 1);

    let cached = loaded.get(INDEX_URL).expect("キャッシュが見つからない");
    assert_eq!(cached.size, INDEX_JSON.len() as u64);
    assert_eq!(cached.sha256, compute_sha256(INDEX_JSON.as_bytes()));
    assert_eq!(cached.index.presets.len(), 1);
    assert_eq!(cached.index.presets[0].brand, "Bambu Lab");
}

/// 壊れたキャッシュファイルは空として扱う
#[test]
fn test_corrupted_cache_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(IndexCache::cache_path(dir.path()), "{ invalid json }")
        .expect("書き込み失敗");

    let cache = IndexCache::load(dir.path());
    assert!(cache.is_empty());
}

/// バージョン不一致は空として扱う
#[test]
fn test_version_mismatch_is_discarded() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(
        IndexCache::cache_path(dir.path()),
        r#"{"version": 999, "entries": {}}"#,
    )
    .expect("書き込み失敗");

    let cache = IndexCache::load(dir.path());
    assert!(cache.is_empty());
}

/// キャッシュ削除
#[test]
fn test_cache_clear() {
    let dir = tempdir().expect("Failed to create temp dir");
    assert!(!IndexCache::clear(dir.path()).expect("削除失敗"));

    IndexCache::default().save(dir.path()).expect("キャッシュ保存失敗");
    assert!(IndexCache::cache_path(dir.path()).exists());
    assert!(IndexCache::clear(dir.path()).expect("削除失敗"));
    assert!(!IndexCache::cache_path(dir.path()).exists());
}

/// SHA-256 は既知の値と一致
#[test]
fn test_compute_sha256() {
    assert_eq!(
        compute_sha256(b""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

/// オフラインではキャッシュから読み込む
#[tokio::test]
async fn test_offline_load_uses_cache() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut cache = IndexCache::default();
    let index = CatalogIndex::from_json(INDEX_JSON).expect("index.json 解析失敗");
    cache.insert(INDEX_URL.to_string(), INDEX_JSON.as_bytes(), index);
    cache.save(dir.path()).expect("キャッシュ保存失敗");

    let loader = CatalogLoader::new(client(), Some(dir.path().to_path_buf()), true);
    let catalog = loader
        .load(&IndexSource::parse(INDEX_URL))
        .await
        .expect("キャッシュから読み込めない");
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.materials(), ["Panchroma PLA".to_string()]);
}

/// オフラインでキャッシュが無ければ読み込み失敗
#[tokio::test]
async fn test_offline_cache_miss() {
    let dir = tempdir().expect("Failed to create temp dir");
    let loader = CatalogLoader::new(client(), Some(dir.path().to_path_buf()), true);

    let err = loader
        .load(&IndexSource::parse(INDEX_URL))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::CatalogLoad(_)));
    assert!(err.to_string().starts_with("Failed to load: "));
}

/// ローカルの index.json はオフラインでも直接読む
#[tokio::test]
async fn test_local_index_ignores_offline() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("index.json");
    std::fs::write(&path, INDEX_JSON).expect("書き込み失敗");

    let loader = CatalogLoader::new(client(), None, true);
    let catalog = loader
        .load(&IndexSource::Local(path))
        .await
        .expect("ローカル読み込み失敗");
    assert_eq!(catalog.presets()[0].model, "X1C");
}
