//! 設定ファイルテスト

use preset_catalog::config::{Config, INDEX_ENV_VAR};
use preset_catalog_common::ReconcileMode;
use std::path::PathBuf;
use tempfile::tempdir;

/// 存在しない設定ファイルは既定値
#[test]
fn test_load_missing_config_uses_default() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).expect("読み込み失敗");

    assert_eq!(config, Config::default());
    assert_eq!(config.index_url, "index.json");
    assert_eq!(config.timeout_seconds, 30);
    assert!(!config.reconcile_fixed_point);
}

/// 保存と再読み込み
#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let config = Config {
        index_url: "https://example.com/index.json".to_string(),
        raw_base: Some("https://cdn.example.com/".to_string()),
        download_dir: Some(PathBuf::from("/tmp/presets")),
        timeout_seconds: 5,
        reconcile_fixed_point: true,
    };
    config.save_to(&path).expect("保存失敗");

    let loaded = Config::load_from(&path).expect("読み込み失敗");
    assert_eq!(loaded, config);
}

/// 欠けたキーは既定値で補う
#[test]
fn test_partial_config() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"timeout_seconds": 10}"#).expect("書き込み失敗");

    let config = Config::load_from(&path).expect("読み込み失敗");
    assert_eq!(config.timeout_seconds, 10);
    assert_eq!(config.index_url, "index.json");
    assert_eq!(config.raw_base, None);
}

/// CLI引数 → 環境変数 → 設定ファイル の優先順位
#[test]
fn test_resolve_index_precedence() {
    let config = Config {
        index_url: "from-config.json".to_string(),
        ..Default::default()
    };

    std::env::remove_var(INDEX_ENV_VAR);
    assert_eq!(config.resolve_index(None), "from-config.json");

    std::env::set_var(INDEX_ENV_VAR, "from-env.json");
    assert_eq!(config.resolve_index(None), "from-env.json");
    assert_eq!(config.resolve_index(Some("from-cli.json")), "from-cli.json");

    std::env::set_var(INDEX_ENV_VAR, "");
    assert_eq!(config.resolve_index(None), "from-config.json");
    std::env::remove_var(INDEX_ENV_VAR);
}

/// 整合方式はフラグか設定のどちらかで固定点に切り替わる
#[test]
fn test_reconcile_mode() {
    let mut config = Config::default();
    assert_eq!(config.reconcile_mode(false), ReconcileMode::SinglePass);
    assert_eq!(config.reconcile_mode(true), ReconcileMode::FixedPoint);

    config.reconcile_fixed_point = true;
    assert_eq!(config.reconcile_mode(false), ReconcileMode::FixedPoint);
}
