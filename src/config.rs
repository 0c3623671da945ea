use crate::error::{CatalogError, Result};
use preset_catalog_common::ReconcileMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// index.json の場所を上書きする環境変数
pub const INDEX_ENV_VAR: &str = "PRESET_CATALOG_INDEX";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// index.json のURLまたはローカルパス
    pub index_url: String,
    /// プリセットファイルの配布元（省略時は index.json と同じ場所）
    pub raw_base: Option<String>,
    /// ダウンロード先（省略時はカレント）
    pub download_dir: Option<PathBuf>,
    pub timeout_seconds: u64,
    /// 整合処理を解除が起きなくなるまで繰り返す
    pub reconcile_fixed_point: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CatalogError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("preset-catalog").join("config.json"))
    }

    /// index.json キャッシュの置き場所
    pub fn cache_dir() -> Result<PathBuf> {
        let base = dirs::cache_dir()
            .ok_or_else(|| CatalogError::Config("キャッシュディレクトリが見つかりません".into()))?;
        Ok(base.join("preset-catalog"))
    }

    fn default_config() -> Self {
        Self {
            index_url: "index.json".into(),
            raw_base: None,
            download_dir: None,
            timeout_seconds: 30,
            reconcile_fixed_point: false,
        }
    }

    /// CLI引数 → 環境変数 → 設定ファイル の順で index.json の場所を決める
    pub fn resolve_index(&self, cli_override: Option<&str>) -> String {
        if let Some(index) = cli_override {
            return index.to_string();
        }
        if let Ok(index) = std::env::var(INDEX_ENV_VAR) {
            if !index.is_empty() {
                return index;
            }
        }
        self.index_url.clone()
    }

    pub fn reconcile_mode(&self, fixed_point_flag: bool) -> ReconcileMode {
        if fixed_point_flag || self.reconcile_fixed_point {
            ReconcileMode::FixedPoint
        } else {
            ReconcileMode::SinglePass
        }
    }

    pub fn set_index_url(&mut self, url: String) -> Result<()> {
        self.index_url = url;
        self.save()
    }

    pub fn set_raw_base(&mut self, base: String) -> Result<()> {
        self.raw_base = (!base.is_empty()).then_some(base);
        self.save()
    }
}
