//! カタログ（index.json）の読み込み

pub mod cache;

use crate::error::{CatalogError, Result};
use cache::IndexCache;
use preset_catalog_common::{Catalog, CatalogIndex};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// index.json の取得元
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSource {
    Remote(String),
    Local(PathBuf),
}

impl IndexSource {
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            IndexSource::Remote(value.to_string())
        } else {
            IndexSource::Local(PathBuf::from(value))
        }
    }

    /// キャッシュのキー
    pub fn key(&self) -> String {
        match self {
            IndexSource::Remote(url) => url.clone(),
            IndexSource::Local(path) => path.display().to_string(),
        }
    }
}

/// プリセットファイルの配布元
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetOrigin {
    /// `base + encodeURI(path)` で取得
    Remote { base: String },
    /// `dir.join(path)` を読む
    Local { dir: PathBuf },
}

impl PresetOrigin {
    /// 設定の raw_base、無ければ index.json と同じ場所
    pub fn resolve(raw_base: Option<&str>, source: &IndexSource) -> Self {
        match raw_base {
            Some(base) if base.starts_with("http://") || base.starts_with("https://") => {
                PresetOrigin::Remote { base: base.to_string() }
            }
            Some(dir) => PresetOrigin::Local { dir: PathBuf::from(dir) },
            None => match source {
                IndexSource::Remote(url) => {
                    let base = match url.rfind('/') {
                        Some(i) => &url[..=i],
                        None => url.as_str(),
                    };
                    PresetOrigin::Remote { base: base.to_string() }
                }
                IndexSource::Local(path) => PresetOrigin::Local {
                    dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
                },
            },
        }
    }

    /// URL組み立て用のベース（ローカルは空）
    pub fn raw_base(&self) -> &str {
        match self {
            PresetOrigin::Remote { base } => base,
            PresetOrigin::Local { .. } => "",
        }
    }
}

pub fn build_client(timeout_seconds: u64) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(concat!("preset-catalog/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// URLの内容を取得（成功ステータス以外はエラー）
pub async fn fetch_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CatalogError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response.bytes().await?.to_vec())
}

/// カタログローダー
pub struct CatalogLoader {
    client: reqwest::Client,
    cache_dir: Option<PathBuf>,
    offline: bool,
}

impl CatalogLoader {
    pub fn new(client: reqwest::Client, cache_dir: Option<PathBuf>, offline: bool) -> Self {
        Self {
            client,
            cache_dir,
            offline,
        }
    }

    /// index.json を読み込む。失敗は再試行せず `CatalogLoad` として返す
    pub async fn load(&self, source: &IndexSource) -> Result<Catalog> {
        match self.load_index(source).await {
            Ok(index) => {
                log::info!("{} 件のプリセットを読み込み: {}", index.presets.len(), source.key());
                Ok(Catalog::new(index))
            }
            Err(e @ CatalogError::CatalogLoad(_)) => Err(e),
            Err(e) => Err(CatalogError::CatalogLoad(e.to_string())),
        }
    }

    async fn load_index(&self, source: &IndexSource) -> Result<CatalogIndex> {
        match source {
            IndexSource::Local(path) => {
                if !path.exists() {
                    return Err(CatalogError::FileNotFound(path.display().to_string()));
                }
                let bytes = std::fs::read(path)?;
                Ok(CatalogIndex::from_slice(&bytes)?)
            }
            IndexSource::Remote(_) if self.offline => self.load_cached(source),
            IndexSource::Remote(url) => {
                log::debug!("index.json を取得: {}", url);
                let bytes = fetch_bytes(&self.client, url).await?;
                let index = CatalogIndex::from_slice(&bytes)?;
                self.store(source, &bytes, &index);
                Ok(index)
            }
        }
    }

    fn load_cached(&self, source: &IndexSource) -> Result<CatalogIndex> {
        let dir = self
            .cache_dir
            .as_deref()
            .ok_or_else(|| CatalogError::CacheMiss(source.key()))?;
        let cache = IndexCache::load(dir);
        let entry = cache
            .get(&source.key())
            .ok_or_else(|| CatalogError::CacheMiss(source.key()))?;
        log::info!("キャッシュを使用 (取得日時: {})", entry.fetched_at.to_rfc3339());
        Ok(entry.index.clone())
    }

    /// キャッシュ保存の失敗は読み込み結果に影響させない
    fn store(&self, source: &IndexSource, bytes: &[u8], index: &CatalogIndex) {
        let Some(dir) = self.cache_dir.as_deref() else {
            return;
        };
        let mut cache = IndexCache::load(dir);
        cache.insert(source.key(), bytes, index.clone());
        if let Err(e) = cache.save(dir) {
            log::warn!("キャッシュ保存に失敗: {}", e);
        }
    }
}
