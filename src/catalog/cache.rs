//! index.json キャッシュモジュール
//!
//! 取得した index.json を取得元ごとに保存し、`--offline` で再利用する。

use crate::error::Result;
use chrono::{DateTime, Utc};
use preset_catalog_common::CatalogIndex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const CACHE_FILE_NAME: &str = "index-cache.json";

/// キャッシュファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexCache {
    /// バージョン（互換性チェック用）
    version: u32,
    /// 取得元 → index.json のマップ
    entries: HashMap<String, CachedIndex>,
}

/// キャッシュエントリ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedIndex {
    pub fetched_at: DateTime<Utc>,
    /// 取得したバイト列の SHA-256
    pub sha256: String,
    pub size: u64,
    pub index: CatalogIndex,
}

impl IndexCache {
    const CURRENT_VERSION: u32 = 1;

    pub fn cache_path(dir: &Path) -> PathBuf {
        dir.join(CACHE_FILE_NAME)
    }

    /// キャッシュファイルを読み込み（無い・壊れている場合は空）
    pub fn load(dir: &Path) -> Self {
        let cache_path = Self::cache_path(dir);
        if !cache_path.exists() {
            return Self::default();
        }

        let file = match File::open(&cache_path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, IndexCache>(reader) {
            Ok(cache) if cache.version == Self::CURRENT_VERSION => cache,
            Ok(_) => {
                log::warn!("キャッシュバージョン不一致、再生成します");
                Self::default()
            }
            Err(e) => {
                log::warn!("キャッシュを読み込めません ({}): {}", cache_path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        let file = File::create(Self::cache_path(dir))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// キャッシュファイルを削除。存在しなければ false
    pub fn clear(dir: &Path) -> Result<bool> {
        let cache_path = Self::cache_path(dir);
        if cache_path.exists() {
            std::fs::remove_file(cache_path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn get(&self, source: &str) -> Option<&CachedIndex> {
        self.entries.get(source)
    }

    /// 取得したバイト列とパース結果を登録（同じ取得元は上書き）
    pub fn insert(&mut self, source: String, bytes: &[u8], index: CatalogIndex) {
        self.entries.insert(
            source,
            CachedIndex {
                fetched_at: Utc::now(),
                sha256: compute_sha256(bytes),
                size: bytes.len() as u64,
                index,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sources(&self) -> impl Iterator<Item = (&str, &CachedIndex)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Default for IndexCache {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// SHA-256 の16進表記
pub fn compute_sha256(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
