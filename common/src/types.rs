//! カタログの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - PresetRecord: プリセット1件（index.jsonの `presets` 要素）
//! - CatalogIndex: index.json 全体
//! - Catalog: 読み込み後は変更されないカタログ本体

use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};

/// ファイル名が無い場合の既定値
pub const DEFAULT_PRESET_FILENAME: &str = "preset.json";

/// `null` とキー欠落をどちらも既定値として扱う
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// プリセット1件
///
/// `material` は慣例としてシリーズ名 + 空白で始まる（例: "Panchroma PLA"）。
/// どのフィールドも一意ではない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub material: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub brand: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub model: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub slicer: String,

    /// 表示用ファイル名（省略時は "preset.json"）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// 配布元からの相対パス。無ければダウンロード不可
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl PresetRecord {
    /// ファイル名（空文字も既定値扱い）
    pub fn filename_or_default(&self) -> &str {
        match self.filename.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_PRESET_FILENAME,
        }
    }

    /// ダウンロード対象のパス
    pub fn download_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }

    pub fn is_downloadable(&self) -> bool {
        self.download_path().is_some()
    }
}

/// index.json のドキュメント
///
/// すべてのキーは省略可能で、欠落時は空リスト。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogIndex {
    #[serde(default, deserialize_with = "null_as_default")]
    pub materials: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub brands: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub models: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub slicers: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub presets: Vec<PresetRecord>,
}

impl CatalogIndex {
    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// JSONバイト列から読み込み
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// 読み込み済みカタログ
///
/// ページ（またはコマンド）の生存期間中は変更されない。
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    index: CatalogIndex,
}

impl Catalog {
    pub fn new(index: CatalogIndex) -> Self {
        Self { index }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        CatalogIndex::from_json(json).map(Self::new)
    }

    pub fn presets(&self) -> &[PresetRecord] {
        &self.index.presets
    }

    pub fn materials(&self) -> &[String] {
        &self.index.materials
    }

    pub fn brands(&self) -> &[String] {
        &self.index.brands
    }

    pub fn models(&self) -> &[String] {
        &self.index.models
    }

    pub fn slicers(&self) -> &[String] {
        &self.index.slicers
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.presets.is_empty()
    }
}

impl From<CatalogIndex> for Catalog {
    fn from(index: CatalogIndex) -> Self {
        Self::new(index)
    }
}
