//! プリセットのダウンロード
//!
//! 取得に失敗した場合は再試行せず、直接開くためのURLを返す。

use crate::catalog::{fetch_bytes, PresetOrigin};
use crate::error::{CatalogError, Result};
use preset_catalog_common::naming::download_url;
use preset_catalog_common::{single_file_archive, DownloadFormat, DownloadTarget};
use std::path::{Path, PathBuf};

/// ダウンロード結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved(PathBuf),
    /// 取得できなかったので直接開く
    Fallback { location: String, reason: String },
}

pub struct Downloader {
    client: reqwest::Client,
    origin: PresetOrigin,
}

impl Downloader {
    pub fn new(client: reqwest::Client, origin: PresetOrigin) -> Self {
        Self { client, origin }
    }

    /// 取得先（URLまたはローカルパス）
    pub fn location(&self, path: &str) -> String {
        match &self.origin {
            PresetOrigin::Remote { base } => download_url(base, path),
            PresetOrigin::Local { dir } => dir.join(path).display().to_string(),
        }
    }

    pub async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        match &self.origin {
            PresetOrigin::Remote { base } => fetch_bytes(&self.client, &download_url(base, path)).await,
            PresetOrigin::Local { dir } => {
                let file = dir.join(path);
                if !file.exists() {
                    return Err(CatalogError::FileNotFound(file.display().to_string()));
                }
                Ok(tokio::fs::read(file).await?)
            }
        }
    }

    /// 取得して保存。取得失敗は `Fallback` として返す
    pub async fn download(
        &self,
        target: &DownloadTarget,
        format: DownloadFormat,
        out_dir: &Path,
    ) -> Result<DownloadOutcome> {
        let bytes = match self.fetch(&target.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                let location = self.location(&target.path);
                log::warn!("ダウンロード失敗、直接開いてください: {} ({})", location, e);
                return Ok(DownloadOutcome::Fallback {
                    location,
                    reason: e.to_string(),
                });
            }
        };

        let saved = write_download(&bytes, target, format, out_dir)?;
        log::info!("保存: {}", saved.display());
        Ok(DownloadOutcome::Saved(saved))
    }
}

/// 取得済みのバイト列を形式に応じて保存
pub fn write_download(
    bytes: &[u8],
    target: &DownloadTarget,
    format: DownloadFormat,
    out_dir: &Path,
) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)?;

    let output = match format {
        DownloadFormat::Json => {
            let output = out_dir.join(&target.filename);
            std::fs::write(&output, bytes)?;
            output
        }
        DownloadFormat::Zip => {
            let archive = single_file_archive(&target.filename, bytes)?;
            let output = out_dir.join(&target.zip_name);
            std::fs::write(&output, archive)?;
            output
        }
    };
    Ok(output)
}
