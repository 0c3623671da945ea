use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("Failed to load: {0}")]
    CatalogLoad(String),

    #[error("オフラインキャッシュがありません: {0}")]
    CacheMiss(String),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTPステータス {status}: {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("素材が見つかりません: {0}")]
    MaterialNotFound(String),

    #[error("プリセットの選択が範囲外です: {material} には {count} 件あります")]
    VariantOutOfRange { material: String, count: usize },

    #[error("ダウンロードできないプリセットです（パスなし）: {0}")]
    NotDownloadable(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("アーカイブ生成エラー: {0}")]
    Archive(preset_catalog_common::Error),

    #[error("対話入力エラー: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// 共通ライブラリのエラーを種類ごとに振り分ける
impl From<preset_catalog_common::Error> for CatalogError {
    fn from(err: preset_catalog_common::Error) -> Self {
        match err {
            preset_catalog_common::Error::Json(e) => CatalogError::JsonParse(e),
            preset_catalog_common::Error::Io(e) => CatalogError::Io(e),
            other => CatalogError::Archive(other),
        }
    }
}
