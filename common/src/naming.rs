//! ダウンロード名とURLの組み立て

use crate::types::PresetRecord;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// `encodeURI` がエスケープしない記号
const URI_RESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'#');

/// ブラウザの `encodeURI` 相当のエンコード
pub fn encode_uri(path: &str) -> String {
    utf8_percent_encode(path, URI_RESERVED).to_string()
}

/// 最後の拡張子（".json" の "json"）。ドットが無ければ名前全体
fn extension_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) => &name[i + 1..],
        None => name,
    }
}

/// 最後の拡張子を除いた名前。拡張子が空なら何も除かない
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) if i + 1 < name.len() => &name[..i],
        _ => name,
    }
}

/// 保存時のファイル名
///
/// スライサー名があれば "{base} - {slicer}.{ext}" にして、
/// 同じ素材のプリセットを並べて保存しても衝突しないようにする。
pub fn display_filename(filename: &str, slicer: &str) -> String {
    if slicer.is_empty() {
        return filename.to_string();
    }

    let ext = match extension_of(filename) {
        "" => "json",
        ext => ext,
    };
    let base = match strip_extension(filename) {
        "" => "preset",
        base => base,
    };
    format!("{} - {}.{}", base, slicer, ext)
}

/// ZIPファイル名（拡張子を .zip に置き換え）
pub fn zip_name(filename: &str) -> String {
    match strip_extension(filename) {
        "" => "preset.zip".to_string(),
        stem => format!("{}.zip", stem),
    }
}

/// "{brand} {model} {slicer}" の前後空白を除いたラベル
pub fn preset_label(record: &PresetRecord) -> String {
    format!("{} {} {}", record.brand, record.model, record.slicer)
        .trim()
        .to_string()
}

/// 配布元 + エンコード済みパス
pub fn download_url(raw_base: &str, path: &str) -> String {
    format!("{}{}", raw_base, encode_uri(path))
}

/// 1件のプリセットのダウンロード先
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadTarget {
    /// index.json 上の相対パス（エンコード前）
    pub path: String,
    pub url: String,
    pub filename: String,
    pub zip_name: String,
}

impl DownloadTarget {
    /// パスが無いレコードは None
    pub fn for_record(record: &PresetRecord, raw_base: &str) -> Option<Self> {
        let path = record.download_path()?;
        let filename = display_filename(record.filename_or_default(), &record.slicer);
        Some(Self {
            path: path.to_string(),
            url: download_url(raw_base, path),
            zip_name: zip_name(&filename),
            filename,
        })
    }
}
