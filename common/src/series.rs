//! 素材シリーズ
//!
//! シリーズは保存されたフィールドではなく、`material` の先頭
//! 「シリーズ名 + 空白」から導出される。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 既知のシリーズ（宣言順がそのまま選択肢の表示順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialSeries {
    Panchroma,
    Polymaker,
    Fiberon,
    PolyTerra,
    PolyLite,
}

impl MaterialSeries {
    pub const ALL: [MaterialSeries; 5] = [
        MaterialSeries::Panchroma,
        MaterialSeries::Polymaker,
        MaterialSeries::Fiberon,
        MaterialSeries::PolyTerra,
        MaterialSeries::PolyLite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialSeries::Panchroma => "Panchroma",
            MaterialSeries::Polymaker => "Polymaker",
            MaterialSeries::Fiberon => "Fiberon",
            MaterialSeries::PolyTerra => "PolyTerra",
            MaterialSeries::PolyLite => "PolyLite",
        }
    }

    /// この素材名がシリーズに属するか
    pub fn contains(&self, material: &str) -> bool {
        has_series_prefix(material, self.as_str())
    }
}

impl fmt::Display for MaterialSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaterialSeries {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MaterialSeries::ALL
            .into_iter()
            .find(|series| series.as_str() == s)
            .ok_or_else(|| format!("Unknown series: {}", s))
    }
}

/// `material` が `series + " "` で始まるか
///
/// 任意の文字列を受け付けるため、"Panchroma Pro" のような未知の値でも
/// 素材名が文字通り "Panchroma Pro ..." であれば一致する。
pub fn has_series_prefix(material: &str, series: &str) -> bool {
    material
        .strip_prefix(series)
        .is_some_and(|rest| rest.starts_with(' '))
}

/// 素材名からシリーズを導出（宣言順で最初に一致したもの）
pub fn derive_series(material: &str) -> Option<MaterialSeries> {
    MaterialSeries::ALL
        .into_iter()
        .find(|series| series.contains(material))
}
