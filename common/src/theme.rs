//! 表示テーマ

use serde::{Deserialize, Serialize};
use std::fmt;

/// 保存先のキー
pub const THEME_STORAGE_KEY: &str = "polymaker-preset-theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Wiki,
}

impl Theme {
    /// "dark" / "wiki" 以外は None
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Theme::Dark),
            "wiki" => Some(Theme::Wiki),
            _ => None,
        }
    }

    /// URLパラメータ → 保存値 → 既定値 の順で決める
    pub fn resolve(from_query: Option<&str>, stored: Option<&str>) -> Self {
        from_query
            .and_then(Theme::parse)
            .or_else(|| stored.and_then(Theme::parse))
            .unwrap_or_default()
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Wiki,
            Theme::Wiki => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Wiki => "wiki",
        }
    }

    /// body に付けるクラス
    pub fn body_class(&self) -> Option<&'static str> {
        match self {
            Theme::Dark => None,
            Theme::Wiki => Some("theme-wiki"),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_takes_precedence() {
        assert_eq!(Theme::resolve(Some("wiki"), Some("dark")), Theme::Wiki);
        assert_eq!(Theme::resolve(Some("dark"), Some("wiki")), Theme::Dark);
    }

    #[test]
    fn test_invalid_query_falls_back_to_stored() {
        assert_eq!(Theme::resolve(Some("neon"), Some("wiki")), Theme::Wiki);
        assert_eq!(Theme::resolve(None, Some("wiki")), Theme::Wiki);
    }

    #[test]
    fn test_default_is_dark() {
        assert_eq!(Theme::resolve(None, None), Theme::Dark);
        assert_eq!(Theme::resolve(Some("Wiki"), Some("")), Theme::Dark);
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Theme::Dark.toggled(), Theme::Wiki);
        assert_eq!(Theme::Wiki.toggled().body_class(), None);
        assert_eq!(Theme::Wiki.body_class(), Some("theme-wiki"));
    }
}
