//! UI操作のディスパッチ
//!
//! 描画層はイベントを `Action` に変換して `BrowserState::dispatch` に渡し、
//! 返ってきた `Effect` だけを実行する（ダウンロード等の副作用）。

use crate::filter::{apply_filters, refresh, FilterDimension, FilterState, OptionLists, ReconcileMode};
use crate::naming::DownloadTarget;
use crate::types::Catalog;
use crate::view::CatalogView;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ドロップダウンの識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropdownId {
    Filter(FilterDimension),
    Row(usize),
}

/// ダウンロード形式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadFormat {
    #[default]
    Json,
    Zip,
}

impl FromStr for DownloadFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(DownloadFormat::Json),
            "zip" => Ok(DownloadFormat::Zip),
            _ => Err(format!("Unknown format: {}. Use json or zip", s)),
        }
    }
}

impl fmt::Display for DownloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadFormat::Json => write!(f, "json"),
            DownloadFormat::Zip => write!(f, "zip"),
        }
    }
}

/// UI境界で一度だけ判別される操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// フィルタ値の選択（空文字 = All）
    SelectFilter { dimension: FilterDimension, value: String },
    /// 行内のプリセット切り替え（フィルタ状態は変えない）
    SelectRowVariant { row: usize, variant: usize },
    DownloadJson { row: usize },
    DownloadZip { row: usize },
    ToggleDropdown(DropdownId),
    CloseDropdowns,
}

/// ディスパッチ結果として描画層が行うこと
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Render,
    Download {
        target: DownloadTarget,
        format: DownloadFormat,
    },
}

/// 画面全体の状態
#[derive(Debug, Clone)]
pub struct BrowserState {
    filters: FilterState,
    options: OptionLists,
    view: CatalogView,
    open_dropdown: Option<DropdownId>,
    mode: ReconcileMode,
    raw_base: String,
}

impl BrowserState {
    /// 全軸未選択で初期化し、最初の描画データを作る
    ///
    /// 選択肢は index.json の補助リストで仮に埋め、直後の `rebuild` で
    /// 一致レコードから計算し直した値に置き換わる。
    pub fn new(catalog: &Catalog, raw_base: impl Into<String>, mode: ReconcileMode) -> Self {
        let mut state = Self {
            filters: FilterState::new(),
            options: OptionLists::seeded(catalog),
            view: CatalogView::default(),
            open_dropdown: None,
            mode,
            raw_base: raw_base.into(),
        };
        state.rebuild(catalog);
        state
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn options(&self) -> &OptionLists {
        &self.options
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    pub fn open_dropdown(&self) -> Option<DropdownId> {
        self.open_dropdown
    }

    pub fn is_open(&self, id: DropdownId) -> bool {
        self.open_dropdown == Some(id)
    }

    pub fn dispatch(&mut self, catalog: &Catalog, action: Action) -> Effect {
        match action {
            Action::SelectFilter { dimension, value } => {
                self.filters.set(dimension, value);
                self.open_dropdown = None;
                self.rebuild(catalog);
                Effect::Render
            }
            Action::SelectRowVariant { row, variant } => {
                self.open_dropdown = None;
                match self.view.row_mut(row).map(|r| r.select(variant)) {
                    Some(true) => Effect::Render,
                    _ => Effect::None,
                }
            }
            Action::DownloadJson { row } => self.download(row, DownloadFormat::Json),
            Action::DownloadZip { row } => self.download(row, DownloadFormat::Zip),
            Action::ToggleDropdown(id) => {
                self.open_dropdown = if self.is_open(id) { None } else { Some(id) };
                Effect::Render
            }
            Action::CloseDropdowns => {
                if self.open_dropdown.take().is_some() {
                    Effect::Render
                } else {
                    Effect::None
                }
            }
        }
    }

    fn download(&self, row: usize, format: DownloadFormat) -> Effect {
        match self.view.row(row).and_then(|r| r.download_target()) {
            Some(target) => Effect::Download {
                target: target.clone(),
                format,
            },
            None => Effect::None,
        }
    }

    /// 選択肢の再計算 → 整合 → 最終絞り込み
    fn rebuild(&mut self, catalog: &Catalog) {
        let refreshed = refresh(catalog, std::mem::take(&mut self.filters), self.mode);
        self.filters = refreshed.state;
        self.options = refreshed.options;
        let filtered = apply_filters(catalog, &self.filters);
        self.view = CatalogView::from_filtered(&filtered, &self.raw_base);
    }
}
