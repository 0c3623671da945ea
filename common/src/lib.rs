//! Preset Catalog Common Library
//!
//! CLIとWeb(WASM)で共有される型とカスケードフィルタエンジン

pub mod types;
pub mod series;
pub mod filter;
pub mod naming;
pub mod view;
pub mod action;
pub mod theme;
pub mod error;
#[cfg(feature = "archive")]
pub mod archive;

pub use types::{Catalog, CatalogIndex, PresetRecord, DEFAULT_PRESET_FILENAME};
pub use series::{derive_series, MaterialSeries};
pub use filter::{
    apply_filters, compute_option_list, matching_records, reconcile, refresh, FilterDimension,
    FilterRefresh, FilterState, FilteredPresets, MaterialGroup, OptionLists, ReconcileMode,
};
pub use naming::{display_filename, encode_uri, preset_label, zip_name, DownloadTarget};
pub use view::{CatalogView, MaterialRow, PresetVariant};
pub use action::{Action, BrowserState, DownloadFormat, DropdownId, Effect};
pub use theme::{Theme, THEME_STORAGE_KEY};
pub use error::{Error, Result};
#[cfg(feature = "archive")]
pub use archive::{create_archive, single_file_archive, ArchiveEntry};
