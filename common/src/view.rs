//! 一覧表示用の行データ
//!
//! 絞り込み結果（素材ごとのグループ）を、描画層がそのまま
//! 投影できる所有データに変換する。

use crate::filter::{status_text, FilteredPresets};
use crate::naming::{preset_label, DownloadTarget};
use serde::{Deserialize, Serialize};

/// 行内の選択肢（同じ素材の1プリセット）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetVariant {
    pub label: String,
    pub slicer: String,
    /// パスが無いプリセットは None
    pub target: Option<DownloadTarget>,
}

/// 素材1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRow {
    pub material: String,
    pub variants: Vec<PresetVariant>,
    selected: usize,
}

impl MaterialRow {
    pub fn new(material: String, variants: Vec<PresetVariant>) -> Self {
        Self {
            material,
            variants,
            selected: 0,
        }
    }

    /// 複数件なら行内で切り替える
    pub fn has_variants(&self) -> bool {
        self.variants.len() > 1
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_variant(&self) -> Option<&PresetVariant> {
        self.variants.get(self.selected)
    }

    /// 選択を切り替える。範囲外なら何もしない
    pub fn select(&mut self, variant: usize) -> bool {
        if variant < self.variants.len() {
            self.selected = variant;
            true
        } else {
            false
        }
    }

    pub fn download_target(&self) -> Option<&DownloadTarget> {
        self.selected_variant().and_then(|v| v.target.as_ref())
    }
}

/// 一覧全体
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogView {
    pub rows: Vec<MaterialRow>,
}

impl CatalogView {
    pub fn from_filtered(filtered: &FilteredPresets<'_>, raw_base: &str) -> Self {
        let rows = filtered
            .groups
            .iter()
            .map(|group| {
                let variants = group
                    .presets
                    .iter()
                    .map(|record| PresetVariant {
                        label: preset_label(record),
                        slicer: record.slicer.clone(),
                        target: DownloadTarget::for_record(record, raw_base),
                    })
                    .collect();
                MaterialRow::new(group.material.to_string(), variants)
            })
            .collect();
        Self { rows }
    }

    pub fn preset_count(&self) -> usize {
        self.rows.iter().map(|r| r.variants.len()).sum()
    }

    pub fn material_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn status_text(&self) -> String {
        status_text(self.preset_count(), self.material_count())
    }

    pub fn row(&self, index: usize) -> Option<&MaterialRow> {
        self.rows.get(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut MaterialRow> {
        self.rows.get_mut(index)
    }

    /// 素材名で行を探す
    pub fn find(&self, material: &str) -> Option<(usize, &MaterialRow)> {
        self.rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.material == material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{apply_filters, FilterState};
    use crate::types::{Catalog, CatalogIndex, PresetRecord};

    fn record(material: &str, brand: &str, slicer: &str, path: Option<&str>) -> PresetRecord {
        PresetRecord {
            material: material.into(),
            brand: brand.into(),
            model: "X1C".into(),
            slicer: slicer.into(),
            filename: Some("p.json".into()),
            path: path.map(str::to_string),
        }
    }

    fn view(records: Vec<PresetRecord>) -> CatalogView {
        let catalog = Catalog::new(CatalogIndex {
            presets: records,
            ..Default::default()
        });
        let filtered = apply_filters(&catalog, &FilterState::new());
        CatalogView::from_filtered(&filtered, "")
    }

    #[test]
    fn test_rows_follow_groups() {
        let view = view(vec![
            record("PLA", "A", "Orca", Some("a.json")),
            record("PLA", "B", "Cura", Some("b.json")),
            record("PETG", "C", "Orca", Some("c.json")),
        ]);
        assert_eq!(view.material_count(), 2);
        assert_eq!(view.preset_count(), 3);
        assert_eq!(view.status_text(), "3 presets in 2 materials.");
        assert!(view.rows[0].has_variants());
        assert!(!view.rows[1].has_variants());
        assert_eq!(view.rows[0].variants[0].label, "A X1C Orca");
    }

    #[test]
    fn test_first_variant_selected_by_default() {
        let view = view(vec![
            record("PLA", "A", "Orca", Some("a.json")),
            record("PLA", "B", "Cura", Some("b.json")),
        ]);
        let row = &view.rows[0];
        assert_eq!(row.selected_index(), 0);
        assert_eq!(row.download_target().unwrap().url, "a.json");
    }

    #[test]
    fn test_select_variant_changes_target_only() {
        let mut view = view(vec![
            record("PLA", "A", "Orca", Some("a.json")),
            record("PLA", "B", "Cura", Some("b.json")),
        ]);
        let row = view.row_mut(0).unwrap();
        assert!(row.select(1));
        assert_eq!(row.download_target().unwrap().filename, "p - Cura.json");
        assert!(!row.select(5));
        assert_eq!(row.selected_index(), 1);
    }

    #[test]
    fn test_variant_without_path_has_no_target() {
        let view = view(vec![record("PLA", "A", "Orca", None)]);
        assert!(view.rows[0].download_target().is_none());
    }

    #[test]
    fn test_find_row() {
        let view = view(vec![
            record("PLA", "A", "Orca", Some("a.json")),
            record("PETG", "C", "Orca", Some("c.json")),
        ]);
        let (index, row) = view.find("PETG").unwrap();
        assert_eq!(index, 1);
        assert_eq!(row.material, "PETG");
        assert!(view.find("ABS").is_none());
    }
}
