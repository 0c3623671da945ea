//! 端末への一覧出力

use preset_catalog_common::{CatalogView, FilterDimension, FilterState, MaterialRow, OptionLists};

/// 1行分の表示（複数件なら番号付きで並べる）
pub fn format_row(row: &MaterialRow) -> Vec<String> {
    if !row.has_variants() {
        let Some(variant) = row.selected_variant() else {
            return vec![format!("{}  |  (プリセットなし)", row.material)];
        };
        let file = variant
            .target
            .as_ref()
            .map(|t| t.filename.as_str())
            .unwrap_or("(ダウンロード不可)");
        return vec![format!("{}  |  {}  |  {}", row.material, variant.label, file)];
    }

    let mut lines = vec![format!("{}  ({}件)", row.material, row.variants.len())];
    for (i, variant) in row.variants.iter().enumerate() {
        let marker = if i == row.selected_index() { "*" } else { " " };
        let file = variant
            .target
            .as_ref()
            .map(|t| t.filename.as_str())
            .unwrap_or("(ダウンロード不可)");
        lines.push(format!("  {}[{}] {}  |  {}", marker, i + 1, variant.label, file));
    }
    lines
}

pub fn format_view(view: &CatalogView) -> Vec<String> {
    let mut lines: Vec<String> = view.rows.iter().flat_map(format_row).collect();
    lines.push(view.status_text());
    lines
}

pub fn print_view(view: &CatalogView) {
    for line in format_view(view) {
        println!("{}", line);
    }
}

/// 現在の選択と選択肢
pub fn format_options(options: &OptionLists, state: &FilterState) -> Vec<String> {
    options
        .iter()
        .map(|(dimension, list)| {
            let current = state.get(dimension).unwrap_or("All");
            let values = if list.is_empty() {
                "(なし)".to_string()
            } else {
                list.join(", ")
            };
            format!("{} [{}]: {}", dimension.label(), current, values)
        })
        .collect()
}

pub fn print_options(options: &OptionLists, state: &FilterState) {
    for line in format_options(options, state) {
        println!("{}", line);
    }
}

/// 解除されたフィルタの通知
pub fn format_cleared(cleared: &[FilterDimension]) -> Option<String> {
    if cleared.is_empty() {
        return None;
    }
    let names: Vec<_> = cleared.iter().map(|d| d.label()).collect();
    Some(format!(
        "他の条件と両立しないため解除: {}",
        names.join(", ")
    ))
}

/// `list --json` 用の出力
pub fn format_json(view: &CatalogView) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&view.rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use preset_catalog_common::{apply_filters, Catalog};

    const INDEX: &str = r#"{
        "presets": [
            {"material": "Panchroma PLA", "brand": "Bambu Lab", "model": "X1C", "slicer": "Bambu Studio", "filename": "pla.json", "path": "bambu/pla.json"},
            {"material": "Panchroma PLA", "brand": "Prusa", "model": "MK4", "slicer": "PrusaSlicer", "filename": "pla.json", "path": "prusa/pla.json"},
            {"material": "PolyLite PETG", "brand": "Prusa", "model": "MK4", "slicer": ""}
        ]
    }"#;

    fn view() -> CatalogView {
        let catalog = Catalog::from_json(INDEX).unwrap();
        let filtered = apply_filters(&catalog, &FilterState::new());
        CatalogView::from_filtered(&filtered, "https://example.com/")
    }

    #[test]
    fn test_format_view_numbers_variants() {
        let lines = format_view(&view());
        assert_eq!(lines[0], "Panchroma PLA  (2件)");
        assert_eq!(lines[1], "  *[1] Bambu Lab X1C Bambu Studio  |  pla - Bambu Studio.json");
        assert_eq!(lines[2], "   [2] Prusa MK4 PrusaSlicer  |  pla - PrusaSlicer.json");
        assert_eq!(lines[3], "PolyLite PETG  |  Prusa MK4  |  (ダウンロード不可)");
        assert_eq!(lines.last().unwrap(), "3 presets in 2 materials.");
    }

    #[test]
    fn test_format_row_without_variants() {
        let row = MaterialRow::new("Fiberon PA6-CF".to_string(), Vec::new());
        assert_eq!(format_row(&row), vec!["Fiberon PA6-CF  |  (プリセットなし)".to_string()]);
    }

    #[test]
    fn test_format_cleared() {
        assert_eq!(format_cleared(&[]), None);
        let message = format_cleared(&[FilterDimension::Brand, FilterDimension::Model]).unwrap();
        assert!(message.ends_with("Brand, Printer"));
    }

    #[test]
    fn test_format_options_marks_current() {
        let catalog = Catalog::from_json(INDEX).unwrap();
        let state = FilterState::new().with(FilterDimension::Brand, "Prusa");
        let refreshed = preset_catalog_common::refresh(&catalog, state, Default::default());
        let lines = format_options(&refreshed.options, &refreshed.state);
        assert_eq!(lines[0], "Series [All]: Panchroma, PolyLite");
        assert_eq!(lines[2], "Brand [Prusa]: Bambu Lab, Prusa");
    }

    #[test]
    fn test_format_json_lists_rows() {
        let json = format_json(&view()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["material"], "Panchroma PLA");
    }
}
