//! カスケードフィルタエンジン
//!
//! 5つの軸（シリーズ・素材・ブランド・機種・スライサー）で
//! プリセットを絞り込み、各軸について「選べば1件以上残る値」だけを
//! 選択肢として返す。
//!
//! 更新の順序:
//! 1. 軸ごとに固定順で、自軸を除外した一致集合から選択肢を再計算
//! 2. 同じ軸の現在値が選択肢に無ければ未選択に戻す
//! 3. すべての軸を処理した後、全条件で最終的な一覧を作る

use crate::series::{has_series_prefix, MaterialSeries};
use crate::types::{Catalog, PresetRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// フィルタ軸（列挙順が処理順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterDimension {
    Series,
    Material,
    Brand,
    Model,
    Slicer,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 5] = [
        FilterDimension::Series,
        FilterDimension::Material,
        FilterDimension::Brand,
        FilterDimension::Model,
        FilterDimension::Slicer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterDimension::Series => "series",
            FilterDimension::Material => "material",
            FilterDimension::Brand => "brand",
            FilterDimension::Model => "model",
            FilterDimension::Slicer => "slicer",
        }
    }

    /// 見出し用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            FilterDimension::Series => "Series",
            FilterDimension::Material => "Material",
            FilterDimension::Brand => "Brand",
            FilterDimension::Model => "Printer",
            FilterDimension::Slicer => "Slicer",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }

    /// レコードの対応フィールド（シリーズは導出値なので None）
    pub fn field<'a>(&self, record: &'a PresetRecord) -> Option<&'a str> {
        match self {
            FilterDimension::Series => None,
            FilterDimension::Material => Some(&record.material),
            FilterDimension::Brand => Some(&record.brand),
            FilterDimension::Model => Some(&record.model),
            FilterDimension::Slicer => Some(&record.slicer),
        }
    }

    /// 選択値 `value` にレコードが一致するか
    pub fn matches(&self, record: &PresetRecord, value: &str) -> bool {
        match self.field(record) {
            Some(field) => field == value,
            None => has_series_prefix(&record.material, value),
        }
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterDimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "series" => Ok(FilterDimension::Series),
            "material" => Ok(FilterDimension::Material),
            "brand" => Ok(FilterDimension::Brand),
            "model" | "printer" => Ok(FilterDimension::Model),
            "slicer" => Ok(FilterDimension::Slicer),
            _ => Err(format!(
                "Unknown filter: {}. Use series, material, brand, model, or slicer",
                s
            )),
        }
    }
}

/// 各軸の選択状態（None = 未選択 = 制約なし）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    selections: [Option<String>; 5],
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, dimension: FilterDimension) -> Option<&str> {
        self.selections[dimension.index()].as_deref()
    }

    /// 値を選択（空文字は未選択として扱う）
    pub fn set(&mut self, dimension: FilterDimension, value: impl Into<String>) {
        let value = value.into();
        self.selections[dimension.index()] = (!value.is_empty()).then_some(value);
    }

    pub fn clear(&mut self, dimension: FilterDimension) {
        self.selections[dimension.index()] = None;
    }

    /// ビルダー形式の選択
    pub fn with(mut self, dimension: FilterDimension, value: impl Into<String>) -> Self {
        self.set(dimension, value);
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.selections.iter().all(Option::is_none)
    }

    /// 選択中の (軸, 値) を固定順で列挙
    pub fn active(&self) -> impl Iterator<Item = (FilterDimension, &str)> + '_ {
        FilterDimension::ALL
            .into_iter()
            .filter_map(move |dimension| self.get(dimension).map(|value| (dimension, value)))
    }

    /// `excluded` 以外の全条件にレコードが一致するか
    pub fn accepts(&self, record: &PresetRecord, excluded: Option<FilterDimension>) -> bool {
        self.active()
            .filter(|(dimension, _)| Some(*dimension) != excluded)
            .all(|(dimension, value)| dimension.matches(record, value))
    }
}

/// `excluded` を除く全条件に一致するレコード（カタログ順を保持）
pub fn matching_records<'a>(
    catalog: &'a Catalog,
    state: &FilterState,
    excluded: Option<FilterDimension>,
) -> Vec<&'a PresetRecord> {
    catalog
        .presets()
        .iter()
        .filter(|record| state.accepts(record, excluded))
        .collect()
}

/// 軸の選択肢を計算
///
/// シリーズは宣言順のまま、他の軸は重複を除いて辞書順に並べる。
/// 空文字は「未選択」と区別できないため選択肢に含めない。
pub fn compute_option_list(
    catalog: &Catalog,
    dimension: FilterDimension,
    state: &FilterState,
) -> Vec<String> {
    let matches = matching_records(catalog, state, Some(dimension));

    match dimension {
        FilterDimension::Series => MaterialSeries::ALL
            .into_iter()
            .filter(|series| matches.iter().any(|record| series.contains(&record.material)))
            .map(|series| series.as_str().to_string())
            .collect(),
        _ => {
            let mut seen = HashSet::new();
            let mut values: Vec<String> = matches
                .iter()
                .filter_map(|record| dimension.field(record))
                .filter(|value| !value.is_empty() && seen.insert(*value))
                .map(str::to_string)
                .collect();
            values.sort();
            values
        }
    }
}

/// 現在値が選択肢に無ければ未選択に戻す。戻した場合 true
pub fn reconcile(dimension: FilterDimension, state: &mut FilterState, options: &[String]) -> bool {
    let stale = state
        .get(dimension)
        .is_some_and(|current| !options.iter().any(|option| option == current));

    if stale {
        log::debug!(
            "{} の選択 {:?} は他の条件と両立しないため解除",
            dimension,
            state.get(dimension)
        );
        state.clear(dimension);
    }
    stale
}

/// 全軸の選択肢
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionLists {
    lists: [Vec<String>; 5],
}

impl OptionLists {
    pub fn get(&self, dimension: FilterDimension) -> &[String] {
        &self.lists[dimension.index()]
    }

    fn set(&mut self, dimension: FilterDimension, options: Vec<String>) {
        self.lists[dimension.index()] = options;
    }

    /// index.json の補助リストから作る初期選択肢（絞り込み前）
    pub fn seeded(catalog: &Catalog) -> Self {
        let mut lists = Self::default();
        lists.set(
            FilterDimension::Series,
            MaterialSeries::ALL.iter().map(|s| s.as_str().to_string()).collect(),
        );
        lists.set(FilterDimension::Material, catalog.materials().to_vec());
        lists.set(FilterDimension::Brand, catalog.brands().to_vec());
        lists.set(FilterDimension::Model, catalog.models().to_vec());
        lists.set(FilterDimension::Slicer, catalog.slicers().to_vec());
        lists
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterDimension, &[String])> + '_ {
        FilterDimension::ALL
            .into_iter()
            .map(move |dimension| (dimension, self.get(dimension)))
    }
}

/// 整合処理の方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReconcileMode {
    /// 固定順に1回だけ処理する
    #[default]
    SinglePass,
    /// 解除が起きなくなるまで繰り返す
    FixedPoint,
}

/// `refresh` の結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterRefresh {
    pub state: FilterState,
    pub options: OptionLists,
    /// 解除された軸（解除順）
    pub cleared: Vec<FilterDimension>,
}

fn reconcile_pass(
    catalog: &Catalog,
    state: &mut FilterState,
    options: &mut OptionLists,
    cleared: &mut Vec<FilterDimension>,
) -> bool {
    let mut changed = false;
    for dimension in FilterDimension::ALL {
        let list = compute_option_list(catalog, dimension, state);
        if reconcile(dimension, state, &list) {
            cleared.push(dimension);
            changed = true;
        }
        options.set(dimension, list);
    }
    changed
}

/// 選択変更後の選択肢再計算と整合
///
/// 各軸の選択肢はその軸を処理する時点の状態から計算するため、
/// 先に処理した軸で解除が起きると後の軸はその緩和を反映する。
/// `SinglePass` では後の解除が前の軸の選択肢に反映されない
/// （選択肢が不足することはあっても、0件になる値は含まれない）。
pub fn refresh(catalog: &Catalog, state: FilterState, mode: ReconcileMode) -> FilterRefresh {
    let mut state = state;
    let mut options = OptionLists::default();
    let mut cleared = Vec::new();

    let mut changed = reconcile_pass(catalog, &mut state, &mut options, &mut cleared);
    if mode == ReconcileMode::FixedPoint {
        // 1周ごとに少なくとも1軸が解除されるので最大5周で止まる
        while changed {
            changed = reconcile_pass(catalog, &mut state, &mut options, &mut cleared);
        }
    }

    FilterRefresh {
        state,
        options,
        cleared,
    }
}

/// 素材ごとのグループ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialGroup<'a> {
    pub material: &'a str,
    pub presets: Vec<&'a PresetRecord>,
}

impl MaterialGroup<'_> {
    /// 複数件のグループは行内で切り替えて選ぶ
    pub fn has_variants(&self) -> bool {
        self.presets.len() > 1
    }
}

/// 全条件で絞り込んだ結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredPresets<'a> {
    pub groups: Vec<MaterialGroup<'a>>,
}

impl FilteredPresets<'_> {
    pub fn preset_count(&self) -> usize {
        self.groups.iter().map(|g| g.presets.len()).sum()
    }

    pub fn material_count(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn status_text(&self) -> String {
        status_text(self.preset_count(), self.material_count())
    }
}

/// "N presets in M materials."
pub fn status_text(presets: usize, materials: usize) -> String {
    format!("{} presets in {} materials.", presets, materials)
}

/// 一致レコードを素材の初出順にグループ化
pub fn group_by_material<'a>(records: &[&'a PresetRecord]) -> Vec<MaterialGroup<'a>> {
    let mut groups: Vec<MaterialGroup<'a>> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|g| g.material == record.material) {
            Some(group) => group.presets.push(record),
            None => groups.push(MaterialGroup {
                material: &record.material,
                presets: vec![record],
            }),
        }
    }
    groups
}

/// 全条件を適用して素材ごとにまとめる
pub fn apply_filters<'a>(catalog: &'a Catalog, state: &FilterState) -> FilteredPresets<'a> {
    let records = matching_records(catalog, state, None);
    FilteredPresets {
        groups: group_by_material(&records),
    }
}
