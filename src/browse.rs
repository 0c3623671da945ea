//! 対話的な絞り込みとダウンロード

use crate::download::{DownloadOutcome, Downloader};
use crate::error::{CatalogError, Result};
use crate::report;
use dialoguer::{theme::ColorfulTheme, Select};
use preset_catalog_common::{
    Action, BrowserState, Catalog, Effect, FilterDimension, FilterState,
};
use std::path::Path;

const ALL_LABEL: &str = "All";

enum MenuItem {
    Filter(FilterDimension),
    Show,
    Download,
    Quit,
}

fn select(prompt: &str, items: &[String], default: usize) -> Result<usize> {
    Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()
        .map_err(|e| CatalogError::Prompt(e.to_string()))
}

fn main_menu(state: &BrowserState) -> (Vec<String>, Vec<MenuItem>) {
    let mut labels = Vec::new();
    let mut items = Vec::new();
    for dimension in FilterDimension::ALL {
        let current = state.filters().get(dimension).unwrap_or(ALL_LABEL);
        labels.push(format!("{}: {}", dimension.label(), current));
        items.push(MenuItem::Filter(dimension));
    }
    labels.push(format!("一覧を表示 ({})", state.view().status_text()));
    items.push(MenuItem::Show);
    labels.push("ダウンロード".to_string());
    items.push(MenuItem::Download);
    labels.push("終了".to_string());
    items.push(MenuItem::Quit);
    (labels, items)
}

/// 今回の選択以外で解除された軸
pub fn cleared_dimensions(
    before: &FilterState,
    after: &FilterState,
    chosen: FilterDimension,
) -> Vec<FilterDimension> {
    FilterDimension::ALL
        .into_iter()
        .filter(|&d| d != chosen && before.get(d).is_some() && after.get(d).is_none())
        .collect()
}

fn choose_filter(catalog: &Catalog, state: &mut BrowserState, dimension: FilterDimension) -> Result<()> {
    let options = state.options().get(dimension);
    let mut labels = vec![ALL_LABEL.to_string()];
    labels.extend(options.iter().cloned());

    let current = state
        .filters()
        .get(dimension)
        .and_then(|v| options.iter().position(|o| o == v))
        .map(|i| i + 1)
        .unwrap_or(0);
    let choice = select(dimension.label(), &labels, current)?;
    let value = if choice == 0 {
        String::new()
    } else {
        labels[choice].clone()
    };

    let before = state.filters().clone();
    state.dispatch(catalog, Action::SelectFilter { dimension, value });
    if let Some(message) = report::format_cleared(&cleared_dimensions(&before, state.filters(), dimension)) {
        println!("{}", message);
    }
    Ok(())
}

async fn choose_download(
    catalog: &Catalog,
    state: &mut BrowserState,
    downloader: &Downloader,
    out_dir: &Path,
) -> Result<()> {
    if state.view().is_empty() {
        println!("該当するプリセットがありません");
        return Ok(());
    }

    let materials: Vec<String> = state.view().rows.iter().map(|r| r.material.clone()).collect();
    let row = select("素材", &materials, 0)?;

    let variants: Vec<String> = state
        .view()
        .row(row)
        .map(|r| r.variants.iter().map(|v| v.label.clone()).collect())
        .unwrap_or_default();
    if variants.len() > 1 {
        let selected = state.view().row(row).map(|r| r.selected_index()).unwrap_or(0);
        let variant = select("プリセット", &variants, selected)?;
        state.dispatch(catalog, Action::SelectRowVariant { row, variant });
    }

    let formats = vec!["JSON".to_string(), "ZIP".to_string()];
    let action = match select("形式", &formats, 0)? {
        0 => Action::DownloadJson { row },
        _ => Action::DownloadZip { row },
    };

    match state.dispatch(catalog, action) {
        Effect::Download { target, format } => {
            match downloader.download(&target, format, out_dir).await? {
                DownloadOutcome::Saved(path) => println!("✔ 保存しました: {}", path.display()),
                DownloadOutcome::Fallback { location, .. } => {
                    println!("⚠ 取得できませんでした。直接開いてください: {}", location)
                }
            }
        }
        _ => println!("このプリセットはダウンロードできません"),
    }
    Ok(())
}

/// メニューを繰り返し表示し、終了が選ばれるまで続ける
pub async fn run(
    catalog: &Catalog,
    state: &mut BrowserState,
    downloader: &Downloader,
    out_dir: &Path,
) -> Result<()> {
    loop {
        let (labels, items) = main_menu(state);
        let choice = select("操作を選択", &labels, 0)?;
        match items[choice] {
            MenuItem::Filter(dimension) => choose_filter(catalog, state, dimension)?,
            MenuItem::Show => report::print_view(state.view()),
            MenuItem::Download => choose_download(catalog, state, downloader, out_dir).await?,
            MenuItem::Quit => break,
        }
    }
    Ok(())
}
