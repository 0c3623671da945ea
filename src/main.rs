use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use preset_catalog::catalog::{self, cache::IndexCache, CatalogLoader, IndexSource, PresetOrigin};
use preset_catalog::cli::{Cli, Commands};
use preset_catalog::config::Config;
use preset_catalog::download::{DownloadOutcome, Downloader};
use preset_catalog::error::CatalogError;
use preset_catalog::{browse, report};
use preset_catalog_common::{apply_filters, refresh, BrowserState, Catalog, CatalogView};
use std::path::{Path, PathBuf};
use std::time::Duration;

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn output_dir(cli_output: Option<PathBuf>, config: &Config) -> PathBuf {
    cli_output
        .or_else(|| config.download_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

struct Session {
    catalog: Catalog,
    origin: PresetOrigin,
    client: reqwest::Client,
}

async fn open_catalog(cli: &Cli, config: &Config) -> anyhow::Result<Session> {
    let source = IndexSource::parse(&config.resolve_index(cli.index.as_deref()));
    let origin = PresetOrigin::resolve(config.raw_base.as_deref(), &source);
    let client = catalog::build_client(config.timeout_seconds)?;
    let cache_dir = Config::cache_dir()
        .map_err(|e| log::warn!("キャッシュを使用しません: {}", e))
        .ok();

    let loader = CatalogLoader::new(client.clone(), cache_dir, cli.offline);
    let catalog = loader.load(&source).await?;
    Ok(Session {
        catalog,
        origin,
        client,
    })
}

fn print_download_outcome(outcome: &DownloadOutcome) {
    match outcome {
        DownloadOutcome::Saved(path) => println!("✔ 保存しました: {}", path.display()),
        DownloadOutcome::Fallback { location, .. } => {
            println!("⚠ 取得できませんでした。直接開いてください: {}", location)
        }
    }
}

fn show_cache_info(dir: &Path) {
    let cache = IndexCache::load(dir);
    println!("キャッシュ: {}", IndexCache::cache_path(dir).display());
    if cache.is_empty() {
        println!("  (空)");
        return;
    }
    for (source, entry) in cache.sources() {
        println!(
            "  {}  {} bytes  {}  sha256:{}",
            source,
            entry.size,
            entry.fetched_at.format("%Y-%m-%d %H:%M:%S"),
            &entry.sha256[..12.min(entry.sha256.len())]
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let mut config = Config::load().context("設定の読み込みに失敗")?;

    match &cli.command {
        Commands::List {
            filters,
            fixed_point,
            json,
        } => {
            let session = open_catalog(&cli, &config).await?;
            let refreshed = refresh(
                &session.catalog,
                filters.to_state(),
                config.reconcile_mode(*fixed_point),
            );
            if let Some(message) = report::format_cleared(&refreshed.cleared) {
                eprintln!("{}", message);
            }

            let filtered = apply_filters(&session.catalog, &refreshed.state);
            let view = CatalogView::from_filtered(&filtered, session.origin.raw_base());
            if *json {
                println!("{}", report::format_json(&view)?);
            } else {
                report::print_view(&view);
            }
        }

        Commands::Options {
            filters,
            fixed_point,
        } => {
            let session = open_catalog(&cli, &config).await?;
            let refreshed = refresh(
                &session.catalog,
                filters.to_state(),
                config.reconcile_mode(*fixed_point),
            );
            if let Some(message) = report::format_cleared(&refreshed.cleared) {
                eprintln!("{}", message);
            }
            report::print_options(&refreshed.options, &refreshed.state);
            println!(
                "{}",
                apply_filters(&session.catalog, &refreshed.state).status_text()
            );
        }

        Commands::Browse {
            fixed_point,
            output,
        } => {
            let session = open_catalog(&cli, &config).await?;
            let out_dir = output_dir(output.clone(), &config);
            let mut state = BrowserState::new(
                &session.catalog,
                session.origin.raw_base(),
                config.reconcile_mode(*fixed_point),
            );
            let downloader = Downloader::new(session.client, session.origin);

            println!("📦 preset-catalog - {}\n", state.view().status_text());
            browse::run(&session.catalog, &mut state, &downloader, &out_dir).await?;
        }

        Commands::Download {
            material,
            variant,
            brand,
            model,
            slicer,
            format,
            output,
        } => {
            let session = open_catalog(&cli, &config).await?;
            let filters = preset_catalog::cli::FilterArgs {
                material: Some(material.clone()),
                brand: brand.clone(),
                model: model.clone(),
                slicer: slicer.clone(),
                ..Default::default()
            };
            let filtered = apply_filters(&session.catalog, &filters.to_state());
            let mut view = CatalogView::from_filtered(&filtered, session.origin.raw_base());

            let row = view
                .row_mut(0)
                .filter(|row| row.material == *material)
                .ok_or_else(|| CatalogError::MaterialNotFound(material.clone()))?;
            if let Some(number) = variant {
                let count = row.variants.len();
                if *number == 0 || !row.select(number - 1) {
                    return Err(CatalogError::VariantOutOfRange {
                        material: material.clone(),
                        count,
                    }
                    .into());
                }
            }
            let target = row
                .download_target()
                .cloned()
                .ok_or_else(|| CatalogError::NotDownloadable(material.clone()))?;

            let downloader = Downloader::new(session.client, session.origin);
            let out_dir = output_dir(output.clone(), &config);
            let pb = spinner(format!("{} をダウンロード中...", target.filename));
            let outcome = downloader.download(&target, *format, &out_dir).await;
            pb.finish_and_clear();
            print_download_outcome(&outcome?);
        }

        Commands::Config {
            set_index_url,
            set_raw_base,
            show,
        } => {
            if let Some(url) = set_index_url {
                config.set_index_url(url.clone())?;
                println!("✔ index.json の場所を設定しました: {}", url);
            }
            if let Some(base) = set_raw_base {
                config.set_raw_base(base.clone())?;
                match &config.raw_base {
                    Some(base) => println!("✔ 配布元を設定しました: {}", base),
                    None => println!("✔ 配布元の設定を解除しました"),
                }
            }
            if *show || (set_index_url.is_none() && set_raw_base.is_none()) {
                println!("設定ファイル: {}", Config::config_path()?.display());
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }

        Commands::Cache { clear, info } => {
            let dir = Config::cache_dir()?;
            if *clear {
                if IndexCache::clear(&dir)? {
                    println!("✔ キャッシュを削除しました");
                } else {
                    println!("キャッシュはありません");
                }
            }
            if *info || !*clear {
                show_cache_info(&dir);
            }
        }
    }

    Ok(())
}
