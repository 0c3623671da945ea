use clap::{Args, Parser, Subcommand};
use preset_catalog_common::{DownloadFormat, FilterDimension, FilterState};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "スライサープリセットのカタログ絞り込み・ダウンロードツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// index.json のURLまたはパス（設定・環境変数より優先）
    #[arg(long, global = true)]
    pub index: Option<String>,

    /// キャッシュ済みの index.json を使う（ネットワークに接続しない）
    #[arg(long, global = true)]
    pub offline: bool,
}

/// 絞り込み条件
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// シリーズ (Panchroma/Polymaker/Fiberon/PolyTerra/PolyLite)
    #[arg(long)]
    pub series: Option<String>,

    /// 素材名
    #[arg(long)]
    pub material: Option<String>,

    /// ブランド
    #[arg(long)]
    pub brand: Option<String>,

    /// プリンター機種
    #[arg(long, alias = "printer")]
    pub model: Option<String>,

    /// スライサー
    #[arg(long)]
    pub slicer: Option<String>,
}

impl FilterArgs {
    pub fn to_state(&self) -> FilterState {
        let values = [
            &self.series,
            &self.material,
            &self.brand,
            &self.model,
            &self.slicer,
        ];
        let mut state = FilterState::new();
        for (dimension, value) in FilterDimension::ALL.into_iter().zip(values) {
            if let Some(value) = value {
                state.set(dimension, value.as_str());
            }
        }
        state
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// 条件に一致するプリセットを素材ごとに表示
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// 整合処理を解除が起きなくなるまで繰り返す
        #[arg(long)]
        fixed_point: bool,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 各フィルタの選択肢（1件以上残る値のみ）を表示
    Options {
        #[command(flatten)]
        filters: FilterArgs,

        /// 整合処理を解除が起きなくなるまで繰り返す
        #[arg(long)]
        fixed_point: bool,
    },

    /// 対話的に絞り込んでダウンロード
    Browse {
        /// 整合処理を解除が起きなくなるまで繰り返す
        #[arg(long)]
        fixed_point: bool,

        /// 保存先ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 素材のプリセットをダウンロード
    Download {
        /// 素材名（一覧の1列目）
        #[arg(required = true)]
        material: String,

        /// 行内のプリセット番号（1始まり、省略時は先頭）
        #[arg(long)]
        variant: Option<usize>,

        /// ブランドで絞り込み
        #[arg(long)]
        brand: Option<String>,

        /// 機種で絞り込み
        #[arg(long, alias = "printer")]
        model: Option<String>,

        /// スライサーで絞り込み
        #[arg(long)]
        slicer: Option<String>,

        /// 保存形式 (json/zip)
        #[arg(short, long, default_value = "json")]
        format: DownloadFormat,

        /// 保存先ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// index.json のURLまたはパスを設定
        #[arg(long)]
        set_index_url: Option<String>,

        /// プリセット配布元を設定（空文字で解除）
        #[arg(long)]
        set_raw_base: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// index.json キャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },
}
