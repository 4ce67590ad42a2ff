mod commands;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "meshdeploy")]
#[command(about = "マニフェストと環境から、メッシュ配下のサービスのデプロイ計画を生成する", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// コンパイル入力の指定
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// マニフェストファイル（省略時は manifest.yaml を検索）
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,
    /// ポリシー上書きファイル（省略時は MESHDEPLOY_POLICY や .meshdeploy/policy.yaml を検索）
    #[arg(long)]
    pub policy: Option<PathBuf>,
    /// 登録済みリソース一覧（指定時は一覧にある参照のみ解決する）
    #[arg(short, long, env = "MESHDEPLOY_INVENTORY")]
    pub inventory: Option<PathBuf>,
    /// 検証エラーがあっても計画の生成を続ける
    #[arg(long)]
    pub advisory: bool,
}

/// 計画の出力形式
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Subcommand)]
enum Commands {
    /// デプロイ計画を生成して出力
    Synth {
        #[command(flatten)]
        input: InputArgs,
        /// 出力形式
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
        /// 出力先ファイル（省略時は標準出力）
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// 環境変数とマニフェストを検証
    Validate {
        /// マニフェストファイル（省略時は manifest.yaml を検索）
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
    /// プロビジョニング手順を表示（dry-run）
    Plan {
        #[command(flatten)]
        input: InputArgs,
        /// 検証エラーが残った計画でも dry-run する
        #[arg(long)]
        allow_diagnostics: bool,
    },
    /// バージョン情報を表示
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 標準出力は計画の出力に使うので、ログは stderr に出す
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match cli.command {
        Commands::Synth { input, format, out } => {
            commands::synth::handle(&input, format, out.as_deref())?;
        }
        Commands::Validate { manifest } => {
            commands::validate::handle(manifest.as_deref())?;
        }
        Commands::Plan {
            input,
            allow_diagnostics,
        } => {
            commands::plan::handle(&input, allow_diagnostics).await?;
        }
        Commands::Version => {
            println!("meshdeploy {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
