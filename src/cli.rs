use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plant-id")]
#[command(about = "薬用植物AI識別ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 植物の写真を識別
    Identify {
        /// 画像ファイル (JPG/PNG/WEBP, 10MBまで)
        #[arg(required = true)]
        image: PathBuf,

        /// MIMEタイプを明示（省略時は拡張子から判定）
        #[arg(long)]
        mime_type: Option<String>,

        /// 結果をJSONで標準出力
        #[arg(long)]
        json: bool,

        /// 識別レポートの保存先（JSON）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 失敗時に同じ画像での再試行を確認する
        #[arg(short, long)]
        interactive: bool,

        /// モデルを上書き
        #[arg(short, long)]
        model: Option<String>,
    },

    /// 画像ファイルの検証のみ行う（通信なし）
    Validate {
        #[arg(required = true)]
        image: PathBuf,

        /// MIMEタイプを明示
        #[arg(long)]
        mime_type: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 地域名の言語を設定（例: Tamil, Hindi）
        #[arg(long)]
        set_local_language: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
