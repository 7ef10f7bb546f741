use clap::Parser;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use plant_id_rust::{cli, config, controller, error, identifier, render, report, upload};
use cli::{Cli, Commands};
use config::Config;
use controller::{AnalysisState, Controller};
use error::{PlantIdError, Result};
use identifier::GeminiClient;
use std::time::Duration;
use upload::UploadedFile;

#[tokio::main]
async fn main() -> Result<()> {
    // .env が無くてもよい
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logger(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Identify { image, mime_type, json, output, interactive, model } => {
            println!("🌿 plant-id - 植物識別\n");

            let mut config = config;
            if let Some(model) = model {
                config.model = model;
            }

            // 1. 検証
            println!("[1/3] 画像を検証中...");
            let file = UploadedFile::from_path(&image, mime_type.as_deref())?;
            let summary = format!("{} ({}, {} bytes)", file.file_name, file.mime_type, file.size);
            let client = GeminiClient::from_config(&config)?;
            let model_name = client.model().to_string();
            let mut controller = Controller::new(client);
            controller.select_file(file)?;
            println!("✔ {}\n", summary);

            // 2. 解析
            loop {
                println!("[2/3] AI解析中...");
                let spinner = start_spinner();
                let state = controller.analyze().await;
                spinner.finish_and_clear();

                if state == AnalysisState::Success {
                    let name = controller.result().map(|r| r.common_name.as_str()).unwrap_or_default();
                    println!("✔ {}\n", render::identified_message(name));
                    break;
                }

                print!("{}", render::render_view(&controller.view()));
                let retryable = controller.error().map(|e| e.is_retryable()).unwrap_or(false);
                if interactive && retryable && confirm_retry() {
                    controller.dismiss_error();
                    continue;
                }

                return Err(match controller.error() {
                    Some(e) => PlantIdError::Identify(e.clone()),
                    None => PlantIdError::InvalidOperation(format!("解析できませんでした ({})", state)),
                });
            }

            // 3. 表示・保存
            println!("[3/3] 結果を表示");
            let Some(result) = controller.result() else {
                return Err(PlantIdError::InvalidOperation("結果がありません".into()));
            };

            if json {
                println!("{}", serde_json::to_string_pretty(result)?);
            } else {
                println!("{}", render::render_view(&controller.view()));
            }

            if let Some(output) = output {
                let file_name = controller
                    .selected_file()
                    .map(|f| f.file_name.clone())
                    .unwrap_or_default();
                report::IdentificationReport::new(&file_name, &model_name, result.clone())
                    .save(&output)?;
                println!("✔ 結果を保存: {}", output.display());
            }

            controller.reset();
            println!("\n✅ 完了");
        }

        Commands::Validate { image, mime_type } => {
            let file = UploadedFile::from_path(&image, mime_type.as_deref())?;
            file.validate()?;
            println!("✔ {} は識別に使用できます ({}, {} bytes)", file.file_name, file.mime_type, file.size);
        }

        Commands::Config { set_api_key, set_local_language, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if let Some(language) = set_local_language {
                config.local_language = language;
                config.save()?;
                println!("✔ 地域名の言語を設定しました: {}", config.local_language);
            }

            if show {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  APIベースURL: {}", config.api_base);
                println!("  地域名の言語: {}", config.local_language);
                match config.timeout_seconds {
                    Some(secs) => println!("  タイムアウト: {}秒", secs),
                    None => println!("  タイムアウト: なし"),
                }
                println!("  APIキー: {}", config.masked_api_key());
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

fn init_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn start_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Analyzing plant...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn confirm_retry() -> bool {
    Confirm::new()
        .with_prompt("同じ画像でもう一度解析しますか？")
        .default(true)
        .interact()
        .unwrap_or(false)
}
