use clap::Parser;
use numintel::config::cli::filter_args;
use numintel::utils::{logger, validation::Validate};
use numintel::{render, CliConfig, LookupEngine, Settings};
use std::io::IsTerminal;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let (args, ignored) = filter_args(std::env::args());
    let config = CliConfig::parse_from(args);

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting numintel");
    if !ignored.is_empty() {
        tracing::debug!("Ignoring unrecognized arguments: {:?}", ignored);
    }

    let settings = load_settings(&config);
    let engine = LookupEngine::from_settings(&settings)?;

    let report = engine.run(&config.lookup_request()).await;

    let color = !config.json && std::io::stdout().is_terminal();
    let output = render(&report, config.output_mode(), color)?;
    println!("{}", output);

    Ok(())
}

/// 設定檔有問題時退回只用環境變數，不中止執行
fn load_settings(config: &CliConfig) -> Settings {
    let loaded = Settings::discover(config.config.as_deref()).and_then(|settings| {
        settings.validate()?;
        Ok(settings)
    });

    let settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("⚠️ Ignoring settings file: {}", e);
            Settings::default()
        }
    };

    settings.with_process_env()
}
