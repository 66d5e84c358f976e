mod cmd;
mod config;
mod error;
mod logging;
mod meraki;
mod tagging;

use clap::Parser;
use colored::Colorize;
use config::{Config, ConfigManager};

#[derive(Parser, Debug)]
#[command(
    name = "sm-tagger",
    about = "Tag Meraki Systems Manager devices as cellular-capable or Wi-Fi-only",
    version,
    long_about = "Tag Meraki Systems Manager devices by hardware capability\n\n\
                  Devices reporting an IMEI, ICCID, SIM carrier or phone number are tagged as\n\
                  cellular-capable; all others as Wi-Fi-only. Requires MERAKI_DASHBOARD_API_KEY\n\
                  in the environment or in a .env file."
)]
struct Cli {
    #[command(flatten)]
    tag: cmd::tag::TagArgs,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        logging::log_fatal(&e);
        eprintln!("{} {}", "Error:".red().bold(), e);
        if e.is_resolution() {
            eprintln!("Organization and network names must match exactly (case-sensitive).");
        }
        std::process::exit(1);
    }
}

async fn run() -> error::Result<()> {
    let cli = Cli::parse();

    let env_file = ConfigManager::load_env_file();
    let config = match &cli.tag.config {
        Some(path) => Ok(ConfigManager::with_config_file(path)),
        None => ConfigManager::new(),
    }
    .and_then(|manager| Ok((manager.load_config()?, manager)));

    // Start logging before returning settings errors so they reach the log file
    let log_file = match &config {
        Ok((config, _)) => config.log_file(cli.tag.log_file.clone()),
        Err(_) => Config::default().log_file(cli.tag.log_file.clone()),
    };
    logging::init_logging(&log_file, cli.verbose)?;

    let env_file = env_file?;
    let (config, config_manager) = config?;
    if let Some(path) = env_file {
        tracing::debug!("Loaded environment from {}", path.display());
    }
    tracing::debug!("Config file: {}", config_manager.config_file().display());

    let api_key = ConfigManager::api_key()?;

    // Per-device failures are reported in the summary, not the exit code
    cmd::tag::tag(&cli.tag, &config, api_key).await?;
    Ok(())
}
