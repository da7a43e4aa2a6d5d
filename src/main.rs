//! majsoul-rpa - browser automation for Mahjong Soul
//!
//! Main entry point of the CLI.

mod cli;
mod flow;
mod setup;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use majsoul_rpa_config::{Config, ConfigLoader};
use majsoul_rpa_input::window::{find_singleton, SystemWindows};
use majsoul_rpa_protocols::ViewportConfig;

use cli::{Cli, Commands};

/// Get the .majsoul-rpa directory path.
fn rpa_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".majsoul-rpa"))
        .unwrap_or_else(|| PathBuf::from(".majsoul-rpa"))
}

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.majsoul-rpa/logs/ with daily rotation.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = rpa_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("majsoul-rpa")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The worker flushes until the guard drops.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let cli = Cli::parse();
    let config = ConfigLoader::load_or_default(cli.config.as_deref())?;

    let result = match cli.command {
        None => {
            setup::validate(&config)?;
            flow::run(config, None, 1).await
        }
        Some(Commands::Run { email, matches }) => {
            setup::validate(&config)?;
            flow::run(config, email, matches).await
        }
        Some(Commands::Screenshot { output, delay }) => {
            setup::validate(&config)?;
            screenshot(&config, output, Duration::from_secs(delay)).await
        }
        Some(Commands::CheckConfig) => check_config(&config),
        Some(Commands::CheckWindow) => check_window(),
    };

    if let Err(ref e) = result {
        error!("{}", e);
    }
    result
}

/// Open the game, let it load and save one screenshot.
async fn screenshot(
    config: &Config,
    output: PathBuf,
    delay: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let driver = setup::open_driver(config).await?;
    tokio::time::sleep(delay).await;
    let captured = driver.get_screenshot().await;
    driver.close().await?;

    let png = captured?;
    tokio::fs::write(&output, &png).await?;
    info!("Saved {} bytes to {}", png.len(), output.display());
    Ok(())
}

fn check_config(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    setup::validate(config)?;
    let viewport = ViewportConfig::new(config.browser.width, config.browser.height)?;
    println!("Configuration OK");
    println!(
        "  viewport {}x{}, zoom ratio {:.4}",
        viewport.width(),
        viewport.height(),
        viewport.zoom_ratio()
    );
    println!("  game url {}", config.browser.url);
    println!("  event feed {}", config.events.feed_url);
    Ok(())
}

fn check_window() -> Result<(), Box<dyn std::error::Error>> {
    let window = find_singleton(&SystemWindows)?;
    println!("Found game window {} (pid {})", window.id, window.pid);
    Ok(())
}
