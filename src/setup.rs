//! Turning the configuration into a running session.

use std::path::PathBuf;

use tracing::{info, warn};

use majsoul_rpa_browser_cdp::{CdpEngine, LaunchOptions};
use majsoul_rpa_config::{BrowserConfig, Config, ConfigValidator, InputConfig};
use majsoul_rpa_feed_websocket::WebSocketFeed;
use majsoul_rpa_input::{InputDriver, InputSettings, TypingDelay};
use majsoul_rpa_presentation::{Context, Rpa};
use majsoul_rpa_protocols::ViewportConfig;

/// An [`Rpa`] together with the feed that keeps its event source alive.
pub(crate) struct Session {
    pub rpa: Rpa,
    _feed: WebSocketFeed,
}

/// Validate `config`, logging warnings and failing on errors.
pub(crate) fn validate(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    for warning in ConfigValidator::validate(config)?.into_result()? {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    Ok(())
}

pub(crate) fn launch_options(browser: &BrowserConfig) -> LaunchOptions {
    LaunchOptions {
        chrome_path: browser.chrome_path.as_ref().map(PathBuf::from),
        debug_port: browser.debug_port,
        proxy_port: browser.proxy_port,
        window_left: browser.initial_left,
        window_top: browser.initial_top,
        width: browser.width,
        height: browser.height,
        headless: browser.headless,
        profile_dir: browser.profile_dir.as_ref().map(PathBuf::from),
        startup_timeout: std::time::Duration::from_millis(browser.startup_timeout_ms),
    }
}

pub(crate) fn input_settings(input: &InputConfig) -> InputSettings {
    InputSettings {
        edge_bias: input.edge_bias,
        scroll_pause: input.scroll_pause(),
        scroll_pause_jitter: input.scroll_jitter(),
        max_sample_attempts: input.max_sample_attempts,
    }
}

pub(crate) fn typing_delay(input: &InputConfig) -> Option<TypingDelay> {
    input.typing_delay().map(|(base, spread)| {
        if spread.is_zero() {
            TypingDelay::Fixed(base)
        } else {
            TypingDelay::Jittered { base, spread }
        }
    })
}

/// Launch the browser on the game and wrap it in a driver.
pub(crate) async fn open_driver(config: &Config) -> Result<InputDriver, Box<dyn std::error::Error>> {
    let viewport = ViewportConfig::new(config.browser.width, config.browser.height)?;
    let engine = CdpEngine::launch(
        &launch_options(&config.browser),
        viewport,
        &config.browser.url,
    )
    .await?;
    info!(
        "Browser ready at {}x{} (zoom {:.3})",
        viewport.width(),
        viewport.height(),
        viewport.zoom_ratio()
    );
    Ok(InputDriver::new(
        Box::new(engine),
        viewport,
        input_settings(&config.input),
    )?)
}

/// Subscribe to the event feed, then open the browser.
///
/// The feed comes first so the first screen of the freshly loaded page is
/// not missed.
pub(crate) async fn start(config: &Config) -> Result<Session, Box<dyn std::error::Error>> {
    let (feed, events) =
        WebSocketFeed::connect(&config.events.feed_url, config.events.connect_timeout()).await?;
    let driver = open_driver(config).await?;
    let ctx = Context::new(driver, Box::new(events))
        .with_typing_delay(typing_delay(&config.input));
    Ok(Session {
        rpa: Rpa::with_context(ctx),
        _feed: feed,
    })
}
