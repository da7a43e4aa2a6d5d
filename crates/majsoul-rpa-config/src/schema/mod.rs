//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

mod schema_runtime;

pub use schema_runtime::*;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub events: EventsConfig,

    #[serde(default)]
    pub timeouts: TimeoutsConfig,
}

/// Browser that hosts the game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Chrome binary; searched for in the usual places when unset.
    #[serde(default)]
    pub chrome_path: Option<String>,

    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    /// Port of the local intercepting proxy.
    #[serde(default = "default_proxy_port")]
    pub proxy_port: u16,

    #[serde(default)]
    pub initial_left: i32,

    #[serde(default)]
    pub initial_top: i32,

    /// Viewport size in device pixels; must be 16:9 within 1280x720..=3840x2160.
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default)]
    pub headless: bool,

    #[serde(default)]
    pub profile_dir: Option<String>,

    #[serde(default = "default_url")]
    pub url: String,

    /// How long to wait for a freshly spawned Chrome.
    #[serde(default = "default_startup_timeout_ms")]
    pub startup_timeout_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            debug_port: default_debug_port(),
            proxy_port: default_proxy_port(),
            initial_left: 0,
            initial_top: 0,
            width: default_width(),
            height: default_height(),
            headless: false,
            profile_dir: None,
            url: default_url(),
            startup_timeout_ms: default_startup_timeout_ms(),
        }
    }
}

fn default_debug_port() -> u16 {
    9222
}

fn default_proxy_port() -> u16 {
    8080
}

fn default_width() -> u32 {
    1920
}

fn default_height() -> u32 {
    1080
}

fn default_url() -> String {
    "https://game.mahjongsoul.com/".to_string()
}

fn default_startup_timeout_ms() -> u64 {
    6000
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
