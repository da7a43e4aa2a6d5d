//! Input, event feed and timeout sections.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Humanized input tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Larger values concentrate clicks around region centers.
    #[serde(default = "default_edge_bias")]
    pub edge_bias: f64,

    /// Mean pause between typed characters. Zero inserts text at once.
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,

    #[serde(default = "default_typing_jitter_ms")]
    pub typing_jitter_ms: u64,

    #[serde(default = "default_scroll_pause_ms")]
    pub scroll_pause_ms: u64,

    #[serde(default)]
    pub scroll_jitter_ms: u64,

    #[serde(default = "default_max_sample_attempts")]
    pub max_sample_attempts: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            edge_bias: default_edge_bias(),
            typing_delay_ms: default_typing_delay_ms(),
            typing_jitter_ms: default_typing_jitter_ms(),
            scroll_pause_ms: default_scroll_pause_ms(),
            scroll_jitter_ms: 0,
            max_sample_attempts: default_max_sample_attempts(),
        }
    }
}

impl InputConfig {
    /// `(base, spread)` of the typing delay, `None` when typing at once.
    pub fn typing_delay(&self) -> Option<(Duration, Duration)> {
        if self.typing_delay_ms == 0 {
            return None;
        }
        Some((
            Duration::from_millis(self.typing_delay_ms),
            Duration::from_millis(self.typing_jitter_ms),
        ))
    }

    pub fn scroll_pause(&self) -> Duration {
        Duration::from_millis(self.scroll_pause_ms)
    }

    pub fn scroll_jitter(&self) -> Duration {
        Duration::from_millis(self.scroll_jitter_ms)
    }
}

fn default_edge_bias() -> f64 {
    2.0
}

fn default_typing_delay_ms() -> u64 {
    120
}

fn default_typing_jitter_ms() -> u64 {
    40
}

fn default_scroll_pause_ms() -> u64 {
    100
}

fn default_max_sample_attempts() -> u32 {
    1000
}

/// Decoded game event feed published by the interception proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl EventsConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn default_feed_url() -> String {
    "ws://localhost:8765/events".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

/// Default timeouts of the screen actions, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutsConfig {
    /// First screen after the page loads.
    #[serde(default = "default_presentation_secs")]
    pub presentation_secs: u64,

    #[serde(default = "default_login_secs")]
    pub login_secs: u64,

    /// Waiting for the lobby after the auth code; includes mail latency.
    #[serde(default = "default_auth_secs")]
    pub auth_secs: u64,

    #[serde(default = "default_room_secs")]
    pub room_secs: u64,

    #[serde(default = "default_match_start_secs")]
    pub match_start_secs: u64,

    #[serde(default = "default_operation_secs")]
    pub operation_secs: u64,

    /// Observation waits while other players act.
    #[serde(default = "default_wait_secs")]
    pub wait_secs: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            presentation_secs: default_presentation_secs(),
            login_secs: default_login_secs(),
            auth_secs: default_auth_secs(),
            room_secs: default_room_secs(),
            match_start_secs: default_match_start_secs(),
            operation_secs: default_operation_secs(),
            wait_secs: default_wait_secs(),
        }
    }
}

impl TimeoutsConfig {
    /// All fields with their keys, for validation and display.
    pub fn entries(&self) -> [(&'static str, u64); 7] {
        [
            ("presentation_secs", self.presentation_secs),
            ("login_secs", self.login_secs),
            ("auth_secs", self.auth_secs),
            ("room_secs", self.room_secs),
            ("match_start_secs", self.match_start_secs),
            ("operation_secs", self.operation_secs),
            ("wait_secs", self.wait_secs),
        ]
    }

    pub fn presentation(&self) -> Duration {
        Duration::from_secs(self.presentation_secs)
    }

    pub fn login(&self) -> Duration {
        Duration::from_secs(self.login_secs)
    }

    pub fn auth(&self) -> Duration {
        Duration::from_secs(self.auth_secs)
    }

    pub fn room(&self) -> Duration {
        Duration::from_secs(self.room_secs)
    }

    pub fn match_start(&self) -> Duration {
        Duration::from_secs(self.match_start_secs)
    }

    pub fn operation(&self) -> Duration {
        Duration::from_secs(self.operation_secs)
    }

    pub fn wait(&self) -> Duration {
        Duration::from_secs(self.wait_secs)
    }
}

fn default_presentation_secs() -> u64 {
    60
}

fn default_login_secs() -> u64 {
    60
}

fn default_auth_secs() -> u64 {
    120
}

fn default_room_secs() -> u64 {
    30
}

fn default_match_start_secs() -> u64 {
    120
}

fn default_operation_secs() -> u64 {
    30
}

fn default_wait_secs() -> u64 {
    60
}
