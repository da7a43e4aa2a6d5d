//! Capability-bound input driver.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info};

use majsoul_rpa_protocols::{BrowserEngine, Region, RpaError, ViewportConfig};

use crate::sampler::{Sampler, DEFAULT_EDGE_BIAS, DEFAULT_MAX_ATTEMPTS, SCROLL_DELTA_PER_CLICK};
use crate::window::{self, SystemWindows, WindowEnumerator, WindowInfo};

/// Pause between keystrokes when typing character by character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypingDelay {
    Fixed(Duration),
    Jittered { base: Duration, spread: Duration },
}

/// Tunables of the driver.
#[derive(Debug, Clone)]
pub struct InputSettings {
    /// Edge bias used by [`InputDriver::click`].
    pub edge_bias: f64,
    /// Pause between consecutive wheel events of one scroll.
    pub scroll_pause: Duration,
    /// Normal spread applied to `scroll_pause`; zero keeps it fixed.
    pub scroll_pause_jitter: Duration,
    /// Rejection attempts per axis in the sampler.
    pub max_sample_attempts: u32,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            edge_bias: DEFAULT_EDGE_BIAS,
            scroll_pause: Duration::from_millis(100),
            scroll_pause_jitter: Duration::ZERO,
            max_sample_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// The only component allowed to talk to the browser engine.
///
/// Owns the engine for its whole lifetime. Every operation fails with
/// [`RpaError::DriverClosed`] after [`InputDriver::close`], and every
/// validation happens before the engine is called.
pub struct InputDriver {
    engine: Box<dyn BrowserEngine>,
    windows: Box<dyn WindowEnumerator>,
    viewport: ViewportConfig,
    settings: InputSettings,
    sampler: Mutex<Sampler>,
    closed: AtomicBool,
}

impl InputDriver {
    pub fn new(
        engine: Box<dyn BrowserEngine>,
        viewport: ViewportConfig,
        settings: InputSettings,
    ) -> Result<Self, RpaError> {
        if !settings.edge_bias.is_finite() || settings.edge_bias <= 0.0 {
            return Err(RpaError::InvalidParameter(format!(
                "default edge bias must be positive, got {}",
                settings.edge_bias
            )));
        }
        let sampler = Sampler::from_entropy().with_max_attempts(settings.max_sample_attempts);
        Ok(Self {
            engine,
            windows: Box::new(SystemWindows),
            viewport,
            settings,
            sampler: Mutex::new(sampler),
            closed: AtomicBool::new(false),
        })
    }

    /// Replace the random source, e.g. with a seeded one.
    pub fn with_sampler(mut self, sampler: Sampler) -> Self {
        self.sampler = Mutex::new(sampler.with_max_attempts(self.settings.max_sample_attempts));
        self
    }

    pub fn with_window_enumerator(mut self, windows: Box<dyn WindowEnumerator>) -> Self {
        self.windows = windows;
        self
    }

    /// Ratio between the device viewport and the logical reference.
    pub fn zoom_ratio(&self) -> f64 {
        self.viewport.zoom_ratio()
    }

    pub fn viewport(&self) -> ViewportConfig {
        self.viewport
    }

    pub fn settings(&self) -> &InputSettings {
        &self.settings
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> Result<(), RpaError> {
        if self.is_closed() {
            Err(RpaError::DriverClosed)
        } else {
            Ok(())
        }
    }

    /// Check that exactly one game window exists.
    pub fn is_singleton(&self) -> Result<WindowInfo, RpaError> {
        self.ensure_open()?;
        window::find_singleton(self.windows.as_ref())
    }

    pub async fn navigate(&self, url: &str) -> Result<(), RpaError> {
        self.ensure_open()?;
        debug!("Navigating to {}", url);
        self.engine.navigate(url).await
    }

    pub async fn refresh(&self) -> Result<(), RpaError> {
        self.ensure_open()?;
        debug!("Reloading page");
        self.engine.reload().await
    }

    /// Type `text` into the focused element.
    ///
    /// Without a delay the text is inserted at once; with one, each character
    /// is sent separately and consecutive characters are separated by it.
    pub async fn write(&self, text: &str, delay: Option<TypingDelay>) -> Result<(), RpaError> {
        self.ensure_open()?;
        let Some(delay) = delay else {
            if text.is_empty() {
                return Ok(());
            }
            return self.engine.type_text(text).await;
        };

        debug!("Typing {} characters with {:?}", text.chars().count(), delay);
        let mut buf = [0u8; 4];
        for (i, ch) in text.chars().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.typing_pause(delay)).await;
            }
            self.engine.type_text(ch.encode_utf8(&mut buf)).await?;
        }
        Ok(())
    }

    fn typing_pause(&self, delay: TypingDelay) -> Duration {
        match delay {
            TypingDelay::Fixed(d) => d,
            TypingDelay::Jittered { base, spread } => self.sampler.lock().jittered_delay(base, spread),
        }
    }

    /// Press one key.
    pub async fn press_key(&self, key: &str) -> Result<(), RpaError> {
        self.press(&[key]).await
    }

    /// Press each key in order, one press per key.
    pub async fn press<K: AsRef<str>>(&self, keys: &[K]) -> Result<(), RpaError> {
        self.ensure_open()?;
        if keys.iter().any(|k| k.as_ref().is_empty()) {
            return Err(RpaError::InvalidParameter("empty key name".to_string()));
        }
        for key in keys {
            self.engine.press_key(key.as_ref()).await?;
        }
        Ok(())
    }

    /// Press modifiers and a key together, e.g. `["Control", "a"]`.
    pub async fn press_hotkey<K: AsRef<str>>(&self, keys: &[K]) -> Result<(), RpaError> {
        self.ensure_open()?;
        if keys.is_empty() || keys.iter().any(|k| k.as_ref().is_empty()) {
            return Err(RpaError::InvalidParameter(
                "hotkey needs at least one non-empty key".to_string(),
            ));
        }
        let combo = keys.iter().map(|k| k.as_ref()).collect::<Vec<_>>().join("+");
        debug!("Pressing hotkey {}", combo);
        self.engine.press_key_combo(&combo).await
    }

    /// Scroll by wheel clicks. Positive scrolls down, negative up.
    pub async fn scroll(&self, clicks: i32) -> Result<(), RpaError> {
        self.ensure_open()?;
        if clicks == 0 {
            return Ok(());
        }
        let delta = if clicks > 0 {
            SCROLL_DELTA_PER_CLICK
        } else {
            debug!("Scrolling up by {} clicks", clicks.unsigned_abs());
            -SCROLL_DELTA_PER_CLICK
        };

        for i in 0..clicks.unsigned_abs() {
            if i > 0 {
                tokio::time::sleep(self.scroll_pause()).await;
            }
            self.engine.wheel(0.0, delta).await?;
        }
        Ok(())
    }

    fn scroll_pause(&self) -> Duration {
        self.sampler
            .lock()
            .jittered_delay(self.settings.scroll_pause, self.settings.scroll_pause_jitter)
    }

    /// Click a random point inside a logical region.
    pub async fn click_region(&self, region: Region, edge_bias: f64) -> Result<(), RpaError> {
        self.ensure_open()?;
        region.validate()?;
        if !edge_bias.is_finite() || edge_bias <= 0.0 {
            return Err(RpaError::InvalidParameter(format!(
                "edge bias must be positive, got {edge_bias}"
            )));
        }

        let (x, y) = self.sampler.lock().sample_point(&region, edge_bias)?;
        let zoom = self.zoom_ratio();
        let (device_x, device_y) = (x * zoom, y * zoom);
        debug!(
            "Click in {:?} at logical ({:.1}, {:.1}), device ({:.1}, {:.1})",
            region, x, y, device_x, device_y
        );
        self.engine.click(device_x, device_y).await
    }

    /// Click a region with the configured default edge bias.
    pub async fn click(&self, region: Region) -> Result<(), RpaError> {
        self.click_region(region, self.settings.edge_bias).await
    }

    /// PNG screenshot of the current viewport.
    pub async fn get_screenshot(&self) -> Result<Vec<u8>, RpaError> {
        self.ensure_open()?;
        self.engine.screenshot().await
    }

    /// Release the browser engine. Calling it again is a no-op.
    pub async fn close(&self) -> Result<(), RpaError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            debug!("Input driver already closed");
            return Ok(());
        }
        info!("Closing input driver");
        self.engine.close().await
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
