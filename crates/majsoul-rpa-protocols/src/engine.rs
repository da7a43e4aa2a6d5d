//! Browser-control engine interface.
//!
//! The input driver is the only caller of this trait. Implementations work in
//! device coordinates and perform no validation or humanization of their own.

use async_trait::async_trait;

use crate::error::RpaError;

/// Minimal browser-control surface needed to drive the game client.
#[async_trait]
pub trait BrowserEngine: Send + Sync {
    /// Navigate the page to `url`.
    async fn navigate(&self, url: &str) -> Result<(), RpaError>;

    /// Reload the current page.
    async fn reload(&self) -> Result<(), RpaError>;

    /// Insert text at the focused element.
    async fn type_text(&self, text: &str) -> Result<(), RpaError>;

    /// Press and release one key.
    async fn press_key(&self, key: &str) -> Result<(), RpaError>;

    /// Press one key combination such as `"Control+a"`.
    async fn press_key_combo(&self, combo: &str) -> Result<(), RpaError>;

    /// Left click at a device point.
    async fn click(&self, x: f64, y: f64) -> Result<(), RpaError>;

    /// Dispatch one wheel event.
    async fn wheel(&self, delta_x: f64, delta_y: f64) -> Result<(), RpaError>;

    /// Capture the viewport as PNG bytes.
    async fn screenshot(&self) -> Result<Vec<u8>, RpaError>;

    /// Release every resource held by the engine.
    async fn close(&self) -> Result<(), RpaError>;
}
