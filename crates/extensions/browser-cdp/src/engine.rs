//! [`BrowserEngine`] implementation backed by a CDP page session.

use async_trait::async_trait;
use base64::Engine as _;
use parking_lot::Mutex;
use tokio::process::Child;
use tracing::{debug, info, warn};

use majsoul_rpa_protocols::{BrowserEngine, RpaError, ViewportConfig};

use crate::cdp::{CdpClient, DeviceMetrics, PageSession, ScreenshotFormat};
use crate::launcher::{self, LaunchOptions};

/// A Chrome tab showing the game, driven over CDP.
pub struct CdpEngine {
    client: CdpClient,
    page: PageSession,
    /// Set when this engine spawned the browser itself.
    chrome: tokio::sync::Mutex<Option<Child>>,
    /// Last pointer position; wheel events are dispatched there.
    pointer: Mutex<(f64, f64)>,
}

impl CdpEngine {
    /// Attach to (or launch) Chrome, open a tab at `url` and pin its viewport.
    pub async fn launch(
        options: &LaunchOptions,
        viewport: ViewportConfig,
        url: &str,
    ) -> Result<Self, RpaError> {
        let mut chrome = None;
        if launcher::is_chrome_running(options).await {
            info!("Chrome already running on port {}", options.debug_port);
        } else {
            info!("Chrome not running on port {}, launching...", options.debug_port);
            chrome = Some(launcher::launch_chrome(options)?);
            launcher::wait_until_ready(options).await?;
        }

        let client = CdpClient::connect(&options.endpoint()).await?;
        let page = client.new_page(None).await?;
        page.set_device_metrics(DeviceMetrics::desktop(viewport.width(), viewport.height()))
            .await?;
        page.navigate(url).await?;
        info!("Opened {} in target {}", url, page.target_id());

        let center = (
            f64::from(viewport.width()) / 2.0,
            f64::from(viewport.height()) / 2.0,
        );
        Ok(Self {
            client,
            page,
            chrome: tokio::sync::Mutex::new(chrome),
            pointer: Mutex::new(center),
        })
    }

    /// The underlying page session.
    pub fn page(&self) -> &PageSession {
        &self.page
    }
}

#[async_trait]
impl BrowserEngine for CdpEngine {
    async fn navigate(&self, url: &str) -> Result<(), RpaError> {
        self.page.navigate(url).await?;
        Ok(())
    }

    async fn reload(&self) -> Result<(), RpaError> {
        Ok(self.page.reload().await?)
    }

    async fn type_text(&self, text: &str) -> Result<(), RpaError> {
        Ok(self.page.type_text(text).await?)
    }

    async fn press_key(&self, key: &str) -> Result<(), RpaError> {
        Ok(self.page.press_key(key).await?)
    }

    async fn press_key_combo(&self, combo: &str) -> Result<(), RpaError> {
        Ok(self.page.press_key_combo(combo).await?)
    }

    async fn click(&self, x: f64, y: f64) -> Result<(), RpaError> {
        self.page.click(x, y).await?;
        *self.pointer.lock() = (x, y);
        Ok(())
    }

    async fn wheel(&self, delta_x: f64, delta_y: f64) -> Result<(), RpaError> {
        let (x, y) = *self.pointer.lock();
        Ok(self.page.scroll(x, y, delta_x, delta_y).await?)
    }

    async fn screenshot(&self) -> Result<Vec<u8>, RpaError> {
        let data = self.page.screenshot(ScreenshotFormat::Png).await?;
        base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|e| RpaError::Browser(format!("Invalid screenshot data: {}", e)))
    }

    async fn close(&self) -> Result<(), RpaError> {
        if let Err(e) = self.client.close_page(self.page.target_id()).await {
            warn!("Failed to close page: {}", e);
        }

        let Some(mut child) = self.chrome.lock().await.take() else {
            debug!("Browser not owned by this engine; leaving it running");
            return Ok(());
        };

        info!("Shutting down Chrome...");
        if let Err(e) = self.client.close_browser().await {
            debug!("Browser.close failed: {}", e);
        }
        if let Err(e) = child.kill().await {
            debug!("Chrome already exited: {}", e);
        }
        Ok(())
    }
}
