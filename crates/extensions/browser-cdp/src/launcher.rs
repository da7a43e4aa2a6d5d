//! Chrome discovery and launch.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::cdp::{CdpClient, CdpError};

/// How to start the browser that hosts the game.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Explicit Chrome binary; searched for when `None`.
    pub chrome_path: Option<PathBuf>,
    /// Remote debugging port.
    pub debug_port: u16,
    /// Local port of the intercepting proxy the game traffic goes through.
    pub proxy_port: u16,
    /// Screen position of the window's top-left corner.
    pub window_left: i32,
    pub window_top: i32,
    /// Viewport size in device pixels.
    pub width: u32,
    pub height: u32,
    pub headless: bool,
    /// Profile directory; defaults to `~/.majsoul-rpa/browser-profile`.
    pub profile_dir: Option<PathBuf>,
    /// How long to wait for the debugging endpoint after spawning.
    pub startup_timeout: Duration,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            chrome_path: None,
            debug_port: 9222,
            proxy_port: 8080,
            window_left: 0,
            window_top: 0,
            width: 1920,
            height: 1080,
            headless: false,
            profile_dir: None,
            startup_timeout: Duration::from_secs(6),
        }
    }
}

impl LaunchOptions {
    /// HTTP debugging endpoint.
    pub fn endpoint(&self) -> String {
        format!("http://localhost:{}", self.debug_port)
    }

    /// Get the profile directory, falling back to the default.
    pub fn get_profile_dir(&self) -> PathBuf {
        self.profile_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".majsoul-rpa")
                .join("browser-profile")
        })
    }

    /// Command-line arguments passed to Chrome.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            format!("--remote-debugging-port={}", self.debug_port),
            format!("--user-data-dir={}", self.get_profile_dir().display()),
            format!("--proxy-server=http://localhost:{}", self.proxy_port),
            // The proxy presents its own certificate for the game's hosts.
            "--ignore-certificate-errors".to_string(),
            format!("--window-position={},{}", self.window_left, self.window_top),
            format!("--window-size={},{}", self.width, self.height),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            "--disable-background-networking".to_string(),
            "--disable-sync".to_string(),
            "--disable-translate".to_string(),
            "--metrics-recording-only".to_string(),
            "--autoplay-policy=no-user-gesture-required".to_string(),
        ];
        if self.headless {
            args.push("--headless=new".to_string());
        }
        args
    }
}

/// Find Chrome executable path.
pub fn find_chrome() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    let paths: &[&str] = &[
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        "/Applications/Chromium.app/Contents/MacOS/Chromium",
        "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
    ];

    #[cfg(target_os = "linux")]
    let paths: &[&str] = &[
        "/usr/bin/google-chrome",
        "/usr/bin/google-chrome-stable",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
        "/snap/bin/chromium",
    ];

    #[cfg(target_os = "windows")]
    let paths: &[&str] = &[
        r"C:\Program Files\Google\Chrome\Application\chrome.exe",
        r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
    ];

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    let paths: &[&str] = &[];

    paths.iter().map(PathBuf::from).find(|p| p.exists())
}

/// Whether a browser already answers on the debugging endpoint.
pub async fn is_chrome_running(options: &LaunchOptions) -> bool {
    CdpClient::version(&options.endpoint()).await.is_ok()
}

/// Spawn Chrome with remote debugging enabled.
pub fn launch_chrome(options: &LaunchOptions) -> Result<Child, CdpError> {
    let chrome_path = match &options.chrome_path {
        Some(path) => path.clone(),
        None => find_chrome().ok_or(CdpError::ChromeNotFound)?,
    };
    let profile_dir = options.get_profile_dir();

    if let Err(e) = std::fs::create_dir_all(&profile_dir) {
        warn!("Failed to create profile directory: {}", e);
    }

    info!(
        "Launching {} with profile at {} through proxy port {}",
        chrome_path.display(),
        profile_dir.display(),
        options.proxy_port
    );

    let child = Command::new(&chrome_path)
        .args(options.args())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| CdpError::LaunchFailed(e.to_string()))?;

    info!("Chrome launched with PID: {:?}", child.id());
    Ok(child)
}

/// Poll the debugging endpoint until it answers or the startup timeout passes.
pub async fn wait_until_ready(options: &LaunchOptions) -> Result<(), CdpError> {
    const POLL: Duration = Duration::from_millis(200);

    let deadline = tokio::time::Instant::now() + options.startup_timeout;
    loop {
        if is_chrome_running(options).await {
            debug!("Debugging endpoint {} is up", options.endpoint());
            return Ok(());
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(CdpError::LaunchFailed(
                "Chrome failed to start within timeout".to_string(),
            ));
        }
        tokio::time::sleep(POLL).await;
    }
}

#[cfg(test)]
#[path = "launcher_tests.rs"]
mod tests;
