//! Top-level window enumeration.
//!
//! Only used for the singleton check: exactly one game window must exist
//! while the driver runs. Platforms without an enumeration backend say so
//! through [`WindowEnumerator::supported`] instead of failing at call time.

use serde::{Deserialize, Serialize};

use majsoul_rpa_protocols::RpaError;

/// Title prefix of the game page.
pub const TITLE_MAJSOUL: &str = "雀魂 -じゃんたま-| 麻雀を無料で気軽に";

/// A top-level window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowInfo {
    /// Window ID (platform-specific).
    pub id: u64,
    pub title: String,
    pub pid: u32,
}

/// Capability interface over the platform window list.
pub trait WindowEnumerator: Send + Sync {
    /// Whether this platform can enumerate windows at all.
    fn supported(&self) -> bool;

    /// List all top-level windows.
    fn list_windows(&self) -> Result<Vec<WindowInfo>, RpaError>;
}

/// Enumerates windows of the running desktop session.
///
/// Supported on Windows (through PowerShell), Linux (through `wmctrl`) and
/// macOS (through AppleScript).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemWindows;

impl WindowEnumerator for SystemWindows {
    fn supported(&self) -> bool {
        cfg!(any(target_os = "windows", target_os = "linux", target_os = "macos"))
    }

    #[cfg(target_os = "windows")]
    fn list_windows(&self) -> Result<Vec<WindowInfo>, RpaError> {
        use std::process::Command;

        // Main windows only; the game runs in its own app window.
        let script = concat!(
            "[Console]::OutputEncoding = [System.Text.Encoding]::UTF8; ",
            "Get-Process | Where-Object { $_.MainWindowTitle } | ForEach-Object { ",
            "\"{0}`t{1}`t{2}\" -f $_.Id, $_.MainWindowHandle, $_.MainWindowTitle }",
        );

        let output = Command::new("powershell")
            .args(["-NoProfile", "-NonInteractive", "-Command", script])
            .output()
            .map_err(|e| RpaError::NotSupported(format!("powershell unavailable: {e}")))?;

        if !output.status.success() {
            return Err(RpaError::NotSupported(
                String::from_utf8_lossy(&output.stderr).to_string(),
            ));
        }

        Ok(parse_powershell(&String::from_utf8_lossy(&output.stdout)))
    }

    #[cfg(target_os = "linux")]
    fn list_windows(&self) -> Result<Vec<WindowInfo>, RpaError> {
        use std::process::Command;

        let output = Command::new("wmctrl")
            .arg("-l")
            .arg("-p")
            .output()
            .map_err(|e| RpaError::NotSupported(format!("wmctrl unavailable: {e}")))?;

        if !output.status.success() {
            return Err(RpaError::NotSupported(
                String::from_utf8_lossy(&output.stderr).to_string(),
            ));
        }

        Ok(parse_wmctrl(&String::from_utf8_lossy(&output.stdout)))
    }

    #[cfg(target_os = "macos")]
    fn list_windows(&self) -> Result<Vec<WindowInfo>, RpaError> {
        use std::process::Command;

        let script = r#"
            set output to ""
            tell application "System Events"
                repeat with proc in (processes whose visible is true)
                    set procId to unix id of proc
                    try
                        repeat with win in windows of proc
                            set output to output & procId & tab & (name of win) & linefeed
                        end repeat
                    end try
                end repeat
            end tell
            return output
        "#;

        let output = Command::new("osascript")
            .arg("-e")
            .arg(script)
            .output()
            .map_err(|e| RpaError::NotSupported(format!("osascript unavailable: {e}")))?;

        if !output.status.success() {
            return Err(RpaError::NotSupported(
                String::from_utf8_lossy(&output.stderr).to_string(),
            ));
        }

        Ok(parse_applescript(&String::from_utf8_lossy(&output.stdout)))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    fn list_windows(&self) -> Result<Vec<WindowInfo>, RpaError> {
        Err(RpaError::NotSupported(std::env::consts::OS.to_string()))
    }
}

/// Parse `wmctrl -l -p` output.
///
/// Line format: `0x02c00004  0 12345  hostname Window Title`.
pub fn parse_wmctrl(output: &str) -> Vec<WindowInfo> {
    output
        .lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            // A title needs at least one field after the host name.
            if parts.len() < 5 {
                return None;
            }
            let id = u64::from_str_radix(parts[0].trim_start_matches("0x"), 16).unwrap_or(0);
            let pid = parts[2].parse().unwrap_or(0);
            Some(WindowInfo {
                id,
                title: parts[4..].join(" "),
                pid,
            })
        })
        .collect()
}

/// Parse the tab-separated `pid<TAB>title` lines produced by the AppleScript above.
pub fn parse_applescript(output: &str) -> Vec<WindowInfo> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(i, line)| {
            let (pid, title) = line.split_once('\t').unwrap_or(("0", line));
            WindowInfo {
                id: i as u64 + 1,
                title: title.trim().to_string(),
                pid: pid.trim().parse().unwrap_or(0),
            }
        })
        .collect()
}

/// Parse the tab-separated `pid<TAB>handle<TAB>title` lines of the PowerShell query.
pub fn parse_powershell(output: &str) -> Vec<WindowInfo> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.splitn(3, '\t');
            let pid = fields.next()?.trim().parse().ok()?;
            let id = fields.next()?.trim().parse().unwrap_or(0);
            let title = fields.next()?.trim();
            if title.is_empty() {
                return None;
            }
            Some(WindowInfo {
                id,
                title: title.to_string(),
                pid,
            })
        })
        .collect()
}

/// Return the single window whose title starts with [`TITLE_MAJSOUL`].
pub fn find_singleton(enumerator: &dyn WindowEnumerator) -> Result<WindowInfo, RpaError> {
    if !enumerator.supported() {
        return Err(RpaError::NotSupported(format!(
            "window enumeration on {}",
            std::env::consts::OS
        )));
    }

    let mut matching: Vec<WindowInfo> = enumerator
        .list_windows()?
        .into_iter()
        .filter(|w| w.title.starts_with(TITLE_MAJSOUL))
        .collect();

    match matching.len() {
        1 => Ok(matching.remove(0)),
        n => Err(RpaError::SingletonViolation(n)),
    }
}

#[cfg(test)]
#[path = "window_tests.rs"]
mod tests;
