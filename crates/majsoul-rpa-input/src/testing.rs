//! Test doubles for the browser engine and the window list.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use majsoul_rpa_protocols::{BrowserEngine, RpaError};

use crate::window::{WindowEnumerator, WindowInfo};

/// One call received by [`RecordingEngine`].
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Navigate(String),
    Reload,
    TypeText(String),
    PressKey(String),
    PressKeyCombo(String),
    Click(f64, f64),
    Wheel(f64, f64),
    Screenshot,
    Close,
}

/// Shared view on the calls recorded by a [`RecordingEngine`].
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<EngineCall>>>,
}

impl CallLog {
    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().clone()
    }

    pub fn clicks(&self) -> Vec<(f64, f64)> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                EngineCall::Click(x, y) => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    pub fn wheels(&self) -> Vec<(f64, f64)> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                EngineCall::Wheel(x, y) => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    pub fn typed(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                EngineCall::TypeText(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    fn push(&self, call: EngineCall) {
        self.calls.lock().push(call);
    }
}

/// Browser engine that records every call and succeeds.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    log: CallLog,
}

impl RecordingEngine {
    pub fn new() -> (Self, CallLog) {
        let log = CallLog::default();
        (Self { log: log.clone() }, log)
    }
}

/// A minimal valid PNG signature returned as the screenshot.
pub const FAKE_PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

#[async_trait]
impl BrowserEngine for RecordingEngine {
    async fn navigate(&self, url: &str) -> Result<(), RpaError> {
        self.log.push(EngineCall::Navigate(url.to_string()));
        Ok(())
    }

    async fn reload(&self) -> Result<(), RpaError> {
        self.log.push(EngineCall::Reload);
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<(), RpaError> {
        self.log.push(EngineCall::TypeText(text.to_string()));
        Ok(())
    }

    async fn press_key(&self, key: &str) -> Result<(), RpaError> {
        self.log.push(EngineCall::PressKey(key.to_string()));
        Ok(())
    }

    async fn press_key_combo(&self, combo: &str) -> Result<(), RpaError> {
        self.log.push(EngineCall::PressKeyCombo(combo.to_string()));
        Ok(())
    }

    async fn click(&self, x: f64, y: f64) -> Result<(), RpaError> {
        self.log.push(EngineCall::Click(x, y));
        Ok(())
    }

    async fn wheel(&self, delta_x: f64, delta_y: f64) -> Result<(), RpaError> {
        self.log.push(EngineCall::Wheel(delta_x, delta_y));
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, RpaError> {
        self.log.push(EngineCall::Screenshot);
        Ok(FAKE_PNG.to_vec())
    }

    async fn close(&self) -> Result<(), RpaError> {
        self.log.push(EngineCall::Close);
        Ok(())
    }
}

/// Window list with fixed titles.
#[derive(Debug, Clone)]
pub struct StaticWindows {
    pub supported: bool,
    pub titles: Vec<String>,
}

impl StaticWindows {
    pub fn with_titles(titles: &[&str]) -> Self {
        Self {
            supported: true,
            titles: titles.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn unsupported() -> Self {
        Self {
            supported: false,
            titles: Vec::new(),
        }
    }
}

impl WindowEnumerator for StaticWindows {
    fn supported(&self) -> bool {
        self.supported
    }

    fn list_windows(&self) -> Result<Vec<WindowInfo>, RpaError> {
        Ok(self
            .titles
            .iter()
            .enumerate()
            .map(|(i, title)| WindowInfo {
                id: i as u64,
                title: title.clone(),
                pid: 1000 + i as u32,
            })
            .collect())
    }
}
