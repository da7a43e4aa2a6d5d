//! Error taxonomy shared by the whole workspace.

use std::time::Duration;

use thiserror::Error;

/// Errors raised by the input driver and the presentation state machine.
///
/// Validation errors (`InvalidParameter`, `InvalidRegion`, `InvalidOperation`)
/// are always raised before anything is sent to the browser.
#[derive(Debug, Error)]
pub enum RpaError {
    /// Bad geometry, bad sampler parameter or bad viewport.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A click was requested into an area that cannot be clicked.
    #[error("Invalid region: left={left}, top={top}, width={width}, height={height}")]
    InvalidRegion {
        left: i32,
        top: i32,
        width: i32,
        height: i32,
    },

    /// The operation is not on offer, or its parameters do not fit it.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// An awaited successor did not arrive in time.
    #[error("Timed out after {timeout:?} waiting for {waiting_for}")]
    TransitionTimeout {
        waiting_for: String,
        timeout: Duration,
    },

    /// The flow delivered a presentation the caller did not anticipate.
    #[error("Unexpected presentation: expected {expected}, got {actual}")]
    UnexpectedVariant {
        expected: &'static str,
        actual: &'static str,
    },

    /// The driver was used after `close()`.
    #[error("Input driver is closed")]
    DriverClosed,

    /// The platform lacks a required capability.
    #[error("Not supported on this platform: {0}")]
    NotSupported(String),

    /// Zero or several target windows were found.
    #[error("Expected exactly one Mahjong Soul window, found {0}")]
    SingletonViolation(usize),

    /// A mutating action was invoked on a presentation that already has a successor.
    #[error("Presentation `{0}` has already been superseded")]
    Superseded(&'static str),

    /// The browser-control engine failed.
    #[error("Browser error: {0}")]
    Browser(String),

    /// The event source failed or was disconnected.
    #[error("Event source error: {0}")]
    EventSource(String),
}

impl RpaError {
    /// Whether the error means the remote flow diverged from the model and the run must stop.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RpaError::UnexpectedVariant { .. } | RpaError::SingletonViolation(_)
        )
    }

    /// Whether the error was raised by validation, before any input was sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RpaError::InvalidParameter(_)
                | RpaError::InvalidRegion { .. }
                | RpaError::InvalidOperation(_)
        )
    }

    /// Shorthand for [`RpaError::TransitionTimeout`].
    pub fn timeout(waiting_for: impl Into<String>, timeout: Duration) -> Self {
        RpaError::TransitionTimeout {
            waiting_for: waiting_for.into(),
            timeout,
        }
    }
}
