//! Input synthesis for the game client.
//!
//! Every synthetic click, keystroke and wheel event goes through
//! [`InputDriver`], which validates the request, humanizes it with
//! [`Sampler`] and only then hands it to the browser engine.
//!
//! ## Coordinates
//!
//! Regions are given in logical coordinates (1920x1080 reference). The driver
//! is the single place where the zoom ratio is applied.

mod driver;
mod sampler;
pub mod window;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use driver::{InputDriver, InputSettings, TypingDelay};
pub use sampler::{Sampler, DEFAULT_EDGE_BIAS, DEFAULT_MAX_ATTEMPTS, SCROLL_DELTA_PER_CLICK};
pub use window::{SystemWindows, WindowEnumerator, WindowInfo, TITLE_MAJSOUL};
