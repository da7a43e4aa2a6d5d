//! Chrome DevTools Protocol backend for the game input driver.
//!
//! [`CdpEngine`] opens the game in a Chrome tab whose traffic is routed
//! through the local intercepting proxy, and implements
//! [`majsoul_rpa_protocols::BrowserEngine`] on top of CDP input dispatch.

pub mod cdp;
mod engine;
pub mod launcher;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use engine::CdpEngine;
pub use launcher::{find_chrome, LaunchOptions};
