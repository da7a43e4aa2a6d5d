//! # majsoul-rpa protocols
//!
//! Shared vocabulary of the workspace. Contains value types and the interfaces
//! of the two external collaborators; no browser or network code lives here.
//!
//! - [`geometry`] - logical regions and viewport validation
//! - [`engine`] - [`BrowserEngine`], the browser-control surface
//! - [`event`] - [`GameEvent`] and [`EventSource`], the correlation surface
//! - [`operation`] - [`Operation`], the decision options of a match
//! - [`tile`] - tile label helpers
//! - [`error`] - [`RpaError`], the error taxonomy shared by every crate

pub mod engine;
pub mod error;
pub mod event;
pub mod geometry;
pub mod operation;
pub mod tile;

pub use engine::BrowserEngine;
pub use error::RpaError;
pub use event::{ChannelEventSource, EventSender, EventSource, GameEvent, MatchEvent, Player};
pub use geometry::{Region, ViewportConfig};
pub use operation::Operation;
