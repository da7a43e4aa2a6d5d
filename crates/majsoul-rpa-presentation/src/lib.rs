//! # majsoul-rpa presentation
//!
//! Typed state machine over the screens of the Mahjong Soul client.
//!
//! A [`Presentation`] is what the client currently shows. Actions on a
//! presentation send input through the [`InputDriver`](majsoul_rpa_input::InputDriver)
//! and then wait for the correlation layer to report the screen they lead
//! to. The new screen is published in the old one's successor slot:
//!
//! ```text
//! Login --login--> Auth --enter_auth_code--> Home --create_room--> RoomHost
//!                                             ^                  |   ^
//!                                             +------leave-------+   | match ended
//!                                                                start   |
//!                                                                    v   |
//!                                                                    Match --select_operation--> Match
//! ```
//!
//! Once a successor exists, the old presentation only answers reads; every
//! action fails with [`RpaError::Superseded`](majsoul_rpa_protocols::RpaError::Superseded).

mod auth;
mod context;
mod home;
pub mod layout;
mod login;
mod matches;
mod presentation;
mod room;
mod rpa;
mod selection;
mod successor;

#[cfg(test)]
mod test_support;

pub use auth::{AuthPresentation, AUTH_CODE_LEN};
pub use context::{Context, DEFAULT_STEP_PAUSE};
pub use home::HomePresentation;
pub use login::LoginPresentation;
pub use matches::MatchPresentation;
pub use presentation::Presentation;
pub use room::RoomHostPresentation;
pub use rpa::Rpa;
pub use successor::Successor;
