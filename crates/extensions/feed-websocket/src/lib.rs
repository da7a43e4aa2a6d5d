//! Game event feed over WebSocket.
//!
//! The interception proxy that sits between the browser and the game
//! servers decodes the game protocol and publishes decoded
//! [`GameEvent`](majsoul_rpa_protocols::GameEvent)s as JSON text frames.
//! [`WebSocketFeed`] subscribes to that stream and forwards the events into
//! a [`ChannelEventSource`](majsoul_rpa_protocols::ChannelEventSource).

mod error;
mod feed;

pub use error::FeedError;
pub use feed::{decode_frame, WebSocketFeed, DEFAULT_FEED_URL};
