//! WebSocket subscriber task.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, trace, warn};

use majsoul_rpa_protocols::{ChannelEventSource, EventSender, GameEvent};

use crate::error::FeedError;

/// Where the interception proxy publishes events by default.
pub const DEFAULT_FEED_URL: &str = "ws://localhost:8765/events";

/// Decode one text frame.
///
/// A frame holds either one event object or an array of events. Blank
/// frames are keep-alives.
pub fn decode_frame(text: &str) -> Result<Vec<GameEvent>, FeedError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    if text.starts_with('[') {
        Ok(serde_json::from_str(text)?)
    } else {
        Ok(vec![serde_json::from_str(text)?])
    }
}

/// Running subscription. Dropping it stops the forwarding task.
pub struct WebSocketFeed {
    url: String,
    task: JoinHandle<()>,
}

impl WebSocketFeed {
    /// Connect to `url` and start forwarding.
    ///
    /// Returns the feed handle and the event source the state machine
    /// reads from. Once the connection ends the source reports
    /// `RpaError::EventSource` on its next poll.
    pub async fn connect(
        url: &str,
        connect_timeout: Duration,
    ) -> Result<(Self, ChannelEventSource), FeedError> {
        let parsed = url::Url::parse(url).map_err(|e| FeedError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "ws" | "wss") {
            return Err(FeedError::InvalidUrl(format!(
                "expected ws:// or wss://, got {}",
                parsed.scheme()
            )));
        }

        let (ws_stream, _) =
            match tokio::time::timeout(connect_timeout, tokio_tungstenite::connect_async(url))
                .await
            {
                Ok(Ok(connected)) => connected,
                Ok(Err(e)) => {
                    return Err(FeedError::ConnectFailed {
                        url: url.to_string(),
                        message: e.to_string(),
                    })
                }
                Err(_) => {
                    return Err(FeedError::ConnectTimeout {
                        url: url.to_string(),
                        timeout: connect_timeout,
                    })
                }
            };
        info!("Subscribed to event feed at {}", url);

        let (source, sender) = ChannelEventSource::new();
        let task = tokio::spawn(forward(ws_stream, sender));

        Ok((
            Self {
                url: url.to_string(),
                task,
            },
            source,
        ))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether the connection has ended.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for WebSocketFeed {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn forward<S>(ws_stream: tokio_tungstenite::WebSocketStream<S>, sender: EventSender)
where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
{
    let (mut sink, mut source) = ws_stream.split();

    while let Some(msg) = source.next().await {
        let text = match msg {
            Ok(Message::Text(text)) => text.as_str().to_owned(),
            Ok(Message::Binary(bytes)) => String::from_utf8_lossy(&bytes).into_owned(),
            Ok(Message::Ping(payload)) => {
                if let Err(e) = sink.send(Message::Pong(payload)).await {
                    warn!("Failed to answer feed ping: {}", e);
                }
                continue;
            }
            Ok(Message::Close(frame)) => {
                info!("Event feed closed by peer: {:?}", frame);
                break;
            }
            Ok(_) => continue,
            Err(e) => {
                warn!("Event feed error: {}", e);
                break;
            }
        };

        let events = match decode_frame(&text) {
            Ok(events) => events,
            Err(e) => {
                warn!("Skipping frame: {}", e);
                continue;
            }
        };

        for event in events {
            trace!("Feed event: {}", event.name());
            if sender.send(event).is_err() {
                debug!("Event consumer dropped, stopping feed");
                return;
            }
        }
    }
}

#[cfg(test)]
#[path = "feed_tests.rs"]
mod tests;
