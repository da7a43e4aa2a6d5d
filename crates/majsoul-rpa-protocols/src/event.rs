//! Correlation layer interface.
//!
//! The correlation layer observes the remote protocol traffic and turns it
//! into typed [`GameEvent`]s. Decoding the wire format is its business; this
//! module only fixes the shape of the decoded events and the polling
//! primitive the state machine uses to receive them.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, Mutex};
use tracing::trace;

use crate::error::RpaError;
use crate::operation::Operation;

/// Identity record of a seated player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub account_id: u64,
    pub nickname: String,
    /// Rank label, e.g. `"雀傑2"`.
    pub level: String,
    /// Character (avatar) id.
    pub character: u32,
}

/// Screen-level events observed from the remote application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum GameEvent {
    /// The title screen with the login button is shown.
    LoginScreen,
    /// The e-mail / verification code dialog is shown.
    AuthScreen,
    /// The lobby is shown. `account_id` is present right after a login.
    HomeScreen {
        #[serde(default)]
        account_id: Option<u64>,
    },
    /// A friendly room was created by us.
    RoomCreated { room_id: String },
    /// The room roster changed.
    RoomUpdated { num_ais: u32 },
    /// A match was authenticated; seats are known but no hand is dealt yet.
    MatchStarted { players: Vec<Player> },
    /// In-match progress.
    Match(MatchEvent),
    /// The final result screen was dismissed and the room is shown again.
    MatchEnded {
        #[serde(default)]
        scores: Vec<i32>,
    },
}

impl GameEvent {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::LoginScreen => "login_screen",
            GameEvent::AuthScreen => "auth_screen",
            GameEvent::HomeScreen { .. } => "home_screen",
            GameEvent::RoomCreated { .. } => "room_created",
            GameEvent::RoomUpdated { .. } => "room_updated",
            GameEvent::MatchStarted { .. } => "match_started",
            GameEvent::Match(event) => event.name(),
            GameEvent::MatchEnded { .. } => "match_ended",
        }
    }
}

/// Events of a running match.
///
/// `operations` is the decision offered to us together with the event, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchEvent {
    /// A hand was dealt.
    NewRound {
        chang: u8,
        ju: u8,
        ben: u32,
        liqibang: u32,
        scores: Vec<i32>,
        dora_indicators: Vec<String>,
        shoupai: Vec<String>,
        #[serde(default)]
        zimopai: Option<String>,
        #[serde(default)]
        operations: Option<Vec<Operation>>,
    },
    /// A seat drew a tile. `tile` is only revealed for our own draws.
    Draw {
        seat: u8,
        #[serde(default)]
        tile: Option<String>,
        #[serde(default)]
        operations: Option<Vec<Operation>>,
    },
    /// A seat discarded a tile.
    Discard {
        seat: u8,
        tile: String,
        #[serde(default)]
        moqie: bool,
        #[serde(default)]
        operations: Option<Vec<Operation>>,
    },
    /// A seat called a meld. `consumed` lists the tiles that left that seat's hand.
    Meld {
        seat: u8,
        consumed: Vec<String>,
        #[serde(default)]
        operations: Option<Vec<Operation>>,
    },
    /// A new dora indicator was revealed.
    NewDora { indicator: String },
    /// A riichi declaration was accepted and its stick placed.
    LiqiAccepted {
        seat: u8,
        scores: Vec<i32>,
        liqibang: u32,
    },
    /// The hand finished (win or draw).
    HandEnd { scores: Vec<i32> },
}

impl MatchEvent {
    pub fn name(&self) -> &'static str {
        match self {
            MatchEvent::NewRound { .. } => "new_round",
            MatchEvent::Draw { .. } => "draw",
            MatchEvent::Discard { .. } => "discard",
            MatchEvent::Meld { .. } => "meld",
            MatchEvent::NewDora { .. } => "new_dora",
            MatchEvent::LiqiAccepted { .. } => "liqi_accepted",
            MatchEvent::HandEnd { .. } => "hand_end",
        }
    }
}

/// Blocking "next event within timeout" primitive exposed by the correlation layer.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Wait up to `timeout` for the next event. `Ok(None)` means the timeout elapsed.
    async fn next_event(&self, timeout: Duration) -> Result<Option<GameEvent>, RpaError>;
}

/// Producer half of a [`ChannelEventSource`].
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<GameEvent>,
}

impl EventSender {
    /// Deposit one decoded event.
    pub fn send(&self, event: GameEvent) -> Result<(), RpaError> {
        self.tx
            .send(event)
            .map_err(|_| RpaError::EventSource("event consumer dropped".to_string()))
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// In-process event source fed through an unbounded channel.
///
/// The channel is the publication barrier between the producer task and the
/// control task: an event is fully constructed before it can be received.
pub struct ChannelEventSource {
    rx: Mutex<mpsc::UnboundedReceiver<GameEvent>>,
}

impl ChannelEventSource {
    pub fn new() -> (Self, EventSender) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self { rx: Mutex::new(rx) },
            EventSender { tx },
        )
    }
}

#[async_trait]
impl EventSource for ChannelEventSource {
    async fn next_event(&self, timeout: Duration) -> Result<Option<GameEvent>, RpaError> {
        let mut rx = self.rx.lock().await;
        match tokio::time::timeout(timeout, rx.recv()).await {
            Ok(Some(event)) => {
                trace!("Event received: {}", event.name());
                Ok(Some(event))
            }
            Ok(None) => Err(RpaError::EventSource(
                "all event producers disconnected".to_string(),
            )),
            Err(_) => Ok(None),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
