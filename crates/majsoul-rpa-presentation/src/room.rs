//! Friendly match room, as its host.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use majsoul_rpa_protocols::{GameEvent, MatchEvent, Player, RpaError};

use crate::context::Context;
use crate::home::HomePresentation;
use crate::layout;
use crate::matches::MatchPresentation;
use crate::presentation::{self, screen_common, Presentation, Screen};
use crate::successor::Successor;

/// A room we created and host.
pub struct RoomHostPresentation {
    ctx: Arc<Context>,
    successor: Successor,
    room_id: String,
    num_ais: u32,
    /// Seats announced by `MatchStarted`, kept until the first hand is dealt.
    players: Option<Vec<Player>>,
}

impl RoomHostPresentation {
    pub(crate) fn new(ctx: Arc<Context>, room_id: String, num_ais: u32) -> Self {
        Self {
            ctx,
            successor: Successor::default(),
            room_id,
            num_ais,
            players: None,
        }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn num_ais(&self) -> u32 {
        self.num_ais
    }

    /// Whether a match has been started and its seats are known.
    pub fn match_started(&self) -> bool {
        self.players.is_some()
    }

    /// Add one AI player and wait until the room shows it.
    ///
    /// Fails with [`RpaError::Superseded`] when the room is left before the
    /// AI shows up.
    pub async fn add_ai(&mut self, timeout: Duration) -> Result<(), RpaError> {
        presentation::ensure_active(self)?;
        if self.num_ais + 1 >= layout::ROOM_SEATS {
            return Err(RpaError::InvalidOperation(format!(
                "room {} is full ({} AIs)",
                self.room_id, self.num_ais
            )));
        }

        let before = self.num_ais;
        self.ctx.driver().click(layout::ADD_AI_BUTTON).await?;
        let updated = presentation::pump(self, timeout, |room| room.num_ais > before).await?;
        if !updated {
            if self.successor.is_set() {
                return Err(RpaError::Superseded(Self::NAME));
            }
            return Err(RpaError::timeout("AI to join the room", timeout));
        }
        debug!("Room {} now has {} AIs", self.room_id, self.num_ais);
        Ok(())
    }

    /// Start the match and wait for the first hand.
    pub async fn start(&mut self, timeout: Duration) -> Result<(), RpaError> {
        presentation::ensure_active(self)?;
        self.ctx.driver().click(layout::START_BUTTON).await?;
        presentation::await_successor(self, timeout, MatchPresentation::NAME).await
    }

    /// Leave the room and wait for the lobby.
    pub async fn leave(&mut self, timeout: Duration) -> Result<(), RpaError> {
        presentation::ensure_active(self)?;
        self.ctx.driver().click(layout::LEAVE_BUTTON).await?;
        presentation::await_successor(self, timeout, HomePresentation::NAME).await
    }
}

screen_common!(RoomHostPresentation);

impl Screen for RoomHostPresentation {
    const NAME: &'static str = "room_host";

    fn ctx(&self) -> &Arc<Context> {
        &self.ctx
    }

    fn successor(&self) -> &Successor {
        &self.successor
    }

    fn absorb(&mut self, event: GameEvent) -> Option<Presentation> {
        match event {
            GameEvent::RoomUpdated { num_ais } => {
                self.num_ais = num_ais;
                None
            }
            GameEvent::MatchStarted { players } => {
                self.players = Some(players);
                None
            }
            GameEvent::Match(round @ MatchEvent::NewRound { .. }) => {
                let players = self.players.take().unwrap_or_default();
                MatchPresentation::from_new_round(
                    self.ctx.clone(),
                    self.room_id.clone(),
                    players,
                    round,
                )
                .map(Presentation::Match)
            }
            GameEvent::HomeScreen { .. } => {
                Some(Presentation::Home(HomePresentation::new(self.ctx.clone())))
            }
            _ => None,
        }
    }
}

impl fmt::Debug for RoomHostPresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoomHostPresentation")
            .field("room_id", &self.room_id)
            .field("num_ais", &self.num_ais)
            .field("superseded", &self.successor.is_set())
            .finish()
    }
}
