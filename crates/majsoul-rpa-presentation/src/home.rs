//! Lobby.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use majsoul_rpa_protocols::{GameEvent, RpaError};

use crate::context::Context;
use crate::layout;
use crate::presentation::{self, screen_common, Presentation, Screen};
use crate::room::RoomHostPresentation;
use crate::successor::Successor;

/// The lobby shown after logging in.
pub struct HomePresentation {
    ctx: Arc<Context>,
    successor: Successor,
}

impl HomePresentation {
    pub(crate) fn new(ctx: Arc<Context>) -> Self {
        Self {
            ctx,
            successor: Successor::default(),
        }
    }

    /// Open the friendly match menu, create a room and wait for it.
    ///
    /// The new room has no AI players.
    pub async fn create_room(&mut self, timeout: Duration) -> Result<(), RpaError> {
        presentation::ensure_active(self)?;
        let driver = self.ctx.driver();
        driver.click(layout::FRIENDLY_MATCH_BUTTON).await?;
        self.ctx.step_pause().await;
        driver.click(layout::CREATE_ROOM_BUTTON).await?;
        self.ctx.step_pause().await;
        driver.click(layout::CREATE_ROOM_CONFIRM).await?;
        presentation::await_successor(self, timeout, RoomHostPresentation::NAME).await
    }
}

screen_common!(HomePresentation);

impl Screen for HomePresentation {
    const NAME: &'static str = "home";

    fn ctx(&self) -> &Arc<Context> {
        &self.ctx
    }

    fn successor(&self) -> &Successor {
        &self.successor
    }

    fn absorb(&mut self, event: GameEvent) -> Option<Presentation> {
        match event {
            GameEvent::RoomCreated { room_id } => Some(Presentation::RoomHost(
                RoomHostPresentation::new(self.ctx.clone(), room_id, 0),
            )),
            _ => None,
        }
    }
}

impl fmt::Debug for HomePresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HomePresentation")
            .field("account_id", &self.ctx.account_id())
            .field("superseded", &self.successor.is_set())
            .finish()
    }
}
