//! Entry point of a session.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};

use majsoul_rpa_input::{InputDriver, TypingDelay};
use majsoul_rpa_protocols::{EventSource, GameEvent, RpaError};

use crate::context::Context;
use crate::presentation::Presentation;

/// One automated client session.
///
/// Owns the input driver and the event source. Presentations borrow both
/// through a shared context.
pub struct Rpa {
    ctx: Arc<Context>,
}

impl Rpa {
    pub fn new(driver: InputDriver, events: Box<dyn EventSource>) -> Self {
        Self::with_context(Context::new(driver, events))
    }

    /// Build a session from a customized context.
    pub fn with_context(ctx: Context) -> Self {
        Self { ctx: Arc::new(ctx) }
    }

    /// Wait for the first screen event and return the screen it shows.
    ///
    /// Events that cannot start a session (room or match progress seen
    /// before any screen) are skipped.
    pub async fn wait_for_presentation(&self, timeout: Duration) -> Result<Presentation, RpaError> {
        let deadline = Instant::now() + timeout;
        loop {
            let now = Instant::now();
            if now >= deadline {
                return Err(RpaError::timeout("initial presentation", timeout));
            }
            let Some(event) = self.ctx.events().next_event(deadline - now).await? else {
                continue;
            };
            if let GameEvent::HomeScreen {
                account_id: Some(id),
            } = &event
            {
                self.ctx.record_account_id(*id);
            }
            match Presentation::from_screen_event(&self.ctx, &event) {
                Some(presentation) => {
                    info!("Session starts on {}", presentation.name());
                    return Ok(presentation);
                }
                None => debug!("Skipping {} before the first screen", event.name()),
            }
        }
    }

    /// Account id seen at the last login, if any.
    pub fn account_id(&self) -> Option<u64> {
        self.ctx.account_id()
    }

    pub fn driver(&self) -> &InputDriver {
        self.ctx.driver()
    }

    pub fn typing_delay(&self) -> Option<TypingDelay> {
        self.ctx.typing()
    }

    /// Release the browser. Safe to call more than once.
    pub async fn close(&self) -> Result<(), RpaError> {
        self.ctx.driver().close().await
    }
}
