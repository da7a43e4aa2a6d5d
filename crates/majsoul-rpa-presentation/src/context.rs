//! State shared by every presentation of one session.

use std::time::Duration;

use parking_lot::Mutex;

use majsoul_rpa_input::{InputDriver, TypingDelay};
use majsoul_rpa_protocols::EventSource;

/// Pause between the clicks of a multi-step action, e.g. a button and the
/// tile it applies to.
pub const DEFAULT_STEP_PAUSE: Duration = Duration::from_millis(300);

/// The driver, the event source and what has been learned about the account.
pub struct Context {
    driver: InputDriver,
    events: Box<dyn EventSource>,
    account_id: Mutex<Option<u64>>,
    typing: Option<TypingDelay>,
    step_pause: Duration,
}

impl Context {
    pub fn new(driver: InputDriver, events: Box<dyn EventSource>) -> Self {
        Self {
            driver,
            events,
            account_id: Mutex::new(None),
            typing: None,
            step_pause: DEFAULT_STEP_PAUSE,
        }
    }

    /// Delay used when typing the e-mail address and the auth code.
    pub fn with_typing_delay(mut self, typing: Option<TypingDelay>) -> Self {
        self.typing = typing;
        self
    }

    pub fn with_step_pause(mut self, pause: Duration) -> Self {
        self.step_pause = pause;
        self
    }

    pub fn driver(&self) -> &InputDriver {
        &self.driver
    }

    pub(crate) fn events(&self) -> &dyn EventSource {
        self.events.as_ref()
    }

    pub fn account_id(&self) -> Option<u64> {
        *self.account_id.lock()
    }

    pub(crate) fn record_account_id(&self, id: u64) {
        let mut current = self.account_id.lock();
        if *current != Some(id) {
            tracing::info!("Logged in as account {}", id);
            *current = Some(id);
        }
    }

    pub(crate) fn typing(&self) -> Option<TypingDelay> {
        self.typing
    }

    pub(crate) async fn step_pause(&self) {
        if !self.step_pause.is_zero() {
            tokio::time::sleep(self.step_pause).await;
        }
    }
}
