//! Title screen.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use majsoul_rpa_protocols::{GameEvent, RpaError};

use crate::auth::AuthPresentation;
use crate::context::Context;
use crate::home::HomePresentation;
use crate::layout;
use crate::presentation::{self, screen_common, Presentation, Screen};
use crate::successor::Successor;

/// The title screen with the login button.
pub struct LoginPresentation {
    ctx: Arc<Context>,
    successor: Successor,
}

impl LoginPresentation {
    pub(crate) fn new(ctx: Arc<Context>) -> Self {
        Self {
            ctx,
            successor: Successor::default(),
        }
    }

    /// Click the login button and wait for the authentication dialog.
    ///
    /// A remembered session skips the dialog and lands on the lobby instead.
    pub async fn login(&mut self, timeout: Duration) -> Result<(), RpaError> {
        presentation::ensure_active(self)?;
        self.ctx.driver().click(layout::LOGIN_BUTTON).await?;
        presentation::await_successor(self, timeout, AuthPresentation::NAME).await
    }
}

screen_common!(LoginPresentation);

impl Screen for LoginPresentation {
    const NAME: &'static str = "login";

    fn ctx(&self) -> &Arc<Context> {
        &self.ctx
    }

    fn successor(&self) -> &Successor {
        &self.successor
    }

    fn absorb(&mut self, event: GameEvent) -> Option<Presentation> {
        match event {
            GameEvent::AuthScreen => Some(Presentation::Auth(AuthPresentation::new(self.ctx.clone()))),
            GameEvent::HomeScreen { .. } => {
                Some(Presentation::Home(HomePresentation::new(self.ctx.clone())))
            }
            _ => None,
        }
    }
}

impl fmt::Debug for LoginPresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginPresentation")
            .field("superseded", &self.successor.is_set())
            .finish()
    }
}
