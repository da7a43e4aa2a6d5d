//! E-mail authentication dialog.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use majsoul_rpa_protocols::{GameEvent, RpaError};

use crate::context::Context;
use crate::home::HomePresentation;
use crate::layout;
use crate::presentation::{self, screen_common, Presentation, Screen};
use crate::successor::Successor;

/// Length of the verification code sent by mail.
pub const AUTH_CODE_LEN: usize = 6;

/// The dialog asking for an e-mail address and the code mailed to it.
pub struct AuthPresentation {
    ctx: Arc<Context>,
    successor: Successor,
    email_sent: bool,
}

impl AuthPresentation {
    pub(crate) fn new(ctx: Arc<Context>) -> Self {
        Self {
            ctx,
            successor: Successor::default(),
            email_sent: false,
        }
    }

    /// Whether a code has been requested from this dialog.
    pub fn email_sent(&self) -> bool {
        self.email_sent
    }

    /// Type the address and request a verification code.
    pub async fn enter_email_address(&mut self, address: &str) -> Result<(), RpaError> {
        presentation::ensure_active(self)?;
        let address = address.trim();
        let well_formed = address
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !well_formed {
            return Err(RpaError::InvalidParameter(format!(
                "not an e-mail address: {address:?}"
            )));
        }

        let driver = self.ctx.driver();
        driver.click(layout::EMAIL_INPUT).await?;
        driver.write(address, self.ctx.typing()).await?;
        self.ctx.step_pause().await;
        driver.click(layout::SEND_CODE_BUTTON).await?;
        self.email_sent = true;
        debug!("Verification code requested");
        Ok(())
    }

    /// Type the verification code, submit, and wait for the lobby.
    pub async fn enter_auth_code(&mut self, code: &str, timeout: Duration) -> Result<(), RpaError> {
        presentation::ensure_active(self)?;
        let code = code.trim();
        if code.len() != AUTH_CODE_LEN || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(RpaError::InvalidParameter(format!(
                "verification code must be {AUTH_CODE_LEN} digits"
            )));
        }
        if !self.email_sent {
            return Err(RpaError::InvalidOperation(
                "no verification code has been requested yet".to_string(),
            ));
        }

        let driver = self.ctx.driver();
        driver.click(layout::AUTH_CODE_INPUT).await?;
        driver.write(code, self.ctx.typing()).await?;
        self.ctx.step_pause().await;
        driver.click(layout::AUTH_LOGIN_BUTTON).await?;
        presentation::await_successor(self, timeout, HomePresentation::NAME).await
    }
}

screen_common!(AuthPresentation);

impl Screen for AuthPresentation {
    const NAME: &'static str = "auth";

    fn ctx(&self) -> &Arc<Context> {
        &self.ctx
    }

    fn successor(&self) -> &Successor {
        &self.successor
    }

    fn absorb(&mut self, event: GameEvent) -> Option<Presentation> {
        match event {
            GameEvent::HomeScreen { .. } => {
                Some(Presentation::Home(HomePresentation::new(self.ctx.clone())))
            }
            _ => None,
        }
    }
}

impl fmt::Debug for AuthPresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthPresentation")
            .field("email_sent", &self.email_sent)
            .field("superseded", &self.successor.is_set())
            .finish()
    }
}
