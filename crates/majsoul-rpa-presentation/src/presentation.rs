//! The presentation enum and the event pump shared by all screens.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};

use majsoul_rpa_protocols::{GameEvent, RpaError};

use crate::auth::AuthPresentation;
use crate::context::Context;
use crate::home::HomePresentation;
use crate::login::LoginPresentation;
use crate::matches::MatchPresentation;
use crate::room::RoomHostPresentation;
use crate::successor::Successor;

/// The screen the client currently shows.
///
/// Callers match on the variant to learn which actions are available.
pub enum Presentation {
    Login(LoginPresentation),
    Auth(AuthPresentation),
    Home(HomePresentation),
    RoomHost(RoomHostPresentation),
    Match(MatchPresentation),
}

macro_rules! narrow {
    ($fn_name:ident, $variant:ident, $ty:ty) => {
        /// Narrow to this variant, failing with [`RpaError::UnexpectedVariant`] otherwise.
        pub fn $fn_name(self) -> Result<$ty, RpaError> {
            match self {
                Presentation::$variant(inner) => Ok(inner),
                other => Err(RpaError::UnexpectedVariant {
                    expected: <$ty>::NAME,
                    actual: other.name(),
                }),
            }
        }
    };
}

impl Presentation {
    pub fn name(&self) -> &'static str {
        match self {
            Presentation::Login(_) => LoginPresentation::NAME,
            Presentation::Auth(_) => AuthPresentation::NAME,
            Presentation::Home(_) => HomePresentation::NAME,
            Presentation::RoomHost(_) => RoomHostPresentation::NAME,
            Presentation::Match(_) => MatchPresentation::NAME,
        }
    }

    narrow!(into_login, Login, LoginPresentation);
    narrow!(into_auth, Auth, AuthPresentation);
    narrow!(into_home, Home, HomePresentation);
    narrow!(into_room_host, RoomHost, RoomHostPresentation);
    narrow!(into_match, Match, MatchPresentation);

    pub fn pending_next(&self) -> Option<&Presentation> {
        match self {
            Presentation::Login(p) => p.pending_next(),
            Presentation::Auth(p) => p.pending_next(),
            Presentation::Home(p) => p.pending_next(),
            Presentation::RoomHost(p) => p.pending_next(),
            Presentation::Match(p) => p.pending_next(),
        }
    }

    /// Follow the successor, or get `self` back if there is none yet.
    pub fn take_next(self) -> Result<Presentation, Presentation> {
        match self {
            Presentation::Login(p) => p.take_next().map_err(Presentation::Login),
            Presentation::Auth(p) => p.take_next().map_err(Presentation::Auth),
            Presentation::Home(p) => p.take_next().map_err(Presentation::Home),
            Presentation::RoomHost(p) => p.take_next().map_err(Presentation::RoomHost),
            Presentation::Match(p) => p.take_next().map_err(Presentation::Match),
        }
    }

    /// Observe without sending input; see [`LoginPresentation::wait`].
    pub async fn wait(&mut self, timeout: Duration) -> Result<(), RpaError> {
        match self {
            Presentation::Login(p) => p.wait(timeout).await,
            Presentation::Auth(p) => p.wait(timeout).await,
            Presentation::Home(p) => p.wait(timeout).await,
            Presentation::RoomHost(p) => p.wait(timeout).await,
            Presentation::Match(p) => p.wait(timeout).await,
        }
    }

    pub async fn screenshot(&self) -> Result<Vec<u8>, RpaError> {
        match self {
            Presentation::Login(p) => p.screenshot().await,
            Presentation::Auth(p) => p.screenshot().await,
            Presentation::Home(p) => p.screenshot().await,
            Presentation::RoomHost(p) => p.screenshot().await,
            Presentation::Match(p) => p.screenshot().await,
        }
    }

    /// Build the presentation a screen event lands on from scratch.
    ///
    /// Only the screens that need no prior knowledge can start a session.
    pub(crate) fn from_screen_event(ctx: &Arc<Context>, event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::LoginScreen => Some(Presentation::Login(LoginPresentation::new(ctx.clone()))),
            GameEvent::AuthScreen => Some(Presentation::Auth(AuthPresentation::new(ctx.clone()))),
            GameEvent::HomeScreen { .. } => {
                Some(Presentation::Home(HomePresentation::new(ctx.clone())))
            }
            _ => None,
        }
    }
}

impl fmt::Debug for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Presentation::Login(p) => p.fmt(f),
            Presentation::Auth(p) => p.fmt(f),
            Presentation::Home(p) => p.fmt(f),
            Presentation::RoomHost(p) => p.fmt(f),
            Presentation::Match(p) => p.fmt(f),
        }
    }
}

/// One screen of the client.
pub(crate) trait Screen {
    const NAME: &'static str;

    fn ctx(&self) -> &Arc<Context>;

    fn successor(&self) -> &Successor;

    /// Apply an event; return the presentation it leads to, if any.
    ///
    /// Events that only update the screen mutate `self` and return `None`.
    fn absorb(&mut self, event: GameEvent) -> Option<Presentation>;
}

/// Fail with [`RpaError::Superseded`] once a successor exists.
pub(crate) fn ensure_active<S: Screen>(screen: &S) -> Result<(), RpaError> {
    if screen.successor().is_set() {
        Err(RpaError::Superseded(S::NAME))
    } else {
        Ok(())
    }
}

/// Feed events into `screen` until `done` holds or `timeout` passes.
///
/// Returns whether `done` held. Stops as soon as a successor is published;
/// later events stay queued for the successor.
pub(crate) async fn pump<S, F>(screen: &mut S, timeout: Duration, done: F) -> Result<bool, RpaError>
where
    S: Screen,
    F: Fn(&S) -> bool,
{
    let ctx = screen.ctx().clone();
    let deadline = Instant::now() + timeout;

    loop {
        if done(screen) {
            return Ok(true);
        }
        if screen.successor().is_set() {
            return Ok(false);
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(false);
        }

        let Some(event) = ctx.events().next_event(deadline - now).await? else {
            continue;
        };

        if let GameEvent::HomeScreen {
            account_id: Some(id),
        } = &event
        {
            ctx.record_account_id(*id);
        }

        let event_name = event.name();
        let next = match event {
            GameEvent::LoginScreen if S::NAME != LoginPresentation::NAME => {
                Some(Presentation::Login(LoginPresentation::new(ctx.clone())))
            }
            event => screen.absorb(event),
        };

        match next {
            Some(next) => {
                info!("{} -> {} on {}", S::NAME, next.name(), event_name);
                screen.successor().publish(next);
            }
            None => debug!("{} absorbed {}", S::NAME, event_name),
        }
    }
}

/// Await the successor after input was sent, or fail with a timeout.
pub(crate) async fn await_successor<S: Screen>(
    screen: &mut S,
    timeout: Duration,
    waiting_for: &str,
) -> Result<(), RpaError> {
    if pump(screen, timeout, |s| s.successor().is_set()).await? {
        Ok(())
    } else {
        Err(RpaError::timeout(waiting_for, timeout))
    }
}

/// Observe until a successor arrives; expiry is not an error.
pub(crate) async fn observe<S: Screen>(screen: &mut S, timeout: Duration) -> Result<(), RpaError> {
    if !pump(screen, timeout, |s| s.successor().is_set()).await? {
        debug!("{} unchanged after {:?}", S::NAME, timeout);
    }
    Ok(())
}

/// Methods every presentation struct shares. Requires `ctx` and `successor` fields.
macro_rules! screen_common {
    ($ty:ident) => {
        impl $ty {
            /// The presentation that replaced this one, if any.
            pub fn pending_next(&self) -> Option<&$crate::presentation::Presentation> {
                self.successor.get()
            }

            pub fn is_superseded(&self) -> bool {
                self.successor.is_set()
            }

            /// Follow the successor, or get `self` back if there is none yet.
            pub fn take_next(mut self) -> Result<$crate::presentation::Presentation, Self> {
                match self.successor.take() {
                    Some(next) => Ok(next),
                    None => Err(self),
                }
            }

            /// Observe incoming events for up to `timeout` without sending input.
            ///
            /// Returns `Ok(())` both when a successor arrived and when the
            /// timeout expired; check [`Self::pending_next`].
            pub async fn wait(
                &mut self,
                timeout: std::time::Duration,
            ) -> Result<(), majsoul_rpa_protocols::RpaError> {
                $crate::presentation::observe(self, timeout).await
            }

            /// PNG screenshot of the client.
            pub async fn screenshot(&self) -> Result<Vec<u8>, majsoul_rpa_protocols::RpaError> {
                self.ctx.driver().get_screenshot().await
            }
        }
    };
}

pub(crate) use screen_common;

#[cfg(test)]
#[path = "presentation_tests.rs"]
mod tests;
