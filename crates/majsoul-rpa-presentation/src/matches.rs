//! A match in progress.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use majsoul_rpa_protocols::{tile, GameEvent, MatchEvent, Operation, Player, RpaError};

use crate::context::Context;
use crate::home::HomePresentation;
use crate::presentation::{self, screen_common, Presentation, Screen};
use crate::room::RoomHostPresentation;
use crate::selection::{self, HandView, Plan};
use crate::successor::Successor;

/// Table state at one point of a match.
///
/// Every match event produces a fresh presentation; the one holding a
/// non-empty [`operation_list`](Self::operation_list) is a decision point.
pub struct MatchPresentation {
    ctx: Arc<Context>,
    successor: Successor,
    room_id: String,
    players: Vec<Player>,
    chang: u8,
    ju: u8,
    ben: u32,
    liqibang: u32,
    scores: Vec<i32>,
    dora_indicators: Vec<String>,
    shoupai: Vec<String>,
    zimopai: Option<String>,
    operation_list: Option<Vec<Operation>>,
    /// Seat learned from the table itself when the account id cannot place us.
    own_seat: Option<u8>,
    /// Set once a meld may have been ours but the seat is unknown.
    untracked: bool,
}

impl MatchPresentation {
    /// State right after a hand is dealt. `None` unless `round` is `NewRound`.
    pub(crate) fn from_new_round(
        ctx: Arc<Context>,
        room_id: String,
        players: Vec<Player>,
        round: MatchEvent,
    ) -> Option<Self> {
        let MatchEvent::NewRound {
            chang,
            ju,
            ben,
            liqibang,
            scores,
            dora_indicators,
            mut shoupai,
            zimopai,
            operations,
        } = round
        else {
            return None;
        };
        tile::sort_hand(&mut shoupai);
        // Only the dealer is dealt a fourteenth tile; seat `ju` deals.
        let own_seat = zimopai.as_ref().map(|_| ju % 4);
        Some(Self {
            ctx,
            successor: Successor::default(),
            room_id,
            players,
            chang,
            ju,
            ben,
            liqibang,
            scores,
            dora_indicators,
            shoupai,
            zimopai,
            operation_list: offered(operations),
            own_seat,
            untracked: false,
        })
    }

    /// Round wind: 0 east, 1 south, 2 west, 3 north.
    pub fn chang(&self) -> u8 {
        self.chang
    }

    /// Dealer rotation within the round wind, zero-based.
    pub fn ju(&self) -> u8 {
        self.ju
    }

    /// Repeat counter.
    pub fn ben(&self) -> u32 {
        self.ben
    }

    /// Riichi sticks on the table.
    pub fn liqibang(&self) -> u32 {
        self.liqibang
    }

    pub fn scores(&self) -> &[i32] {
        &self.scores
    }

    pub fn dora_indicators(&self) -> &[String] {
        &self.dora_indicators
    }

    /// Concealed hand in display order, without the drawn tile.
    pub fn shoupai(&self) -> &[String] {
        &self.shoupai
    }

    /// Tile drawn this turn, shown apart from the hand.
    pub fn zimopai(&self) -> Option<&str> {
        self.zimopai.as_deref()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// Operations offered right now; `None` when no decision is pending.
    pub fn operation_list(&self) -> Option<&[Operation]> {
        self.operation_list.as_deref()
    }

    /// Our seat, found by matching the logged-in account against the players.
    ///
    /// Without a known account the seat is taken from the table: the dealer
    /// seat when we were dealt the fourteenth tile, or the seat of the first
    /// draw that revealed its tile.
    pub fn seat(&self) -> Option<u8> {
        self.ctx
            .account_id()
            .and_then(|me| self.players.iter().position(|p| p.account_id == me))
            .and_then(|i| u8::try_from(i).ok())
            .or(self.own_seat)
    }

    /// Whether the hand still mirrors the client.
    pub fn is_hand_tracked(&self) -> bool {
        !self.untracked
    }

    /// Carry out a decision and wait for the next state.
    ///
    /// `None` passes. `index` picks the hand tile for `Dapai` and `Liqi`
    /// (`shoupai().len()` is the drawn tile) or the combination of a call
    /// when several are offered. Everything is validated before any input.
    ///
    /// Passing on a self-call while a discard is also owed only dismisses
    /// the buttons: the presentation stays current and its operation list
    /// shrinks to the discard.
    pub async fn select_operation(
        &mut self,
        operation: Option<&Operation>,
        index: Option<usize>,
        timeout: Duration,
    ) -> Result<(), RpaError> {
        presentation::ensure_active(self)?;
        let hand = HandView {
            shoupai: &self.shoupai,
            zimopai: self.zimopai.as_deref(),
        };
        let plan = selection::plan(hand, self.operation_list.as_deref(), operation, index)?;
        if self.untracked && matches!(plan, Plan::Tile { .. }) {
            return Err(RpaError::InvalidOperation(
                "own seat unknown, the hand may not match the client".to_string(),
            ));
        }
        debug!(
            "Selecting {} (index {:?})",
            operation.map_or("skip", |op| op.name()),
            index
        );

        let driver = self.ctx.driver();
        match plan {
            Plan::Skip {
                remaining: Some(discard),
            } => {
                driver.click(crate::layout::skip_button()).await?;
                self.operation_list = Some(vec![discard]);
                return Ok(());
            }
            Plan::Skip { remaining: None } => {
                driver.click(crate::layout::skip_button()).await?;
            }
            Plan::Tile { button, tile } => {
                if let Some(button) = button {
                    driver.click(button).await?;
                    self.ctx.step_pause().await;
                }
                driver.click(tile).await?;
            }
            Plan::Button {
                button,
                combination,
            } => {
                driver.click(button).await?;
                if let Some(combination) = combination {
                    self.ctx.step_pause().await;
                    driver.click(combination).await?;
                }
            }
        }

        presentation::await_successor(self, timeout, "next match state").await
    }

    /// Copy of the table state for the next presentation.
    fn next_state(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            successor: Successor::default(),
            room_id: self.room_id.clone(),
            players: self.players.clone(),
            chang: self.chang,
            ju: self.ju,
            ben: self.ben,
            liqibang: self.liqibang,
            scores: self.scores.clone(),
            dora_indicators: self.dora_indicators.clone(),
            shoupai: self.shoupai.clone(),
            zimopai: self.zimopai.clone(),
            operation_list: None,
            own_seat: self.own_seat,
            untracked: self.untracked,
        }
    }

    /// Whether a call from another seat's discard was on offer.
    fn call_offered(&self) -> bool {
        self.operation_list.as_deref().is_some_and(|ops| {
            ops.iter().any(|op| {
                matches!(
                    op,
                    Operation::Chi { .. } | Operation::Peng { .. } | Operation::Daminggang { .. }
                )
            })
        })
    }

    /// Apply an event to a copy of this state.
    fn advance(&self, event: MatchEvent) -> Self {
        let mut next = self.next_state();
        match event {
            round @ MatchEvent::NewRound { .. } => {
                if let Some(mut fresh) = Self::from_new_round(
                    self.ctx.clone(),
                    self.room_id.clone(),
                    self.players.clone(),
                    round,
                ) {
                    // Seats do not change within a match.
                    fresh.own_seat = self.own_seat.or(fresh.own_seat);
                    next = fresh;
                }
            }
            MatchEvent::Draw {
                seat,
                tile,
                operations,
            } => {
                if let Some(tile) = tile {
                    match self.seat() {
                        Some(own) if own != seat => {
                            warn!("Drawn tile revealed for seat {}", seat)
                        }
                        own => {
                            if own.is_none() {
                                debug!("Own seat is {}", seat);
                                next.own_seat = Some(seat);
                            }
                            next.zimopai = Some(tile);
                        }
                    }
                }
                next.operation_list = offered(operations);
            }
            MatchEvent::Discard {
                seat,
                tile,
                moqie,
                operations,
            } => {
                if self.seat() == Some(seat) {
                    next.discard_own(&tile, moqie);
                }
                next.operation_list = offered(operations);
            }
            MatchEvent::Meld {
                seat,
                consumed,
                operations,
            } => {
                match self.seat() {
                    Some(own) if own == seat => next.meld_own(&consumed),
                    Some(_) => {}
                    None if self.call_offered() => {
                        warn!("Meld by seat {} may be ours, hand no longer tracked", seat);
                        next.untracked = true;
                    }
                    None => {}
                }
                next.operation_list = offered(operations);
            }
            MatchEvent::NewDora { indicator } => {
                next.dora_indicators.push(indicator);
            }
            MatchEvent::LiqiAccepted {
                scores, liqibang, ..
            } => {
                next.scores = scores;
                next.liqibang = liqibang;
            }
            MatchEvent::HandEnd { scores } => {
                next.scores = scores;
                next.zimopai = None;
            }
        }
        next
    }

    fn discard_own(&mut self, tile: &str, moqie: bool) {
        if moqie && self.zimopai.as_deref() == Some(tile) {
            self.zimopai = None;
            return;
        }
        if !remove_tile(&mut self.shoupai, tile) {
            warn!("Discarded {} is not in the hand {:?}", tile, self.shoupai);
        }
        if let Some(drawn) = self.zimopai.take() {
            self.shoupai.push(drawn);
        }
        tile::sort_hand(&mut self.shoupai);
    }

    fn meld_own(&mut self, consumed: &[String]) {
        if let Some(drawn) = self.zimopai.take() {
            self.shoupai.push(drawn);
        }
        for tile in consumed {
            if !remove_tile(&mut self.shoupai, tile) {
                warn!("Melded {} is not in the hand {:?}", tile, self.shoupai);
            }
        }
        tile::sort_hand(&mut self.shoupai);
    }

    fn ai_count(&self) -> u32 {
        // AI seats carry account id 0.
        self.players.iter().filter(|p| p.account_id == 0).count() as u32
    }
}

/// An empty offer is no decision.
fn offered(operations: Option<Vec<Operation>>) -> Option<Vec<Operation>> {
    operations.filter(|ops| !ops.is_empty())
}

fn remove_tile(hand: &mut Vec<String>, tile: &str) -> bool {
    match hand.iter().position(|t| t == tile) {
        Some(i) => {
            hand.remove(i);
            true
        }
        None => false,
    }
}

screen_common!(MatchPresentation);

impl Screen for MatchPresentation {
    const NAME: &'static str = "match";

    fn ctx(&self) -> &Arc<Context> {
        &self.ctx
    }

    fn successor(&self) -> &Successor {
        &self.successor
    }

    fn absorb(&mut self, event: GameEvent) -> Option<Presentation> {
        match event {
            GameEvent::Match(event) => Some(Presentation::Match(self.advance(event))),
            GameEvent::MatchEnded { scores } => {
                debug!("Match ended with scores {:?}", scores);
                Some(Presentation::RoomHost(RoomHostPresentation::new(
                    self.ctx.clone(),
                    self.room_id.clone(),
                    self.ai_count(),
                )))
            }
            GameEvent::HomeScreen { .. } => {
                Some(Presentation::Home(HomePresentation::new(self.ctx.clone())))
            }
            _ => None,
        }
    }
}

impl fmt::Debug for MatchPresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchPresentation")
            .field("chang", &self.chang)
            .field("ju", &self.ju)
            .field("ben", &self.ben)
            .field("shoupai", &self.shoupai)
            .field("zimopai", &self.zimopai)
            .field("operation_list", &self.operation_list)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "matches_tests.rs"]
mod tests;
