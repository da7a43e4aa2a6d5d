//! Scripted sessions for the unit tests of this crate.

use std::time::Duration;

use majsoul_rpa_input::testing::{CallLog, RecordingEngine};
use majsoul_rpa_input::{InputDriver, InputSettings, Sampler};
use majsoul_rpa_protocols::{
    ChannelEventSource, EventSender, GameEvent, MatchEvent, Operation, Player, ViewportConfig,
};

use crate::{Context, MatchPresentation, Presentation, Rpa};

pub(crate) const ACCOUNT_ID: u64 = 42;
pub(crate) const ROOM_ID: &str = "58213";
pub(crate) const SHORT: Duration = Duration::from_secs(5);

pub(crate) struct Harness {
    pub rpa: Rpa,
    pub events: EventSender,
    pub log: CallLog,
}

impl Harness {
    pub fn new() -> Self {
        let (engine, log) = RecordingEngine::new();
        let driver = InputDriver::new(
            Box::new(engine),
            ViewportConfig::default(),
            InputSettings::default(),
        )
        .unwrap()
        .with_sampler(Sampler::seeded(7));
        let (source, events) = ChannelEventSource::new();
        let ctx = Context::new(driver, Box::new(source)).with_step_pause(Duration::ZERO);
        Self {
            rpa: Rpa::with_context(ctx),
            events,
            log,
        }
    }

    pub fn send(&self, event: GameEvent) {
        self.events.send(event).unwrap();
    }

    pub fn send_match(&self, event: MatchEvent) {
        self.send(GameEvent::Match(event));
    }

    /// Start the session on the lobby, logged in as [`ACCOUNT_ID`].
    pub async fn home(&self) -> Presentation {
        self.home_as(Some(ACCOUNT_ID)).await
    }

    pub async fn home_as(&self, account_id: Option<u64>) -> Presentation {
        self.send(GameEvent::HomeScreen { account_id });
        self.rpa.wait_for_presentation(SHORT).await.unwrap()
    }

    /// Walk from the lobby into the first hand of a match dealt as `round`.
    pub async fn enter_match(&self, round: MatchEvent) -> MatchPresentation {
        self.enter_match_as(Some(ACCOUNT_ID), round).await
    }

    /// Like [`enter_match`](Self::enter_match), for a lobby that did not report the account.
    pub async fn enter_match_as(
        &self,
        account_id: Option<u64>,
        round: MatchEvent,
    ) -> MatchPresentation {
        let mut home = self.home_as(account_id).await.into_home().unwrap();
        self.send(GameEvent::RoomCreated {
            room_id: ROOM_ID.to_string(),
        });
        home.create_room(SHORT).await.unwrap();

        let mut room = home.take_next().unwrap().into_room_host().unwrap();
        self.send(GameEvent::MatchStarted { players: players() });
        self.send_match(round);
        room.start(SHORT).await.unwrap();

        let game = room.take_next().unwrap().into_match().unwrap();
        self.log.clear();
        game
    }
}

pub(crate) fn labels(tiles: &[&str]) -> Vec<String> {
    tiles.iter().map(|t| t.to_string()).collect()
}

/// Us in seat 0 and three AIs.
pub(crate) fn players() -> Vec<Player> {
    let mut players = vec![Player {
        account_id: ACCOUNT_ID,
        nickname: "tester".to_string(),
        level: "雀士1".to_string(),
        character: 200001,
    }];
    for i in 0..3 {
        players.push(Player {
            account_id: 0,
            nickname: format!("AI {}", i + 1),
            level: "雀士1".to_string(),
            character: 200002,
        });
    }
    players
}

pub(crate) fn dapai() -> Operation {
    Operation::Dapai {
        forbidden_tiles: Vec::new(),
    }
}

/// East 2 from seat 0, which does not deal: 13 tiles and nothing owed.
pub(crate) fn non_dealer_round() -> MatchEvent {
    MatchEvent::NewRound {
        chang: 0,
        ju: 1,
        ben: 0,
        liqibang: 0,
        scores: vec![25000; 4],
        dora_indicators: labels(&["3s"]),
        shoupai: labels(&[
            "9s", "1m", "2m", "3m", "4p", "0p", "6p", "7s", "8s", "1z", "1z", "5z", "6z",
        ]),
        zimopai: None,
        operations: None,
    }
}

/// East 1 as dealer: 13 tiles, `7z` drawn, a discard owed.
pub(crate) fn dealer_round(operations: Vec<Operation>) -> MatchEvent {
    MatchEvent::NewRound {
        chang: 0,
        ju: 0,
        ben: 0,
        liqibang: 0,
        scores: vec![25000; 4],
        dora_indicators: labels(&["3s"]),
        shoupai: labels(&[
            "9s", "1m", "2m", "3m", "4p", "0p", "6p", "7s", "8s", "1z", "1z", "5z", "6z",
        ]),
        zimopai: Some("7z".to_string()),
        operations: Some(operations),
    }
}
