//! The `run` command: log in, host a room of AIs, play it out.

use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use majsoul_rpa_config::Config;
use majsoul_rpa_presentation::layout::ROOM_SEATS;
use majsoul_rpa_presentation::{MatchPresentation, Presentation, RoomHostPresentation, Rpa};
use majsoul_rpa_protocols::{Operation, RpaError};

use crate::setup;

/// What to do at a decision point.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Decision {
    /// Discard the tile at this index.
    Discard(Operation, usize),
    /// Pass on everything offered.
    Skip,
}

/// Discard the drawn tile when allowed, otherwise the first allowed hand
/// tile. Every call and win is declined.
pub(crate) fn tsumogiri(
    offered: &[Operation],
    shoupai: &[String],
    zimopai: Option<&str>,
) -> Option<Decision> {
    let Some((dapai, forbidden_tiles)) = offered.iter().find_map(|op| match op {
        Operation::Dapai { forbidden_tiles } => Some((op, forbidden_tiles)),
        _ => None,
    }) else {
        return Some(Decision::Skip);
    };
    let allowed = |tile: &str| !forbidden_tiles.iter().any(|f| f == tile);

    if let Some(drawn) = zimopai.filter(|t| allowed(*t)) {
        debug!("Tsumogiri {}", drawn);
        return Some(Decision::Discard(dapai.clone(), shoupai.len()));
    }
    shoupai
        .iter()
        .position(|t| allowed(t.as_str()))
        .map(|index| Decision::Discard(dapai.clone(), index))
}

/// Ask for a line on the terminal.
async fn prompt(label: &'static str) -> Result<String, Box<dyn std::error::Error>> {
    let line = tokio::task::spawn_blocking(move || -> std::io::Result<String> {
        print!("{label}: ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    })
    .await??;
    Ok(line)
}

async fn play_decision(game: &mut MatchPresentation, config: &Config) -> Result<(), RpaError> {
    let timeouts = &config.timeouts;
    let Some(offered) = game.operation_list() else {
        return game.wait(timeouts.wait()).await;
    };
    match tsumogiri(offered, game.shoupai(), game.zimopai()) {
        Some(Decision::Discard(dapai, index)) => {
            game.select_operation(Some(&dapai), Some(index), timeouts.operation())
                .await
        }
        Some(Decision::Skip) => game.select_operation(None, None, timeouts.operation()).await,
        None => {
            warn!("No tile may be discarded, waiting");
            game.wait(timeouts.wait()).await
        }
    }
}

/// Add AIs until every free seat is taken. `false` when the room was left meanwhile.
async fn fill_room(room: &mut RoomHostPresentation, config: &Config) -> Result<bool, RpaError> {
    while room.num_ais() + 1 < ROOM_SEATS {
        match room.add_ai(config.timeouts.room()).await {
            Ok(()) => {}
            Err(RpaError::Superseded(_)) => {
                warn!("Room {} was left while adding AIs", room.room_id());
                return Ok(false);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(true)
}

/// Drive the client until `matches` matches are played and the lobby is reached again.
async fn play(
    rpa: &Rpa,
    config: &Config,
    email: Option<String>,
    matches: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let timeouts = &config.timeouts;
    let mut played = 0;
    let mut in_match = false;
    let mut current = rpa.wait_for_presentation(timeouts.presentation()).await?;

    loop {
        current = match current {
            Presentation::Login(mut login) => {
                login.login(timeouts.login()).await?;
                login.take_next().unwrap_or_else(Presentation::Login)
            }
            Presentation::Auth(mut auth) => {
                let address = match &email {
                    Some(address) => address.clone(),
                    None => prompt("E-mail address").await?,
                };
                auth.enter_email_address(&address).await?;
                let code = prompt("Verification code").await?;
                auth.enter_auth_code(&code, timeouts.auth()).await?;
                auth.take_next().unwrap_or_else(Presentation::Auth)
            }
            Presentation::Home(mut home) => {
                if played >= matches {
                    info!("Played {} match(es), done", played);
                    return Ok(());
                }
                home.create_room(timeouts.room()).await?;
                home.take_next().unwrap_or_else(Presentation::Home)
            }
            Presentation::RoomHost(mut room) => {
                if in_match {
                    in_match = false;
                    played += 1;
                    info!("Match {} of {} finished", played, matches);
                }
                if played >= matches {
                    room.leave(timeouts.room()).await?;
                } else if fill_room(&mut room, config).await? {
                    room.start(timeouts.match_start()).await?;
                    in_match = true;
                }
                room.take_next().unwrap_or_else(Presentation::RoomHost)
            }
            Presentation::Match(mut game) => {
                play_decision(&mut game, config).await?;
                game.take_next().unwrap_or_else(Presentation::Match)
            }
        };
    }
}

/// Run the whole session and release the browser on every exit path.
pub(crate) async fn run(
    config: Config,
    email: Option<String>,
    matches: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = setup::start(&config).await?;
    let result = play(&session.rpa, &config, email, matches).await;
    if let Err(e) = session.rpa.close().await {
        warn!("Failed to close the browser: {}", e);
    }
    result
}
