//! `schedule`: list a stored schedule, or preview one without saving it.

use std::io::Write;
use std::path::Path;

use crease_engine::dashboard::select_tournament;
use crease_engine::model::{Match, normalize_players};
use crease_engine::schedule::{back_to_back_count, generate_schedule};

use super::rng_for;
use crate::config;
use crate::error::CliError;
use crate::formatters::{format_schedule, format_tournament_header};
use crate::io_utils::load_store;

pub fn handle_schedule_command(
    store: &Path,
    tournament: Option<u64>,
    players: Option<String>,
    qualifiers: u8,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let matches = match players {
        Some(raw) => {
            let cfg = config::load()?;
            let players = normalize_players(&raw)?;
            let mut rng = rng_for(seed, &cfg);
            writeln!(out, "Preview for {} players (not saved)", players.len())?;
            generate_schedule(0, &players, qualifiers, &mut rng, &cfg.scheduler())?
        }
        None => {
            let tournaments = load_store(store)?;
            let t = select_tournament(&tournaments, tournament)?;
            writeln!(out, "{}", format_tournament_header(t))?;
            let mut ms = t.matches.clone();
            ms.sort_by_key(|m| m.sequence);
            ms
        }
    };

    write!(out, "{}", format_schedule(&matches))?;
    writeln!(out, "Back-to-back fixtures: {}", league_back_to_back(&matches))?;
    Ok(())
}

fn league_back_to_back(matches: &[Match]) -> usize {
    let pairs: Vec<(String, String)> = matches
        .iter()
        .filter(|m| m.is_league())
        .map(|m| (m.players[0].to_string(), m.players[1].to_string()))
        .collect();
    back_to_back_count(&pairs)
}
