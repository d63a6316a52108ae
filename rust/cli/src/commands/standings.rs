//! `standings`: points table plus batting and bowling leaderboards.

use std::io::Write;
use std::path::Path;

use crease_engine::dashboard::select_tournament;
use crease_engine::standings::compute_standings_and_leaderboards;

use crate::error::CliError;
use crate::formatters::{format_batsmen, format_bowlers, format_standings, format_tournament_header};
use crate::io_utils::load_store;

pub fn handle_standings_command(
    store: &Path,
    tournament: Option<u64>,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let tournaments = load_store(store)?;
    let t = select_tournament(&tournaments, tournament)?;
    let boards =
        compute_standings_and_leaderboards(&t.matches, &t.participants(), t.qualifier_count);

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&boards)?)?;
        return Ok(());
    }

    writeln!(out, "{}", format_tournament_header(t))?;
    writeln!(out)?;
    write!(out, "{}", format_standings(&boards.standings))?;
    writeln!(out)?;
    write!(out, "{}", format_batsmen(&boards.batsmen))?;
    writeln!(out)?;
    write!(out, "{}", format_bowlers(&boards.bowlers))?;
    Ok(())
}
