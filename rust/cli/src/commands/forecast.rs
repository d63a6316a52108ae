//! `forecast`: qualification chances for every team.

use std::io::Write;
use std::path::Path;

use crease_engine::bracket::playoff_stages;
use crease_engine::dashboard::select_tournament;
use crease_engine::forecast::forecast_qualification;
use crease_engine::model::Match;
use crease_engine::standings::compute_standings_and_leaderboards;

use super::rng_for;
use crate::config;
use crate::error::CliError;
use crate::formatters::{format_chances, format_tournament_header};
use crate::io_utils::load_store;

pub fn handle_forecast_command(
    store: &Path,
    tournament: Option<u64>,
    trials: Option<u32>,
    seed: Option<u64>,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load()?;
    let tournaments = load_store(store)?;
    let t = select_tournament(&tournaments, tournament)?;

    let boards =
        compute_standings_and_leaderboards(&t.matches, &t.participants(), t.qualifier_count);
    let league: Vec<Match> = t.league_matches().cloned().collect();
    let remaining: Vec<&Match> = league.iter().filter(|m| !m.is_resolved()).collect();
    let forecast_cfg = cfg.forecast(trials);
    let mut rng = rng_for(seed, &cfg);
    let chances = forecast_qualification(
        &boards.standings,
        &remaining,
        &league,
        t.qualifier_count,
        &mut rng,
        &forecast_cfg,
    );

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&chances)?)?;
        return Ok(());
    }
    writeln!(out, "{}", format_tournament_header(t))?;
    writeln!(
        out,
        "{} league matches left, {} trials",
        remaining.len(),
        forecast_cfg.trials
    )?;
    write!(out, "{}", format_chances(&chances, !playoff_stages(t.qualifier_count).is_empty()))?;
    Ok(())
}
