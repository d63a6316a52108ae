//! `dashboard`: the combined tournament view as pretty JSON.

use std::io::Write;
use std::path::Path;

use crease_engine::dashboard::{build_dashboard, select_tournament};

use super::rng_for;
use crate::config;
use crate::error::CliError;
use crate::io_utils::load_store;

pub fn handle_dashboard_command(
    store: &Path,
    tournament: Option<u64>,
    trials: Option<u32>,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load()?;
    let tournaments = load_store(store)?;
    let t = select_tournament(&tournaments, tournament)?;
    let mut rng = rng_for(seed, &cfg);
    let data = build_dashboard(t, &mut rng, &cfg.forecast(trials));
    writeln!(out, "{}", serde_json::to_string_pretty(&data)?)?;
    Ok(())
}
