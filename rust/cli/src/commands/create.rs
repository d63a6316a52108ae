//! `create`: register a tournament and generate its schedule.

use std::io::Write;
use std::path::Path;

use crease_engine::bracket::playoff_stages;
use crease_engine::schedule::{NewTournament, create_tournament};

use super::rng_for;
use crate::config;
use crate::error::CliError;
use crate::formatters::{format_schedule, format_tournament_header};
use crate::io_utils::{load_store, save_store};
use crate::ui;

#[derive(Debug, Clone)]
pub struct CreateArgs {
    pub name: String,
    pub players: String,
    pub qualifiers: u8,
    pub description: Option<String>,
    pub created_by: Option<String>,
    pub seed: Option<u64>,
}

/// Creates a tournament with the next free id and appends it to the store.
pub fn handle_create_command(
    store: &Path,
    args: CreateArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load()?;
    if args.name.trim().is_empty() {
        return Err(CliError::InvalidInput("tournament name must not be empty".into()));
    }
    if playoff_stages(args.qualifiers).is_empty() {
        ui::display_warning(
            err,
            &format!(
                "{} qualifiers has no playoff bracket; the tournament is league only",
                args.qualifiers
            ),
        )?;
    }

    let mut tournaments = load_store(store)?;
    let id = tournaments.iter().map(|t| t.id).max().unwrap_or(0) + 1;
    let mut rng = rng_for(args.seed, &cfg);

    let tournament = create_tournament(
        NewTournament {
            id,
            name: args.name.trim().to_string(),
            description: args.description,
            players: args.players,
            qualifier_count: args.qualifiers,
            created_by: args.created_by,
        },
        &mut rng,
        &cfg.scheduler(),
    )?;

    let participants = tournament.participants().len();
    if participants < usize::from(args.qualifiers) && !playoff_stages(args.qualifiers).is_empty() {
        ui::display_warning(
            err,
            &format!(
                "only {} participants for {} qualifiers; unfilled playoff slots stay TBD",
                participants, args.qualifiers
            ),
        )?;
    }

    writeln!(out, "{}", format_tournament_header(&tournament))?;
    writeln!(out, "Players: {}", tournament.players)?;
    write!(out, "{}", format_schedule(&tournament.matches))?;

    tournaments.push(tournament);
    save_store(store, &tournaments)?;
    Ok(())
}
