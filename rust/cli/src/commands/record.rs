//! `record`: enter a scorecard and move the bracket on.

use std::io::Write;
use std::path::Path;

use crease_engine::bracket::BracketEvent;
use crease_engine::dashboard::select_tournament;
use crease_engine::errors::TournamentError;
use crease_engine::model::{Innings, TossChoice};
use crease_engine::results::{MatchUpdate, record_result};

use crate::error::CliError;
use crate::formatters::format_match_line;
use crate::io_utils::{load_store, save_store};
use crate::validation::validate_update;

#[derive(Debug, Clone, Default)]
pub struct RecordArgs {
    pub tournament: Option<u64>,
    pub match_id: u64,
    pub innings: [Innings; 2],
    pub winner: Option<String>,
    pub toss_winner: Option<String>,
    pub toss_choice: Option<TossChoice>,
    pub description: Option<String>,
}

pub fn handle_record_command(
    store: &Path,
    args: RecordArgs,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut tournaments = load_store(store)?;
    let id = select_tournament(&tournaments, args.tournament)?.id;
    let tournament = tournaments
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(TournamentError::TournamentNotFound { id })?;

    let stored = tournament
        .match_by_id(args.match_id)
        .ok_or(TournamentError::MatchNotFound { id: args.match_id })?;
    let update = validate_update(
        stored,
        MatchUpdate {
            innings: args.innings,
            winner: args.winner,
            toss_winner: args.toss_winner,
            toss_choice: args.toss_choice,
            description: args.description,
        },
    )
    .map_err(CliError::InvalidInput)?;

    let outcome = record_result(tournament, args.match_id, update)?;
    writeln!(out, "{}", format_match_line(&outcome.updated))?;
    if !outcome.updated.is_resolved() {
        writeln!(out, "Match in progress")?;
    }
    for event in &outcome.events {
        writeln!(out, "{}", describe_event(event))?;
    }

    save_store(store, &tournaments)?;
    Ok(())
}

fn describe_event(event: &BracketEvent) -> String {
    match event {
        BracketEvent::Seeded { stage, players } => {
            format!("Seeded {}: {} v {}", stage, players[0], players[1])
        }
        BracketEvent::SlotFilled { stage, slot, team } => {
            format!("{} advances to {} (slot {})", team, stage, slot + 1)
        }
        BracketEvent::Completed { champion } => format!("Champion: {}", champion),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crease_engine::model::{MatchKind, Slot};

    #[test]
    fn events_read_naturally() {
        assert_eq!(
            describe_event(&BracketEvent::Seeded {
                stage: MatchKind::Qualifier1,
                players: [Slot::from("ana"), Slot::from("ben")],
            }),
            "Seeded Qualifier 1: ana v ben"
        );
        assert_eq!(
            describe_event(&BracketEvent::SlotFilled {
                stage: MatchKind::Final,
                slot: 1,
                team: "cas".into(),
            }),
            "cas advances to Final (slot 2)"
        );
        assert_eq!(
            describe_event(&BracketEvent::Completed {
                champion: "cas".into()
            }),
            "Champion: cas"
        );
    }
}
