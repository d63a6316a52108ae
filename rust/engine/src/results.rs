//! Recording a match result and driving everything that follows from it.

use serde::{Deserialize, Serialize};

use crate::bracket::{advance_bracket, BracketEvent};
use crate::errors::TournamentError;
use crate::model::{Innings, Match, TossChoice, Tournament};
use crate::standings::compute_standings_and_leaderboards;

/// Wickets available to a side in one innings.
pub const WICKETS_PER_INNINGS: u32 = 10;

/// Scorecard submitted for one match. Every field overwrites the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchUpdate {
    #[serde(default)]
    pub innings: [Innings; 2],
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub toss_winner: Option<String>,
    #[serde(default)]
    pub toss_choice: Option<TossChoice>,
    /// Kept as-is when non-empty; otherwise a result line is synthesized.
    #[serde(default)]
    pub description: Option<String>,
}

/// Outcome of [`record_result`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordOutcome {
    /// The match as stored after the update.
    pub updated: Match,
    pub events: Vec<BracketEvent>,
}

/// Result line for a match, e.g. `"ana won by 12 runs"`.
///
/// A side that batted first wins by runs; a side that chased wins by the
/// wickets it had in hand. Who batted first is read off the toss: the toss
/// winner bats first when it chose to bat, and fields first otherwise.
pub fn describe_result(m: &Match) -> String {
    let Some(winner) = m.winner() else {
        return "Match in progress".to_string();
    };
    let winner_won_toss = m.toss_winner.as_deref() == Some(winner);
    let toss_winner_batted = m.toss_choice == Some(TossChoice::Bat);

    if winner_won_toss == toss_winner_batted {
        let margin = m.innings[0].runs.abs_diff(m.innings[1].runs);
        format!("{winner} won by {margin} runs")
    } else {
        let lost = m
            .side_of(winner)
            .map(|side| m.innings[side].wickets)
            .unwrap_or_default();
        let in_hand = WICKETS_PER_INNINGS.saturating_sub(lost);
        format!("{winner} won by {in_hand} wickets")
    }
}

/// Applies `update` to match `match_id` and advances the bracket when the
/// result can move it: the league is complete, or a playoff match resolved.
///
/// # Errors
///
/// [`TournamentError::MatchNotFound`] when the tournament has no such match.
pub fn record_result(
    tournament: &mut Tournament,
    match_id: u64,
    update: MatchUpdate,
) -> Result<RecordOutcome, TournamentError> {
    let stored = tournament
        .matches
        .iter_mut()
        .find(|m| m.id == match_id)
        .ok_or(TournamentError::MatchNotFound { id: match_id })?;

    stored.innings = update.innings;
    stored.winner = update.winner;
    stored.toss_winner = update.toss_winner;
    stored.toss_choice = update.toss_choice;
    stored.description = match update.description.filter(|d| !d.trim().is_empty()) {
        Some(d) => Some(d),
        None => Some(describe_result(stored)),
    };
    let updated = stored.clone();

    let playoff_resolved = updated.kind.is_playoff() && updated.is_resolved();
    let events = if tournament.league_complete() || playoff_resolved {
        let participants = tournament.participants();
        let boards = compute_standings_and_leaderboards(
            &tournament.matches,
            &participants,
            tournament.qualifier_count,
        );
        advance_bracket(tournament, &boards.standings, &updated)
    } else {
        Vec::new()
    };

    Ok(RecordOutcome { updated, events })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(runs: [u32; 2], wickets: [u32; 2]) -> Match {
        let mut m = Match::league(1, 1, "ana", "ben");
        m.innings[0] = Innings {
            runs: runs[0],
            balls: 30,
            wickets: wickets[0],
        };
        m.innings[1] = Innings {
            runs: runs[1],
            balls: 30,
            wickets: wickets[1],
        };
        m
    }

    #[test]
    fn toss_winner_batting_first_wins_by_runs() {
        let mut m = scored([62, 48], [3, 7]);
        m.winner = Some("ana".into());
        m.toss_winner = Some("ana".into());
        m.toss_choice = Some(TossChoice::Bat);
        assert_eq!(describe_result(&m), "ana won by 14 runs");
    }

    #[test]
    fn toss_loser_chasing_wins_by_wickets() {
        let mut m = scored([40, 41], [6, 4]);
        m.winner = Some("ben".into());
        m.toss_winner = Some("ana".into());
        m.toss_choice = Some(TossChoice::Bat);
        assert_eq!(describe_result(&m), "ben won by 6 wickets");
    }

    #[test]
    fn toss_loser_wins_by_runs_when_toss_winner_fielded() {
        let mut m = scored([50, 44], [5, 9]);
        m.winner = Some("ana".into());
        m.toss_winner = Some("ben".into());
        m.toss_choice = Some(TossChoice::Field);
        assert_eq!(describe_result(&m), "ana won by 6 runs");
    }

    #[test]
    fn unresolved_is_in_progress() {
        let m = scored([10, 0], [1, 0]);
        assert_eq!(describe_result(&m), "Match in progress");
    }
}
