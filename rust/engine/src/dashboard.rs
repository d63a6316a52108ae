//! Read-only dashboard view of a tournament.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::TournamentError;
use crate::forecast::{forecast_qualification, ForecastConfig, QualificationChance};
use crate::model::{Match, Tournament, TournamentStatus};
use crate::nrr::round_to;
use crate::standings::{compute_standings_and_leaderboards, TeamStanding, TopBatsman, TopBowler};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub name: String,
    pub status: TournamentStatus,
    pub total_matches: usize,
    pub completed_matches: usize,
    pub remaining_matches: usize,
}

/// Single-innings records over resolved matches.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TournamentHighlights {
    pub highest_individual_score: u32,
    /// Most wickets to fall in one innings.
    pub most_wickets: u32,
    pub highest_team_score: u32,
    pub best_strike_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub tournament: TournamentSummary,
    pub team_standings: Vec<TeamStanding>,
    pub top_batsmen: Vec<TopBatsman>,
    pub top_bowlers: Vec<TopBowler>,
    pub upcoming_matches: Vec<Match>,
    pub completed_matches: Vec<Match>,
    pub schedule: Vec<Match>,
    pub qualification_chances: Vec<QualificationChance>,
    pub highlights: TournamentHighlights,
}

pub fn highlights(matches: &[Match]) -> TournamentHighlights {
    let mut out = TournamentHighlights::default();
    let mut best_sr = 0.0f64;
    for innings in matches
        .iter()
        .filter(|m| m.is_resolved())
        .flat_map(|m| m.innings.iter())
    {
        out.highest_individual_score = out.highest_individual_score.max(innings.runs);
        out.most_wickets = out.most_wickets.max(innings.wickets);
        if innings.balls > 0 {
            best_sr = best_sr.max(innings.runs as f64 / innings.balls as f64 * 100.0);
        }
    }
    // A participant is its own team, so the two scores coincide.
    out.highest_team_score = out.highest_individual_score;
    out.best_strike_rate = round_to(best_sr, 1);
    out
}

/// Assembles standings, leaderboards, fixture lists, forecasts and
/// highlights for one tournament.
pub fn build_dashboard<R: Rng + ?Sized>(
    tournament: &Tournament,
    rng: &mut R,
    config: &ForecastConfig,
) -> DashboardData {
    let participants = tournament.participants();
    let boards = compute_standings_and_leaderboards(
        &tournament.matches,
        &participants,
        tournament.qualifier_count,
    );

    let mut schedule = tournament.matches.clone();
    schedule.sort_by_key(|m| m.sequence);

    let (completed, upcoming): (Vec<Match>, Vec<Match>) =
        schedule.iter().cloned().partition(Match::is_resolved);
    let mut completed = completed;
    completed.sort_by(|a, b| b.sequence.cmp(&a.sequence));

    let league: Vec<Match> = tournament.league_matches().cloned().collect();
    let remaining: Vec<&Match> = league.iter().filter(|m| !m.is_resolved()).collect();
    let qualification_chances = forecast_qualification(
        &boards.standings,
        &remaining,
        &league,
        tournament.qualifier_count,
        rng,
        config,
    );

    DashboardData {
        tournament: TournamentSummary {
            name: tournament.name.clone(),
            status: tournament.status,
            total_matches: schedule.len(),
            completed_matches: completed.len(),
            remaining_matches: upcoming.len(),
        },
        team_standings: boards.standings,
        top_batsmen: boards.batsmen,
        top_bowlers: boards.bowlers,
        upcoming_matches: upcoming,
        completed_matches: completed,
        highlights: highlights(&tournament.matches),
        schedule,
        qualification_chances,
    }
}

/// Picks the tournament to show: the one with `id` when given, otherwise the
/// newest active tournament still in progress, otherwise the newest active one.
///
/// # Errors
///
/// [`TournamentError::TournamentNotFound`] for an unknown `id`,
/// [`TournamentError::NoTournament`] when nothing is active.
pub fn select_tournament(
    tournaments: &[Tournament],
    id: Option<u64>,
) -> Result<&Tournament, TournamentError> {
    if let Some(id) = id {
        return tournaments
            .iter()
            .find(|t| t.id == id)
            .ok_or(TournamentError::TournamentNotFound { id });
    }
    let newest = |in_progress_only: bool| {
        tournaments
            .iter()
            .filter(|t| t.is_active)
            .filter(|t| !in_progress_only || t.status == TournamentStatus::InProgress)
            .max_by_key(|t| t.id)
    };
    newest(true)
        .or_else(|| newest(false))
        .ok_or(TournamentError::NoTournament)
}
