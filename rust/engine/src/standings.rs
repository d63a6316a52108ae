//! Standings and leaderboards, recomputed from the full match history.
//!
//! Nothing here is stored: every call folds the supplied matches from
//! scratch, so identical input always yields identical output.

use serde::{Deserialize, Serialize};

use crate::bracket::qualification_spots;
use crate::model::Match;
use crate::nrr::{format_nrr, round_to, RunTally};

/// Points awarded for a league win.
pub const POINTS_PER_WIN: u32 = 2;

/// Per-match swing assumed when bounding a team's best or worst net run rate.
const SWING_RUNS_HIGH: u32 = 70;
const SWING_RUNS_LOW: u32 = 20;
const SWING_BALLS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub rank: usize,
    pub team: String,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub points: u32,
    pub net_run_rate: f64,
    pub is_qualified: bool,
}

impl TeamStanding {
    pub fn nrr_display(&self) -> String {
        format_nrr(self.net_run_rate)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopBatsman {
    pub rank: usize,
    pub name: String,
    pub runs: u32,
    pub matches: u32,
    pub average: f64,
    pub strike_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopBowler {
    pub rank: usize,
    pub name: String,
    pub wickets: u32,
    pub matches: u32,
    pub economy: f64,
    pub average: f64,
}

/// Ranked output of [`compute_standings_and_leaderboards`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Leaderboards {
    pub standings: Vec<TeamStanding>,
    pub batsmen: Vec<TopBatsman>,
    pub bowlers: Vec<TopBowler>,
}

#[derive(Debug, Default)]
struct CareerLine {
    bat_runs: u32,
    bat_balls: u32,
    wickets: u32,
    runs_conceded: u32,
    balls_bowled: u32,
    appearances: u32,
}

/// A match contributes to batting and bowling figures once it has a result
/// or any ball has been recorded.
fn has_figures(m: &Match) -> bool {
    m.is_resolved() || m.innings.iter().any(|i| i.balls > 0)
}

/// Computes ranked standings plus batting and bowling leaderboards.
///
/// League matches drive played/won/points and net run rate; batting and
/// bowling figures are taken from every stage. Bowling credits the opponent's
/// innings against this team: its runs, wickets and balls faced.
///
/// Standings sort by points then net run rate, both descending, with ties
/// keeping participant order. `qualifier_count` feeds the certainty flag; a
/// league-only count (anything but 2, 3 or 4) marks nobody as qualified.
pub fn compute_standings_and_leaderboards(
    matches: &[Match],
    participants: &[String],
    qualifier_count: u8,
) -> Leaderboards {
    let mut standings = Vec::with_capacity(participants.len());
    let mut careers = Vec::with_capacity(participants.len());

    for team in participants {
        let mut tally = RunTally::default();
        let mut played = 0;
        let mut won = 0;
        let mut career = CareerLine::default();

        for m in matches.iter().filter(|m| m.involves(team)) {
            let Some(side) = m.side_of(team) else {
                continue;
            };
            if m.is_league() {
                tally.add_match(m, team);
                if m.is_resolved() {
                    played += 1;
                }
                if m.winner() == Some(team.as_str()) {
                    won += 1;
                }
            }
            if has_figures(m) {
                let (own, opp) = m.innings_for(side);
                career.bat_runs += own.runs;
                career.bat_balls += own.balls;
                career.wickets += opp.wickets;
                career.runs_conceded += opp.runs;
                career.balls_bowled += opp.balls;
                career.appearances += 1;
            }
        }

        standings.push(TeamStanding {
            rank: 0,
            team: team.clone(),
            played,
            won,
            lost: played - won,
            points: won * POINTS_PER_WIN,
            net_run_rate: tally.net_run_rate(),
            is_qualified: false,
        });
        careers.push((team.clone(), career));
    }

    standings.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.net_run_rate.total_cmp(&a.net_run_rate))
    });
    for (i, s) in standings.iter_mut().enumerate() {
        s.rank = i + 1;
    }

    let remaining: Vec<&Match> = matches
        .iter()
        .filter(|m| m.is_league() && !m.is_resolved())
        .collect();
    let spots = qualification_spots(qualifier_count);
    let flags: Vec<bool> = standings
        .iter()
        .map(|s| is_team_qualified(s, &standings, &remaining, spots, matches))
        .collect();
    for (s, flag) in standings.iter_mut().zip(flags) {
        s.is_qualified = flag;
    }

    let mut batsmen: Vec<TopBatsman> = careers
        .iter()
        .filter(|(_, c)| c.appearances > 0)
        .map(|(name, c)| TopBatsman {
            rank: 0,
            name: name.clone(),
            runs: c.bat_runs,
            matches: c.appearances,
            average: round_to(c.bat_runs as f64 / c.appearances as f64, 1),
            strike_rate: ratio(c.bat_runs, c.bat_balls, 100.0),
        })
        .collect();
    batsmen.sort_by(|a, b| b.runs.cmp(&a.runs));
    for (i, b) in batsmen.iter_mut().enumerate() {
        b.rank = i + 1;
    }

    let mut bowlers: Vec<TopBowler> = careers
        .iter()
        .filter(|(_, c)| c.appearances > 0)
        .map(|(name, c)| TopBowler {
            rank: 0,
            name: name.clone(),
            wickets: c.wickets,
            matches: c.appearances,
            economy: ratio(c.runs_conceded, c.balls_bowled, 6.0),
            average: ratio(c.runs_conceded, c.wickets, 1.0),
        })
        .collect();
    bowlers.sort_by(|a, b| b.wickets.cmp(&a.wickets));
    for (i, b) in bowlers.iter_mut().enumerate() {
        b.rank = i + 1;
    }

    Leaderboards {
        standings,
        batsmen,
        bowlers,
    }
}

/// `num / den * scale` to one decimal, zero when `den` is zero.
fn ratio(num: u32, den: u32, scale: f64) -> f64 {
    if den == 0 {
        0.0
    } else {
        round_to(num as f64 / den as f64 * scale, 1)
    }
}

/// Remaining league fixtures for `team`.
pub(crate) fn remaining_for(team: &str, remaining: &[&Match]) -> u32 {
    remaining.iter().filter(|m| m.involves(team)).count() as u32
}

/// Run tally over `team`'s resolved league matches.
pub(crate) fn resolved_league_tally(team: &str, matches: &[Match]) -> RunTally {
    let mut tally = RunTally::default();
    for m in matches
        .iter()
        .filter(|m| m.is_league() && m.is_resolved() && m.involves(team))
    {
        tally.add_match(m, team);
    }
    tally
}

fn projected_nrr(base: RunTally, fixtures: u32, runs_for: u32, runs_against: u32) -> f64 {
    let mut t = base;
    t.add(
        fixtures * runs_for,
        fixtures * runs_against,
        fixtures * SWING_BALLS,
        fixtures * SWING_BALLS,
    );
    t.net_run_rate()
}

/// True when `team` sits inside the qualification line and no team below the
/// line can still overtake it on points, or on net run rate at equal points.
pub fn is_team_qualified(
    team: &TeamStanding,
    standings: &[TeamStanding],
    remaining: &[&Match],
    qualification_spots: usize,
    matches: &[Match],
) -> bool {
    if team.rank > qualification_spots {
        return false;
    }

    for below in standings.iter().filter(|s| s.rank > qualification_spots) {
        let fixtures = remaining_for(&below.team, remaining);
        let max_points = below.points + fixtures * POINTS_PER_WIN;

        if max_points > team.points {
            return false;
        }
        if max_points == team.points {
            let best = projected_nrr(
                resolved_league_tally(&below.team, matches),
                fixtures,
                SWING_RUNS_HIGH,
                SWING_RUNS_LOW,
            );
            let worst = projected_nrr(
                resolved_league_tally(&team.team, matches),
                remaining_for(&team.team, remaining),
                SWING_RUNS_LOW,
                SWING_RUNS_HIGH,
            );
            if best > worst {
                return false;
            }
        }
    }

    true
}
