//! Qualification forecasting.
//!
//! Two views per team: a closed-form answer (already qualified, still able to
//! qualify) and a Monte Carlo estimate of finishing in the top two and the top
//! four. The simulation replays every unresolved league fixture with a
//! synthetic scorecard and re-ranks the table by points and net run rate.
//!
//! Trials are split into fixed-size chunks that run on rayon's pool. Every
//! chunk owns a `ChaCha8Rng` seeded from the caller's random source, so a
//! seeded source gives the same estimate whatever the thread count.

use std::fmt;
use std::time::{Duration, Instant};

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bracket::qualification_spots;
use crate::model::{Match, Slot};
use crate::nrr::RunTally;
use crate::standings::{
    is_team_qualified, remaining_for, resolved_league_tally, TeamStanding, POINTS_PER_WIN,
};

/// Balls faced by a side that bats its full allotment in a simulated match.
const SIM_FULL_INNINGS: u32 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastConfig {
    pub trials: u32,
    /// Trials per rayon task. Fixed so results do not depend on thread count.
    pub chunk_size: u32,
    /// Stop starting new trials after this long. The estimate then covers
    /// completed trials only.
    pub time_budget: Option<Duration>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            trials: 10_000,
            chunk_size: 500,
            time_budget: None,
        }
    }
}

/// Banded label for a top-four percentage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum QualificationStatus {
    #[serde(rename = "Almost Certain")]
    AlmostCertain,
    #[serde(rename = "Very Likely")]
    VeryLikely,
    #[serde(rename = "Good Chance")]
    GoodChance,
    Possible,
    Unlikely,
    #[serde(rename = "Very Unlikely")]
    VeryUnlikely,
}

impl QualificationStatus {
    pub fn from_chance(top4_chance: u32) -> Self {
        match top4_chance {
            c if c >= 90 => QualificationStatus::AlmostCertain,
            c if c >= 70 => QualificationStatus::VeryLikely,
            c if c >= 50 => QualificationStatus::GoodChance,
            c if c >= 30 => QualificationStatus::Possible,
            c if c >= 15 => QualificationStatus::Unlikely,
            _ => QualificationStatus::VeryUnlikely,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QualificationStatus::AlmostCertain => "Almost Certain",
            QualificationStatus::VeryLikely => "Very Likely",
            QualificationStatus::GoodChance => "Good Chance",
            QualificationStatus::Possible => "Possible",
            QualificationStatus::Unlikely => "Unlikely",
            QualificationStatus::VeryUnlikely => "Very Unlikely",
        }
    }
}

impl fmt::Display for QualificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualificationChance {
    pub team: String,
    pub top2_chance: u32,
    pub top4_chance: u32,
    pub status: QualificationStatus,
    pub is_qualified: bool,
    pub can_qualify: bool,
}

/// Starting position of one team for every trial.
#[derive(Debug, Clone, Copy)]
struct Baseline {
    points: u32,
    tally: RunTally,
}

/// Remaining fixture as indices into the baseline table.
type Fixture = (usize, usize);

#[derive(Debug, Clone)]
struct FinishCounts {
    trials: u32,
    top2: Vec<u32>,
    top4: Vec<u32>,
}

impl FinishCounts {
    fn new(teams: usize) -> Self {
        Self {
            trials: 0,
            top2: vec![0; teams],
            top4: vec![0; teams],
        }
    }

    fn merge(mut self, other: FinishCounts) -> FinishCounts {
        self.trials += other.trials;
        for (a, b) in self.top2.iter_mut().zip(&other.top2) {
            *a += b;
        }
        for (a, b) in self.top4.iter_mut().zip(&other.top4) {
            *a += b;
        }
        self
    }

    fn percent(&self, count: u32) -> u32 {
        if self.trials == 0 {
            0
        } else {
            (count as f64 / self.trials as f64 * 100.0).round() as u32
        }
    }
}

/// One side's simulated innings total.
fn simulate_innings<R: Rng>(rng: &mut R) -> u32 {
    let base = rng.random_range(35..=55);
    let outlier: f64 = rng.random();
    if outlier < 0.1 {
        rng.random_range(20..=34)
    } else if outlier > 0.9 {
        rng.random_range(55..=70)
    } else {
        base
    }
}

fn simulate_trial<R: Rng>(
    baseline: &[Baseline],
    fixtures: &[Fixture],
    rng: &mut R,
    counts: &mut FinishCounts,
) {
    let mut table: Vec<Baseline> = baseline.to_vec();

    for &(home, away) in fixtures {
        let home_runs = simulate_innings(rng);
        let away_runs = simulate_innings(rng);
        let home_balls = SIM_FULL_INNINGS;
        let away_balls = if away_runs > home_runs {
            rng.random_range(18..=29)
        } else {
            SIM_FULL_INNINGS
        };

        let (home_pts, away_pts) = match home_runs.cmp(&away_runs) {
            std::cmp::Ordering::Greater => (POINTS_PER_WIN, 0),
            std::cmp::Ordering::Less => (0, POINTS_PER_WIN),
            std::cmp::Ordering::Equal => (1, 1),
        };

        table[home].points += home_pts;
        table[home]
            .tally
            .add(home_runs, away_runs, home_balls, away_balls);
        table[away].points += away_pts;
        table[away]
            .tally
            .add(away_runs, home_runs, away_balls, home_balls);
    }

    let nrr: Vec<f64> = table.iter().map(|b| b.tally.net_run_rate()).collect();
    let mut order: Vec<usize> = (0..table.len()).collect();
    order.sort_by(|&a, &b| {
        table[b]
            .points
            .cmp(&table[a].points)
            .then_with(|| nrr[b].total_cmp(&nrr[a]))
    });

    for (position, &team) in order.iter().enumerate() {
        if position < 2 {
            counts.top2[team] += 1;
        }
        if position < 4 {
            counts.top4[team] += 1;
        }
    }
    counts.trials += 1;
}

/// Closed-form possibility: `team` can still reach the points held by whoever
/// would take the last qualification place among the other teams.
pub fn can_qualify(
    team: &TeamStanding,
    standings: &[TeamStanding],
    remaining: &[&Match],
    qualification_spots: usize,
) -> bool {
    if qualification_spots == 0 {
        return false;
    }
    let max_points = team.points + remaining_for(&team.team, remaining) * POINTS_PER_WIN;
    let mut others: Vec<u32> = standings
        .iter()
        .filter(|s| s.team != team.team)
        .map(|s| s.points)
        .collect();
    if others.len() < qualification_spots {
        return true;
    }
    others.sort_unstable_by(|a, b| b.cmp(a));
    max_points >= others[qualification_spots - 1]
}

/// Forecasts every team in `standings`.
///
/// `remaining` are the unresolved league fixtures and `all_league` every
/// league match, used for the resolved run tallies that trials start from.
/// One trial set is shared by all teams, so the top-two counts of a trial
/// always sum to two.
pub fn forecast_qualification<R: Rng + ?Sized>(
    standings: &[TeamStanding],
    remaining: &[&Match],
    all_league: &[Match],
    qualifier_count: u8,
    rng: &mut R,
    config: &ForecastConfig,
) -> Vec<QualificationChance> {
    let baseline: Vec<Baseline> = standings
        .iter()
        .map(|s| Baseline {
            points: s.points,
            tally: resolved_league_tally(&s.team, all_league),
        })
        .collect();

    let index_of = |slot: &Slot| {
        slot.team()
            .and_then(|t| standings.iter().position(|s| s.team == t))
    };
    let fixtures: Vec<Fixture> = remaining
        .iter()
        .filter_map(|m| Some((index_of(&m.players[0])?, index_of(&m.players[1])?)))
        .collect();

    let chunk = config.chunk_size.max(1);
    let chunks = config.trials.div_ceil(chunk);
    let seeds: Vec<(u32, u64)> = (0..chunks)
        .map(|i| {
            let size = chunk.min(config.trials - i * chunk);
            (size, rng.next_u64())
        })
        .collect();
    let deadline = config.time_budget.map(|t| Instant::now() + t);

    let counts = seeds
        .into_par_iter()
        .map(|(size, seed)| {
            let mut chunk_rng = ChaCha8Rng::seed_from_u64(seed);
            let mut counts = FinishCounts::new(baseline.len());
            for _ in 0..size {
                if deadline.is_some_and(|d| Instant::now() >= d) {
                    break;
                }
                simulate_trial(&baseline, &fixtures, &mut chunk_rng, &mut counts);
            }
            counts
        })
        .reduce(|| FinishCounts::new(baseline.len()), FinishCounts::merge);

    debug!(
        requested = config.trials,
        completed = counts.trials,
        fixtures = fixtures.len(),
        "qualification forecast finished"
    );

    let spots = qualification_spots(qualifier_count);
    standings
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let top4_chance = counts.percent(counts.top4[i]);
            QualificationChance {
                team: s.team.clone(),
                top2_chance: counts.percent(counts.top2[i]),
                top4_chance,
                status: QualificationStatus::from_chance(top4_chance),
                is_qualified: is_team_qualified(s, standings, remaining, spots, all_league),
                can_qualify: can_qualify(s, standings, remaining, spots),
            }
        })
        .collect()
}
