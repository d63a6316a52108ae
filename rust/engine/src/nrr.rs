//! Net run rate arithmetic shared by standings, certainty checks and the forecaster.

use crate::model::Match;

const BALLS_PER_OVER: f64 = 6.0;

/// Aggregate runs and balls for one team, from its own batting and bowling.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct RunTally {
    pub runs_for: u32,
    pub runs_against: u32,
    pub balls_faced: u32,
    pub balls_bowled: u32,
}

impl RunTally {
    /// Folds one match into the tally from `team`'s point of view.
    /// Matches not involving `team` are ignored.
    pub fn add_match(&mut self, m: &Match, team: &str) {
        if let Some(side) = m.side_of(team) {
            let (own, opp) = m.innings_for(side);
            self.add(own.runs, opp.runs, own.balls, opp.balls);
        }
    }

    pub fn add(&mut self, runs_for: u32, runs_against: u32, balls_faced: u32, balls_bowled: u32) {
        self.runs_for += runs_for;
        self.runs_against += runs_against;
        self.balls_faced += balls_faced;
        self.balls_bowled += balls_bowled;
    }

    pub fn net_run_rate(&self) -> f64 {
        net_run_rate(
            self.runs_for,
            self.runs_against,
            self.balls_faced,
            self.balls_bowled,
        )
    }
}

/// Run rate scored minus run rate conceded, rounded to 3 decimals.
///
/// Zero when either side has no balls recorded.
///
/// ```
/// use crease_engine::nrr::net_run_rate;
///
/// assert_eq!(net_run_rate(60, 30, 30, 30), 6.0);
/// assert_eq!(net_run_rate(60, 30, 0, 30), 0.0);
/// ```
pub fn net_run_rate(runs_for: u32, runs_against: u32, balls_faced: u32, balls_bowled: u32) -> f64 {
    if balls_faced == 0 || balls_bowled == 0 {
        return 0.0;
    }
    let overs_faced = balls_faced as f64 / BALLS_PER_OVER;
    let overs_bowled = balls_bowled as f64 / BALLS_PER_OVER;
    round_to(runs_for as f64 / overs_faced - runs_against as f64 / overs_bowled, 3)
}

/// Signed display form: `+1.234`, `-0.500`, and `0.000` for zero.
pub fn format_nrr(nrr: f64) -> String {
    if nrr == 0.0 {
        "0.000".to_string()
    } else {
        format!("{:+.3}", nrr)
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
