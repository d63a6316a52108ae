//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crease_engine::model::TossChoice;

/// Store used when `--store` is not given.
pub const DEFAULT_STORE: &str = "tournaments.json";

#[derive(Parser, Debug)]
#[command(
    name = "crease",
    version,
    about = "Round-robin league and playoff manager for short-format cricket"
)]
pub struct CreaseCli {
    /// Tournament store (JSON)
    #[arg(long, global = true, default_value = DEFAULT_STORE)]
    pub store: PathBuf,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a tournament and generate its schedule
    Create {
        #[arg(long)]
        name: String,
        /// Comma-separated participants
        #[arg(long)]
        players: String,
        /// Playoff qualifiers: 2, 3 or 4 (anything else is league only)
        #[arg(long, default_value_t = 4)]
        qualifiers: u8,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        created_by: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Record or correct a match scorecard
    Record {
        /// Tournament id (defaults to the current tournament)
        #[arg(long)]
        tournament: Option<u64>,
        #[arg(long = "match")]
        match_id: u64,
        #[arg(long, default_value_t = 0)]
        runs1: u32,
        #[arg(long, default_value_t = 0)]
        balls1: u32,
        #[arg(long, default_value_t = 0)]
        wickets1: u32,
        #[arg(long, default_value_t = 0)]
        runs2: u32,
        #[arg(long, default_value_t = 0)]
        balls2: u32,
        #[arg(long, default_value_t = 0)]
        wickets2: u32,
        #[arg(long)]
        winner: Option<String>,
        #[arg(long)]
        toss_winner: Option<String>,
        /// bat or field
        #[arg(long, value_parser = parse_toss_choice)]
        toss_choice: Option<TossChoice>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Show standings and leaderboards
    Standings {
        #[arg(long)]
        tournament: Option<u64>,
        #[arg(long)]
        json: bool,
    },
    /// Estimate qualification chances
    Forecast {
        #[arg(long)]
        tournament: Option<u64>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        trials: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        json: bool,
    },
    /// Print the full dashboard as JSON
    Dashboard {
        #[arg(long)]
        tournament: Option<u64>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        trials: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show a stored schedule, or preview one for a player list
    Schedule {
        #[arg(long, conflicts_with = "players")]
        tournament: Option<u64>,
        /// Comma-separated participants to preview
        #[arg(long)]
        players: Option<String>,
        #[arg(long, default_value_t = 4)]
        qualifiers: u8,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Display configuration settings
    Cfg,
}

fn parse_toss_choice(s: &str) -> Result<TossChoice, String> {
    s.parse::<TossChoice>().map_err(|e| e.to_string())
}
