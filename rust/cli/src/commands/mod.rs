//! Command handler modules for the crease CLI.
//!
//! Each subcommand lives in its own file with the same shape:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed in, never taken from the process
//! - Errors propagated via the `CliError` enum

mod cfg;
mod create;
mod dashboard;
mod forecast;
mod record;
mod schedule;
mod standings;

pub use cfg::handle_cfg_command;
pub use create::{CreateArgs, handle_create_command};
pub use dashboard::handle_dashboard_command;
pub use forecast::handle_forecast_command;
pub use record::{RecordArgs, handle_record_command};
pub use schedule::handle_schedule_command;
pub use standings::handle_standings_command;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::Config;

/// Seeded generator: the command's `--seed`, then the configured seed, then entropy.
pub(crate) fn rng_for(seed: Option<u64>, config: &Config) -> ChaCha8Rng {
    let s = seed.or(config.seed).unwrap_or_else(rand::random);
    tracing::debug!(seed = s, "random source seeded");
    ChaCha8Rng::seed_from_u64(s)
}
