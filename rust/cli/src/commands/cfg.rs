//! Configuration command handler.
//!
//! Prints the resolved configuration with the source of every value
//! (default, config file named by `CREASE_CONFIG`, or environment).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "trials": {
//!     "value": 10000,
//!     "source": "default"
//!   },
//!   "seed": {
//!     "value": 42,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources()?;

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "trials": {
            "value": config.trials,
            "source": sources.trials,
        },
        "chunk_size": {
            "value": config.chunk_size,
            "source": sources.chunk_size,
        },
        "backtrack_node_budget": {
            "value": config.backtrack_node_budget,
            "source": sources.backtrack_node_budget,
        },
        "backtrack_time_ms": {
            "value": config.backtrack_time_ms,
            "source": sources.backtrack_time_ms,
        },
        "forecast_time_ms": {
            "value": config.forecast_time_ms,
            "source": sources.forecast_time_ms,
        }
    });
    let json_str = serde_json::to_string_pretty(&display)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
