//! # Crease CLI Library
//!
//! Command-line front end for the `crease_engine` tournament engine. All
//! tournaments live in one JSON store file (`--store`, default
//! `tournaments.json`).
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["crease", "create", "--name", "Cup", "--players", "ana,ben,cas,dev"];
//! let code = crease_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `create`: Register a tournament and generate its schedule
//! - `record`: Record or correct a match scorecard
//! - `standings`: Points table and leaderboards
//! - `forecast`: Qualification chances from simulated results
//! - `dashboard`: Everything above as one JSON document
//! - `schedule`: Show a stored schedule or preview a new one
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
#[macro_use]
mod macros;
pub mod ui;
pub mod validation;

use cli::{Commands, CreaseCli};
use commands::{
    CreateArgs, RecordArgs, handle_cfg_command, handle_create_command, handle_dashboard_command,
    handle_forecast_command, handle_record_command, handle_schedule_command,
    handle_standings_command,
};
use crease_engine::model::Innings;

pub use error::CliError;

const COMMANDS: &[&str] = &[
    "create",
    "record",
    "standings",
    "forecast",
    "dashboard",
    "schedule",
    "cfg",
];

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["crease", "--help"];
/// let code = crease_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match CreaseCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version go to stdout with a clean exit
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                if write!(out, "{}", e).is_err() {
                    return exit_code::ERROR;
                }
                return exit_code::SUCCESS;
            }
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "Crease Tournament CLI");
            write_or_exit!(err, "Usage: crease <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in COMMANDS {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: crease --help");
            return exit_code::ERROR;
        }
    };

    let store = cli.store;
    let result = match cli.cmd {
        Commands::Create {
            name,
            players,
            qualifiers,
            description,
            created_by,
            seed,
        } => handle_create_command(
            &store,
            CreateArgs {
                name,
                players,
                qualifiers,
                description,
                created_by,
                seed,
            },
            out,
            err,
        ),
        Commands::Record {
            tournament,
            match_id,
            runs1,
            balls1,
            wickets1,
            runs2,
            balls2,
            wickets2,
            winner,
            toss_winner,
            toss_choice,
            description,
        } => handle_record_command(
            &store,
            RecordArgs {
                tournament,
                match_id,
                innings: [
                    Innings {
                        runs: runs1,
                        balls: balls1,
                        wickets: wickets1,
                    },
                    Innings {
                        runs: runs2,
                        balls: balls2,
                        wickets: wickets2,
                    },
                ],
                winner,
                toss_winner,
                toss_choice,
                description,
            },
            out,
        ),
        Commands::Standings { tournament, json } => {
            handle_standings_command(&store, tournament, json, out)
        }
        Commands::Forecast {
            tournament,
            trials,
            seed,
            json,
        } => handle_forecast_command(&store, tournament, trials, seed, json, out),
        Commands::Dashboard {
            tournament,
            trials,
            seed,
        } => handle_dashboard_command(&store, tournament, trials, seed, out),
        Commands::Schedule {
            tournament,
            players,
            qualifiers,
            seed,
        } => handle_schedule_command(&store, tournament, players, qualifiers, seed, out),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}
