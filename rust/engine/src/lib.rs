//! # crease-engine: Round-Robin + Playoffs Tournament Core
//!
//! Schedules a single round-robin league between two or more participants,
//! derives standings and net run rate from recorded scorecards, seeds and
//! advances a fixed playoff bracket, and forecasts qualification.
//! Every computation is a pure function of an in-memory [`model::Tournament`]
//! snapshot; randomness is always injected so seeded runs are reproducible.
//!
//! ## Core Modules
//!
//! - [`model`] - Tournament, Match, Slot and the closed stage enum
//! - [`schedule`] - Round-robin fixture generation with back-to-back avoidance
//! - [`nrr`] - Net run rate arithmetic and display
//! - [`standings`] - Standings, leaderboards and qualification certainty
//! - [`bracket`] - Playoff placeholders and slot progression
//! - [`results`] - Recording a scorecard and advancing the bracket
//! - [`forecast`] - Monte Carlo qualification chances
//! - [`dashboard`] - Combined read-only view and tournament selection
//! - [`errors`] - Error type for tournament operations
//!
//! ## Quick Start
//!
//! ```rust
//! use crease_engine::results::{record_result, MatchUpdate};
//! use crease_engine::schedule::{create_tournament, NewTournament, SchedulerConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let mut t = create_tournament(
//!     NewTournament {
//!         id: 1,
//!         name: "Friday Nets".into(),
//!         players: "Ana, Ben, Cas".into(),
//!         qualifier_count: 2,
//!         ..Default::default()
//!     },
//!     &mut rng,
//!     &SchedulerConfig::default(),
//! )
//! .unwrap();
//!
//! // Three league fixtures, then the Final placeholder.
//! assert_eq!(t.matches.len(), 4);
//!
//! let first = t.matches[0].clone();
//! let winner = first.players[0].to_string();
//! let outcome = record_result(
//!     &mut t,
//!     first.id,
//!     MatchUpdate { winner: Some(winner), ..Default::default() },
//! )
//! .unwrap();
//! assert!(outcome.updated.is_resolved());
//! ```

pub mod bracket;
pub mod dashboard;
pub mod errors;
pub mod forecast;
pub mod model;
pub mod nrr;
pub mod results;
pub mod schedule;
pub mod standings;
