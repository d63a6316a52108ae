use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TournamentError {
    #[error("Player list must not be empty")]
    EmptyPlayerList,
    #[error("At least 2 distinct players are required (found {found})")]
    TooFewParticipants { found: usize },
    #[error("Tournament with ID {id} not found")]
    TournamentNotFound { id: u64 },
    #[error("No tournament available")]
    NoTournament,
    #[error("Match with ID {id} not found")]
    MatchNotFound { id: u64 },
    #[error("Unknown match type: {0}")]
    UnknownMatchKind(String),
    #[error("Unknown toss choice: {0} (expected bat or field)")]
    UnknownTossChoice(String),
}

impl TournamentError {
    /// Whether the error names an absent tournament or match.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TournamentError::TournamentNotFound { .. }
                | TournamentError::NoTournament
                | TournamentError::MatchNotFound { .. }
        )
    }
}
