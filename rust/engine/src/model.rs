use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::TournamentError;

/// Sentinel written into a playoff slot whose participant is not yet known.
pub const TBD: &str = "TBD";

/// Lifecycle of a tournament. `Completed` is terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
pub enum TournamentStatus {
    #[default]
    InProgress,
    Completed,
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentStatus::InProgress => f.write_str("InProgress"),
            TournamentStatus::Completed => f.write_str("Completed"),
        }
    }
}

/// Stage a match belongs to: the round-robin phase or one of the fixed playoff stages.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum MatchKind {
    League,
    #[serde(rename = "Qualifier 1")]
    Qualifier1,
    Eliminator,
    #[serde(rename = "Qualifier 2")]
    Qualifier2,
    Final,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::League => "League",
            MatchKind::Qualifier1 => "Qualifier 1",
            MatchKind::Eliminator => "Eliminator",
            MatchKind::Qualifier2 => "Qualifier 2",
            MatchKind::Final => "Final",
        }
    }

    pub fn is_playoff(&self) -> bool {
        !matches!(self, MatchKind::League)
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchKind {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "League" => Ok(MatchKind::League),
            "Qualifier 1" => Ok(MatchKind::Qualifier1),
            "Eliminator" => Ok(MatchKind::Eliminator),
            "Qualifier 2" => Ok(MatchKind::Qualifier2),
            "Final" => Ok(MatchKind::Final),
            other => Err(TournamentError::UnknownMatchKind(other.to_string())),
        }
    }
}

/// What the toss winner elected to do.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum TossChoice {
    Bat,
    Field,
}

impl FromStr for TossChoice {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bat" => Ok(TossChoice::Bat),
            "field" => Ok(TossChoice::Field),
            _ => Err(TournamentError::UnknownTossChoice(s.to_string())),
        }
    }
}

impl TryFrom<String> for TossChoice {
    type Error = TournamentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One participant position of a match.
///
/// Serialized as the bare participant identifier, with `"TBD"` standing for
/// a playoff slot that an upstream result has not filled yet.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Slot {
    Tbd,
    Team(String),
}

impl Slot {
    pub fn team(&self) -> Option<&str> {
        match self {
            Slot::Tbd => None,
            Slot::Team(name) => Some(name),
        }
    }

    pub fn is(&self, team: &str) -> bool {
        self.team() == Some(team)
    }

    pub fn is_tbd(&self) -> bool {
        matches!(self, Slot::Tbd)
    }
}

impl From<String> for Slot {
    fn from(value: String) -> Self {
        if value.is_empty() || value == TBD {
            Slot::Tbd
        } else {
            Slot::Team(value)
        }
    }
}

impl From<&str> for Slot {
    fn from(value: &str) -> Self {
        Slot::from(value.to_string())
    }
}

impl From<Slot> for String {
    fn from(slot: Slot) -> Self {
        match slot {
            Slot::Tbd => TBD.to_string(),
            Slot::Team(name) => name,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.team().unwrap_or(TBD))
    }
}

/// A side's batting innings. `wickets` counts wickets that fell while this
/// side batted, so they are credited to the opponent's bowling.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct Innings {
    pub runs: u32,
    pub balls: u32,
    pub wickets: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: u64,
    pub tournament_id: u64,
    /// 1-based position in the schedule, unique within a tournament.
    pub sequence: u32,
    pub kind: MatchKind,
    pub players: [Slot; 2],
    #[serde(default)]
    pub innings: [Innings; 2],
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub toss_winner: Option<String>,
    #[serde(default)]
    pub toss_choice: Option<TossChoice>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Match {
    pub fn new(tournament_id: u64, sequence: u32, kind: MatchKind, players: [Slot; 2]) -> Self {
        Self {
            id: 0,
            tournament_id,
            sequence,
            kind,
            players,
            innings: [Innings::default(); 2],
            winner: None,
            toss_winner: None,
            toss_choice: None,
            description: None,
        }
    }

    pub fn league(tournament_id: u64, sequence: u32, home: &str, away: &str) -> Self {
        Self::new(
            tournament_id,
            sequence,
            MatchKind::League,
            [Slot::from(home), Slot::from(away)],
        )
    }

    pub fn placeholder(tournament_id: u64, sequence: u32, kind: MatchKind) -> Self {
        Self::new(tournament_id, sequence, kind, [Slot::Tbd, Slot::Tbd])
    }

    /// The winner, ignoring an empty identifier.
    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref().filter(|w| !w.is_empty())
    }

    pub fn is_resolved(&self) -> bool {
        self.winner().is_some()
    }

    pub fn is_league(&self) -> bool {
        self.kind == MatchKind::League
    }

    pub fn involves(&self, team: &str) -> bool {
        self.players.iter().any(|p| p.is(team))
    }

    /// Index (0 or 1) of `team` in this match.
    pub fn side_of(&self, team: &str) -> Option<usize> {
        self.players.iter().position(|p| p.is(team))
    }

    /// The participant who did not win, when the match is resolved.
    pub fn loser(&self) -> Option<&str> {
        let winner = self.winner()?;
        if self.players[0].is(winner) {
            self.players[1].team()
        } else if self.players[1].is(winner) {
            self.players[0].team()
        } else {
            None
        }
    }

    /// Innings of `side` followed by the opponent's innings.
    pub fn innings_for(&self, side: usize) -> (Innings, Innings) {
        (self.innings[side], self.innings[1 - side])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TournamentStatus,
    /// Comma-joined participant identifiers in schedule order.
    pub players: String,
    pub qualifier_count: u8,
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl Tournament {
    pub fn participants(&self) -> Vec<String> {
        split_players(&self.players)
    }

    pub fn league_matches(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(|m| m.is_league())
    }

    pub fn league_complete(&self) -> bool {
        self.league_matches().all(Match::is_resolved)
    }

    pub fn match_by_id(&self, id: u64) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn stage_mut(&mut self, kind: MatchKind) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| m.kind == kind)
    }
}

/// Splits a comma-joined player list, trimming entries and dropping empties.
pub fn split_players(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalizes a raw player list: trimmed, lowercased, deduplicated with the
/// first occurrence kept in place.
///
/// # Errors
///
/// - [`TournamentError::EmptyPlayerList`] when nothing but separators or whitespace is given
/// - [`TournamentError::TooFewParticipants`] when fewer than two distinct players remain
///
/// # Examples
///
/// ```
/// use crease_engine::model::normalize_players;
///
/// let players = normalize_players(" Alice,bob, ALICE ,carol").unwrap();
/// assert_eq!(players, vec!["alice", "bob", "carol"]);
/// assert!(normalize_players("solo, SOLO").is_err());
/// ```
pub fn normalize_players(raw: &str) -> Result<Vec<String>, TournamentError> {
    let mut players: Vec<String> = Vec::new();
    for p in split_players(raw) {
        let p = p.to_lowercase();
        if !players.contains(&p) {
            players.push(p);
        }
    }
    match players.len() {
        0 => Err(TournamentError::EmptyPlayerList),
        1 => Err(TournamentError::TooFewParticipants { found: 1 }),
        _ => Ok(players),
    }
}
