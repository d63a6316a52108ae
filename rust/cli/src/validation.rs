//! Scorecard checks applied before a result reaches the engine.
//!
//! The engine accepts any scorecard; these checks reject entries a scorer
//! would never mean, such as a winner who did not play in the match.

use crease_engine::model::Match;
use crease_engine::results::{MatchUpdate, WICKETS_PER_INNINGS};

/// Validate `update` against the stored match it will overwrite.
///
/// Participant names are compared case-insensitively, matching how player
/// lists are normalized at creation. On success the returned update carries
/// the stored spelling.
///
/// # Example
///
/// ```rust
/// # use crease_cli::validation::validate_update;
/// use crease_engine::model::Match;
/// use crease_engine::results::MatchUpdate;
///
/// let m = Match::league(1, 1, "ana", "ben");
/// let update = MatchUpdate { winner: Some("ANA".into()), ..Default::default() };
/// let checked = validate_update(&m, update).unwrap();
/// assert_eq!(checked.winner.as_deref(), Some("ana"));
///
/// let bad = MatchUpdate { winner: Some("cas".into()), ..Default::default() };
/// assert!(validate_update(&m, bad).is_err());
/// ```
pub fn validate_update(m: &Match, mut update: MatchUpdate) -> Result<MatchUpdate, String> {
    let winner_given = update
        .winner
        .as_deref()
        .is_some_and(|w| !w.trim().is_empty());
    if winner_given && m.players.iter().any(|p| p.is_tbd()) {
        return Err(format!(
            "match #{} has no opponents yet ({} v {})",
            m.sequence, m.players[0], m.players[1]
        ));
    }

    update.winner = canonical(m, update.winner, "winner")?;
    update.toss_winner = canonical(m, update.toss_winner, "toss winner")?;

    for (side, innings) in update.innings.iter().enumerate() {
        if innings.wickets > WICKETS_PER_INNINGS {
            return Err(format!(
                "side {} lost {} wickets, at most {} allowed",
                side + 1,
                innings.wickets,
                WICKETS_PER_INNINGS
            ));
        }
        if innings.runs > 0 && innings.balls == 0 {
            return Err(format!("side {} scored runs without facing a ball", side + 1));
        }
    }
    Ok(update)
}

fn canonical(m: &Match, name: Option<String>, role: &str) -> Result<Option<String>, String> {
    let Some(name) = name.map(|n| n.trim().to_lowercase()).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    m.players
        .iter()
        .filter_map(|p| p.team())
        .find(|p| p.to_lowercase() == name)
        .map(|p| Some(p.to_string()))
        .ok_or_else(|| {
            format!(
                "{} '{}' is not playing match #{} ({} v {})",
                role, name, m.sequence, m.players[0], m.players[1]
            )
        })
}
