//! Playoff bracket: placeholder construction and slot progression.
//!
//! The bracket shape is fixed by the qualifier count. Slots start as
//! [`Slot::Tbd`], are filled from final league standings or upstream playoff
//! results, and the tournament completes when the Final has a winner.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::model::{Match, MatchKind, Slot, Tournament, TournamentStatus};
use crate::standings::TeamStanding;

use MatchKind::{Eliminator, Final, Qualifier1, Qualifier2};

/// Playoff stages, in schedule order, for a qualifier count.
/// Counts other than 2, 3 or 4 produce a league-only tournament.
pub fn playoff_stages(qualifier_count: u8) -> &'static [MatchKind] {
    match qualifier_count {
        2 => &[Final],
        3 => &[Qualifier1, Eliminator, Final],
        4 => &[Qualifier1, Eliminator, Qualifier2, Final],
        _ => &[],
    }
}

/// Number of places that lead into the playoffs; zero for a league-only count.
pub fn qualification_spots(qualifier_count: u8) -> usize {
    if playoff_stages(qualifier_count).is_empty() {
        0
    } else {
        usize::from(qualifier_count)
    }
}

/// Playoff placeholders with both slots TBD, numbered from `first_sequence`.
pub fn build_playoff_placeholders(
    tournament_id: u64,
    qualifier_count: u8,
    first_sequence: u32,
) -> Vec<Match> {
    playoff_stages(qualifier_count)
        .iter()
        .zip(first_sequence..)
        .map(|(&kind, seq)| Match::placeholder(tournament_id, seq, kind))
        .collect()
}

/// Which participant of a resolved playoff match moves on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    Winner,
    Loser,
}

/// One edge of the advancement topology.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Route {
    pub from: MatchKind,
    pub outcome: Outcome,
    pub to: MatchKind,
    /// Destination slot index (0 or 1).
    pub slot: usize,
}

const fn route(from: MatchKind, outcome: Outcome, to: MatchKind, slot: usize) -> Route {
    Route {
        from,
        outcome,
        to,
        slot,
    }
}

const ROUTES_3: &[Route] = &[
    route(Qualifier1, Outcome::Loser, Eliminator, 1),
    route(Qualifier1, Outcome::Winner, Final, 0),
    route(Eliminator, Outcome::Winner, Final, 1),
];

const ROUTES_4: &[Route] = &[
    route(Qualifier1, Outcome::Loser, Qualifier2, 0),
    route(Qualifier1, Outcome::Winner, Final, 0),
    route(Eliminator, Outcome::Winner, Qualifier2, 1),
    route(Qualifier2, Outcome::Winner, Final, 1),
];

/// Advancement edges for a qualifier count.
pub fn routes(qualifier_count: u8) -> &'static [Route] {
    match qualifier_count {
        3 => ROUTES_3,
        4 => ROUTES_4,
        _ => &[],
    }
}

/// Standings positions (0-based) seeded into each stage once the league ends.
/// `None` leaves the slot TBD for an upstream result.
type Seeding = (MatchKind, [Option<usize>; 2]);

const SEEDS_2: &[Seeding] = &[(Final, [Some(0), Some(1)])];

const SEEDS_3: &[Seeding] = &[
    (Qualifier1, [Some(0), Some(1)]),
    (Eliminator, [Some(2), None]),
    (Final, [None, None]),
];

const SEEDS_4: &[Seeding] = &[
    (Qualifier1, [Some(0), Some(1)]),
    (Eliminator, [Some(2), Some(3)]),
    (Qualifier2, [None, None]),
    (Final, [None, None]),
];

fn seeding(qualifier_count: u8) -> &'static [Seeding] {
    match qualifier_count {
        2 => SEEDS_2,
        3 => SEEDS_3,
        4 => SEEDS_4,
        _ => &[],
    }
}

/// What a call to [`advance_bracket`] changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BracketEvent {
    Seeded {
        stage: MatchKind,
        players: [Slot; 2],
    },
    SlotFilled {
        stage: MatchKind,
        slot: usize,
        team: String,
    },
    Completed {
        champion: String,
    },
}

/// Moves the bracket forward after `updated` received a result.
///
/// - When every league match is resolved and `updated` is a league match,
///   playoff slots are (re)seeded from `standings` rank order. Slots fed by
///   other playoff matches go back to TBD. Once any playoff match has a
///   result the bracket is fixed and league corrections no longer reseed it.
/// - When `updated` is a resolved playoff match, its winner and loser are
///   routed into downstream slots. A resolved Final completes the tournament.
///
/// Matches are mutated in place; the returned events describe each change.
pub fn advance_bracket(
    tournament: &mut Tournament,
    standings: &[TeamStanding],
    updated: &Match,
) -> Vec<BracketEvent> {
    let qualifiers = tournament.qualifier_count;
    let mut events = Vec::new();

    if updated.is_league() {
        if playoffs_started(tournament) {
            debug!(
                tournament_id = tournament.id,
                "playoffs under way, league correction leaves the bracket as is"
            );
        } else if tournament.league_complete() {
            seed_playoffs(tournament, standings, qualifiers, &mut events);
        }
        return events;
    }

    let Some(winner) = updated.winner().map(str::to_string) else {
        return events;
    };
    let loser = updated.loser().map(str::to_string);

    for r in routes(qualifiers).iter().filter(|r| r.from == updated.kind) {
        let team = match r.outcome {
            Outcome::Winner => Some(winner.clone()),
            Outcome::Loser => loser.clone(),
        };
        let (Some(team), Some(target)) = (team, tournament.stage_mut(r.to)) else {
            continue;
        };
        target.players[r.slot] = Slot::Team(team.clone());
        info!(from = %r.from, to = %r.to, slot = r.slot, team = %team, "playoff slot filled");
        events.push(BracketEvent::SlotFilled {
            stage: r.to,
            slot: r.slot,
            team,
        });
    }

    if updated.kind == Final && tournament.status != TournamentStatus::Completed {
        tournament.status = TournamentStatus::Completed;
        info!(tournament_id = tournament.id, champion = %winner, "tournament completed");
        events.push(BracketEvent::Completed { champion: winner });
    }

    events
}

fn playoffs_started(tournament: &Tournament) -> bool {
    tournament.status == TournamentStatus::Completed
        || tournament
            .matches
            .iter()
            .any(|m| m.kind.is_playoff() && m.is_resolved())
}

fn seed_playoffs(
    tournament: &mut Tournament,
    standings: &[TeamStanding],
    qualifiers: u8,
    events: &mut Vec<BracketEvent>,
) {
    let mut ranked: Vec<&TeamStanding> = standings.iter().collect();
    ranked.sort_by_key(|s| s.rank);

    for (stage, positions) in seeding(qualifiers) {
        let Some(target) = tournament.stage_mut(*stage) else {
            continue;
        };
        let players = positions.map(|pos| {
            pos.and_then(|p| ranked.get(p))
                .map(|s| Slot::Team(s.team.clone()))
                .unwrap_or(Slot::Tbd)
        });
        target.players = players.clone();
        info!(stage = %stage, home = %players[0], away = %players[1], "playoff seeded");
        events.push(BracketEvent::Seeded {
            stage: *stage,
            players,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_follow_qualifier_count() {
        assert_eq!(playoff_stages(2), &[Final]);
        assert_eq!(playoff_stages(3), &[Qualifier1, Eliminator, Final]);
        assert_eq!(
            playoff_stages(4),
            &[Qualifier1, Eliminator, Qualifier2, Final]
        );
        assert!(playoff_stages(0).is_empty());
        assert!(playoff_stages(5).is_empty());
    }

    #[test]
    fn placeholders_continue_numbering() {
        let ms = build_playoff_placeholders(9, 4, 11);
        let seqs: Vec<u32> = ms.iter().map(|m| m.sequence).collect();
        assert_eq!(seqs, vec![11, 12, 13, 14]);
        assert!(ms.iter().all(|m| m.players.iter().all(Slot::is_tbd)));
        assert!(ms.iter().all(|m| m.tournament_id == 9));
    }

    #[test]
    fn every_route_targets_a_later_stage_of_the_same_bracket() {
        for q in [3u8, 4] {
            let stages = playoff_stages(q);
            for r in routes(q) {
                let from = stages.iter().position(|s| *s == r.from).unwrap();
                let to = stages.iter().position(|s| *s == r.to).unwrap();
                assert!(to > from, "{:?} must feed forward", r);
                assert!(r.slot < 2);
            }
        }
    }
}
