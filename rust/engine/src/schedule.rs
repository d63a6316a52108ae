//! Round-robin fixture generation.
//!
//! Every unordered pair of participants meets exactly once. For more than four
//! participants the order is searched so that nobody plays two fixtures in a
//! row; the search is bounded and falls back to a plain shuffle when it runs
//! out of budget or proves the constraint unsatisfiable.

use std::time::{Duration, Instant};

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::bracket::build_playoff_placeholders;
use crate::errors::TournamentError;
use crate::model::{normalize_players, Match, Tournament, TournamentStatus};

/// Up to this many participants the order is a plain shuffle.
pub const UNCONSTRAINED_MAX_PLAYERS: usize = 4;

/// Limits for the adjacency search.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    /// Maximum number of placements tried before giving up.
    pub node_budget: u64,
    /// Wall-clock limit for the search (None = unbounded).
    pub time_budget: Option<Duration>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            node_budget: 200_000,
            time_budget: Some(Duration::from_millis(250)),
        }
    }
}

/// All unordered pairs `(i, j)` with `i < j`, in index order.
pub fn round_robin_pairs(count: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(count * count.saturating_sub(1) / 2);
    for i in 0..count {
        for j in i + 1..count {
            pairs.push((i, j));
        }
    }
    pairs
}

fn shares_player(a: (usize, usize), b: (usize, usize)) -> bool {
    a.0 == b.0 || a.0 == b.1 || a.1 == b.0 || a.1 == b.1
}

/// Number of consecutive fixture pairs that share a participant.
pub fn back_to_back_count<T: PartialEq>(fixtures: &[(T, T)]) -> usize {
    fixtures
        .windows(2)
        .filter(|w| {
            let (a, b) = (&w[0], &w[1]);
            a.0 == b.0 || a.0 == b.1 || a.1 == b.0 || a.1 == b.1
        })
        .count()
}

enum Step {
    Found,
    DeadEnd,
    Exhausted,
}

struct Search<'a> {
    pairs: &'a [(usize, usize)],
    candidates: Vec<usize>,
    used: Vec<bool>,
    path: Vec<usize>,
    nodes: u64,
    node_budget: u64,
    deadline: Option<Instant>,
}

impl Search<'_> {
    /// Depth-first over `candidates` with an explicit cursor stack:
    /// `cursors[d]` is the next candidate position to try at depth `d`,
    /// and `path` holds the fixture placed at each shallower depth.
    fn run(&mut self) -> Step {
        let mut cursors: Vec<usize> = vec![0];
        loop {
            if self.path.len() == self.pairs.len() {
                return Step::Found;
            }
            let Some(cursor) = cursors.last_mut() else {
                return Step::DeadEnd;
            };

            let mut chosen = None;
            while *cursor < self.candidates.len() {
                let idx = self.candidates[*cursor];
                *cursor += 1;
                if self.used[idx] {
                    continue;
                }
                if let Some(&last) = self.path.last() {
                    if shares_player(self.pairs[last], self.pairs[idx]) {
                        continue;
                    }
                }
                chosen = Some(idx);
                break;
            }

            match chosen {
                Some(idx) => {
                    self.nodes += 1;
                    if self.nodes > self.node_budget
                        || self.deadline.is_some_and(|d| Instant::now() >= d)
                    {
                        return Step::Exhausted;
                    }
                    self.used[idx] = true;
                    self.path.push(idx);
                    cursors.push(0);
                }
                None => {
                    cursors.pop();
                    if let Some(idx) = self.path.pop() {
                        self.used[idx] = false;
                    }
                }
            }
        }
    }
}

/// Orders the pairings of `pairs` so that no two consecutive fixtures share
/// a participant. Returns `None` when the search exhausts its budget or
/// proves there is no such ordering.
fn search_order<R: Rng + ?Sized>(
    pairs: &[(usize, usize)],
    rng: &mut R,
    config: &SchedulerConfig,
) -> Option<Vec<usize>> {
    let mut candidates: Vec<usize> = (0..pairs.len()).collect();
    candidates.shuffle(rng);
    let mut search = Search {
        pairs,
        candidates,
        used: vec![false; pairs.len()],
        path: Vec::with_capacity(pairs.len()),
        nodes: 0,
        node_budget: config.node_budget,
        deadline: config.time_budget.map(|t| Instant::now() + t),
    };
    let outcome = search.run();
    debug!(nodes = search.nodes, "fixture search finished");
    match outcome {
        Step::Found => Some(search.path),
        Step::DeadEnd | Step::Exhausted => None,
    }
}

/// Produces the ordered league fixtures for `participants`.
///
/// Never fails: if no back-to-back-free order is found within
/// `config`, the fixtures come back in a uniformly shuffled order.
pub fn order_fixtures<R: Rng + ?Sized>(
    participants: &[String],
    rng: &mut R,
    config: &SchedulerConfig,
) -> Vec<(String, String)> {
    let pairs = round_robin_pairs(participants.len());

    let order = if participants.len() <= UNCONSTRAINED_MAX_PLAYERS {
        None
    } else {
        let found = search_order(&pairs, rng, config);
        if found.is_none() {
            warn!(
                players = participants.len(),
                "no back-to-back-free order found, using random order"
            );
        }
        found
    };
    let order = order.unwrap_or_else(|| {
        let mut idx: Vec<usize> = (0..pairs.len()).collect();
        idx.shuffle(rng);
        idx
    });

    order
        .into_iter()
        .map(|k| {
            let (i, j) = pairs[k];
            (participants[i].clone(), participants[j].clone())
        })
        .collect()
}

/// Builds the full match list for a new tournament: league fixtures numbered
/// from 1, followed by the playoff placeholders for `qualifier_count`.
///
/// Match ids mirror the sequence number until a store assigns its own.
///
/// # Errors
///
/// [`TournamentError::TooFewParticipants`] when fewer than two distinct
/// participants are given, [`TournamentError::EmptyPlayerList`] when none are.
///
/// # Examples
///
/// ```
/// use crease_engine::schedule::{generate_schedule, SchedulerConfig};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let players: Vec<String> = ["ana", "ben", "cas", "dev"].iter().map(|s| s.to_string()).collect();
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let matches = generate_schedule(1, &players, 4, &mut rng, &SchedulerConfig::default()).unwrap();
/// assert_eq!(matches.len(), 6 + 4);
/// assert_eq!(matches[6].sequence, 7);
/// ```
pub fn generate_schedule<R: Rng + ?Sized>(
    tournament_id: u64,
    participants: &[String],
    qualifier_count: u8,
    rng: &mut R,
    config: &SchedulerConfig,
) -> Result<Vec<Match>, TournamentError> {
    let mut distinct: Vec<&String> = Vec::with_capacity(participants.len());
    for p in participants {
        if !distinct.contains(&p) {
            distinct.push(p);
        }
    }
    match distinct.len() {
        0 => return Err(TournamentError::EmptyPlayerList),
        1 => return Err(TournamentError::TooFewParticipants { found: 1 }),
        _ => {}
    }
    let distinct: Vec<String> = distinct.into_iter().cloned().collect();

    let mut matches: Vec<Match> = order_fixtures(&distinct, rng, config)
        .iter()
        .zip(1u32..)
        .map(|((home, away), seq)| Match::league(tournament_id, seq, home, away))
        .collect();
    let next = matches.len() as u32 + 1;
    matches.extend(build_playoff_placeholders(tournament_id, qualifier_count, next));
    for m in &mut matches {
        m.id = m.sequence as u64;
    }
    debug!(
        tournament_id,
        league = next - 1,
        total = matches.len(),
        "schedule generated"
    );
    Ok(matches)
}

/// Input for [`create_tournament`].
#[derive(Debug, Clone, Default)]
pub struct NewTournament {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    /// Raw comma-separated player list as entered.
    pub players: String,
    pub qualifier_count: u8,
    /// Opaque identity of the creator, stored for audit only.
    pub created_by: Option<String>,
}

/// Normalizes the player list, stamps creation metadata and generates the
/// schedule for a new tournament.
pub fn create_tournament<R: Rng + ?Sized>(
    new: NewTournament,
    rng: &mut R,
    config: &SchedulerConfig,
) -> Result<Tournament, TournamentError> {
    let players = normalize_players(&new.players)?;
    let matches = generate_schedule(new.id, &players, new.qualifier_count, rng, config)?;
    Ok(Tournament {
        id: new.id,
        name: new.name,
        description: new.description,
        status: TournamentStatus::InProgress,
        players: players.join(","),
        qualifier_count: new.qualifier_count,
        matches,
        is_active: true,
        created_by: new.created_by,
        created_on: Some(Utc::now()),
    })
}
