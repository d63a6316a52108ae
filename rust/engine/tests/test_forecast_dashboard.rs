use crease_engine::dashboard::{build_dashboard, TournamentHighlights};
use crease_engine::forecast::{
    forecast_qualification, ForecastConfig, QualificationChance, QualificationStatus,
};
use crease_engine::model::{Innings, Match, Tournament, TournamentStatus};
use crease_engine::standings::compute_standings_and_leaderboards;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn result(seq: u32, home: &str, away: &str, winner: &str, runs: [u32; 2]) -> Match {
    let mut m = Match::league(1, seq, home, away);
    m.id = seq as u64;
    m.innings = [
        Innings {
            runs: runs[0],
            balls: 30,
            wickets: 5,
        },
        Innings {
            runs: runs[1],
            balls: 30,
            wickets: 6,
        },
    ];
    m.winner = Some(winner.to_string());
    m
}

fn fixture(seq: u32, home: &str, away: &str) -> Match {
    let mut m = Match::league(1, seq, home, away);
    m.id = seq as u64;
    m
}

/// Five teams, seven of ten league matches played. "e" has lost all three of
/// its games and has one left.
fn half_played() -> Tournament {
    let matches = vec![
        result(1, "a", "b", "a", [60, 40]),
        result(2, "c", "d", "c", [55, 50]),
        result(3, "a", "e", "a", [70, 30]),
        result(4, "b", "c", "b", [48, 47]),
        result(5, "d", "e", "d", [52, 35]),
        result(6, "a", "c", "a", [50, 45]),
        result(7, "b", "e", "b", [44, 41]),
        fixture(8, "a", "d"),
        fixture(9, "b", "d"),
        fixture(10, "c", "e"),
    ];
    Tournament {
        id: 1,
        name: "Forecast Cup".into(),
        description: None,
        status: TournamentStatus::InProgress,
        players: "a,b,c,d,e".into(),
        qualifier_count: 4,
        matches,
        is_active: true,
        created_by: None,
        created_on: None,
    }
}

fn config(trials: u32) -> ForecastConfig {
    ForecastConfig {
        trials,
        chunk_size: 97,
        time_budget: None,
    }
}

fn forecast(t: &Tournament, seed: u64, trials: u32) -> Vec<QualificationChance> {
    let boards =
        compute_standings_and_leaderboards(&t.matches, &t.participants(), t.qualifier_count);
    let league: Vec<Match> = t.league_matches().cloned().collect();
    let remaining: Vec<&Match> = league.iter().filter(|m| !m.is_resolved()).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    forecast_qualification(
        &boards.standings,
        &remaining,
        &league,
        t.qualifier_count,
        &mut rng,
        &config(trials),
    )
}

#[test]
fn forecast_is_deterministic_for_a_seed() {
    let t = half_played();
    assert_eq!(forecast(&t, 31, 2_000), forecast(&t, 31, 2_000));
}

#[test]
fn forecast_percentages_are_bounded_and_consistent() {
    let t = half_played();
    let chances = forecast(&t, 8, 3_000);
    assert_eq!(chances.len(), 5);
    for c in &chances {
        assert!(c.top2_chance <= c.top4_chance, "{c:?}");
        assert!(c.top4_chance <= 100);
        assert_eq!(c.status, QualificationStatus::from_chance(c.top4_chance));
    }
    // Top-two finishes sum to two per trial, up to rounding.
    let top2: u32 = chances.iter().map(|c| c.top2_chance).sum();
    assert!((195..=205).contains(&top2), "top2 sum {top2}");
}

#[test]
fn trailing_team_keeps_a_possibility() {
    let t = half_played();
    let chances = forecast(&t, 3, 1_000);
    // e can still reach 2 points, level with c and d.
    let e = chances.iter().find(|c| c.team == "e").expect("e present");
    assert!(e.can_qualify);
    assert!(!e.is_qualified);

    // Only b and d can still reach a's 6 points.
    let a = chances.iter().find(|c| c.team == "a").expect("a present");
    assert_eq!(a.top4_chance, 100);
    assert!(a.is_qualified);
    assert_eq!(a.status, QualificationStatus::AlmostCertain);
}

#[test]
fn zero_points_team_with_no_games_left_cannot_qualify() {
    let mut t = half_played();
    // Play out the remaining fixtures, e losing its last.
    t.matches[7] = result(8, "a", "d", "a", [50, 40]);
    t.matches[8] = result(9, "b", "d", "b", [50, 40]);
    t.matches[9] = result(10, "c", "e", "c", [50, 40]);
    let chances = forecast(&t, 3, 500);
    let e = chances.iter().find(|c| c.team == "e").expect("e present");
    assert_eq!(e.top4_chance, 0);
    assert_eq!(e.top2_chance, 0);
    assert!(!e.can_qualify);
    assert_eq!(e.status, QualificationStatus::VeryUnlikely);
}

#[test]
fn dashboard_orders_and_counts_matches() {
    let t = half_played();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let d = build_dashboard(&t, &mut rng, &config(400));

    assert_eq!(d.tournament.name, "Forecast Cup");
    assert_eq!(d.tournament.total_matches, 10);
    assert_eq!(d.tournament.completed_matches, 7);
    assert_eq!(d.tournament.remaining_matches, 3);

    let upcoming: Vec<u32> = d.upcoming_matches.iter().map(|m| m.sequence).collect();
    assert_eq!(upcoming, vec![8, 9, 10]);
    let completed: Vec<u32> = d.completed_matches.iter().map(|m| m.sequence).collect();
    assert_eq!(completed, vec![7, 6, 5, 4, 3, 2, 1]);
    assert_eq!(d.schedule.len(), 10);

    assert_eq!(d.team_standings[0].team, "a");
    assert_eq!(d.team_standings.len(), 5);
    assert_eq!(d.qualification_chances.len(), 5);
    assert_eq!(d.highlights.highest_individual_score, 70);
    assert_eq!(d.highlights.best_strike_rate, 233.3);
}

#[test]
fn dashboard_of_fresh_tournament_has_zero_highlights() {
    let mut t = half_played();
    for m in &mut t.matches {
        *m = fixture(m.sequence, &m.players[0].to_string(), &m.players[1].to_string());
    }
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let d = build_dashboard(&t, &mut rng, &config(100));
    assert_eq!(d.highlights, TournamentHighlights::default());
    assert!(d.completed_matches.is_empty());
    assert!(d.team_standings.iter().all(|s| s.points == 0));
}

#[test]
fn dashboard_serializes_stage_and_slot_names() {
    let t = half_played();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let d = build_dashboard(&t, &mut rng, &config(50));
    let json = serde_json::to_value(&d).expect("serialize");
    assert_eq!(json["schedule"][0]["kind"], "League");
    assert_eq!(json["tournament"]["status"], "InProgress");
    assert!(json["qualification_chances"][0]["status"].is_string());
}
