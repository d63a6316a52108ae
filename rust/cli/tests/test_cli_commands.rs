use crease_cli::run;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Outcome {
    code: i32,
    stdout: String,
    stderr: String,
}

fn crease(store: &Path, args: &[&str]) -> Outcome {
    let mut argv = vec!["crease", "--store", store.to_str().unwrap()];
    argv.extend_from_slice(args);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(argv, &mut out, &mut err);
    Outcome {
        code,
        stdout: String::from_utf8(out).unwrap(),
        stderr: String::from_utf8(err).unwrap(),
    }
}

fn store_in(dir: &TempDir) -> PathBuf {
    dir.path().join("tournaments.json")
}

fn stored(store: &Path) -> Vec<Value> {
    serde_json::from_str(&std::fs::read_to_string(store).unwrap()).unwrap()
}

fn create_cup(store: &Path) {
    let res = crease(
        store,
        &[
            "create",
            "--name",
            "Cup",
            "--players",
            "ana, ben,cas,dev",
            "--seed",
            "11",
        ],
    );
    assert_eq!(res.code, 0, "stderr: {}", res.stderr);
}

/// The alphabetically earlier side always wins, batting first.
fn record_win(store: &Path, m: &Value) -> Outcome {
    let a = m["players"][0].as_str().unwrap().to_string();
    let b = m["players"][1].as_str().unwrap().to_string();
    let (winner, runs) = if a < b {
        (a, ["60", "40"])
    } else {
        (b, ["40", "60"])
    };
    let id = m["id"].to_string();
    crease(
        store,
        &[
            "record", "--match", id.as_str(), "--runs1", runs[0], "--balls1", "30", "--wickets1", "4",
            "--runs2", runs[1], "--balls2", "30", "--wickets2", "6", "--winner", winner.as_str(),
        ],
    )
}

fn matches_of_kind(store: &Path, kind: &str) -> Vec<Value> {
    stored(store)[0]["matches"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|m| m["kind"] == kind)
        .cloned()
        .collect()
}

#[test]
fn help_lists_expected_commands() {
    let mut out = Vec::new();
    let mut err = Vec::new();
    assert_eq!(run(["crease", "--help"], &mut out, &mut err), 0);
    let stdout = String::from_utf8_lossy(&out);
    for cmd in [
        "create",
        "record",
        "standings",
        "forecast",
        "dashboard",
        "schedule",
        "cfg",
    ] {
        assert!(stdout.contains(cmd), "help should list `{}`", cmd);
    }
}

#[test]
fn create_writes_schedule_and_placeholders() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    create_cup(&store);

    let all = stored(&store);
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["id"], 1);
    assert_eq!(all[0]["players"], "ana,ben,cas,dev");
    assert_eq!(matches_of_kind(&store, "League").len(), 6);
    let finals = matches_of_kind(&store, "Final");
    assert_eq!(finals.len(), 1);
    assert_eq!(finals[0]["players"][0], "TBD");

    create_cup(&store);
    assert_eq!(stored(&store)[1]["id"], 2);
}

#[test]
fn full_tournament_runs_to_a_champion() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    create_cup(&store);

    for m in matches_of_kind(&store, "League") {
        let res = record_win(&store, &m);
        assert_eq!(res.code, 0, "stderr: {}", res.stderr);
    }
    let q1 = &matches_of_kind(&store, "Qualifier 1")[0];
    assert_eq!(q1["players"][0], "ana");
    assert_eq!(q1["players"][1], "ben");
    let elim = &matches_of_kind(&store, "Eliminator")[0];
    assert_eq!(elim["players"][0], "cas");
    assert_eq!(elim["players"][1], "dev");

    let standings = crease(&store, &["standings"]);
    assert_eq!(standings.code, 0);
    assert!(standings.stdout.contains("Tournament 1 \"Cup\""));
    assert!(standings.stdout.contains("ana"));

    for stage in ["Qualifier 1", "Eliminator", "Qualifier 2"] {
        let m = matches_of_kind(&store, stage).remove(0);
        let res = record_win(&store, &m);
        assert_eq!(res.code, 0, "{} stderr: {}", stage, res.stderr);
    }
    let fin = matches_of_kind(&store, "Final").remove(0);
    assert_eq!(fin["players"][0], "ana");
    assert_eq!(fin["players"][1], "ben");
    let res = record_win(&store, &fin);
    assert_eq!(res.code, 0);
    assert!(res.stdout.contains("Champion: ana"));
    assert_eq!(stored(&store)[0]["status"], "Completed");
}

#[test]
fn standings_json_has_leaderboards() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    create_cup(&store);
    let first = matches_of_kind(&store, "League").remove(0);
    assert_eq!(record_win(&store, &first).code, 0);

    let res = crease(&store, &["standings", "--json"]);
    assert_eq!(res.code, 0);
    let boards: Value = serde_json::from_str(&res.stdout).unwrap();
    assert_eq!(boards["standings"].as_array().unwrap().len(), 4);
    assert_eq!(boards["standings"][0]["points"], 2);
    assert_eq!(boards["batsmen"][0]["runs"], 60);
}

#[test]
fn forecast_and_dashboard_are_reproducible_with_seed() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    create_cup(&store);

    let args = ["forecast", "--trials", "200", "--seed", "5", "--json"];
    let a = crease(&store, &args);
    let b = crease(&store, &args);
    assert_eq!(a.code, 0, "stderr: {}", a.stderr);
    assert_eq!(a.stdout, b.stdout);
    let chances: Value = serde_json::from_str(&a.stdout).unwrap();
    assert_eq!(chances.as_array().unwrap().len(), 4);

    let dash = crease(&store, &["dashboard", "--trials", "200", "--seed", "5"]);
    assert_eq!(dash.code, 0);
    let data: Value = serde_json::from_str(&dash.stdout).unwrap();
    assert_eq!(data["tournament"]["total_matches"], 10);
    assert_eq!(data["tournament"]["remaining_matches"], 10);
}

#[test]
fn schedule_lists_stored_fixtures() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    create_cup(&store);
    let res = crease(&store, &["schedule", "--tournament", "1"]);
    assert_eq!(res.code, 0);
    assert_eq!(res.stdout.matches(" League ").count(), 6);
    assert!(res.stdout.contains("Final"));
    assert!(res.stdout.contains("Back-to-back fixtures:"));
}

#[test]
fn unknown_match_is_an_error() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    create_cup(&store);
    let before = std::fs::read_to_string(&store).unwrap();
    let res = crease(&store, &["record", "--match", "99", "--winner", "ana"]);
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("Error: Match with ID 99 not found"));
    assert_eq!(std::fs::read_to_string(&store).unwrap(), before);
}

#[test]
fn winner_must_be_a_participant() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    create_cup(&store);
    let m = matches_of_kind(&store, "League").remove(0);
    let id = m["id"].to_string();
    let res = crease(&store, &["record", "--match", id.as_str(), "--winner", "zed"]);
    assert_eq!(res.code, 2);
    assert!(res.stderr.starts_with("Error:"));
}

#[test]
fn empty_store_has_no_tournament() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let res = crease(&store, &["standings"]);
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("Error:"));
}

#[test]
fn single_player_is_rejected() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let res = crease(&store, &["create", "--name", "Solo", "--players", "ana"]);
    assert_eq!(res.code, 2);
    assert!(!store.exists());
}
