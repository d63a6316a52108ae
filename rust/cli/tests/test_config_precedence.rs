use crease_cli::run;
use serde_json::Value;
use serial_test::serial;
use std::io::Write;

const VARS: &[&str] = &[
    "CREASE_CONFIG",
    "CREASE_SEED",
    "CREASE_TRIALS",
    "CREASE_BACKTRACK_MS",
    "CREASE_FORECAST_MS",
];

fn clear_env() {
    for v in VARS {
        unsafe {
            std::env::remove_var(v);
        }
    }
}

fn cfg_json() -> (i32, Value, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(["crease", "cfg"], &mut out, &mut err);
    let json = serde_json::from_slice(&out).unwrap_or(Value::Null);
    (code, json, String::from_utf8(err).unwrap())
}

#[test]
#[serial]
fn defaults_come_from_the_engine() {
    clear_env();
    let (code, json, _) = cfg_json();
    assert_eq!(code, 0);
    assert_eq!(json["trials"]["value"], 10_000);
    assert_eq!(json["trials"]["source"], "default");
    assert_eq!(json["chunk_size"]["value"], 500);
    assert_eq!(json["backtrack_node_budget"]["value"], 200_000);
    assert_eq!(json["backtrack_time_ms"]["value"], 250);
    assert!(json["seed"]["value"].is_null());
    assert!(json["forecast_time_ms"]["value"].is_null());
}

#[test]
#[serial]
fn env_overrides_file() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "seed = 7\ntrials = 300\nchunk_size = 50").unwrap();
    unsafe {
        std::env::set_var("CREASE_CONFIG", file.path());
        std::env::set_var("CREASE_SEED", "99");
    }

    let (code, json, _) = cfg_json();
    clear_env();
    assert_eq!(code, 0);
    assert_eq!(json["seed"]["value"], 99);
    assert_eq!(json["seed"]["source"], "env");
    assert_eq!(json["trials"]["value"], 300);
    assert_eq!(json["trials"]["source"], "file");
    assert_eq!(json["chunk_size"]["source"], "file");
    assert_eq!(json["backtrack_time_ms"]["source"], "default");
}

#[test]
#[serial]
fn zero_trials_is_rejected() {
    clear_env();
    unsafe {
        std::env::set_var("CREASE_TRIALS", "0");
    }
    let (code, _, stderr) = cfg_json();
    clear_env();
    assert_eq!(code, 2);
    assert_eq!(stderr, "Error: Configuration error: trials must be >=1\n");
}

#[test]
#[serial]
fn unreadable_config_file_fails_commands() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    unsafe {
        std::env::set_var("CREASE_CONFIG", dir.path().join("missing.toml"));
    }
    let store = dir.path().join("store.json");
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(
        [
            "crease",
            "--store",
            store.to_str().unwrap(),
            "create",
            "--name",
            "Cup",
            "--players",
            "ana,ben",
        ],
        &mut out,
        &mut err,
    );
    clear_env();
    assert_eq!(code, 2);
    assert!(String::from_utf8(err).unwrap().contains("Error:"));
    assert!(!store.exists());
}

#[test]
#[serial]
fn configured_seed_makes_schedules_repeatable() {
    clear_env();
    unsafe {
        std::env::set_var("CREASE_SEED", "2024");
    }
    let preview = || {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(
            ["crease", "schedule", "--players", "a,b,c,d,e,f,g"],
            &mut out,
            &mut err,
        );
        assert_eq!(code, 0);
        String::from_utf8(out).unwrap()
    };
    let first = preview();
    let second = preview();
    clear_env();
    assert_eq!(first, second);
    assert!(first.contains("Back-to-back fixtures: 0"));
}
