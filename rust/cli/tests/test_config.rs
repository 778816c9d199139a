use headsup_cli::config::{self, ValueSource};
use headsup_cli::run;
use serde_json::Value;
use serial_test::serial;
use std::io::Write;

const VARS: [&str; 6] = [
    "HEADSUP_CONFIG",
    "HEADSUP_STARTING_STACK",
    "HEADSUP_SMALL_BLIND",
    "HEADSUP_BIG_BLIND",
    "HEADSUP_SEED",
    "HEADSUP_HANDS",
];

fn clear_env() {
    for key in VARS {
        unsafe {
            std::env::remove_var(key);
        }
    }
}

fn set_env(key: &str, value: &str) {
    unsafe {
        std::env::set_var(key, value);
    }
}

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let mut argv = vec!["headsup"];
    argv.extend_from_slice(args);
    let code = run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    f.write_all(contents.as_bytes()).expect("write temp config");
    f
}

#[test]
#[serial]
fn cfg_shows_defaults() {
    clear_env();
    let (code, stdout, stderr) = run_cli(&["cfg"]);
    assert_eq!(code, 0, "stderr={}", stderr);
    let json: Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(json["starting_stack"]["value"].as_f64(), Some(1000.0));
    assert_eq!(json["small_blind"]["value"].as_f64(), Some(5.0));
    assert_eq!(json["big_blind"]["value"].as_f64(), Some(10.0));
    assert_eq!(json["hands"]["value"].as_u64(), Some(1000));
    assert!(json["seed"]["value"].is_null());
    for key in ["starting_stack", "small_blind", "big_blind", "seed", "hands"] {
        assert_eq!(json[key]["source"].as_str(), Some("default"), "{}", key);
    }
}

#[test]
#[serial]
fn env_overrides_file() {
    clear_env();
    let file = config_file("seed = 456\nsmall_blind = 10.0\nbig_blind = 20.0\n");
    set_env("HEADSUP_CONFIG", file.path().to_str().unwrap());
    set_env("HEADSUP_SEED", "789");

    let resolved = config::load_with_sources().unwrap();
    assert_eq!(resolved.config.seed, Some(789));
    assert_eq!(resolved.sources.seed, ValueSource::Env);
    assert_eq!(resolved.config.big_blind, 20.0);
    assert_eq!(resolved.sources.big_blind, ValueSource::File);
    assert_eq!(resolved.sources.small_blind, ValueSource::File);
    assert_eq!(resolved.sources.starting_stack, ValueSource::Default);

    let (code, stdout, _) = run_cli(&["cfg"]);
    assert_eq!(code, 0);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["seed"]["value"].as_u64(), Some(789));
    assert_eq!(json["seed"]["source"].as_str(), Some("env"));
    assert_eq!(json["big_blind"]["source"].as_str(), Some("file"));
    clear_env();
}

#[test]
#[serial]
fn flags_override_env() {
    clear_env();
    set_env("HEADSUP_HANDS", "3");
    set_env("HEADSUP_SEED", "11");
    set_env("HEADSUP_STARTING_STACK", "250");

    let (code, stdout, stderr) = run_cli(&["sim", "--json"]);
    assert_eq!(code, 0, "stderr={}", stderr);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["hands_requested"].as_u64(), Some(3));
    assert_eq!(json["seed"].as_u64(), Some(11));
    assert_eq!(json["starting_stack"].as_f64(), Some(250.0));

    let (code, stdout, _) = run_cli(&["sim", "--json", "--hands", "5", "--seed", "12"]);
    assert_eq!(code, 0);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["hands_requested"].as_u64(), Some(5));
    assert_eq!(json["seed"].as_u64(), Some(12));
    clear_env();
}

#[test]
#[serial]
fn seeded_env_makes_hand_reproducible() {
    clear_env();
    set_env("HEADSUP_SEED", "321");
    let first = run_cli(&["hand"]);
    let second = run_cli(&["hand"]);
    assert_eq!(first.0, 0);
    assert!(first.1.starts_with("Hand #1 (seed 321)"));
    assert_eq!(first.1, second.1);
    clear_env();
}

#[test]
#[serial]
fn invalid_env_values_are_rejected() {
    clear_env();
    set_env("HEADSUP_BIG_BLIND", "abc");
    let (code, stdout, stderr) = run_cli(&["cfg"]);
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Configuration error: Invalid big blind: abc"));

    clear_env();
    set_env("HEADSUP_SMALL_BLIND", "50");
    let (code, _, stderr) = run_cli(&["sim", "--hands", "1"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("exceeds big blind"));

    clear_env();
    set_env("HEADSUP_HANDS", "0");
    let (code, _, stderr) = run_cli(&["cfg"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("hands must be >=1"));
    clear_env();
}

#[test]
#[serial]
fn empty_env_values_are_ignored() {
    clear_env();
    set_env("HEADSUP_SEED", "");
    let resolved = config::load_with_sources().unwrap();
    assert_eq!(resolved.config.seed, None);
    assert_eq!(resolved.sources.seed, ValueSource::Default);
    clear_env();
}

#[test]
#[serial]
fn bad_config_files_are_rejected() {
    clear_env();
    let file = config_file("big_blind = \"lots\"\n");
    set_env("HEADSUP_CONFIG", file.path().to_str().unwrap());
    let (code, _, stderr) = run_cli(&["cfg"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("cannot parse config file"));

    let file = config_file("level = 3\n");
    set_env("HEADSUP_CONFIG", file.path().to_str().unwrap());
    let (code, _, stderr) = run_cli(&["cfg"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("cannot parse config file"));

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    set_env("HEADSUP_CONFIG", missing.to_str().unwrap());
    let (code, _, stderr) = run_cli(&["cfg"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("cannot read config file"));
    clear_env();
}

#[test]
#[serial]
fn flags_can_repair_env_values() {
    clear_env();
    set_env("HEADSUP_SMALL_BLIND", "20");
    let (code, _, stderr) = run_cli(&["cfg"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("exceeds big blind"));

    let (code, stdout, stderr) =
        run_cli(&["sim", "--json", "--hands", "2", "--seed", "4", "--big-blind", "40"]);
    assert_eq!(code, 0, "stderr={}", stderr);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["small_blind"].as_f64(), Some(20.0));
    assert_eq!(json["big_blind"].as_f64(), Some(40.0));
    clear_env();
}
