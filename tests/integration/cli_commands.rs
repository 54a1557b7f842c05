#![allow(missing_docs)]

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use tempfile::TempDir;

fn isolated() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("tempdir");
    let config = dir.path().join("absent.toml");
    (dir, config)
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("utf8 stdout")
}

#[test]
fn reads_length_from_stdin() {
    let (_dir, config) = isolated();
    let output = cargo_bin_cmd!("reduce-bench")
        .arg("--config")
        .arg(&config)
        .args(["--seed", "7"])
        .env_remove("REDUCE_BENCH_THREADS")
        .write_stdin("12\n")
        .assert()
        .success()
        .get_output()
        .clone();
    let stdout = stdout_of(&output);
    assert!(stdout.starts_with("Enter number of elements in array: "));
    assert!(stdout.contains("len=12, workers=4, seed=7"));
    let echoed = stdout
        .lines()
        .find(|line| line.starts_with("Array Elements:"))
        .expect("array echo");
    assert_eq!(echoed.split_whitespace().count(), 2 + 12);
    for label in ["Minimum", "Maximum", "Sum", "Average"] {
        assert!(stdout.contains(&format!("{label} (Seq): ")), "{label} line");
        assert!(
            stdout.lines().any(|line| line.starts_with(label) && line.ends_with('x')),
            "{label} row"
        );
    }
    assert!(stdout.contains("Operation      Seq Time (s)  Par Time (s)  Speedup"));
}

#[test]
fn positional_length_and_options() {
    let (_dir, config) = isolated();
    let output = cargo_bin_cmd!("reduce-bench")
        .arg("--config")
        .arg(&config)
        .args(["--threads", "2", "--no-echo", "--op", "sum", "--op", "min", "1000"])
        .assert()
        .success()
        .get_output()
        .clone();
    let stdout = stdout_of(&output);
    assert!(!stdout.contains("Enter number of elements"));
    assert!(!stdout.contains("Array Elements:"));
    assert!(stdout.contains("workers=2"));
    assert!(stdout.contains("Sum (Seq): "));
    assert!(stdout.contains("Minimum (Seq): "));
    assert!(!stdout.contains("Maximum (Seq): "));
}

#[test]
fn seeded_runs_are_reproducible() {
    let (_dir, config) = isolated();
    let echo = |seed: &str| {
        let output = cargo_bin_cmd!("reduce-bench")
            .arg("--config")
            .arg(&config)
            .args(["--seed", seed, "64"])
            .assert()
            .success()
            .get_output()
            .clone();
        stdout_of(&output)
            .lines()
            .find(|line| line.starts_with("Array Elements:"))
            .map(str::to_string)
            .expect("array echo")
    };
    assert_eq!(echo("11"), echo("11"));
    assert_ne!(echo("11"), echo("12"));
}

#[test]
fn empty_array_reports_none() {
    let (_dir, config) = isolated();
    let output = cargo_bin_cmd!("reduce-bench")
        .arg("--config")
        .arg(&config)
        .arg("0")
        .assert()
        .success()
        .get_output()
        .clone();
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Minimum (Seq): none, Parallel: none"));
    assert!(stdout.contains("Sum (Seq): 0, Parallel: 0"));
    assert!(stdout.contains("Average (Seq): none, Parallel: none"));
}

#[test]
fn rejects_negative_length() {
    let (_dir, config) = isolated();
    cargo_bin_cmd!("reduce-bench")
        .arg("--config")
        .arg(&config)
        .write_stdin("-5\n")
        .assert()
        .failure();
}

#[test]
fn rejects_garbage_length() {
    let (_dir, config) = isolated();
    let output = cargo_bin_cmd!("reduce-bench")
        .arg("--config")
        .arg(&config)
        .arg("many")
        .assert()
        .failure()
        .get_output()
        .clone();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid input"), "{stderr}");
}

#[test]
fn rejects_negative_positional_length() {
    let (_dir, config) = isolated();
    let output = cargo_bin_cmd!("reduce-bench")
        .arg("--config")
        .arg(&config)
        .arg("-5")
        .assert()
        .failure()
        .get_output()
        .clone();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("must not be negative"), "{stderr}");
}

#[test]
fn rejects_zero_threads() {
    let (_dir, config) = isolated();
    cargo_bin_cmd!("reduce-bench")
        .arg("--config")
        .arg(&config)
        .args(["--threads", "0", "10"])
        .assert()
        .failure();
}

#[test]
fn config_file_sets_threads() {
    let dir = TempDir::new().expect("tempdir");
    let config = dir.path().join("config.toml");
    fs::write(&config, "threads = 3\necho_array = false\n").expect("write config");
    let output = cargo_bin_cmd!("reduce-bench")
        .arg("--config")
        .arg(&config)
        .env_remove("REDUCE_BENCH_THREADS")
        .arg("100")
        .assert()
        .success()
        .get_output()
        .clone();
    let stdout = stdout_of(&output);
    assert!(stdout.contains("workers=3"));
    assert!(!stdout.contains("Array Elements:"));
}

#[test]
fn writes_json_and_csv_reports() {
    let (dir, config) = isolated();
    let json_path = dir.path().join("out").join("report.json");
    let csv_path = dir.path().join("report.csv");
    cargo_bin_cmd!("reduce-bench")
        .arg("--config")
        .arg(&config)
        .arg("--json")
        .arg(&json_path)
        .arg("--csv")
        .arg(&csv_path)
        .args(["--seed", "3", "500"])
        .assert()
        .success();

    let bytes = fs::read(&json_path).expect("json report");
    let json: Value = serde_json::from_slice(&bytes).expect("valid json");
    assert_eq!(json["report"]["len"], 500);
    assert_eq!(json["report"]["seed"], 3);
    assert_eq!(json["report"]["records"].as_array().map(Vec::len), Some(4));

    let mut reader = csv::Reader::from_path(&csv_path).expect("csv");
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
    assert_eq!(rows.len(), 4);
    let keys: Vec<&str> = rows.iter().map(|row| &row[0]).collect();
    assert_eq!(keys, ["min", "max", "sum", "avg"]);
    for row in &rows {
        assert_eq!(&row[1], &row[2], "sequential and parallel agree");
    }
}

#[test]
fn rejects_unallocatable_length() {
    let (_dir, config) = isolated();
    let output = cargo_bin_cmd!("reduce-bench")
        .arg("--config")
        .arg(&config)
        .args(["--no-echo", "4611686018427387904"])
        .assert()
        .failure()
        .get_output()
        .clone();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("panicked"), "{stderr}");
    assert!(stderr.contains("cannot allocate"), "{stderr}");
}

#[test]
fn rejects_malformed_log_filter() {
    let (_dir, config) = isolated();
    let output = cargo_bin_cmd!("reduce-bench")
        .arg("--config")
        .arg(&config)
        .env_remove("RUST_LOG")
        .args(["--log-level", "foo=bar=baz", "10"])
        .assert()
        .failure()
        .get_output()
        .clone();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("logging error"), "{stderr}");
}

#[test]
fn rust_log_overrides_log_level() {
    let (_dir, config) = isolated();
    let output = cargo_bin_cmd!("reduce-bench")
        .arg("--config")
        .arg(&config)
        .env("RUST_LOG", "info")
        .args(["--log-level", "foo=bar=baz", "--no-echo", "10"])
        .assert()
        .success()
        .get_output()
        .clone();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("configuration resolved"), "{stderr}");
}

#[test]
fn rejects_malformed_config_file() {
    let dir = TempDir::new().expect("tempdir");
    let config = dir.path().join("config.toml");
    fs::write(&config, "threads = \"x\"\n").expect("write config");
    let output = cargo_bin_cmd!("reduce-bench")
        .arg("--config")
        .arg(&config)
        .arg("10")
        .assert()
        .failure()
        .get_output()
        .clone();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to parse config"), "{stderr}");
}
