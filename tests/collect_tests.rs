//! Tests for the `collect` command
//!
//! Runs collection against fake build directories with no ESP-IDF tooling
//! available, so every run exercises the degraded paths.

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{fixtures, get_bin};

/// Collect command with an empty PATH and no IDF_PATH
fn collect_without_idf(dir: &TempDir) -> assert_cmd::Command {
    let empty_path = dir.path().join("empty-path");
    fs::create_dir_all(&empty_path).unwrap();

    let mut cmd = get_bin();
    cmd.current_dir(dir.path())
        .env("PATH", &empty_path)
        .env_remove("IDF_PATH")
        .arg("collect");
    cmd
}

fn read_json(path: &std::path::Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_collect_without_build_writes_zero_record() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");

    collect_without_idf(&temp_dir)
        .args(["--build-dir", "build"])
        .assert()
        .success()
        .stdout(predicate::str::contains("size.json"));

    let json = read_json(&temp_dir.path().join("size.json"));
    assert_eq!(json["flash"], 0);
    assert_eq!(json["ram"], 0);
}

#[test]
fn test_collect_falls_back_to_binary_size() {
    let (temp_dir, build_dir) = fixtures::create_build_dir(3000).unwrap();
    let out = temp_dir.path().join("pr.json");

    collect_without_idf(&temp_dir)
        .arg("--build-dir")
        .arg(&build_dir)
        .arg("--out")
        .arg(&out)
        .args(["--flash-total-override", "4194304"])
        .assert()
        .success()
        .stderr(predicate::str::contains("idf.py"));

    let json = read_json(&out);
    assert_eq!(json["flash"], 3000);
    assert_eq!(json["flash_total"], 4_194_304);
    assert_eq!(json["dram"], 0);
}

#[test]
fn test_collect_reads_out_path_from_config() {
    let (temp_dir, _build_dir) = fixtures::create_build_dir(10).unwrap();
    fs::write(
        temp_dir.path().join(".idf-size-delta.toml"),
        "[collect]\nbuild-dir = \"build\"\nout = \"metrics.json\"\n",
    )
    .unwrap();

    collect_without_idf(&temp_dir).assert().success();

    assert_eq!(read_json(&temp_dir.path().join("metrics.json"))["flash"], 10);
}
