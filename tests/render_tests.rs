//! Tests for the `render` command
//!
//! Renders delta reports from persisted size records end to end.

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{fixtures, get_bin};

fn base_and_head(dir: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let base = fixtures::write_record(
        dir.path(),
        "base.json",
        (1000, 4000),
        (200, 1000),
        (100, 1000),
    )
    .expect("Failed to write base record");
    let head = fixtures::write_record(
        dir.path(),
        "pr.json",
        (1200, 4000),
        (150, 1000),
        (100, 1000),
    )
    .expect("Failed to write PR record");
    (base, head)
}

#[test]
fn test_render_markdown_report() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    let (base, head) = base_and_head(&temp_dir);

    let output = get_bin()
        .current_dir(temp_dir.path())
        .arg("render")
        .arg("--base")
        .arg(&base)
        .arg("--head")
        .arg(&head)
        .args(["--app-name", "blink"])
        .output()
        .expect("Failed to run render");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let expected = "\
### ESP-IDF Size Report for 'blink'

| Metric | Base | PR | Delta |
|---|---:|---:|---:|
| FLASH | 1,000 bytes (25.00%) | 1,200 bytes (30.00%) | 🔺 +200 bytes (+5.00%) |
| DRAM | 200 bytes (20.00%) | 150 bytes (15.00%) | ⬇️ -50 bytes (-5.00%) |
| IRAM | 100 bytes (10.00%) | 100 bytes (10.00%) | 0 bytes (0.00%) |
| RAM (DRAM+IRAM) | 300 bytes (15.00%) | 250 bytes (12.50%) | ⬇️ -50 bytes (-2.50%) |

<sub>FLASH uses the json2 flash sum or the app .bin size. RAM sums DRAM+IRAM. Percentages shown when totals are available.</sub>

<!-- size-delta:blink -->
";
    assert_eq!(stdout, expected);
}

#[test]
fn test_render_missing_records_report_zero_bytes() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");

    get_bin()
        .current_dir(temp_dir.path())
        .args([
            "render",
            "--base",
            "missing-base.json",
            "--head",
            "missing-pr.json",
            "--app-name",
            "blink",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("| FLASH | 0 bytes | 0 bytes | 0 bytes |"))
        .stdout(predicate::str::contains("<!-- size-delta:blink -->"))
        .stderr(predicate::str::contains("missing-base.json"));
}

#[test]
fn test_render_flash_override_applies_to_both_builds() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    let (base, head) = base_and_head(&temp_dir);

    get_bin()
        .current_dir(temp_dir.path())
        .arg("render")
        .arg("--base")
        .arg(&base)
        .arg("--head")
        .arg(&head)
        .args(["--app-name", "blink", "--flash-total-override", "8000"])
        .args(["--precision", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "| FLASH | 1,000 bytes (12.5%) | 1,200 bytes (15.0%) | 🔺 +200 bytes (+2.5%) |",
        ));
}

#[test]
fn test_render_json_format_writes_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    let (base, head) = base_and_head(&temp_dir);
    let out = temp_dir.path().join("delta.json");

    get_bin()
        .current_dir(temp_dir.path())
        .arg("render")
        .arg("--base")
        .arg(&base)
        .arg("--head")
        .arg(&head)
        .args(["--app-name", "blink", "--format", "json", "--out"])
        .arg(&out)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["app_name"], "blink");
    assert_eq!(json["rows"][0]["delta_bytes"], 200);
    assert_eq!(json["rows"][3]["metric"], "ram");
}

#[test]
fn test_render_app_name_from_config_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    let (base, head) = base_and_head(&temp_dir);
    fs::write(
        temp_dir.path().join(".idf-size-delta.toml"),
        "[report]\napp-name = \"from-config\"\nprecision = 0\n",
    )
    .unwrap();

    get_bin()
        .current_dir(temp_dir.path())
        .arg("render")
        .arg("--base")
        .arg(&base)
        .arg("--head")
        .arg(&head)
        .assert()
        .success()
        .stdout(predicate::str::contains("<!-- size-delta:from-config -->"))
        .stdout(predicate::str::contains("1,000 bytes (25%)"));
}

#[test]
fn test_render_without_app_name_is_usage_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    let (base, head) = base_and_head(&temp_dir);

    get_bin()
        .current_dir(temp_dir.path())
        .arg("render")
        .arg("--base")
        .arg(&base)
        .arg("--head")
        .arg(&head)
        .assert()
        .code(64)
        .stderr(predicate::str::contains("--app-name"));
}

#[test]
fn test_render_rejects_out_of_range_precision() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    let (base, head) = base_and_head(&temp_dir);

    get_bin()
        .current_dir(temp_dir.path())
        .arg("render")
        .arg("--base")
        .arg(&base)
        .arg("--head")
        .arg(&head)
        .args(["--app-name", "blink", "--precision", "42"])
        .assert()
        .code(65);
}

#[test]
fn test_render_invalid_config_is_config_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    let (base, head) = base_and_head(&temp_dir);
    fs::write(temp_dir.path().join(".idf-size-delta.toml"), "[report").unwrap();

    get_bin()
        .current_dir(temp_dir.path())
        .arg("render")
        .arg("--base")
        .arg(&base)
        .arg("--head")
        .arg(&head)
        .args(["--app-name", "blink"])
        .assert()
        .code(78);
}
