//! CLI smoke tests driving the compiled binary end to end.

use assert_cmd::Command;
use indoc::indoc;
use std::fs;
use tempfile::TempDir;

const CHART_JSON: &str = indoc! {r#"
    {
      "ascendant": 275.0,
      "planets": {
        "Sun": { "longitude": 95.0, "speed": 0.98 },
        "Moon": { "longitude": 280.0, "speed": 13.2 },
        "Mars": { "longitude": 298.0, "speed": 0.5 },
        "Mercury": { "longitude": 100.0, "speed": 1.2 },
        "Jupiter": { "longitude": 190.0, "speed": 0.08 },
        "Venus": { "longitude": 40.0, "speed": 1.1 },
        "Saturn": { "longitude": 310.0, "speed": 0.03 },
        "Rahu": { "longitude": 140.0, "speed": -0.05 }
      }
    }
"#};

fn write_chart(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("chart.json");
    fs::write(&path, CHART_JSON).unwrap();
    path
}

#[test]
fn analyze_emits_json_array() {
    let dir = TempDir::new().unwrap();
    let chart = write_chart(&dir);

    let output = Command::cargo_bin("yogascan")
        .unwrap()
        .args(["analyze", chart.to_str().unwrap(), "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let yogas: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let yogas = yogas.as_array().expect("expected a JSON array");
    assert!(!yogas.is_empty());
    for yoga in yogas {
        let strength = yoga["strengthPercentage"].as_f64().unwrap();
        assert!((10.0..=100.0).contains(&strength));
        assert!(yoga["name"].as_str().is_some());
    }
}

#[test]
fn top_limits_the_result_count() {
    let dir = TempDir::new().unwrap();
    let chart = write_chart(&dir);

    let output = Command::cargo_bin("yogascan")
        .unwrap()
        .args([
            "analyze",
            chart.to_str().unwrap(),
            "--format",
            "json",
            "--top",
            "3",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let yogas: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(yogas.as_array().map(|a| a.len()), Some(3));
}

#[test]
fn table_format_prints_summary_header() {
    let dir = TempDir::new().unwrap();
    let chart = write_chart(&dir);

    let output = Command::cargo_bin("yogascan")
        .unwrap()
        .args(["analyze", chart.to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.contains("yogas detected"));
}

#[test]
fn output_flag_writes_file() {
    let dir = TempDir::new().unwrap();
    let chart = write_chart(&dir);
    let out = dir.path().join("results.json");

    Command::cargo_bin("yogascan")
        .unwrap()
        .args([
            "analyze",
            chart.to_str().unwrap(),
            "--format",
            "json",
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success();

    let contents = fs::read_to_string(&out).unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&contents).is_ok());
}

#[test]
fn missing_file_fails_with_context() {
    let output = Command::cargo_bin("yogascan")
        .unwrap()
        .args(["analyze", "no-such-chart.json"])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();

    let stderr = String::from_utf8(output).unwrap();
    assert!(stderr.contains("failed to load chart"));
}
