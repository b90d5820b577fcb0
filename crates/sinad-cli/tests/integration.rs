//! Integration tests for sinad-cli.
//!
//! Tests cover binary invocation and the generate-then-measure workflow.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Helper to get the path to the `sinad` binary built by cargo.
fn sinad_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sinad"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run_ok(cmd: &mut Command) -> Output {
    let output = cmd.output().expect("failed to run sinad");
    assert!(
        output.status.success(),
        "sinad failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

/// Write a 1 kHz, 44.1 kHz, 1 s fixture at the given SINAD.
fn generate_fixture(path: &Path, target_db: f64, seed: u64) {
    run_ok(sinad_bin().args([
        "generate",
        path.to_str().unwrap(),
        "--duration",
        "1",
        "--target-sinad",
        &target_db.to_string(),
        "--seed",
        &seed.to_string(),
    ]));
}

fn parse_sinad(stdout: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|l| l.starts_with("SINAD:"))
        .expect("no SINAD line in output");
    line.trim_start_matches("SINAD:")
        .trim()
        .trim_end_matches("dB")
        .trim()
        .parse()
        .expect("SINAD value should be a number")
}

// ---------------------------------------------------------------------------
// Help / version
// ---------------------------------------------------------------------------

#[test]
fn cli_help_lists_subcommands() {
    let output = run_ok(sinad_bin().arg("--help"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    for cmd in ["measure", "generate", "spectrum", "info"] {
        assert!(stdout.contains(cmd), "help should list '{cmd}'");
    }
}

#[test]
fn cli_version() {
    let output = run_ok(sinad_bin().arg("--version"));
    assert!(String::from_utf8_lossy(&output.stdout).contains("sinad"));
}

// ---------------------------------------------------------------------------
// generate + measure
// ---------------------------------------------------------------------------

#[test]
fn measure_twelve_db_fixture() {
    let dir = TempDir::new().unwrap();
    let wav = dir.path().join("tone12.wav");
    generate_fixture(&wav, 12.0, 2024);

    let output = run_ok(sinad_bin().args(["measure", wav.to_str().unwrap()]));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let sinad = parse_sinad(&stdout);
    assert!((11.0..=13.0).contains(&sinad), "got {sinad} dB\n{stdout}");
    assert!(stdout.contains("ENOB"));
}

#[test]
fn measure_json_reports_every_file() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.wav");
    let b = dir.path().join("b.wav");
    generate_fixture(&a, 12.0, 1);
    generate_fixture(&b, 30.0, 2);

    let output = run_ok(sinad_bin().args([
        "measure",
        a.to_str().unwrap(),
        b.to_str().unwrap(),
        "--json",
    ]));
    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 2);

    let sinad_a = reports[0]["sinad_db"].as_f64().unwrap();
    let sinad_b = reports[1]["sinad_db"].as_f64().unwrap();
    assert!((sinad_a - 12.0).abs() < 1.0, "a: {sinad_a}");
    assert!(sinad_b > sinad_a + 10.0, "b: {sinad_b}");
    assert_eq!(reports[0]["fundamental_bin"].as_u64(), Some(1000));
    assert_eq!(reports[0]["sample_rate"].as_u64(), Some(44100));
}

#[test]
fn measure_respects_analysis_flags() {
    let dir = TempDir::new().unwrap();
    let wav = dir.path().join("tone.wav");
    generate_fixture(&wav, 20.0, 3);

    let output = run_ok(sinad_bin().args([
        "measure",
        wav.to_str().unwrap(),
        "--harmonics",
        "1",
        "--window",
        "blackman-harris",
        "--json",
    ]));
    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reports[0]["harmonics"].as_array().unwrap().len(), 0);
}

#[test]
fn measure_uses_profile() {
    let dir = TempDir::new().unwrap();
    let wav = dir.path().join("tone.wav");
    let profile = dir.path().join("p.toml");
    generate_fixture(&wav, 20.0, 4);
    std::fs::write(&profile, "[analysis]\nnum_harmonics = 3\n").unwrap();

    let output = run_ok(sinad_bin().args([
        "measure",
        wav.to_str().unwrap(),
        "--profile",
        profile.to_str().unwrap(),
        "--json",
    ]));
    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let orders: Vec<u64> = reports[0]["harmonics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["order"].as_u64().unwrap())
        .collect();
    assert_eq!(orders, vec![2, 3]);
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn measure_missing_file_fails() {
    let output = sinad_bin()
        .args(["measure", "/nonexistent/capture.wav"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("capture.wav"));
}

#[test]
fn measure_silent_file_fails() {
    let dir = TempDir::new().unwrap();
    let wav = dir.path().join("silence.wav");
    sinad_io::write_wav(&wav, &[0.0; 4410], sinad_io::WavSpec::default()).unwrap();

    let output = sinad_bin()
        .args(["measure", wav.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("silent"));
}

#[test]
fn measure_zero_harmonics_rejected() {
    let dir = TempDir::new().unwrap();
    let wav = dir.path().join("tone.wav");
    generate_fixture(&wav, 20.0, 5);

    let output = sinad_bin()
        .args(["measure", wav.to_str().unwrap(), "--harmonics", "0"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("num_harmonics"));
}

#[test]
fn generate_rejects_unsupported_bits() {
    let dir = TempDir::new().unwrap();
    let wav = dir.path().join("bad.wav");
    let output = sinad_bin()
        .args(["generate", wav.to_str().unwrap(), "--bits", "12"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(!wav.exists());
}

// ---------------------------------------------------------------------------
// spectrum / info
// ---------------------------------------------------------------------------

#[test]
fn spectrum_top_bin_and_csv() {
    let dir = TempDir::new().unwrap();
    let wav = dir.path().join("tone.wav");
    let csv = dir.path().join("spectrum.csv");
    generate_fixture(&wav, 40.0, 6);

    let output = run_ok(sinad_bin().args([
        "spectrum",
        wav.to_str().unwrap(),
        "--peaks",
        "1",
        "--output",
        csv.to_str().unwrap(),
    ]));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1000.00"), "top bin should be 1 kHz:\n{stdout}");

    let content = std::fs::read_to_string(&csv).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("frequency_hz,magnitude,power"));
    assert_eq!(lines.count(), 44100 / 2);
}

#[test]
fn info_shows_metadata() {
    let dir = TempDir::new().unwrap();
    let wav = dir.path().join("tone.wav");
    run_ok(sinad_bin().args([
        "generate",
        wav.to_str().unwrap(),
        "--sample-rate",
        "48000",
        "--duration",
        "0.5",
        "--bits",
        "24",
    ]));

    let output = run_ok(sinad_bin().args(["info", wav.to_str().unwrap()]));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("PCM 24-bit"), "{stdout}");
    assert!(stdout.contains("48000 Hz"), "{stdout}");
    assert!(stdout.contains("24000 frames"), "{stdout}");
}
