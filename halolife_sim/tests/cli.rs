//! Exit status and output of the `halolife` binary.

use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn halolife() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_halolife"));
    cmd.env_remove("HALOLIFE_PROCS");
    cmd
}

fn scratch_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("halolife-cli-{name}-{}-{nanos}", std::process::id()))
}

#[test]
fn missing_output_directory_prints_usage_and_exits_one() {
    let output = halolife().args(["10", "5"]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Usage:").count(), 1, "stderr: {stderr}");
}

#[test]
fn help_exits_zero() {
    let output = halolife().arg("--help").output().unwrap();
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn more_ranks_than_rows_exits_one_without_output() {
    let dir = scratch_dir("oversubscribed");
    let output = halolife()
        .args(["3", "5"])
        .arg(&dir)
        .args(["-n", "4"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.exists());
}

#[test]
fn run_writes_board_and_reports() {
    let dir = scratch_dir("run");
    let output = halolife()
        .args(["12", "8"])
        .arg(&dir)
        .args(["-n", "3", "--verify"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Simulation completed in "), "stdout: {stdout}");

    let files: Vec<_> = std::fs::read_dir(&dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("final_board_12_procs_3_gen_"), "{files:?}");

    std::fs::remove_dir_all(&dir).unwrap();
}
