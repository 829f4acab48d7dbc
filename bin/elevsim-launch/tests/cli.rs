//! ---
//! elevsim_section: "04-entrypoints"
//! elevsim_subsection: "integration-tests"
//! elevsim_type: "source"
//! elevsim_scope: "code"
//! elevsim_description: "Command line behaviour of the launcher binary."
//! elevsim_version: "v0.1.0"
//! elevsim_owner: "tbd"
//! ---
use std::fs;

use assert_cmd::Command;
use tempfile::tempdir;

fn launcher() -> Command {
    let mut cmd = default_logging_launcher();
    cmd.env("ELEVSIM_LOG", "off");
    cmd
}

/// No logging env vars, so the configured filter decides what reaches stdout.
fn default_logging_launcher() -> Command {
    let mut cmd = Command::cargo_bin("elevsim-launch").expect("binary is built");
    cmd.env_remove("ELEVSIM_LAUNCH_CONFIG")
        .env_remove("RUST_LOG")
        .env_remove("ELEVSIM_LOG");
    cmd
}

#[test]
fn dry_run_lists_linux_plan_in_order() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("launch.toml");
    fs::write(&config, "").unwrap();

    let output = launcher()
        .args(["--dry-run", "--no-pacing", "--platform", "linux", "--config"])
        .arg(&config)
        .output()
        .expect("launcher runs");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 6, "{stdout}");
    assert!(lines
        .iter()
        .all(|line| line.starts_with("gnome-terminal -- bash -c")));
    assert!(lines[0].contains("./SimElevatorServer --port 12120; exec bash"));
    assert!(lines[2].contains("./SimElevatorServer --port 12122; exec bash"));
    assert!(lines[3].contains("./elevatorClient --port 12120 --id 0 --role Master"));
    assert!(lines[5].contains("./elevatorClient --port 12122 --id 2 --role Regular"));
    assert!(lines[0].contains(&format!("(in {})", dir.path().display())));
}

#[test]
fn dry_run_honours_matrix_override() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("launch.toml");
    fs::write(
        &config,
        "[matrix.windows]\nserver_executable = \"srv.exe\"\nclient_executable = \"cli.exe\"\nports = [9000]\n",
    )
    .unwrap();

    let output = launcher()
        .args(["--dry-run", "--no-pacing", "--platform", "windows", "--config"])
        .arg(&config)
        .output()
        .expect("launcher runs");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "{stdout}");
    assert!(lines[0].starts_with("cmd.exe /k"));
    assert!(lines[1].contains("./cli.exe --port 9000 --id 0 --role Master"));
}

#[test]
fn unsupported_platform_exits_cleanly_without_spawning() {
    let output = launcher()
        .args(["--dry-run", "--no-pacing", "--platform", "other"])
        .output()
        .expect("launcher runs");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn unsupported_platform_logs_a_single_diagnostic() {
    let output = default_logging_launcher()
        .args(["--no-pacing", "--platform", "other"])
        .output()
        .expect("launcher runs");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1, "{stdout}");
    assert!(lines[0].contains("unsupported platform `other`"), "{stdout}");
    assert!(lines[0].contains("WARN"), "{stdout}");
}

#[test]
fn dry_run_listing_is_not_interleaved_with_logs() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("launch.toml");
    fs::write(&config, "[logging]\nfilter = \"info\"\n").unwrap();

    let output = default_logging_launcher()
        .args(["--dry-run", "--no-pacing", "--platform", "linux", "--config"])
        .arg(&config)
        .output()
        .expect("launcher runs");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 6, "{stdout}");
    assert!(lines
        .iter()
        .all(|line| line.starts_with("gnome-terminal -- bash -c")));
}

#[test]
fn env_filter_still_overrides_dry_run_default() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("launch.toml");
    fs::write(&config, "").unwrap();

    let output = default_logging_launcher()
        .env("ELEVSIM_LOG", "info")
        .args(["--dry-run", "--no-pacing", "--platform", "linux", "--config"])
        .arg(&config)
        .output()
        .expect("launcher runs");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.lines().count() > 6, "{stdout}");
}

#[test]
fn missing_config_file_is_fatal() {
    let dir = tempdir().expect("tempdir");
    launcher()
        .args(["--dry-run", "--config"])
        .arg(dir.path().join("absent.toml"))
        .assert()
        .failure();
}

#[test]
fn version_flag_prints_package_version() {
    let output = launcher().arg("-V").output().expect("launcher runs");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        format!("elevsim-launch {}\n", env!("CARGO_PKG_VERSION"))
    );
}
