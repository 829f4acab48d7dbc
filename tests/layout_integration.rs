//! ---
//! elevsim_section: "15-testing-qa-runbook"
//! elevsim_subsection: "integration-tests"
//! elevsim_type: "source"
//! elevsim_scope: "code"
//! elevsim_description: "Checks on files shipped alongside the launcher."
//! elevsim_version: "v0.1.0"
//! elevsim_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};

use elevsim_harness::{LauncherConfig, LaunchMatrix};

fn repo_path(path: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join(path)
}

fn read(path: &str) -> String {
    let full = repo_path(path);
    fs::read_to_string(&full)
        .unwrap_or_else(|err| panic!("failed to read {}: {}", full.display(), err))
}

#[test]
fn bundled_config_parses_to_defaults() {
    let config = LauncherConfig::from_path(&repo_path("scripts/launch.toml"))
        .expect("bundled launch.toml is valid");
    assert_eq!(config.pacing, LauncherConfig::default().pacing);
    assert_eq!(config.terminal, LauncherConfig::default().terminal);
    assert_eq!(config.launch_matrix().unwrap(), LaunchMatrix::embedded());
}

#[test]
fn binaries_sit_next_to_scripts() {
    assert!(repo_path("scripts").is_dir());
    assert!(
        repo_path("binaries").is_dir(),
        "commands resolve ../binaries from scripts/"
    );
}

#[test]
fn manifests_and_config_carry_frontmatter() {
    for file in [
        "Cargo.toml",
        "scripts/launch.toml",
        "crates/elevsim-harness/Cargo.toml",
        "crates/elevsim-logging/Cargo.toml",
        "bin/elevsim-launch/Cargo.toml",
    ] {
        let content = read(file);
        assert!(
            content.starts_with("# ---"),
            "{file} must include frontmatter header"
        );
        assert!(
            content.contains("elevsim_description:"),
            "{file} must describe itself"
        );
    }
}
