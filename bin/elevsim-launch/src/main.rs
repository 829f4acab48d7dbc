//! ---
//! elevsim_section: "04-entrypoints"
//! elevsim_subsection: "binary"
//! elevsim_type: "source"
//! elevsim_scope: "code"
//! elevsim_description: "Entry point bringing up the local elevator simulation cluster."
//! elevsim_version: "v0.1.0"
//! elevsim_owner: "tbd"
//! ---
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use elevsim_harness::{
    DryRunSpawner, LaunchOrchestrator, LaunchReport, LauncherConfig, OsTerminalSpawner,
    PacingConfig, PlatformKey, SpawnStrategy, TerminalSpawner,
};
use elevsim_logging as logging;
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(
    author,
    disable_version_flag = true,
    about = "Open one terminal per simulated elevator server, then one per client",
    long_about = None
)]
struct Cli {
    #[arg(long, value_name = "FILE", help = "Path to launcher configuration file")]
    config: Option<PathBuf>,

    #[arg(
        long,
        help = "Print each terminal invocation instead of opening it; logging defaults to warn"
    )]
    dry_run: bool,

    #[arg(
        long,
        value_name = "PLATFORM",
        help = "Override platform detection (windows, linux, macos, other)"
    )]
    platform: Option<PlatformKey>,

    #[arg(long, help = "Skip the pauses between spawns and before clients")]
    no_pacing: bool,

    #[arg(
        short = 'V',
        long = "version",
        action = ArgAction::SetTrue,
        help = "Print version information and exit"
    )]
    version: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.version {
        println!("elevsim-launch {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let loaded = LauncherConfig::load(cli.config.as_deref())
        .context("failed to load launcher configuration")?;
    let mut logging_config = loaded.config.logging.clone();
    if cli.dry_run {
        // Keep stdout to the invocation listing unless an env filter asks for more.
        logging_config.filter = Some("warn".into());
    }
    logging::init(&logging_config)?;
    if let Some(source) = &loaded.source {
        debug!(config_path = %source.display(), "configuration loaded");
    }

    let platform = cli.platform.unwrap_or_else(PlatformKey::detect);
    let matrix = loaded.config.launch_matrix()?;
    let working_dir = loaded.working_directory()?;
    let pacing = if cli.no_pacing {
        PacingConfig::immediate()
    } else {
        loaded.config.pacing
    };

    let strategy = SpawnStrategy::for_platform(platform, &loaded.config.terminal);
    let spawner: Box<dyn TerminalSpawner> = if cli.dry_run {
        Box::new(DryRunSpawner::new(strategy))
    } else {
        Box::new(OsTerminalSpawner::new(strategy))
    };

    let orchestrator = LaunchOrchestrator::new(matrix, spawner, pacing, working_dir);
    let report = match cli.platform {
        Some(platform) => orchestrator.run(platform)?,
        None => orchestrator.run_detected()?,
    };
    if let LaunchReport::Completed {
        servers, clients, ..
    } = &report
    {
        info!(
            servers = servers.len(),
            clients = clients.len(),
            "launch sequence finished; terminals run independently"
        );
    }
    Ok(())
}
