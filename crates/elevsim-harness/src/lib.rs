//! ---
//! elevsim_section: "02-launch"
//! elevsim_subsection: "bootstrap"
//! elevsim_type: "source"
//! elevsim_scope: "code"
//! elevsim_description: "Launch harness exports for the elevator simulation cluster."
//! elevsim_version: "v0.1.0"
//! elevsim_owner: "tbd"
//! ---
//! The launch harness brings up a local elevator simulation cluster for
//! manual testing: every server opens in its own terminal window, followed
//! after a settle pause by one client per server. The server and client
//! binaries are opaque; the harness only decides what to start, where, and
//! in which order.

pub mod config;
pub mod error;
pub mod matrix;
pub mod orchestrator;
pub mod platform;
pub mod spawner;

pub use config::{LauncherConfig, LoadedConfig, PacingConfig, TerminalConfig};
pub use error::{HarnessError, Result};
pub use matrix::{LaunchDescriptor, LaunchMatrix, NodeAssignment, PlannedLaunch, PlatformProfile};
pub use orchestrator::{LaunchOrchestrator, LaunchReport, Pacer, SpawnRecord, ThreadPacer};
pub use platform::{PlatformKey, ProcessClass, Role};
pub use spawner::{
    DryRunSpawner, OsTerminalSpawner, SpawnOutcome, SpawnStrategy, TerminalInvocation,
    TerminalSpawner,
};
