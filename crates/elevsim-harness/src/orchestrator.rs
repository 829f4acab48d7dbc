//! ---
//! elevsim_section: "02-launch"
//! elevsim_subsection: "module"
//! elevsim_type: "source"
//! elevsim_scope: "code"
//! elevsim_description: "Staggered one-shot startup of simulated servers followed by clients."
//! elevsim_version: "v0.1.0"
//! elevsim_owner: "tbd"
//! ---
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use elevsim_logging::{launch_info, launch_warn, log_launch_event, LaunchContext, LaunchEventOutcome};

use crate::config::PacingConfig;
use crate::error::Result;
use crate::matrix::{LaunchMatrix, PlannedLaunch};
use crate::platform::{PlatformKey, ProcessClass};
use crate::spawner::{SpawnOutcome, TerminalSpawner};

/// Source of the blocking pauses between spawns.
pub trait Pacer {
    fn pause(&self, duration: Duration);
}

/// Blocks the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

impl<T: Pacer + ?Sized> Pacer for &T {
    fn pause(&self, duration: Duration) {
        (**self).pause(duration)
    }
}

/// One dispatched command and what the spawner reported for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRecord {
    pub launch: PlannedLaunch,
    pub outcome: SpawnOutcome,
}

/// Summary of a single orchestrator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchReport {
    /// No launch plan exists for the platform; nothing was spawned.
    Unsupported {
        platform: PlatformKey,
        message: String,
    },
    Completed {
        platform: PlatformKey,
        servers: Vec<SpawnRecord>,
        clients: Vec<SpawnRecord>,
    },
}

impl LaunchReport {
    pub fn spawn_count(&self) -> usize {
        match self {
            LaunchReport::Unsupported { .. } => 0,
            LaunchReport::Completed {
                servers, clients, ..
            } => servers.len() + clients.len(),
        }
    }
}

/// Brings up every server, waits for them to settle, then brings up every client.
///
/// Processes are never tracked after being spawned, so a run holds no state
/// beyond the report it returns.
#[derive(Debug)]
pub struct LaunchOrchestrator<S, P = ThreadPacer> {
    matrix: LaunchMatrix,
    spawner: S,
    pacer: P,
    pacing: PacingConfig,
    working_dir: PathBuf,
}

impl<S: TerminalSpawner> LaunchOrchestrator<S, ThreadPacer> {
    pub fn new(
        matrix: LaunchMatrix,
        spawner: S,
        pacing: PacingConfig,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            matrix,
            spawner,
            pacer: ThreadPacer,
            pacing,
            working_dir: working_dir.into(),
        }
    }
}

impl<S: TerminalSpawner, P: Pacer> LaunchOrchestrator<S, P> {
    pub fn with_pacer<Q: Pacer>(self, pacer: Q) -> LaunchOrchestrator<S, Q> {
        LaunchOrchestrator {
            matrix: self.matrix,
            spawner: self.spawner,
            pacer,
            pacing: self.pacing,
            working_dir: self.working_dir,
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Launch for the host platform, naming the host OS if it is unsupported.
    pub fn run_detected(&self) -> Result<LaunchReport> {
        self.launch(PlatformKey::detect(), Some(std::env::consts::OS))
    }

    pub fn run(&self, platform: PlatformKey) -> Result<LaunchReport> {
        self.launch(platform, None)
    }

    fn launch(&self, platform: PlatformKey, host_os: Option<&str>) -> Result<LaunchReport> {
        let ctx = LaunchContext::new().with_platform(platform.as_ref());

        if !self.matrix.supports(platform) {
            let message = match host_os {
                Some(os) => format!("unsupported platform `{platform}` (host os `{os}`); nothing launched"),
                None => format!("unsupported platform `{platform}`; nothing launched"),
            };
            launch_warn!(context = ctx, "{}", message);
            return Ok(LaunchReport::Unsupported { platform, message });
        }

        log_launch_event(
            Some(&ctx),
            "launch.start",
            &format!("launching from {}", self.working_dir.display()),
            LaunchEventOutcome::Success,
        );

        let servers = self.dispatch(platform, ProcessClass::Server)?;
        launch_info!(
            context = ctx,
            "{} servers dispatched, settling for {:?}",
            servers.len(),
            self.pacing.settle_interval
        );
        self.pacer.pause(self.pacing.settle_interval);
        let clients = self.dispatch(platform, ProcessClass::Client)?;

        log_launch_event(
            Some(&ctx),
            "launch.complete",
            &format!("{} servers and {} clients dispatched", servers.len(), clients.len()),
            LaunchEventOutcome::Success,
        );
        Ok(LaunchReport::Completed {
            platform,
            servers,
            clients,
        })
    }

    fn dispatch(&self, platform: PlatformKey, class: ProcessClass) -> Result<Vec<SpawnRecord>> {
        let plan = self.matrix.plan(platform, class);
        let mut records = Vec::with_capacity(plan.len());

        for launch in plan {
            let mut ctx = LaunchContext::new()
                .with_platform(platform.as_ref())
                .with_class(class.as_ref())
                .with_port(launch.descriptor.port);
            if let Some(node) = launch.descriptor.node {
                ctx = ctx.with_node(node.id);
            }

            launch_info!(context = ctx, "opening terminal: {}", launch.command);
            let outcome = match self.spawner.spawn(&launch.command, &self.working_dir) {
                Ok(outcome) => outcome,
                Err(err) => {
                    log_launch_event(
                        Some(&ctx),
                        "launch.abort",
                        &err.to_string(),
                        LaunchEventOutcome::Fault,
                    );
                    return Err(err);
                }
            };
            self.pacer.pause(self.pacing.spawn_interval);
            records.push(SpawnRecord { launch, outcome });
        }

        Ok(records)
    }
}
