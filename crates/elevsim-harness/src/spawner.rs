//! ---
//! elevsim_section: "02-launch"
//! elevsim_subsection: "module"
//! elevsim_type: "source"
//! elevsim_scope: "code"
//! elevsim_description: "Platform specific strategies opening one interactive terminal per command."
//! elevsim_version: "v0.1.0"
//! elevsim_owner: "tbd"
//! ---
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use elevsim_logging::{launch_debug, launch_warn, LaunchContext};

use crate::config::TerminalConfig;
use crate::error::{HarnessError, Result};
use crate::platform::PlatformKey;

#[cfg(windows)]
const CREATE_NEW_CONSOLE: u32 = 0x0000_0010;

/// Fully resolved process invocation that opens a terminal window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
    /// Windows only: detach into a fresh console host.
    pub new_console: bool,
}

impl TerminalInvocation {
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }
        #[cfg(windows)]
        if self.new_console {
            use std::os::windows::process::CommandExt;
            command.creation_flags(CREATE_NEW_CONSOLE);
        }
        command
    }
}

impl fmt::Display for TerminalInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) || arg.is_empty() {
                write!(f, " {arg:?}")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        if let Some(dir) = &self.current_dir {
            write!(f, " (in {})", dir.display())?;
        }
        Ok(())
    }
}

/// How a terminal is opened on a given platform. Selected once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnStrategy {
    /// `cmd.exe /k`, which keeps the shell alive after the command.
    WindowsConsole,
    /// A graphical emulator running `bash -c "<cmd>; exec bash"`.
    PosixTerminal { emulator: String },
    /// The terminal application driven through `osascript`.
    MacTerminal { application: String },
    Unsupported,
}

impl SpawnStrategy {
    pub fn for_platform(platform: PlatformKey, terminal: &TerminalConfig) -> Self {
        match platform {
            PlatformKey::Windows => SpawnStrategy::WindowsConsole,
            PlatformKey::Linux => SpawnStrategy::PosixTerminal {
                emulator: terminal.linux_emulator.clone(),
            },
            PlatformKey::MacOs => SpawnStrategy::MacTerminal {
                application: terminal.macos_application.clone(),
            },
            PlatformKey::Other => SpawnStrategy::Unsupported,
        }
    }

    /// Build the invocation for `command`, or `None` when no strategy applies.
    pub fn invocation(&self, command: &str, working_dir: &Path) -> Option<TerminalInvocation> {
        match self {
            SpawnStrategy::WindowsConsole => Some(TerminalInvocation {
                program: "cmd.exe".into(),
                args: vec!["/k".into(), command.into()],
                current_dir: Some(working_dir.to_path_buf()),
                new_console: true,
            }),
            SpawnStrategy::PosixTerminal { emulator } => Some(TerminalInvocation {
                program: emulator.clone(),
                args: vec![
                    "--".into(),
                    "bash".into(),
                    "-c".into(),
                    format!("{command}; exec bash"),
                ],
                current_dir: Some(working_dir.to_path_buf()),
                new_console: false,
            }),
            SpawnStrategy::MacTerminal { application } => {
                // The script changes directory itself; osascript's own cwd is irrelevant.
                let script = format!(
                    "tell application \"{}\" to do script \"cd \\\"{}\\\" && {} && exec bash\"",
                    applescript_escape(application),
                    applescript_escape(&applescript_escape(&working_dir.display().to_string())),
                    applescript_escape(command),
                );
                Some(TerminalInvocation {
                    program: "osascript".into(),
                    args: vec!["-e".into(), script],
                    current_dir: None,
                    new_console: false,
                })
            }
            SpawnStrategy::Unsupported => None,
        }
    }
}

fn applescript_escape(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Result of a single spawn request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// A terminal process was started; the handle is not retained.
    Launched { pid: u32 },
    /// The invocation was printed but not executed.
    Planned,
    /// No strategy exists for the platform.
    Skipped,
}

/// Opens one visible terminal running `command` in `working_dir`.
///
/// Implementations must not wait on the spawned process.
pub trait TerminalSpawner {
    fn spawn(&self, command: &str, working_dir: &Path) -> Result<SpawnOutcome>;
}

impl<T: TerminalSpawner + ?Sized> TerminalSpawner for &T {
    fn spawn(&self, command: &str, working_dir: &Path) -> Result<SpawnOutcome> {
        (**self).spawn(command, working_dir)
    }
}

impl<T: TerminalSpawner + ?Sized> TerminalSpawner for Box<T> {
    fn spawn(&self, command: &str, working_dir: &Path) -> Result<SpawnOutcome> {
        (**self).spawn(command, working_dir)
    }
}

fn report_unsupported(command: &str) -> SpawnOutcome {
    launch_warn!("unsupported platform, no terminal opened for `{}`", command);
    SpawnOutcome::Skipped
}

/// Spawner that really opens terminal windows.
#[derive(Debug, Clone)]
pub struct OsTerminalSpawner {
    strategy: SpawnStrategy,
}

impl OsTerminalSpawner {
    pub fn new(strategy: SpawnStrategy) -> Self {
        Self { strategy }
    }
}

impl TerminalSpawner for OsTerminalSpawner {
    fn spawn(&self, command: &str, working_dir: &Path) -> Result<SpawnOutcome> {
        let Some(invocation) = self.strategy.invocation(command, working_dir) else {
            return Ok(report_unsupported(command));
        };
        let child = invocation
            .to_command()
            .spawn()
            .map_err(|source| HarnessError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;
        let pid = child.id();
        launch_debug!("opened terminal pid={} via {}", pid, invocation.program);
        Ok(SpawnOutcome::Launched { pid })
    }
}

/// Spawner that prints each invocation instead of running it.
#[derive(Debug, Clone)]
pub struct DryRunSpawner {
    strategy: SpawnStrategy,
}

impl DryRunSpawner {
    pub fn new(strategy: SpawnStrategy) -> Self {
        Self { strategy }
    }
}

impl TerminalSpawner for DryRunSpawner {
    fn spawn(&self, command: &str, working_dir: &Path) -> Result<SpawnOutcome> {
        let Some(invocation) = self.strategy.invocation(command, working_dir) else {
            return Ok(report_unsupported(command));
        };
        println!("{invocation}");
        launch_debug!(
            context = LaunchContext::new(),
            "dry run, terminal not opened: {}",
            command
        );
        Ok(SpawnOutcome::Planned)
    }
}
