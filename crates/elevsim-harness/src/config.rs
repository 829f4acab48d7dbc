//! ---
//! elevsim_section: "02-launch"
//! elevsim_subsection: "module"
//! elevsim_type: "source"
//! elevsim_scope: "code"
//! elevsim_description: "Launcher configuration loading and working directory resolution."
//! elevsim_version: "v0.1.0"
//! elevsim_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use elevsim_logging::LoggingConfig;
use indexmap::IndexMap;
use path_absolutize::Absolutize;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use tracing::debug;

use crate::error::{HarnessError, Result};
use crate::matrix::{LaunchMatrix, PlatformProfile};
use crate::platform::PlatformKey;

/// File name of the configuration bundled next to the launch scripts.
pub const CONFIG_FILE_NAME: &str = "launch.toml";

fn default_spawn_interval() -> Duration {
    Duration::from_secs(1)
}

fn default_settle_interval() -> Duration {
    Duration::from_secs(2)
}

fn default_linux_emulator() -> String {
    "gnome-terminal".to_owned()
}

fn default_macos_application() -> String {
    "Terminal".to_owned()
}

/// Directory holding the bundled `launch.toml`; the default working directory.
pub fn bundled_scripts_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../scripts")
}

/// Best-effort pacing between spawns. Not a readiness guarantee.
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Pause after every individual spawn.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "spawn_interval_ms", default = "default_spawn_interval")]
    pub spawn_interval: Duration,
    /// Extra pause between the last server and the first client.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "settle_interval_ms", default = "default_settle_interval")]
    pub settle_interval: Duration,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            spawn_interval: default_spawn_interval(),
            settle_interval: default_settle_interval(),
        }
    }
}

impl PacingConfig {
    /// Pacing with every delay set to zero.
    pub fn immediate() -> Self {
        Self {
            spawn_interval: Duration::ZERO,
            settle_interval: Duration::ZERO,
        }
    }
}

/// Terminal programs used by the spawn strategies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalConfig {
    #[serde(default = "default_linux_emulator")]
    pub linux_emulator: String,
    #[serde(default = "default_macos_application")]
    pub macos_application: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            linux_emulator: default_linux_emulator(),
            macos_application: default_macos_application(),
        }
    }
}

/// Primary configuration object for the launcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherConfig {
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub terminal: TerminalConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Relative values resolve against the config file's directory.
    #[serde(default)]
    pub working_directory: Option<PathBuf>,
    /// Per-platform replacements for the embedded launch matrix.
    #[serde(default)]
    pub matrix: IndexMap<String, PlatformProfile>,
}

/// A configuration together with the file it came from, if any.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: LauncherConfig,
    pub source: Option<PathBuf>,
}

impl LauncherConfig {
    pub const ENV_CONFIG_PATH: &'static str = "ELEVSIM_LAUNCH_CONFIG";

    /// Load configuration from `explicit`, `ELEVSIM_LAUNCH_CONFIG`, or the bundled file.
    ///
    /// Falls back to built-in defaults when none of them exist. An explicit path
    /// that cannot be read is an error.
    pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig> {
        let env_path = std::env::var(Self::ENV_CONFIG_PATH).ok();
        let bundled = bundled_scripts_dir().join(CONFIG_FILE_NAME);
        Self::load_from(explicit, env_path.as_deref(), &bundled)
    }

    pub(crate) fn load_from(
        explicit: Option<&Path>,
        env_path: Option<&str>,
        bundled: &Path,
    ) -> Result<LoadedConfig> {
        let source = match (explicit, env_path.filter(|p| !p.trim().is_empty())) {
            (Some(path), _) => Some(path.to_path_buf()),
            (None, Some(env)) => Some(PathBuf::from(env)),
            (None, None) if bundled.exists() => Some(bundled.to_path_buf()),
            (None, None) => None,
        };

        match source {
            Some(path) => Ok(LoadedConfig {
                config: Self::from_path(&path)?,
                source: Some(path),
            }),
            None => {
                debug!("no launcher configuration found, using defaults");
                Ok(LoadedConfig {
                    config: Self::default(),
                    source: None,
                })
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading launcher configuration");
        let contents = fs::read_to_string(path).map_err(|source| HarnessError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str::<LauncherConfig>(&contents).map_err(|source| {
            HarnessError::ConfigParse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.launch_matrix()?.validate()
    }

    /// Embedded matrix with any `[matrix.<platform>]` overrides applied.
    pub fn launch_matrix(&self) -> Result<LaunchMatrix> {
        let mut matrix = LaunchMatrix::embedded();
        for (key, profile) in &self.matrix {
            let platform = PlatformKey::from_str(key)
                .map_err(|_| HarnessError::UnknownPlatform(key.clone()))?;
            matrix = matrix.with_profile(platform, profile.clone());
        }
        Ok(matrix)
    }
}

impl LoadedConfig {
    /// Directory every launch command is issued from.
    pub fn working_directory(&self) -> Result<PathBuf> {
        let anchor = self
            .source
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(bundled_scripts_dir);

        let candidate = match &self.config.working_directory {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => anchor.join(dir),
            None => anchor,
        };

        candidate
            .absolutize()
            .map(|resolved| resolved.into_owned())
            .map_err(|source| HarnessError::WorkingDirectory {
                path: candidate.clone(),
                source,
            })
    }
}
