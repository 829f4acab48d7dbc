//! ---
//! elevsim_section: "02-launch"
//! elevsim_subsection: "module"
//! elevsim_type: "source"
//! elevsim_scope: "code"
//! elevsim_description: "Error taxonomy for configuration loading and terminal spawning."
//! elevsim_version: "v0.1.0"
//! elevsim_owner: "tbd"
//! ---
use std::path::PathBuf;

use thiserror::Error;

use crate::platform::PlatformKey;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("unable to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("unknown platform `{0}` in launch matrix (expected windows, linux or macos)")]
    UnknownPlatform(String),
    #[error("launch matrix entry for {platform} is invalid: {reason}")]
    InvalidProfile {
        platform: PlatformKey,
        reason: String,
    },
    #[error("unable to resolve working directory {}: {source}", path.display())]
    WorkingDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to open terminal via `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
