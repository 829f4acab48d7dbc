//! ---
//! elevsim_section: "02-launch"
//! elevsim_subsection: "module"
//! elevsim_type: "source"
//! elevsim_scope: "code"
//! elevsim_description: "Host platform, process class and coordination role vocabulary."
//! elevsim_version: "v0.1.0"
//! elevsim_owner: "tbd"
//! ---
use strum::{AsRefStr, Display, EnumString};

/// Host platform a launch plan is selected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PlatformKey {
    Windows,
    Linux,
    MacOs,
    Other,
}

impl PlatformKey {
    /// Platform of the running host. Recomputed on every call.
    pub fn detect() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value onto a key.
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => PlatformKey::Windows,
            "linux" => PlatformKey::Linux,
            "macos" => PlatformKey::MacOs,
            _ => PlatformKey::Other,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, PlatformKey::Other)
    }
}

/// Servers are always started before clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ProcessClass {
    Server,
    Client,
}

/// Coordination role handed to a client. Rendered exactly as the client binary expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Role {
    Master,
    PrimaryBackup,
    Regular,
}

impl Role {
    /// Role implied by a client's position in its launch list.
    pub fn for_position(position: usize) -> Self {
        match position {
            0 => Role::Master,
            1 => Role::PrimaryBackup,
            _ => Role::Regular,
        }
    }
}
