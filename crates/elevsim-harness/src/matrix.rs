//! ---
//! elevsim_section: "02-launch"
//! elevsim_subsection: "module"
//! elevsim_type: "source"
//! elevsim_scope: "code"
//! elevsim_description: "Static launch matrix mapping platforms to ordered server/client commands."
//! elevsim_version: "v0.1.0"
//! elevsim_owner: "tbd"
//! ---
//! The launch matrix is the only data the harness carries. Each supported
//! platform owns one [`PlatformProfile`]; server and client command lists are
//! both derived from its ordered `ports`, so the Nth client always pairs with
//! the Nth server and the two lists never differ in length.

use std::collections::HashSet;
use std::fmt::Write as _;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, Result};
use crate::platform::{PlatformKey, ProcessClass, Role};

/// Ports shared by every embedded profile, in launch order.
pub const DEFAULT_PORTS: [u16; 3] = [12120, 12121, 12122];

fn default_binary_dir() -> String {
    "../binaries".to_owned()
}

/// Executables and port layout for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformProfile {
    /// Directory holding the binaries, relative to the working directory.
    #[serde(default = "default_binary_dir")]
    pub binary_dir: String,
    pub server_executable: String,
    pub client_executable: String,
    /// One server and one client per entry, in launch order.
    #[serde(default)]
    pub ports: Vec<u16>,
}

impl PlatformProfile {
    pub fn new(server_executable: impl Into<String>, client_executable: impl Into<String>) -> Self {
        Self {
            binary_dir: default_binary_dir(),
            server_executable: server_executable.into(),
            client_executable: client_executable.into(),
            ports: DEFAULT_PORTS.to_vec(),
        }
    }

    pub fn with_ports(mut self, ports: impl IntoIterator<Item = u16>) -> Self {
        self.ports = ports.into_iter().collect();
        self
    }

    fn executable(&self, class: ProcessClass) -> &str {
        match class {
            ProcessClass::Server => &self.server_executable,
            ProcessClass::Client => &self.client_executable,
        }
    }

    fn validate(&self, platform: PlatformKey) -> Result<()> {
        let invalid = |reason: String| HarnessError::InvalidProfile { platform, reason };

        if !platform.is_supported() {
            return Err(invalid("no launch strategy exists for this platform".into()));
        }
        if self.binary_dir.trim().is_empty() {
            return Err(invalid("binary_dir must not be empty".into()));
        }
        for class in [ProcessClass::Server, ProcessClass::Client] {
            if self.executable(class).trim().is_empty() {
                return Err(invalid(format!("{class} executable must not be empty")));
            }
        }
        let mut seen = HashSet::new();
        for port in &self.ports {
            if !seen.insert(port) {
                return Err(invalid(format!("port {port} is listed more than once")));
            }
        }
        Ok(())
    }
}

/// Node identity handed to a client process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeAssignment {
    pub id: u32,
    pub role: Role,
}

/// Structured form of a single launch command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchDescriptor {
    pub class: ProcessClass,
    pub port: u16,
    /// Present for clients only.
    pub node: Option<NodeAssignment>,
}

impl LaunchDescriptor {
    pub fn server(port: u16) -> Self {
        Self {
            class: ProcessClass::Server,
            port,
            node: None,
        }
    }

    pub fn client(port: u16, id: u32, role: Role) -> Self {
        Self {
            class: ProcessClass::Client,
            port,
            node: Some(NodeAssignment { id, role }),
        }
    }

    /// Render the shell command executed inside the spawned terminal.
    pub fn render(&self, profile: &PlatformProfile) -> String {
        let mut command = format!(
            "cd {} && ./{} --port {}",
            profile.binary_dir,
            profile.executable(self.class),
            self.port
        );
        if let Some(node) = self.node {
            let _ = write!(command, " --id {} --role {}", node.id, node.role);
        }
        command
    }
}

/// A descriptor paired with its rendered command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedLaunch {
    pub descriptor: LaunchDescriptor,
    pub command: String,
}

/// Platform keyed table of launch profiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchMatrix {
    profiles: IndexMap<PlatformKey, PlatformProfile>,
}

impl Default for LaunchMatrix {
    fn default() -> Self {
        Self::embedded()
    }
}

impl LaunchMatrix {
    /// Matrix compiled into the harness.
    pub fn embedded() -> Self {
        let mut profiles = IndexMap::new();
        profiles.insert(
            PlatformKey::Windows,
            PlatformProfile::new("SimElevatorServerWindows", "elevatorClientWindows"),
        );
        profiles.insert(
            PlatformKey::Linux,
            PlatformProfile::new("SimElevatorServer", "elevatorClient"),
        );
        profiles.insert(
            PlatformKey::MacOs,
            PlatformProfile::new("SimElevatorServerMacOS", "elevatorClientMacOS"),
        );
        Self { profiles }
    }

    /// A matrix with no profiles at all.
    pub fn empty() -> Self {
        Self {
            profiles: IndexMap::new(),
        }
    }

    /// Replace (or add) the profile for `platform`.
    pub fn with_profile(mut self, platform: PlatformKey, profile: PlatformProfile) -> Self {
        self.profiles.insert(platform, profile);
        self
    }

    pub fn profile(&self, platform: PlatformKey) -> Option<&PlatformProfile> {
        self.profiles.get(&platform)
    }

    pub fn supports(&self, platform: PlatformKey) -> bool {
        self.profiles.contains_key(&platform)
    }

    pub fn platforms(&self) -> impl Iterator<Item = PlatformKey> + '_ {
        self.profiles.keys().copied()
    }

    /// Structured launch list for `(platform, class)`; empty for unknown platforms.
    pub fn descriptors(&self, platform: PlatformKey, class: ProcessClass) -> Vec<LaunchDescriptor> {
        let Some(profile) = self.profiles.get(&platform) else {
            return Vec::new();
        };
        profile
            .ports
            .iter()
            .enumerate()
            .map(|(position, &port)| match class {
                ProcessClass::Server => LaunchDescriptor::server(port),
                ProcessClass::Client => {
                    LaunchDescriptor::client(port, position as u32, Role::for_position(position))
                }
            })
            .collect()
    }

    /// Descriptors together with their rendered commands, in spawn order.
    pub fn plan(&self, platform: PlatformKey, class: ProcessClass) -> Vec<PlannedLaunch> {
        let Some(profile) = self.profiles.get(&platform) else {
            return Vec::new();
        };
        self.descriptors(platform, class)
            .into_iter()
            .map(|descriptor| PlannedLaunch {
                command: descriptor.render(profile),
                descriptor,
            })
            .collect()
    }

    /// Ordered command strings for `(platform, class)`.
    pub fn specs(&self, platform: PlatformKey, class: ProcessClass) -> Vec<String> {
        self.plan(platform, class)
            .into_iter()
            .map(|planned| planned.command)
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        for (platform, profile) in &self.profiles {
            profile.validate(*platform)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_linux_commands_match_binary_layout() {
        let matrix = LaunchMatrix::embedded();
        assert_eq!(
            matrix.specs(PlatformKey::Linux, ProcessClass::Server),
            vec![
                "cd ../binaries && ./SimElevatorServer --port 12120",
                "cd ../binaries && ./SimElevatorServer --port 12121",
                "cd ../binaries && ./SimElevatorServer --port 12122",
            ]
        );
        assert_eq!(
            matrix.specs(PlatformKey::Linux, ProcessClass::Client),
            vec![
                "cd ../binaries && ./elevatorClient --port 12120 --id 0 --role Master",
                "cd ../binaries && ./elevatorClient --port 12121 --id 1 --role PrimaryBackup",
                "cd ../binaries && ./elevatorClient --port 12122 --id 2 --role Regular",
            ]
        );
    }

    #[test]
    fn windows_and_macos_use_their_own_executables() {
        let matrix = LaunchMatrix::embedded();
        assert_eq!(
            matrix.specs(PlatformKey::Windows, ProcessClass::Server)[0],
            "cd ../binaries && ./SimElevatorServerWindows --port 12120"
        );
        assert_eq!(
            matrix.specs(PlatformKey::MacOs, ProcessClass::Client)[1],
            "cd ../binaries && ./elevatorClientMacOS --port 12121 --id 1 --role PrimaryBackup"
        );
    }

    #[test]
    fn unknown_platform_yields_nothing() {
        let matrix = LaunchMatrix::embedded();
        assert!(!matrix.supports(PlatformKey::Other));
        assert!(matrix.specs(PlatformKey::Other, ProcessClass::Server).is_empty());
        assert!(matrix.descriptors(PlatformKey::Other, ProcessClass::Client).is_empty());
    }

    #[test]
    fn validate_rejects_duplicate_ports() {
        let matrix = LaunchMatrix::embedded().with_profile(
            PlatformKey::Linux,
            PlatformProfile::new("srv", "cli").with_ports([9000, 9001, 9000]),
        );
        let err = matrix.validate().unwrap_err();
        assert!(err.to_string().contains("port 9000"), "{err}");
    }

    #[test]
    fn validate_rejects_blank_executables_and_other_platform() {
        let blank = LaunchMatrix::empty()
            .with_profile(PlatformKey::MacOs, PlatformProfile::new("srv", "  "));
        assert!(matches!(
            blank.validate(),
            Err(HarnessError::InvalidProfile {
                platform: PlatformKey::MacOs,
                ..
            })
        ));

        let other =
            LaunchMatrix::empty().with_profile(PlatformKey::Other, PlatformProfile::new("s", "c"));
        assert!(other.validate().is_err());
    }

    #[test]
    fn empty_port_list_is_valid_and_launches_nothing() {
        let matrix = LaunchMatrix::empty()
            .with_profile(PlatformKey::Linux, PlatformProfile::new("s", "c").with_ports(Vec::new()));
        matrix.validate().expect("empty port list is allowed");
        assert!(matrix.plan(PlatformKey::Linux, ProcessClass::Client).is_empty());
    }
}
