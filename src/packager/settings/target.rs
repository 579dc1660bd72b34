//! Platform target definitions.

use serde::{Deserialize, Serialize};

/// Operating system family a target's build output is intended for.
///
/// Drives per-family packaging behavior: macOS targets get an `.app`
/// bundle, Windows targets keep the `.exe` suffix on the renamed
/// executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetOs {
    /// Linux distributions
    Linux,
    /// Apple macOS
    #[serde(rename = "macos")]
    MacOs,
    /// Microsoft Windows
    Windows,
}

impl TargetOs {
    /// Returns the lowercase name used in config files and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetOs::Linux => "linux",
            TargetOs::MacOs => "macos",
            TargetOs::Windows => "windows",
        }
    }

}

impl std::fmt::Display for TargetOs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One platform the publish run packages for.
///
/// Pairs the operator-facing display name with the runtime identifier
/// handed to the build tool. The two are independent: the display name
/// appears in archive names and log lines, the runtime identifier in
/// build invocations and output paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformTarget {
    name: String,
    runtime: String,
    os: TargetOs,
}

impl PlatformTarget {
    /// Creates a new platform target.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name used in archive names (e.g. "Windows-x64")
    /// * `runtime` - Runtime identifier passed to the build tool (e.g. "win-x64")
    /// * `os` - OS family of the produced binaries
    pub fn new(name: impl Into<String>, runtime: impl Into<String>, os: TargetOs) -> Self {
        Self {
            name: name.into(),
            runtime: runtime.into(),
            os,
        }
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the runtime identifier.
    pub fn runtime(&self) -> &str {
        &self.runtime
    }

    /// Returns the OS family.
    pub fn os(&self) -> TargetOs {
        self.os
    }

    /// Returns true for targets that get a macOS `.app` bundle.
    pub fn is_macos(&self) -> bool {
        self.os == TargetOs::MacOs
    }
}

impl std::fmt::Display for PlatformTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.runtime)
    }
}
