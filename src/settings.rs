// src/settings.rs

//! Resolved target platform settings
//!
//! A recipe is rendered against a platform descriptor: target OS family,
//! target architecture, and build type. All values parse through typed
//! enums; an OS or architecture string the recipes do not know is rejected
//! at construction rather than carried along as an unhandled fallthrough.

use crate::error::{Error, Result};
use serde::Serialize;
use strum_macros::{Display, EnumString};

/// Target operating system family
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum TargetOs {
    Windows,
    Linux,
    Macos,
    FreeBsd,
}

impl TargetOs {
    /// Windows family check, used by recipes that branch on linkage model
    pub fn is_windows(&self) -> bool {
        matches!(self, Self::Windows)
    }

    /// Apple platform check (frameworks, install-name fixups)
    pub fn is_apple(&self) -> bool {
        matches!(self, Self::Macos)
    }
}

/// Target processor architecture
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum TargetArch {
    X86,
    #[strum(serialize = "x86_64")]
    #[serde(rename = "x86_64")]
    X86_64,
    Armv7,
    Armv8,
    Riscv32,
    Riscv64,
}

impl TargetArch {
    /// RISC-V variants need libatomic linked explicitly
    pub fn is_riscv(&self) -> bool {
        matches!(self, Self::Riscv32 | Self::Riscv64)
    }
}

/// Build type driving artifact naming and optimization switches
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    Debug,
    Release,
}

/// The resolved platform a recipe is rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub os: TargetOs,
    pub arch: TargetArch,
    pub build_type: BuildType,
}

impl Settings {
    /// Create settings from already-typed values
    pub fn new(os: TargetOs, arch: TargetArch, build_type: BuildType) -> Self {
        Self {
            os,
            arch,
            build_type,
        }
    }

    /// Parse settings from strings, failing fast on anything unrecognized
    pub fn parse(os: &str, arch: &str, build_type: &str) -> Result<Self> {
        let os = os
            .parse::<TargetOs>()
            .map_err(|_| Error::invalid_configuration(format!("unsupported target OS: {os}")))?;
        let arch = arch.parse::<TargetArch>().map_err(|_| {
            Error::invalid_configuration(format!("unsupported target architecture: {arch}"))
        })?;
        let build_type = build_type.parse::<BuildType>().map_err(|_| {
            Error::invalid_configuration(format!("unsupported build type: {build_type}"))
        })?;
        Ok(Self::new(os, arch, build_type))
    }

    /// Whether a binary built for these settings can execute on `host`
    ///
    /// Same OS and same architecture always run; 32-bit x86 binaries run on
    /// an x86_64 host. Everything else is treated as cross-compiled.
    pub fn can_run(&self, host: &Settings) -> bool {
        self.os == host.os
            && (self.arch == host.arch
                || (self.arch == TargetArch::X86 && host.arch == TargetArch::X86_64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_settings() {
        let settings = Settings::parse("linux", "x86_64", "release").unwrap();
        assert_eq!(settings.os, TargetOs::Linux);
        assert_eq!(settings.arch, TargetArch::X86_64);
        assert_eq!(settings.build_type, BuildType::Release);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let settings = Settings::parse("Windows", "Armv8", "Debug").unwrap();
        assert_eq!(settings.os, TargetOs::Windows);
        assert_eq!(settings.arch, TargetArch::Armv8);
        assert_eq!(settings.build_type, BuildType::Debug);
    }

    #[test]
    fn test_parse_rejects_unknown_os() {
        let err = Settings::parse("beos", "x86_64", "release").unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
        assert!(err.to_string().contains("beos"));
    }

    #[test]
    fn test_parse_rejects_unknown_arch() {
        let err = Settings::parse("linux", "vax", "release").unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_riscv_detection() {
        assert!(TargetArch::Riscv32.is_riscv());
        assert!(TargetArch::Riscv64.is_riscv());
        assert!(!TargetArch::X86_64.is_riscv());
        assert!(!TargetArch::Armv8.is_riscv());
    }

    #[test]
    fn test_arch_round_trips_through_display() {
        for arch in ["x86", "x86_64", "armv7", "armv8", "riscv32", "riscv64"] {
            let parsed = arch.parse::<TargetArch>().unwrap();
            assert_eq!(parsed.to_string(), arch);
        }
    }

    #[test]
    fn test_can_run_same_platform() {
        let build = Settings::parse("linux", "x86_64", "release").unwrap();
        assert!(build.can_run(&build));
    }

    #[test]
    fn test_can_run_x86_on_x86_64() {
        let build = Settings::parse("linux", "x86", "release").unwrap();
        let host = Settings::parse("linux", "x86_64", "release").unwrap();
        assert!(build.can_run(&host));
        assert!(!host.can_run(&build));
    }

    #[test]
    fn test_can_run_rejects_cross() {
        let build = Settings::parse("linux", "riscv64", "release").unwrap();
        let host = Settings::parse("linux", "x86_64", "release").unwrap();
        assert!(!build.can_run(&host));

        let build = Settings::parse("windows", "x86_64", "release").unwrap();
        assert!(!build.can_run(&host));
    }
}
