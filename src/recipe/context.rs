// src/recipe/context.rs

//! Per-invocation context a recipe is rendered against

use crate::error::Result;
use crate::settings::Settings;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Working directories of one packaging invocation
///
/// Paths are relative to the orchestrator's working root; recipes only
/// describe layout, they never touch the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folders {
    pub source: PathBuf,
    pub build: PathBuf,
    pub package: PathBuf,
}

impl Default for Folders {
    fn default() -> Self {
        Self {
            source: PathBuf::from("src"),
            build: PathBuf::from("build"),
            package: PathBuf::from("package"),
        }
    }
}

/// Recipe options resolved for one invocation
///
/// `fpic` is `None` once the option has been dropped: shared builds imply
/// position-independent code and Windows has no such toggle, mirroring how
/// the option is deleted rather than defaulted in those cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub shared: bool,
    pub fpic: Option<bool>,
    /// Free-form feature switches, e.g. "xnnpack"
    pub features: BTreeSet<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            shared: false,
            fpic: Some(true),
            features: BTreeSet::new(),
        }
    }
}

impl Options {
    /// Drop options that do not apply to the given platform
    pub fn normalize(mut self, settings: &Settings) -> Self {
        if settings.os.is_windows() || self.shared {
            self.fpic = None;
        }
        self
    }

    /// Enable a feature switch
    pub fn with_feature(mut self, name: impl Into<String>) -> Self {
        self.features.insert(name.into());
        self
    }

    /// Whether a feature switch is enabled
    pub fn feature(&self, name: &str) -> bool {
        self.features.contains(name)
    }
}

/// Everything a recipe needs to render one invocation
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub name: String,
    pub version: String,
    pub settings: Settings,
    pub options: Options,
    pub folders: Folders,
}

impl BuildContext {
    /// Create a context with default options and folder layout
    pub fn new(name: impl Into<String>, version: impl Into<String>, settings: Settings) -> Self {
        let options = Options::default().normalize(&settings);
        Self {
            name: name.into(),
            version: version.into(),
            settings,
            options,
            folders: Folders::default(),
        }
    }

    /// Replace the options, re-normalizing against the settings
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options.normalize(&self.settings);
        self
    }

    /// The version as a semantic version, for ordered comparisons
    pub fn semver(&self) -> Result<semver::Version> {
        Ok(semver::Version::parse(&self.version)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fpic_dropped_on_windows() {
        let settings = Settings::parse("windows", "x86_64", "release").unwrap();
        let options = Options::default().normalize(&settings);
        assert_eq!(options.fpic, None);
    }

    #[test]
    fn test_fpic_dropped_for_shared_builds() {
        let settings = Settings::parse("linux", "x86_64", "release").unwrap();
        let options = Options {
            shared: true,
            ..Options::default()
        }
        .normalize(&settings);
        assert_eq!(options.fpic, None);
    }

    #[test]
    fn test_fpic_kept_for_static_unix_builds() {
        let settings = Settings::parse("linux", "x86_64", "release").unwrap();
        let options = Options::default().normalize(&settings);
        assert_eq!(options.fpic, Some(true));
    }

    #[test]
    fn test_feature_switches() {
        let options = Options::default().with_feature("xnnpack");
        assert!(options.feature("xnnpack"));
        assert!(!options.feature("cuda"));
    }

    #[test]
    fn test_context_semver() {
        let settings = Settings::parse("linux", "x86_64", "release").unwrap();
        let ctx = BuildContext::new("libzip", "1.11.2", settings);
        assert_eq!(ctx.semver().unwrap(), semver::Version::new(1, 11, 2));

        let ctx = BuildContext::new("libzip", "not-a-version", settings);
        assert!(ctx.semver().is_err());
    }
}
