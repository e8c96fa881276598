// src/recipe/harness.rs

//! Test-package harness
//!
//! After a recipe is packaged, a minimal probe executable is built against
//! the packaged artifacts to verify that consumers can actually link and
//! run them. The harness describes that probe build: it requires exactly
//! the tested reference, configures a plain CMake build, and runs the probe
//! only when the build settings can execute on the host.

use crate::recipe::context::Folders;
use crate::recipe::plan::BuildPlan;
use crate::settings::Settings;
use crate::toolchain::CmakeToolchain;
use std::path::PathBuf;

/// Probe build for one packaged recipe reference
#[derive(Debug, Clone)]
pub struct TestHarness {
    /// The `name/version` reference under test
    tested: String,
}

impl TestHarness {
    /// Create a harness for a packaged reference
    pub fn new(tested: impl Into<String>) -> Self {
        Self {
            tested: tested.into(),
        }
    }

    /// The reference under test
    pub fn tested(&self) -> &str {
        &self.tested
    }

    /// The probe requires exactly the tested reference
    pub fn requirements(&self) -> Vec<String> {
        vec![self.tested.clone()]
    }

    /// Probe builds take the default toolchain
    pub fn toolchain(&self) -> CmakeToolchain {
        CmakeToolchain::new()
    }

    /// Plain CMake build of the probe sources
    pub fn build_plan(&self) -> BuildPlan {
        BuildPlan::Cmake {
            script_folder: None,
            cli_args: Vec::new(),
        }
    }

    /// Path of the probe binary to execute, or `None` when the probe was
    /// cross-compiled and cannot run on this host
    pub fn test_command(
        &self,
        folders: &Folders,
        build: &Settings,
        host: &Settings,
    ) -> Option<PathBuf> {
        build
            .can_run(host)
            .then(|| folders.build.join("test_package"))
    }
}
