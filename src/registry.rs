// src/registry.rs

//! Package metadata registry model
//!
//! The record a recipe's metadata-export stage hands to the cache's
//! metadata registry: generator file names, top-level link information for
//! single-target packages, and the ordered per-component metadata produced
//! by the component graph descriptor for multi-target packages.

use crate::components::ComponentMetadata;
use serde::Serialize;
use std::path::PathBuf;

/// Exported metadata for one packaged library
#[derive(Debug, Clone, Default, Serialize)]
pub struct PackageMetadata {
    /// Consumer-facing file name for the build-system config
    pub cmake_file_name: Option<String>,
    /// Canonical target name for single-target packages
    pub cmake_target_name: Option<String>,
    /// pkg-config module name
    pub pkg_config_name: Option<String>,
    /// Library artifact base names for single-target packages
    pub libs: Vec<String>,
    /// Consumer preprocessor definitions
    pub defines: Vec<String>,
    /// Platform libraries linked in addition to the package's own
    pub system_libs: Vec<String>,
    /// Apple frameworks for single-target packages
    pub frameworks: Vec<String>,
    /// Generated build-module files consumers must include
    pub build_modules: Vec<PathBuf>,
    /// Per-component metadata in table order, empty for single-target packages
    pub components: Vec<ComponentMetadata>,
}

impl PackageMetadata {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable access to a component by table name
    pub fn component_mut(&mut self, name: &str) -> Option<&mut ComponentMetadata> {
        self.components.iter_mut().find(|c| c.name == name)
    }
}
