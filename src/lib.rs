// src/lib.rs

//! Cookbook
//!
//! Build recipes for third-party native libraries, rendered for a binary
//! package cache. Each recipe describes, but never executes, the lifecycle
//! of packaging one upstream library: source acquisition, toolchain
//! generation, build invocation, packaging steps, and dependency metadata
//! export. Fetching, compiling, and dependency resolution belong to the
//! external orchestrator.
//!
//! # Architecture
//!
//! - Components: typed component graph descriptor with construction-time
//!   validation and platform-conditioned resolution
//! - Recipes: lifecycle callbacks as pure description producers, with
//!   version facts in TOML data tables
//! - Settings: fail-fast platform descriptor (OS family, architecture,
//!   build type)
//! - Registry: the metadata record the cache's output model consumes

pub mod cli;
pub mod components;
mod error;
pub mod recipe;
pub mod recipes;
pub mod registry;
pub mod settings;
pub mod toolchain;

pub use components::{
    alias_shim, module_file_rel_path, platform_augmentation, Component, ComponentMetadata,
    ComponentTable, Requirement,
};
pub use error::{Error, Result};
pub use recipe::{
    BuildContext, BuildPlan, Folders, Options, PackageStep, PatchEntry, Recipe, RecipeData,
    SourceEntry, SourceSpec, TestHarness,
};
pub use registry::PackageMetadata;
pub use settings::{BuildType, Settings, TargetArch, TargetOs};
pub use toolchain::{CacheValue, CmakeToolchain, TOOLCHAIN_FILE};
