// src/recipe/mod.rs

//! Recipe lifecycle framework
//!
//! A recipe maps the lifecycle of packaging one third-party library onto a
//! fixed set of callbacks, each a pure function from the invocation context
//! to a description the orchestrator acts on:
//!
//! - `requirements` / `tool_requirements`: dependency references, resolved
//!   externally
//! - `source`: which archive to fetch, keyed by version
//! - `toolchain`: the build-system cache-variable file
//! - `build_plan`: how binaries get produced
//! - `package_plan`: ordered steps assembling the output tree
//! - `package_info`: the metadata record registered with the binary cache
//!
//! Recipes never fetch, compile, or write files themselves; fetching,
//! building, and dependency resolution are the orchestrator's job.

mod context;
mod data;
mod harness;
mod plan;

pub use context::{BuildContext, Folders, Options};
pub use data::{PatchEntry, RecipeData, SourceEntry, SourceSpec};
pub use harness::TestHarness;
pub use plan::{BuildPlan, PackageStep};

use crate::error::Result;
use crate::registry::PackageMetadata;
use crate::toolchain::CmakeToolchain;

/// Lifecycle callbacks of one build recipe
pub trait Recipe: std::fmt::Debug {
    /// Package name, unique within the collection
    fn name(&self) -> &str;

    /// Short human-readable description
    fn description(&self) -> &str;

    /// SPDX license identifier of the packaged library
    fn license(&self) -> &str;

    /// Upstream homepage
    fn homepage(&self) -> &str;

    /// Versions this recipe can package
    fn versions(&self) -> Vec<String>;

    /// Options an invocation starts from
    fn default_options(&self) -> Options {
        Options::default()
    }

    /// Reject context combinations the recipe cannot describe
    fn validate(&self, _ctx: &BuildContext) -> Result<()> {
        Ok(())
    }

    /// Runtime dependency references (`name/version`)
    fn requirements(&self, _ctx: &BuildContext) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    /// Build-time tool references (`name/version`)
    fn tool_requirements(&self, _ctx: &BuildContext) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    /// Source archive to fetch, or `None` when acquisition happens in the
    /// build plan
    fn source(&self, ctx: &BuildContext) -> Result<Option<SourceSpec>>;

    /// Build-system toolchain file, or `None` for recipes with no build
    fn toolchain(&self, ctx: &BuildContext) -> Result<Option<CmakeToolchain>>;

    /// How binaries get produced
    fn build_plan(&self, ctx: &BuildContext) -> Result<BuildPlan>;

    /// Ordered packaging steps
    fn package_plan(&self, ctx: &BuildContext) -> Result<Vec<PackageStep>>;

    /// Metadata registered with the binary cache
    fn package_info(&self, ctx: &BuildContext) -> Result<PackageMetadata>;
}
