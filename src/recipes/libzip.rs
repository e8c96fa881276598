// src/recipes/libzip.rs

//! Recipe for libzip, a C library for reading, creating, and modifying
//! zip archives
//!
//! A plain CMake build: the toolchain turns off tools, examples, docs, and
//! regression tests; packaging drops the upstream pkg-config and CMake
//! install trees in favor of the cache's own generators. Debug builds of
//! the library carry a `d` suffix in the artifact name.

use crate::error::Result;
use crate::recipe::{BuildContext, BuildPlan, PackageStep, Recipe, RecipeData, SourceSpec};
use crate::registry::PackageMetadata;
use crate::settings::BuildType;
use crate::toolchain::CmakeToolchain;

#[derive(Debug)]
pub struct LibzipRecipe {
    data: RecipeData,
}

impl LibzipRecipe {
    pub fn new() -> Result<Self> {
        Ok(Self {
            data: RecipeData::parse(include_str!("data/libzip.toml"))?,
        })
    }
}

impl Recipe for LibzipRecipe {
    fn name(&self) -> &str {
        "libzip"
    }

    fn description(&self) -> &str {
        "A C library for reading, creating, and modifying zip archives"
    }

    fn license(&self) -> &str {
        "BSD-3-Clause"
    }

    fn homepage(&self) -> &str {
        "https://libzip.org"
    }

    fn versions(&self) -> Vec<String> {
        self.data.versions()
    }

    fn requirements(&self, ctx: &BuildContext) -> Result<Vec<String>> {
        Ok(self.data.requires(&ctx.version).to_vec())
    }

    fn source(&self, ctx: &BuildContext) -> Result<Option<SourceSpec>> {
        Ok(Some(self.data.source(self.name(), &ctx.version)?.to_spec()?))
    }

    fn toolchain(&self, ctx: &BuildContext) -> Result<Option<CmakeToolchain>> {
        let mut tc = CmakeToolchain::new();
        tc.set_bool("BUILD_SHARED_LIBS", ctx.options.shared);
        tc.set_bool("BUILD_TOOLS", false);
        tc.set_bool("BUILD_REGRESS", false);
        tc.set_bool("BUILD_EXAMPLES", false);
        tc.set_bool("BUILD_DOC", false);
        if let Some(fpic) = ctx.options.fpic {
            tc.set_bool("CMAKE_POSITION_INDEPENDENT_CODE", fpic);
        }
        Ok(Some(tc))
    }

    fn build_plan(&self, _ctx: &BuildContext) -> Result<BuildPlan> {
        Ok(BuildPlan::Cmake {
            script_folder: None,
            cli_args: Vec::new(),
        })
    }

    fn package_plan(&self, ctx: &BuildContext) -> Result<Vec<PackageStep>> {
        Ok(vec![
            PackageStep::copy("LICENSE", ctx.folders.source.clone(), "licenses"),
            PackageStep::CmakeInstall,
            PackageStep::remove_dir("lib/pkgconfig"),
            PackageStep::remove_dir("lib/cmake"),
        ])
    }

    fn package_info(&self, ctx: &BuildContext) -> Result<PackageMetadata> {
        let mut metadata = PackageMetadata::new();
        metadata.cmake_file_name = Some("libzip".to_string());
        metadata.cmake_target_name = Some("libzip::zip".to_string());
        metadata.pkg_config_name = Some("libzip".to_string());
        metadata.libs = vec![match ctx.settings.build_type {
            BuildType::Debug => "zipd".to_string(),
            BuildType::Release => "zip".to_string(),
        }];
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn ctx(build_type: &str) -> BuildContext {
        let settings = Settings::parse("linux", "x86_64", build_type).unwrap();
        BuildContext::new("libzip", "1.11.2", settings)
    }

    #[test]
    fn test_debug_builds_get_suffixed_artifact() {
        let recipe = LibzipRecipe::new().unwrap();
        assert_eq!(recipe.package_info(&ctx("debug")).unwrap().libs, vec!["zipd"]);
        assert_eq!(recipe.package_info(&ctx("release")).unwrap().libs, vec!["zip"]);
    }

    #[test]
    fn test_toolchain_disables_extras() {
        let recipe = LibzipRecipe::new().unwrap();
        let tc = recipe.toolchain(&ctx("release")).unwrap().unwrap();
        for var in ["BUILD_TOOLS", "BUILD_REGRESS", "BUILD_EXAMPLES", "BUILD_DOC"] {
            assert_eq!(
                tc.get(var),
                Some(&crate::toolchain::CacheValue::Bool(false)),
                "{var} should be off"
            );
        }
        // static unix builds keep the PIC toggle
        assert!(tc.get("CMAKE_POSITION_INDEPENDENT_CODE").is_some());
    }

    #[test]
    fn test_package_plan_drops_upstream_config_trees() {
        let recipe = LibzipRecipe::new().unwrap();
        let steps = recipe.package_plan(&ctx("release")).unwrap();
        assert!(steps.contains(&PackageStep::remove_dir("lib/pkgconfig")));
        assert!(steps.contains(&PackageStep::remove_dir("lib/cmake")));
        assert!(steps.contains(&PackageStep::CmakeInstall));
    }

    #[test]
    fn test_versioned_requirements() {
        let recipe = LibzipRecipe::new().unwrap();
        let requires = recipe.requirements(&ctx("release")).unwrap();
        assert!(requires.contains(&"zlib/1.3.1".to_string()));
        assert!(requires.contains(&"bzip2/1.0.8".to_string()));
    }

    #[test]
    fn test_unknown_version_is_rejected_at_source() {
        let recipe = LibzipRecipe::new().unwrap();
        let settings = Settings::parse("linux", "x86_64", "release").unwrap();
        let ctx = BuildContext::new("libzip", "0.0.1", settings);
        assert!(recipe.source(&ctx).is_err());
    }
}
