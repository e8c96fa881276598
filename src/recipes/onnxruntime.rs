// src/recipes/onnxruntime.rs

//! Recipe for onnxruntime, the ONNX machine-learning inference runtime
//!
//! The upstream build produces nine linkable units with a fixed dependency
//! graph among them; consumers link individual units, so metadata export
//! goes through the component graph descriptor rather than a single
//! target. The table is authored leaves first: flatbuffers and common at
//! the bottom, session at the top.
//!
//! Packaging additionally writes the legacy alias shim so consumers on the
//! previous tooling generation can keep addressing targets by bare name.

use crate::components::{
    alias_shim, module_file_rel_path, Component, ComponentTable, Requirement,
};
use crate::error::Result;
use crate::recipe::{BuildContext, BuildPlan, PackageStep, Recipe, RecipeData, SourceSpec};
use crate::registry::PackageMetadata;
use crate::toolchain::CmakeToolchain;
use tracing::debug;

/// Namespace consumers address canonical targets under
const NAMESPACE: &str = "onnxruntime";

/// Protobuf is needed both as a library and as a build-time code generator
const PROTOBUF_VERSION: &str = "3.21.12";

/// The component graph of one upstream build, in dependency order
pub fn component_table() -> Result<ComponentTable> {
    ComponentTable::new(vec![
        Component::new("flatbuffers", "onnxruntime_flatbuffers")
            .with_libs(["onnxruntime_flatbuffers"])
            .with_requires([Requirement::external("flatbuffers", "flatbuffers")]),
        Component::new("common", "onnxruntime_common")
            .with_libs(["onnxruntime_common"])
            .with_requires([
                Requirement::external("protobuf", "libprotobuf"),
                Requirement::external("onnx", "onnx"),
                Requirement::external("abseil", "abseil"),
                Requirement::external("cpuinfo", "cpuinfo"),
                Requirement::external("ms-gsl", "ms-gsl"),
                Requirement::external("boost", "headers"),
                Requirement::external("safeint", "safeint"),
                Requirement::external("date", "date"),
            ]),
        Component::new("mlas", "onnxruntime_mlas").with_libs(["onnxruntime_mlas"]),
        Component::new("graph", "onnxruntime_graph")
            .with_libs(["onnxruntime_graph"])
            .with_requires([Requirement::internal("flatbuffers")]),
        Component::new("framework", "onnxruntime_framework")
            .with_libs(["onnxruntime_framework"])
            .with_requires([
                Requirement::internal("common"),
                Requirement::internal("mlas"),
            ]),
        Component::new("util", "onnxruntime_util")
            .with_libs(["onnxruntime_util"])
            .with_requires([Requirement::internal("mlas")]),
        Component::new("optimizer", "onnxruntime_optimizer")
            .with_libs(["onnxruntime_optimizer"])
            .with_requires([Requirement::internal("graph")]),
        Component::new("providers", "onnxruntime_providers")
            .with_libs(["onnxruntime_providers"])
            .with_requires([
                Requirement::external("re2", "re2"),
                Requirement::internal("framework"),
                Requirement::internal("util"),
            ]),
        Component::new("session", "onnxruntime_session")
            .with_libs(["onnxruntime_session"])
            .with_requires([
                Requirement::internal("providers"),
                Requirement::internal("graph"),
                Requirement::internal("optimizer"),
            ]),
    ])
}

#[derive(Debug)]
pub struct OnnxRuntimeRecipe {
    data: RecipeData,
}

impl OnnxRuntimeRecipe {
    pub fn new() -> Result<Self> {
        Ok(Self {
            data: RecipeData::parse(include_str!("data/onnxruntime.toml"))?,
        })
    }
}

impl Recipe for OnnxRuntimeRecipe {
    fn name(&self) -> &str {
        "onnxruntime"
    }

    fn description(&self) -> &str {
        "Cross-platform machine-learning inference and training accelerator"
    }

    fn license(&self) -> &str {
        "MIT"
    }

    fn homepage(&self) -> &str {
        "https://onnxruntime.ai"
    }

    fn versions(&self) -> Vec<String> {
        self.data.versions()
    }

    fn requirements(&self, ctx: &BuildContext) -> Result<Vec<String>> {
        let mut requires = vec![
            "abseil/20240116.1".to_string(),
            "boost/1.82.0".to_string(),
            "date/3.0.1".to_string(),
            "flatbuffers/23.5.26".to_string(),
            "onnx/1.16.0".to_string(),
            format!("protobuf/{PROTOBUF_VERSION}"),
            "ms-gsl/4.0.0".to_string(),
            "safeint/3.0.28".to_string(),
        ];
        requires.extend(self.data.requires(&ctx.version).iter().cloned());
        if !ctx.settings.os.is_windows() {
            requires.push("nsync/1.26.0".to_string());
        }
        Ok(requires)
    }

    fn tool_requirements(&self, _ctx: &BuildContext) -> Result<Vec<String>> {
        Ok(vec![format!("protobuf/{PROTOBUF_VERSION}")])
    }

    fn source(&self, ctx: &BuildContext) -> Result<Option<SourceSpec>> {
        Ok(Some(self.data.source(self.name(), &ctx.version)?.to_spec()?))
    }

    fn toolchain(&self, ctx: &BuildContext) -> Result<Option<CmakeToolchain>> {
        let mut tc = CmakeToolchain::new();
        tc.set_bool("onnxruntime_BUILD_SHARED_LIB", ctx.options.shared);
        tc.set_bool("onnxruntime_USE_FULL_PROTOBUF", true);
        tc.set_bool("onnxruntime_USE_XNNPACK", ctx.options.feature("xnnpack"));

        tc.set_bool("onnxruntime_BUILD_UNIT_TESTS", false);
        tc.set_bool("onnxruntime_RUN_ONNX_TESTS", false);
        tc.set_bool("onnxruntime_GENERATE_TEST_REPORTS", false);
        tc.set_bool("onnxruntime_BUILD_BENCHMARKS", false);

        tc.set_bool("onnxruntime_ENABLE_PYTHON", false);
        tc.set_bool("onnxruntime_BUILD_CSHARP", false);
        tc.set_bool("onnxruntime_BUILD_JAVA", false);
        tc.set_bool("onnxruntime_BUILD_NODEJS", false);
        tc.set_bool("onnxruntime_BUILD_OBJC", false);
        tc.set_bool("onnxruntime_BUILD_APPLE_FRAMEWORK", false);

        tc.set_bool("onnxruntime_USE_MIMALLOC", false);
        tc.set_bool("onnxruntime_USE_FLASH_ATTENTION", false);
        tc.set_bool("onnxruntime_USE_DNNL", false);
        tc.set_bool("onnxruntime_USE_NNAPI_BUILTIN", false);
        tc.set_bool("onnxruntime_USE_TENSORRT", false);
        tc.set_bool("onnxruntime_USE_DML", false);
        tc.set_bool("onnxruntime_USE_ROCM", false);
        tc.set_bool("onnxruntime_USE_CANN", false);
        tc.set_bool("onnxruntime_USE_ACL", false);
        tc.set_bool("onnxruntime_USE_ARMNN", false);
        tc.set_bool("onnxruntime_USE_TVM", false);
        tc.set_bool("onnxruntime_USE_VITISAI", false);

        tc.set_bool("onnxruntime_MINIMAL_BUILD", false);
        tc.set_bool("onnxruntime_REDUCED_OPS_BUILD", false);
        tc.set_bool("onnxruntime_DISABLE_CONTRIB_OPS", false);
        tc.set_bool("onnxruntime_DISABLE_ML_OPS", false);
        tc.set_bool("onnxruntime_DISABLE_RTTI", false);
        tc.set_bool("onnxruntime_DISABLE_EXCEPTIONS", false);
        tc.set_bool("onnxruntime_ENABLE_TRAINING", false);
        tc.set_bool("onnxruntime_ENABLE_LTO", false);
        tc.set_bool("onnxruntime_USE_TELEMETRY", false);
        tc.set_bool("onnxruntime_CROSS_COMPILING", false);

        if let Some(fpic) = ctx.options.fpic {
            tc.set_bool("CMAKE_POSITION_INDEPENDENT_CODE", fpic);
        }
        Ok(Some(tc))
    }

    fn build_plan(&self, _ctx: &BuildContext) -> Result<BuildPlan> {
        // the top-level lists file lives in cmake/, not the source root
        Ok(BuildPlan::Cmake {
            script_folder: Some("cmake".to_string()),
            cli_args: vec!["--compile-no-warning-as-error".to_string()],
        })
    }

    fn package_plan(&self, ctx: &BuildContext) -> Result<Vec<PackageStep>> {
        let table = component_table()?;
        Ok(vec![
            PackageStep::copy("LICENSE", ctx.folders.source.clone(), "licenses"),
            PackageStep::CmakeInstall,
            PackageStep::remove_dir("lib/cmake"),
            PackageStep::write_file(
                module_file_rel_path(self.name()),
                alias_shim(&table, NAMESPACE),
            ),
        ])
    }

    fn package_info(&self, ctx: &BuildContext) -> Result<PackageMetadata> {
        let table = component_table()?;
        let mut metadata = PackageMetadata::new();
        metadata.cmake_file_name = Some(self.name().to_string());
        metadata.build_modules.push(module_file_rel_path(self.name()));
        metadata.components = table.resolve(&ctx.settings);

        if ctx.settings.os.is_apple() {
            if let Some(common) = metadata.component_mut("common") {
                common.frameworks.push("Foundation".to_string());
            }
        }

        debug!(
            components = metadata.components.len(),
            os = %ctx.settings.os,
            arch = %ctx.settings.arch,
            "onnxruntime metadata resolved"
        );
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn ctx(os: &str, arch: &str) -> BuildContext {
        let settings = Settings::parse(os, arch, "release").unwrap();
        BuildContext::new("onnxruntime", "1.17.3", settings)
    }

    #[test]
    fn test_table_is_valid_and_complete() {
        let table = component_table().unwrap();
        assert_eq!(table.len(), 9);
        for name in [
            "flatbuffers",
            "common",
            "mlas",
            "graph",
            "framework",
            "util",
            "optimizer",
            "providers",
            "session",
        ] {
            assert!(table.get(name).is_some(), "missing component {name}");
        }
    }

    #[test]
    fn test_session_links_the_graph_spine() {
        let table = component_table().unwrap();
        let settings = Settings::parse("windows", "x86_64", "release").unwrap();
        let resolved = table.resolve(&settings);
        let session = resolved.iter().find(|c| c.name == "session").unwrap();
        assert_eq!(
            session.requires,
            vec![
                "onnxruntime_providers",
                "onnxruntime_graph",
                "onnxruntime_optimizer"
            ]
        );
    }

    #[test]
    fn test_requirements_merge_fixed_versioned_and_platform_sets() {
        let recipe = OnnxRuntimeRecipe::new().unwrap();

        let requires = recipe.requirements(&ctx("linux", "x86_64")).unwrap();
        assert!(requires.contains(&"protobuf/3.21.12".to_string()));
        assert!(requires.contains(&"re2/20240301".to_string()));
        assert!(requires.contains(&"nsync/1.26.0".to_string()));

        let requires = recipe.requirements(&ctx("windows", "x86_64")).unwrap();
        assert!(!requires.contains(&"nsync/1.26.0".to_string()));
    }

    #[test]
    fn test_tool_requirements_pin_protobuf() {
        let recipe = OnnxRuntimeRecipe::new().unwrap();
        assert_eq!(
            recipe.tool_requirements(&ctx("linux", "x86_64")).unwrap(),
            vec!["protobuf/3.21.12"]
        );
    }

    #[test]
    fn test_package_info_one_entry_per_component() {
        let recipe = OnnxRuntimeRecipe::new().unwrap();
        let metadata = recipe.package_info(&ctx("linux", "x86_64")).unwrap();
        assert_eq!(metadata.components.len(), component_table().unwrap().len());
        assert_eq!(metadata.cmake_file_name.as_deref(), Some("onnxruntime"));
    }

    #[test]
    fn test_apple_adds_foundation_to_common_only() {
        let recipe = OnnxRuntimeRecipe::new().unwrap();
        let metadata = recipe.package_info(&ctx("macos", "armv8")).unwrap();
        for component in &metadata.components {
            if component.name == "common" {
                assert_eq!(component.frameworks, vec!["Foundation"]);
            } else {
                assert!(component.frameworks.is_empty());
            }
        }

        let metadata = recipe.package_info(&ctx("linux", "x86_64")).unwrap();
        assert!(metadata
            .components
            .iter()
            .all(|c| c.frameworks.is_empty()));
    }

    #[test]
    fn test_package_plan_writes_legacy_shim() {
        let recipe = OnnxRuntimeRecipe::new().unwrap();
        let steps = recipe.package_plan(&ctx("linux", "x86_64")).unwrap();
        let shim = steps.iter().find_map(|step| match step {
            PackageStep::WriteFile { path, contents } => Some((path, contents)),
            _ => None,
        });
        let (path, contents) = shim.expect("package plan should write the alias shim");
        assert!(path.ends_with("cookbook-legacy-onnxruntime-targets.cmake"));
        assert!(contents.contains(
            "if(TARGET onnxruntime::onnxruntime_session AND NOT TARGET onnxruntime_session)"
        ));
    }

    #[test]
    fn test_toolchain_disables_optional_providers() {
        let recipe = OnnxRuntimeRecipe::new().unwrap();
        let tc = recipe.toolchain(&ctx("linux", "x86_64")).unwrap().unwrap();
        assert_eq!(
            tc.get("onnxruntime_USE_TENSORRT"),
            Some(&crate::toolchain::CacheValue::Bool(false))
        );
        assert_eq!(
            tc.get("onnxruntime_BUILD_UNIT_TESTS"),
            Some(&crate::toolchain::CacheValue::Bool(false))
        );
    }

    #[test]
    fn test_xnnpack_feature_flows_into_toolchain() {
        use crate::recipe::Options;
        let recipe = OnnxRuntimeRecipe::new().unwrap();
        let ctx = ctx("linux", "x86_64")
            .with_options(Options::default().with_feature("xnnpack"));
        let tc = recipe.toolchain(&ctx).unwrap().unwrap();
        assert_eq!(
            tc.get("onnxruntime_USE_XNNPACK"),
            Some(&crate::toolchain::CacheValue::Bool(true))
        );
    }
}
