// src/recipes/nethost.rs

//! Recipe for nethost, the .NET app bootstrapper shim
//!
//! There is nothing to compile: acquisition downloads the prebuilt nupkg
//! for the platform's runtime identifier and packaging lifts headers and
//! the matching shared or static artifact out of it. Platforms without a
//! runtime identifier are rejected before any step is described.

use crate::error::{Error, Result};
use crate::recipe::{BuildContext, BuildPlan, PackageStep, Recipe, SourceSpec};
use crate::registry::PackageMetadata;
use crate::settings::{Settings, TargetArch, TargetOs};
use crate::toolchain::CmakeToolchain;
use std::path::PathBuf;
use url::Url;

/// .NET runtime identifier for a platform, e.g. `linux-x64`
///
/// Only the platforms upstream publishes nupkgs for are mapped; everything
/// else is a configuration error.
pub fn runtime_id(settings: &Settings) -> Result<String> {
    let os = match settings.os {
        TargetOs::Windows => "win",
        TargetOs::Linux => "linux",
        TargetOs::Macos => "osx",
        other => {
            return Err(Error::invalid_configuration(format!(
                "unsupported nethost OS: {other}"
            )))
        }
    };
    let arch = match settings.arch {
        TargetArch::X86 => "x86",
        TargetArch::X86_64 => "x64",
        TargetArch::Armv8 => "arm64",
        other => {
            return Err(Error::invalid_configuration(format!(
                "unsupported nethost architecture: {other}"
            )))
        }
    };
    Ok(format!("{os}-{arch}"))
}

fn nupkg_url(rid: &str, version: &str) -> Result<Url> {
    Ok(Url::parse(&format!(
        "https://www.nuget.org/api/v2/package/runtime.{rid}.Microsoft.NETCore.DotNetAppHost/{version}"
    ))?)
}

#[derive(Debug)]
pub struct NethostRecipe;

impl NethostRecipe {
    pub fn new() -> Self {
        Self
    }
}

impl Recipe for NethostRecipe {
    fn name(&self) -> &str {
        "nethost"
    }

    fn description(&self) -> &str {
        "Provides the .NET app bootstrapper intended for use in the application directory"
    }

    fn license(&self) -> &str {
        "MIT"
    }

    fn homepage(&self) -> &str {
        "https://github.com/dotnet/runtime"
    }

    fn versions(&self) -> Vec<String> {
        vec![
            "6.0.25".to_string(),
            "7.0.14".to_string(),
            "8.0.1".to_string(),
        ]
    }

    fn validate(&self, ctx: &BuildContext) -> Result<()> {
        // fail fast before any acquisition step is described
        runtime_id(&ctx.settings).map(|_| ())
    }

    fn source(&self, _ctx: &BuildContext) -> Result<Option<SourceSpec>> {
        // acquisition is platform-dependent and lives in the build plan
        Ok(None)
    }

    fn toolchain(&self, _ctx: &BuildContext) -> Result<Option<CmakeToolchain>> {
        Ok(None)
    }

    fn build_plan(&self, ctx: &BuildContext) -> Result<BuildPlan> {
        let rid = runtime_id(&ctx.settings)?;
        Ok(BuildPlan::FetchOnly {
            url: nupkg_url(&rid, &ctx.version)?,
        })
    }

    fn package_plan(&self, ctx: &BuildContext) -> Result<Vec<PackageStep>> {
        let rid = runtime_id(&ctx.settings)?;
        let native = PathBuf::from("runtimes").join(&rid).join("native");

        let mut steps = vec![PackageStep::copy("*.h", native.clone(), "include")];
        if ctx.options.shared {
            steps.push(PackageStep::copy("nethost.dll", native.clone(), "bin"));
            steps.push(PackageStep::copy("nethost.lib", native.clone(), "lib"));
            steps.push(PackageStep::copy("libnethost.so", native.clone(), "lib"));
            steps.push(PackageStep::copy("libnethost.dylib", native, "lib"));
        } else {
            steps.push(PackageStep::copy("libnethost.lib", native.clone(), "lib"));
            steps.push(PackageStep::copy("libnethost.a", native, "lib"));
        }
        Ok(steps)
    }

    fn package_info(&self, ctx: &BuildContext) -> Result<PackageMetadata> {
        let mut metadata = PackageMetadata::new();
        // the Windows static archive keeps its lib prefix
        metadata.libs = if ctx.settings.os.is_windows() && !ctx.options.shared {
            vec!["libnethost".to_string()]
        } else {
            vec!["nethost".to_string()]
        };
        if !ctx.options.shared {
            metadata.defines.push("NETHOST_USE_AS_STATIC".to_string());
        }
        Ok(metadata)
    }
}
