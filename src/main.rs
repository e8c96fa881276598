// src/main.rs

use anyhow::Result;
use clap::Parser;
use cookbook::cli::{Cli, Commands, PlatformArgs};
use cookbook::recipe::{BuildContext, Options, PackageStep, Recipe};
use cookbook::recipes;
use cookbook::settings::Settings;
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            for recipe in recipes::all()? {
                println!("{:<14} {}", recipe.name(), recipe.description());
            }
            Ok(())
        }
        Commands::Show { recipe } => {
            let recipe = recipes::find(&recipe)?;
            println!("name:     {}", recipe.name());
            println!("license:  {}", recipe.license());
            println!("homepage: {}", recipe.homepage());
            println!("versions: {}", recipe.versions().join(", "));
            Ok(())
        }
        Commands::Metadata { recipe, platform } => {
            let (recipe, ctx) = render_context(&recipe, &platform)?;
            info!(recipe = recipe.name(), version = %ctx.version, "resolving metadata");
            recipe.validate(&ctx)?;
            let metadata = recipe.package_info(&ctx)?;
            println!("{}", serde_json::to_string_pretty(&metadata)?);
            Ok(())
        }
        Commands::Toolchain { recipe, platform } => {
            let (recipe, ctx) = render_context(&recipe, &platform)?;
            recipe.validate(&ctx)?;
            match recipe.toolchain(&ctx)? {
                Some(toolchain) => {
                    print!("{}", toolchain.generate());
                    Ok(())
                }
                None => Err(anyhow::anyhow!(
                    "recipe '{}' does not generate a toolchain",
                    recipe.name()
                )),
            }
        }
        Commands::Shim { recipe, platform } => {
            let (recipe, ctx) = render_context(&recipe, &platform)?;
            recipe.validate(&ctx)?;
            let steps = recipe.package_plan(&ctx)?;
            let shim = steps.into_iter().find_map(|step| match step {
                PackageStep::WriteFile { path, contents }
                    if path.to_string_lossy().ends_with("-targets.cmake") =>
                {
                    Some(contents)
                }
                _ => None,
            });
            match shim {
                Some(contents) => {
                    print!("{contents}");
                    Ok(())
                }
                None => Err(anyhow::anyhow!(
                    "recipe '{}' does not generate an alias shim",
                    recipe.name()
                )),
            }
        }
    }
}

/// Resolve a recipe and build the context the rendering commands share
fn render_context(name: &str, platform: &PlatformArgs) -> Result<(Box<dyn Recipe>, BuildContext)> {
    let recipe = recipes::find(name)?;
    let settings = Settings::parse(&platform.os, &platform.arch, &platform.build_type)?;
    let version = match &platform.version {
        Some(version) => version.clone(),
        None => latest_version(recipe.as_ref())?,
    };
    let options = Options {
        shared: platform.shared,
        ..recipe.default_options()
    };
    let ctx = BuildContext::new(recipe.name(), version, settings).with_options(options);
    Ok((recipe, ctx))
}

/// Newest packaged version by semantic-version order, falling back to the
/// last declared entry for version strings semver cannot parse
fn latest_version(recipe: &dyn Recipe) -> Result<String> {
    let versions = recipe.versions();
    versions
        .iter()
        .filter_map(|v| semver::Version::parse(v).ok().map(|parsed| (parsed, v.clone())))
        .max_by(|a, b| a.0.cmp(&b.0))
        .map(|(_, version)| version)
        .or_else(|| versions.last().cloned())
        .ok_or_else(|| anyhow::anyhow!("recipe '{}' has no versions", recipe.name()))
}
