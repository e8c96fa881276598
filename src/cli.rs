// src/cli.rs
//! CLI definitions for the cookbook renderer
//!
//! This module contains the command-line interface definitions using clap.
//! The command implementations live in `main`.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cookbook")]
#[command(version)]
#[command(about = "Build recipes for third-party native libraries", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the recipes in the collection
    List,

    /// Show a recipe's identity and packaged versions
    Show {
        /// Recipe name
        recipe: String,
    },

    /// Print a recipe's resolved package metadata as JSON
    Metadata {
        /// Recipe name
        recipe: String,

        #[command(flatten)]
        platform: PlatformArgs,
    },

    /// Render a recipe's build-system toolchain file
    Toolchain {
        /// Recipe name
        recipe: String,

        #[command(flatten)]
        platform: PlatformArgs,
    },

    /// Render a recipe's legacy alias shim
    Shim {
        /// Recipe name
        recipe: String,

        #[command(flatten)]
        platform: PlatformArgs,
    },
}

/// Platform and version selection shared by the rendering commands
#[derive(Args)]
pub struct PlatformArgs {
    /// Target OS family (windows, linux, macos, freebsd)
    #[arg(long, default_value = "linux")]
    pub os: String,

    /// Target architecture (x86, x86_64, armv7, armv8, riscv32, riscv64)
    #[arg(long, default_value = "x86_64")]
    pub arch: String,

    /// Build type (debug, release)
    #[arg(long, default_value = "release")]
    pub build_type: String,

    /// Version to render (defaults to the newest packaged version)
    #[arg(short, long)]
    pub version: Option<String>,

    /// Build shared libraries
    #[arg(long)]
    pub shared: bool,
}
