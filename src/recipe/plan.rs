// src/recipe/plan.rs

//! Build and packaging step descriptions
//!
//! Plans are data handed to the external orchestrator; nothing here
//! executes. A build plan names the build-system invocation, a package
//! plan is the ordered list of steps that assemble the output tree.

use url::Url;

/// How the orchestrator produces binaries for a recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildPlan {
    /// Configure and build with CMake
    Cmake {
        /// Subdirectory of the sources holding the top-level lists file
        script_folder: Option<String>,
        /// Extra arguments for the configure invocation
        cli_args: Vec<String>,
    },
    /// No compile step: fetch a prebuilt archive and unpack it
    FetchOnly { url: Url },
}

/// One step of the packaging stage, applied in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageStep {
    /// Copy files matching `pattern` from `src` into `dst`
    CopyFiles {
        pattern: String,
        src: std::path::PathBuf,
        dst: std::path::PathBuf,
    },
    /// Run the build system's install step into the package folder
    CmakeInstall,
    /// Remove a directory subtree from the package folder
    RemoveDir { path: std::path::PathBuf },
    /// Write a generated file into the package folder
    WriteFile {
        path: std::path::PathBuf,
        contents: String,
    },
}

impl PackageStep {
    /// Copy step helper
    pub fn copy(
        pattern: impl Into<String>,
        src: impl Into<std::path::PathBuf>,
        dst: impl Into<std::path::PathBuf>,
    ) -> Self {
        Self::CopyFiles {
            pattern: pattern.into(),
            src: src.into(),
            dst: dst.into(),
        }
    }

    /// Directory removal helper
    pub fn remove_dir(path: impl Into<std::path::PathBuf>) -> Self {
        Self::RemoveDir { path: path.into() }
    }

    /// Generated file helper
    pub fn write_file(path: impl Into<std::path::PathBuf>, contents: impl Into<String>) -> Self {
        Self::WriteFile {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_copy_helper() {
        let step = PackageStep::copy("*.h", "runtimes/native", "include");
        assert_eq!(
            step,
            PackageStep::CopyFiles {
                pattern: "*.h".to_string(),
                src: PathBuf::from("runtimes/native"),
                dst: PathBuf::from("include"),
            }
        );
    }

    #[test]
    fn test_fetch_only_plan_holds_url() {
        let url = Url::parse("https://example.org/pkg/1.0").unwrap();
        let plan = BuildPlan::FetchOnly { url: url.clone() };
        assert_eq!(plan, BuildPlan::FetchOnly { url });
    }
}
