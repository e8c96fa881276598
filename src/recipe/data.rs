// src/recipe/data.rs

//! Version-conditioned recipe data tables
//!
//! Each recipe carries a TOML sidecar mapping released upstream versions to
//! source archives, extra requirements, and patches. The table is the only
//! place version-specific facts live; recipe code stays version-agnostic
//! and looks facts up at render time.
//!
//! ```toml
//! [sources."1.11.2"]
//! url = "https://example.org/foo-1.11.2.tar.xz"
//! sha256 = "..."
//!
//! [requires]
//! "1.11.2" = ["zlib/1.3.1"]
//!
//! [patches]
//! "1.11.2" = [{ file = "0001-fix-install-dirs.patch", strip = 1 }]
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use url::Url;

/// One downloadable source archive
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceEntry {
    pub url: String,
    pub sha256: String,
}

impl SourceEntry {
    /// Validate the URL and pair it with the checksum
    pub fn to_spec(&self) -> Result<SourceSpec> {
        Ok(SourceSpec {
            url: Url::parse(&self.url)?,
            sha256: Some(self.sha256.clone()),
        })
    }
}

/// A validated source acquisition description
///
/// The checksum is absent for acquisitions whose URL is computed per
/// platform and verified downstream by the fetch utility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub url: Url,
    pub sha256: Option<String>,
}

/// One patch applied on top of the unpacked sources
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatchEntry {
    pub file: String,
    #[serde(default = "default_strip")]
    pub strip: u32,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_strip() -> u32 {
    1
}

/// The full per-recipe data table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeData {
    #[serde(default)]
    pub sources: BTreeMap<String, SourceEntry>,
    #[serde(default)]
    pub requires: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub patches: BTreeMap<String, Vec<PatchEntry>>,
}

impl RecipeData {
    /// Parse a data table from TOML text
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Source entry for a version, failing fast when the table has none
    pub fn source(&self, recipe: &str, version: &str) -> Result<&SourceEntry> {
        self.sources.get(version).ok_or_else(|| Error::UnknownVersion {
            recipe: recipe.to_string(),
            version: version.to_string(),
        })
    }

    /// Extra requirements for a version; absent versions have none
    pub fn requires(&self, version: &str) -> &[String] {
        self.requires.get(version).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Patches for a version; absent versions have none
    pub fn patches(&self, version: &str) -> &[PatchEntry] {
        self.patches.get(version).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All versions with a source entry
    pub fn versions(&self) -> Vec<String> {
        self.sources.keys().cloned().collect()
    }

    /// Highest version by semantic-version ordering
    pub fn latest(&self) -> Option<&str> {
        self.sources
            .keys()
            .filter_map(|v| semver::Version::parse(v).ok().map(|parsed| (parsed, v)))
            .max_by(|a, b| a.0.cmp(&b.0))
            .map(|(_, v)| v.as_str())
    }
}
