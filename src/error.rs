// src/error.rs

//! Error types for the cookbook crate
//!
//! Configuration errors fail fast, before any artifact description is
//! produced. Execution failures (fetch, compile) belong to the external
//! orchestrator and never surface here.

use thiserror::Error;

/// Result type for cookbook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while describing a recipe
#[derive(Error, Debug)]
pub enum Error {
    /// Settings or option combination the recipes cannot describe
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A component requirement names a component that is not in the table
    #[error("component '{component}' requires unknown component '{reference}'")]
    UnknownComponent {
        component: String,
        reference: String,
    },

    /// Two components share the same name
    #[error("duplicate component name: {0}")]
    DuplicateComponent(String),

    /// The component requirement graph contains a cycle
    #[error("component dependency cycle: {0}")]
    DependencyCycle(String),

    /// Recipe name not present in the collection
    #[error("unknown recipe: {0}")]
    UnknownRecipe(String),

    /// Version has no entry in the recipe's data table
    #[error("no data for version {version} of {recipe}")]
    UnknownVersion { recipe: String, version: String },

    /// Recipe data table failed to deserialize
    #[error("recipe data error: {0}")]
    Data(#[from] toml::de::Error),

    /// Version string is not a valid semantic version
    #[error("invalid version: {0}")]
    Version(#[from] semver::Error),

    /// Source URL is malformed
    #[error("invalid source URL: {0}")]
    Url(#[from] url::ParseError),

    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid-configuration error with a message
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
