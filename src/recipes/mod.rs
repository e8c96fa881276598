// src/recipes/mod.rs

//! The recipe collection
//!
//! One module per packaged library. Version-specific facts (source
//! archives, extra requirements, patches) live in the TOML data tables
//! under `data/`; the modules hold only version-agnostic description
//! logic.

mod libzip;
mod nethost;
mod onnxruntime;

pub use libzip::LibzipRecipe;
pub use nethost::{runtime_id, NethostRecipe};
pub use onnxruntime::{component_table, OnnxRuntimeRecipe};

use crate::error::{Error, Result};
use crate::recipe::Recipe;

/// All recipes in the collection
pub fn all() -> Result<Vec<Box<dyn Recipe>>> {
    Ok(vec![
        Box::new(LibzipRecipe::new()?),
        Box::new(NethostRecipe::new()),
        Box::new(OnnxRuntimeRecipe::new()?),
    ])
}

/// Look up a recipe by package name
pub fn find(name: &str) -> Result<Box<dyn Recipe>> {
    all()?
        .into_iter()
        .find(|recipe| recipe.name() == name)
        .ok_or_else(|| Error::UnknownRecipe(name.to_string()))
}
