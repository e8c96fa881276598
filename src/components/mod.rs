// src/components/mod.rs

//! Component graph descriptor
//!
//! A multi-library upstream build produces several linkable units
//! ("components"), each exposed to consumers as a named build target with
//! its own libraries, preprocessor definitions, and requirements on sibling
//! components or externally resolved packages. This module holds the typed
//! component table, its construction-time validation (unique names, known
//! references, acyclic requirement graph), platform-conditioned resolution
//! into emitted metadata, and the legacy alias shim generated for consumers
//! on older tooling generations.
//!
//! # Usage
//!
//! ```ignore
//! use cookbook::components::{Component, ComponentTable, Requirement};
//!
//! let table = ComponentTable::new(vec![
//!     Component::new("core", "mylib_core").with_libs(["mylib_core"]),
//!     Component::new("session", "mylib_session")
//!         .with_libs(["mylib_session"])
//!         .with_requires([Requirement::internal("core")]),
//! ])?;
//!
//! let resolved = table.resolve(&settings);
//! let shim = cookbook::components::alias_shim(&table, "mylib");
//! ```

mod shim;
mod table;

pub use shim::{alias_shim, module_file_rel_path};
pub use table::{
    platform_augmentation, Component, ComponentMetadata, ComponentTable, Requirement,
};
