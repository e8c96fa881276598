// src/components/shim.rs

//! Legacy alias shim generation
//!
//! Older consumer tooling generations address components by bare target
//! name instead of the namespaced form. The shim is a generated CMake
//! fragment with one guarded alias block per component: if the canonical
//! namespaced target exists and the bare name does not, an interface-only
//! alias is created. The guard makes repeated inclusion idempotent at the
//! consuming build-system level, so blocks are emitted in table order
//! without deduplication.

use crate::components::table::ComponentTable;
use std::path::PathBuf;

/// Render the alias shim for every component in table order
pub fn alias_shim(table: &ComponentTable, namespace: &str) -> String {
    let mut content = String::new();
    for component in table.iter() {
        let alias = &component.target;
        let canonical = format!("{namespace}::{}", component.target);
        content.push_str(&format!("if(TARGET {canonical} AND NOT TARGET {alias})\n"));
        content.push_str(&format!("    add_library({alias} INTERFACE IMPORTED)\n"));
        content.push_str(&format!(
            "    set_property(TARGET {alias} PROPERTY INTERFACE_LINK_LIBRARIES {canonical})\n"
        ));
        content.push_str("endif()\n");
    }
    content
}

/// Package-relative path of the generated shim file
pub fn module_file_rel_path(package: &str) -> PathBuf {
    PathBuf::from("lib")
        .join("cmake")
        .join(format!("cookbook-legacy-{package}-targets.cmake"))
}
