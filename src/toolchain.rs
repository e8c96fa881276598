// src/toolchain.rs

//! Build-system toolchain generation
//!
//! Recipes do not drive the external build system directly; they describe a
//! cache-variable preload file the orchestrator passes to it. Variables are
//! typed (bool or string) and emitted in deterministic order, so generating
//! the same toolchain twice yields byte-identical output.

use std::collections::BTreeMap;
use tracing::debug;

/// File name of the generated toolchain fragment
pub const TOOLCHAIN_FILE: &str = "cookbook_toolchain.cmake";

/// A typed cache-variable value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheValue {
    Bool(bool),
    String(String),
}

/// CMake cache-variable preload file
#[derive(Debug, Clone, Default)]
pub struct CmakeToolchain {
    variables: BTreeMap<String, CacheValue>,
}

impl CmakeToolchain {
    /// Create an empty toolchain
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a boolean cache variable
    pub fn set_bool(&mut self, name: impl Into<String>, value: bool) {
        self.variables.insert(name.into(), CacheValue::Bool(value));
    }

    /// Set a string cache variable
    pub fn set_string(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables
            .insert(name.into(), CacheValue::String(value.into()));
    }

    /// Look up a variable, mainly for assertions in tests
    pub fn get(&self, name: &str) -> Option<&CacheValue> {
        self.variables.get(name)
    }

    /// Number of variables set
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether no variables are set
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Render the preload file
    pub fn generate(&self) -> String {
        let mut content = String::from("# Generated by cookbook. Do not edit.\n");
        for (name, value) in &self.variables {
            match value {
                CacheValue::Bool(v) => {
                    let rendered = if *v { "ON" } else { "OFF" };
                    content.push_str(&format!("set({name} {rendered} CACHE BOOL \"\" FORCE)\n"));
                }
                CacheValue::String(v) => {
                    content.push_str(&format!("set({name} \"{v}\" CACHE STRING \"\" FORCE)\n"));
                }
            }
        }
        debug!(variables = self.variables.len(), "toolchain generated");
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_renders_on_off() {
        let mut tc = CmakeToolchain::new();
        tc.set_bool("FOO_BUILD_TESTS", false);
        tc.set_bool("FOO_SHARED", true);
        let out = tc.generate();
        assert!(out.contains("set(FOO_BUILD_TESTS OFF CACHE BOOL \"\" FORCE)"));
        assert!(out.contains("set(FOO_SHARED ON CACHE BOOL \"\" FORCE)"));
    }

    #[test]
    fn test_string_renders_quoted() {
        let mut tc = CmakeToolchain::new();
        tc.set_string("CMAKE_CXX_STANDARD", "17");
        let out = tc.generate();
        assert!(out.contains("set(CMAKE_CXX_STANDARD \"17\" CACHE STRING \"\" FORCE)"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let mut a = CmakeToolchain::new();
        a.set_bool("Z_LAST", true);
        a.set_bool("A_FIRST", false);

        let mut b = CmakeToolchain::new();
        b.set_bool("A_FIRST", false);
        b.set_bool("Z_LAST", true);

        assert_eq!(a.generate(), b.generate());
        assert_eq!(a.generate(), a.generate());
    }

    #[test]
    fn test_later_set_wins() {
        let mut tc = CmakeToolchain::new();
        tc.set_bool("FOO", true);
        tc.set_bool("FOO", false);
        assert_eq!(tc.get("FOO"), Some(&CacheValue::Bool(false)));
        assert_eq!(tc.len(), 1);
    }
}
