// src/components/table.rs

//! Component table: typed records, validation, and platform resolution

use crate::error::{Error, Result};
use crate::settings::Settings;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::debug;

/// A requirement of one component on another linkable unit
///
/// Internal requirements reference a sibling component in the same table by
/// name and resolve to that component's target. External requirements
/// reference a target of an externally resolved dependency and pass through
/// resolution unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Reference to a sibling component by table name
    Internal(String),
    /// Reference to `target` inside the externally resolved `package`
    External { package: String, target: String },
}

impl Requirement {
    /// Requirement on a sibling component
    pub fn internal(name: impl Into<String>) -> Self {
        Self::Internal(name.into())
    }

    /// Requirement on an external dependency's target
    pub fn external(package: impl Into<String>, target: impl Into<String>) -> Self {
        Self::External {
            package: package.into(),
            target: target.into(),
        }
    }

    /// Parse a requirement string: `package::target` is external,
    /// anything else is an internal component name
    pub fn parse(s: &str) -> Self {
        match s.split_once("::") {
            Some((package, target)) if !package.is_empty() && !target.is_empty() => {
                Self::external(package, target)
            }
            _ => Self::internal(s),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal(name) => write!(f, "{name}"),
            Self::External { package, target } => write!(f, "{package}::{target}"),
        }
    }
}

/// One linkable unit produced by the upstream build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Unique key within the table
    pub name: String,
    /// Canonical external-facing build-target name
    pub target: String,
    /// Binary artifact base names, in link order
    pub libs: Vec<String>,
    /// Preprocessor definitions consumers must set
    pub defines: Vec<String>,
    /// Requirements on sibling components or external targets
    pub requires: Vec<Requirement>,
}

impl Component {
    /// Create a component with no libraries, definitions, or requirements
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            libs: Vec::new(),
            defines: Vec::new(),
            requires: Vec::new(),
        }
    }

    /// Set the library artifact base names
    pub fn with_libs<I, S>(mut self, libs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.libs = libs.into_iter().map(Into::into).collect();
        self
    }

    /// Set the consumer preprocessor definitions
    pub fn with_defines<I, S>(mut self, defines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.defines = defines.into_iter().map(Into::into).collect();
        self
    }

    /// Set the requirement list
    pub fn with_requires<I>(mut self, requires: I) -> Self
    where
        I: IntoIterator<Item = Requirement>,
    {
        self.requires = requires.into_iter().collect();
        self
    }
}

/// Metadata emitted for one component after platform resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentMetadata {
    pub name: String,
    pub target: String,
    pub libs: Vec<String>,
    pub defines: Vec<String>,
    /// Resolved requirements: sibling targets and `package::target` pairs
    pub requires: Vec<String>,
    pub system_libs: Vec<String>,
    pub frameworks: Vec<String>,
}

/// Validated, ordered component table
///
/// Construction checks that names are unique, every internal requirement
/// references a component in the table, and the requirement graph is
/// acyclic. A constructed table is read-only; resolution is a total
/// function over it.
#[derive(Debug, Clone)]
pub struct ComponentTable {
    components: Vec<Component>,
}

impl ComponentTable {
    /// Validate and build a table from records in declaration order
    pub fn new(components: Vec<Component>) -> Result<Self> {
        let mut names = HashSet::new();
        for component in &components {
            if !names.insert(component.name.as_str()) {
                return Err(Error::DuplicateComponent(component.name.clone()));
            }
        }

        for component in &components {
            for requirement in &component.requires {
                if let Requirement::Internal(reference) = requirement {
                    if !names.contains(reference.as_str()) {
                        return Err(Error::UnknownComponent {
                            component: component.name.clone(),
                            reference: reference.clone(),
                        });
                    }
                }
            }
        }

        let table = Self { components };
        if let Some(cycle) = table.find_cycle() {
            return Err(Error::DependencyCycle(cycle.join(" -> ")));
        }
        debug!(components = table.components.len(), "component table validated");
        Ok(table)
    }

    /// Number of components in the table
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate components in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    /// Look up a component by name
    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }

    /// Resolve the table against a platform, one metadata entry per
    /// component in declaration order
    ///
    /// Internal requirements become the referenced component's target name;
    /// external requirements pass through as `package::target`. The
    /// platform augmentation from [`platform_augmentation`] is appended to
    /// every component.
    pub fn resolve(&self, settings: &Settings) -> Vec<ComponentMetadata> {
        let targets: HashMap<&str, &str> = self
            .components
            .iter()
            .map(|c| (c.name.as_str(), c.target.as_str()))
            .collect();
        let (system_libs, extra_requires) = platform_augmentation(settings);

        self.components
            .iter()
            .map(|component| {
                let mut requires: Vec<String> = component
                    .requires
                    .iter()
                    .map(|requirement| match requirement {
                        Requirement::Internal(name) => targets
                            .get(name.as_str())
                            .expect("internal requirements are checked at table construction")
                            .to_string(),
                        Requirement::External { .. } => requirement.to_string(),
                    })
                    .collect();
                requires.extend(extra_requires.iter().map(ToString::to_string));

                ComponentMetadata {
                    name: component.name.clone(),
                    target: component.target.clone(),
                    libs: component.libs.clone(),
                    defines: component.defines.clone(),
                    requires,
                    system_libs: system_libs.clone(),
                    frameworks: Vec::new(),
                }
            })
            .collect()
    }

    /// DFS over internal requirement edges; returns the first cycle found
    fn find_cycle(&self) -> Option<Vec<String>> {
        let mut visited = HashSet::new();
        let mut stack = HashSet::new();
        let mut path = Vec::new();

        for component in &self.components {
            if !visited.contains(component.name.as_str()) {
                if let Some(cycle) =
                    self.cycle_dfs(&component.name, &mut visited, &mut stack, &mut path)
                {
                    return Some(cycle);
                }
            }
        }
        None
    }

    fn cycle_dfs(
        &self,
        name: &str,
        visited: &mut HashSet<String>,
        stack: &mut HashSet<String>,
        path: &mut Vec<String>,
    ) -> Option<Vec<String>> {
        visited.insert(name.to_string());
        stack.insert(name.to_string());
        path.push(name.to_string());

        if let Some(component) = self.get(name) {
            for requirement in &component.requires {
                let Requirement::Internal(reference) = requirement else {
                    continue;
                };
                if !visited.contains(reference.as_str()) {
                    if let Some(cycle) = self.cycle_dfs(reference, visited, stack, path) {
                        return Some(cycle);
                    }
                } else if stack.contains(reference.as_str()) {
                    let start = path
                        .iter()
                        .position(|n| n == reference)
                        .expect("cycle entry is on the current path");
                    let mut cycle = path[start..].to_vec();
                    cycle.push(reference.clone());
                    return Some(cycle);
                }
            }
        }

        path.pop();
        stack.remove(name);
        None
    }
}

/// Platform-conditioned augmentation applied to every component
///
/// Non-Windows targets link the dynamic loader and require the external
/// nsync synchronization library; RISC-V targets additionally link
/// libatomic. Returns (system libraries, extra requirements).
pub fn platform_augmentation(settings: &Settings) -> (Vec<String>, Vec<Requirement>) {
    let mut system_libs = Vec::new();
    let mut requires = Vec::new();

    if !settings.os.is_windows() {
        system_libs.push("dl".to_string());
        requires.push(Requirement::external("nsync", "nsync_cpp"));
    }
    if settings.arch.is_riscv() {
        system_libs.push("atomic".to_string());
    }

    (system_libs, requires)
}
