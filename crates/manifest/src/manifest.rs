//! Types for the project manifest file (`wrangler.toml`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The root manifest structure for a wrangler project.
///
/// The manifest declares package identity, its runtime and dev dependency
/// groups, the build-system table, and free-form tool configuration. It is
/// authored by hand and read by external packaging tooling; this crate only
/// guarantees that the file stays structurally valid.
///
/// # Example
///
/// ```toml
/// [package]
/// name = "ml-data-wrangler"
/// version = "0.1.0"
///
/// [dependencies]
/// gradio = "*"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct Manifest {
    /// Package identity and metadata.
    pub package: PackageMetadata,

    /// The runtime dependency group.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, Dependency>,

    /// The development-only dependency group (formatters, linters).
    #[serde(
        default,
        rename = "dev-dependencies",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub dev_dependencies: BTreeMap<String, Dependency>,

    /// The build-system declaration consumed by the external build tool.
    #[serde(
        default,
        rename = "build-system",
        skip_serializing_if = "Option::is_none"
    )]
    pub build_system: Option<BuildSystem>,

    /// Free-form per-tool option tables (e.g. import-sorting rules).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tool: BTreeMap<String, toml::Table>,
}

/// The `[package]` table: identity fields for the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct PackageMetadata {
    /// The package name (e.g., "ml-data-wrangler").
    pub name: String,

    /// The package version (e.g., "0.1.0").
    pub version: String,

    /// A one-line package description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// The package authors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,

    /// The package license identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

/// A dependency requirement in either group.
///
/// Requirements can be specified in two formats:
///
/// 1. Compact format (string):
///    ```toml
///    [dependencies]
///    gradio = "*"
///    ```
///
/// 2. Explicit format (table):
///    ```toml
///    [dependencies.seaborn]
///    version = "^0.13"
///    optional = true
///    ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
#[must_use]
pub enum Dependency {
    /// Compact format: a bare version requirement string.
    ///
    /// # Example
    /// ```text
    /// "^3.10"
    /// ```
    Compact(String),

    /// Explicit format: a table with individual fields.
    Explicit {
        /// The version requirement (e.g., "^0.13").
        version: String,
        /// Whether the dependency is optional.
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        optional: bool,
    },
}

impl Dependency {
    /// Returns the version requirement string of this dependency.
    #[must_use]
    pub fn requirement(&self) -> &str {
        match self {
            Dependency::Compact(req) => req,
            Dependency::Explicit { version, .. } => version,
        }
    }
}

/// The `[build-system]` table: which external tool builds this package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct BuildSystem {
    /// Requirements needed to run the build backend.
    #[serde(default)]
    pub requires: Vec<String>,

    /// The build backend identifier (e.g., "poetry.core.masonry.api").
    #[serde(rename = "build-backend")]
    pub build_backend: String,
}
