//! Project manifest format types for the wrangler workspace.
//!
//! This crate provides types for parsing, serializing, and validating the
//! project manifest (`wrangler.toml`): package metadata, runtime and dev
//! dependency groups, the build-system table, and free-form tool options.
//!
//! # Example: Parsing a Manifest
//!
//! ```rust
//! use wrangler_manifest::Manifest;
//!
//! let toml = r#"
//! [package]
//! name = "ml-data-wrangler"
//! version = "0.1.0"
//!
//! [dependencies]
//! gradio = "*"
//! "#;
//!
//! let manifest: Manifest = toml::from_str(toml).unwrap();
//! assert!(manifest.dependencies.contains_key("gradio"));
//! ```
//!
//! # Example: Validating a Manifest
//!
//! ```rust
//! use wrangler_manifest::{Manifest, validate};
//!
//! let toml = r#"
//! [package]
//! name = "ml-data-wrangler"
//! version = "0.1.0"
//!
//! [dependencies]
//! matplotlib = "^3.8"
//! "#;
//!
//! let manifest: Manifest = toml::from_str(toml).unwrap();
//! assert!(validate(&manifest).is_ok());
//! ```

#![deny(unsafe_code)]
#![deny(missing_debug_implementations)]
#![warn(missing_docs)]

mod manifest;
mod validation;

pub use manifest::{BuildSystem, Dependency, Manifest, PackageMetadata};
pub use validation::{ValidationError, validate};
