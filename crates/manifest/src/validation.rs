//! Structural validation for project manifests.

use crate::Manifest;
use semver::{Version, VersionReq};

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum ValidationError {
    /// The package name is empty.
    EmptyName,
    /// The package version is empty or not a recognized version string.
    InvalidVersion {
        /// The offending version string.
        version: String,
    },
    /// A dependency declares a version requirement that does not parse.
    InvalidRequirement {
        /// The dependency group ("dependencies" or "dev-dependencies").
        group: &'static str,
        /// The dependency name.
        name: String,
        /// The offending requirement string.
        requirement: String,
    },
    /// The build-system table declares an empty backend identifier.
    EmptyBuildBackend,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyName => {
                write!(f, "Package name must be a non-empty string")
            }
            ValidationError::InvalidVersion { version } => {
                write!(f, "Package version '{version}' is not a valid version string")
            }
            ValidationError::InvalidRequirement {
                group,
                name,
                requirement,
            } => {
                write!(
                    f,
                    "Dependency '{name}' in [{group}] has an invalid version requirement '{requirement}'"
                )
            }
            ValidationError::EmptyBuildBackend => {
                write!(f, "The [build-system] table declares an empty build-backend")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validates the structural invariants of a manifest.
///
/// This function checks that:
/// - The package name is non-empty
/// - The package version parses as a semantic version
/// - Every dependency requirement in both groups parses as a version range
///   (`"*"` is the unconstrained wildcard)
/// - The build backend, when declared, is non-empty
///
/// Dependency-name uniqueness within a group needs no check here: the TOML
/// grammar rejects duplicate keys at parse time.
///
/// # Example
///
/// ```rust
/// use wrangler_manifest::{Manifest, validate};
///
/// let toml = r#"
/// [package]
/// name = "ml-data-wrangler"
/// version = "0.1.0"
///
/// [dependencies]
/// gradio = "*"
/// "#;
///
/// let manifest: Manifest = toml::from_str(toml).unwrap();
/// assert!(validate(&manifest).is_ok());
/// ```
///
/// # Errors
///
/// Returns a vector of `ValidationError` if validation fails. An empty vector
/// indicates successful validation.
pub fn validate(manifest: &Manifest) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if manifest.package.name.is_empty() {
        errors.push(ValidationError::EmptyName);
    }

    if manifest.package.version.parse::<Version>().is_err() {
        errors.push(ValidationError::InvalidVersion {
            version: manifest.package.version.clone(),
        });
    }

    let groups = [
        ("dependencies", &manifest.dependencies),
        ("dev-dependencies", &manifest.dev_dependencies),
    ];
    for (group, dependencies) in groups {
        for (name, dependency) in dependencies {
            if dependency.requirement().parse::<VersionReq>().is_err() {
                errors.push(ValidationError::InvalidRequirement {
                    group,
                    name: name.clone(),
                    requirement: dependency.requirement().to_string(),
                });
            }
        }
    }

    if let Some(build_system) = &manifest.build_system
        && build_system.build_backend.is_empty()
    {
        errors.push(ValidationError::EmptyBuildBackend);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BuildSystem, Dependency, PackageMetadata};
    use std::collections::BTreeMap;

    fn package(name: &str, version: &str) -> PackageMetadata {
        PackageMetadata {
            name: name.to_string(),
            version: version.to_string(),
            description: String::new(),
            authors: vec![],
            license: None,
        }
    }

    fn manifest_with(dependencies: BTreeMap<String, Dependency>) -> Manifest {
        Manifest {
            package: package("ml-data-wrangler", "0.1.0"),
            dependencies,
            dev_dependencies: BTreeMap::new(),
            build_system: None,
            tool: BTreeMap::new(),
        }
    }

    #[test]
    fn test_validate_success() {
        let mut dependencies = BTreeMap::new();
        dependencies.insert(
            "gradio".to_string(),
            Dependency::Compact("*".to_string()),
        );
        dependencies.insert(
            "matplotlib".to_string(),
            Dependency::Compact("^3.8".to_string()),
        );

        assert!(validate(&manifest_with(dependencies)).is_ok());
    }

    #[test]
    fn test_validate_empty_name() {
        let mut manifest = manifest_with(BTreeMap::new());
        manifest.package = package("", "0.1.0");

        let errors = validate(&manifest).unwrap_err();
        assert_eq!(errors, vec![ValidationError::EmptyName]);
    }

    #[test]
    fn test_validate_bad_version() {
        let mut manifest = manifest_with(BTreeMap::new());
        manifest.package = package("ml-data-wrangler", "not-a-version");

        let errors = validate(&manifest).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidVersion {
                version: "not-a-version".to_string()
            }]
        );
    }

    #[test]
    fn test_validate_bad_requirement() {
        let mut dependencies = BTreeMap::new();
        dependencies.insert(
            "gensim".to_string(),
            Dependency::Compact("not a requirement".to_string()),
        );

        let errors = validate(&manifest_with(dependencies)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0],
            ValidationError::InvalidRequirement {
                group: "dependencies",
                name: "gensim".to_string(),
                requirement: "not a requirement".to_string()
            }
        );
    }

    #[test]
    fn test_validate_dev_group_reported_separately() {
        let mut manifest = manifest_with(BTreeMap::new());
        manifest.dev_dependencies.insert(
            "isort".to_string(),
            Dependency::Explicit {
                version: "??".to_string(),
                optional: false,
            },
        );

        let errors = validate(&manifest).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidRequirement {
                group: "dev-dependencies",
                name: "isort".to_string(),
                requirement: "??".to_string()
            }]
        );
    }

    #[test]
    fn test_validate_empty_build_backend() {
        let mut manifest = manifest_with(BTreeMap::new());
        manifest.build_system = Some(BuildSystem {
            requires: vec!["poetry-core".to_string()],
            build_backend: String::new(),
        });

        let errors = validate(&manifest).unwrap_err();
        assert_eq!(errors, vec![ValidationError::EmptyBuildBackend]);
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::InvalidRequirement {
            group: "dependencies",
            name: "gensim".to_string(),
            requirement: "not a requirement".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Dependency 'gensim' in [dependencies] has an invalid version requirement 'not a requirement'"
        );
    }
}
