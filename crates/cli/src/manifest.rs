use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use console::style;
use wrangler_manifest::{Manifest, validate};

/// Inspect and validate the project manifest
#[derive(clap::Subcommand)]
pub(crate) enum Opts {
    /// Parse a manifest file and check its structural invariants
    Check(CheckOpts),
}

#[derive(clap::Args)]
pub(crate) struct CheckOpts {
    /// Path to the manifest file
    #[arg(default_value = "wrangler.toml")]
    path: PathBuf,
}

impl Opts {
    pub(crate) fn run(self) -> Result<()> {
        match self {
            Opts::Check(opts) => opts.run(),
        }
    }
}

impl CheckOpts {
    fn run(self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read manifest: {}", self.path.display()))?;
        let manifest: Manifest = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse manifest: {}", self.path.display()))?;

        if let Err(errors) = validate(&manifest) {
            for error in &errors {
                eprintln!("{} {error}", style("error:").red().bold());
            }
            bail!(
                "Manifest {} failed validation with {} error(s)",
                self.path.display(),
                errors.len()
            );
        }

        println!(
            "{} {} v{} ({} runtime, {} dev dependencies)",
            style("OK").green().bold(),
            manifest.package.name,
            manifest.package.version,
            manifest.dependencies.len(),
            manifest.dev_dependencies.len()
        );
        Ok(())
    }
}
