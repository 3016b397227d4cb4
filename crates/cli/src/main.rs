//! Wrangler CLI command
//!

mod core;
mod manifest;
mod model;
mod topics;
mod wrangle;

use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    /// Also write structured JSON logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Reshape a ticket payload and bind its comments into a corpus
    Wrangle(wrangle::Opts),
    /// Sweep topic counts over a corpus and report coherence
    Model(model::Opts),
    /// Train a topic model and show its top terms
    Topics(topics::Opts),
    /// Inspect and validate the project manifest
    #[command(subcommand)]
    Manifest(manifest::Opts),
}

impl Cli {
    fn run(self) -> Result<(), anyhow::Error> {
        match self.command {
            Command::Wrangle(opts) => opts.run()?,
            Command::Model(opts) => opts.run()?,
            Command::Topics(opts) => opts.run()?,
            Command::Manifest(opts) => opts.run()?,
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = crate::core::logging::init(&cli.verbose, cli.log_file.as_deref())?;
    cli.run()?;
    Ok(())
}
