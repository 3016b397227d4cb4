use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use wrangler_tickets::DataWrangler;

/// Reshape a ticket payload and bind its comments into a corpus
#[derive(clap::Args)]
pub(crate) struct Opts {
    /// Path to the ticket payload file (one JSON ticket per line)
    #[arg(long, default_value = "tickets.json")]
    ticket_file: PathBuf,

    /// Path to the directory of per-ticket comment files
    #[arg(long, default_value = "comments")]
    comments_dir: PathBuf,

    /// Where to write the wrangled tickets
    #[arg(long, default_value = "wrangled.json")]
    output: PathBuf,

    /// Where to write the comment corpus
    #[arg(long, default_value = "corpus.json")]
    corpus: PathBuf,
}

impl Opts {
    pub(crate) fn run(self) -> Result<()> {
        tracing::info!(
            ticket_file = %self.ticket_file.display(),
            comments_dir = %self.comments_dir.display(),
            "Initializing wrangler"
        );
        let mut wrangler = DataWrangler::new(&self.ticket_file, &self.comments_dir);

        let spinner = ProgressBar::new_spinner().with_style(
            ProgressStyle::with_template("{spinner} {msg}").expect("static template is valid"),
        );
        spinner.set_message("Binding comments to tickets");
        spinner.enable_steady_tick(std::time::Duration::from_millis(120));
        let processed = wrangler.process();
        spinner.finish_and_clear();
        processed.context("Failed to wrangle ticket data")?;

        wrangler
            .write_output(&self.output)
            .context("Failed to write wrangled tickets")?;

        let corpus = wrangler.corpus();
        let json = serde_json::to_string_pretty(&corpus).context("Failed to serialize corpus")?;
        fs::write(&self.corpus, json)
            .with_context(|| format!("Failed to write corpus to {}", self.corpus.display()))?;

        println!(
            "{} {} ticket(s), {} document(s)",
            style("Wrangled").green().bold(),
            wrangler.wrangled_tickets().len(),
            corpus.len()
        );
        println!("Tickets: {}", self.output.display());
        println!("Corpus:  {}", self.corpus.display());
        Ok(())
    }
}
