use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use comfy_table::{Table, presets::UTF8_FULL};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use wrangler_lda::{Allocator, SweepPoint, TrainingConfig};

use crate::core::config::Config;

/// Sweep topic counts over a corpus and report coherence
#[derive(clap::Args)]
pub(crate) struct Opts {
    /// Path to the corpus file produced by `wrangler wrangle`
    #[arg(long, default_value = "corpus.json")]
    corpus: PathBuf,

    /// Smallest topic count to evaluate (defaults from config)
    #[arg(long)]
    min_topics: Option<usize>,

    /// Largest topic count to evaluate (defaults from config)
    #[arg(long)]
    max_topics: Option<usize>,

    /// Passes over the corpus per trained model (defaults from config)
    #[arg(long)]
    passes: Option<usize>,

    /// Sampling iterations per pass (defaults from config)
    #[arg(long)]
    iterations: Option<usize>,

    /// Random seed for reproducible sweeps
    #[arg(long)]
    seed: Option<u64>,

    /// Write the sweep results to this JSON file
    #[arg(long)]
    report: Option<PathBuf>,
}

/// The JSON shape of a written sweep report.
#[derive(Debug, Serialize)]
struct Report {
    points: Vec<ReportPoint>,
    best_topic_count: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ReportPoint {
    num_topics: usize,
    coherence: f64,
}

impl Opts {
    pub(crate) fn run(self) -> Result<()> {
        let config = Config::load()?;
        let modeling = &config.modeling;

        let min_topics = self.min_topics.unwrap_or(modeling.min_topics).max(1);
        let max_topics = self.max_topics.unwrap_or(modeling.max_topics);
        if max_topics < min_topics {
            bail!("--max-topics must be at least --min-topics");
        }

        let documents = read_corpus(&self.corpus)?;
        tracing::info!(documents = documents.len(), "Loaded corpus");
        let mut allocator = Allocator::new(
            &documents,
            modeling.no_below,
            modeling.no_above,
            modeling.keep_n,
        )
        .context("Failed to preprocess corpus")?;

        let training = TrainingConfig {
            passes: self.passes.unwrap_or(modeling.passes),
            iterations: self.iterations.unwrap_or(modeling.iterations),
            seed: self.seed,
            ..TrainingConfig::default()
        };

        let spinner = ProgressBar::new_spinner().with_style(
            ProgressStyle::with_template("{spinner} {msg}").expect("static template is valid"),
        );
        spinner.set_message(format!(
            "Training models for {min_topics}..={max_topics} topics"
        ));
        spinner.enable_steady_tick(std::time::Duration::from_millis(120));
        allocator.sweep(min_topics..=max_topics, &training);
        spinner.finish_and_clear();

        let best = allocator.best_topic_count();
        print_sweep_table(allocator.results(), best);
        if let Some(best) = best {
            println!(
                "{} {best} topic(s) scored the best coherence",
                style("Best:").green().bold()
            );
        }

        if let Some(path) = &self.report {
            let report = Report {
                points: allocator
                    .results()
                    .iter()
                    .map(|point| ReportPoint {
                        num_topics: point.num_topics,
                        coherence: point.coherence,
                    })
                    .collect(),
                best_topic_count: best,
            };
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            fs::write(path, json)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("Report:  {}", path.display());
        }
        Ok(())
    }
}

/// Read a corpus file: a JSON array of document strings.
pub(crate) fn read_corpus(path: &std::path::Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus file: {}", path.display()))?;
    let documents: Vec<String> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse corpus file: {}", path.display()))?;
    Ok(documents)
}

fn print_sweep_table(points: &[SweepPoint], best: Option<usize>) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Topics", "Coherence", ""]);

    for point in points {
        let marker = if Some(point.num_topics) == best { "*" } else { "" };
        table.add_row(vec![
            point.num_topics.to_string(),
            format!("{:.4}", point.coherence),
            marker.to_string(),
        ]);
    }

    println!("{table}");
}
