use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Table, presets::UTF8_FULL};
use wrangler_lda::{Allocator, TrainingConfig};

use crate::core::config::Config;
use crate::model::read_corpus;

/// Train a topic model and show its top terms
#[derive(clap::Args)]
pub(crate) struct Opts {
    /// Path to the corpus file produced by `wrangler wrangle`
    #[arg(long, default_value = "corpus.json")]
    corpus: PathBuf,

    /// Number of topics to fit
    #[arg(long, default_value_t = 5)]
    num_topics: usize,

    /// Number of top terms to show per topic
    #[arg(long, default_value_t = 10)]
    terms: usize,

    /// Passes over the corpus (defaults from config)
    #[arg(long)]
    passes: Option<usize>,

    /// Sampling iterations per pass (defaults from config)
    #[arg(long)]
    iterations: Option<usize>,

    /// Random seed for a reproducible model
    #[arg(long)]
    seed: Option<u64>,
}

impl Opts {
    pub(crate) fn run(self) -> Result<()> {
        let config = Config::load()?;
        let modeling = &config.modeling;

        let documents = read_corpus(&self.corpus)?;
        let allocator = Allocator::new(
            &documents,
            modeling.no_below,
            modeling.no_above,
            modeling.keep_n,
        )
        .context("Failed to preprocess corpus")?;

        let training = TrainingConfig {
            num_topics: self.num_topics,
            passes: self.passes.unwrap_or(modeling.passes),
            iterations: self.iterations.unwrap_or(modeling.iterations),
            seed: self.seed,
            ..TrainingConfig::default()
        };
        let model = allocator.train(&training).context("Failed to train model")?;

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Topic", "Top terms"]);

        let dictionary = allocator.dictionary();
        for topic in 0..model.num_topics() {
            let terms: Vec<&str> = model
                .topic_terms(topic, self.terms)
                .into_iter()
                .filter_map(|(id, _)| dictionary.token(id))
                .collect();
            table.add_row(vec![topic.to_string(), terms.join(", ")]);
        }

        println!("{table}");
        Ok(())
    }
}
