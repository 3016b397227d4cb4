//! Collapsed Gibbs sampling for Latent Dirichlet Allocation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Error type for modeling failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LdaError {
    /// The corpus contains no documents with tokens.
    #[error("The corpus contains no usable documents")]
    EmptyCorpus,

    /// The vocabulary is empty, usually after over-aggressive filtering.
    #[error("The vocabulary is empty")]
    EmptyVocabulary,

    /// A topic count of zero was requested.
    #[error("The number of topics must be at least 1")]
    InvalidTopicCount,
}

/// Training parameters for an LDA model.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    /// Number of topics to fit.
    pub num_topics: usize,
    /// Number of passes over the corpus.
    pub passes: usize,
    /// Sampling iterations per pass.
    pub iterations: usize,
    /// Symmetric document-topic prior; `None` uses `50 / num_topics`.
    pub alpha: Option<f64>,
    /// Symmetric topic-term prior.
    pub beta: f64,
    /// Random seed; `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_topics: 30,
            passes: 10,
            iterations: 50,
            alpha: None,
            beta: 0.01,
            seed: None,
        }
    }
}

impl TrainingConfig {
    fn resolved_alpha(&self, num_topics: usize) -> f64 {
        self.alpha.unwrap_or(50.0 / num_topics as f64)
    }
}

/// A topic model trained by collapsed Gibbs sampling.
///
/// Tracks topic-term and document-topic counts; term and topic distributions
/// are smoothed with the symmetric priors from the [`TrainingConfig`].
#[derive(Debug, Clone)]
#[must_use]
pub struct LdaModel {
    num_topics: usize,
    vocab_size: usize,
    alpha: f64,
    beta: f64,
    /// Flattened `[topic][term]` assignment counts.
    topic_term_counts: Vec<u64>,
    /// Total assignments per topic.
    topic_counts: Vec<u64>,
    /// Assignment counts per document and topic.
    doc_topic_counts: Vec<Vec<u64>>,
    /// Token count per document.
    doc_lengths: Vec<u64>,
}

impl LdaModel {
    /// Train a model over a bag-of-words corpus.
    ///
    /// `corpus` holds one `(term id, count)` list per document; `vocab_size`
    /// is the dictionary size the term ids index into.
    ///
    /// # Errors
    ///
    /// Returns an error if the corpus has no tokens, the vocabulary is empty,
    /// or zero topics were requested.
    pub fn train(
        corpus: &[Vec<(u32, u32)>],
        vocab_size: usize,
        config: &TrainingConfig,
    ) -> Result<Self, LdaError> {
        if config.num_topics == 0 {
            return Err(LdaError::InvalidTopicCount);
        }
        if vocab_size == 0 {
            return Err(LdaError::EmptyVocabulary);
        }

        // Expand bags of words into one token instance per occurrence.
        let documents: Vec<Vec<u32>> = corpus
            .iter()
            .map(|document| {
                document
                    .iter()
                    .flat_map(|&(term, count)| std::iter::repeat_n(term, count as usize))
                    .collect()
            })
            .filter(|tokens: &Vec<u32>| !tokens.is_empty())
            .collect();
        if documents.is_empty() {
            return Err(LdaError::EmptyCorpus);
        }

        let num_topics = config.num_topics;
        let mut rng = random_state(config.seed);
        let mut model = Self {
            num_topics,
            vocab_size,
            alpha: config.resolved_alpha(num_topics),
            beta: config.beta,
            topic_term_counts: vec![0; num_topics * vocab_size],
            topic_counts: vec![0; num_topics],
            doc_topic_counts: documents.iter().map(|_| vec![0; num_topics]).collect(),
            doc_lengths: documents.iter().map(|tokens| tokens.len() as u64).collect(),
        };

        // Random initial topic assignments.
        let mut assignments: Vec<Vec<usize>> = documents
            .iter()
            .map(|tokens| {
                tokens
                    .iter()
                    .map(|_| rng.gen_range(0..num_topics))
                    .collect()
            })
            .collect();
        for (doc_index, (tokens, topics)) in documents.iter().zip(&assignments).enumerate() {
            for (&term, &topic) in tokens.iter().zip(topics) {
                model.increment(doc_index, term, topic);
            }
        }

        let sweeps = config.passes.max(1) * config.iterations.max(1);
        let mut proposal = vec![0.0_f64; num_topics];
        for sweep in 0..sweeps {
            for (doc_index, tokens) in documents.iter().enumerate() {
                for (position, &term) in tokens.iter().enumerate() {
                    let old_topic = assignments[doc_index][position];
                    model.decrement(doc_index, term, old_topic);

                    let new_topic = model.sample_topic(doc_index, term, &mut proposal, &mut rng);
                    model.increment(doc_index, term, new_topic);
                    assignments[doc_index][position] = new_topic;
                }
            }
            debug!(sweep, sweeps, "Completed Gibbs sweep");
        }

        Ok(model)
    }

    fn increment(&mut self, doc_index: usize, term: u32, topic: usize) {
        self.topic_term_counts[topic * self.vocab_size + term as usize] += 1;
        self.topic_counts[topic] += 1;
        self.doc_topic_counts[doc_index][topic] += 1;
    }

    fn decrement(&mut self, doc_index: usize, term: u32, topic: usize) {
        self.topic_term_counts[topic * self.vocab_size + term as usize] -= 1;
        self.topic_counts[topic] -= 1;
        self.doc_topic_counts[doc_index][topic] -= 1;
    }

    /// Sample a topic for one token from the full conditional distribution.
    fn sample_topic(
        &self,
        doc_index: usize,
        term: u32,
        proposal: &mut [f64],
        rng: &mut StdRng,
    ) -> usize {
        let smoothing = self.beta * self.vocab_size as f64;
        let mut total = 0.0;
        for topic in 0..self.num_topics {
            let term_weight = (self.topic_term_counts[topic * self.vocab_size + term as usize]
                as f64
                + self.beta)
                / (self.topic_counts[topic] as f64 + smoothing);
            let doc_weight = self.doc_topic_counts[doc_index][topic] as f64 + self.alpha;
            total += term_weight * doc_weight;
            proposal[topic] = total;
        }

        let draw = rng.gen_range(0.0..total);
        proposal
            .iter()
            .position(|&cumulative| draw < cumulative)
            .unwrap_or(self.num_topics - 1)
    }

    /// Number of topics in the model.
    #[must_use]
    pub fn num_topics(&self) -> usize {
        self.num_topics
    }

    /// The `n` highest-probability terms of a topic, as `(term id, probability)`.
    #[must_use]
    pub fn topic_terms(&self, topic: usize, n: usize) -> Vec<(u32, f64)> {
        let smoothing = self.beta * self.vocab_size as f64;
        let denominator = self.topic_counts.get(topic).copied().unwrap_or(0) as f64 + smoothing;

        let mut terms: Vec<(u32, f64)> = (0..self.vocab_size)
            .map(|term| {
                let count = self
                    .topic_term_counts
                    .get(topic * self.vocab_size + term)
                    .copied()
                    .unwrap_or(0);
                (term as u32, (count as f64 + self.beta) / denominator)
            })
            .collect();
        terms.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        terms.truncate(n);
        terms
    }

    /// The top `n` term ids for every topic.
    #[must_use]
    pub fn top_terms(&self, n: usize) -> Vec<Vec<u32>> {
        (0..self.num_topics)
            .map(|topic| self.topic_terms(topic, n).into_iter().map(|(id, _)| id).collect())
            .collect()
    }

    /// The smoothed topic distribution of a document.
    #[must_use]
    pub fn document_topics(&self, doc_index: usize) -> Vec<f64> {
        let Some(counts) = self.doc_topic_counts.get(doc_index) else {
            return Vec::new();
        };
        let length = self.doc_lengths.get(doc_index).copied().unwrap_or(0) as f64;
        let denominator = length + self.alpha * self.num_topics as f64;
        counts
            .iter()
            .map(|&count| (count as f64 + self.alpha) / denominator)
            .collect()
    }
}

/// Build a random state from a caller seed, or draw a fresh one.
fn random_state(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::thread_rng().r#gen()),
    }
}
