//! Topic-count sweeps over a preprocessed corpus.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::coherence::umass_coherence;
use crate::dictionary::Dictionary;
use crate::model::{LdaError, LdaModel, TrainingConfig};
use crate::preprocess::preprocess;

/// Number of top terms per topic used when scoring coherence.
const COHERENCE_TOP_TERMS: usize = 10;

/// One evaluated topic count in a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    /// The number of topics trained.
    pub num_topics: usize,
    /// The mean UMass coherence of the trained model.
    pub coherence: f64,
}

/// Preprocesses a corpus once and trains models across topic counts.
///
/// The allocator owns the dictionary and bag-of-words corpus, so a sweep
/// over many topic counts pays the preprocessing cost only once. Sweep
/// results are kept for reporting and for picking the best topic count.
#[derive(Debug)]
#[must_use]
pub struct Allocator {
    dictionary: Dictionary,
    corpus: Vec<Vec<(u32, u32)>>,
    results: Vec<SweepPoint>,
}

impl Allocator {
    /// Preprocess a document corpus and build the filtered vocabulary.
    ///
    /// `no_below`, `no_above`, and `keep_n` are the dictionary extremes
    /// filter settings (documents floor, documents fraction ceiling, and
    /// vocabulary cap).
    ///
    /// # Errors
    ///
    /// Returns an error if no vocabulary survives filtering or no document
    /// retains at least one token.
    pub fn new(
        documents: &[String],
        no_below: u32,
        no_above: f64,
        keep_n: usize,
    ) -> Result<Self, LdaError> {
        let tokenized = preprocess(documents);
        let mut dictionary = Dictionary::from_documents(&tokenized);
        debug!(tokens = dictionary.len(), "Built raw vocabulary");

        dictionary.filter_extremes(no_below, no_above, keep_n);
        if dictionary.is_empty() {
            return Err(LdaError::EmptyVocabulary);
        }

        let corpus: Vec<Vec<(u32, u32)>> = tokenized
            .iter()
            .map(|tokens| dictionary.doc2bow(tokens))
            .filter(|bow| !bow.is_empty())
            .collect();
        if corpus.is_empty() {
            return Err(LdaError::EmptyCorpus);
        }

        info!(
            vocabulary = dictionary.len(),
            documents = corpus.len(),
            "Successfully preprocessed data"
        );
        Ok(Self {
            dictionary,
            corpus,
            results: Vec::new(),
        })
    }

    /// The filtered vocabulary.
    #[must_use]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// The bag-of-words corpus.
    #[must_use]
    pub fn corpus(&self) -> &[Vec<(u32, u32)>] {
        &self.corpus
    }

    /// Train a single model at the configured topic count.
    ///
    /// # Errors
    ///
    /// Returns an error if training fails for the requested configuration.
    pub fn train(&self, config: &TrainingConfig) -> Result<LdaModel, LdaError> {
        LdaModel::train(&self.corpus, self.dictionary.len(), config)
    }

    /// Train one model per topic count in `range` and record coherence.
    ///
    /// Topic counts are trained in parallel. Results replace those of any
    /// previous sweep and are returned ordered by topic count. The
    /// `num_topics` field of `config` is overridden by each swept count.
    pub fn sweep(
        &mut self,
        range: std::ops::RangeInclusive<usize>,
        config: &TrainingConfig,
    ) -> &[SweepPoint] {
        let mut results: Vec<SweepPoint> = range
            .into_par_iter()
            .filter_map(|num_topics| {
                let config = TrainingConfig {
                    num_topics,
                    ..config.clone()
                };
                let model = LdaModel::train(&self.corpus, self.dictionary.len(), &config).ok()?;
                let scores = umass_coherence(&self.corpus, &model.top_terms(COHERENCE_TOP_TERMS));
                let coherence = scores.iter().sum::<f64>() / scores.len().max(1) as f64;
                debug!(num_topics, coherence, "Evaluated topic count");
                Some(SweepPoint {
                    num_topics,
                    coherence,
                })
            })
            .collect();

        results.sort_by_key(|point| point.num_topics);
        info!(points = results.len(), "Successfully trained model sweep");
        self.results = results;
        &self.results
    }

    /// Results of the last sweep, ordered by topic count.
    #[must_use]
    pub fn results(&self) -> &[SweepPoint] {
        &self.results
    }

    /// The topic count with the best coherence in the last sweep.
    #[must_use]
    pub fn best_topic_count(&self) -> Option<usize> {
        self.results
            .iter()
            .max_by(|a, b| a.coherence.total_cmp(&b.coherence))
            .map(|point| point.num_topics)
    }

    /// The `n` best topic counts of the last sweep, best first.
    #[must_use]
    pub fn top_topics(&self, n: usize) -> Vec<SweepPoint> {
        let mut ranked = self.results.clone();
        ranked.sort_by(|a, b| b.coherence.total_cmp(&a.coherence));
        ranked.truncate(n);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_documents() -> Vec<String> {
        vec![
            "printer jammed paper tray".to_string(),
            "printer offline paper stuck".to_string(),
            "printer driver paper error".to_string(),
            "password reset account locked".to_string(),
            "password expired account login".to_string(),
            "password forgotten account help".to_string(),
        ]
    }

    fn fixture_config() -> TrainingConfig {
        TrainingConfig {
            passes: 3,
            iterations: 10,
            seed: Some(7),
            ..TrainingConfig::default()
        }
    }

    #[test]
    fn test_new_rejects_empty_corpus() {
        let result = Allocator::new(&[], 1, 0.5, 1000);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_rejects_overfiltered_vocabulary() {
        let documents = vec!["printer jammed".to_string()];
        // Nothing appears in 5 documents.
        let result = Allocator::new(&documents, 5, 0.5, 1000);
        assert_eq!(result.unwrap_err(), LdaError::EmptyVocabulary);
    }

    #[test]
    fn test_sweep_records_a_point_per_topic_count() {
        let mut allocator =
            Allocator::new(&fixture_documents(), 1, 1.0, 1000).expect("Failed to preprocess");

        let results = allocator.sweep(1..=4, &fixture_config()).to_vec();
        assert_eq!(results.len(), 4);
        let counts: Vec<usize> = results.iter().map(|point| point.num_topics).collect();
        assert_eq!(counts, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_best_topic_count_tracks_max_coherence() {
        let mut allocator =
            Allocator::new(&fixture_documents(), 1, 1.0, 1000).expect("Failed to preprocess");
        allocator.sweep(1..=4, &fixture_config());

        let best = allocator.best_topic_count().expect("Expected a sweep result");
        let best_point = allocator
            .results()
            .iter()
            .find(|point| point.num_topics == best)
            .unwrap();
        for point in allocator.results() {
            assert!(point.coherence <= best_point.coherence);
        }
    }

    #[test]
    fn test_top_topics_ranks_by_coherence() {
        let mut allocator =
            Allocator::new(&fixture_documents(), 1, 1.0, 1000).expect("Failed to preprocess");
        allocator.sweep(1..=4, &fixture_config());

        let top = allocator.top_topics(2);
        assert_eq!(top.len(), 2);
        assert!(top[0].coherence >= top[1].coherence);
        assert_eq!(Some(top[0].num_topics), allocator.best_topic_count());
    }

    #[test]
    fn test_train_returns_model_with_requested_topics() {
        let allocator =
            Allocator::new(&fixture_documents(), 1, 1.0, 1000).expect("Failed to preprocess");
        let config = TrainingConfig {
            num_topics: 2,
            ..fixture_config()
        };
        let model = allocator.train(&config).expect("Failed to train");
        assert_eq!(model.num_topics(), 2);
    }
}
