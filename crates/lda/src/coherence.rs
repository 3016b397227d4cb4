//! UMass topic coherence.

use std::collections::{HashMap, HashSet};

/// Score topics against a bag-of-words corpus with UMass coherence.
///
/// For each topic the score averages `ln((D(w_i, w_j) + 1) / D(w_j))` over
/// all ranked term pairs, where `D` counts (co-)document frequencies in the
/// corpus. Higher scores mean the top terms co-occur more often; the `+ 1`
/// smoothing lets a pair that always co-occurs score slightly above zero.
///
/// Topics with fewer than two terms, and term pairs whose conditioning term
/// never occurs, contribute nothing to the average.
///
/// # Example
///
/// ```rust
/// use wrangler_lda::umass_coherence;
///
/// let corpus = vec![vec![(0, 2), (1, 1)], vec![(0, 1), (2, 1)]];
/// let topics = vec![vec![0, 1], vec![0, 2]];
/// let scores = umass_coherence(&corpus, &topics);
/// assert_eq!(scores.len(), 2);
/// ```
#[must_use]
pub fn umass_coherence(corpus: &[Vec<(u32, u32)>], topics: &[Vec<u32>]) -> Vec<f64> {
    // Per-document term sets; counts are irrelevant for coherence.
    let documents: Vec<HashSet<u32>> = corpus
        .iter()
        .map(|document| document.iter().map(|&(term, _)| term).collect())
        .collect();

    let mut doc_freq: HashMap<u32, usize> = HashMap::new();
    for document in &documents {
        for &term in document {
            *doc_freq.entry(term).or_insert(0) += 1;
        }
    }

    let co_doc_freq = |a: u32, b: u32| {
        documents
            .iter()
            .filter(|document| document.contains(&a) && document.contains(&b))
            .count()
    };

    topics
        .iter()
        .map(|terms| {
            let mut score = 0.0;
            let mut pairs = 0;
            for (rank, &term) in terms.iter().enumerate().skip(1) {
                for &earlier in terms.iter().take(rank) {
                    let conditioning = doc_freq.get(&earlier).copied().unwrap_or(0);
                    if conditioning == 0 {
                        continue;
                    }
                    let joint = co_doc_freq(term, earlier);
                    score += ((joint as f64 + 1.0) / conditioning as f64).ln();
                    pairs += 1;
                }
            }
            if pairs == 0 { 0.0 } else { score / f64::from(pairs) }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooccurring_terms_score_higher() {
        // Terms 0 and 1 always co-occur; terms 0 and 2 never do.
        let corpus = vec![
            vec![(0, 1), (1, 1)],
            vec![(0, 1), (1, 1)],
            vec![(2, 1), (3, 1)],
        ];
        let topics = vec![vec![0, 1], vec![0, 2]];

        let scores = umass_coherence(&corpus, &topics);
        assert!(scores[0] > scores[1]);
    }

    #[test]
    fn test_perfect_cooccurrence_scores_positive() {
        let corpus = vec![vec![(0, 1), (1, 1)], vec![(0, 1), (1, 1)]];
        let topics = vec![vec![0, 1]];

        let scores = umass_coherence(&corpus, &topics);
        // ln((2 + 1) / 2) > 0 for a pair that always co-occurs.
        assert!(scores[0] > 0.0);
    }

    #[test]
    fn test_single_term_topic_scores_zero() {
        let corpus = vec![vec![(0, 1)]];
        let topics = vec![vec![0]];

        let scores = umass_coherence(&corpus, &topics);
        assert_eq!(scores, vec![0.0]);
    }

    #[test]
    fn test_unseen_conditioning_term_is_skipped() {
        let corpus = vec![vec![(0, 1)]];
        // Term 9 never occurs in the corpus.
        let topics = vec![vec![9, 0]];

        let scores = umass_coherence(&corpus, &topics);
        assert_eq!(scores, vec![0.0]);
    }
}
