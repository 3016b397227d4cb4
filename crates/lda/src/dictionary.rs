//! Token ↔ id mapping with document-frequency bookkeeping.

use std::collections::HashMap;

/// A bag-of-words entry: `(term id, count)`.
pub(crate) type BowEntry = (u32, u32);

/// A vocabulary dictionary built from a tokenized corpus.
///
/// Tracks in how many documents each token appears so that vocabulary
/// extremes (very rare and very common tokens) can be filtered before
/// modeling.
///
/// # Example
///
/// ```rust
/// use wrangler_lda::Dictionary;
///
/// let documents = vec![
///     vec!["printer".to_string(), "jammed".to_string()],
///     vec!["printer".to_string(), "offline".to_string()],
/// ];
/// let dictionary = Dictionary::from_documents(&documents);
/// assert_eq!(dictionary.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct Dictionary {
    token_to_id: HashMap<String, u32>,
    tokens: Vec<String>,
    doc_freqs: Vec<u32>,
    num_docs: usize,
}

impl Dictionary {
    /// Build a dictionary from a tokenized corpus.
    ///
    /// Ids are assigned in order of first appearance; each document counts a
    /// token's document frequency at most once.
    pub fn from_documents(documents: &[Vec<String>]) -> Self {
        let mut dictionary = Self {
            num_docs: documents.len(),
            ..Self::default()
        };

        for document in documents {
            let mut seen = Vec::new();
            for token in document {
                let id = dictionary.intern(token);
                if !seen.contains(&id) {
                    seen.push(id);
                }
            }
            for id in seen {
                dictionary.doc_freqs[id as usize] += 1;
            }
        }
        dictionary
    }

    fn intern(&mut self, token: &str) -> u32 {
        if let Some(&id) = self.token_to_id.get(token) {
            return id;
        }
        let id = u32::try_from(self.tokens.len()).unwrap_or(u32::MAX);
        self.token_to_id.insert(token.to_string(), id);
        self.tokens.push(token.to_string());
        self.doc_freqs.push(0);
        id
    }

    /// Number of tokens in the vocabulary.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the vocabulary is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of documents the dictionary was built from.
    #[must_use]
    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    /// The token for an id, if present.
    #[must_use]
    pub fn token(&self, id: u32) -> Option<&str> {
        self.tokens.get(id as usize).map(String::as_str)
    }

    /// The id for a token, if present.
    #[must_use]
    pub fn id(&self, token: &str) -> Option<u32> {
        self.token_to_id.get(token).copied()
    }

    /// The document frequency of a token id.
    #[must_use]
    pub fn doc_freq(&self, id: u32) -> u32 {
        self.doc_freqs.get(id as usize).copied().unwrap_or(0)
    }

    /// Filter vocabulary extremes, compacting ids.
    ///
    /// Drops tokens that appear in fewer than `no_below` documents or in more
    /// than `no_above` (a fraction) of all documents, then keeps at most
    /// `keep_n` of the survivors by descending document frequency. Remaining
    /// tokens are re-assigned dense ids.
    pub fn filter_extremes(&mut self, no_below: u32, no_above: f64, keep_n: usize) {
        let ceiling = (no_above * self.num_docs as f64).floor() as u32;

        let mut kept: Vec<u32> = (0..self.tokens.len() as u32)
            .filter(|&id| {
                let df = self.doc_freqs[id as usize];
                df >= no_below && df <= ceiling
            })
            .collect();

        // Most frequent first; ties broken by token text for determinism.
        kept.sort_by(|&a, &b| {
            self.doc_freqs[b as usize]
                .cmp(&self.doc_freqs[a as usize])
                .then_with(|| self.tokens[a as usize].cmp(&self.tokens[b as usize]))
        });
        kept.truncate(keep_n);
        kept.sort_unstable();

        let mut tokens = Vec::with_capacity(kept.len());
        let mut doc_freqs = Vec::with_capacity(kept.len());
        let mut token_to_id = HashMap::with_capacity(kept.len());
        for (new_id, &old_id) in kept.iter().enumerate() {
            let token = self.tokens[old_id as usize].clone();
            token_to_id.insert(token.clone(), new_id as u32);
            tokens.push(token);
            doc_freqs.push(self.doc_freqs[old_id as usize]);
        }

        self.tokens = tokens;
        self.doc_freqs = doc_freqs;
        self.token_to_id = token_to_id;
    }

    /// Convert a tokenized document into a bag of words.
    ///
    /// Tokens absent from the vocabulary are dropped. Entries are sorted by
    /// term id.
    #[must_use]
    pub fn doc2bow(&self, document: &[String]) -> Vec<(u32, u32)> {
        let mut counts: HashMap<u32, u32> = HashMap::new();
        for token in document {
            if let Some(id) = self.id(token) {
                *counts.entry(id).or_insert(0) += 1;
            }
        }
        let mut bow: Vec<BowEntry> = counts.into_iter().collect();
        bow.sort_unstable();
        bow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|doc| doc.iter().map(ToString::to_string).collect())
            .collect()
    }

    #[test]
    fn test_doc_freq_counts_each_document_once() {
        let documents = docs(&[&["printer", "printer", "jammed"], &["printer", "offline"]]);
        let dictionary = Dictionary::from_documents(&documents);

        let printer = dictionary.id("printer").unwrap();
        assert_eq!(dictionary.doc_freq(printer), 2);
        let jammed = dictionary.id("jammed").unwrap();
        assert_eq!(dictionary.doc_freq(jammed), 1);
    }

    #[test]
    fn test_filter_extremes_drops_rare_and_common() {
        let documents = docs(&[
            &["printer", "jammed", "ticket"],
            &["printer", "offline", "ticket"],
            &["password", "reset", "ticket"],
            &["password", "expired", "ticket"],
        ]);
        let mut dictionary = Dictionary::from_documents(&documents);

        // "ticket" appears in every document, the singletons in just one.
        dictionary.filter_extremes(2, 0.5, 1000);

        assert!(dictionary.id("ticket").is_none());
        assert!(dictionary.id("jammed").is_none());
        assert!(dictionary.id("printer").is_some());
        assert!(dictionary.id("password").is_some());
        assert_eq!(dictionary.len(), 2);
    }

    #[test]
    fn test_filter_extremes_keep_n_caps_vocabulary() {
        let documents = docs(&[
            &["printer", "password", "router"],
            &["printer", "password"],
            &["printer"],
        ]);
        let mut dictionary = Dictionary::from_documents(&documents);

        dictionary.filter_extremes(1, 1.0, 2);

        // The two most document-frequent tokens survive.
        assert!(dictionary.id("printer").is_some());
        assert!(dictionary.id("password").is_some());
        assert!(dictionary.id("router").is_none());
    }

    #[test]
    fn test_doc2bow_counts_and_sorts() {
        let documents = docs(&[&["printer", "jammed"], &["printer", "offline"]]);
        let dictionary = Dictionary::from_documents(&documents);

        let bow = dictionary.doc2bow(&[
            "printer".to_string(),
            "printer".to_string(),
            "offline".to_string(),
            "unknown".to_string(),
        ]);

        let printer = dictionary.id("printer").unwrap();
        let offline = dictionary.id("offline").unwrap();
        assert_eq!(bow, vec![(printer, 2), (offline, 1)]);
    }
}
