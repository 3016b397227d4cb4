//! Corpus preprocessing: tokenization and stopword removal.

use std::collections::HashSet;
use std::sync::LazyLock;

/// A compact English stopword list covering the function words that dominate
/// support-ticket prose.
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "cannot", "could", "did", "do", "does", "doing", "down", "during", "each",
    "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here",
    "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it",
    "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now",
    "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out",
    "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the",
    "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was", "we", "were",
    "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with", "would",
    "you", "your", "yours", "yourself", "yourselves",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// Tokens shorter than this carry no topical signal.
const MIN_TOKEN_LEN: usize = 3;

/// Tokenize a single document.
///
/// Lowercases, splits on non-alphabetic characters, and keeps alphabetic
/// tokens of at least three characters that are not stopwords.
///
/// # Example
///
/// ```rust
/// let tokens = wrangler_lda::tokenize("The printer is JAMMED again!");
/// assert_eq!(tokens, vec!["printer", "jammed"]);
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphabetic())
        .map(str::to_lowercase)
        .filter(|token| token.len() >= MIN_TOKEN_LEN)
        .filter(|token| !STOPWORD_SET.contains(token.as_str()))
        .collect()
}

/// Tokenize a whole corpus, one token list per document.
#[must_use]
pub fn preprocess(documents: &[String]) -> Vec<Vec<String>> {
    documents.iter().map(|doc| tokenize(doc)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_stopwords_and_short_tokens() {
        let tokens = tokenize("I am on it: the VPN connection failed at HQ");
        assert_eq!(tokens, vec!["vpn", "connection", "failed"]);
    }

    #[test]
    fn test_tokenize_splits_on_punctuation_and_digits() {
        let tokens = tokenize("error404: printer-driver crashed twice");
        assert_eq!(tokens, vec!["error", "printer", "driver", "crashed", "twice"]);
    }

    #[test]
    fn test_preprocess_keeps_document_boundaries() {
        let documents = vec!["printer jammed".to_string(), "password reset".to_string()];
        let tokens = preprocess(&documents);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0], vec!["printer", "jammed"]);
        assert_eq!(tokens[1], vec!["password", "reset"]);
    }
}
