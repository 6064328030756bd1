//! TF-IDF vector space and cosine scoring
//!
//! Weighting follows the common smoothed scheme:
//!
//! - tokens are lowercased words of two or more word characters,
//! - `tf` is the raw token count in a document,
//! - `idf(t) = ln((1 + n) / (1 + df(t))) + 1`,
//! - every document vector is L2-normalised.
//!
//! The query is counted as one more document when computing `n` and `df`,
//! so the space a query is scored in always includes the query's own terms.
//! Only tokenization and corpus document frequencies are precomputed.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

/// Term -> occurrence count for one document, in term order so sums are
/// accumulated identically for identical documents.
pub type TermCounts = BTreeMap<String, u32>;

/// Split text into lowercase tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Count the tokens of a text.
pub fn term_counts(text: &str) -> TermCounts {
    let mut counts = TermCounts::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

/// Tokenized comparison documents plus their document frequencies.
#[derive(Debug, Clone, Default)]
pub struct TfIdfSpace {
    docs: Vec<TermCounts>,
    doc_freq: HashMap<String, usize>,
}

impl TfIdfSpace {
    /// Tokenize every comparison text.
    pub fn new<S: AsRef<str>>(texts: &[S]) -> Self {
        let docs: Vec<TermCounts> = texts.iter().map(|t| term_counts(t.as_ref())).collect();

        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for doc in &docs {
            for term in doc.keys() {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
        }

        Self { docs, doc_freq }
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Cosine similarity of the query against every document, in document order.
    pub fn similarities(&self, query: &str) -> Vec<f64> {
        if self.docs.is_empty() {
            return Vec::new();
        }

        let query_counts = term_counts(query);
        let n = (self.docs.len() + 1) as f64;

        let idf = |term: &str| -> f64 {
            let corpus_df = self.doc_freq.get(term).copied().unwrap_or(0);
            let df = corpus_df + usize::from(query_counts.contains_key(term));
            ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0
        };

        let query_weights: BTreeMap<&str, f64> = query_counts
            .iter()
            .map(|(term, &count)| (term.as_str(), f64::from(count) * idf(term)))
            .collect();
        let query_norm = l2_norm(query_weights.values().copied());

        self.docs
            .iter()
            .map(|doc| {
                if query_norm == 0.0 {
                    return 0.0;
                }

                let mut dot = 0.0;
                let mut sum_sq = 0.0;
                for (term, &count) in doc {
                    let weight = f64::from(count) * idf(term);
                    sum_sq += weight * weight;
                    if let Some(q) = query_weights.get(term.as_str()) {
                        dot += weight * q;
                    }
                }

                let doc_norm = sum_sq.sqrt();
                if doc_norm == 0.0 {
                    0.0
                } else {
                    // Clamp float drift on identical vectors.
                    (dot / (doc_norm * query_norm)).min(1.0)
                }
            })
            .collect()
    }
}

fn l2_norm(values: impl Iterator<Item = f64>) -> f64 {
    values.map(|v| v * v).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("Two-Sum: a B tree, O(n) time!"),
            vec!["two", "sum", "tree", "time"]
        );
    }

    #[test]
    fn test_tokenize_unicode_words() {
        assert_eq!(tokenize("Über größe"), vec!["über", "größe"]);
    }

    #[test]
    fn test_term_counts() {
        let counts = term_counts("sum sum two");
        assert_eq!(counts.get("sum"), Some(&2));
        assert_eq!(counts.get("two"), Some(&1));
    }

    #[test]
    fn test_self_similarity_is_one() {
        let space = TfIdfSpace::new(&["reverse a linked list"]);
        let scores = space.similarities("reverse a linked list");
        assert_eq!(scores.len(), 1);
        assert!((scores[0] - 1.0).abs() < EPS);
    }

    #[test]
    fn test_reference_scores() {
        let space = TfIdfSpace::new(&["Two Sum", "Add Two Numbers"]);
        let scores = space.similarities("sum of two numbers");
        assert!((scores[0] - 0.608_320).abs() < 1e-5, "{}", scores[0]);
        assert!((scores[1] - 0.421_950).abs() < 1e-5, "{}", scores[1]);
    }

    #[test]
    fn test_disjoint_vocabulary_scores_zero() {
        let space = TfIdfSpace::new(&["binary tree inorder", "valid parentheses"]);
        assert_eq!(space.similarities("linked list cycle"), vec![0.0, 0.0]);
    }

    #[test]
    fn test_empty_query_and_documents() {
        let space = TfIdfSpace::new(&["", "merge intervals"]);
        assert_eq!(space.similarities(""), vec![0.0, 0.0]);
        assert_eq!(space.similarities("merge")[0], 0.0);
    }

    #[test]
    fn test_identical_documents_score_identically() {
        let text = "alpha beta beta gamma delta delta delta epsilon zeta eta theta iota kappa lambda mu";
        let space = TfIdfSpace::new(&[text; 6]);

        for _ in 0..50 {
            let scores = space.similarities("alpha beta gamma delta epsilon kappa");
            assert!(scores[0] > 0.0);
            assert!(scores.iter().all(|s| s.to_bits() == scores[0].to_bits()), "{scores:?}");
        }
    }

    #[test]
    fn test_empty_space() {
        let space = TfIdfSpace::new::<&str>(&[]);
        assert!(space.is_empty());
        assert!(space.similarities("anything").is_empty());
    }
}
