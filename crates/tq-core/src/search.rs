//! Search functionality

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::corpus::{Corpus, TheoryRecord};
use crate::tfidf::TfIdfSpace;
use crate::{MATCH_THRESHOLD, Result, TqError};

/// Which text of a record the query is compared against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// The `QUESTION <n>: <title>` line only.
    #[default]
    Title,
    /// The full theory block.
    Theory,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Theory => "theory",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = TqError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "theory" => Ok(Self::Theory),
            other => Err(TqError::Search(format!(
                "Unknown search mode: {}. Supported: title, theory",
                other
            ))),
        }
    }
}

/// A record that scored at or above the match threshold.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult<'a> {
    /// The text the query was compared against
    pub text: &'a str,
    /// The originating record
    #[serde(rename = "theory", serialize_with = "serialize_record")]
    pub record: &'a TheoryRecord,
    /// Position of the record in the corpus
    pub index: usize,
    /// Cosine similarity in [0, 1]
    pub score: f64,
}

impl MatchResult<'_> {
    pub fn title(&self) -> Option<String> {
        self.record.title()
    }
}

fn serialize_record<S: serde::Serializer>(
    record: &&TheoryRecord,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(record.text())
}

/// Score a query against comparison texts parallel to `records`.
///
/// Results scoring below the threshold are dropped; the rest are sorted by
/// descending score, ties keeping corpus order.
pub fn find_matches<'a, S: AsRef<str>>(
    query: &str,
    records: &'a [TheoryRecord],
    comparison_texts: &'a [S],
) -> Result<Vec<MatchResult<'a>>> {
    if records.len() != comparison_texts.len() {
        return Err(TqError::Search(format!(
            "{} records but {} comparison texts",
            records.len(),
            comparison_texts.len()
        )));
    }

    let space = TfIdfSpace::new(comparison_texts);
    Ok(rank(query, &space, records, comparison_texts))
}

fn rank<'a, S: AsRef<str>>(
    query: &str,
    space: &TfIdfSpace,
    records: &'a [TheoryRecord],
    comparison_texts: &'a [S],
) -> Vec<MatchResult<'a>> {
    let mut matches: Vec<MatchResult<'a>> = space
        .similarities(query)
        .into_iter()
        .enumerate()
        .filter(|(_, score)| *score >= MATCH_THRESHOLD)
        .map(|(index, score)| MatchResult {
            text: comparison_texts[index].as_ref(),
            record: &records[index],
            index,
            score,
        })
        .collect();

    // sort_by is stable, so equal scores stay in corpus order
    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    matches
}

/// Searcher over a loaded corpus.
///
/// Keeps the tokenized comparison texts for both modes so each query only
/// pays for scoring.
pub struct Searcher {
    corpus: Corpus,
    titles: Vec<String>,
    title_space: TfIdfSpace,
    theory_space: TfIdfSpace,
}

impl Searcher {
    pub fn new(corpus: Corpus) -> Self {
        let titles = corpus.titles();
        let title_space = TfIdfSpace::new(&titles);
        let theory_space = TfIdfSpace::new(corpus.records());
        tracing::debug!(
            "Searcher ready: {} records, {} titled",
            corpus.len(),
            titles.iter().filter(|t| !t.is_empty()).count()
        );

        Self {
            corpus,
            titles,
            title_space,
            theory_space,
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Search the corpus for records matching the query.
    pub fn search(&self, query: &str, mode: SearchMode) -> Vec<MatchResult<'_>> {
        let records = self.corpus.records();
        let matches = match mode {
            SearchMode::Title => rank(query, &self.title_space, records, &self.titles),
            SearchMode::Theory => rank(query, &self.theory_space, records, records),
        };
        tracing::debug!("{} search for {:?}: {} matches", mode, query, matches.len());
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_question_corpus() -> Corpus {
        Corpus::from_text(&format!(
            "QUESTION 1: Two Sum\nFind two indices adding up to a target.\n{}\nQUESTION 2: Add Two Numbers\nAdd numbers stored as linked lists.\n",
            "-".repeat(20)
        ))
    }

    #[test]
    fn test_search_mode_parse() {
        assert_eq!("title".parse::<SearchMode>().unwrap(), SearchMode::Title);
        assert_eq!("Theory".parse::<SearchMode>().unwrap(), SearchMode::Theory);
        assert!("fuzzy".parse::<SearchMode>().is_err());
        assert_eq!(SearchMode::default(), SearchMode::Title);
    }

    #[test]
    fn test_title_search_ranking() {
        let corpus = two_question_corpus();
        let titles = corpus.titles();
        let matches = find_matches("sum of two numbers", corpus.records(), &titles).unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].title().as_deref(), Some("Two Sum"));
        assert_eq!(matches[0].index, 0);
        assert!((matches[0].score - 0.608_320).abs() < 1e-5);
        assert_eq!(matches[1].title().as_deref(), Some("Add Two Numbers"));
        assert!((matches[1].score - 0.421_950).abs() < 1e-5);
    }

    #[test]
    fn test_scores_above_threshold_and_sorted() {
        let corpus = Corpus::from_text(&[
            "QUESTION 1: Merge Intervals",
            "QUESTION 2: Merge Two Sorted Lists",
            "QUESTION 3: Merge k Sorted Lists",
            "QUESTION 4: Valid Parentheses",
            "QUESTION 5: Sort Colors",
        ]
        .join("----------"));
        let titles = corpus.titles();
        let matches = find_matches("merge sorted lists", corpus.records(), &titles).unwrap();

        assert!(!matches.is_empty());
        assert!(matches.iter().all(|m| m.score >= MATCH_THRESHOLD));
        assert!(matches.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(matches.iter().all(|m| m.title().as_deref() != Some("Valid Parentheses")));
    }

    #[test]
    fn test_self_match_scores_one() {
        let records = vec![TheoryRecord::new("longest palindromic substring")];
        let texts = vec!["longest palindromic substring"];
        let matches = find_matches("longest palindromic substring", &records, &texts).unwrap();

        assert_eq!(matches.len(), 1);
        assert!((matches[0].score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let records = vec![
            TheoryRecord::new("a"),
            TheoryRecord::new("b"),
            TheoryRecord::new("c"),
        ];
        let texts = vec!["climbing stairs", "unrelated words", "climbing stairs"];
        let matches = find_matches("climbing stairs", &records, &texts).unwrap();

        let order: Vec<usize> = matches.iter().map(|m| m.index).collect();
        assert_eq!(order, vec![0, 2]);
        assert_eq!(matches[0].score, matches[1].score);
    }

    #[test]
    fn test_ties_between_identical_long_records_keep_corpus_order() {
        let text = "alpha beta beta gamma delta delta delta epsilon zeta eta theta iota kappa lambda mu";
        let records: Vec<TheoryRecord> = (0..6).map(|_| TheoryRecord::new(text)).collect();
        let texts = vec![text; 6];

        for _ in 0..50 {
            let matches =
                find_matches("alpha beta gamma delta epsilon kappa", &records, &texts).unwrap();
            let order: Vec<usize> = matches.iter().map(|m| m.index).collect();
            assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);
        }

        let searcher = Searcher::new(Corpus::from_text(&[text; 6].join("----------")));
        let order: Vec<usize> = searcher
            .search("alpha beta gamma delta epsilon kappa", SearchMode::Theory)
            .iter()
            .map(|m| m.index)
            .collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_empty_corpus() {
        let records: Vec<TheoryRecord> = Vec::new();
        let texts: Vec<String> = Vec::new();
        assert!(find_matches("two sum", &records, &texts).unwrap().is_empty());
    }

    #[test]
    fn test_no_match() {
        let corpus = two_question_corpus();
        let titles = corpus.titles();
        assert!(find_matches("trapping rain water", corpus.records(), &titles)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_length_mismatch() {
        let records = vec![TheoryRecord::new("x")];
        let texts: Vec<&str> = Vec::new();
        assert!(matches!(
            find_matches("x", &records, &texts),
            Err(TqError::Search(_))
        ));
    }

    #[test]
    fn test_searcher_matches_find_matches() {
        let corpus = two_question_corpus();
        let searcher = Searcher::new(corpus.clone());

        for mode in [SearchMode::Title, SearchMode::Theory] {
            let texts = corpus.comparison_texts(mode);
            let expected = find_matches("add two linked numbers", corpus.records(), &texts).unwrap();
            let actual = searcher.search("add two linked numbers", mode);

            assert_eq!(actual.len(), expected.len());
            for (a, e) in actual.iter().zip(expected.iter()) {
                assert_eq!(a.index, e.index);
                assert!((a.score - e.score).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_theory_mode_reads_body() {
        let searcher = Searcher::new(two_question_corpus());
        let matches = searcher.search("linked lists", SearchMode::Theory);

        assert_eq!(matches[0].title().as_deref(), Some("Add Two Numbers"));
        assert!(searcher.search("linked lists", SearchMode::Title).is_empty());
    }

    #[test]
    fn test_match_serializes_theory_text() {
        let records = vec![TheoryRecord::new("QUESTION 9: Palindrome Number")];
        let texts = vec!["Palindrome Number"];
        let matches = find_matches("palindrome number", &records, &texts).unwrap();

        let json = serde_json::to_value(&matches[0]).unwrap();
        assert_eq!(json["text"], "Palindrome Number");
        assert_eq!(json["theory"], "QUESTION 9: Palindrome Number");
        assert_eq!(json["index"], 0);
    }
}
