//! Theory corpus loading
//!
//! A theory file is plain text where each question's block is separated from
//! the next by a run of at least ten hyphens. Blocks are kept verbatim,
//! including surrounding whitespace.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::search::SearchMode;
use crate::{Result, SEPARATOR_MIN_HYPHENS, TqError};

static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("-{{{SEPARATOR_MIN_HYPHENS},}}")).expect("separator pattern is valid")
});

static QUESTION_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"QUESTION \d+: (.+)").expect("title pattern is valid"));

/// Read a theory file and split it into raw records.
pub fn load_theories(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => TqError::SourceMissing(path.to_path_buf()),
        _ => TqError::Io(e),
    })?;
    Ok(split_theories(&content))
}

/// Split theory text on every run of ten or more hyphens.
pub fn split_theories(text: &str) -> Vec<String> {
    SEPARATOR.split(text).map(str::to_string).collect()
}

/// Extract the title from the first `QUESTION <n>: <title>` line.
pub fn extract_question_title(record: &str) -> Option<String> {
    QUESTION_TITLE
        .captures(record)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// One question's theory block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TheoryRecord {
    text: String,
}

impl TheoryRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The full record text, as read from the source file.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The question title, derived from the text on every call.
    pub fn title(&self) -> Option<String> {
        extract_question_title(&self.text)
    }
}

impl AsRef<str> for TheoryRecord {
    fn as_ref(&self) -> &str {
        self.text()
    }
}

/// Ordered, read-only collection of theory records.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    records: Vec<TheoryRecord>,
}

impl Corpus {
    /// Load and split a theory file.
    pub fn load(path: &Path) -> Result<Self> {
        let records: Vec<TheoryRecord> = load_theories(path)?
            .into_iter()
            .map(TheoryRecord::new)
            .collect();
        tracing::debug!("Loaded {} theory records from {}", records.len(), path.display());
        Ok(Self { records })
    }

    /// Build a corpus from theory text already in memory.
    pub fn from_text(text: &str) -> Self {
        Self {
            records: split_theories(text).into_iter().map(TheoryRecord::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[TheoryRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&TheoryRecord> {
        self.records.get(index)
    }

    /// Title of every record, with untitled records as an empty string.
    pub fn titles(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.title().unwrap_or_default())
            .collect()
    }

    /// Texts the matcher compares the query against, parallel to `records`.
    pub fn comparison_texts(&self, mode: SearchMode) -> Vec<String> {
        match mode {
            SearchMode::Title => self.titles(),
            SearchMode::Theory => self.records.iter().map(|r| r.text.clone()).collect(),
        }
    }

    /// Number of records carrying a question title.
    pub fn titled_count(&self) -> usize {
        self.records.iter().filter(|r| r.title().is_some()).count()
    }
}
