//! tq-core: Theory question lookup library
//!
//! This library splits a flat theory file into question records, ranks them
//! against a free-text query with tf-idf cosine similarity, and resolves the
//! answer file that belongs to a matched question.

pub mod answers;
pub mod config;
pub mod consts;
pub mod corpus;
pub mod discover;
pub mod search;
pub mod tfidf;

pub use answers::{AnswerFile, AnswerIndex, get_answer_file, slugify};
pub use config::Config;
pub use consts::*;
pub use corpus::{Corpus, TheoryRecord, extract_question_title, load_theories};
pub use discover::find_tq_root;
pub use search::{MatchResult, SearchMode, Searcher, find_matches};

#[derive(Debug, thiserror::Error)]
pub enum TqError {
    #[error("Theory file not found: {0}")]
    SourceMissing(std::path::PathBuf),

    #[error("Not in a tq project (no tq.json found)")]
    NotInProject,

    #[error("Already initialized: {0}")]
    AlreadyInitialized(std::path::PathBuf),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TqError>;
