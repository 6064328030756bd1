//! Answer file resolution
//!
//! Answer files live flat in one directory and are named after the slug of
//! their question title (`two-sum.cpp`, `two-sum-hashmap.py`, ...). Lookup is
//! a prefix match over the file names sorted lexicographically, so the same
//! slug always resolves to the same file regardless of directory order.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::Result;

/// Lowercase a title, drop ASCII punctuation, then turn spaces into hyphens.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .map(|c| if c == ' ' { '-' } else { c })
        .collect()
}

/// An answer file read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFile {
    /// File name within the answers directory
    pub filename: String,
    /// Full path
    pub path: PathBuf,
    /// Raw file bytes, written back unchanged when saving
    pub bytes: Vec<u8>,
    /// File content for display, with invalid UTF-8 replaced
    pub content: String,
}

impl AnswerFile {
    /// File extension, if the name has one.
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.filename).extension().and_then(|e| e.to_str())
    }
}

/// Sorted listing of the files in an answers directory.
#[derive(Debug, Clone, Default)]
pub struct AnswerIndex {
    dir: PathBuf,
    filenames: Vec<String>,
}

impl AnswerIndex {
    /// List the regular files directly inside `dir`.
    ///
    /// A missing directory gives an empty index.
    pub fn build(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            tracing::warn!("Answers directory not found: {}", dir.display());
            return Ok(Self {
                dir: dir.to_path_buf(),
                filenames: Vec::new(),
            });
        }

        let walker = WalkBuilder::new(dir)
            .standard_filters(false)
            .max_depth(Some(1))
            .build();

        let mut filenames = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Failed to read entry in {}: {}", dir.display(), e);
                    continue;
                }
            };
            if entry.depth() == 0 || !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            filenames.push(entry.file_name().to_string_lossy().to_string());
        }
        filenames.sort();

        tracing::debug!("Indexed {} answer files in {}", filenames.len(), dir.display());

        Ok(Self {
            dir: dir.to_path_buf(),
            filenames,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn len(&self) -> usize {
        self.filenames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filenames.is_empty()
    }

    pub fn filenames(&self) -> &[String] {
        &self.filenames
    }

    /// Lexicographically first file name starting with `slug`.
    pub fn resolve(&self, slug: &str) -> Option<&str> {
        // Names sharing a prefix are contiguous once sorted.
        let start = self.filenames.partition_point(|name| name.as_str() < slug);
        self.filenames
            .get(start)
            .filter(|name| name.starts_with(slug))
            .map(String::as_str)
    }

    /// Resolve a slug and read the matching file.
    pub fn load(&self, slug: &str) -> Result<Option<AnswerFile>> {
        let Some(filename) = self.resolve(slug) else {
            tracing::debug!("No answer file for slug {:?}", slug);
            return Ok(None);
        };

        let path = self.dir.join(filename);
        let bytes = std::fs::read(&path)?;
        let content = String::from_utf8_lossy(&bytes).into_owned();
        Ok(Some(AnswerFile {
            filename: filename.to_string(),
            path,
            bytes,
            content,
        }))
    }
}

/// Find and read the answer file for a slug in `dir`.
pub fn get_answer_file(slug: &str, dir: &Path) -> Result<Option<AnswerFile>> {
    AnswerIndex::build(dir)?.load(slug)
}
