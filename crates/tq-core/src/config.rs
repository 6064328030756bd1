//! Configuration handling for tq.json

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    DEFAULT_ANSWERS_DIR, DEFAULT_FALLBACK_SYNTAX, DEFAULT_PAGE_LIMIT, DEFAULT_THEME,
    DEFAULT_THEORY_FILE, Result, SearchMode, TqError, discover,
};

/// Configuration stored in tq.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Theory corpus file, relative to the project root
    #[serde(default = "default_theory_file")]
    pub theory_file: PathBuf,

    /// Directory holding answer files, relative to the project root
    #[serde(default = "default_answers_dir")]
    pub answers_dir: PathBuf,

    /// Search mode used when none is given on the command line
    #[serde(default)]
    pub default_mode: SearchMode,

    /// Syntect theme for answer code
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Syntax extension for answer files that have none
    #[serde(default = "default_fallback_syntax")]
    pub fallback_syntax: String,

    /// Max matches printed by a one-shot search
    #[serde(default = "default_page_limit")]
    pub page_limit: usize,
}

fn default_theory_file() -> PathBuf {
    PathBuf::from(DEFAULT_THEORY_FILE)
}

fn default_answers_dir() -> PathBuf {
    PathBuf::from(DEFAULT_ANSWERS_DIR)
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

fn default_fallback_syntax() -> String {
    DEFAULT_FALLBACK_SYNTAX.to_string()
}

fn default_page_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theory_file: default_theory_file(),
            answers_dir: default_answers_dir(),
            default_mode: SearchMode::default(),
            theme: default_theme(),
            fallback_syntax: default_fallback_syntax(),
            page_limit: default_page_limit(),
        }
    }
}

impl Config {
    /// Load config from the project root, falling back to defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = discover::config_path(root);
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Self = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the project root.
    pub fn save(&self, root: &Path) -> Result<()> {
        let path = discover::config_path(root);
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.page_limit == 0 {
            return Err(TqError::Config("page_limit must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Absolute location of the theory file.
    pub fn theory_path(&self, root: &Path) -> PathBuf {
        root.join(&self.theory_file)
    }

    /// Absolute location of the answers directory.
    pub fn answers_path(&self, root: &Path) -> PathBuf {
        root.join(&self.answers_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_uses_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config::load(temp.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.theory_path(temp.path()), temp.path().join("theory.txt"));
        assert_eq!(config.answers_path(temp.path()), temp.path().join("answers"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(
            temp.path().join("tq.json"),
            r#"{ "theory_file": "notes/leetcode.txt", "default_mode": "theory" }"#,
        )
        .unwrap();

        let config = Config::load(temp.path()).unwrap();
        assert_eq!(config.theory_file, PathBuf::from("notes/leetcode.txt"));
        assert_eq!(config.default_mode, SearchMode::Theory);
        assert_eq!(config.answers_dir, PathBuf::from("answers"));
        assert_eq!(config.page_limit, DEFAULT_PAGE_LIMIT);
    }

    #[test]
    fn test_save_then_load() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            fallback_syntax: "py".to_string(),
            ..Config::default()
        };
        config.save(temp.path()).unwrap();
        assert_eq!(Config::load(temp.path()).unwrap(), config);
    }

    #[test]
    fn test_zero_page_limit_rejected() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("tq.json"), r#"{ "page_limit": 0 }"#).unwrap();
        assert!(matches!(Config::load(temp.path()), Err(TqError::Config(_))));
    }
}
