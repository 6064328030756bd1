/// The project config file name (marks the project root, like .git)
pub const CONFIG_FILE: &str = "tq.json";

/// Default theory corpus file, relative to the project root
pub const DEFAULT_THEORY_FILE: &str = "theory.txt";

/// Default answers directory, relative to the project root
pub const DEFAULT_ANSWERS_DIR: &str = "answers";

/// Minimum run of hyphens that separates two theory records
pub const SEPARATOR_MIN_HYPHENS: usize = 10;

/// Matches scoring below this are dropped
pub const MATCH_THRESHOLD: f64 = 0.10;

/// Default syntect theme for answer code
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Syntax used for answer files without an extension
pub const DEFAULT_FALLBACK_SYNTAX: &str = "cpp";

/// Default number of matches printed by a one-shot search
pub const DEFAULT_PAGE_LIMIT: usize = 10;
