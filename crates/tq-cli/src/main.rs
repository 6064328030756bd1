//! tq CLI: Theory question lookup

mod render;
mod repl;
mod session;

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tq_core::{
    AnswerIndex, CONFIG_FILE, Config, Corpus, SearchMode, Searcher, TqError, discover, slugify,
};

use crate::render::Renderer;
use crate::repl::Repl;

#[derive(Parser)]
#[command(name = "tq")]
#[command(about = "Look up interview question theory and answers", long_about = None)]
#[command(version)]
struct Cli {
    /// Project root (default: nearest directory with tq.json, else the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Search query (when no subcommand is given)
    #[arg(trailing_var_arg = true)]
    query: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default tq.json in the current directory
    Init,

    /// Show corpus and answer statistics
    Status,

    /// Start the interactive menu
    Repl,

    /// Search for questions matching a query
    Search {
        /// Search query
        query: Vec<String>,

        /// Compare against titles or full theory text
        #[arg(short, long)]
        mode: Option<SearchMode>,

        /// Maximum number of results (at least 1)
        #[arg(short = 'n', long, value_parser = parse_limit)]
        limit: Option<usize>,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,

        /// Also print the answer for the best titled match
        #[arg(short, long)]
        answer: bool,
    },

    /// Print or save the answer file for a question title
    Answer {
        /// Question title, e.g. "Two Sum"
        title: Vec<String>,

        /// Save the answer here instead of printing it
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

fn parse_limit(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// A resolved project root with its configuration.
struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    fn open(root: Option<PathBuf>) -> Result<Self> {
        let root = match root {
            Some(root) => root,
            None => {
                let cwd = std::env::current_dir()?;
                match discover::find_tq_root(&cwd) {
                    Ok(root) => root,
                    Err(TqError::NotInProject) => {
                        tracing::debug!("No {} found, using {}", CONFIG_FILE, cwd.display());
                        cwd
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        };
        let config = Config::load(&root)
            .with_context(|| format!("Failed to load {}", discover::config_path(&root).display()))?;

        Ok(Self { root, config })
    }

    fn load_searcher(&self) -> Result<Searcher> {
        let path = self.config.theory_path(&self.root);
        let corpus = Corpus::load(&path).context("Cannot start without a theory file")?;
        Ok(Searcher::new(corpus))
    }

    fn load_answers(&self) -> Result<AnswerIndex> {
        Ok(AnswerIndex::build(&self.config.answers_path(&self.root))?)
    }

    fn renderer(&self) -> Renderer {
        if io::stdout().is_terminal() {
            Renderer::styled(&self.config.theme, &self.config.fallback_syntax)
        } else {
            Renderer::plain(&self.config.fallback_syntax)
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => cmd_init()?,
        Some(Commands::Status) => cmd_status(cli.root)?,
        Some(Commands::Repl) => cmd_repl(cli.root)?,
        Some(Commands::Search {
            query,
            mode,
            limit,
            json,
            answer,
        }) => {
            let query = query.join(" ");
            cmd_search(cli.root, &query, mode, limit, json, answer)?;
        }
        Some(Commands::Answer { title, save }) => cmd_answer(cli.root, &title.join(" "), save)?,
        None => {
            // Default: interactive menu, or a one-shot search with the given query
            if cli.query.is_empty() {
                cmd_repl(cli.root)?;
            } else {
                let query = cli.query.join(" ");
                cmd_search(cli.root, &query, None, None, false, false)?;
            }
        }
    }

    Ok(())
}

fn cmd_init() -> Result<()> {
    let cwd = std::env::current_dir()?;
    let path = discover::config_path(&cwd);

    if path.exists() {
        return Err(TqError::AlreadyInitialized(path).into());
    }

    Config::default().save(&cwd)?;

    println!("Initialized tq project in {}", cwd.display());
    println!("Put your theory in theory.txt and answer files in answers/.");

    Ok(())
}

fn cmd_status(root: Option<PathBuf>) -> Result<()> {
    let project = Project::open(root)?;
    let config = &project.config;

    println!("tq project: {}", project.root.display());
    println!();
    println!("Configuration:");
    println!("  Theory file:  {}", config.theory_file.display());
    println!("  Answers dir:  {}", config.answers_dir.display());
    println!("  Default mode: {}", config.default_mode);
    println!("  Theme:        {}", config.theme);
    println!();

    println!("Corpus:");
    match Corpus::load(&config.theory_path(&project.root)) {
        Ok(corpus) => {
            println!("  Records:        {}", corpus.len());
            println!("  Titled records: {}", corpus.titled_count());
        }
        Err(TqError::SourceMissing(path)) => {
            println!("  Theory file missing: {}", path.display());
        }
        Err(e) => return Err(e.into()),
    }

    let answers = project.load_answers()?;
    println!();
    println!("Answers:");
    println!("  Files: {}", answers.len());

    Ok(())
}

fn cmd_repl(root: Option<PathBuf>) -> Result<()> {
    let project = Project::open(root)?;
    let searcher = with_spinner("Loading theory...", || project.load_searcher())?;
    let answers = project.load_answers()?;
    let renderer = project.renderer();
    let save_dir = std::env::current_dir()?;

    let stdin = io::stdin();
    let mut repl = Repl::new(
        &searcher,
        &answers,
        &renderer,
        save_dir,
        stdin.lock(),
        io::stdout(),
    );
    repl.run()
}

fn cmd_search(
    root: Option<PathBuf>,
    query: &str,
    mode: Option<SearchMode>,
    limit: Option<usize>,
    json: bool,
    show_answer: bool,
) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        eprintln!("Please enter a query to search.");
        return Ok(());
    }

    let project = Project::open(root)?;
    let mode = mode.unwrap_or(project.config.default_mode);
    let limit = limit.unwrap_or(project.config.page_limit);

    let searcher = with_spinner("Searching...", || project.load_searcher())?;
    let mut matches = searcher.search(query, mode);
    matches.truncate(limit);

    let mut out = io::stdout().lock();

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&matches)?)?;
        return Ok(());
    }

    if matches.is_empty() {
        writeln!(out, "No match found for: {}", query)?;
        return Ok(());
    }

    let renderer = project.renderer();
    writeln!(out, "Results for: {} ({} mode)\n", query, mode)?;
    for (i, result) in matches.iter().enumerate() {
        renderer.write_match(&mut out, i + 1, matches.len(), result, false)?;
    }

    if show_answer {
        match matches.iter().find_map(|m| m.title()) {
            Some(title) => {
                let answer = project.load_answers()?.load(&slugify(&title))?;
                renderer.write_answer(&mut out, &title, answer.as_ref())?;
            }
            None => writeln!(out, "No titled match to fetch an answer for.")?,
        }
    }

    Ok(())
}

fn cmd_answer(root: Option<PathBuf>, title: &str, save: Option<PathBuf>) -> Result<()> {
    let title = title.trim();
    if title.is_empty() {
        anyhow::bail!("Please give a question title.");
    }

    let project = Project::open(root)?;
    let slug = slugify(title);
    let answers = project.load_answers()?;
    let Some(answer) = answers.load(&slug)? else {
        anyhow::bail!(
            "Answer file not found for '{}' (looked for {}* in {})",
            title,
            slug,
            answers.dir().display()
        );
    };

    match save {
        Some(target) => {
            let target = if target.is_dir() {
                target.join(&answer.filename)
            } else {
                target
            };
            std::fs::write(&target, &answer.bytes)
                .with_context(|| format!("Failed to save {}", target.display()))?;
            println!("Saved {} to {}", answer.filename, target.display());
        }
        None => {
            let renderer = project.renderer();
            renderer.write_answer(&mut io::stdout().lock(), title, Some(&answer))?;
        }
    }

    Ok(())
}

/// Run `f` behind a spinner when attached to a terminal.
fn with_spinner<T>(message: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    if !io::stderr().is_terminal() {
        return f();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());

    let result = f();
    pb.finish_and_clear();
    result
}
