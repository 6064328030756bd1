//! Interactive menu-driven lookup session

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tq_core::{AnswerIndex, MatchResult, SearchMode, Searcher, slugify};

use crate::render::Renderer;
use crate::session::MatchCursor;

/// Where control goes after a step of the session.
enum Flow {
    /// Stay at the current level
    Continue,
    /// Back to the main menu
    Menu,
    /// End the session
    Exit,
}

/// Menu-driven session over a loaded corpus.
pub struct Repl<'a, R, W> {
    searcher: &'a Searcher,
    answers: &'a AnswerIndex,
    renderer: &'a Renderer,
    save_dir: PathBuf,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Repl<'a, R, W> {
    pub fn new(
        searcher: &'a Searcher,
        answers: &'a AnswerIndex,
        renderer: &'a Renderer,
        save_dir: PathBuf,
        input: R,
        output: W,
    ) -> Self {
        Self {
            searcher,
            answers,
            renderer,
            save_dir,
            input,
            output,
        }
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\nMAIN MENU:")?;
            writeln!(self.output, "1  Title-based Search")?;
            writeln!(self.output, "2  Theory-based Search")?;
            writeln!(self.output, "0  Exit")?;

            let Some(choice) = self.prompt("\nSelect an option: ")? else {
                return Ok(());
            };

            let mode = match choice.as_str() {
                "0" => {
                    writeln!(self.output, "Exiting. Happy coding!")?;
                    return Ok(());
                }
                "1" => SearchMode::Title,
                "2" => SearchMode::Theory,
                _ => {
                    writeln!(self.output, "Invalid choice. Try again.")?;
                    continue;
                }
            };

            if let Flow::Exit = self.query_loop(mode)? {
                return Ok(());
            }
        }
    }

    fn query_loop(&mut self, mode: SearchMode) -> Result<Flow> {
        loop {
            let Some(query) =
                self.prompt("\nEnter your query text (or type 'menu' to return to Main Menu): ")?
            else {
                return Ok(Flow::Exit);
            };

            if query.eq_ignore_ascii_case("menu") {
                return Ok(Flow::Menu);
            }
            if query.is_empty() {
                writeln!(self.output, "Please enter a query to search.")?;
                continue;
            }

            let searcher = self.searcher;
            let matches: Vec<MatchResult<'_>> = searcher
                .search(&query, mode)
                .into_iter()
                .filter(|m| m.title().is_some())
                .collect();

            let Some(cursor) = MatchCursor::new(matches) else {
                writeln!(self.output, "\nNo match found. Try a different or clearer query.")?;
                continue;
            };

            match self.browse(cursor)? {
                Flow::Continue => continue,
                other => return Ok(other),
            }
        }
    }

    /// Page through matches until one is accepted or the list runs out.
    fn browse(&mut self, mut cursor: MatchCursor<MatchResult<'_>>) -> Result<Flow> {
        loop {
            let current = cursor.current();
            let title = current.title().unwrap_or_default();
            self.renderer
                .write_match(&mut self.output, cursor.position(), cursor.len(), current, true)?;

            let prompt = format!(
                "Fetch the answer code for '{}'? (yes/no/prev/save/menu): ",
                title
            );
            let Some(reply) = self.prompt(&prompt)? else {
                return Ok(Flow::Exit);
            };

            match reply.to_lowercase().as_str() {
                "menu" => return Ok(Flow::Menu),
                "yes" | "y" => {
                    match self.answers.load(&slugify(&title)) {
                        Ok(answer) => self
                            .renderer
                            .write_answer(&mut self.output, &title, answer.as_ref())?,
                        Err(e) => writeln!(self.output, "\nCould not read answer for '{}': {}", title, e)?,
                    }
                    return Ok(Flow::Continue);
                }
                "save" | "s" => {
                    if let Err(e) = self.save_answer(&title) {
                        writeln!(self.output, "\n{:#}", e)?;
                    }
                    return Ok(Flow::Continue);
                }
                "prev" | "p" => {
                    if !cursor.back() {
                        writeln!(self.output, "\nAlready at the first match.")?;
                    }
                }
                "no" | "n" | "next" | "" => {
                    if !cursor.advance() {
                        writeln!(self.output, "\nNo more matches available.")?;
                        return Ok(Flow::Continue);
                    }
                }
                _ => {
                    writeln!(self.output, "Please answer yes, no, prev, save or menu.")?;
                }
            }
        }
    }

    fn save_answer(&mut self, title: &str) -> Result<()> {
        let slug = slugify(title);
        let answer = self
            .answers
            .load(&slug)
            .with_context(|| format!("Could not read answer for '{}'", title))?;
        match answer {
            Some(answer) => {
                let target = self.save_dir.join(&answer.filename);
                std::fs::write(&target, &answer.bytes)
                    .with_context(|| format!("Failed to save {}", target.display()))?;
                writeln!(self.output, "\nSaved answer to {}", target.display())?;
            }
            None => {
                writeln!(self.output, "\nAnswer file not found for '{}'.", title)?;
            }
        }
        Ok(())
    }

    /// Print a prompt and read one trimmed line; `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
