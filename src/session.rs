// 💬 Interactive Session - one input/output pair for the whole run
//
// Created by the orchestrator at start, dropped at the end. Every component
// that needs the user gets `&mut Session`.

use crate::classifier::FilenameClassifier;
use crate::discovery::{self, Candidate, Selection};
use crate::error::MergeResult;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

pub struct Session<R: BufRead, W: Write> {
    input: R,
    output: W,
    /// Answer every prompt with its default
    assume_yes: bool,
}

impl Session<io::StdinLock<'static>, io::Stdout> {
    /// Session bound to the process terminal
    pub fn terminal(assume_yes: bool) -> Self {
        Session::new(io::stdin().lock(), io::stdout(), assume_yes)
    }
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, assume_yes: bool) -> Self {
        Session {
            input,
            output,
            assume_yes,
        }
    }

    /// Writer for reports
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    /// Print `message` and read one trimmed line (None at end of input)
    pub fn prompt(&mut self, message: &str) -> MergeResult<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Yes/no question; empty answer or end of input → `default`
    pub fn confirm(&mut self, message: &str, default: bool) -> MergeResult<bool> {
        if self.assume_yes {
            return Ok(default);
        }

        let hint = if default { "(Y/n)" } else { "(y/N)" };
        let answer = self.prompt(&format!("{message} {hint}: "))?;
        Ok(match answer.as_deref().map(str::to_lowercase).as_deref() {
            None | Some("") => default,
            Some("y" | "yes" | "s" | "si" | "sí") => true,
            Some(_) => false,
        })
    }

    /// Use `default` if it holds candidates and the user agrees; otherwise
    /// ask until a usable directory is given. None if input runs out.
    pub fn choose_directory(
        &mut self,
        default: &Path,
        classifier: &FilenameClassifier,
    ) -> MergeResult<Option<PathBuf>> {
        if discovery::has_candidates(default, classifier) {
            writeln!(self.output, "📂 Directory found: {}", default.display())?;
            if self.confirm("Use this directory?", true)? {
                return Ok(Some(default.to_path_buf()));
            }
        } else if self.assume_yes {
            return Ok(Some(default.to_path_buf()));
        }

        loop {
            let Some(entered) = self.prompt("Path of the directory with CSV fragments: ")? else {
                return Ok(None);
            };
            if entered.is_empty() {
                writeln!(self.output, "❌ The path cannot be empty.")?;
                continue;
            }

            let candidate = PathBuf::from(entered);
            if discovery::has_candidates(&candidate, classifier) {
                writeln!(self.output, "✓ Directory: {}", candidate.display())?;
                return Ok(Some(candidate));
            }
            writeln!(
                self.output,
                "❌ {} does not exist or holds no CSV files.",
                candidate.display()
            )?;
        }
    }

    /// Show the candidates and let the user pick some. Empty = cancelled.
    pub fn choose_files(&mut self, candidates: &[Candidate]) -> MergeResult<Vec<PathBuf>> {
        if candidates.is_empty() {
            writeln!(self.output, "No CSV files found in the directory.")?;
            return Ok(Vec::new());
        }

        crate::report::print_candidates(&mut self.output, candidates)?;
        let paths: Vec<PathBuf> = candidates.iter().map(|c| c.path.clone()).collect();

        if self.assume_yes {
            return Ok(paths);
        }
        if !self.confirm("Process these files?", true)? {
            writeln!(self.output, "Cancelled.")?;
            return Ok(Vec::new());
        }

        writeln!(self.output, "Enter = all files | 1,3,5 = specific files | 1-5 = range")?;
        loop {
            let Some(input) = self.prompt("Selection: ")? else {
                return Ok(Vec::new());
            };
            match Selection::parse(&input, paths.len()) {
                Ok(selection) => {
                    let chosen = selection.apply(&paths);
                    writeln!(self.output, "✓ {} file(s) selected", chosen.len())?;
                    return Ok(chosen);
                }
                Err(msg) => writeln!(self.output, "❌ Invalid selection: {msg}")?,
            }
        }
    }

    /// Output path under `root`; `.csv` appended if missing
    pub fn choose_output(&mut self, root: &Path, default: &str) -> MergeResult<PathBuf> {
        let entered = if self.assume_yes {
            None
        } else {
            self.prompt(&format!("Output file name (Enter for '{default}'): "))?
        };

        let mut name = entered
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| default.to_string());
        if !name.to_lowercase().ends_with(".csv") {
            name.push_str(".csv");
        }

        let path = root.join(name);
        if path.exists() {
            warn!(file = %path.display(), "output file exists and will be overwritten");
            writeln!(self.output, "⚠️  {} exists and will be overwritten.", path.display())?;
        }
        Ok(path)
    }
}

// ============================================================================
// TESTS
// ============================================================================
