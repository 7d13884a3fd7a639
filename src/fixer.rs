use crate::checker::SpellChecker;
use crate::dict::store::DictKind;
use crate::ErrorRecord;
use anyhow::Result;
use colored::*;
use regex::{NoExpand, RegexBuilder};
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;
use thiserror::Error;

/// Ways a single in-place fix can fail. None of these end the session;
/// the record is simply left unresolved.
#[derive(Debug, Error)]
pub enum FixError {
    #[error("filenames cannot be fixed in place; rename the file manually")]
    FilenameTarget,
    #[error("line {line} is out of range ({line_count} lines)")]
    LineOutOfRange { line: usize, line_count: usize },
    #[error("invalid replacement pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Replace the first case-insensitive occurrence of `old_word` on one line
/// of `file`, leaving every other byte untouched. The rewrite goes through
/// a temporary file and an atomic rename so an interrupted fix cannot leave
/// a half-written file behind.
pub fn apply_fix(file: &Path, old_word: &str, new_word: &str, line: usize) -> Result<(), FixError> {
    if line == 0 {
        return Err(FixError::FilenameTarget);
    }

    let content = fs::read_to_string(file)?;
    let mut lines: Vec<String> = content.split_inclusive('\n').map(str::to_string).collect();
    if line > lines.len() {
        return Err(FixError::LineOutOfRange {
            line,
            line_count: lines.len(),
        });
    }

    let pattern = RegexBuilder::new(&regex::escape(old_word))
        .case_insensitive(true)
        .build()?;
    let fixed = pattern
        .replacen(&lines[line - 1], 1, NoExpand(new_word))
        .into_owned();
    lines[line - 1] = fixed;

    let tmp = file.with_extension("spellint.tmp");
    fs::write(&tmp, lines.concat())?;
    fs::rename(&tmp, file)?;
    Ok(())
}

/// Counters for one interactive fix session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub fixed: usize,
    pub skipped: usize,
    pub added_to_dict: usize,
    pub quit: bool,
}

impl SessionStats {
    /// Records neither fixed, skipped nor promoted out of `total`.
    pub fn remaining(&self, total: usize) -> usize {
        total
            .saturating_sub(self.fixed)
            .saturating_sub(self.skipped)
            .saturating_sub(self.added_to_dict)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Suggestion(usize),
    Manual,
    Generic,
    Project,
    Skip,
    Quit,
}

fn parse_choice(input: &str, suggestion_count: usize) -> Option<Choice> {
    match input {
        "m" => Some(Choice::Manual),
        "g" => Some(Choice::Generic),
        "p" => Some(Choice::Project),
        "s" => Some(Choice::Skip),
        "q" => Some(Choice::Quit),
        other => match other.parse::<usize>() {
            Ok(n) if n >= 1 && n <= suggestion_count => Some(Choice::Suggestion(n - 1)),
            _ => None,
        },
    }
}

/// Turn-based review of error records: present one record, await a valid
/// choice (re-prompting on invalid input), resolve it, move to the next.
/// Input and output are injected so the loop can be driven by a scripted
/// reader in tests.
pub struct InteractiveSession<'a, R, W> {
    checker: &'a mut SpellChecker,
    input: R,
    out: W,
    colored: bool,
}

impl<'a, R: BufRead, W: Write> InteractiveSession<'a, R, W> {
    pub fn new(checker: &'a mut SpellChecker, input: R, out: W, colored: bool) -> Self {
        Self {
            checker,
            input,
            out,
            colored,
        }
    }

    /// Review every record in order until the list is exhausted or the user
    /// quits. Returns the accumulated statistics.
    pub fn run(&mut self, records: &[ErrorRecord]) -> Result<SessionStats> {
        let mut stats = SessionStats::default();
        self.print_banner(records.len())?;

        for (i, record) in records.iter().enumerate() {
            if stats.quit {
                break;
            }
            self.present(record, i, records.len())?;
            self.resolve(record, &mut stats)?;
        }

        Ok(stats)
    }

    fn print_banner(&mut self, total: usize) -> Result<()> {
        let rule = "=".repeat(60);
        let title = if self.colored {
            "INTERACTIVE FIX MODE".bold().to_string()
        } else {
            "INTERACTIVE FIX MODE".to_string()
        };

        writeln!(self.out, "\n{}", rule)?;
        writeln!(self.out, "{}", title)?;
        writeln!(self.out, "{}", rule)?;
        writeln!(
            self.out,
            "\n{} errors to review. For each one, choose an action:",
            total
        )?;
        writeln!(self.out, "  [1-5] Apply suggested fix")?;
        writeln!(self.out, "  [m]   Enter manual correction")?;
        writeln!(self.out, "  [g]   Add to generic dictionary (cross-project term)")?;
        writeln!(self.out, "  [p]   Add to project dictionary (project-specific term)")?;
        writeln!(self.out, "  [s]   Skip this error")?;
        writeln!(self.out, "  [q]   Quit interactive mode")?;
        writeln!(self.out, "{}", rule)?;
        Ok(())
    }

    fn present(&mut self, record: &ErrorRecord, index: usize, total: usize) -> Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "[{}/{}] {}:{}",
            index + 1,
            total,
            record.file.display(),
            record.line
        )?;
        writeln!(self.out, "  Context: {}", record.context)?;

        if !record.line_content.is_empty() {
            let shown = if self.colored {
                record
                    .line_content
                    .replace(&record.word, &record.word.red().bold().to_string())
            } else {
                record.line_content.clone()
            };
            writeln!(self.out, "  Line: {}", shown)?;
        }

        let word = if self.colored {
            record.word.yellow().bold().to_string()
        } else {
            record.word.clone()
        };
        writeln!(self.out, "\n  Misspelled: '{}'", word)?;

        if record.suggestions.is_empty() {
            writeln!(self.out, "  No suggestions available")?;
        } else {
            writeln!(self.out, "  Suggestions:")?;
            for (j, suggestion) in record.suggestions.iter().enumerate() {
                let shown = if self.colored {
                    suggestion.green().to_string()
                } else {
                    suggestion.clone()
                };
                writeln!(self.out, "    [{}] {}", j + 1, shown)?;
            }
        }

        Ok(())
    }

    fn resolve(&mut self, record: &ErrorRecord, stats: &mut SessionStats) -> Result<()> {
        loop {
            write!(self.out, "\n  Action [1-5/m/g/p/s/q]: ")?;
            self.out.flush()?;

            let choice = match self.read_line()? {
                Some(line) => line.trim().to_lowercase(),
                // EOF on the input behaves like an explicit quit.
                None => {
                    stats.quit = true;
                    return Ok(());
                }
            };

            match parse_choice(&choice, record.suggestions.len()) {
                Some(Choice::Quit) => {
                    stats.quit = true;
                    writeln!(self.out, "\n  Quitting interactive mode...")?;
                    return Ok(());
                }
                Some(Choice::Skip) => {
                    stats.skipped += 1;
                    writeln!(self.out, "  Skipped.")?;
                    return Ok(());
                }
                Some(Choice::Generic) => {
                    self.promote(record, DictKind::Generic, stats)?;
                    return Ok(());
                }
                Some(Choice::Project) => {
                    self.promote(record, DictKind::Project, stats)?;
                    return Ok(());
                }
                Some(Choice::Suggestion(idx)) => {
                    let replacement = record.suggestions[idx].clone();
                    self.fix(record, &replacement, stats)?;
                    return Ok(());
                }
                Some(Choice::Manual) => {
                    write!(self.out, "  Enter correction: ")?;
                    self.out.flush()?;
                    let correction = self
                        .read_line()?
                        .unwrap_or_default()
                        .trim()
                        .to_string();
                    if correction.is_empty() {
                        writeln!(self.out, "  No correction entered.")?;
                        continue;
                    }
                    self.fix(record, &correction, stats)?;
                    return Ok(());
                }
                None => {
                    writeln!(self.out, "  Invalid choice. Please try again.")?;
                }
            }
        }
    }

    fn promote(
        &mut self,
        record: &ErrorRecord,
        kind: DictKind,
        stats: &mut SessionStats,
    ) -> Result<()> {
        match self.checker.add_word(&record.word, kind) {
            Ok(()) => {
                stats.added_to_dict += 1;
                writeln!(
                    self.out,
                    "  Added '{}' to the {} dictionary.",
                    record.word, kind
                )?;
            }
            Err(err) => {
                writeln!(self.out, "  Could not add '{}': {}", record.word, err)?;
            }
        }
        Ok(())
    }

    fn fix(&mut self, record: &ErrorRecord, replacement: &str, stats: &mut SessionStats) -> Result<()> {
        match apply_fix(&record.file, &record.word, replacement, record.line) {
            Ok(()) => {
                stats.fixed += 1;
                writeln!(self.out, "  Fixed: '{}' -> '{}'", record.word, replacement)?;
            }
            Err(err) => {
                writeln!(self.out, "  Could not fix: {}", err)?;
            }
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            Ok(None)
        } else {
            Ok(Some(line))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::lexicon::Lexicon;
    use crate::dict::store::WordStore;
    use crate::Context;
    use std::io::Cursor;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn record(word: &str, file: PathBuf, line: usize, suggestions: &[&str]) -> ErrorRecord {
        ErrorRecord {
            word: word.to_string(),
            file,
            line,
            context: Context::TextContent,
            line_content: String::new(),
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn test_checker(dir: &Path) -> SpellChecker {
        let lexicon = Lexicon::from_words(["hello", "world"]).unwrap();
        let store = WordStore::open(&dir.join("generic.txt"), &dir.join("project.txt"));
        SpellChecker::with_parts(lexicon, store, 5)
    }

    fn run_session(
        checker: &mut SpellChecker,
        records: &[ErrorRecord],
        script: &str,
    ) -> SessionStats {
        let input = Cursor::new(script.to_string());
        let mut out = Vec::new();
        InteractiveSession::new(checker, input, &mut out, false)
            .run(records)
            .unwrap()
    }

    #[test]
    fn test_fix_filename_target_fails_and_leaves_file_alone() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "wrold one\n").unwrap();

        let result = apply_fix(&file, "wrold", "world", 0);
        assert!(matches!(result, Err(FixError::FilenameTarget)));
        assert_eq!(fs::read_to_string(&file).unwrap(), "wrold one\n");
    }

    #[test]
    fn test_fix_out_of_range_line_fails() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "only line\n").unwrap();

        let result = apply_fix(&file, "only", "single", 9);
        assert!(matches!(
            result,
            Err(FixError::LineOutOfRange { line: 9, line_count: 1 })
        ));
        assert_eq!(fs::read_to_string(&file).unwrap(), "only line\n");
    }

    #[test]
    fn test_fix_replaces_first_occurrence_case_insensitively() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "keep this\nWrold then wrold again\nkeep that\n").unwrap();

        apply_fix(&file, "wrold", "world", 2).unwrap();
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "keep this\nworld then wrold again\nkeep that\n"
        );
    }

    #[test]
    fn test_fix_preserves_missing_trailing_newline() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "first\nlast wrold").unwrap();

        apply_fix(&file, "wrold", "world", 2).unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "first\nlast world");
    }

    #[test]
    fn test_skip_and_quit_counts() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "wrold helllo mispeled extra lines\n").unwrap();

        let records: Vec<ErrorRecord> = ["wrold", "helllo", "mispeled", "extraa", "linex"]
            .iter()
            .map(|w| record(w, file.clone(), 1, &[]))
            .collect();

        let mut checker = test_checker(dir.path());
        let stats = run_session(&mut checker, &records, "s\ns\nq\n");

        assert_eq!(stats.skipped, 2);
        assert_eq!(stats.fixed, 0);
        assert!(stats.quit);
        assert_eq!(stats.remaining(records.len()), 3);
        // Untouched records leave the file exactly as it was.
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "wrold helllo mispeled extra lines\n"
        );
    }

    #[test]
    fn test_promotion_registers_word_for_later_classification() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "frobnicate\n").unwrap();

        let mut checker = test_checker(dir.path());
        assert!(!checker.is_known("frobnicate"));

        let records = vec![record("frobnicate", file, 1, &[])];
        let stats = run_session(&mut checker, &records, "g\n");

        assert_eq!(stats.added_to_dict, 1);
        assert!(checker.is_known("frobnicate"));
        // Persisted to the generic layer as well.
        let reloaded = WordStore::load(&dir.path().join("generic.txt"));
        assert!(reloaded.contains("frobnicate"));
    }

    #[test]
    fn test_numeric_choice_applies_suggestion() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "a wrold apart\n").unwrap();

        let mut checker = test_checker(dir.path());
        let records = vec![record("wrold", file.clone(), 1, &["world", "would"])];
        let stats = run_session(&mut checker, &records, "1\n");

        assert_eq!(stats.fixed, 1);
        assert_eq!(fs::read_to_string(&file).unwrap(), "a world apart\n");
    }

    #[test]
    fn test_invalid_then_manual_correction() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "a wrold apart\n").unwrap();

        let mut checker = test_checker(dir.path());
        let records = vec![record("wrold", file.clone(), 1, &["would"])];
        // "9" is out of range, "m" with empty input re-prompts, then a real fix.
        let stats = run_session(&mut checker, &records, "9\nm\n\nm\nworld\n");

        assert_eq!(stats.fixed, 1);
        assert_eq!(fs::read_to_string(&file).unwrap(), "a world apart\n");
    }

    #[test]
    fn test_failed_fix_leaves_record_unresolved() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "one line only\n").unwrap();

        let mut checker = test_checker(dir.path());
        // The file shrank since scanning: line 7 no longer exists.
        let records = vec![record("wrold", file.clone(), 7, &["world"])];
        let stats = run_session(&mut checker, &records, "1\n");

        assert_eq!(stats.fixed, 0);
        assert_eq!(stats.remaining(1), 1);
        assert_eq!(fs::read_to_string(&file).unwrap(), "one line only\n");
    }
}
