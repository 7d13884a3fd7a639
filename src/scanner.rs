use crate::checker::SpellChecker;
use crate::config::Config;
use crate::parser::{self, FileType};
use crate::ErrorRecord;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

fn is_ignored_dir(entry: &DirEntry, config: &Config) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| config.ignore_dirs.iter().any(|d| d == name))
            .unwrap_or(false)
}

/// Walk `root` and collect an error record for every unknown word in every
/// checkable file. Ignored directories are pruned whole; unreadable files
/// are reported and skipped while the walk keeps going. The walk is sorted
/// so repeated runs over an unchanged tree produce identical output.
pub fn scan(root: &Path, checker: &SpellChecker, config: &Config) -> Vec<ErrorRecord> {
    let mut records = Vec::new();

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_ignored_dir(e, config));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                pb.suspend(|| eprintln!("{} {}", "Warning:".yellow(), err));
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if let Some(name) = entry.file_name().to_str() {
            if config.is_ignored_file(name) {
                continue;
            }
        }
        if FileType::from_path(path).is_none() {
            continue;
        }

        pb.set_message(format!("Checking {}", path.display()));
        pb.tick();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                pb.suspend(|| {
                    eprintln!(
                        "{} Skipping {}: {}",
                        "Warning:".yellow(),
                        path.display(),
                        err
                    )
                });
                continue;
            }
        };

        for unit in parser::parse_file(path, &content) {
            records.extend(checker.check_text(
                &unit.text,
                path,
                unit.line,
                unit.context,
                &unit.line_content,
            ));
        }
    }

    pb.finish_and_clear();
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Context;
    use std::fs;
    use tempfile::tempdir;

    fn test_config(root: &Path) -> Config {
        Config {
            generic_dictionary: root.join("generic.txt"),
            project_dictionary: root.join("project.txt"),
            ..Config::default()
        }
    }

    fn test_checker(config: &Config) -> SpellChecker {
        SpellChecker::new(config).unwrap()
    }

    #[test]
    fn test_python_definition_name_reported() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("helpers.py"),
            "def mispeled_function(): pass\n",
        )
        .unwrap();

        let config = test_config(dir.path());
        let checker = test_checker(&config);
        let records = scan(dir.path(), &checker, &config);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].word, "mispeled");
        assert_eq!(records[0].context, Context::DefinitionName);
        assert_eq!(records[0].line, 1);
        assert!(!records[0].suggestions.is_empty());
    }

    #[test]
    fn test_markdown_fences_produce_no_records() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("guide.md"),
            "clean text here\n```\nwrold mispeled helllo\n```\n",
        )
        .unwrap();

        let config = test_config(dir.path());
        let checker = test_checker(&config);
        let records = scan(dir.path(), &checker, &config);

        assert!(records.is_empty(), "unexpected: {:?}", records);
    }

    #[test]
    fn test_ignored_directories_pruned() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("build")).unwrap();
        fs::write(dir.path().join("build/notes.txt"), "wrold\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "wrold\n").unwrap();

        let config = test_config(dir.path());
        let checker = test_checker(&config);
        let records = scan(dir.path(), &checker, &config);

        assert_eq!(records.len(), 1);
        assert!(records[0].file.ends_with("notes.txt"));
        assert!(!records[0].file.starts_with(dir.path().join("build")));
    }

    #[test]
    fn test_report_file_not_scanned() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("spelling_errors.txt"), "wrold wrold\n").unwrap();

        let config = test_config(dir.path());
        let checker = test_checker(&config);
        let records = scan(dir.path(), &checker, &config);

        assert!(records.is_empty());
    }

    #[test]
    fn test_unknown_extensions_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("blob.bin"), "wrold\n").unwrap();
        fs::write(dir.path().join("data.json"), "{\"wrold\": 1}\n").unwrap();

        let config = test_config(dir.path());
        let checker = test_checker(&config);
        let records = scan(dir.path(), &checker, &config);

        assert!(records.is_empty());
    }

    #[test]
    fn test_misspelled_filename_reported_at_line_zero() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("mispeled_notes.txt"), "hello world\n").unwrap();

        let config = test_config(dir.path());
        let checker = test_checker(&config);
        let records = scan(dir.path(), &checker, &config);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].word, "mispeled");
        assert_eq!(records[0].context, Context::Filename);
        assert_eq!(records[0].line, 0);
    }

    #[test]
    fn test_scan_order_is_stable() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bravo.txt"), "wrold\n").unwrap();
        fs::write(dir.path().join("alpha.txt"), "helllo\n").unwrap();

        let config = test_config(dir.path());
        let checker = test_checker(&config);
        let first = scan(dir.path(), &checker, &config);
        let second = scan(dir.path(), &checker, &config);

        let words = |records: &[ErrorRecord]| -> Vec<String> {
            records.iter().map(|r| r.word.clone()).collect()
        };
        assert_eq!(words(&first), vec!["helllo", "wrold"]);
        assert_eq!(words(&first), words(&second));
    }
}
