use anyhow::{Context, Result};
use colored::*;
use std::collections::HashSet;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Which of the two dictionary layers a word belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictKind {
    Generic,
    Project,
}

impl fmt::Display for DictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictKind::Generic => write!(f, "generic"),
            DictKind::Project => write!(f, "project"),
        }
    }
}

/// The layered custom vocabulary: a generic cross-project word list and a
/// project-specific one, unioned for lookup and appendable at runtime.
pub struct WordStore {
    generic: HashSet<String>,
    project: HashSet<String>,
    generic_path: PathBuf,
    project_path: PathBuf,
}

impl WordStore {
    /// Load both dictionary layers, generic first. A missing file is a
    /// warning, not an error; that layer simply starts empty.
    pub fn open(generic_path: &Path, project_path: &Path) -> Self {
        Self {
            generic: Self::load(generic_path),
            project: Self::load(project_path),
            generic_path: generic_path.to_path_buf(),
            project_path: project_path.to_path_buf(),
        }
    }

    /// Read one word per non-empty, non-comment (`#`) line, lowercased.
    pub fn load(path: &Path) -> HashSet<String> {
        let mut words = HashSet::new();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => {
                eprintln!(
                    "{} Dictionary not found: {}",
                    "Warning:".yellow(),
                    path.display()
                );
                return words;
            }
        };

        for line in content.lines() {
            let word = line.trim();
            if !word.is_empty() && !word.starts_with('#') {
                words.insert(word.to_lowercase());
            }
        }

        words
    }

    pub fn contains(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.generic.contains(&lower) || self.project.contains(&lower)
    }

    pub fn generic_len(&self) -> usize {
        self.generic.len()
    }

    pub fn project_len(&self) -> usize {
        self.project.len()
    }

    /// Append a word to one of the dictionary files and register it for
    /// immediate lookup. The leading newline guards against a hand-edited
    /// file that lacks a trailing one; the loader skips blank lines anyway.
    pub fn add(&mut self, word: &str, kind: DictKind) -> Result<()> {
        let lower = word.to_lowercase();
        let path = match kind {
            DictKind::Generic => &self.generic_path,
            DictKind::Project => &self.project_path,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create dictionary directory: {}", parent.display())
                })?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open dictionary: {}", path.display()))?;
        write!(file, "\n{}", lower)
            .with_context(|| format!("Failed to append to dictionary: {}", path.display()))?;

        match kind {
            DictKind::Generic => self.generic.insert(lower),
            DictKind::Project => self.project.insert(lower),
        };

        Ok(())
    }

    /// Words from either layer starting with `prefix`, sorted and deduped.
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut matches: Vec<String> = self
            .generic
            .iter()
            .chain(self.project.iter())
            .filter(|w| w.starts_with(prefix))
            .cloned()
            .collect();
        matches.sort();
        matches.dedup();
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &Path) -> WordStore {
        WordStore::open(&dir.join("generic.txt"), &dir.join("project.txt"))
    }

    #[test]
    fn test_load_skips_comments_and_blanks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("generic.txt");
        fs::write(&path, "# header\n\nKubernetes\n  rustc  \n# trailing\n").unwrap();

        let words = WordStore::load(&path);
        assert_eq!(words.len(), 2);
        assert!(words.contains("kubernetes"));
        assert!(words.contains("rustc"));
    }

    #[test]
    fn test_missing_file_yields_empty_set() {
        let dir = tempdir().unwrap();
        let words = WordStore::load(&dir.path().join("absent.txt"));
        assert!(words.is_empty());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("project.txt"), "grpc\n").unwrap();
        let store = store_in(dir.path());

        assert!(store.contains("grpc"));
        assert!(store.contains("GRPC"));
        assert!(store.contains("gRPC"));
    }

    #[test]
    fn test_add_persists_and_registers_immediately() {
        let dir = tempdir().unwrap();
        let mut store = store_in(dir.path());
        assert!(!store.contains("frobnicate"));

        store.add("Frobnicate", DictKind::Project).unwrap();
        assert!(store.contains("frobnicate"));

        let reloaded = WordStore::load(&dir.path().join("project.txt"));
        assert!(reloaded.contains("frobnicate"));
    }

    #[test]
    fn test_add_creates_missing_parent_dirs() {
        let dir = tempdir().unwrap();
        let generic = dir.path().join("data/dictionaries/generic.txt");
        let project = dir.path().join("data/dictionaries/project.txt");
        let mut store = WordStore::open(&generic, &project);

        store.add("sidecar", DictKind::Generic).unwrap();
        assert!(generic.exists());
    }

    #[test]
    fn test_prefix_search_spans_both_layers() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("generic.txt"), "grafana\n").unwrap();
        fs::write(dir.path().join("project.txt"), "granular\ngrep\n").unwrap();
        let store = store_in(dir.path());

        assert_eq!(
            store.words_with_prefix("gra"),
            vec!["grafana", "granular"]
        );
    }
}
