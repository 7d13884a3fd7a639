pub mod lexicon;
pub mod suggestions;
pub mod tokenizer;

use crate::config::Config;
use crate::dict::store::{DictKind, WordStore};
use crate::{Context, ErrorRecord};
use anyhow::Result;
use lazy_static::lazy_static;
use lexicon::Lexicon;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

lazy_static! {
    // Hash-like tokens (hex digits only) are never worth flagging.
    static ref HEX_WORD: Regex = Regex::new(r"^[a-f0-9]+$").unwrap();
}

/// The spelling engine: the base lexicon plus the layered custom
/// dictionaries. One value is built per run and threaded through scanning
/// and fixing; words promoted during an interactive session are visible to
/// every later classification in the same process.
pub struct SpellChecker {
    lexicon: Lexicon,
    store: WordStore,
    max_suggestions: usize,
}

/// Classification verdict for a single candidate word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Known,
    Unknown { suggestions: Vec<String> },
}

impl SpellChecker {
    pub fn new(config: &Config) -> Result<Self> {
        let lexicon = Lexicon::embedded()?;
        let store = WordStore::open(&config.generic_dictionary, &config.project_dictionary);

        Ok(Self {
            lexicon,
            store,
            max_suggestions: config.max_suggestions,
        })
    }

    /// Assemble a checker from explicit parts.
    pub fn with_parts(lexicon: Lexicon, store: WordStore, max_suggestions: usize) -> Self {
        Self {
            lexicon,
            store,
            max_suggestions,
        }
    }

    pub fn is_known(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.store.contains(&lower) || self.lexicon.contains(&lower) || HEX_WORD.is_match(&lower)
    }

    pub fn classify(&self, word: &str) -> Verdict {
        if self.is_known(word) {
            return Verdict::Known;
        }
        let suggestions = suggestions::generate(
            &word.to_lowercase(),
            &self.lexicon,
            &self.store,
            self.max_suggestions,
        );
        Verdict::Unknown { suggestions }
    }

    /// Run one unit of text through extraction and classification, producing
    /// an error record per distinct unknown word. Duplicates within the unit
    /// collapse to the first occurrence so a repeated typo in one docstring
    /// is reported once.
    pub fn check_text(
        &self,
        text: &str,
        file: &Path,
        line: usize,
        context: Context,
        line_content: &str,
    ) -> Vec<ErrorRecord> {
        let mut records = Vec::new();
        let mut seen = HashSet::new();

        for word in tokenizer::extract_words(text) {
            if !seen.insert(word.to_lowercase()) {
                continue;
            }
            if let Verdict::Unknown { suggestions } = self.classify(&word) {
                records.push(ErrorRecord {
                    word,
                    file: file.to_path_buf(),
                    line,
                    context,
                    line_content: line_content.to_string(),
                    suggestions,
                });
            }
        }

        records
    }

    /// Promote a word into one of the dictionary layers.
    pub fn add_word(&mut self, word: &str, kind: DictKind) -> Result<()> {
        self.store.add(word, kind)
    }

    pub fn store(&self) -> &WordStore {
        &self.store
    }
}
