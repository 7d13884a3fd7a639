use anyhow::{Context, Result};
use fst::{Automaton, IntoStreamer, Set, Streamer};

const WORDLIST: &str = include_str!("wordlist.txt");

/// The checker's base vocabulary: common English plus programming terms,
/// compiled into an FST set once at startup. Entries are lowercase and
/// lookup is byte-exact, so callers lowercase before querying.
pub struct Lexicon {
    set: Set<Vec<u8>>,
}

impl Lexicon {
    /// Build the lexicon from the embedded wordlist.
    pub fn embedded() -> Result<Self> {
        Self::from_words(WORDLIST.lines())
    }

    /// Build a lexicon from an arbitrary word iterator.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty() && !w.starts_with('#'))
            .collect();
        entries.sort();
        entries.dedup();

        let set = Set::from_iter(entries).context("Failed to build base lexicon")?;
        Ok(Self { set })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word.as_bytes())
    }

    /// All lexicon entries starting with `prefix`, in lexicographic order.
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut results = Vec::new();
        let mut stream = self
            .set
            .search(fst::automaton::Str::new(prefix).starts_with())
            .into_stream();

        while let Some(key) = stream.next() {
            if let Ok(word) = String::from_utf8(key.to_vec()) {
                results.push(word);
            }
        }

        results
    }
}
