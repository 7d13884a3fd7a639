use crate::checker::lexicon::Lexicon;
use crate::dict::store::WordStore;

/// Generate ranked spelling suggestions for a lowercase word, drawing
/// candidates from the base lexicon and both custom dictionary layers.
///
/// Candidate pools are sorted lexicographically before the (stable) sort by
/// edit distance, so the ranking is deterministic for a fixed dictionary
/// state. Progressively cheaper strategies run first.
pub fn generate(
    word: &str,
    lexicon: &Lexicon,
    store: &WordStore,
    max_suggestions: usize,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    // 1. Three-character prefix matching, tight distance bound
    let prefix: String = word.chars().take(3).collect();
    if prefix.chars().count() == 3 {
        let mut matches = candidates_with_prefix(&prefix, lexicon, store);
        matches.sort_by_key(|w| edit_distance(word, w));

        for candidate in matches {
            if edit_distance(word, &candidate) <= 2 && !suggestions.contains(&candidate) {
                suggestions.push(candidate);
                if suggestions.len() >= max_suggestions {
                    return suggestions;
                }
            }
        }
    }

    // 2. Single-edit transformations checked directly against the vocabulary
    for transform in generate_transformations(word) {
        if (lexicon.contains(&transform) || store.contains(&transform))
            && !suggestions.contains(&transform)
        {
            suggestions.push(transform);
            if suggestions.len() >= max_suggestions {
                return suggestions;
            }
        }
    }

    // 3. Two-character prefix, looser distance bound
    let prefix: String = word.chars().take(2).collect();
    if prefix.chars().count() == 2 {
        let mut matches = candidates_with_prefix(&prefix, lexicon, store);
        matches.sort_by_key(|w| edit_distance(word, w));

        for candidate in matches {
            if edit_distance(word, &candidate) <= 3 && !suggestions.contains(&candidate) {
                suggestions.push(candidate);
                if suggestions.len() >= max_suggestions {
                    return suggestions;
                }
            }
        }
    }

    suggestions.truncate(max_suggestions);
    suggestions
}

fn candidates_with_prefix(prefix: &str, lexicon: &Lexicon, store: &WordStore) -> Vec<String> {
    let mut candidates = lexicon.words_with_prefix(prefix);
    candidates.extend(store.words_with_prefix(prefix));
    candidates.sort();
    candidates.dedup();
    candidates
}

/// Levenshtein distance over chars, two-row rolling table.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            current[j + 1] = (prev[j + 1] + 1)
                .min(current[j] + 1)
                .min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut current);
    }

    prev[b_chars.len()]
}

/// Common one-step corruptions of a word: deletions, adjacent
/// transpositions, and a small table of frequent letter confusions.
fn generate_transformations(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut transformations = Vec::new();

    for i in 0..chars.len() {
        let mut candidate = chars.clone();
        candidate.remove(i);
        transformations.push(candidate.iter().collect());
    }

    for i in 0..chars.len().saturating_sub(1) {
        let mut candidate = chars.clone();
        candidate.swap(i, i + 1);
        transformations.push(candidate.iter().collect());
    }

    const CONFUSIONS: [(char, char); 11] = [
        ('a', 'e'),
        ('e', 'i'),
        ('i', 'o'),
        ('o', 'u'),
        ('b', 'v'),
        ('c', 'k'),
        ('f', 'v'),
        ('g', 'j'),
        ('m', 'n'),
        ('s', 'z'),
        ('t', 'd'),
    ];

    for (i, &ch) in chars.iter().enumerate() {
        for &(from, to) in &CONFUSIONS {
            if ch == from {
                let mut candidate = chars.clone();
                candidate[i] = to;
                transformations.push(candidate.iter().collect());
            }
        }
    }

    transformations
}
