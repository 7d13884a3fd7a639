use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Letters (ASCII or the Latin-1 accented range) and whitespace survive;
    // everything else becomes a word boundary.
    static ref NON_LETTER: Regex =
        Regex::new(r"[^a-zA-Z\u{00C0}-\u{00FF}\s]").unwrap();
}

/// Split camelCase text at lowercase-to-uppercase boundaries, keeping the
/// original casing of each part.
pub fn split_camel_case(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for ch in text.chars() {
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Split snake_case or kebab-case text into its components.
pub fn split_snake_case(text: &str) -> Vec<String> {
    text.split(|c| c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract candidate words from arbitrary text.
///
/// Punctuation, digits and symbols are treated as word boundaries, compound
/// identifiers are split into their natural-language parts, and anything two
/// characters or shorter is dropped. Emission order follows the input text;
/// repeated words are not collapsed here.
pub fn extract_words(text: &str) -> Vec<String> {
    let clean = NON_LETTER.replace_all(text, " ");
    let mut words = Vec::new();
    for token in clean.split_whitespace() {
        if token.contains('_') || token.contains('-') {
            words.extend(split_snake_case(token));
        } else if token.chars().any(char::is_uppercase)
            && token.chars().any(char::is_lowercase)
        {
            words.extend(split_camel_case(token));
        } else {
            words.push(token.to_string());
        }
    }
    words.retain(|w| w.chars().count() > 2);
    words
}
