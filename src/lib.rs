pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;
pub mod fixer;
pub mod parser;
pub mod report;
pub mod scanner;

pub use checker::SpellChecker;
pub use config::Config;

use std::fmt;
use std::path::PathBuf;

/// Where a checked piece of text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    Filename,
    Docstring,
    DefinitionName,
    VariableName,
    Comment,
    TextContent,
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Context::Filename => "Filename",
            Context::Docstring => "Docstring",
            Context::DefinitionName => "Definition Name",
            Context::VariableName => "Variable Name",
            Context::Comment => "Comment",
            Context::TextContent => "Text Content",
        };
        write!(f, "{}", label)
    }
}

/// One occurrence of an unknown word at a specific file location.
///
/// `line` is 1-indexed; 0 marks the filename pseudo-location, which cannot
/// be fixed in place.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub word: String,
    pub file: PathBuf,
    pub line: usize,
    pub context: Context,
    pub line_content: String,
    pub suggestions: Vec<String>,
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} - '{}' (Context: {})",
            self.file.display(),
            self.line,
            self.word,
            self.context
        )
    }
}
