pub mod markdown;
pub mod plaintext;
pub mod python;

use crate::Context;
use std::path::Path;

/// File classes the scanner knows how to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Python,
    Markdown,
    PlainText,
}

impl FileType {
    /// Detect a checkable file type from the extension, if any.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "py" | "pyw" => Some(FileType::Python),
            "md" | "markdown" => Some(FileType::Markdown),
            "txt" => Some(FileType::PlainText),
            _ => None,
        }
    }
}

/// One checkable unit of text together with where it came from.
#[derive(Debug, Clone)]
pub struct TextUnit {
    pub text: String,
    pub line: usize,
    pub context: Context,
    pub line_content: String,
}

/// Extract every checkable unit from a file: the filename stem first (line 0,
/// the pseudo-location), then whatever the file-type parser finds in the
/// content. Unrecognized extensions produce nothing.
pub fn parse_file(path: &Path, content: &str) -> Vec<TextUnit> {
    let file_type = match FileType::from_path(path) {
        Some(file_type) => file_type,
        None => return Vec::new(),
    };

    let mut units = Vec::new();
    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
        units.push(TextUnit {
            text: stem.to_string(),
            line: 0,
            context: Context::Filename,
            line_content: String::new(),
        });
    }

    match file_type {
        FileType::Python => python::parse(content, &mut units),
        FileType::Markdown => markdown::parse(content, &mut units),
        FileType::PlainText => plaintext::parse(content, &mut units),
    }

    units
}
