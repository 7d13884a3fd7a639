use crate::parser::TextUnit;
use crate::Context;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref INLINE_CODE: Regex = Regex::new(r"`[^`]+`").unwrap();
}

/// Markdown is checked line by line: fenced code blocks are skipped
/// entirely (including the fence lines) and inline code spans are stripped
/// before the rest of the line is checked.
pub fn parse(content: &str, units: &mut Vec<TextUnit>) {
    let mut in_code_block = false;

    for (idx, line) in content.lines().enumerate() {
        if line.trim_start().starts_with("```") {
            in_code_block = !in_code_block;
            continue;
        }
        if in_code_block {
            continue;
        }

        let checked = if line.contains('`') {
            INLINE_CODE.replace_all(line, "").into_owned()
        } else {
            line.to_string()
        };

        units.push(TextUnit {
            text: checked,
            line: idx + 1,
            context: Context::TextContent,
            line_content: line.trim_end().to_string(),
        });
    }
}
