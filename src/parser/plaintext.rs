use crate::parser::TextUnit;
use crate::Context;

/// Plain text is checked verbatim, line by line.
pub fn parse(content: &str, units: &mut Vec<TextUnit>) {
    for (idx, line) in content.lines().enumerate() {
        units.push(TextUnit {
            text: line.to_string(),
            line: idx + 1,
            context: Context::TextContent,
            line_content: line.trim_end().to_string(),
        });
    }
}
