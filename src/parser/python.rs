use crate::parser::TextUnit;
use crate::Context;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DEF: Regex =
        Regex::new(r"^\s*(?:async\s+)?def\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap();
    static ref CLASS: Regex = Regex::new(r"^\s*class\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap();
    static ref ASSIGN: Regex =
        Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*=(?:[^=]|$)").unwrap();
    static ref DOCSTRING_OPEN: Regex =
        Regex::new(r#"^\s*[rRbBuUfF]{0,2}("{3}|'{3})"#).unwrap();
}

/// Line-oriented structural scan of a Python file.
///
/// Two passes, mirroring how the pipeline treats source files: a structural
/// pass for docstrings, definition names and simple assignment targets, then
/// an independent comment pass. Both are tolerant by construction; malformed
/// source yields fewer units, never an error.
pub fn parse(content: &str, units: &mut Vec<TextUnit>) {
    let lines: Vec<&str> = content.lines().collect();
    structural_pass(&lines, units);
    comment_pass(&lines, units);
}

fn get_line(lines: &[&str], n: usize) -> String {
    if n >= 1 && n <= lines.len() {
        lines[n - 1].to_string()
    } else {
        String::new()
    }
}

fn structural_pass(lines: &[&str], units: &mut Vec<TextUnit>) {
    // Anchor line of a docstring we may be about to see: the module start,
    // or the most recent def/class header. Docstrings are reported at the
    // anchor, matching where the definition itself lives.
    let mut awaiting_doc: Option<usize> = Some(1);
    let mut in_string: Option<char> = None;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let lineno = i + 1;

        if in_string.is_some() {
            in_string = scan_triple_quotes(line, in_string);
            i += 1;
            continue;
        }

        if let Some(anchor) = awaiting_doc {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                i += 1;
                continue;
            }
            if let Some(caps) = DOCSTRING_OPEN.captures(line) {
                let delim = caps.get(1).map(|m| m.as_str()).unwrap_or("\"\"\"");
                let (text, next) = capture_docstring(lines, i, delim);
                units.push(TextUnit {
                    text,
                    line: anchor,
                    context: Context::Docstring,
                    line_content: get_line(lines, anchor),
                });
                awaiting_doc = None;
                i = next;
                continue;
            }
            awaiting_doc = None;
        }

        if let Some(caps) = DEF.captures(line).or_else(|| CLASS.captures(line)) {
            units.push(TextUnit {
                text: caps[1].to_string(),
                line: lineno,
                context: Context::DefinitionName,
                line_content: line.to_string(),
            });
            // The first statement of the body may be a docstring.
            if line.trim_end().ends_with(':') {
                awaiting_doc = Some(lineno);
            }
        } else if let Some(caps) = ASSIGN.captures(line) {
            units.push(TextUnit {
                text: caps[1].to_string(),
                line: lineno,
                context: Context::VariableName,
                line_content: line.to_string(),
            });
        }

        in_string = scan_triple_quotes(line, None);
        i += 1;
    }
}

fn comment_pass(lines: &[&str], units: &mut Vec<TextUnit>) {
    let mut in_string: Option<char> = None;

    for (idx, line) in lines.iter().enumerate() {
        let was_in_string = in_string.is_some();
        in_string = scan_triple_quotes(line, in_string);
        if was_in_string {
            continue;
        }

        if let Some(pos) = line.find('#') {
            // A '#' after an odd number of quotes sits inside a string.
            let before = &line[..pos];
            let quotes = before.matches('"').count() + before.matches('\'').count();
            if quotes % 2 != 0 {
                continue;
            }
            units.push(TextUnit {
                text: line[pos + 1..].to_string(),
                line: idx + 1,
                context: Context::Comment,
                line_content: (*line).to_string(),
            });
        }
    }
}

/// Track whether a triple-quoted string remains open after this line.
/// `open` holds the quote character of the active delimiter, if any.
fn scan_triple_quotes(line: &str, mut open: Option<char>) -> Option<char> {
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i + 3 <= chars.len() {
        let q = chars[i];
        if (q == '"' || q == '\'') && chars[i + 1] == q && chars[i + 2] == q {
            open = match open {
                None => Some(q),
                Some(o) if o == q => None,
                other => other,
            };
            i += 3;
        } else {
            i += 1;
        }
    }

    open
}

/// Collect docstring text starting at `start`, the index of the line holding
/// the opening delimiter. Returns the text between the delimiters and the
/// index of the first line after the closing one.
fn capture_docstring(lines: &[&str], start: usize, delim: &str) -> (String, usize) {
    let line = lines[start];
    let open_at = line.find(delim).map(|p| p + delim.len()).unwrap_or(0);
    let rest = &line[open_at..];

    if let Some(close) = rest.find(delim) {
        return (rest[..close].to_string(), start + 1);
    }

    let mut text = vec![rest.to_string()];
    for (offset, continuation) in lines[start + 1..].iter().enumerate() {
        if let Some(close) = continuation.find(delim) {
            text.push(continuation[..close].to_string());
            return (text.join("\n"), start + offset + 2);
        }
        text.push((*continuation).to_string());
    }

    (text.join("\n"), lines.len())
}
