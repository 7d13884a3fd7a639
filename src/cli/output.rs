use crate::fixer::SessionStats;
use crate::ErrorRecord;
use colored::*;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonError<'a> {
    file: String,
    line: usize,
    word: &'a str,
    context: String,
    line_content: &'a str,
    suggestions: &'a [String],
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    total_errors: usize,
    errors: Vec<JsonError<'a>>,
}

/// Print the findings of a report-mode run to the console.
pub fn print_errors(records: &[ErrorRecord], colored_output: bool, format: OutputFormat) {
    match format {
        OutputFormat::Text => print_text_errors(records, colored_output),
        OutputFormat::Json => print_json_errors(records),
    }
}

fn print_text_errors(records: &[ErrorRecord], colored_output: bool) {
    for record in records {
        let location = format!("{}:{}", record.file.display(), record.line);

        if colored_output {
            println!(
                "  {} {} ({})",
                location.blue().bold(),
                record.word.red().bold(),
                record.context
            );
            if !record.suggestions.is_empty() {
                let suggestions = record
                    .suggestions
                    .iter()
                    .map(|s| s.green().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("    → {}", suggestions);
            }
        } else {
            println!("  {} {} ({})", location, record.word, record.context);
            if !record.suggestions.is_empty() {
                println!("    → {}", record.suggestions.join(", "));
            }
        }
    }
}

fn print_json_errors(records: &[ErrorRecord]) {
    let errors: Vec<JsonError> = records
        .iter()
        .map(|r| JsonError {
            file: r.file.display().to_string(),
            line: r.line,
            word: &r.word,
            context: r.context.to_string(),
            line_content: &r.line_content,
            suggestions: &r.suggestions,
        })
        .collect();

    let output = JsonOutput {
        total_errors: records.len(),
        errors,
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(err) => eprintln!("Failed to serialize errors: {}", err),
    }
}

pub fn print_report_summary(total_errors: usize, report_path: &Path, colored: bool) {
    println!();
    if total_errors == 0 {
        if colored {
            println!("{}", "✓ No spelling errors found!".green().bold());
        } else {
            println!("✓ No spelling errors found!");
        }
        return;
    }

    let error_word = if total_errors == 1 { "error" } else { "errors" };
    if colored {
        println!(
            "{} {} potential {} found.",
            "✗".red().bold(),
            total_errors.to_string().red().bold(),
            error_word
        );
    } else {
        println!("✗ {} potential {} found.", total_errors, error_word);
    }
    println!("See {} for details.", report_path.display());
    println!("Run with --fix for interactive correction mode.");
}

pub fn print_fix_summary(stats: &SessionStats, total: usize, colored: bool) {
    let rule = "=".repeat(60);
    println!("\n{}", rule);
    if colored {
        println!("{}", "SUMMARY".bold());
    } else {
        println!("SUMMARY");
    }
    println!("{}", rule);
    println!("  Fixed:            {}", stats.fixed);
    println!("  Added to dict:    {}", stats.added_to_dict);
    println!("  Skipped:          {}", stats.skipped);

    let remaining = stats.remaining(total);
    if remaining > 0 {
        println!("  Remaining:        {}", remaining);
    }
}
