use crate::ErrorRecord;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serialize the records to the flat report file, one line per record in
/// `<file>:<line> - '<word>' (Context: <context>)` form. The file is
/// rewritten from scratch on every call, so stale findings never linger.
pub fn write_report(path: &Path, records: &[ErrorRecord]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    let mut out = BufWriter::new(file);

    for record in records {
        writeln!(out, "{}", record)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
    }

    out.flush()
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(())
}
