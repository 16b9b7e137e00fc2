use std::io::{self, Write};

use crate::cli::OutputFormat;
use crate::commands::RunSummary;
use crate::error::CliError;

pub fn render(summary: &RunSummary, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(summary)?
            } else {
                serde_json::to_string(summary)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Text => render_text(&mut out, summary)?,
    }
    Ok(())
}

fn render_text<W: Write>(out: &mut W, summary: &RunSummary) -> Result<(), CliError> {
    for exchange in &summary.report.exchanges {
        writeln!(
            out,
            "{}: inspected {}, written {}, skipped {}",
            exchange.name,
            exchange.inspected,
            exchange.written,
            exchange.skipped.len()
        )?;
        for skipped in &exchange.skipped {
            writeln!(out, "  - {}: {}", skipped.entry, skipped.reason)?;
        }
    }
    writeln!(
        out,
        "total: inspected {}, written {}, skipped {} -> {}",
        summary.report.total_inspected(),
        summary.report.written.len(),
        summary.skipped(),
        summary.results_dir.display()
    )?;
    Ok(())
}
