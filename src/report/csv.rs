use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::models::ReportResult;

/// File the export is written to, relative to the working directory.
pub const OUTPUT_FILE: &str = "iq_license_bom_report.csv";

/// Write all rows of `results` to `path`, returning the number of reports written.
///
/// The header comes from the first result only. Fields are joined with `,` and
/// never quoted, so a value containing a comma shifts the columns of its line.
pub fn export(results: &[ReportResult], path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_rows(results, file).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), reports = results.len(), "exported csv");
    Ok(results.len())
}

/// Serialize `results` to any writer in the export format.
pub fn write_rows<W: Write>(results: &[ReportResult], writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    if let Some(first) = results.first() {
        wtr.write_record(first.headers)?;
    }

    for result in results {
        for row in &result.rows {
            wtr.write_record(row.fields())?;
        }
    }

    wtr.flush()?;
    Ok(())
}
