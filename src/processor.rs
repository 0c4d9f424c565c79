//! End-to-end reformatting: read, parse, emit

use crate::error::{ReformatError, Result};
use crate::parser::{extract_comment_rows, ParsedComments};
use crate::reader::{read_first_sheet, read_first_sheet_from_bytes};
use crate::writer::{to_xlsx_bytes, write_xlsx_file, SHEET_NAME};
use std::path::Path;
use tracing::{debug, info, warn};

/// What a file-to-file run did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessSummary {
    /// Comment rows written to the output
    pub comments_written: usize,
    /// Sentinel blocks skipped because their number was unreadable
    pub records_skipped: usize,
}

/// Reformat a workbook held in memory and return the new workbook bytes
///
/// # Examples
///
/// ```no_run
/// let input = std::fs::read("ThreadReport.xlsx").unwrap();
/// let output = erc_reformat::process_buffer(&input).unwrap();
/// std::fs::write("reformatted_comments.xlsx", output).unwrap();
/// ```
pub fn process_buffer(input: &[u8]) -> Result<Vec<u8>> {
    let grid = read_first_sheet_from_bytes(input)?;
    debug!(rows = grid.len(), bytes = input.len(), "decoded input sheet");

    let parsed = extract_comment_rows(&grid);
    report(&parsed);

    to_xlsx_bytes(&parsed.comments)
}

/// Reformat the workbook at `input` into a new workbook at `output`
pub fn process_file<P, Q>(input: P, output: Q) -> Result<ProcessSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input = input.as_ref();
    let output = output.as_ref();

    let grid = read_first_sheet(input)?;
    debug!(rows = grid.len(), path = %input.display(), "decoded input sheet");

    let parsed = extract_comment_rows(&grid);
    report(&parsed);

    write_xlsx_file(output, SHEET_NAME, &parsed.comments)?;
    info!(path = %output.display(), "wrote reformatted workbook");

    Ok(ProcessSummary {
        comments_written: parsed.comments.len(),
        records_skipped: parsed.rejected.len(),
    })
}

fn report(parsed: &ParsedComments) {
    for record in &parsed.rejected {
        warn!("skipping block: {}", ReformatError::from(record));
    }
    info!(
        blocks = parsed.blocks_found(),
        comments = parsed.comments.len(),
        skipped = parsed.rejected.len(),
        "extracted comment records"
    );
}
