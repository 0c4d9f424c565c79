//! ThreadReport row grouping and field extraction
//!
//! A ThreadReport sheet lists each review comment as a block of consecutive
//! rows. The first row of a block carries the literal `No` in column A; the
//! fields sit at fixed offsets from that row. This module turns the raw text
//! grid into [`Comment`] records sorted by comment number.
//!
//! Parsing is pure: no I/O and no logging. Blocks whose number cannot be read
//! are returned in [`ParsedComments::rejected`] so the caller decides how to
//! report them.
//!
//! # Examples
//!
//! ```
//! use erc_reformat::parser::extract_comment_rows;
//!
//! let grid: Vec<Vec<String>> = vec![vec!["Project".into()]];
//! let parsed = extract_comment_rows(&grid);
//! assert!(parsed.comments.is_empty());
//! ```

use crate::error::ReformatError;
use crate::types::Comment;

/// Text in column A that opens a comment block
pub const SENTINEL: &str = "No";

/// Zero-based `(row, column)` position inside a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellOffset {
    pub row: usize,
    pub col: usize,
}

impl CellOffset {
    pub const fn new(row: usize, col: usize) -> Self {
        CellOffset { row, col }
    }
}

/// Block size and field positions of one export layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    /// Raw rows consumed per record, sentinel row included
    pub block_rows: usize,
    pub number: CellOffset,
    pub created_by: CellOffset,
    pub created_on: CellOffset,
    pub status: CellOffset,
    pub category: CellOffset,
    pub reference: CellOffset,
    pub content: CellOffset,
}

/// The ThreadReport export layout.
///
/// ```text
/// row 0: No | ...
/// row 1: <number> | | <status> | ... | <reference> | | <category>
/// row 2: (labels)
/// row 3: | | <created by> | | | <created on>
/// row 4: | | <content>
/// ```
pub const THREAD_REPORT_LAYOUT: BlockLayout = BlockLayout {
    block_rows: 5,
    number: CellOffset::new(1, 0),
    status: CellOffset::new(1, 2),
    reference: CellOffset::new(1, 7),
    category: CellOffset::new(1, 9),
    created_by: CellOffset::new(3, 2),
    created_on: CellOffset::new(3, 5),
    content: CellOffset::new(4, 2),
};

/// A sentinel block that could not become a [`Comment`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecord {
    /// Zero-based index of the sentinel row in the source grid
    pub row: usize,
    /// Raw text found in the number cell (empty when the cell is missing)
    pub number_text: String,
}

impl MalformedRecord {
    pub fn reason(&self) -> String {
        if self.number_text.trim().is_empty() {
            "number cell is empty or missing".to_string()
        } else {
            format!("number cell {:?} is not an integer", self.number_text)
        }
    }
}

impl From<&MalformedRecord> for ReformatError {
    fn from(record: &MalformedRecord) -> Self {
        ReformatError::MalformedRecord {
            row: record.row,
            reason: record.reason(),
        }
    }
}

/// Outcome of parsing one grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedComments {
    /// Records sorted ascending by number, ties in source order
    pub comments: Vec<Comment>,
    /// Blocks skipped because their number was unreadable, in source order
    pub rejected: Vec<MalformedRecord>,
}

impl ParsedComments {
    /// Number of sentinel rows seen
    pub fn blocks_found(&self) -> usize {
        self.comments.len() + self.rejected.len()
    }
}

/// Extract comment records from a ThreadReport grid.
///
/// Zero-length rows are ignored when looking for sentinels but blocks are
/// sliced from the original grid, so blank rows never shift a block.
pub fn extract_comment_rows(rows: &[Vec<String>]) -> ParsedComments {
    extract_with_layout(rows, &THREAD_REPORT_LAYOUT)
}

/// Extract comment records using an explicit layout
pub fn extract_with_layout(rows: &[Vec<String>], layout: &BlockLayout) -> ParsedComments {
    let mut parsed = ParsedComments::default();

    let sentinels = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| !row.is_empty())
        .filter(|(_, row)| row[0] == SENTINEL)
        .map(|(index, _)| index);

    for start in sentinels {
        let end = (start + layout.block_rows).min(rows.len());
        let block = &rows[start..end];

        match read_comment(block, layout) {
            Some(comment) => parsed.comments.push(comment),
            None => parsed.rejected.push(MalformedRecord {
                row: start,
                number_text: field(block, layout.number).to_string(),
            }),
        }
    }

    // Vec::sort_by_key is stable: equal numbers keep source order
    parsed.comments.sort_by_key(|c| c.number);
    parsed
}

fn read_comment(block: &[Vec<String>], layout: &BlockLayout) -> Option<Comment> {
    let number = parse_number(field(block, layout.number))?;

    Some(Comment {
        number,
        created_by: field(block, layout.created_by).to_string(),
        created_on: field(block, layout.created_on).to_string(),
        status: field(block, layout.status).to_string(),
        category: field(block, layout.category).to_string(),
        reference: field(block, layout.reference).to_string(),
        content: field(block, layout.content).to_string(),
    })
}

/// Cell text at `offset`, empty when the block or row is too short
fn field(block: &[Vec<String>], offset: CellOffset) -> &str {
    block
        .get(offset.row)
        .and_then(|row| row.get(offset.col))
        .map(String::as_str)
        .unwrap_or("")
}

fn parse_number(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}
