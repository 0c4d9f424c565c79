//! # erc-reformat
//!
//! Turns an ERC ThreadReport spreadsheet export into a normalized comment
//! review workbook.
//!
//! ## Pipeline
//!
//! - **Read**: the first sheet is decoded into a grid of display text
//!   ([`reader`])
//! - **Parse**: rows are grouped into comment blocks anchored at a `No`
//!   sentinel row, seven fields are pulled from fixed offsets and records are
//!   sorted by comment number ([`parser`])
//! - **Emit**: a single-sheet workbook with a fixed ten-column schema is
//!   written, three trailing columns holding review placeholders ([`writer`])
//!
//! Blocks whose comment number is missing or not an integer are skipped and
//! logged; the rest of the batch is still written.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use erc_reformat::process_file;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let summary = process_file("ThreadReport.xlsx", "reformatted_comments.xlsx")?;
//! println!("{} comments written", summary.comments_written);
//! # Ok(())
//! # }
//! ```
//!
//! Working on an in-memory grid:
//!
//! ```rust
//! use erc_reformat::parser::extract_comment_rows;
//! use erc_reformat::writer::to_xlsx_bytes;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rows: Vec<Vec<String>> = vec![vec!["No".into()], vec!["1".into()]];
//! let parsed = extract_comment_rows(&rows);
//! assert_eq!(parsed.comments[0].number, 1);
//!
//! let workbook = to_xlsx_bytes(&parsed.comments)?;
//! assert!(!workbook.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod parser;
pub mod processor;
pub mod reader;
#[cfg(feature = "http")]
pub mod server;
pub mod types;
pub mod writer;

pub use error::{ReformatError, Result};
pub use parser::{extract_comment_rows, ParsedComments};
pub use processor::{process_buffer, process_file, ProcessSummary};
pub use types::{CellStyle, CellValue, Comment, StyledCell};
