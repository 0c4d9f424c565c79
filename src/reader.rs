//! First-sheet reading into a display-text grid
//!
//! The parser works on text exactly as the exporting tool rendered it, so
//! every cell is turned into the string a user would see: integral numbers
//! without a decimal point, dates as calendar dates, booleans as `TRUE` /
//! `FALSE`.
//!
//! Cell number formats are not evaluated. Date cells always come out as
//! `YYYY-MM-DD`, or `YYYY-MM-DD HH:MM:SS` when they carry a time of day,
//! whatever format the exporting tool displayed them with.

use crate::error::{ReformatError, Result};
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader};
use chrono::Timelike;
use std::io::Cursor;
use std::path::Path;

/// Ragged grid of display text, one inner vector per sheet row
pub type TextGrid = Vec<Vec<String>>;

/// Read the first sheet of a workbook file
///
/// Format (xlsx, xls, xlsb, ods) is auto-detected from the file extension.
///
/// # Examples
///
/// ```no_run
/// use erc_reformat::reader::read_first_sheet;
///
/// let grid = read_first_sheet("ThreadReport.xlsx").unwrap();
/// println!("{} rows", grid.len());
/// ```
pub fn read_first_sheet<P: AsRef<Path>>(path: P) -> Result<TextGrid> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| ReformatError::UnreadableWorkbook(e.to_string()))?;

    let Some(first) = workbook.sheet_names().first().cloned() else {
        return Ok(Vec::new());
    };
    let range = workbook.worksheet_range(&first)?;
    Ok(range_to_grid(&range))
}

/// Read the first sheet of a workbook held in memory
///
/// Format is detected from the content itself.
pub fn read_first_sheet_from_bytes(bytes: &[u8]) -> Result<TextGrid> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ReformatError::UnreadableWorkbook(e.to_string()))?;

    let Some(first) = workbook.sheet_names().first().cloned() else {
        return Ok(Vec::new());
    };
    let range = workbook.worksheet_range(&first)?;
    Ok(range_to_grid(&range))
}

/// Lay the used range out from A1 and drop trailing blanks of each row
fn range_to_grid(range: &Range<Data>) -> TextGrid {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };

    let mut grid: TextGrid = Vec::with_capacity(start_row as usize + range.height());
    grid.resize(start_row as usize, Vec::new());

    for cells in range.rows() {
        let mut row = Vec::with_capacity(start_col as usize + cells.len());
        row.resize(start_col as usize, String::new());
        row.extend(cells.iter().map(display_text));

        while row.last().is_some_and(|c| c.is_empty()) {
            row.pop();
        }
        grid.push(row);
    }

    grid
}

/// Convert a calamine cell to the text the source tool displayed
fn display_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                itoa::Buffer::new().format(*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => itoa::Buffer::new().format(*i).to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) if ndt.num_seconds_from_midnight() == 0 => {
                ndt.date().format("%Y-%m-%d").to_string()
            }
            Some(ndt) => ndt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn test_display_text_numbers() {
        assert_eq!(display_text(&Data::Float(7.0)), "7");
        assert_eq!(display_text(&Data::Float(-12.0)), "-12");
        assert_eq!(display_text(&Data::Float(2.5)), "2.5");
        assert_eq!(display_text(&Data::Int(42)), "42");
    }

    #[test]
    fn test_display_text_other_kinds() {
        assert_eq!(display_text(&Data::Empty), "");
        assert_eq!(display_text(&Data::String("Open".into())), "Open");
        assert_eq!(display_text(&Data::Bool(true)), "TRUE");
        assert_eq!(display_text(&Data::Error(CellErrorType::Div0)), "#DIV/0!");
        assert_eq!(
            display_text(&Data::DateTimeIso("2024-01-01T00:00:00".into())),
            "2024-01-01T00:00:00"
        );
    }

    #[test]
    fn test_range_anchored_at_a1() {
        // Used range starts at B2
        let mut range = Range::new((1, 1), (2, 3));
        range.set_value((1, 1), Data::String("No".into()));
        range.set_value((2, 1), Data::Float(3.0));
        range.set_value((2, 3), Data::String("Open".into()));

        let grid = range_to_grid(&range);
        assert_eq!(grid.len(), 3);
        assert!(grid[0].is_empty());
        assert_eq!(grid[1], vec!["", "No"]);
        assert_eq!(grid[2], vec!["", "3", "", "Open"]);
    }

    #[test]
    fn test_blank_row_becomes_zero_length() {
        let mut range = Range::new((0, 0), (2, 1));
        range.set_value((0, 0), Data::String("a".into()));
        range.set_value((2, 1), Data::String("b".into()));

        let grid = range_to_grid(&range);
        assert_eq!(grid, vec![vec!["a".to_string()], vec![], vec!["".into(), "b".into()]]);
    }

    #[test]
    fn test_empty_range() {
        let range: Range<Data> = Range::empty();
        assert!(range_to_grid(&range).is_empty());
    }

    #[test]
    fn test_garbage_bytes_are_unreadable() {
        let err = read_first_sheet_from_bytes(b"definitely not a spreadsheet").unwrap_err();
        assert!(matches!(err, ReformatError::UnreadableWorkbook(_)));
    }
}
