//! Comment workbook emitter
//!
//! Emission happens in two steps. [`build_sheet`] turns comment records into
//! a [`SheetModel`], a plain value holding every cell with its style and the
//! column widths. [`write_workbook`] then serializes a model into an xlsx
//! package without touching the model.
//!
//! # Examples
//!
//! ```no_run
//! use erc_reformat::types::Comment;
//! use erc_reformat::writer::{to_xlsx_bytes, write_xlsx_file};
//!
//! let comments = vec![Comment {
//!     number: 1,
//!     created_by: "Jane".to_string(),
//!     created_on: "2024-01-01".to_string(),
//!     status: "Open".to_string(),
//!     category: "Design".to_string(),
//!     reference: "REF-1".to_string(),
//!     content: "Fix the beam.".to_string(),
//! }];
//!
//! let bytes = to_xlsx_bytes(&comments).unwrap();
//! write_xlsx_file("comments.xlsx", "Formatted Comments", &comments).unwrap();
//! # let _ = bytes;
//! ```

mod package;
pub mod xml_writer;

use crate::error::Result;
use crate::types::{column_letter, CellStyle, CellValue, Comment, StyledCell};
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use xml_writer::XmlWriter;

/// Sheet name used by the buffer entry point
pub const SHEET_NAME: &str = "Formatted Comments";

/// Output columns in order, with their widths in character units
pub const COLUMNS: [(&str, f64); 10] = [
    ("Number", 10.0),
    ("Created By", 20.0),
    ("Created On", 15.0),
    ("Status", 12.0),
    ("Category", 15.0),
    ("Reference", 15.0),
    ("Content", 60.0),
    ("Response", 40.0),
    ("Comment Addressed", 18.0),
    ("Comment Backchecked", 20.0),
];

/// Placeholder text for the two review flags
pub const REVIEW_FLAG_DEFAULT: &str = "False";

/// Fully formed single worksheet: cells, styles and layout
#[derive(Debug, Clone, PartialEq)]
pub struct SheetModel {
    pub name: String,
    /// Width per column, starting at column A
    pub column_widths: Vec<f64>,
    /// Number of top rows kept visible while scrolling
    pub frozen_rows: u32,
    pub rows: Vec<Vec<StyledCell>>,
}

impl SheetModel {
    /// Unstyled sheet holding a text grid, one string cell per non-empty text
    pub fn from_text_rows(name: &str, rows: &[Vec<String>]) -> Self {
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|text| {
                        let value = if text.is_empty() {
                            CellValue::Empty
                        } else {
                            CellValue::String(text.clone())
                        };
                        StyledCell::new(value, CellStyle::Default)
                    })
                    .collect()
            })
            .collect();

        SheetModel {
            name: name.to_string(),
            column_widths: Vec::new(),
            frozen_rows: 0,
            rows,
        }
    }

    /// Override the sheet name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
}

/// Build the output sheet: header row, then one row per comment in order
pub fn build_sheet(comments: &[Comment]) -> SheetModel {
    let mut rows = Vec::with_capacity(comments.len() + 1);

    rows.push(
        COLUMNS
            .iter()
            .map(|(title, _)| StyledCell::new(*title, CellStyle::Header))
            .collect(),
    );
    rows.extend(comments.iter().map(content_row));

    SheetModel {
        name: SHEET_NAME.to_string(),
        column_widths: COLUMNS.iter().map(|(_, width)| *width).collect(),
        frozen_rows: 1,
        rows,
    }
}

/// Largest magnitude a spreadsheet number cell holds without rounding (2^53)
const MAX_EXACT_NUMBER: i64 = 1 << 53;

fn content_row(comment: &Comment) -> Vec<StyledCell> {
    let text = |s: &str| StyledCell::new(normalize_line_breaks(s), CellStyle::Content);

    vec![
        number_cell(comment.number),
        text(&comment.created_by),
        text(&comment.created_on),
        text(&comment.status),
        text(&comment.category),
        text(&comment.reference),
        text(&comment.content),
        StyledCell::new("", CellStyle::Content),
        StyledCell::new(REVIEW_FLAG_DEFAULT, CellStyle::Content),
        StyledCell::new(REVIEW_FLAG_DEFAULT, CellStyle::Content),
    ]
}

/// Numbers a double can hold exactly stay numeric, larger ones become text
fn number_cell(number: i64) -> StyledCell {
    if number.unsigned_abs() <= MAX_EXACT_NUMBER as u64 {
        StyledCell::new(number, CellStyle::Content)
    } else {
        StyledCell::new(number.to_string(), CellStyle::Content)
    }
}

fn normalize_line_breaks(s: &str) -> String {
    s.replace("\r\n", "\n")
}

/// Serialize comments into an in-memory xlsx workbook
pub fn to_xlsx_bytes(comments: &[Comment]) -> Result<Vec<u8>> {
    let sink = write_workbook(&build_sheet(comments), Cursor::new(Vec::new()))?;
    Ok(sink.into_inner())
}

/// Serialize comments into an xlsx file at `path`
///
/// The workbook is produced in memory first; the file is only created once
/// serialization succeeded.
pub fn write_xlsx_file<P: AsRef<Path>>(
    path: P,
    sheet_name: &str,
    comments: &[Comment],
) -> Result<()> {
    let sheet = build_sheet(comments).with_name(sheet_name);
    let bytes = write_workbook(&sheet, Cursor::new(Vec::new()))?.into_inner();
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Serialize a sheet model as a single-sheet xlsx package into `sink`
///
/// Entry timestamps are fixed, so the same model always yields the same bytes.
pub fn write_workbook<W: Write + Seek>(sheet: &SheetModel, sink: W) -> Result<W> {
    let mut zip = ZipWriter::new(sink);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(6))
        .last_modified_time(zip::DateTime::default());

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(package::CONTENT_TYPES.as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(package::ROOT_RELS.as_bytes())?;

    zip.start_file("docProps/core.xml", options)?;
    zip.write_all(package::CORE_PROPS.as_bytes())?;

    zip.start_file("docProps/app.xml", options)?;
    zip.write_all(package::APP_PROPS.as_bytes())?;

    zip.start_file("xl/workbook.xml", options)?;
    package::write_workbook_xml(&mut zip, &package::sanitize_sheet_name(&sheet.name))?;

    zip.start_file("xl/_rels/workbook.xml.rels", options)?;
    zip.write_all(package::WORKBOOK_RELS.as_bytes())?;

    zip.start_file("xl/styles.xml", options)?;
    zip.write_all(package::STYLES.as_bytes())?;

    zip.start_file("xl/worksheets/sheet1.xml", options)?;
    write_worksheet_xml(&mut zip, sheet)?;

    Ok(zip.finish()?)
}

fn write_worksheet_xml<W: Write>(writer: W, sheet: &SheetModel) -> Result<()> {
    let mut xml = XmlWriter::new(writer);
    package::start_worksheet(&mut xml)?;

    if sheet.frozen_rows > 0 {
        let top_left = format!("A{}", sheet.frozen_rows + 1);
        xml.write_str("<sheetViews><sheetView workbookViewId=\"0\">")?;
        xml.start_element("pane")?;
        xml.attribute_int("ySplit", sheet.frozen_rows as i64)?;
        xml.attribute("topLeftCell", &top_left)?;
        xml.attribute("activePane", "bottomLeft")?;
        xml.attribute("state", "frozen")?;
        xml.close_empty()?;
        xml.write_str("</sheetView></sheetViews>")?;
    }

    if !sheet.column_widths.is_empty() {
        xml.start_element("cols")?;
        xml.close_start_tag()?;
        for (i, width) in sheet.column_widths.iter().enumerate() {
            let col = i as i64 + 1;
            xml.start_element("col")?;
            xml.attribute_int("min", col)?;
            xml.attribute_int("max", col)?;
            xml.attribute("width", &width.to_string())?;
            xml.attribute_int("customWidth", 1)?;
            xml.close_empty()?;
        }
        xml.end_element("cols")?;
    }

    xml.start_element("sheetData")?;
    xml.close_start_tag()?;
    for (i, row) in sheet.rows.iter().enumerate() {
        write_row(&mut xml, i as u32 + 1, row)?;
    }
    xml.end_element("sheetData")?;

    xml.end_element("worksheet")?;
    xml.flush()
}

fn write_row<W: Write>(xml: &mut XmlWriter<W>, row_num: u32, cells: &[StyledCell]) -> Result<()> {
    let mut num = itoa::Buffer::new();
    let row_label = num.format(row_num).to_string();

    xml.start_element("row")?;
    xml.attribute("r", &row_label)?;
    xml.close_start_tag()?;

    for (col_idx, cell) in cells.iter().enumerate() {
        let style_id = cell.style.index();
        let empty = cell.value.is_empty();
        if empty && style_id == 0 {
            continue;
        }

        let mut cell_ref = column_letter(col_idx as u32 + 1);
        cell_ref.push_str(&row_label);

        xml.start_element("c")?;
        xml.attribute("r", &cell_ref)?;
        if style_id > 0 {
            xml.attribute_int("s", style_id as i64)?;
        }

        match &cell.value {
            _ if empty => xml.close_empty()?,
            CellValue::Int(i) => {
                xml.close_start_tag()?;
                xml.text_element("v", num.format(*i))?;
                xml.end_element("c")?;
            }
            CellValue::String(s) => {
                xml.attribute("t", "inlineStr")?;
                xml.close_start_tag()?;
                if needs_space_preserve(s) {
                    xml.write_str("<is><t xml:space=\"preserve\">")?;
                } else {
                    xml.write_str("<is><t>")?;
                }
                xml.write_escaped(s)?;
                xml.write_str("</t></is></c>")?;
            }
            CellValue::Empty => xml.close_empty()?,
        }
    }

    xml.end_element("row")
}

fn needs_space_preserve(s: &str) -> bool {
    s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) || s.contains('\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(number: i64, content: &str) -> Comment {
        Comment {
            number,
            created_by: "Jane".to_string(),
            created_on: "2024-01-01".to_string(),
            status: "Open".to_string(),
            category: "Design".to_string(),
            reference: "REF-1".to_string(),
            content: content.to_string(),
        }
    }

    fn worksheet_xml(sheet: &SheetModel) -> String {
        let mut out = Vec::new();
        write_worksheet_xml(&mut out, sheet).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_header_row() {
        let sheet = build_sheet(&[]);
        assert_eq!(sheet.rows.len(), 1);

        let titles: Vec<String> = sheet.rows[0].iter().map(|c| c.value.as_string()).collect();
        assert_eq!(
            titles,
            vec![
                "Number",
                "Created By",
                "Created On",
                "Status",
                "Category",
                "Reference",
                "Content",
                "Response",
                "Comment Addressed",
                "Comment Backchecked"
            ]
        );
        assert!(sheet.rows[0].iter().all(|c| c.style == CellStyle::Header));
        assert_eq!(sheet.column_widths.len(), 10);
        assert_eq!(sheet.name, SHEET_NAME);
    }

    #[test]
    fn test_content_row_values() {
        let sheet = build_sheet(&[comment(7, "Fix the beam.")]);
        let row = &sheet.rows[1];

        assert_eq!(row[0].value, CellValue::Int(7));
        assert_eq!(row[1].value, CellValue::from("Jane"));
        assert_eq!(row[6].value, CellValue::from("Fix the beam."));
        assert_eq!(row[7].value, CellValue::from(""));
        assert_eq!(row[8].value, CellValue::from("False"));
        assert_eq!(row[9].value, CellValue::from("False"));
        assert!(row.iter().all(|c| c.style == CellStyle::Content));
    }

    #[test]
    fn test_rows_keep_input_order() {
        let sheet = build_sheet(&[comment(9, "a"), comment(2, "b")]);
        assert_eq!(sheet.rows[1][0].value, CellValue::Int(9));
        assert_eq!(sheet.rows[2][0].value, CellValue::Int(2));
    }

    #[test]
    fn test_huge_numbers_written_as_text() {
        let sheet = build_sheet(&[comment(i64::MAX, "a"), comment(-(1 << 53), "b")]);
        assert_eq!(
            sheet.rows[1][0].value,
            CellValue::from("9223372036854775807")
        );
        assert_eq!(sheet.rows[2][0].value, CellValue::Int(-(1 << 53)));
    }

    #[test]
    fn test_crlf_normalized() {
        let sheet = build_sheet(&[comment(1, "line one\r\nline two\nline three")]);
        assert_eq!(
            sheet.rows[1][6].value,
            CellValue::from("line one\nline two\nline three")
        );
    }

    #[test]
    fn test_worksheet_xml_cells() {
        let xml = worksheet_xml(&build_sheet(&[comment(7, "a & b")]));

        assert!(xml.contains("<pane ySplit=\"1\" topLeftCell=\"A2\""));
        assert!(xml.contains("<col min=\"7\" max=\"7\" width=\"60\" customWidth=\"1\"/>"));
        assert!(xml.contains("<c r=\"A1\" s=\"1\" t=\"inlineStr\"><is><t>Number</t></is></c>"));
        assert!(xml.contains("<c r=\"A2\" s=\"2\"><v>7</v></c>"));
        assert!(xml.contains("<c r=\"G2\" s=\"2\" t=\"inlineStr\"><is><t>a &amp; b</t></is></c>"));
        assert!(xml.contains("<c r=\"H2\" s=\"2\"/>"));
        assert!(xml.contains("<c r=\"J2\" s=\"2\" t=\"inlineStr\"><is><t>False</t></is></c>"));
    }

    #[test]
    fn test_multiline_text_preserved() {
        let xml = worksheet_xml(&build_sheet(&[comment(1, "one\ntwo")]));
        assert!(xml.contains("<t xml:space=\"preserve\">one\ntwo</t>"));
    }

    #[test]
    fn test_text_grid_model_skips_blank_cells() {
        let grid = vec![vec!["No".to_string(), String::new(), "x".to_string()]];
        let xml = worksheet_xml(&SheetModel::from_text_rows("Input", &grid));

        assert!(xml.contains("<c r=\"A1\" t=\"inlineStr\"><is><t>No</t></is></c>"));
        assert!(!xml.contains("r=\"B1\""));
        assert!(xml.contains("<c r=\"C1\" t=\"inlineStr\">"));
        assert!(!xml.contains("<cols>"));
        assert!(!xml.contains("<sheetViews>"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let comments = vec![comment(3, "c"), comment(4, "d")];
        assert_eq!(to_xlsx_bytes(&comments).unwrap(), to_xlsx_bytes(&comments).unwrap());
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");

        write_xlsx_file(&path, "Review", &[comment(1, "x")]).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
