//! ThreadReport fixtures built in memory

#![allow(dead_code)]

use erc_reformat::writer::{write_workbook, SheetModel};
use std::io::Cursor;

pub struct Entry<'a> {
    pub number: &'a str,
    pub created_by: &'a str,
    pub created_on: &'a str,
    pub status: &'a str,
    pub category: &'a str,
    pub reference: &'a str,
    pub content: &'a str,
}

impl<'a> Entry<'a> {
    pub fn new(number: &'a str, created_by: &'a str, content: &'a str) -> Self {
        Entry {
            number,
            created_by,
            created_on: "2024-01-01",
            status: "Open",
            category: "Design",
            reference: "REF-1",
            content,
        }
    }
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

/// The five raw rows the export uses for one comment
pub fn block(e: &Entry) -> Vec<Vec<String>> {
    vec![
        row(&["No", "", "Status", "", "", "", "", "Reference", "", "Category"]),
        row(&[e.number, "", e.status, "", "", "", "", e.reference, "", e.category]),
        row(&["", "", "Created By", "", "", "Created On"]),
        row(&["", "", e.created_by, "", "", e.created_on]),
        row(&["", "", e.content]),
    ]
}

/// Report title rows followed by the given blocks, separated by blank rows
pub fn report_grid(entries: &[Entry]) -> Vec<Vec<String>> {
    let mut grid = vec![row(&["ERC ThreadReport"]), row(&["Project", "Bridge 12"]), vec![]];
    for entry in entries {
        grid.extend(block(entry));
        grid.push(vec![]);
    }
    grid
}

/// Encode a text grid as xlsx bytes
pub fn xlsx_bytes(grid: &[Vec<String>]) -> Vec<u8> {
    let sheet = SheetModel::from_text_rows("ThreadReport", grid);
    write_workbook(&sheet, Cursor::new(Vec::new()))
        .unwrap()
        .into_inner()
}
