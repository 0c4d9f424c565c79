//! Type definitions for comment records and output cells


/// One review comment pulled out of a ThreadReport block
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comment {
    /// Comment number, the sort key
    pub number: i64,
    pub created_by: String,
    /// Creation date as rendered by the exporting tool (not normalized)
    pub created_on: String,
    pub status: String,
    pub category: String,
    pub reference: String,
    /// Comment body, may span several lines
    pub content: String,
}

/// Cell style presets used by the output workbook
///
/// The discriminant is the `cellXfs` index written to `styles.xml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellStyle {
    /// Default style - no formatting
    Default = 0,
    /// Bold on gray fill, thin borders, wrapped and vertically centered
    Header = 1,
    /// Thin borders, wrapped and top aligned
    Content = 2,
}

impl CellStyle {
    /// Get the style index for XML
    pub fn index(&self) -> u32 {
        *self as u32
    }
}

/// Represents a single cell value in an output worksheet
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty cell
    Empty,
    /// String value
    String(String),
    /// Integer value
    Int(i64),
}

impl CellValue {
    /// Convert cell value to string
    pub fn as_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::String(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
        }
    }

    /// Whether the cell has nothing to show (no value or an empty string)
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.is_empty(),
            CellValue::Int(_) => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

/// Styled cell value (combines value with formatting)
#[derive(Debug, Clone, PartialEq)]
pub struct StyledCell {
    /// The cell value
    pub value: CellValue,
    /// The cell style
    pub style: CellStyle,
}

impl StyledCell {
    /// Create a new styled cell
    pub fn new(value: impl Into<CellValue>, style: CellStyle) -> Self {
        StyledCell {
            value: value.into(),
            style,
        }
    }
}

/// Convert a 1-based column number to its Excel letters (1 -> A, 27 -> AA)
pub fn column_letter(col: u32) -> String {
    let mut letters = String::new();
    let mut n = col;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.insert(0, (b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters
}
