//! Export encoders.
//!
//! Both encoders are pure functions over an in-memory `Table` (ordered
//! column names plus ordered rows of cells) returning an opaque byte buffer
//! ready to be served as a download. Neither touches the store.

pub mod pdf;
pub mod xlsx;

use thiserror::Error;

/// File name and MIME type of the spreadsheet download.
pub const XLSX_FILE_NAME: &str = "coding_club_members.xlsx";
pub const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// File name and MIME type of the PDF download.
pub const PDF_FILE_NAME: &str = "coding_club_members.pdf";
pub const PDF_MIME: &str = "application/pdf";

#[derive(Error, Debug)]
pub enum ExportError {
    /// A cell value cannot be represented in the target format.
    #[error("unrepresentable cell value: {0}")]
    Encoding(String),

    /// The spreadsheet container could not be written.
    #[error("archive error: {0}")]
    Archive(String),

    /// The PDF document could not be assembled.
    #[error("render error: {0}")]
    Render(String),
}

/// One cell of the export dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Display form, used by the PDF grid and for numeric cell values.
    /// Whole numbers print without a fractional part.
    pub fn to_display(&self) -> String {
        match self {
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Cell::Text(s) => s.clone(),
        }
    }
}

/// Ordered dataset handed to the encoders.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_display_without_fraction() {
        assert_eq!(Cell::Number(7.0).to_display(), "7");
        assert_eq!(Cell::Number(2.5).to_display(), "2.5");
        assert_eq!(Cell::text("x").to_display(), "x");
    }
}
