use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// Canonical column names of a customer record file. Lookups are exact:
/// case- and whitespace-sensitive, no normalization.
pub mod columns {
    pub const STREET: &str = "Street";
    pub const ZIP: &str = "Zip";
    pub const CITY: &str = "City";
    pub const LAST_CHECK_IN: &str = "Last Check-In Date";
    pub const COMPANY: &str = "Company";
    pub const FIRST_NAME: &str = "First Name";
    pub const LAST_NAME: &str = "Last Name";
    pub const JOB: &str = "Job";
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("required column not found: {0:?}")]
    ColumnNotFound(String),
}

/// One field of one row.
///
/// `Missing` and `Text("")` are distinct states: an empty CSV field loads as
/// `Missing`, while a quoted empty string stays `Text`. The date variants
/// only ever appear in the check-in column, after coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Date(NaiveDate),
    /// Check-in value that failed to parse; the original text is retained.
    InvalidDate(String),
    Missing,
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// The raw textual value, if there is one. `Date` cells have left the
    /// textual world and return `None`.
    pub fn text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) | Cell::InvalidDate(s) => Some(s),
            Cell::Date(_) | Cell::Missing => None,
        }
    }

    /// The check-in date this cell carries, parsing stray text on the fly.
    /// Never mutates; the load-time coercion pass is what rewrites cells.
    pub fn checkin_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(d) => Some(*d),
            Cell::Text(s) => crate::load::parse_checkin_date(s),
            Cell::InvalidDate(_) | Cell::Missing => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Cell::InvalidDate(_) => f.write_str("invalid date"),
            Cell::Missing => Ok(()),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<NaiveDate> for Cell {
    fn from(d: NaiveDate) -> Self {
        Cell::Date(d)
    }
}

#[derive(Debug)]
pub struct RecordTable {
    /// Column names, from the header row of the CSV file, in file order.
    headers: Vec<String>,
    /// One `Vec<Cell>` per data row. Rows may be shorter than `headers`
    /// (ragged input); absent trailing cells read as missing.
    rows: Vec<Vec<Cell>>,
}

impl RecordTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        RecordTable { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Index of `name` in the header row, exact match only.
    pub fn column_index(&self, name: &str) -> Result<usize, TableError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
    }

    pub fn row(&self, index: usize) -> &[Cell] {
        &self.rows[index]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// The cell at (`row`, `col`), with ragged rows reading as missing.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows[row].get(col).unwrap_or(&Cell::Missing)
    }

    /// Row indices whose cell in column `col` is missing, in row order.
    pub fn missing_rows(&self, col: usize) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.get(col).is_none_or(Cell::is_missing))
            .map(|(i, _)| i)
            .collect()
    }

    pub(crate) fn rows_mut(&mut self) -> impl Iterator<Item = &mut Vec<Cell>> {
        self.rows.iter_mut()
    }
}
