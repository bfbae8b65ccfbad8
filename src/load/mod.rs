use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::table::{columns, Cell, RecordTable, TableError};

mod date_parser;
pub use date_parser::parse_checkin_date;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed csv in {}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{} has no header row", .0.display())]
    Empty(PathBuf),
}

/// Counts from one coercion pass over the check-in column.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DateCoercion {
    pub parsed: usize,
    pub invalid: usize,
    pub missing: usize,
}

/// Read `path` into a [`RecordTable`]. Every field loads as text; empty
/// fields load as missing. Rows shorter than the header are accepted.
pub fn load_csv(path: &Path) -> Result<RecordTable, LoadError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::Malformed {
            path: path.to_path_buf(),
            source: e,
        })?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() {
        return Err(LoadError::Empty(path.to_path_buf()));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| LoadError::Malformed {
            path: path.to_path_buf(),
            source: e,
        })?;
        let row = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    Cell::Missing
                } else {
                    Cell::Text(field.to_string())
                }
            })
            .collect();
        rows.push(row);
    }

    debug!(rows = rows.len(), cols = headers.len(), "csv loaded");
    Ok(RecordTable::new(headers, rows))
}

/// One in-place pass turning the check-in column's text into
/// [`Cell::Date`] or [`Cell::InvalidDate`]. Already-coerced cells pass
/// through untouched, so repeating the pass is a no-op.
pub fn coerce_checkin_dates(table: &mut RecordTable) -> Result<DateCoercion, TableError> {
    let col = table.column_index(columns::LAST_CHECK_IN)?;
    let mut outcome = DateCoercion::default();

    for row in table.rows_mut() {
        let Some(cell) = row.get_mut(col) else {
            outcome.missing += 1;
            continue;
        };
        match cell {
            Cell::Missing => outcome.missing += 1,
            Cell::Date(_) => outcome.parsed += 1,
            Cell::InvalidDate(_) => outcome.invalid += 1,
            Cell::Text(raw) => match parse_checkin_date(raw) {
                Some(date) => {
                    *cell = Cell::Date(date);
                    outcome.parsed += 1;
                }
                None => {
                    *cell = Cell::InvalidDate(std::mem::take(raw));
                    outcome.invalid += 1;
                }
            },
        }
    }

    Ok(outcome)
}

/// Load `path` and normalize it for querying: the check-in column is coerced
/// exactly once, here, so every later reader sees a settled table.
pub fn load_table(path: &Path) -> Result<RecordTable, LoadError> {
    let mut table = load_csv(path)?;

    match coerce_checkin_dates(&mut table) {
        Ok(outcome) => {
            info!(
                parsed = outcome.parsed,
                invalid = outcome.invalid,
                missing = outcome.missing,
                "coerced check-in dates"
            );
            if outcome.invalid > 0 {
                warn!(
                    "{} unparseable value(s) in {:?}",
                    outcome.invalid,
                    columns::LAST_CHECK_IN
                );
            }
        }
        // Validation reports the absent column; nothing to coerce here.
        Err(TableError::ColumnNotFound(name)) => {
            warn!("column {:?} absent; check-in dates not coerced", name);
        }
    }

    Ok(table)
}
