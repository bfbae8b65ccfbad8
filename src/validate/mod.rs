use tracing::{info, warn};

use crate::table::{columns, RecordTable, TableError};

/// The set of columns whose completeness is always checked. Built once and
/// passed to the validator explicitly; the default is the canonical five.
#[derive(Debug, Clone)]
pub struct RequiredFields(Vec<String>);

impl RequiredFields {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RequiredFields(names.into_iter().map(Into::into).collect())
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }
}

impl Default for RequiredFields {
    fn default() -> Self {
        RequiredFields::new([
            columns::STREET,
            columns::ZIP,
            columns::CITY,
            columns::LAST_CHECK_IN,
            columns::COMPANY,
        ])
    }
}

/// Missing-value count for one required column.
#[derive(Debug, PartialEq, Eq)]
pub struct NullCount {
    pub column: String,
    pub missing: usize,
}

/// How a column's missing-value count reads in the report.
#[derive(Debug, PartialEq, Eq)]
pub enum NullSeverity {
    /// No missing values; informational only.
    Clean,
    /// Exactly one missing value.
    Single,
    /// Two or more missing values, carrying the exact count.
    Multiple(usize),
}

impl NullCount {
    pub fn severity(&self) -> NullSeverity {
        match self.missing {
            0 => NullSeverity::Clean,
            1 => NullSeverity::Single,
            n => NullSeverity::Multiple(n),
        }
    }

    fn log(&self) {
        match self.severity() {
            NullSeverity::Clean => info!("no null values found in {}", self.column),
            NullSeverity::Single => warn!("found 1 null value in {}", self.column),
            NullSeverity::Multiple(n) => warn!("found {} null values in {}", n, self.column),
        }
    }
}

/// Per-column missing-value counts, produced fresh on each validation call.
#[derive(Debug)]
pub struct NullReport {
    entries: Vec<NullCount>,
}

impl NullReport {
    pub fn entries(&self) -> &[NullCount] {
        &self.entries
    }

    pub fn missing_in(&self, column: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.column == column)
            .map(|e| e.missing)
    }

    pub fn is_clean(&self) -> bool {
        self.entries.iter().all(|e| e.missing == 0)
    }

    /// Emit the report through the log stream: info for clean columns, a
    /// singular or plural warning otherwise.
    pub fn log(&self) {
        for entry in &self.entries {
            entry.log();
        }
    }
}

/// Ordered row indices whose value in `column` is missing. An absent column
/// is a named error, not a sentinel.
pub fn locate_missing_indices(
    table: &RecordTable,
    column: &str,
) -> Result<Vec<usize>, TableError> {
    let col = table.column_index(column)?;
    Ok(table.missing_rows(col))
}

/// Count missing values in every required column. Fails with the column's
/// name as soon as one is absent from the table entirely; that case is
/// never conflated with "present with zero nulls".
pub fn check_required_items(
    table: &RecordTable,
    required: &RequiredFields,
) -> Result<NullReport, TableError> {
    let mut entries = Vec::with_capacity(required.names().len());
    for name in required.names() {
        let missing = locate_missing_indices(table, name)?.len();
        entries.push(NullCount {
            column: name.clone(),
            missing,
        });
    }
    Ok(NullReport { entries })
}
