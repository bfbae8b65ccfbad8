//! The four read-only queries. Every query borrows the table immutably and
//! reports an absent referenced column as a named error; missing values in
//! referenced columns are warned about and processing continues.

use chrono::NaiveDate;
use tracing::warn;

use crate::table::{columns, Cell, RecordTable, TableError};
use crate::validate::locate_missing_indices;

/// All rows sharing the extreme check-in date, in row order.
#[derive(Debug, PartialEq, Eq)]
pub struct CheckinHit {
    pub date: NaiveDate,
    pub rows: Vec<usize>,
}

#[derive(Clone, Copy)]
enum Extreme {
    Earliest,
    Latest,
}

fn warn_missing(table: &RecordTable, column: &str) -> Result<(), TableError> {
    let rows = locate_missing_indices(table, column)?;
    if !rows.is_empty() {
        warn!(column, rows = ?rows, "missing values in query input");
    }
    Ok(())
}

fn checkin_extreme(
    table: &RecordTable,
    extreme: Extreme,
) -> Result<Option<CheckinHit>, TableError> {
    let col = table.column_index(columns::LAST_CHECK_IN)?;
    warn_missing(table, columns::LAST_CHECK_IN)?;

    let mut best: Option<CheckinHit> = None;
    for (i, row) in table.rows().enumerate() {
        let Some(date) = row.get(col).and_then(Cell::checkin_date) else {
            continue;
        };
        match &mut best {
            None => {
                best = Some(CheckinHit {
                    date,
                    rows: vec![i],
                })
            }
            Some(hit) => {
                let replaces = match extreme {
                    Extreme::Earliest => date < hit.date,
                    Extreme::Latest => date > hit.date,
                };
                if replaces {
                    hit.date = date;
                    hit.rows.clear();
                    hit.rows.push(i);
                } else if date == hit.date {
                    hit.rows.push(i);
                }
            }
        }
    }

    if best.is_none() {
        warn!(
            "no parseable value in {:?}; check-in query is empty",
            columns::LAST_CHECK_IN
        );
    }
    Ok(best)
}

/// Rows holding the minimum valid check-in date; `None` when no row has one.
pub fn earliest_checkin(table: &RecordTable) -> Result<Option<CheckinHit>, TableError> {
    checkin_extreme(table, Extreme::Earliest)
}

/// Rows holding the maximum valid check-in date; `None` when no row has one.
pub fn latest_checkin(table: &RecordTable) -> Result<Option<CheckinHit>, TableError> {
    checkin_extreme(table, Extreme::Latest)
}

/// Full names, ascending. Rows missing both name parts are dropped; a
/// missing single part reads as the empty string. Ordering is byte-wise
/// `str` comparison (case-sensitive, locale-independent) under a stable
/// sort, so equal names keep their row order.
pub fn alphabetic_customer_names(table: &RecordTable) -> Result<Vec<String>, TableError> {
    let first = table.column_index(columns::FIRST_NAME)?;
    let last = table.column_index(columns::LAST_NAME)?;
    warn_missing(table, columns::FIRST_NAME)?;
    warn_missing(table, columns::LAST_NAME)?;

    let mut names: Vec<String> = table
        .rows()
        .filter_map(|row| {
            let first = row.get(first).and_then(Cell::text);
            let last = row.get(last).and_then(Cell::text);
            if first.is_none() && last.is_none() {
                return None;
            }
            let full = format!("{} {}", first.unwrap_or(""), last.unwrap_or(""));
            Some(full.trim().to_string())
        })
        .collect();
    names.sort();
    Ok(names)
}

/// Job titles, ascending, same ordering semantics as the name query. Rows
/// with a missing "Job" are dropped before sorting.
pub fn alphabetic_jobs(table: &RecordTable) -> Result<Vec<String>, TableError> {
    let job = table.column_index(columns::JOB)?;
    warn_missing(table, columns::JOB)?;

    let mut jobs: Vec<String> = table
        .rows()
        .filter_map(|row| row.get(job).and_then(Cell::text).map(str::to_string))
        .collect();
    jobs.sort();
    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn checkin_table(values: Vec<Cell>) -> RecordTable {
        RecordTable::new(
            vec![columns::LAST_CHECK_IN.to_string()],
            values.into_iter().map(|c| vec![c]).collect(),
        )
    }

    fn name_table(rows: Vec<(Option<&str>, Option<&str>)>) -> RecordTable {
        RecordTable::new(
            vec![
                columns::FIRST_NAME.to_string(),
                columns::LAST_NAME.to_string(),
            ],
            rows.into_iter()
                .map(|(f, l)| {
                    vec![
                        f.map_or(Cell::Missing, Cell::from),
                        l.map_or(Cell::Missing, Cell::from),
                    ]
                })
                .collect(),
        )
    }

    #[test]
    fn test_earliest_and_latest_with_ties() {
        let table = checkin_table(vec![
            Cell::Date(d(2021, 1, 1)),
            Cell::Date(d(2022, 6, 15)),
            Cell::Date(d(2020, 3, 3)),
            Cell::InvalidDate("invalid".into()),
            Cell::Date(d(2022, 6, 15)),
        ]);
        let earliest = earliest_checkin(&table).unwrap().unwrap();
        assert_eq!(earliest.date, d(2020, 3, 3));
        assert_eq!(earliest.rows, vec![2]);

        let latest = latest_checkin(&table).unwrap().unwrap();
        assert_eq!(latest.date, d(2022, 6, 15));
        assert_eq!(latest.rows, vec![1, 4]);
    }

    #[test]
    fn test_checkin_reads_uncoerced_text_without_mutating() {
        let table = checkin_table(vec![
            Cell::from("2021-01-01"),
            Cell::from("not a date"),
            Cell::from("2020-03-03"),
        ]);
        let earliest = earliest_checkin(&table).unwrap().unwrap();
        assert_eq!(earliest.date, d(2020, 3, 3));
        // Still text afterwards; only the load-time pass rewrites cells.
        assert_eq!(table.cell(0, 0), &Cell::Text("2021-01-01".into()));
    }

    #[test]
    fn test_checkin_queries_are_repeatable() {
        let table = checkin_table(vec![
            Cell::Date(d(2021, 1, 1)),
            Cell::Date(d(2020, 3, 3)),
        ]);
        let a = earliest_checkin(&table).unwrap();
        let b = earliest_checkin(&table).unwrap();
        assert_eq!(a, b);
        let l1 = latest_checkin(&table).unwrap().unwrap();
        let l2 = latest_checkin(&table).unwrap().unwrap();
        assert_eq!(l1, l2);
        assert_eq!(l1.date, d(2021, 1, 1));
    }

    #[test]
    fn test_all_invalid_yields_none() {
        let table = checkin_table(vec![
            Cell::InvalidDate("x".into()),
            Cell::Missing,
            Cell::from("never"),
        ]);
        assert_eq!(earliest_checkin(&table).unwrap(), None);
        assert_eq!(latest_checkin(&table).unwrap(), None);
    }

    #[test]
    fn test_checkin_requires_the_column() {
        let table = RecordTable::new(vec!["City".into()], vec![]);
        assert_eq!(
            earliest_checkin(&table).unwrap_err(),
            TableError::ColumnNotFound(columns::LAST_CHECK_IN.to_string())
        );
    }

    #[test]
    fn test_names_drop_fully_missing_rows_and_trim() {
        let table = name_table(vec![
            (Some("Bob"), Some("Zeta")),
            (None, None),
            (Some(""), Some("Young")),
            (Some("Ann"), Some("Adams")),
        ]);
        let names = alphabetic_customer_names(&table).unwrap();
        assert_eq!(names, vec!["Ann Adams", "Bob Zeta", "Young"]);
    }

    #[test]
    fn test_names_with_one_part_missing_are_kept() {
        let table = name_table(vec![(Some("Ann"), None), (None, Some("Zeta"))]);
        let names = alphabetic_customer_names(&table).unwrap();
        assert_eq!(names, vec!["Ann", "Zeta"]);
    }

    #[test]
    fn test_name_sort_is_ordinal_and_case_sensitive() {
        let table = name_table(vec![
            (Some("ann"), Some("adams")),
            (Some("Bob"), Some("Zeta")),
            (Some("Ann"), Some("Adams")),
        ]);
        let names = alphabetic_customer_names(&table).unwrap();
        // Uppercase sorts before lowercase under byte-wise ordering.
        assert_eq!(names, vec!["Ann Adams", "Bob Zeta", "ann adams"]);
    }

    #[test]
    fn test_jobs_drop_missing_then_sort() {
        let table = RecordTable::new(
            vec![columns::JOB.to_string()],
            vec![
                vec![Cell::from("Nurse")],
                vec![Cell::Missing],
                vec![Cell::from("Analyst")],
            ],
        );
        let jobs = alphabetic_jobs(&table).unwrap();
        assert_eq!(jobs, vec!["Analyst", "Nurse"]);
    }

    #[test]
    fn test_jobs_require_the_column() {
        let table = RecordTable::new(vec!["City".into()], vec![]);
        assert_eq!(
            alphabetic_jobs(&table).unwrap_err(),
            TableError::ColumnNotFound(columns::JOB.to_string())
        );
    }
}
