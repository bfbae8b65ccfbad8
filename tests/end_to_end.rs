use anyhow::Result;
use chrono::NaiveDate;
use custscan::{
    load, query,
    validate::{check_required_items, RequiredFields},
};
use std::io::Write;
use tempfile::NamedTempFile;

const SAMPLE: &str = "\
First Name,Last Name,Street,Zip,City,Last Check-In Date,Company,Job
Ann,Adams,Main St 1,10115,Berlin,2021-01-01,Acme,Nurse
Bob,Zeta,Main St 2,10117,Berlin,2022-06-15,Acme,Analyst
Cid,Young,Main St 3,28001,,2020-03-03,Initech,Clerk
Dee,Quill,Main St 4,28002,Madrid,invalid,Initech,Nurse
Eve,Stone,Main St 5,75001,Paris,2022-06-15,Globex,Analyst
";

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn test_load_validate_and_query_a_real_file() -> Result<()> {
    let mut tmp = NamedTempFile::new()?;
    tmp.write_all(SAMPLE.as_bytes())?;

    let table = load::load_table(tmp.path())?;
    assert_eq!(table.n_rows(), 5);

    // Exactly one missing City, nothing else missing.
    let report = check_required_items(&table, &RequiredFields::default())?;
    assert_eq!(report.missing_in("City"), Some(1));
    for column in ["Street", "Zip", "Last Check-In Date", "Company"] {
        assert_eq!(report.missing_in(column), Some(0), "column {column}");
    }

    // Earliest is the single 2020-03-03 row; the unparseable row is skipped.
    let earliest = query::earliest_checkin(&table)?.unwrap();
    assert_eq!(earliest.date, d(2020, 3, 3));
    assert_eq!(earliest.rows, vec![2]);

    // Latest is a tie; both rows come back, in row order.
    let latest = query::latest_checkin(&table)?.unwrap();
    assert_eq!(latest.date, d(2022, 6, 15));
    assert_eq!(latest.rows, vec![1, 4]);

    // Queries after the load-time coercion agree with themselves.
    assert_eq!(query::earliest_checkin(&table)?.unwrap().rows, vec![2]);

    let names = query::alphabetic_customer_names(&table)?;
    assert_eq!(
        names,
        vec!["Ann Adams", "Bob Zeta", "Cid Young", "Dee Quill", "Eve Stone"]
    );

    let jobs = query::alphabetic_jobs(&table)?;
    assert_eq!(jobs, vec!["Analyst", "Analyst", "Clerk", "Nurse", "Nurse"]);

    Ok(())
}
