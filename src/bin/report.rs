//! One-shot, non-interactive report: load a customer CSV, log the
//! required-field null report, and print all four query results.

use anyhow::{bail, Context, Result};
use custscan::{
    load, query, shell,
    validate::{check_required_items, RequiredFields},
};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = std::env::args().nth(1).map(PathBuf::from) else {
        bail!("usage: report <file.csv>");
    };

    let table = load::load_table(&path)
        .with_context(|| format!("loading {}", path.display()))?;

    let report = check_required_items(&table, &RequiredFields::default())
        .context("checking required fields")?;
    report.log();

    let earliest = query::earliest_checkin(&table)?;
    println!("{}", shell::render_checkin(&table, "earliest", earliest.as_ref()));
    let latest = query::latest_checkin(&table)?;
    println!("{}", shell::render_checkin(&table, "latest", latest.as_ref()));

    let names = query::alphabetic_customer_names(&table)?;
    println!("{}", shell::render_list("Full Name", &names));
    let jobs = query::alphabetic_jobs(&table)?;
    println!("{}", shell::render_list("Job", &jobs));

    Ok(())
}
