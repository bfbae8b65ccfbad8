use anyhow::Result;
use custscan::{
    load, shell,
    validate::{check_required_items, RequiredFields},
};
use std::io;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Diagnostics go to stderr; stdout carries query results only.
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();
    info!("startup");

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    // ─── 2) resolve input file & load ────────────────────────────────
    // First CLI argument if given, else prompt; a failed load logs its
    // reason and prompts again, so no caller ever sees an unset table.
    let mut arg_path = std::env::args().nth(1).map(PathBuf::from);
    let table = loop {
        let path = match arg_path.take() {
            Some(p) => p,
            None => match shell::prompt_line(
                &mut input,
                &mut stdout,
                "csv file path (empty to quit): ",
            )? {
                Some(line) => PathBuf::from(line),
                None => {
                    info!("no file selected; exit");
                    return Ok(());
                }
            },
        };
        match load::load_table(&path) {
            Ok(table) => {
                info!(rows = table.n_rows(), "loaded {}", path.display());
                break table;
            }
            Err(e) => error!("load failed: {e}"),
        }
    };

    // ─── 3) check required items ─────────────────────────────────────
    let report = check_required_items(&table, &RequiredFields::default())?;
    report.log();

    // ─── 4) query menu ───────────────────────────────────────────────
    shell::run(&table, &mut input, &mut stdout)?;

    info!("done");
    Ok(())
}
