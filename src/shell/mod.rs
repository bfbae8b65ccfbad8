//! Interactive query menu. Generic over the input/output streams so the
//! loop is testable against in-memory buffers.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::error;

use crate::query::{self, CheckinHit};
use crate::table::RecordTable;

const MENU: &str = "\
1) earliest check-in
2) latest check-in
3) customer names (A-Z)
4) job titles (A-Z)
(empty line exits)";

/// Prompt-dispatch loop. Empty input or EOF ends it; anything that is not
/// one of the four choices re-prompts. Query failures (a column the file
/// does not have) are logged and the loop continues.
pub fn run<R: BufRead, W: Write>(table: &RecordTable, mut input: R, mut out: W) -> Result<()> {
    loop {
        writeln!(out, "{MENU}")?;
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let choice = line.trim();
        if choice.is_empty() {
            break;
        }

        let result = match choice {
            "1" => query::earliest_checkin(table)
                .map(|hit| render_checkin(table, "earliest", hit.as_ref())),
            "2" => query::latest_checkin(table)
                .map(|hit| render_checkin(table, "latest", hit.as_ref())),
            "3" => query::alphabetic_customer_names(table)
                .map(|names| render_list("Full Name", &names)),
            "4" => query::alphabetic_jobs(table).map(|jobs| render_list("Job", &jobs)),
            other => {
                writeln!(out, "invalid choice {other:?}; pick 1-4, empty line exits")?;
                continue;
            }
        };

        match result {
            Ok(text) => writeln!(out, "{text}")?,
            Err(e) => error!("query failed: {e}"),
        }
    }
    Ok(())
}

/// Render a check-in hit: a summary line plus the full matching rows.
pub fn render_checkin(table: &RecordTable, label: &str, hit: Option<&CheckinHit>) -> String {
    match hit {
        None => format!("no parseable check-in dates; {label} check-in is empty"),
        Some(hit) => {
            let mut text = format!(
                "{} check-in {} ({} row{}):\n",
                label,
                hit.date.format("%Y-%m-%d"),
                hit.rows.len(),
                if hit.rows.len() == 1 { "" } else { "s" },
            );
            text.push_str(&render_rows(table, &hit.rows));
            text
        }
    }
}

/// Render selected rows as aligned columns under the full header line.
pub fn render_rows(table: &RecordTable, rows: &[usize]) -> String {
    let mut widths: Vec<usize> = table.headers().iter().map(String::len).collect();
    for &r in rows {
        for (i, width) in widths.iter_mut().enumerate() {
            *width = (*width).max(table.cell(r, i).to_string().len());
        }
    }

    let mut out = String::new();
    for (i, header) in table.headers().iter().enumerate() {
        push_padded(&mut out, header, widths[i], i + 1 == widths.len());
    }
    out.push('\n');
    for &r in rows {
        for (i, width) in widths.iter().enumerate() {
            push_padded(&mut out, &table.cell(r, i).to_string(), *width, i + 1 == widths.len());
        }
        out.push('\n');
    }
    out
}

/// Render a single-column query result.
pub fn render_list(header: &str, values: &[String]) -> String {
    let mut out = String::with_capacity(values.len() * 16);
    out.push_str(header);
    out.push('\n');
    for value in values {
        out.push_str(value);
        out.push('\n');
    }
    out
}

fn push_padded(out: &mut String, value: &str, width: usize, last: bool) {
    out.push_str(value);
    if !last {
        for _ in value.len()..width {
            out.push(' ');
        }
        out.push_str("  ");
    }
}

/// Read one line from `input`, trimmed. `None` on EOF or empty input.
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let line = line.trim();
    if line.is_empty() {
        Ok(None)
    } else {
        Ok(Some(line.to_string()))
    }
}
