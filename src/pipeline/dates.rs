// src/pipeline/dates.rs
use crate::table::{Table, TableError, Value};
use anyhow::Result;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

/// `19th` -> `19`, `1st` -> `1`. Only suffixes directly after a digit run.
static ORDINAL_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)(st|nd|rd|th)").unwrap());

const ISO_DATE: &str = "%Y-%m-%d";

/// Reparse `date_submitted` from `"<day><suffix> <Month> <Year>"` (e.g.
/// `"19th March 2025"`) into ISO `YYYY-MM-DD`. Unparseable non-null values
/// are fatal; null cells pass through.
pub fn clean_date_submitted(mut table: Table) -> Result<Table> {
    let col = table.column_mut("date_submitted")?;
    let column = col.name.clone();
    for (row, cell) in col.cells.iter_mut().enumerate() {
        if let Value::Str(raw) = cell {
            let stripped = ORDINAL_SUFFIX.replace_all(raw, "$1");
            let date = NaiveDate::parse_from_str(stripped.trim(), "%d %B %Y").map_err(|_| {
                TableError::Parse {
                    column: column.clone(),
                    row,
                    value: raw.clone(),
                    expected: "day month-name year",
                }
            })?;
            *cell = Value::Str(date.format(ISO_DATE).to_string());
        }
    }
    info!("cleaned date_submitted column");
    Ok(table)
}

/// Reparse `date_flown` from `"<Month> <Year>"` into ISO `YYYY-MM-DD`,
/// defaulting the day to 1 since none is provided.
pub fn clean_date_flown(mut table: Table) -> Result<Table> {
    let col = table.column_mut("date_flown")?;
    let column = col.name.clone();
    for (row, cell) in col.cells.iter_mut().enumerate() {
        if let Value::Str(raw) = cell {
            let with_day = format!("1 {}", raw.trim());
            let date = NaiveDate::parse_from_str(&with_day, "%d %B %Y").map_err(|_| {
                TableError::Parse {
                    column: column.clone(),
                    row,
                    value: raw.clone(),
                    expected: "month-name year",
                }
            })?;
            *cell = Value::Str(date.format(ISO_DATE).to_string());
        }
    }
    info!("cleaned date_flown column");
    Ok(table)
}
