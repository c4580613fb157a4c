// src/pipeline/mod.rs
//
// The cleaning pipeline: an ordered list of pure transforms, each taking a
// table and returning a new one. Stage N's output is stage N+1's input; no
// stage may add or remove rows.

pub mod dates;
pub mod ratings;
pub mod rename;
pub mod text;

use crate::table::Table;
use anyhow::{ensure, Context, Result};
use tracing::info;

type Stage = fn(Table) -> Result<Table>;

const STAGES: &[(&str, Stage)] = &[
    ("rename_columns", rename::rename_columns),
    ("clean_date_submitted", dates::clean_date_submitted),
    ("clean_nationality", text::clean_nationality),
    ("extract_verify_flag", text::extract_verify_flag),
    ("clean_review_body", text::clean_review_body),
    ("clean_date_flown", dates::clean_date_flown),
    ("clean_recommended", text::clean_recommended),
    ("clean_ratings", ratings::clean_ratings),
];

/// Run every cleaning stage in order over `table`.
#[tracing::instrument(level = "info", skip(table), fields(rows = table.height()))]
pub fn run(mut table: Table) -> Result<Table> {
    for (name, stage) in STAGES {
        let rows_before = table.height();
        table = stage(table).with_context(|| format!("stage `{name}` failed"))?;
        ensure!(
            table.height() == rows_before,
            "stage `{name}` changed row count: {rows_before} -> {}",
            table.height()
        );
        info!(
            stage = name,
            rows = table.height(),
            cols = table.width(),
            "stage complete"
        );
    }
    Ok(table)
}
