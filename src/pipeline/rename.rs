// src/pipeline/rename.rs
use crate::table::Table;
use anyhow::Result;
use tracing::info;

/// Normalize every column name to snake_case, then apply the fixed renames
/// `date` -> `date_submitted` and `country` -> `nationality`. The generic
/// pass runs first; the fixed renames target already-normalized names.
pub fn rename_columns(mut table: Table) -> Result<Table> {
    for col in table.columns_mut() {
        let name = col.name.trim().to_lowercase().replace(' ', "_");
        col.name = name.replace('&', "and").replace('-', "_");
    }
    table.rename("date", "date_submitted");
    table.rename("country", "nationality");

    info!(columns = ?table.header(), "renamed columns");
    Ok(table)
}
