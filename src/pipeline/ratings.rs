// src/pipeline/ratings.rs
use crate::table::{Table, Value};
use anyhow::Result;
use tracing::info;

/// The five rating columns coerced to nullable integers. Fixed and known in
/// advance; the pipeline does not infer rating-like columns.
pub const RATING_COLUMNS: [&str; 5] = [
    "seat_comfort",
    "cabin_staff_service",
    "food_and_beverages",
    "wifi_and_connectivity",
    "value_for_money",
];

/// Coerce every rating column to integer-or-null. Numeric strings are
/// truncated to integers; empty, non-numeric, and null cells become null.
/// Null stays distinguishable from `Int(0)` downstream.
pub fn clean_ratings(mut table: Table) -> Result<Table> {
    for name in RATING_COLUMNS {
        let col = table.column_mut(name)?;
        for cell in col.cells.iter_mut() {
            *cell = match cell {
                Value::Str(s) => coerce(s),
                Value::Int(n) => Value::Int(*n),
                _ => Value::Null,
            };
        }
    }
    info!("cleaned all rating columns");
    Ok(table)
}

fn coerce(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Value::Int(n.trunc() as i64),
        _ => Value::Null,
    }
}
