// src/check/mod.rs
//
// Post-run audit of the cleaned table: fixed cardinality regressions on the
// categorical columns, plus a structured summary of the route fields.

use crate::table::{Table, Value};
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CheckError {
    #[error("column `{column}`: expected {expected} distinct values, found {actual}")]
    Cardinality {
        column: String,
        expected: usize,
        actual: usize,
    },
    #[error("column `{column}`: {count} malformed route values")]
    InvalidRouteField { column: String, count: usize },
}

/// Distinct-value counts pinned against the reference dataset. Null counts
/// as its own category where it occurs.
pub const EXPECTED_CARDINALITIES: [(&str, usize); 8] = [
    ("seat_type", 4),
    ("type_of_traveller", 5),
    ("seat_comfort", 6),
    ("cabin_staff_service", 6),
    ("food_and_beverages", 6),
    ("wifi_and_connectivity", 6),
    ("value_for_money", 5),
    ("recommended", 2),
];

static IATA_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{3}$").unwrap());

const AIRPORT_COLUMNS: [&str; 3] = ["origin_airport", "destination_airport", "transit_airport"];
const CITY_COLUMNS: [&str; 3] = ["origin_city", "destination_city", "transit_city"];

/// Per-column tally of route-field validation.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RouteFieldSummary {
    pub column: String,
    pub present: usize,
    pub absent: usize,
    pub invalid: usize,
}

impl RouteFieldSummary {
    fn new(column: &str) -> Self {
        Self {
            column: column.to_string(),
            present: 0,
            absent: 0,
            invalid: 0,
        }
    }
}

/// Assert the pinned distinct-value counts on the cleaned table.
pub fn check_cardinalities(table: &Table) -> Result<()> {
    for (column, expected) in EXPECTED_CARDINALITIES {
        let actual = table.distinct_count(column)?;
        if actual != expected {
            return Err(CheckError::Cardinality {
                column: column.to_string(),
                expected,
                actual,
            }
            .into());
        }
        info!(column, distinct = actual, "cardinality ok");
    }
    Ok(())
}

/// Tally route columns present in the table. Airport values must be absent
/// or a 3-letter uppercase IATA code; city values must be absent or text
/// that is not shaped like an IATA code. Columns missing from the file are
/// skipped rather than reported.
pub fn summarize_route_fields(table: &Table) -> Vec<RouteFieldSummary> {
    let mut summaries = Vec::new();
    for column in AIRPORT_COLUMNS {
        if let Some(summary) = tally(table, column, |s| IATA_CODE.is_match(s)) {
            summaries.push(summary);
        }
    }
    for column in CITY_COLUMNS {
        if let Some(summary) = tally(table, column, |s| !IATA_CODE.is_match(s)) {
            summaries.push(summary);
        }
    }
    summaries
}

fn tally(table: &Table, column: &str, valid: impl Fn(&str) -> bool) -> Option<RouteFieldSummary> {
    let col = table.column(column).ok()?;
    let mut summary = RouteFieldSummary::new(column);
    for cell in &col.cells {
        match cell {
            Value::Null => summary.absent += 1,
            Value::Str(s) if s.trim().is_empty() => summary.absent += 1,
            Value::Str(s) if valid(s.trim()) => summary.present += 1,
            other => {
                warn!(column, value = %other, "malformed route value");
                summary.invalid += 1;
            }
        }
    }
    Some(summary)
}

/// Full audit: cardinalities plus route fields. Returns the route summary
/// for reporting; any malformed route value or cardinality regression is an
/// error.
pub fn run(table: &Table) -> Result<Vec<RouteFieldSummary>> {
    check_cardinalities(table)?;
    let summaries = summarize_route_fields(table);
    for summary in &summaries {
        if summary.invalid > 0 {
            return Err(CheckError::InvalidRouteField {
                column: summary.column.clone(),
                count: summary.invalid,
            }
            .into());
        }
    }
    info!(route_columns = summaries.len(), "route fields ok");
    Ok(summaries)
}
