// src/pipeline/text.rs
use crate::table::{Column, Table, Value};
use anyhow::Result;
use tracing::info;

const VERIFIED_MARKER: &str = "trip verified";

/// Strip enclosing parentheses out of `nationality` and trim whitespace.
/// Values without parentheses pass through trimmed only; idempotent.
pub fn clean_nationality(mut table: Table) -> Result<Table> {
    let col = table.column_mut("nationality")?;
    for cell in col.cells.iter_mut() {
        if let Value::Str(raw) = cell {
            let cleaned = raw.replace(['(', ')'], "");
            *cell = Value::Str(cleaned.trim().to_string());
        }
    }
    info!("cleaned nationality column");
    Ok(table)
}

/// Derive a boolean `verify` column from the review body: true iff the text
/// contains "trip verified" case-insensitively, false for null cells. The
/// new column lands immediately after `review_body`; a pre-existing `verify`
/// column is replaced, not duplicated.
pub fn extract_verify_flag(mut table: Table) -> Result<Table> {
    let body = table.column("review_body")?;
    let flags: Vec<Value> = body
        .cells
        .iter()
        .map(|cell| match cell {
            Value::Str(s) => Value::Bool(s.to_lowercase().contains(VERIFIED_MARKER)),
            _ => Value::Bool(false),
        })
        .collect();

    let verified = flags.iter().filter(|v| **v == Value::Bool(true)).count();
    table.insert_after("review_body", Column::new("verify", flags))?;

    info!(verified, "created verify column");
    Ok(table)
}

/// For rows flagged `verify = true`, drop the verification marker prefix:
/// split the body on the first `|` and keep the trimmed second segment. A
/// flagged row without a `|` yields a null cell. Unflagged rows are left
/// untouched.
pub fn clean_review_body(mut table: Table) -> Result<Table> {
    let flags: Vec<bool> = table
        .column("verify")?
        .cells
        .iter()
        .map(|v| *v == Value::Bool(true))
        .collect();

    let col = table.column_mut("review_body")?;
    for (cell, flagged) in col.cells.iter_mut().zip(flags) {
        if !flagged {
            continue;
        }
        if let Value::Str(raw) = cell {
            *cell = match raw.split_once('|') {
                Some((_, body)) => Value::Str(body.trim().to_string()),
                None => Value::Null,
            };
        }
    }
    info!("cleaned review_body column");
    Ok(table)
}

/// Coerce `recommended` to boolean: true iff the text contains "yes"
/// case-insensitively, false for null cells.
pub fn clean_recommended(mut table: Table) -> Result<Table> {
    let col = table.column_mut("recommended")?;
    for cell in col.cells.iter_mut() {
        let recommended = match cell {
            Value::Str(s) => s.to_lowercase().contains("yes"),
            _ => false,
        };
        *cell = Value::Bool(recommended);
    }

    let positive = col
        .cells
        .iter()
        .filter(|v| **v == Value::Bool(true))
        .count();
    info!(positive, "converted recommended column to boolean");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(values: &[&str]) -> Vec<Value> {
        values.iter().map(|v| Value::Str(v.to_string())).collect()
    }

    fn single_column(name: &str, cells: Vec<Value>) -> Table {
        Table::new(vec![Column::new(name, cells)])
    }

    #[test]
    fn nationality_cleaning_is_idempotent() {
        let cases = ["United Kingdom", "(United Kingdom)", "  (France) "];
        let once = clean_nationality(single_column("nationality", strs(&cases))).unwrap();
        let twice = clean_nationality(once.clone()).unwrap();
        assert_eq!(once, twice);
        assert_eq!(
            once.column("nationality").unwrap().cells,
            strs(&["United Kingdom", "United Kingdom", "France"])
        );
    }

    #[test]
    fn verify_matches_marker_case_insensitively() {
        let t = extract_verify_flag(single_column(
            "review_body",
            vec![
                Value::Str("Trip Verified | Great service".into()),
                Value::Str("Not Verified | Good flight".into()),
                Value::Str("TRIP VERIFIED no delimiter".into()),
                Value::Null,
            ],
        ))
        .unwrap();
        assert_eq!(
            t.column("verify").unwrap().cells,
            vec![
                Value::Bool(true),
                Value::Bool(false),
                Value::Bool(true),
                Value::Bool(false),
            ]
        );
    }

    #[test]
    fn verify_column_is_replaced_not_duplicated() {
        let t = Table::new(vec![
            Column::new("review_body", strs(&["Trip Verified | ok"])),
            Column::new("verify", vec![Value::Str("stale".into())]),
        ]);
        let t = extract_verify_flag(t).unwrap();
        assert_eq!(t.header(), vec!["review_body", "verify"]);
        assert_eq!(t.column("verify").unwrap().cells, vec![Value::Bool(true)]);
    }

    #[test]
    fn verify_needs_the_review_body_anchor() {
        let err = extract_verify_flag(single_column("review_body_raw", Vec::new())).unwrap_err();
        assert!(err.to_string().contains("review_body"));
    }

    #[test]
    fn flagged_bodies_keep_text_after_first_pipe() {
        let t = Table::new(vec![
            Column::new(
                "review_body",
                strs(&[
                    "Trip Verified |  Great service all round ",
                    "Not Verified | untouched",
                    "Trip Verified no delimiter here",
                ]),
            ),
            Column::new(
                "verify",
                vec![Value::Bool(true), Value::Bool(false), Value::Bool(true)],
            ),
        ]);
        let t = clean_review_body(t).unwrap();
        let cells = &t.column("review_body").unwrap().cells;
        assert_eq!(cells[0], Value::Str("Great service all round".into()));
        assert_eq!(cells[1], Value::Str("Not Verified | untouched".into()));
        // flagged row with no delimiter: documented absent-cell edge case
        assert_eq!(cells[2], Value::Null);
    }

    #[test]
    fn recommended_coerces_yes_and_null() {
        let t = clean_recommended(single_column(
            "recommended",
            vec![
                Value::Str("yes".into()),
                Value::Str("Yes".into()),
                Value::Str("no".into()),
                Value::Null,
            ],
        ))
        .unwrap();
        assert_eq!(
            t.column("recommended").unwrap().cells,
            vec![
                Value::Bool(true),
                Value::Bool(true),
                Value::Bool(false),
                Value::Bool(false),
            ]
        );
    }
}
