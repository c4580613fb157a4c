// src/table/mod.rs
use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::fmt;
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;

/// Errors raised by stages operating on a [`Table`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    #[error("column `{0}` not found in table")]
    MissingColumn(String),
    #[error("row {row}, column `{column}`: cannot parse {value:?} as {expected}")]
    Parse {
        column: String,
        row: usize,
        value: String,
        expected: &'static str,
    },
    #[error("anchor column `{0}` not found; refusing to insert derived column")]
    MissingAnchor(String),
}

/// A single cell. `Null` is the explicit absent marker and is distinct from
/// both `Int(0)` and the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Str(String),
    Int(i64),
    Bool(bool),
    Null,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// CSV field representation. `Null` serializes as the empty field.
    pub fn as_csv_field(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Int(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => String::new(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_csv_field())
    }
}

/// A named column of cells, aligned with its siblings by row index.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }
}

/// In-memory table: ordered named columns, each an ordered run of cells.
/// The sole data structure threaded through the cleaning pipeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }

    pub fn header(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Result<&Column, TableError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    pub fn column_mut(&mut self, name: &str) -> Result<&mut Column, TableError> {
        self.columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// Rename a column if present. Absent names are not an error; downstream
    /// stages fail with `MissingColumn` if a required one never materializes.
    pub fn rename(&mut self, from: &str, to: &str) {
        if let Some(col) = self.columns.iter_mut().find(|c| c.name == from) {
            col.name = to.to_string();
        }
    }

    /// Insert `column` immediately after the column named `anchor`. If a
    /// column with the same name already exists it is dropped first, so the
    /// insertion replaces rather than duplicates. The anchor is located by
    /// name, never by numeric position.
    pub fn insert_after(&mut self, anchor: &str, column: Column) -> Result<(), TableError> {
        self.columns.retain(|c| c.name != column.name);
        let idx = self
            .column_index(anchor)
            .ok_or_else(|| TableError::MissingAnchor(anchor.to_string()))?;
        self.columns.insert(idx + 1, column);
        Ok(())
    }

    /// Number of distinct cell values in a column. `Null` counts as one
    /// category of its own when it occurs.
    pub fn distinct_count(&self, name: &str) -> Result<usize, TableError> {
        let col = self.column(name)?;
        let mut seen: Vec<&Value> = Vec::new();
        for cell in &col.cells {
            if !seen.contains(&cell) {
                seen.push(cell);
            }
        }
        Ok(seen.len())
    }
}

/// Read a headered CSV file into a [`Table`] of string cells. Empty fields
/// load as `Null`. Ragged records are a fatal CSV error.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("failed to open CSV file: {}", path.display()))?;

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    let mut columns: Vec<Column> = headers
        .into_iter()
        .map(|name| Column::new(name, Vec::new()))
        .collect();

    for (idx, result) in rdr.records().enumerate() {
        let record =
            result.with_context(|| format!("CSV parse error in {} at record {}", path.display(), idx))?;
        for (col, field) in columns.iter_mut().zip(record.iter()) {
            let cell = if field.is_empty() {
                Value::Null
            } else {
                Value::Str(field.to_string())
            };
            col.cells.push(cell);
        }
    }

    let table = Table::new(columns);
    info!(
        rows = table.height(),
        cols = table.width(),
        path = %path.display(),
        "loaded table"
    );
    Ok(table)
}

/// Write a [`Table`] to a headered CSV file, no index column. The table is
/// serialized to a temp file in the destination directory and renamed into
/// place, so a failure mid-write never leaves partial output at `path`.
pub fn write_csv<P: AsRef<Path>>(path: P, table: &Table) -> Result<()> {
    let path = path.as_ref();
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let tmp = match dir {
        Some(dir) => NamedTempFile::new_in(dir),
        None => NamedTempFile::new_in("."),
    }
    .with_context(|| format!("failed to create temp file next to {}", path.display()))?;

    {
        let mut wtr = WriterBuilder::new().from_writer(tmp.as_file());
        wtr.write_record(table.header())?;
        for row in 0..table.height() {
            let record: Vec<String> = table
                .columns()
                .iter()
                .map(|c| c.cells[row].as_csv_field())
                .collect();
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
    }

    tmp.persist(path)
        .with_context(|| format!("failed to move output into place at {}", path.display()))?;
    info!(
        rows = table.height(),
        cols = table.width(),
        path = %path.display(),
        "wrote table"
    );
    Ok(())
}
