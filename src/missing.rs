//! Missing-value diagnostics and the required-field row filter.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;

use crate::table::Table;

/// Per-column missing cell counts in column order; purely diagnostic.
#[derive(Debug, Serialize)]
pub struct MissingReport {
    pub rows: usize,
    pub columns: Vec<MissingColumn>,
}

#[derive(Debug, Serialize)]
pub struct MissingColumn {
    pub name: String,
    pub missing: usize,
    pub percent: f64,
}

impl MissingReport {
    pub fn of(table: &Table) -> Self {
        let rows = table.len();
        let columns = table
            .schema
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let missing = table
                    .rows
                    .iter()
                    .filter(|row| row.get(idx).is_none_or(Option::is_none))
                    .count();
                let percent = if rows == 0 {
                    0.0
                } else {
                    missing as f64 * 100.0 / rows as f64
                };
                MissingColumn {
                    name: column.name.clone(),
                    missing,
                    percent,
                }
            })
            .collect();
        MissingReport { rows, columns }
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Creating report file {path:?}"))?;
        serde_json::to_writer_pretty(file, self).context("Writing missing-value report JSON")
    }

    pub fn render_rows(&self) -> Vec<Vec<String>> {
        self.columns
            .iter()
            .map(|column| {
                vec![
                    column.name.clone(),
                    column.missing.to_string(),
                    format!("{:.1}", column.percent),
                ]
            })
            .collect()
    }
}

/// Flat name → count mapping for log-line consumers.
pub fn missing_counts(table: &Table) -> BTreeMap<String, usize> {
    MissingReport::of(table)
        .columns
        .into_iter()
        .map(|column| (column.name, column.missing))
        .collect()
}

/// Drops every row whose `column` cell is missing. One-way; dropped rows
/// are not recoverable downstream.
pub fn drop_missing(mut table: Table, column: &str) -> Result<Table> {
    let idx = table
        .column_index(column)
        .ok_or_else(|| anyhow!("Required column '{column}' not found"))?;
    table
        .rows
        .retain(|row| row.get(idx).is_some_and(Option::is_some));
    Ok(table)
}
