//! Row filters over numeric columns: finiteness and a fixed upper bound.
//!
//! The bound is a configured constant, not a computed statistic. That is a
//! deliberate simplification of outlier removal, not an approximation of
//! one.

use anyhow::{Result, anyhow};

use crate::{data::Value, table::Table};

/// Keeps only rows where every listed column is present and finite.
pub fn retain_finite(mut table: Table, columns: &[&str]) -> Result<Table> {
    let indexes = resolve_columns(&table, columns)?;
    table.rows.retain(|row| {
        indexes.iter().all(|idx| {
            row.get(*idx)
                .and_then(|cell| cell.as_ref())
                .and_then(Value::as_f64)
                .is_some_and(f64::is_finite)
        })
    });
    Ok(table)
}

/// Keeps only rows where `column` is strictly below `bound`.
pub fn retain_below(mut table: Table, column: &str, bound: f64) -> Result<Table> {
    let idx = table
        .column_index(column)
        .ok_or_else(|| anyhow!("Filter column '{column}' not found"))?;
    table.rows.retain(|row| {
        row.get(idx)
            .and_then(|cell| cell.as_ref())
            .and_then(Value::as_f64)
            .is_some_and(|value| value < bound)
    });
    Ok(table)
}

fn resolve_columns(table: &Table, columns: &[&str]) -> Result<Vec<usize>> {
    columns
        .iter()
        .map(|column| {
            table
                .column_index(column)
                .ok_or_else(|| anyhow!("Filter column '{column}' not found"))
        })
        .collect()
}
