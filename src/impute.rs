//! Missing-value imputation.
//!
//! Strategies operate on one column at a time, in plan order, against the
//! table as it stands at this stage (medians are computed after upstream
//! filters, not over the original file).

use anyhow::{Context, Result, anyhow};

use crate::{
    data::{Value, parse_typed_value},
    error::CleanseError,
    schema::ColumnType,
    table::Table,
};

#[derive(Debug, Clone)]
pub enum ImputeStrategy {
    /// Replace missing cells with the median of the column's present values.
    Median,
    /// Replace missing cells with a fixed literal, parsed to the column type.
    Constant(&'static str),
}

#[derive(Debug, Clone)]
pub struct Imputation {
    pub column: &'static str,
    pub strategy: ImputeStrategy,
}

/// Fills missing cells in `column`, returning how many were replaced.
pub fn impute(table: &mut Table, column: &str, strategy: &ImputeStrategy) -> Result<usize> {
    let idx = table
        .column_index(column)
        .ok_or_else(|| anyhow!("Imputation column '{column}' not found"))?;

    let replacement = match strategy {
        ImputeStrategy::Median => {
            let datatype = table.schema.columns[idx].datatype.clone();
            median_value(table, idx, column, &datatype)?
        }
        ImputeStrategy::Constant(literal) => {
            let datatype = &table.schema.columns[idx].datatype;
            parse_typed_value(literal, datatype)
                .with_context(|| format!("Constant for column '{column}'"))?
                .ok_or_else(|| anyhow!("Constant for column '{column}' is empty"))?
        }
    };

    let mut replaced = 0usize;
    for row in &mut table.rows {
        if let Some(cell) = row.get_mut(idx)
            && cell.is_none()
        {
            *cell = Some(replacement.clone());
            replaced += 1;
        }
    }
    Ok(replaced)
}

fn median_value(table: &Table, idx: usize, column: &str, datatype: &ColumnType) -> Result<Value> {
    let mut population: Vec<f64> = table
        .rows
        .iter()
        .filter_map(|row| row.get(idx).and_then(|cell| cell.as_ref()))
        .filter_map(Value::as_f64)
        .filter(|value| value.is_finite())
        .collect();
    if population.is_empty() {
        return Err(CleanseError::EmptyMedian {
            column: column.to_string(),
        }
        .into());
    }
    population.sort_by(|a, b| a.total_cmp(b));
    let mid = population.len() / 2;
    let median = if population.len() % 2 == 0 {
        (population[mid - 1] + population[mid]) / 2.0
    } else {
        population[mid]
    };

    Ok(match datatype {
        ColumnType::Integer if median.fract() == 0.0 => Value::Integer(median as i64),
        _ => Value::Float(median),
    })
}
