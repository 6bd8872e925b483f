//! Header normalization.
//!
//! Every column name collapses to `lowercase_snake_case` with punctuation
//! stripped and separator runs folded, so downstream stages can address
//! columns by a canonical identifier. Normalization is a fixed point:
//! applying it to an already-normalized header changes nothing.

use anyhow::Result;
use heck::ToSnakeCase;
use itertools::Itertools;

use crate::{error::CleanseError, schema::Schema};

pub fn normalize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    cleaned.to_snake_case()
}

/// Renames every column in place; distinct originals must stay distinct.
pub fn normalize_headers(schema: &mut Schema) -> Result<()> {
    let normalized: Vec<String> = schema
        .columns
        .iter()
        .map(|column| normalize_name(&column.name))
        .collect();

    if let Some(duplicate) = normalized.iter().duplicates().next() {
        let mut originals = schema
            .columns
            .iter()
            .zip(normalized.iter())
            .filter(|(_, name)| *name == duplicate)
            .map(|(column, _)| column.name.clone());
        let left = originals.next().unwrap_or_default();
        let right = originals.next().unwrap_or_default();
        return Err(CleanseError::NameCollision {
            left,
            right,
            normalized: duplicate.clone(),
        }
        .into());
    }

    for (column, name) in schema.columns.iter_mut().zip(normalized) {
        column.name = name;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnMeta, ColumnType};

    fn schema_of(names: &[&str]) -> Schema {
        Schema {
            columns: names
                .iter()
                .map(|name| ColumnMeta {
                    name: name.to_string(),
                    datatype: ColumnType::String,
                })
                .collect(),
        }
    }

    #[test]
    fn normalize_name_strips_punctuation_and_collapses_separators() {
        assert_eq!(normalize_name("Sale Price"), "sale_price");
        assert_eq!(normalize_name("SalePrice"), "sale_price");
        assert_eq!(normalize_name("  Owner--Name  "), "owner_name");
        assert_eq!(normalize_name("Tax District (2)"), "tax_district_2");
        assert_eq!(normalize_name("Acreage%"), "acreage");
    }

    #[test]
    fn normalize_name_is_idempotent() {
        for raw in ["Sale Price", "Property_City", "foundation type", "Lot #2"] {
            let once = normalize_name(raw);
            assert_eq!(normalize_name(&once), once);
        }
    }

    #[test]
    fn normalize_headers_renames_all_columns() {
        let mut schema = schema_of(&["Sale Price", "Owner Name", "Acreage"]);
        normalize_headers(&mut schema).expect("normalize");
        assert_eq!(
            schema.headers(),
            vec!["sale_price", "owner_name", "acreage"]
        );
    }

    #[test]
    fn normalize_headers_rejects_collisions() {
        let mut schema = schema_of(&["Sale Price", "sale_price"]);
        let err = normalize_headers(&mut schema).unwrap_err();
        assert!(err.to_string().contains("sale_price"));
        assert!(err.to_string().contains("collision") || err.to_string().contains("normalize"));
    }
}
