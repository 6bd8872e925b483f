//! Column metadata and best-effort type inference.
//!
//! Types are inferred by elimination: every column starts as a candidate for
//! every non-string type, and each non-empty cell removes the types it fails
//! to parse as. Columns with no observed values stay `String` so constant
//! imputation can still populate them.

use crate::data::parse_naive_date;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    String,
    Integer,
    Float,
    Date,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMeta {
    pub name: String,
    pub datatype: ColumnType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub columns: Vec<ColumnMeta>,
}

impl Schema {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

#[derive(Debug, Clone)]
struct TypeCandidate {
    possible_integer: bool,
    possible_float: bool,
    possible_date: bool,
    saw_value: bool,
}

impl TypeCandidate {
    fn new() -> Self {
        Self {
            possible_integer: true,
            possible_float: true,
            possible_date: true,
            saw_value: false,
        }
    }

    fn observe(&mut self, field: &str) {
        self.saw_value = true;
        if self.possible_integer && field.parse::<i64>().is_err() {
            self.possible_integer = false;
        }
        if self.possible_float && field.parse::<f64>().is_err() {
            self.possible_float = false;
        }
        if self.possible_date && parse_naive_date(field).is_err() {
            self.possible_date = false;
        }
    }

    fn decide(&self) -> ColumnType {
        if !self.saw_value {
            ColumnType::String
        } else if self.possible_integer {
            ColumnType::Integer
        } else if self.possible_float {
            ColumnType::Float
        } else if self.possible_date {
            ColumnType::Date
        } else {
            ColumnType::String
        }
    }
}

pub fn infer_schema(headers: &[String], records: &[Vec<String>]) -> Schema {
    let mut candidates = vec![TypeCandidate::new(); headers.len()];
    for record in records {
        for (idx, field) in record.iter().enumerate().take(candidates.len()) {
            if field.is_empty() {
                continue;
            }
            candidates[idx].observe(field);
        }
    }

    let columns = headers
        .iter()
        .zip(candidates.iter())
        .map(|(name, candidate)| ColumnMeta {
            name: name.clone(),
            datatype: candidate.decide(),
        })
        .collect();
    Schema { columns }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn infers_integer_float_date_and_string() {
        let schema = infer_schema(
            &headers(&["price", "acres", "sold", "owner"]),
            &rows(&[
                &["235000", "2.3", "2013-04-09", "jane doe"],
                &["132000", "3", "2014-06-10", "FRAZIER, CYRENTHA"],
            ]),
        );
        assert_eq!(schema.columns[0].datatype, ColumnType::Integer);
        assert_eq!(schema.columns[1].datatype, ColumnType::Float);
        assert_eq!(schema.columns[2].datatype, ColumnType::Date);
        assert_eq!(schema.columns[3].datatype, ColumnType::String);
    }

    #[test]
    fn mixed_numeric_column_widens_to_float() {
        let schema = infer_schema(&headers(&["n"]), &rows(&[&["1"], &["2.5"]]));
        assert_eq!(schema.columns[0].datatype, ColumnType::Float);
    }

    #[test]
    fn empty_cells_do_not_narrow_candidates() {
        let schema = infer_schema(&headers(&["n"]), &rows(&[&[""], &["7"]]));
        assert_eq!(schema.columns[0].datatype, ColumnType::Integer);
    }

    #[test]
    fn all_missing_column_defaults_to_string() {
        let schema = infer_schema(&headers(&["owner"]), &rows(&[&[""], &[""]]));
        assert_eq!(schema.columns[0].datatype, ColumnType::String);
    }

    #[test]
    fn column_index_finds_by_name() {
        let schema = infer_schema(&headers(&["a", "b"]), &rows(&[&["1", "x"]]));
        assert_eq!(schema.column_index("b"), Some(1));
        assert_eq!(schema.column_index("missing"), None);
    }
}
