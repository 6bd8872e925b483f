use std::fmt;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;

use crate::schema::ColumnType;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
}

impl Value {
    pub fn as_display(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => {
                if f.fract() == 0.0 && f.is_finite() {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }

    /// Numeric view of a cell; `None` for non-numeric variants.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

pub fn parse_naive_date(value: &str) -> Result<NaiveDate> {
    const DATE_FORMATS: &[&str] = &[
        "%Y-%m-%d",
        "%d/%m/%Y",
        "%m/%d/%Y",
        "%Y/%m/%d",
        "%d-%m-%Y",
        "%B %d, %Y",
    ];
    for fmt in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, fmt) {
            return Ok(parsed);
        }
    }
    Err(anyhow!("Failed to parse '{value}' as date"))
}

/// Parses a raw field into a typed cell. Empty fields are missing values.
pub fn parse_typed_value(value: &str, ty: &ColumnType) -> Result<Option<Value>> {
    if value.is_empty() {
        return Ok(None);
    }
    let parsed = match ty {
        ColumnType::String => Value::String(value.to_string()),
        ColumnType::Integer => {
            let parsed: i64 = value
                .parse()
                .with_context(|| format!("Failed to parse '{value}' as integer"))?;
            Value::Integer(parsed)
        }
        ColumnType::Float => {
            let parsed: f64 = value
                .parse()
                .with_context(|| format!("Failed to parse '{value}' as float"))?;
            Value::Float(parsed)
        }
        ColumnType::Date => {
            let parsed = parse_naive_date(value)?;
            Value::Date(parsed)
        }
    };
    Ok(Some(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parse_naive_date_supports_multiple_formats() {
        let expected = NaiveDate::from_ymd_opt(2013, 4, 9).unwrap();
        assert_eq!(parse_naive_date("2013-04-09").unwrap(), expected);
        assert_eq!(parse_naive_date("09/04/2013").unwrap(), expected);
        assert_eq!(parse_naive_date("2013/04/09").unwrap(), expected);
        assert_eq!(parse_naive_date("April 9, 2013").unwrap(), expected);
        assert!(parse_naive_date("not a date").is_err());
    }

    #[test]
    fn parse_typed_value_treats_empty_as_missing() {
        assert_eq!(parse_typed_value("", &ColumnType::Float).unwrap(), None);
        assert_eq!(parse_typed_value("", &ColumnType::String).unwrap(), None);
    }

    #[test]
    fn parse_typed_value_handles_numerics() {
        assert_eq!(
            parse_typed_value("235000", &ColumnType::Integer)
                .unwrap()
                .unwrap(),
            Value::Integer(235000)
        );
        assert_eq!(
            parse_typed_value("2.3", &ColumnType::Float).unwrap().unwrap(),
            Value::Float(2.3)
        );
        assert!(parse_typed_value("abc", &ColumnType::Integer).is_err());
    }

    #[test]
    fn parse_typed_value_accepts_non_finite_floats() {
        let nan = parse_typed_value("NaN", &ColumnType::Float).unwrap().unwrap();
        assert!(matches!(nan, Value::Float(f) if f.is_nan()));
        let inf = parse_typed_value("inf", &ColumnType::Float).unwrap().unwrap();
        assert!(matches!(inf, Value::Float(f) if f.is_infinite()));
    }

    #[test]
    fn as_display_preserves_integral_floats_without_fraction() {
        assert_eq!(Value::Float(1.0).as_display(), "1");
        assert_eq!(Value::Float(1.25).as_display(), "1.25");
        assert_eq!(Value::Integer(42).as_display(), "42");
    }

    #[test]
    fn as_f64_covers_numeric_variants_only() {
        assert_eq!(Value::Integer(3).as_f64(), Some(3.0));
        assert_eq!(Value::Float(0.5).as_f64(), Some(0.5));
        assert_eq!(Value::String("3".into()).as_f64(), None);
    }
}
