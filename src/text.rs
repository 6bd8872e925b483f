//! Text field normalization: trim, then title-case.
//!
//! Title case here means: split on Unicode whitespace, uppercase the first
//! character of each word, lowercase the rest. Hyphenated words count as a
//! single word (`"re-sale"` becomes `"Re-sale"`). Missing cells and
//! non-string cells pass through untouched.

use std::borrow::Cow;

use log::debug;

use crate::{data::Value, table::Table};

/// Trims leading/trailing whitespace while borrowing the original when unchanged.
pub fn trim(input: &str) -> Cow<'_, str> {
    let trimmed = input.trim();
    if trimmed.len() == input.len() {
        Cow::Borrowed(input)
    } else {
        Cow::Borrowed(trimmed)
    }
}

/// Title-cases whitespace-delimited words, reusing the input when already cased.
pub fn title_case(input: &str) -> Cow<'_, str> {
    let mut result = String::with_capacity(input.len());
    let mut at_word_start = true;
    for ch in input.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            result.push(ch);
        } else if at_word_start {
            at_word_start = false;
            result.extend(ch.to_uppercase());
        } else {
            result.extend(ch.to_lowercase());
        }
    }
    if result == input {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(result)
    }
}

/// Applies trim + title-case to every present cell of the listed string
/// columns. Returns the number of cells that changed.
pub fn normalize_text_columns(table: &mut Table, columns: &[&str]) -> usize {
    let mut indexes = Vec::with_capacity(columns.len());
    for column in columns {
        match table.column_index(column) {
            Some(idx) => indexes.push(idx),
            None => debug!("Text column '{column}' not present; skipping"),
        }
    }

    let mut changed = 0usize;
    for row in &mut table.rows {
        for idx in &indexes {
            if let Some(Some(Value::String(text))) = row.get_mut(*idx) {
                let trimmed = trim(text);
                let normalized = title_case(trimmed.as_ref());
                let replacement = if normalized.as_ref() != text.as_str() {
                    Some(normalized.into_owned())
                } else {
                    None
                };
                if let Some(value) = replacement {
                    *text = value;
                    changed += 1;
                }
            }
        }
    }
    changed
}
