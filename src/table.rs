//! The in-memory table plus its load and persist stages.
//!
//! A [`Table`] is an ordered set of rows over a fixed [`Schema`]; a cell is
//! `Option<Value>` with `None` marking a missing value. The whole dataset is
//! held in memory for the duration of the run. Persisting writes to a `.tmp`
//! sibling and renames into place, so a failed run never leaves a partial
//! output file behind.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use log::debug;

use crate::{
    data::{Value, parse_typed_value},
    error::CleanseError,
    io_utils,
    schema::{Schema, infer_schema},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub schema: Schema,
    pub rows: Vec<Vec<Option<Value>>>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.schema.column_index(name)
    }

    /// Reads a delimited file with a header row into a typed table.
    pub fn load(path: &Path, delimiter: u8, encoding: &'static Encoding) -> Result<Self> {
        let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)
            .map_err(|err| load_error(path, &err))?;
        let headers =
            io_utils::reader_headers(&mut reader, encoding).map_err(|err| load_error(path, &err))?;

        let mut records: Vec<Vec<String>> = Vec::new();
        for (idx, result) in reader.into_byte_records().enumerate() {
            let record = result
                .with_context(|| format!("Reading row {}", idx + 2))
                .map_err(|err| load_error(path, &err))?;
            let decoded =
                io_utils::decode_record(&record, encoding).map_err(|err| load_error(path, &err))?;
            records.push(decoded);
        }

        let schema = infer_schema(&headers, &records);
        debug!(
            "Inferred {} column(s) over {} data row(s) from {:?}",
            schema.columns.len(),
            records.len(),
            path
        );

        let mut rows = Vec::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            let typed = parse_typed_row(&schema, record)
                .with_context(|| format!("Parsing row {}", idx + 2))?;
            rows.push(typed);
        }

        Ok(Table { schema, rows })
    }

    /// Serializes the table; `None` or `-` writes to stdout.
    pub fn write(&self, path: Option<&Path>, delimiter: u8) -> Result<()> {
        match path {
            Some(path) if !io_utils::is_dash(path) => {
                let staged = staging_path(path);
                self.write_records(
                    io_utils::open_file_writer(&staged).map_err(|err| write_error(path, &err))?,
                    delimiter,
                )
                .map_err(|err| write_error(path, &err))?;
                fs::rename(&staged, path)
                    .with_context(|| format!("Persisting {staged:?}"))
                    .map_err(|err| write_error(path, &err))?;
                Ok(())
            }
            _ => self.write_records(Box::new(std::io::stdout()), delimiter),
        }
    }

    fn write_records(&self, sink: Box<dyn std::io::Write>, delimiter: u8) -> Result<()> {
        let mut writer = io_utils::open_csv_writer(sink, delimiter);
        writer
            .write_record(self.schema.headers().iter())
            .context("Writing output headers")?;
        for (idx, row) in self.rows.iter().enumerate() {
            let record: Vec<String> = row
                .iter()
                .map(|cell| cell.as_ref().map(Value::as_display).unwrap_or_default())
                .collect();
            writer
                .write_record(record.iter())
                .with_context(|| format!("Writing output row {}", idx + 2))?;
        }
        writer.flush().context("Flushing output")?;
        Ok(())
    }
}

fn parse_typed_row(schema: &Schema, raw: &[String]) -> Result<Vec<Option<Value>>> {
    schema
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let value = raw.get(idx).map(String::as_str).unwrap_or("");
            parse_typed_value(value, &column.datatype)
        })
        .collect()
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

fn load_error(path: &Path, err: &anyhow::Error) -> anyhow::Error {
    CleanseError::Load {
        path: path.display().to_string(),
        reason: format!("{err:#}"),
    }
    .into()
}

fn write_error(path: &Path, err: &anyhow::Error) -> anyhow::Error {
    CleanseError::Write {
        path: path.display().to_string(),
        reason: format!("{err:#}"),
    }
    .into()
}
