//! Parsing of the delimited-text dataset into validated records.
//!
//! Parsing itself is delegated to the [csv] crate. This module is only
//! concerned with checking the header against [COLUMNS] and turning each row
//! into either a [LocationRecord] or a [Error::RecordInvalid] that says why
//! the row can't be placed.

use crate::{
    Error, Result,
    record::{COLUMNS, LocationRecord, RawRow},
};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::trace;

/// One data row of a dataset, in the order it appeared
#[derive(Debug)]
pub struct ParsedRow {
    /// The (1-based) line of the dataset that the row starts on. The header is line 1.
    pub line: u64,
    pub record: Result<LocationRecord>,
}

/// The result of parsing a whole dataset
#[derive(Debug, Default)]
pub struct ParsedDataset {
    pub rows: Vec<ParsedRow>,
}

impl ParsedDataset {
    /// Iterate over only the rows that produced a valid record
    pub fn valid(&self) -> impl Iterator<Item = &LocationRecord> {
        self.rows.iter().filter_map(|row| row.record.as_ref().ok())
    }
}

/// Parse a dataset. A header that lacks or repeats any of the recognized
/// columns fails the whole dataset; a row that lacks usable coordinates does
/// not. Rows with cells past the header are read, the extra cells ignored.
pub fn parse_records(text: &str) -> Result<ParsedDataset> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();
    check_columns(&headers)?;

    let mut dataset = ParsedDataset::default();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        // short rows read their missing trailing cells as empty
        while record.len() < headers.len() {
            record.push_field("");
        }
        let parsed = record
            .deserialize::<RawRow>(Some(&headers))
            .map_err(|e| Error::RecordInvalid {
                line,
                reason: e.to_string(),
            })
            .and_then(|raw| LocationRecord::from_row(raw, line));
        trace!(line, valid = parsed.is_ok(), "parsed row");
        dataset.rows.push(ParsedRow {
            line,
            record: parsed,
        });
    }
    Ok(dataset)
}

fn check_columns(headers: &StringRecord) -> Result<()> {
    let count = |col: &str| headers.iter().filter(|h| *h == col).count();
    let missing: Vec<String> = COLUMNS
        .iter()
        .filter(|col| count(**col) == 0)
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(Error::MissingColumns(missing));
    }
    let repeated: Vec<String> = COLUMNS
        .iter()
        .filter(|col| count(**col) > 1)
        .map(|col| col.to_string())
        .collect();
    if !repeated.is_empty() {
        return Err(Error::DuplicateColumns(repeated));
    }
    Ok(())
}
