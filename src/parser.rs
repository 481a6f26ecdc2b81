use crate::error::Result;
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use tracing::debug;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// One CSV data row keyed by the header's column names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRow {
    fields: HashMap<String, String>,
}

impl CsvRow {
    fn from_record(headers: &StringRecord, record: &StringRecord) -> Self {
        // Duplicate header names resolve to the right-most column.
        let fields = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), record.get(i).unwrap_or("").to_string()))
            .collect();
        Self { fields }
    }

    /// Cell for `column`, or an empty string when the column (or cell) is absent.
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CsvRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.has_headers(true).flexible(true);
    builder
}

/// Parse header-delimited CSV into rows keyed by column name.
///
/// Quoted fields may span lines. Short rows are padded with empty cells.
/// Cells that are not valid UTF-8 fail the whole parse.
pub fn parse_rows(data: &[u8]) -> Result<Vec<CsvRow>> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let mut reader = reader_builder().from_reader(data);
    let headers = reader.headers()?.clone();
    debug!("CSV header has {} columns", headers.len());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(CsvRow::from_record(&headers, &record));
    }
    Ok(rows)
}
