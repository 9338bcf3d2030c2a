// Upload reading: byte decoding, header validation, and the raw table that
// feeds the normalizer. The full pipeline entry points live here so a load
// is one call for the service layer.

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use encoding_rs::WINDOWS_1252;

use crate::data::store::Dataset;
use crate::data::{derive, normalizer, schema};
use crate::error::EngineError;

const UTF_8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Header-validated rows, headers already normalized.
#[derive(Debug)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<StringRecord>,
}

/// Runs the whole ingestion pipeline over a file on disk.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, EngineError> {
    let bytes = fs::read(path)?;
    load_dataset_from_bytes(&bytes)
}

/// Runs the whole ingestion pipeline over raw upload bytes.
pub fn load_dataset_from_bytes(bytes: &[u8]) -> Result<Dataset, EngineError> {
    let text = decode_text(bytes);
    let table = read_raw_table(&text)?;
    let (mut records, extra_columns) = normalizer::clean_records(&table);
    derive::calculate_derived_fields(&mut records);
    Ok(Dataset::new(records, extra_columns))
}

/// UTF-8 first (BOM tolerated), windows-1252 when the bytes are not valid
/// UTF-8. Legacy exports from desktop spreadsheets arrive in the latter.
pub fn decode_text(bytes: &[u8]) -> String {
    let stripped = bytes.strip_prefix(UTF_8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(stripped) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (decoded, _, _) = WINDOWS_1252.decode(stripped);
            decoded.into_owned()
        }
    }
}

pub fn read_raw_table(text: &str) -> Result<RawTable, EngineError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(schema::normalize_header)
        .collect();

    let missing: Vec<String> = schema::REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|header| header == *required))
        .map(|required| required.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(EngineError::Schema { missing });
    }

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            EngineError::CsvData(format!("error reading record at line {}: {}", idx + 2, e))
        })?;
        // Rows with nothing in them are dropped, matching the source
        // files that pad the bottom of the sheet with empty lines.
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        rows.push(record);
    }

    Ok(RawTable { headers, rows })
}
