// Turns header-validated raw rows into canonical records: per-column type
// coercion, missing-sentinel substitution, ignored-column dropping, and
// passthrough of unknown columns. Produces a new table; the raw input is
// never touched.

use csv::StringRecord;
use shared::models::{MappingStatus, MineRecord};

use crate::data::csv_loader::RawTable;
use crate::data::{locale, schema};

/// Cleans every row of the raw table. Returns the canonical records plus
/// the ordered list of passthrough column names found in the upload.
pub fn clean_records(table: &RawTable) -> (Vec<MineRecord>, Vec<String>) {
    let extra_columns: Vec<String> = table
        .headers
        .iter()
        .filter(|header| !schema::is_known_column(header) && !schema::is_ignored_column(header))
        .cloned()
        .collect();

    let records = table
        .rows
        .iter()
        .map(|row| clean_row(&table.headers, &extra_columns, row))
        .collect();

    (records, extra_columns)
}

/// Field lookup by (normalized) header name; a column the row does not
/// reach reads as empty, which cleans to missing.
fn field<'r>(headers: &[String], row: &'r StringRecord, name: &str) -> &'r str {
    headers
        .iter()
        .position(|header| header == name)
        .and_then(|pos| row.get(pos))
        .unwrap_or("")
}

fn string_field(headers: &[String], row: &StringRecord, name: &str) -> String {
    clean_string(field(headers, row, name))
}

fn clean_row(headers: &[String], extra_columns: &[String], row: &StringRecord) -> MineRecord {
    let scope_code = {
        let cleaned = string_field(headers, row, schema::COL_SCOPE_CODE);
        // A mine without a scope is an unmapped mine; missing collapses
        // into the explicit sentinel so downstream checks stay a single
        // equality test.
        if cleaned.is_empty() {
            schema::NOT_MAPPED.to_string()
        } else {
            cleaned
        }
    };

    MineRecord {
        primary_key: string_field(headers, row, schema::COL_PRIMARY_KEY),
        tax_id: locale::parse_tax_id(field(headers, row, schema::COL_TAX_ID)),
        company_name: string_field(headers, row, schema::COL_COMPANY_NAME),
        municipality: string_field(headers, row, schema::COL_MUNICIPALITY),
        state: string_field(headers, row, schema::COL_STATE),
        royalty_collected: locale::parse_decimal(field(headers, row, schema::COL_ROYALTY)),
        volume_commercialized: locale::parse_decimal(field(headers, row, schema::COL_VOLUME)),
        primary_substance: string_field(headers, row, schema::COL_SUBSTANCE),
        mineral_sector: string_field(headers, row, schema::COL_SECTOR),
        controlling_group: string_field(headers, row, schema::COL_GROUP),
        commercial_strategy: schema::normalize_strategy(&string_field(
            headers,
            row,
            schema::COL_STRATEGY,
        )),
        scope_code,
        contract_duration_months: locale::parse_integer(field(headers, row, schema::COL_DURATION)),
        total_scopes: locale::parse_integer(field(headers, row, schema::COL_TOTAL_SCOPES)),
        scope_value: locale::parse_decimal(field(headers, row, schema::COL_SCOPE_VALUE)),
        monthly_contract_value: locale::parse_decimal(field(
            headers,
            row,
            schema::COL_MONTHLY_VALUE,
        )),
        outsources_extraction: string_field(headers, row, schema::COL_OUTSOURCES),
        // Both derived fields are filled by the derive pass, which runs
        // strictly after normalization.
        annual_mapped_value: f64::NAN,
        mapping_status: MappingStatus::Unmapped,
        extras: extra_columns
            .iter()
            .map(|column| (column.clone(), field(headers, row, column).trim().to_string()))
            .collect(),
    }
}

fn clean_string(raw: &str) -> String {
    let trimmed = raw.trim();
    if schema::is_missing_token(trimmed) {
        String::new()
    } else {
        trimmed.to_string()
    }
}
