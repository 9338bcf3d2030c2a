// Brazilian number handling for upload fields: `.` groups thousands and
// `,` separates decimals (e.g. "1.234,56"). Parsing fails closed: a field
// that cannot be converted becomes a missing marker, never an error, so a
// single bad cell cannot abort a load.

use crate::data::schema;

/// Parses decimals like "1.234,56" or "123,45" into f64. Missing tokens
/// and unparseable input yield NaN.
pub fn parse_decimal(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if schema::is_missing_token(trimmed) {
        return f64::NAN;
    }
    let normalized = trimmed.replace('.', "").replace(',', ".");
    normalized.parse::<f64>().unwrap_or(f64::NAN)
}

/// Integer fields ("duração", "total_escopos"). Missing or unparseable
/// input yields None.
pub fn parse_integer(raw: &str) -> Option<i64> {
    let value = parse_decimal(raw);
    if value.is_nan() {
        None
    } else {
        Some(value.round() as i64)
    }
}

/// Canonicalizes a CPF/CNPJ to a 14-digit string. Spreadsheet mangling
/// leaves tax ids in scientific notation ("3,36E+13"), so the value goes
/// through the decimal rule, is rounded, and is left-padded with zeros.
/// Non-numeric input is returned unchanged; its shape flags the record for
/// downstream exclusion instead of crashing the pipeline.
pub fn parse_tax_id(raw: &str) -> String {
    let trimmed = raw.trim();
    if schema::is_missing_token(trimmed) {
        return String::new();
    }
    let value = parse_decimal(trimmed);
    // 14 digits tops; anything bigger cannot be a CNPJ.
    if value.is_finite() && value >= 0.0 && value < 1e14 {
        format!("{:014}", value.round() as i64)
    } else {
        trimmed.to_string()
    }
}
