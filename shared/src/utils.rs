// Brazilian display rendering: `.` groups thousands, `,` separates decimals.
// The engine parses these formats on ingest (engine::data::locale); this is
// the render side, used by display clients and by export-adjacent tooling.

/// Renders a value as a Brazilian-formatted decimal, e.g. `1.234,56`.
/// NaN renders as an empty string, the same missing marker the exporter
/// writes.
pub fn format_decimal(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return String::new();
    }

    let formatted = format!("{:.*}", decimals, value);
    let (number, negative) = match formatted.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (formatted.as_str(), false),
    };
    let (int_part, frac_part) = match number.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (number, None),
    };

    let mut out = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}

/// `R$ 1.234.567,89`; NaN renders as `R$ 0,00`.
pub fn format_currency(value: f64) -> String {
    if value.is_nan() {
        return "R$ 0,00".to_string();
    }
    format!("R$ {}", format_decimal(value, 2))
}

/// Compact currency for cards: `R$ 2,30 Bi`, `R$ 1,50 Mi`, full form below
/// one million.
pub fn format_currency_abbreviated(value: f64) -> String {
    if value.is_nan() {
        return "R$ 0,00".to_string();
    }
    if value >= 1_000_000_000.0 {
        format!("R$ {} Bi", format_decimal(value / 1_000_000_000.0, 2))
    } else if value >= 1_000_000.0 {
        format!("R$ {} Mi", format_decimal(value / 1_000_000.0, 2))
    } else {
        format_currency(value)
    }
}

/// Plain number with Brazilian separators; NaN renders as `0`.
pub fn format_number(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "0".to_string();
    }
    format_decimal(value, decimals)
}

/// `12.345.678/9012-34` for a 14-digit CNPJ; anything else is returned
/// unchanged (unparseable tax ids keep their original form end to end).
pub fn format_tax_id(tax_id: &str) -> String {
    if tax_id.len() != 14 || !tax_id.bytes().all(|b| b.is_ascii_digit()) {
        return tax_id.to_string();
    }
    format!(
        "{}.{}.{}/{}-{}",
        &tax_id[0..2],
        &tax_id[2..5],
        &tax_id[5..8],
        &tax_id[8..12],
        &tax_id[12..14]
    )
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
