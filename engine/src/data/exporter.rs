// Re-serializes a filtered view to the upload's own shape: `;` delimited,
// normalized header names, derived columns appended, passthrough columns
// last. Numeric cells are plain decimals; missing values are empty cells.
// Locale rendering of exported numbers is the display layer's concern.

use csv::WriterBuilder;
use shared::models::MineRecord;

use crate::data::schema;
use crate::error::EngineError;

pub const DERIVED_COLUMNS: [&str; 2] = ["valor_anual_mapeado", "status_mapeamento"];

pub fn export_csv(
    records: &[MineRecord],
    extra_columns: &[String],
) -> Result<String, EngineError> {
    let mut writer = WriterBuilder::new().delimiter(b';').from_writer(Vec::new());

    let mut header: Vec<String> = schema::REQUIRED_COLUMNS
        .iter()
        .map(|column| column.to_string())
        .collect();
    header.extend(DERIVED_COLUMNS.iter().map(|column| column.to_string()));
    header.extend(extra_columns.iter().cloned());
    writer.write_record(&header)?;

    for record in records {
        let mut row = vec![
            record.primary_key.clone(),
            record.tax_id.clone(),
            record.company_name.clone(),
            record.municipality.clone(),
            record.state.clone(),
            render_float(record.royalty_collected),
            render_float(record.volume_commercialized),
            record.primary_substance.clone(),
            record.mineral_sector.clone(),
            record.controlling_group.clone(),
            record.commercial_strategy.clone(),
            record.scope_code.clone(),
            render_integer(record.contract_duration_months),
            render_integer(record.total_scopes),
            render_float(record.scope_value),
            render_float(record.monthly_contract_value),
            record.outsources_extraction.clone(),
            render_float(record.annual_mapped_value),
            record.mapping_status.to_string(),
        ];
        row.extend(
            extra_columns
                .iter()
                .map(|column| record.extras.get(column).cloned().unwrap_or_default()),
        );
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| EngineError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| EngineError::Export(e.to_string()))
}

fn render_float(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        format!("{}", value)
    }
}

fn render_integer(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::MappingStatus;
    use std::collections::BTreeMap;

    fn sample_record() -> MineRecord {
        MineRecord {
            primary_key: "33600000000000-ITABIRA".to_string(),
            tax_id: "33600000000000".to_string(),
            company_name: "VALE SA".to_string(),
            municipality: "Itabira".to_string(),
            state: "MG".to_string(),
            royalty_collected: 1234.56,
            volume_commercialized: f64::NAN,
            primary_substance: "Ferro".to_string(),
            mineral_sector: "Metálicos".to_string(),
            controlling_group: "VALE".to_string(),
            commercial_strategy: "TEC01".to_string(),
            scope_code: "ESC-0042".to_string(),
            contract_duration_months: Some(24),
            total_scopes: None,
            scope_value: 100_000.0,
            monthly_contract_value: 50_000.0,
            outsources_extraction: "SIM".to_string(),
            annual_mapped_value: 600_000.0,
            mapping_status: MappingStatus::Mapped,
            extras: BTreeMap::from([("obs_interna".to_string(), "revisar".to_string())]),
        }
    }

    #[test]
    fn writes_header_and_plain_decimal_rows() {
        let extras = vec!["obs_interna".to_string()];
        let content = export_csv(&[sample_record()], &extras).unwrap();
        let mut lines = content.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("chaveprimaria;cpf_cnpj;"));
        assert!(header.ends_with("valor_anual_mapeado;status_mapeamento;obs_interna"));
        assert_eq!(header.split(';').count(), 17 + 2 + 1);

        let row = lines.next().unwrap();
        let fields: Vec<&str> = row.split(';').collect();
        assert_eq!(fields[0], "33600000000000-ITABIRA");
        assert_eq!(fields[5], "1234.56"); // plain decimal, not locale
        assert_eq!(fields[6], ""); // NaN exports as an empty cell
        assert_eq!(fields[12], "24");
        assert_eq!(fields[13], ""); // None exports as an empty cell
        assert_eq!(fields[17], "600000");
        assert_eq!(fields[18], "Mapped");
        assert_eq!(fields[19], "revisar");
        assert!(lines.next().is_none());
    }

    #[test]
    fn empty_view_exports_header_only() {
        let content = export_csv(&[], &[]).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
