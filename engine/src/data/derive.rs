// Derived fields, computed strictly after normalization so the inputs are
// already typed. Neither field is ever written anywhere else.

use shared::models::{MappingStatus, MineRecord};

use crate::data::schema;

pub fn calculate_derived_fields(records: &mut [MineRecord]) {
    for record in records.iter_mut() {
        // NaN propagates: an unknown monthly value yields an unknown
        // annual value, not zero.
        record.annual_mapped_value = record.monthly_contract_value * 12.0;

        record.mapping_status = if record.scope_code != schema::NOT_MAPPED {
            MappingStatus::Mapped
        } else {
            MappingStatus::Unmapped
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record(monthly: f64, scope_code: &str) -> MineRecord {
        MineRecord {
            primary_key: "K".to_string(),
            tax_id: "00000000000191".to_string(),
            company_name: "EMPRESA".to_string(),
            municipality: "Itabira".to_string(),
            state: "MG".to_string(),
            royalty_collected: 0.0,
            volume_commercialized: 0.0,
            primary_substance: "Ferro".to_string(),
            mineral_sector: "Metálicos".to_string(),
            controlling_group: "GRUPO".to_string(),
            commercial_strategy: "TEC01".to_string(),
            scope_code: scope_code.to_string(),
            contract_duration_months: None,
            total_scopes: None,
            scope_value: f64::NAN,
            monthly_contract_value: monthly,
            outsources_extraction: "NÃO".to_string(),
            annual_mapped_value: f64::NAN,
            mapping_status: MappingStatus::Unmapped,
            extras: BTreeMap::new(),
        }
    }

    #[test]
    fn annual_value_is_twelve_times_monthly() {
        let mut records = vec![record(50_000.0, "ESC-1")];
        calculate_derived_fields(&mut records);
        assert_eq!(records[0].annual_mapped_value, 600_000.0);
    }

    #[test]
    fn annual_value_propagates_missing() {
        let mut records = vec![record(f64::NAN, "ESC-1")];
        calculate_derived_fields(&mut records);
        // Both sides of the invariant are missing together.
        assert!(records[0].monthly_contract_value.is_nan());
        assert!(records[0].annual_mapped_value.is_nan());
    }

    #[test]
    fn mapped_iff_scope_differs_from_sentinel() {
        let mut records = vec![
            record(0.0, "ESC-1"),
            record(0.0, "NÃO"),
            // Case matters: only the exact sentinel means unmapped.
            record(0.0, "não"),
        ];
        calculate_derived_fields(&mut records);
        assert_eq!(records[0].mapping_status, MappingStatus::Mapped);
        assert_eq!(records[1].mapping_status, MappingStatus::Unmapped);
        assert_eq!(records[2].mapping_status, MappingStatus::Mapped);
    }
}
