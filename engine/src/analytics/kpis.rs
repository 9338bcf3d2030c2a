// KPI aggregation over a (possibly filtered) view. Sums exclude NaN inputs
// rather than treating them as zero; means and ratios are NaN when there is
// no finite mass to divide by. An empty view is a valid input and produces
// zeros and NaNs, never an error.

use std::collections::{BTreeMap, BTreeSet};

use shared::models::{GroupTotal, KpiSet, MineRecord};

use crate::analytics::finite_sum;
use crate::data::schema;

pub const DEFAULT_TOP_GROUPS: usize = 5;

pub fn compute_kpis(records: &[MineRecord], top_n: usize) -> KpiSet {
    let record_count = records.len();
    let mine_count = records
        .iter()
        .map(|record| record.primary_key.as_str())
        .collect::<BTreeSet<_>>()
        .len();

    let (total_royalty, royalty_samples) =
        finite_sum(records.iter().map(|record| record.royalty_collected));
    let average_ticket = if royalty_samples == 0 {
        f64::NAN
    } else {
        total_royalty / royalty_samples as f64
    };

    // Group totals over non-sentinel groups; a NaN royalty adds nothing to
    // its group but still makes the group exist.
    let mut group_totals: BTreeMap<&str, f64> = BTreeMap::new();
    for record in records {
        if schema::is_sentinel_group(&record.controlling_group) {
            continue;
        }
        let total = group_totals
            .entry(record.controlling_group.as_str())
            .or_insert(0.0);
        if !record.royalty_collected.is_nan() {
            *total += record.royalty_collected;
        }
    }
    let group_count = group_totals.len();
    let mut top_groups: Vec<GroupTotal> = group_totals
        .into_iter()
        .map(|(group, royalty_total)| GroupTotal {
            group: group.to_string(),
            royalty_total,
        })
        .collect();
    // Royalty descending; equal totals rank alphabetically so the ranking
    // is deterministic.
    top_groups.sort_by(|a, b| {
        b.royalty_total
            .total_cmp(&a.royalty_total)
            .then_with(|| a.group.cmp(&b.group))
    });
    top_groups.truncate(top_n);

    let mapped: Vec<&MineRecord> = records
        .iter()
        .filter(|record| record.mapping_status.is_mapped())
        .collect();
    let mapped_count = mapped.len();
    let mapped_pct = if record_count == 0 {
        0.0
    } else {
        mapped_count as f64 / record_count as f64 * 100.0
    };

    let (mapped_monthly_value, _) =
        finite_sum(mapped.iter().map(|record| record.monthly_contract_value));
    let (mapped_annual_value, _) =
        finite_sum(mapped.iter().map(|record| record.annual_mapped_value));

    let (mapped_royalty, mapped_royalty_samples) =
        finite_sum(mapped.iter().map(|record| record.royalty_collected));
    let value_to_royalty_index = if mapped_royalty_samples == 0 || mapped_royalty == 0.0 {
        f64::NAN
    } else {
        mapped_annual_value / mapped_royalty
    };

    let mapped_substance_count = mapped
        .iter()
        .map(|record| record.primary_substance.as_str())
        .filter(|substance| !substance.is_empty())
        .collect::<BTreeSet<_>>()
        .len();

    KpiSet {
        mine_count,
        record_count,
        total_royalty,
        average_ticket,
        group_count,
        top_groups,
        mapped_count,
        mapped_pct,
        mapped_monthly_value,
        mapped_annual_value,
        value_to_royalty_index,
        mapped_substance_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::MappingStatus;
    use std::collections::BTreeMap;

    fn record(key: &str, group: &str, royalty: f64, mapped: bool) -> MineRecord {
        MineRecord {
            primary_key: key.to_string(),
            tax_id: "00000000000191".to_string(),
            company_name: format!("{} SA", key),
            municipality: "Itabira".to_string(),
            state: "MG".to_string(),
            royalty_collected: royalty,
            volume_commercialized: 0.0,
            primary_substance: "Ferro".to_string(),
            mineral_sector: "Metálicos".to_string(),
            controlling_group: group.to_string(),
            commercial_strategy: "TEC01".to_string(),
            scope_code: if mapped { "ESC-1".to_string() } else { "NÃO".to_string() },
            contract_duration_months: None,
            total_scopes: None,
            scope_value: f64::NAN,
            monthly_contract_value: f64::NAN,
            outsources_extraction: "NÃO".to_string(),
            annual_mapped_value: f64::NAN,
            mapping_status: if mapped { MappingStatus::Mapped } else { MappingStatus::Unmapped },
            extras: BTreeMap::new(),
        }
    }

    #[test]
    fn golden_case_two_records_one_mapped() {
        // Total royalty 1000, one mapped record carrying annual value 400.
        let mut mapped = record("A", "VALE", 1000.0, true);
        mapped.monthly_contract_value = 400.0 / 12.0;
        mapped.annual_mapped_value = 400.0;
        let unmapped = record("B", "CSN", 0.0, false);

        let kpis = compute_kpis(&[mapped, unmapped], DEFAULT_TOP_GROUPS);
        assert_eq!(kpis.mine_count, 2);
        assert_eq!(kpis.total_royalty, 1000.0);
        assert_eq!(kpis.mapped_count, 1);
        assert_eq!(kpis.mapped_pct, 50.0);
        assert_eq!(kpis.mapped_annual_value, 400.0);
        assert!((kpis.value_to_royalty_index - 0.4).abs() < 1e-12);
    }

    #[test]
    fn all_nan_royalty_means_undefined_average_not_zero() {
        let records = vec![
            record("A", "VALE", f64::NAN, false),
            record("B", "CSN", f64::NAN, false),
        ];
        let kpis = compute_kpis(&records, DEFAULT_TOP_GROUPS);
        assert!(kpis.average_ticket.is_nan());
        // Sums exclude NaN instead of failing.
        assert_eq!(kpis.total_royalty, 0.0);
    }

    #[test]
    fn empty_view_is_valid_input() {
        let kpis = compute_kpis(&[], DEFAULT_TOP_GROUPS);
        assert_eq!(kpis.mine_count, 0);
        assert_eq!(kpis.record_count, 0);
        assert_eq!(kpis.mapped_count, 0);
        assert_eq!(kpis.mapped_pct, 0.0);
        assert_eq!(kpis.total_royalty, 0.0);
        assert!(kpis.average_ticket.is_nan());
        assert!(kpis.value_to_royalty_index.is_nan());
        assert!(kpis.top_groups.is_empty());
    }

    #[test]
    fn tied_group_totals_rank_alphabetically() {
        let records = vec![
            record("A", "Beta", 500.0, false),
            record("B", "Alpha", 500.0, false),
            record("C", "Gamma", 900.0, false),
        ];
        let kpis = compute_kpis(&records, DEFAULT_TOP_GROUPS);
        let names: Vec<&str> = kpis.top_groups.iter().map(|g| g.group.as_str()).collect();
        assert_eq!(names, vec!["Gamma", "Alpha", "Beta"]);
    }

    #[test]
    fn group_count_excludes_sentinels() {
        let records = vec![
            record("A", "VALE", 100.0, false),
            record("B", "NA", 100.0, false),
            record("C", "FORA", 100.0, false),
            record("D", "", 100.0, false),
        ];
        let kpis = compute_kpis(&records, DEFAULT_TOP_GROUPS);
        assert_eq!(kpis.group_count, 1);
        assert_eq!(kpis.top_groups.len(), 1);
    }

    #[test]
    fn duplicate_primary_keys_collapse_in_mine_count_only() {
        let records = vec![
            record("A", "VALE", 100.0, false),
            record("A", "VALE", 200.0, false),
        ];
        let kpis = compute_kpis(&records, DEFAULT_TOP_GROUPS);
        assert_eq!(kpis.mine_count, 1);
        assert_eq!(kpis.record_count, 2);
        assert_eq!(kpis.total_royalty, 300.0);
    }

    #[test]
    fn top_n_truncates_ranking() {
        let records = vec![
            record("A", "G1", 300.0, false),
            record("B", "G2", 200.0, false),
            record("C", "G3", 100.0, false),
        ];
        let kpis = compute_kpis(&records, 2);
        assert_eq!(kpis.group_count, 3);
        assert_eq!(kpis.top_groups.len(), 2);
        assert_eq!(kpis.top_groups[0].group, "G1");
    }

    #[test]
    fn mapped_sums_ignore_unmapped_records() {
        let mut mapped = record("A", "VALE", 100.0, true);
        mapped.monthly_contract_value = 10.0;
        mapped.annual_mapped_value = 120.0;
        let mut unmapped = record("B", "CSN", 100.0, false);
        // An unmapped record with contract numbers must not leak into the
        // mapped sums.
        unmapped.monthly_contract_value = 99.0;
        unmapped.annual_mapped_value = 999.0;

        let kpis = compute_kpis(&[mapped, unmapped], DEFAULT_TOP_GROUPS);
        assert_eq!(kpis.mapped_monthly_value, 10.0);
        assert_eq!(kpis.mapped_annual_value, 120.0);
        assert_eq!(kpis.mapped_substance_count, 1);
    }
}
