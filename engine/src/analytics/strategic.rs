// Strategic rankings for commercial prospecting: Pareto concentration,
// priority-scored opportunity gap, and capture simulation. All read-only,
// all tolerant of NaN royalties (a missing royalty scores zero).

use shared::models::{CaptureProjection, MineRecord, Opportunity, ParetoSummary};

use crate::analytics::finite_sum;

pub const PARETO_THRESHOLD_PCT: f64 = 80.0;
pub const DEFAULT_TOP_OPPORTUNITIES: usize = 20;
pub const DEFAULT_CAPTURE_PCT: f64 = 30.0;

/// Mines the simulation treats as the active prospecting pool.
const PRIORITY_POOL: usize = 50;

/// Weight of a strategy tier in the priority score: TEC01 (current client)
/// weighs 5, down to TEC05 at 1. Unknown or missing tiers weigh 0.
pub fn strategy_weight(strategy: &str) -> u32 {
    match strategy {
        "TEC01" => 5,
        "TEC02" => 4,
        "TEC03" => 3,
        "TEC04" => 2,
        "TEC05" => 1,
        _ => 0,
    }
}

/// Royalty times strategy weight. A missing royalty contributes zero
/// rather than poisoning the ranking.
pub fn priority_score(record: &MineRecord) -> f64 {
    let royalty = if record.royalty_collected.is_nan() {
        0.0
    } else {
        record.royalty_collected
    };
    royalty * strategy_weight(&record.commercial_strategy) as f64
}

/// The records that concentrate the first 80% of the royalty mass, royalty
/// descending, plus a summary of the slice. A record enters the slice while
/// the cumulative share including it stays within the threshold.
pub fn pareto_slice<'a>(records: &'a [MineRecord]) -> (Vec<&'a MineRecord>, ParetoSummary) {
    let (total, _) = finite_sum(records.iter().map(|record| record.royalty_collected));

    let mut sorted: Vec<&MineRecord> = records.iter().collect();
    sorted.sort_by(|a, b| finite(b.royalty_collected).total_cmp(&finite(a.royalty_collected)));

    let mut slice = Vec::new();
    let mut cumulative = 0.0;
    if total > 0.0 {
        for record in sorted {
            cumulative += finite(record.royalty_collected);
            if cumulative / total * 100.0 > PARETO_THRESHOLD_PCT {
                break;
            }
            slice.push(record);
        }
    }

    let (royalty_total, _) = finite_sum(slice.iter().map(|record| record.royalty_collected));
    let summary = ParetoSummary {
        mine_count: slice.len(),
        share_of_mines: if records.is_empty() {
            0.0
        } else {
            slice.len() as f64 / records.len() as f64 * 100.0
        },
        royalty_total,
        mapped_count: slice
            .iter()
            .filter(|record| record.mapping_status.is_mapped())
            .count(),
    };
    (slice, summary)
}

/// Unmapped mines ranked by priority score descending; ties break on the
/// primary key so the ranking is deterministic.
pub fn top_opportunities(records: &[MineRecord], limit: usize) -> Vec<Opportunity> {
    let mut unmapped: Vec<&MineRecord> = records
        .iter()
        .filter(|record| !record.mapping_status.is_mapped())
        .collect();
    unmapped.sort_by(|a, b| {
        priority_score(b)
            .total_cmp(&priority_score(a))
            .then_with(|| a.primary_key.cmp(&b.primary_key))
    });

    unmapped
        .into_iter()
        .take(limit)
        .map(|record| Opportunity {
            primary_key: record.primary_key.clone(),
            company_name: record.company_name.clone(),
            controlling_group: record.controlling_group.clone(),
            state: record.state.clone(),
            primary_substance: record.primary_substance.clone(),
            royalty_collected: record.royalty_collected,
            commercial_strategy: record.commercial_strategy.clone(),
            priority_score: priority_score(record),
        })
        .collect()
}

/// Projects revenue if `capture_pct` percent of the view's royalty base
/// converted into contract value: annual and monthly totals, plus the
/// average ticket across the top-priority unmapped pool.
pub fn simulate_capture(records: &[MineRecord], capture_pct: f64) -> CaptureProjection {
    let fraction = capture_pct / 100.0;
    let (royalty_base, _) = finite_sum(records.iter().map(|record| record.royalty_collected));
    let annual_value = royalty_base * fraction;

    let pool = top_opportunities(records, PRIORITY_POOL);
    let priority_count = pool.len();
    let priority_ticket = if priority_count == 0 {
        0.0
    } else {
        let (pool_royalty, _) = finite_sum(pool.iter().map(|opp| opp.royalty_collected));
        pool_royalty * fraction / priority_count as f64
    };

    CaptureProjection {
        capture_pct,
        annual_value,
        monthly_value: annual_value / 12.0,
        priority_count,
        priority_ticket,
    }
}

fn finite(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::MappingStatus;
    use std::collections::BTreeMap;

    fn record(key: &str, strategy: &str, royalty: f64, mapped: bool) -> MineRecord {
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
            controlling_group: "GRUPO".to_string(),
            commercial_strategy: strategy.to_string(),
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
    fn strategy_weights() {
        assert_eq!(strategy_weight("TEC01"), 5);
        assert_eq!(strategy_weight("TEC05"), 1);
        assert_eq!(strategy_weight(""), 0);
        assert_eq!(strategy_weight("TEC99"), 0);
    }

    #[test]
    fn missing_royalty_scores_zero() {
        let r = record("A", "TEC01", f64::NAN, false);
        assert_eq!(priority_score(&r), 0.0);
    }

    #[test]
    fn pareto_slice_stops_at_the_threshold() {
        // Total 1000; cumulative shares 50%, 80%, 90%, 96%, 100%.
        let records = vec![
            record("A", "TEC01", 500.0, true),
            record("B", "TEC01", 300.0, false),
            record("C", "TEC01", 100.0, false),
            record("D", "TEC01", 60.0, false),
            record("E", "TEC01", 40.0, false),
        ];
        let (slice, summary) = pareto_slice(&records);
        let keys: Vec<&str> = slice.iter().map(|r| r.primary_key.as_str()).collect();
        assert_eq!(keys, vec!["A", "B"]);
        assert_eq!(summary.mine_count, 2);
        assert_eq!(summary.royalty_total, 800.0);
        assert_eq!(summary.share_of_mines, 40.0);
        assert_eq!(summary.mapped_count, 1);
    }

    #[test]
    fn pareto_of_empty_or_nan_table_is_empty() {
        let (slice, summary) = pareto_slice(&[]);
        assert!(slice.is_empty());
        assert_eq!(summary.mine_count, 0);

        let records = vec![record("A", "TEC01", f64::NAN, false)];
        let (slice, _) = pareto_slice(&records);
        assert!(slice.is_empty());
    }

    #[test]
    fn opportunities_rank_unmapped_by_score() {
        let records = vec![
            record("MAPPED", "TEC01", 9999.0, true),
            record("LOW", "TEC05", 1000.0, false),   // score 1000
            record("HIGH", "TEC01", 400.0, false),   // score 2000
            record("MID", "TEC02", 300.0, false),    // score 1200
        ];
        let opportunities = top_opportunities(&records, 10);
        let keys: Vec<&str> = opportunities.iter().map(|o| o.primary_key.as_str()).collect();
        assert_eq!(keys, vec!["HIGH", "MID", "LOW"]);
        assert_eq!(opportunities[0].priority_score, 2000.0);
    }

    #[test]
    fn tied_opportunity_scores_break_on_primary_key() {
        let records = vec![
            record("B", "TEC01", 100.0, false),
            record("A", "TEC01", 100.0, false),
        ];
        let opportunities = top_opportunities(&records, 10);
        let keys: Vec<&str> = opportunities.iter().map(|o| o.primary_key.as_str()).collect();
        assert_eq!(keys, vec!["A", "B"]);
    }

    #[test]
    fn opportunity_limit_applies() {
        let records = vec![
            record("A", "TEC01", 300.0, false),
            record("B", "TEC01", 200.0, false),
            record("C", "TEC01", 100.0, false),
        ];
        assert_eq!(top_opportunities(&records, 2).len(), 2);
    }

    #[test]
    fn capture_projection_scales_the_royalty_base() {
        let records = vec![
            record("A", "TEC01", 600.0, false),
            record("B", "TEC02", 400.0, true),
        ];
        let projection = simulate_capture(&records, 30.0);
        assert_eq!(projection.annual_value, 300.0);
        assert_eq!(projection.monthly_value, 25.0);
        // Only the unmapped record is in the priority pool.
        assert_eq!(projection.priority_count, 1);
        assert!((projection.priority_ticket - 180.0).abs() < 1e-9);
    }

    #[test]
    fn capture_of_empty_view_is_all_zero() {
        let projection = simulate_capture(&[], 30.0);
        assert_eq!(projection.annual_value, 0.0);
        assert_eq!(projection.monthly_value, 0.0);
        assert_eq!(projection.priority_count, 0);
        assert_eq!(projection.priority_ticket, 0.0);
    }
}
