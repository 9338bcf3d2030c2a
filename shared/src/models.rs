use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One cleaned row of the CFEM-CRM upload. Created once per load, never
/// mutated afterwards; filtered views clone out of the canonical table.
///
/// Missing numeric values are `f64::NAN`; missing strings are empty.
/// Unrecognized upload columns are carried verbatim in `extras`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MineRecord {
    /// Unique identifier combining the tax id and the municipality.
    pub primary_key: String,
    /// CNPJ/CPF, zero-padded to 14 digits when the source value was numeric.
    /// Anything else keeps the original string so downstream consumers can
    /// spot and exclude it.
    pub tax_id: String,
    pub company_name: String,
    pub municipality: String,
    pub state: String,
    /// CFEM collected in 2024, in BRL.
    pub royalty_collected: f64,
    /// Commercialized volume, in tonnes.
    pub volume_commercialized: f64,
    pub primary_substance: String,
    pub mineral_sector: String,
    /// Parent holding group; `NA`/`FORA`/empty mean none or outside scope.
    pub controlling_group: String,
    /// Commercial prospecting tier, TEC01 (highest) through TEC05.
    pub commercial_strategy: String,
    /// First commercial scope linked to the mine; `NÃO` means not mapped.
    pub scope_code: String,
    pub contract_duration_months: Option<i64>,
    pub total_scopes: Option<i64>,
    pub scope_value: f64,
    pub monthly_contract_value: f64,
    /// `SIM` or `NÃO`.
    pub outsources_extraction: String,
    /// Derived: `monthly_contract_value * 12`, NaN-propagating.
    pub annual_mapped_value: f64,
    /// Derived: pure function of `scope_code`.
    pub mapping_status: MappingStatus,
    /// Unknown upload columns, passed through untouched.
    pub extras: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MappingStatus {
    Mapped,
    Unmapped,
}

impl MappingStatus {
    pub fn is_mapped(self) -> bool {
        matches!(self, MappingStatus::Mapped)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MappingStatus::Mapped => "Mapped",
            MappingStatus::Unmapped => "Unmapped",
        }
    }
}

impl fmt::Display for MappingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter specification applied over the canonical table. Dimensions
/// combine with logical AND; values within one set combine with OR.
/// An empty set (or `None` range, or `Any`) leaves that dimension
/// unconstrained, so `FilterSpec::default()` matches every record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterSpec {
    pub strategy: BTreeSet<String>,
    pub mapping_status: MappingStatusFilter,
    pub substance: BTreeSet<String>,
    pub state: BTreeSet<String>,
    pub group: BTreeSet<String>,
    /// Inclusive bounds on `royalty_collected`. While active, records whose
    /// royalty failed to parse (NaN) are excluded.
    pub royalty_range: Option<(f64, f64)>,
    pub outsources_extraction: TriState,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum MappingStatusFilter {
    #[default]
    Any,
    MappedOnly,
    UnmappedOnly,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum TriState {
    #[default]
    Any,
    Yes,
    No,
}

/// Summary statistics over a (possibly filtered) view of the table.
/// Means and ratios are NaN when undefined; sums exclude NaN inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiSet {
    /// Distinct `primary_key` count.
    pub mine_count: usize,
    pub record_count: usize,
    pub total_royalty: f64,
    pub average_ticket: f64,
    /// Distinct controlling groups, sentinels excluded.
    pub group_count: usize,
    /// Groups ranked by summed royalty descending, ties by name ascending.
    pub top_groups: Vec<GroupTotal>,
    pub mapped_count: usize,
    pub mapped_pct: f64,
    pub mapped_monthly_value: f64,
    pub mapped_annual_value: f64,
    /// Mapped annual value over mapped royalty; NaN when undefined.
    pub value_to_royalty_index: f64,
    pub mapped_substance_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupTotal {
    pub group: String,
    pub royalty_total: f64,
}

/// A not-yet-mapped mine ranked for commercial prospecting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    pub primary_key: String,
    pub company_name: String,
    pub controlling_group: String,
    pub state: String,
    pub primary_substance: String,
    pub royalty_collected: f64,
    pub commercial_strategy: String,
    /// Royalty times strategy weight (TEC01=5 .. TEC05=1).
    pub priority_score: f64,
}

/// The head of the table that concentrates 80% of the royalty mass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParetoSummary {
    pub mine_count: usize,
    pub share_of_mines: f64,
    pub royalty_total: f64,
    pub mapped_count: usize,
}

/// Projected revenue if a percentage of the royalty base were captured
/// as contract value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureProjection {
    pub capture_pct: f64,
    pub annual_value: f64,
    pub monthly_value: f64,
    pub priority_count: usize,
    pub priority_ticket: f64,
}

/// Metadata about the dataset currently held in the session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSummary {
    pub version: String,
    pub row_count: usize,
    pub column_count: usize,
    pub loaded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_spec_is_unconstrained() {
        let spec = FilterSpec::default();
        assert!(spec.strategy.is_empty());
        assert!(spec.group.is_empty());
        assert_eq!(spec.mapping_status, MappingStatusFilter::Any);
        assert_eq!(spec.outsources_extraction, TriState::Any);
        assert!(spec.royalty_range.is_none());
    }

    #[test]
    fn mapping_status_display() {
        assert_eq!(MappingStatus::Mapped.to_string(), "Mapped");
        assert_eq!(MappingStatus::Unmapped.to_string(), "Unmapped");
        assert!(MappingStatus::Mapped.is_mapped());
        assert!(!MappingStatus::Unmapped.is_mapped());
    }

    #[test]
    fn filter_spec_serde_round_trip() {
        let mut spec = FilterSpec::default();
        spec.strategy.insert("TEC01".to_string());
        spec.state.insert("MG".to_string());
        spec.royalty_range = Some((100.0, 5000.0));
        spec.mapping_status = MappingStatusFilter::MappedOnly;

        let json = serde_json::to_string(&spec).unwrap();
        let back: FilterSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }
}
