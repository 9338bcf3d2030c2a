// Filter engine: a record passes when it passes every active dimension.
// Dimensions AND together; the members of one categorical set OR together.
// Pure and idempotent: filtering a filtered view with the same spec is a
// no-op, and the canonical table is never touched.

use std::collections::BTreeSet;

use shared::models::{FilterSpec, MappingStatusFilter, MineRecord, TriState};

use crate::data::schema;

pub fn apply_filters(records: &[MineRecord], spec: &FilterSpec) -> Vec<MineRecord> {
    records
        .iter()
        .filter(|record| matches(record, spec))
        .cloned()
        .collect()
}

pub fn matches(record: &MineRecord, spec: &FilterSpec) -> bool {
    in_set(&spec.strategy, &record.commercial_strategy)
        && mapping_matches(spec.mapping_status, record)
        && in_set(&spec.substance, &record.primary_substance)
        && in_set(&spec.state, &record.state)
        && in_set(&spec.group, &record.controlling_group)
        && royalty_in_range(spec.royalty_range, record.royalty_collected)
        && outsources_matches(spec.outsources_extraction, &record.outsources_extraction)
}

fn in_set(set: &BTreeSet<String>, value: &str) -> bool {
    set.is_empty() || set.contains(value)
}

fn mapping_matches(filter: MappingStatusFilter, record: &MineRecord) -> bool {
    match filter {
        MappingStatusFilter::Any => true,
        MappingStatusFilter::MappedOnly => record.mapping_status.is_mapped(),
        MappingStatusFilter::UnmappedOnly => !record.mapping_status.is_mapped(),
    }
}

fn royalty_in_range(range: Option<(f64, f64)>, value: f64) -> bool {
    match range {
        None => true,
        // NaN fails both comparisons: records with an unparsed royalty
        // drop out while the range dimension is active.
        Some((min, max)) => value >= min && value <= max,
    }
}

fn outsources_matches(filter: TriState, value: &str) -> bool {
    match filter {
        TriState::Any => true,
        TriState::Yes => value == schema::OUTSOURCES_YES,
        TriState::No => value == schema::OUTSOURCES_NO,
    }
}

// Option universes for the display layer's selectors. Each is the sorted,
// de-duplicated set of non-empty values in the current table.

pub fn strategy_options(records: &[MineRecord]) -> Vec<String> {
    distinct(records, |record| &record.commercial_strategy)
}

pub fn substance_options(records: &[MineRecord]) -> Vec<String> {
    distinct(records, |record| &record.primary_substance)
}

pub fn state_options(records: &[MineRecord]) -> Vec<String> {
    distinct(records, |record| &record.state)
}

/// Selectable groups. Sentinel values ("no group"/"outside scope") are not
/// offered as options; those records are not filterable by group.
pub fn group_options(records: &[MineRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.controlling_group.as_str())
        .filter(|group| !schema::is_sentinel_group(group))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Observed (min, max) of the royalty column, NaN excluded; None when the
/// column has no finite values.
pub fn royalty_bounds(records: &[MineRecord]) -> Option<(f64, f64)> {
    let mut bounds: Option<(f64, f64)> = None;
    for record in records {
        let value = record.royalty_collected;
        if value.is_nan() {
            continue;
        }
        bounds = Some(match bounds {
            None => (value, value),
            Some((min, max)) => (min.min(value), max.max(value)),
        });
    }
    bounds
}

fn distinct<F>(records: &[MineRecord], field: F) -> Vec<String>
where
    F: Fn(&MineRecord) -> &str,
{
    records
        .iter()
        .map(|record| field(record))
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
