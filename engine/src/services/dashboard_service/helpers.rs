// Conversions between shared::models and the generated protobuf types.

use shared::models::{
    FilterSpec, KpiSet, MappingStatus, MappingStatusFilter, MineRecord, Opportunity, TriState,
};

use crate::services::{
    KpiResponse, ProtoFilterSpec, ProtoGroupTotal, ProtoMappingStatus, ProtoMappingStatusFilter,
    ProtoMineRecord, ProtoOpportunity, ProtoTriStateFilter,
};

/// An absent FilterSpec message means "no constraints".
pub fn filter_spec_from_proto(proto: Option<ProtoFilterSpec>) -> FilterSpec {
    let Some(proto) = proto else {
        return FilterSpec::default();
    };

    FilterSpec {
        strategy: proto.strategy.into_iter().collect(),
        mapping_status: match ProtoMappingStatusFilter::try_from(proto.mapping_status) {
            Ok(ProtoMappingStatusFilter::MappedOnly) => MappingStatusFilter::MappedOnly,
            Ok(ProtoMappingStatusFilter::UnmappedOnly) => MappingStatusFilter::UnmappedOnly,
            // Unknown enum values read as "no constraint" rather than
            // failing the call.
            _ => MappingStatusFilter::Any,
        },
        substance: proto.substance.into_iter().collect(),
        state: proto.state.into_iter().collect(),
        group: proto.group.into_iter().collect(),
        royalty_range: proto.royalty_range.map(|range| (range.min, range.max)),
        outsources_extraction: match ProtoTriStateFilter::try_from(proto.outsources_extraction) {
            Ok(ProtoTriStateFilter::TriYes) => TriState::Yes,
            Ok(ProtoTriStateFilter::TriNo) => TriState::No,
            _ => TriState::Any,
        },
    }
}

pub fn to_proto_record(record: &MineRecord) -> ProtoMineRecord {
    ProtoMineRecord {
        primary_key: record.primary_key.clone(),
        tax_id: record.tax_id.clone(),
        company_name: record.company_name.clone(),
        municipality: record.municipality.clone(),
        state: record.state.clone(),
        royalty_collected: record.royalty_collected,
        volume_commercialized: record.volume_commercialized,
        primary_substance: record.primary_substance.clone(),
        mineral_sector: record.mineral_sector.clone(),
        controlling_group: record.controlling_group.clone(),
        commercial_strategy: record.commercial_strategy.clone(),
        scope_code: record.scope_code.clone(),
        contract_duration_months: record.contract_duration_months,
        total_scopes: record.total_scopes,
        scope_value: record.scope_value,
        monthly_contract_value: record.monthly_contract_value,
        outsources_extraction: record.outsources_extraction.clone(),
        annual_mapped_value: record.annual_mapped_value,
        mapping_status: match record.mapping_status {
            MappingStatus::Mapped => ProtoMappingStatus::Mapped,
            MappingStatus::Unmapped => ProtoMappingStatus::Unmapped,
        } as i32,
        extras: record
            .extras
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
    }
}

pub fn to_kpi_response(kpis: &KpiSet) -> KpiResponse {
    KpiResponse {
        mine_count: kpis.mine_count as u64,
        record_count: kpis.record_count as u64,
        total_royalty: kpis.total_royalty,
        average_ticket: kpis.average_ticket,
        group_count: kpis.group_count as u64,
        top_groups: kpis
            .top_groups
            .iter()
            .map(|total| ProtoGroupTotal {
                group: total.group.clone(),
                royalty_total: total.royalty_total,
            })
            .collect(),
        mapped_count: kpis.mapped_count as u64,
        mapped_pct: kpis.mapped_pct,
        mapped_monthly_value: kpis.mapped_monthly_value,
        mapped_annual_value: kpis.mapped_annual_value,
        value_to_royalty_index: kpis.value_to_royalty_index,
        mapped_substance_count: kpis.mapped_substance_count as u64,
    }
}

pub fn to_proto_opportunity(opportunity: &Opportunity) -> ProtoOpportunity {
    ProtoOpportunity {
        primary_key: opportunity.primary_key.clone(),
        company_name: opportunity.company_name.clone(),
        controlling_group: opportunity.controlling_group.clone(),
        state: opportunity.state.clone(),
        primary_substance: opportunity.primary_substance.clone(),
        royalty_collected: opportunity.royalty_collected,
        commercial_strategy: opportunity.commercial_strategy.clone(),
        priority_score: opportunity.priority_score,
    }
}
