// Handler for the GetStrategicAnalysis RPC: Pareto concentration,
// opportunity gap, and capture simulation over the filtered view.

use std::sync::Arc;

use tokio::sync::RwLock;
use tonic::{Response, Status};

use super::helpers;
use crate::analytics::{filters, strategic};
use crate::data::store::DashboardStore;
use crate::error::EngineError;
use crate::services::{ProtoCaptureProjection, StrategicRequest, StrategicResponse};

pub async fn handle_strategic_analysis(
    req: StrategicRequest,
    store: Arc<RwLock<DashboardStore>>,
) -> Result<Response<StrategicResponse>, Status> {
    let spec = helpers::filter_spec_from_proto(req.filters);
    let limit = if req.top_opportunities == 0 {
        strategic::DEFAULT_TOP_OPPORTUNITIES
    } else {
        req.top_opportunities as usize
    };
    let capture_pct = if req.capture_pct <= 0.0 {
        strategic::DEFAULT_CAPTURE_PCT
    } else {
        req.capture_pct
    };

    let guard = store.read().await;
    let records = guard.records().ok_or(EngineError::NoDataset)?;
    let filtered = filters::apply_filters(records, &spec);
    drop(guard);

    let (_, pareto) = strategic::pareto_slice(&filtered);
    let opportunities = strategic::top_opportunities(&filtered, limit);
    let projection = strategic::simulate_capture(&filtered, capture_pct);

    Ok(Response::new(StrategicResponse {
        pareto_mine_count: pareto.mine_count as u64,
        pareto_share_of_mines: pareto.share_of_mines,
        pareto_royalty_total: pareto.royalty_total,
        pareto_mapped_count: pareto.mapped_count as u64,
        opportunities: opportunities
            .iter()
            .map(helpers::to_proto_opportunity)
            .collect(),
        projection: Some(ProtoCaptureProjection {
            capture_pct: projection.capture_pct,
            annual_value: projection.annual_value,
            monthly_value: projection.monthly_value,
            priority_count: projection.priority_count as u64,
            priority_ticket: projection.priority_ticket,
        }),
    }))
}
