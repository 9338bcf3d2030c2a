// Handler for the ComputeKpis RPC: filter, then aggregate.

use std::sync::Arc;

use tokio::sync::RwLock;
use tonic::{Response, Status};

use super::helpers;
use crate::analytics::{filters, kpis};
use crate::data::store::DashboardStore;
use crate::error::EngineError;
use crate::services::{KpiRequest, KpiResponse};

pub async fn handle_compute_kpis(
    req: KpiRequest,
    store: Arc<RwLock<DashboardStore>>,
) -> Result<Response<KpiResponse>, Status> {
    let spec = helpers::filter_spec_from_proto(req.filters);
    let top_n = if req.top_groups == 0 {
        kpis::DEFAULT_TOP_GROUPS
    } else {
        req.top_groups as usize
    };

    let guard = store.read().await;
    let records = guard.records().ok_or(EngineError::NoDataset)?;
    let filtered = filters::apply_filters(records, &spec);
    drop(guard);

    let set = kpis::compute_kpis(&filtered, top_n);
    Ok(Response::new(helpers::to_kpi_response(&set)))
}
