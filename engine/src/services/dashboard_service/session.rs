// Handlers for session introspection and reset. Both are valid whether or
// not a dataset is loaded.

use std::sync::Arc;

use tokio::sync::RwLock;
use tonic::{Response, Status};

use crate::data::store::DashboardStore;
use crate::services::{ClearRequest, ClearResponse, SummaryRequest, SummaryResponse};

pub async fn handle_get_summary(
    _req: SummaryRequest,
    store: Arc<RwLock<DashboardStore>>,
) -> Result<Response<SummaryResponse>, Status> {
    let guard = store.read().await;
    let response = match guard.summary() {
        Some(summary) => SummaryResponse {
            loaded: true,
            dataset_version: summary.version,
            row_count: summary.row_count as u64,
            column_count: summary.column_count as u64,
            loaded_at_ms: summary.loaded_at.timestamp_millis(),
        },
        None => SummaryResponse::default(),
    };
    Ok(Response::new(response))
}

pub async fn handle_clear_data(
    _req: ClearRequest,
    store: Arc<RwLock<DashboardStore>>,
) -> Result<Response<ClearResponse>, Status> {
    let mut guard = store.write().await;
    let cleared = guard.clear();
    drop(guard);

    tracing::info!(cleared, "session reset requested");
    Ok(Response::new(ClearResponse { cleared }))
}
