// Handler for the ExportCsv RPC: re-serializes the filtered view to the
// upload's own delimited format.

use std::sync::Arc;

use tokio::sync::RwLock;
use tonic::{Response, Status};

use super::helpers;
use crate::analytics::filters;
use crate::data::exporter;
use crate::data::store::DashboardStore;
use crate::error::EngineError;
use crate::services::{ExportRequest, ExportResponse};

pub async fn handle_export_csv(
    req: ExportRequest,
    store: Arc<RwLock<DashboardStore>>,
) -> Result<Response<ExportResponse>, Status> {
    let spec = helpers::filter_spec_from_proto(req.filters);

    let guard = store.read().await;
    let dataset = guard.dataset().ok_or(EngineError::NoDataset)?;
    let filtered = filters::apply_filters(&dataset.records, &spec);
    let content = exporter::export_csv(&filtered, &dataset.extra_columns)?;
    drop(guard);

    Ok(Response::new(ExportResponse {
        content,
        records_exported: filtered.len() as i32,
    }))
}
