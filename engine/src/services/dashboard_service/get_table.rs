// Handler for the GetTable RPC: applies the filter spec and streams the
// filtered view in pages. A zero-row view streams one empty page; it is a
// valid terminal state, not an error.

use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Response, Status};

use super::helpers;
use crate::analytics::filters;
use crate::data::store::DashboardStore;
use crate::error::EngineError;
use crate::services::{TableRequest, TableResponse};

pub async fn handle_get_table(
    req: TableRequest,
    store: Arc<RwLock<DashboardStore>>,
    chunk_size: usize,
) -> Result<Response<ReceiverStream<Result<TableResponse, Status>>>, Status> {
    let spec = helpers::filter_spec_from_proto(req.filters);

    let guard = store.read().await;
    let records = guard.records().ok_or(EngineError::NoDataset)?;
    let filtered = filters::apply_filters(records, &spec);
    drop(guard);

    tracing::debug!(rows = filtered.len(), "streaming filtered table");

    let (tx, rx) = mpsc::channel(4);
    tokio::spawn(async move {
        if filtered.is_empty() {
            let _ = tx.send(Ok(TableResponse { records: vec![] })).await;
            return;
        }
        for chunk in filtered.chunks(chunk_size.max(1)) {
            let page = TableResponse {
                records: chunk.iter().map(helpers::to_proto_record).collect(),
            };
            if tx.send(Ok(page)).await.is_err() {
                tracing::warn!("table stream receiver dropped mid-stream");
                break;
            }
        }
    });

    Ok(Response::new(ReceiverStream::new(rx)))
}
