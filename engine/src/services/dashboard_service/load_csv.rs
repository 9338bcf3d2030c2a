// Handler for the LoadCsv RPC: runs the whole ingestion pipeline and
// commits the dataset. On any failure nothing is committed and the previous
// dataset, if any, stays in place.

use std::sync::Arc;

use tokio::sync::RwLock;
use tonic::{Response, Status};

use crate::data::csv_loader;
use crate::data::store::DashboardStore;
use crate::services::{LoadCsvRequest, LoadCsvResponse};

pub async fn handle_load_csv(
    req: LoadCsvRequest,
    store: Arc<RwLock<DashboardStore>>,
) -> Result<Response<LoadCsvResponse>, Status> {
    let dataset = match csv_loader::load_dataset(&req.file_path) {
        Ok(dataset) => dataset,
        Err(e) => return Err(e.into()),
    };

    let records_loaded = dataset.records.len() as i32;
    let mut guard = store.write().await;
    let version = guard.commit(dataset);
    drop(guard);

    tracing::info!(
        path = %req.file_path,
        records = records_loaded,
        version = %version,
        "dataset committed to session store"
    );

    Ok(Response::new(LoadCsvResponse {
        success: true,
        message: format!("Loaded {} records", records_loaded),
        records_loaded,
        dataset_version: version.to_string(),
    }))
}
