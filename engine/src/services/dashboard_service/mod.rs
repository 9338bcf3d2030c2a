// DashboardEngine gRPC service: holds the session store handle and
// dispatches each RPC to its handler module.

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status};

use super::{
    ClearRequest, ClearResponse, DashboardEngine, ExportRequest, ExportResponse, KpiRequest,
    KpiResponse, LoadCsvRequest, LoadCsvResponse, StrategicRequest, StrategicResponse,
    SummaryRequest, SummaryResponse, TableRequest, TableResponse,
};
use crate::config::settings::EngineSettings;
use crate::data::store::DashboardStore;

pub mod compute_kpis;
pub mod export_csv;
pub mod get_table;
pub mod helpers;
pub mod load_csv;
pub mod session;
pub mod strategic_analysis;

pub struct DashboardService {
    store: Arc<RwLock<DashboardStore>>,
    settings: EngineSettings,
}

impl DashboardService {
    pub fn new(store: Arc<RwLock<DashboardStore>>, settings: EngineSettings) -> Self {
        DashboardService { store, settings }
    }
}

#[tonic::async_trait]
impl DashboardEngine for DashboardService {
    async fn load_csv(
        &self,
        request: Request<LoadCsvRequest>,
    ) -> Result<Response<LoadCsvResponse>, Status> {
        let req = request.into_inner();
        tracing::info!(path = %req.file_path, "received LoadCsv request");
        load_csv::handle_load_csv(req, self.store.clone()).await
    }

    type GetTableStream = ReceiverStream<Result<TableResponse, Status>>;
    async fn get_table(
        &self,
        request: Request<TableRequest>,
    ) -> Result<Response<Self::GetTableStream>, Status> {
        let req = request.into_inner();
        tracing::info!("received GetTable request");
        get_table::handle_get_table(req, self.store.clone(), self.settings.table_chunk_size).await
    }

    async fn compute_kpis(
        &self,
        request: Request<KpiRequest>,
    ) -> Result<Response<KpiResponse>, Status> {
        let req = request.into_inner();
        tracing::info!(top_groups = req.top_groups, "received ComputeKpis request");
        compute_kpis::handle_compute_kpis(req, self.store.clone()).await
    }

    async fn export_csv(
        &self,
        request: Request<ExportRequest>,
    ) -> Result<Response<ExportResponse>, Status> {
        let req = request.into_inner();
        tracing::info!("received ExportCsv request");
        export_csv::handle_export_csv(req, self.store.clone()).await
    }

    async fn get_strategic_analysis(
        &self,
        request: Request<StrategicRequest>,
    ) -> Result<Response<StrategicResponse>, Status> {
        let req = request.into_inner();
        tracing::info!(
            top_opportunities = req.top_opportunities,
            capture_pct = req.capture_pct,
            "received GetStrategicAnalysis request"
        );
        strategic_analysis::handle_strategic_analysis(req, self.store.clone()).await
    }

    async fn get_summary(
        &self,
        request: Request<SummaryRequest>,
    ) -> Result<Response<SummaryResponse>, Status> {
        let req = request.into_inner();
        tracing::debug!("received GetSummary request");
        session::handle_get_summary(req, self.store.clone()).await
    }

    async fn clear_data(
        &self,
        request: Request<ClearRequest>,
    ) -> Result<Response<ClearResponse>, Status> {
        let req = request.into_inner();
        tracing::info!("received ClearData request");
        session::handle_clear_data(req, self.store.clone()).await
    }
}
