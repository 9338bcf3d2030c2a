// Engine main entry point.
use std::sync::Arc;

use engine::config::settings::EngineSettings;
use engine::data::store::DashboardStore;
use engine::services::dashboard_service::DashboardService;
use engine::services::DashboardEngineServer;
use tokio::sync::RwLock;
use tonic::transport::Server;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    info!("Starting CFEM-CRM dashboard engine...");

    let settings = EngineSettings::load();
    let addr = format!("{}:{}", settings.host, settings.port).parse()?;
    info!("engine will listen on {}", addr);

    let store = Arc::new(RwLock::new(DashboardStore::new()));
    let service = DashboardService::new(store, settings);

    Server::builder()
        .add_service(DashboardEngineServer::new(service))
        .serve(addr)
        .await?;

    Ok(())
}
