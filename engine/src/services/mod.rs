// gRPC surface of the engine. The generated protobuf types live in the
// `generated` module; domain-model lookalikes are re-exported under Proto*
// aliases to keep them distinct from shared::models at use sites.

pub mod dashboard_service;

mod generated {
    tonic::include_proto!("dashboard");
}

pub use generated::dashboard_engine_client::DashboardEngineClient;
pub use generated::dashboard_engine_server::{DashboardEngine, DashboardEngineServer};

pub use generated::{
    CaptureProjection as ProtoCaptureProjection, ClearRequest, ClearResponse, ExportRequest,
    ExportResponse, FilterSpec as ProtoFilterSpec, GroupTotal as ProtoGroupTotal, KpiRequest,
    KpiResponse, LoadCsvRequest, LoadCsvResponse, MappingStatus as ProtoMappingStatus,
    MappingStatusFilter as ProtoMappingStatusFilter, MineRecord as ProtoMineRecord,
    Opportunity as ProtoOpportunity, RoyaltyRange as ProtoRoyaltyRange, StrategicRequest,
    StrategicResponse, SummaryRequest, SummaryResponse, TableRequest, TableResponse,
    TriStateFilter as ProtoTriStateFilter,
};
