// Engine library root.
//
// Pipeline: csv bytes -> data::csv_loader (decode + validate) ->
// data::normalizer (canonical records) -> data::derive (computed fields)
// -> data::store (session dataset). analytics::* provides the read-only
// filter/KPI views served over the gRPC surface in services::*.

pub mod analytics;
pub mod config;
pub mod data;
pub mod error;
pub mod services;
