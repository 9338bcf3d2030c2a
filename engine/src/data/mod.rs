pub mod csv_loader;
pub mod derive;
pub mod exporter;
pub mod locale;
pub mod normalizer;
pub mod schema;
pub mod store;
