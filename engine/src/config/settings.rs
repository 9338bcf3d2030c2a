// Engine settings, loaded from an optional JSON file with environment
// variable overrides.
use std::path::Path;

use serde::Deserialize;

use crate::error::EngineError;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EngineSettings {
    pub host: String,
    pub port: u16,
    /// Records per streamed GetTable page.
    pub table_chunk_size: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            host: "127.0.0.1".to_string(),
            port: 50061,
            table_chunk_size: 256,
        }
    }
}

impl EngineSettings {
    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| EngineError::Config(format!("invalid settings file: {}", e)))
    }

    /// Settings file named by DASHBOARD_CONFIG (when set), then
    /// DASHBOARD_HOST / DASHBOARD_PORT overrides on top.
    pub fn load() -> Self {
        let mut settings = match std::env::var("DASHBOARD_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path)).unwrap_or_else(|e| {
                tracing::warn!(error = %e, path = %path, "falling back to default settings");
                Self::default()
            }),
            Err(_) => Self::default(),
        };

        if let Ok(host) = std::env::var("DASHBOARD_HOST") {
            settings.host = host;
        }
        if let Ok(port) = std::env::var("DASHBOARD_PORT") {
            match port.parse() {
                Ok(port) => settings.port = port,
                Err(_) => tracing::warn!(value = %port, "ignoring invalid DASHBOARD_PORT"),
            }
        }
        settings
    }
}
