use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV system error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvData(String),

    #[error("Upload is missing required columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("No dataset loaded in the current session")]
    NoDataset,

    #[error("Export error: {0}")]
    Export(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl From<EngineError> for tonic::Status {
    fn from(err: EngineError) -> Self {
        tracing::error!("mapping EngineError to tonic::Status: {:?}", err);
        match err {
            EngineError::Config(msg) => {
                tonic::Status::failed_precondition(format!("Configuration error: {}", msg))
            }
            EngineError::Csv { source } => {
                tonic::Status::invalid_argument(format!("CSV system error: {}", source))
            }
            EngineError::Io { source } => {
                tonic::Status::internal(format!("I/O error: {}", source))
            }
            EngineError::CsvData(msg) => {
                tonic::Status::invalid_argument(format!("CSV data format error: {}", msg))
            }
            EngineError::Schema { missing } => tonic::Status::invalid_argument(format!(
                "Upload is missing required columns: {}",
                missing.join(", ")
            )),
            EngineError::NoDataset => {
                tonic::Status::failed_precondition("No dataset loaded; call LoadCsv first")
            }
            EngineError::Export(msg) => tonic::Status::internal(format!("Export error: {}", msg)),
            EngineError::Anyhow(source) => {
                tonic::Status::internal(format!("An internal error occurred: {}", source))
            }
        }
    }
}
