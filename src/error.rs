use thiserror::Error;

#[derive(Error, Debug)]
pub enum TechScanError {
    #[error("invalid keyword taxonomy: {0}")]
    Taxonomy(String),

    #[error("folder not found: {0}")]
    FolderNotFound(String),

    #[error("report write error: {0}")]
    Report(String),

    #[error("worker pool error: {0}")]
    WorkerPool(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TechScanError>;
