use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("failed to read grade sheet {}", .path.display())]
    Sheet {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("grade sheet {} has no header row", .0.display())]
    MissingHeader(PathBuf),

    #[error("GRADE_AUDIT_BATCH_YEAR must be a 4-digit year, got {0:?}")]
    InvalidBatchYear(String),

    #[error("No data found, please check the flags")]
    NoData,

    #[error("failed to write report to {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode report")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AuditError>;
