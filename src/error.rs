use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RankError {
    #[error("Job description not found: {0}")]
    MissingJobDescription(PathBuf),
    #[error("Resume folder not found: {0}")]
    MissingResumeDir(PathBuf),
    #[error(
        "No supported resumes ({exts}) found in {0}",
        exts = crate::extract::SUPPORTED_EXTENSIONS.join(", ")
    )]
    NoResumes(PathBuf),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to extract text from {path}: {reason}")]
    Extraction { path: PathBuf, reason: String },
    #[error("Failed to fetch job description from {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[error("Similarity backend failed: {0}")]
    Similarity(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("top_k must be at least 1")]
    InvalidTopK,
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl RankError {
    /// Errors caused by what the caller passed in, as opposed to a backend failing.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            RankError::MissingJobDescription(_)
                | RankError::MissingResumeDir(_)
                | RankError::NoResumes(_)
                | RankError::Read { .. }
                | RankError::Extraction { .. }
                | RankError::InvalidConfig(_)
                | RankError::InvalidTopK
        )
    }
}

pub type Result<T> = std::result::Result<T, RankError>;
