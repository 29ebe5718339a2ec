use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("Error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not read title")]
    MissingTitle,

    #[error("Could not match date")]
    MissingDate,

    #[error("Could not parse time {value}: {reason}")]
    DateParse { value: String, reason: String },

    #[error("Could not serialize post: {0}")]
    Marshal(#[from] serde_json::Error),

    #[error("Could not POST: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Could not read response body: {0}")]
    ResponseRead(#[source] reqwest::Error),

    #[error("{failed} file(s) failed validation, nothing was submitted")]
    BatchRejected { failed: usize },
}

impl PostError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PostError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn date_parse(value: &str, reason: impl ToString) -> Self {
        PostError::DateParse {
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
