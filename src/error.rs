//! Error taxonomy for loading, merging and saving the OpenClaw documents.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentConfigError {
    #[error("{} not found", .path.display())]
    MissingFile { path: PathBuf },

    #[error("failed reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} required")]
    MissingRequiredInput(&'static str),

    #[error("agents.defaults entry is missing from the application config")]
    MissingDefaultsEntry,

    #[error("malformed document: `{field}` must be a JSON object")]
    MalformedDocument { field: String },

    #[error("failed writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = AgentConfigError> = std::result::Result<T, E>;
