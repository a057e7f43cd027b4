use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced past a single unit of work. Setup errors
/// (`InvalidTarget`, `Workspace`) are fatal; `Fetch` aborts the
/// pipeline for the current target only.
#[derive(Error, Debug)]
pub enum HunterError {
    #[error("invalid target '{target}': {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to create workspace directory {}: {source}", .path.display())]
    Workspace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{url} answered with status {status}")]
    Fetch {
        url: String,
        status: reqwest::StatusCode,
    },
}
