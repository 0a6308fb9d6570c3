use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GgError {
    #[error("Error loading GitHub token from {}", path.display())]
    Credential {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Server returned next page {next_page} after page {page}")]
    Pagination { page: u32, next_page: u32 },

    #[error("Unknown sort key {0:?}: expected one of name, created, updated, pushed")]
    UnknownSortKey(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
