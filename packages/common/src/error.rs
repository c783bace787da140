use std::path::PathBuf;
use thiserror::Error;

/// Common error type shared by the folio crates
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{} not found", .0.display())]
    NotFound(PathBuf),
}
