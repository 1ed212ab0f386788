//! Error types for forge-core

use std::path::PathBuf;

/// Icon index errors
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    #[error("unsupported icon format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Preview rasterization errors
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("malformed vector image {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Install action errors
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("failed to run installer: {0}")]
    Io(#[from] std::io::Error),
}
