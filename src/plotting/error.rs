//! Error types for the rendering engine.

use std::io;

use thiserror::Error;

/// Errors raised while building or writing a figure.
#[derive(Debug, Error)]
pub enum PlotError {
    /// Error while writing the rendered figure
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Series data that cannot be drawn (length mismatch, non-finite extent)
    #[error("Invalid data: {0}")]
    InvalidData(String),
    /// Invalid figure, axes or output configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// Empty data provided where non-empty data is required
    #[error("Empty data provided")]
    EmptyData,
}

/// Result type alias for rendering operations.
pub type PlotResult<T> = Result<T, PlotError>;
