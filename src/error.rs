//! Error taxonomy of the plotting front-end.

use std::path::PathBuf;

use thiserror::Error;

use crate::numeric::NumericError;
use crate::plotting::PlotError;

/// Errors raised while setting up, dispatching or rendering a plot.
///
/// `Configuration` and `Value` are the two classes instruction authors see:
/// the former for missing or contradictory fields, the latter for fields that
/// are present but semantically invalid. The remaining variants wrap
/// collaborator failures.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or contradictory instruction fields
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Semantically invalid content
    #[error("value error: {0}")]
    Value(String),

    /// Observable or expression evaluation failed
    #[error("evaluation error: {0}")]
    Evaluation(String),

    #[error("failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed data file '{path}': {message}")]
    DataFile { path: PathBuf, message: String },

    #[error(transparent)]
    Render(#[from] PlotError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    pub fn value(message: impl Into<String>) -> Self {
        Error::Value(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub fn data_file(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::DataFile {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Numerical failures stem from the data a content item points at.
impl From<NumericError> for Error {
    fn from(err: NumericError) -> Self {
        Error::Value(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
