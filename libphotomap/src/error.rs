//! Objects related to reporting errors from this library

use crate::map::MarkerId;

/// A list of error types that can occur within this library
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("resource '{resource}' is unavailable: {reason}")]
    ResourceUnavailable { resource: String, reason: String },

    #[error("dataset is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("dataset repeats columns: {}", .0.join(", "))]
    DuplicateColumns(Vec<String>),

    #[error("unable to parse dataset")]
    Parse(#[from] csv::Error),

    #[error("invalid record on line {line}: {reason}")]
    RecordInvalid { line: u64, reason: String },

    #[error("render target '{0}' is missing")]
    RenderTargetMissing(String),

    #[error("invalid map configuration: {0}")]
    InvalidConfig(String),

    #[error("no marker with id {0}")]
    UnknownMarker(MarkerId),
}

/// A convenience type alias for a [Result] with [Error] as its error type
pub type Result<T, E = Error> = std::result::Result<T, E>;
