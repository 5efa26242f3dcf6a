//! Error types shared by frames, views and converters.

use thiserror::Error;

/// Errors raised while building, selecting, splitting or converting frames.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    /// The source is not a rectangular table (or could not be parsed as one).
    #[error("Invalid frame data: {0}")]
    InvalidData(String),

    /// A positional selection key is longer than the number of index dimensions.
    #[error("Selection contains {key_len} dimensions, view only has {ndims} index dimensions")]
    DimensionMismatch { key_len: usize, ndims: usize },

    /// One or more requested dimensions are not columns of the view.
    #[error("Following dimensions could not be found: {}", .0.join(", "))]
    UnknownDimension(Vec<String>),

    /// `apply` was given a name that has no registered operation.
    #[error("Unsupported operation '{0}'")]
    UnsupportedOperation(String),

    /// A registered operation rejected its arguments.
    #[error("Invalid argument for '{operation}': {message}")]
    InvalidArgument { operation: String, message: String },

    /// A column could not be read the way the caller asked for.
    #[error("Column '{column}' holds {found} values, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: String,
        found: String,
    },

    /// Grids hold a maximum of two dimensions.
    #[error("Grids hold a maximum of two dimensions, got {0}")]
    TooManyGridDimensions(usize),

    /// A derived view was given a table with the wrong number of dimensions.
    #[error("{kind} requires {requirement}, got {index} index and {value} value dimensions")]
    IncompatibleShape {
        kind: String,
        requirement: String,
        index: usize,
        value: usize,
    },

    /// A reducer returned a matrix of unexpected shape.
    #[error("Reducer '{reducer}' returned shape {got:?}, expected {expected:?}")]
    ReductionShape {
        reducer: String,
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// An operation name was registered twice (or is empty).
    #[error("Operation '{0}' is already registered or has an invalid name")]
    DuplicateOperation(String),
}

pub type Result<T> = std::result::Result<T, FrameError>;
