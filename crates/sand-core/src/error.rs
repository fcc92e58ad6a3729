use thiserror::Error;

use crate::parameter::ParameterKind;

/// Recoverable failures of the trajectory store and parameter entry.
///
/// Calling the integrator on an empty trajectory is not represented here:
/// that is a broken caller and panics instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The store already holds its maximum number of points.
    #[error("trajectory is full ({capacity} points)")]
    CapacityExceeded { capacity: usize },

    /// A read past the end of the trajectory.
    #[error("index {index} out of range for trajectory of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Text typed into a parameter field was unparsable or out of range.
    #[error("invalid {kind} input {input:?}")]
    InvalidParameterInput { kind: ParameterKind, input: String },
}

/// Result type alias for ergonomic use.
pub type Result<T> = std::result::Result<T, Error>;
