//! Error taxonomy shared by pipeline construction, the forward pass,
//! and the backend implementations underneath them.

use thiserror::Error;

/// Failure surfaced by the pipeline or a tensor backend.
///
/// Every fallible operation in this crate returns this type. Errors are
/// reported synchronously to the caller; nothing in the crate retries, and
/// `forward` never returns a partial result.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The fixed topology could not be realized at construction time:
    /// parameter storage failed to allocate, or the stage table is
    /// internally inconsistent. Fatal, not recoverable.
    #[error("configuration error in `{stage}`: {reason}")]
    Configuration {
        stage: &'static str,
        reason: String,
    },

    /// A tensor did not have the shape a stage requires. Raised before
    /// the offending computation runs; the pipeline never reshapes or
    /// truncates to compensate.
    #[error("`{stage}` expected shape {expected:?}, got {actual:?}")]
    ShapeMismatch {
        stage: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// A failure propagated untouched from the numerical backend,
    /// allocation exhaustion included.
    #[error("backend failure: {0}")]
    Backend(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PipelineError>;
