//! Error types and error handling utilities.

use std::sync::Arc;

/// A result type returning Tessera errors.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error type for Tessera functions.
#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    /// A recursive combinator was given a negative depth.
    #[error("recursion depth must be nonnegative, found {0}")]
    InvalidDepth(i32),
    /// A [`Context`](crate::context::Context) refused a depth above its configured cap.
    #[error("recursion depth {depth} exceeds the configured maximum of {max}")]
    DepthLimitExceeded {
        /// The requested depth.
        depth: u32,
        /// The largest depth the context allows.
        max: u32,
    },
    /// A colour string was not of the form `#rrggbb` or `#rrggbbaa`.
    #[error("invalid color `{0}`: expected `#rrggbb` or `#rrggbbaa`")]
    InvalidColor(String),
    /// Configuration could not be loaded.
    #[error("configuration error: {0:#}")]
    Config(#[from] Arc<anyhow::Error>),
}

impl From<anyhow::Error> for Error {
    fn from(value: anyhow::Error) -> Self {
        Self::Config(Arc::new(value))
    }
}

/// Converts a signed recursion depth into an unsigned one.
///
/// Negative depths are rejected with [`Error::InvalidDepth`].
pub(crate) fn check_depth(depth: i32) -> Result<u32> {
    u32::try_from(depth).map_err(|_| Error::InvalidDepth(depth))
}
