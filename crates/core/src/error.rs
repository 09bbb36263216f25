use std::convert::Infallible;

use thiserror::Error;

/// Errors that can happen while building or encoding segments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A segment input was neither text, a [`Segment`](crate::Segment), nor a descriptor
    /// with a `name`.
    #[error("invalid segment input: {0}")]
    InvalidSegmentInput(String),
}

impl Error {
    /// Create an [`Error::InvalidSegmentInput`] with the given reason.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidSegmentInput(reason.into())
    }
}

impl From<Infallible> for Error {
    fn from(infallible: Infallible) -> Self {
        match infallible {}
    }
}
