//! .
//!
//! Every failure of the engine is a precondition violation reported synchronously to the caller;
//! nothing is retried or recovered internally.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
  /// An argument is outside of its domain: zero part count, zero-sized canvas,
  /// non-positive pruning fraction, unknown metric name, non-finite seed.
  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  /// A render pass is already in flight on this renderer.
  #[error("renderer is busy with another pass")]
  Busy,
}

impl Error {
  pub(crate) fn invalid(msg: impl Into<String>) -> Self {
    Error::InvalidArgument(msg.into())
  }
}

/// Convenient wrapper around `std::Result`.
pub type Result<T> = std::result::Result<T, Error>;
