use std::collections::TryReserveError;

use thiserror::Error;

/// Failures surfaced by table construction, rehashing and the word counter.
///
/// Lookup and removal misses are not errors; they return `None`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("key space must be non-zero, got {key_space}")]
    InvalidConfiguration { key_space: usize },

    #[error("failed to allocate slot array: {0}")]
    AllocationFailed(#[from] TryReserveError),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}
