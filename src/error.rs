use std::collections::TryReserveError;

use thiserror::Error;

/// Errors that can occur when operating on an array container.
#[derive(Debug, Error)]
pub enum Error {
    #[error("out of memory growing array container to {requested} elements")]
    OutOfMemory {
        requested: usize,
        #[source]
        source: TryReserveError,
    },
    #[error("capacity {requested} exceeds the 16-bit key universe")]
    CapacityOverflow { requested: usize },
    #[error("input is not strictly increasing at index {index}")]
    NotStrictlyIncreasing { index: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
