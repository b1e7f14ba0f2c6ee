#![cfg_attr(feature = "simd", feature(portable_simd))]

//! Array container for a roaring-style bitmap: a sorted, deduplicated,
//! growable array of 16-bit keys with merge-based union and adaptive
//! (merge / galloping / batch) intersection.

pub mod container;
pub mod growth;
pub mod intersect;
pub mod search;
pub mod union;
pub mod visitor;
mod error;

pub use container::ArrayContainer;
pub use error::{Error, Result};

/// Slots allocated by a fresh container.
pub const DEFAULT_CAPACITY: usize = 16;

/// Conventional array/bitmap crossover. Growth snaps to this ceiling while
/// the required size still fits under it.
pub const DEFAULT_MAX_SIZE: usize = 4096;

/// Size of the 16-bit key universe.
pub const MAX_CAPACITY: usize = 1 << 16;

pub trait Set<T>
where
    T: Clone
{
    fn from_sorted(sorted: &[T]) -> Result<Self>
    where
        Self: Sized;
}
