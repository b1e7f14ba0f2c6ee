//! Capacity growth policy for array containers.
//!
//! Small containers double, medium ones grow by half and large ones by a
//! quarter. The result is clamped to a ceiling, and a target that lands
//! within 1/16 of the ceiling snaps to it so a container about to fill up
//! does not reallocate several more times on the way.

use tracing::{trace, warn};

use crate::{Error, Result, DEFAULT_CAPACITY, DEFAULT_MAX_SIZE, MAX_CAPACITY};

/// Unclamped next capacity after `capacity`.
#[inline]
pub fn grow(capacity: usize) -> usize {
    match capacity {
        0 => DEFAULT_CAPACITY,
        c if c < 64 => c * 2,
        c if c < 1024 => c * 3 / 2,
        c => c * 5 / 4,
    }
}

/// Hard maximum used when at least `min` slots are required.
#[inline]
pub fn ceiling(min: usize) -> usize {
    if min <= DEFAULT_MAX_SIZE {
        DEFAULT_MAX_SIZE
    } else {
        MAX_CAPACITY
    }
}

/// Capacity to grow to from `capacity` when at least `min` slots are needed
/// and no more than `max` may be allocated.
pub fn target_capacity(capacity: usize, min: usize, max: usize) -> usize {
    let target = grow(capacity).max(min).min(max);
    if target > max - max / 16 {
        max
    } else {
        target
    }
}

/// Replaces `values` with a buffer able to hold `capacity` elements.
///
/// With `preserve` the current elements are copied across, otherwise the new
/// buffer starts empty. On failure `values` is left untouched.
pub fn reallocate(values: &mut Vec<u16>, capacity: usize, preserve: bool) -> Result<()> {
    let mut buffer = Vec::new();
    if let Err(source) = buffer.try_reserve_exact(capacity) {
        warn!(requested = capacity, "array container allocation failed");
        return Err(Error::OutOfMemory { requested: capacity, source });
    }
    if preserve {
        buffer.extend_from_slice(values);
    }
    *values = buffer;
    Ok(())
}

/// Grows `values` so it holds at least `min` elements, updating `capacity`.
pub(crate) fn grow_buffer(
    values: &mut Vec<u16>,
    capacity: &mut usize,
    min: usize,
    preserve: bool) -> Result<()>
{
    let min = min.min(MAX_CAPACITY);
    let target = target_capacity(*capacity, min, ceiling(min));

    trace!(from = *capacity, to = target, preserve, "growing array container");

    reallocate(values, target, preserve)?;
    *capacity = target;
    Ok(())
}
