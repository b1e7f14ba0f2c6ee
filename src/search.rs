//! Ordered search over the live prefix of a container.

use std::cmp::Ordering;

/// Binary search of a strictly increasing slice.
///
/// Returns `Ok(index)` when `target` is present and `Err(insertion_point)`
/// otherwise, so a single pass tells the caller both whether the value is
/// there and where it belongs.
///
/// The loop narrows the window with a conditional move instead of a
/// three-way branch and only compares for equality once at the end.
#[inline]
pub fn search<T>(values: &[T], target: T) -> Result<usize, usize>
where
    T: Ord + Copy,
{
    if values.is_empty() {
        return Err(0);
    }

    let mut base = 0;
    let mut size = values.len();

    while size > 1 {
        let half = size / 2;
        let mid = base + half;
        base = if values[mid] <= target { mid } else { base };
        size -= half;
    }

    match values[base].cmp(&target) {
        Ordering::Equal   => Ok(base),
        Ordering::Less    => Err(base + 1),
        Ordering::Greater => Err(base),
    }
}

/// [search] packed into one signed value: the index when found, otherwise
/// `-(insertion_point + 1)`.
#[inline]
pub fn search_signed<T>(values: &[T], target: T) -> isize
where
    T: Ord + Copy,
{
    match search(values, target) {
        Ok(index) => index as isize,
        Err(insertion) => -(insertion as isize) - 1,
    }
}
