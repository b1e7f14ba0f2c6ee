use std::cmp::Ordering;

// Search-based set intersection algorithms.

use crate::visitor::Visitor;

/// Smallest index greater than `pos` in `values[..length]` whose element is
/// at least `min`, or `length` if there is none.
///
/// Probes exponentially further ahead of `pos` until it overshoots `min`, then
/// binary searches the bracketed range. Costs O(log gap) where gap is the
/// distance from `pos` to the answer. Pass `pos = -1` to search from the
/// start.
pub fn advance_until<T>(values: &[T], pos: isize, length: usize, min: T) -> usize
where
    T: Ord + Copy,
{
    debug_assert!(pos >= -1);
    let length = length.min(values.len());
    let lower = (pos + 1) as usize;

    if lower >= length || values[lower] >= min {
        return lower;
    }

    let mut span = 1;
    while lower + span < length && values[lower + span] < min {
        span *= 2;
    }

    let upper = if lower + span < length { lower + span } else { length - 1 };

    match values[upper].cmp(&min) {
        Ordering::Equal => return upper,
        Ordering::Less => return length,
        Ordering::Greater => {}
    }

    // values[lower + span / 2] < min < values[upper]
    let lo = (lower + span / 2 + 1) as isize;
    binary_search(values, min, lo, upper as isize)
}

/// Intersects by galloping through `large` for every element of `small`.
///
/// Correct for any pair of inputs but only pays off when `small` is much
/// smaller than `large`.
pub fn galloping<T, V>(small: &[T], large: &[T], visitor: &mut V)
where
    T: Ord + Copy,
    V: Visitor<T>,
{
    if small.is_empty() || large.is_empty() {
        return;
    }

    let mut pos: isize = -1;

    for &target in small {
        let idx = advance_until(large, pos, large.len(), target);
        if idx == large.len() {
            return;
        }

        if large[idx] == target {
            visitor.visit(target);
            pos = idx as isize;
        } else {
            pos = idx as isize - 1;
        }
    }
}

/// [galloping] writing the result over the front of `small`.
/// Returns the result length.
pub fn galloping_inplace<T>(small: &mut [T], large: &[T]) -> usize
where
    T: Ord + Copy,
{
    let mut pos: isize = -1;
    let mut count = 0;

    for i in 0..small.len() {
        let target = small[i];
        let idx = advance_until(large, pos, large.len(), target);
        if idx == large.len() {
            break;
        }

        if large[idx] == target {
            small[count] = target;
            count += 1;
            pos = idx as isize;
        } else {
            pos = idx as isize - 1;
        }
    }

    count
}

/// [galloping] writing the result over the front of `large`.
/// Returns the result length.
pub fn galloping_retain<T>(large: &mut [T], small: &[T]) -> usize
where
    T: Ord + Copy,
{
    let mut pos: isize = -1;
    let mut count = 0;

    for &target in small {
        let idx = advance_until(large, pos, large.len(), target);
        if idx == large.len() {
            break;
        }

        // count <= idx, and the search resumes past idx
        if large[idx] == target {
            large[count] = target;
            count += 1;
            pos = idx as isize;
        } else {
            pos = idx as isize - 1;
        }
    }

    count
}

/// Index of `target` within `set[lo..=hi]`, or of the first element greater
/// than it.
pub fn binary_search<T>(
    set: &[T],
    target: T,
    mut lo: isize,
    mut hi: isize) -> usize
where
    T: Ord + Copy,
{
    while lo <= hi {

        let mid = lo + (hi - lo) / 2;
        let actual = set[mid as usize];

        match actual.cmp(&target) {
            Ordering::Less    => lo = mid + 1,
            Ordering::Greater => hi = mid - 1,
            Ordering::Equal   => return mid as usize,
        }
    }

    lo as usize
}
