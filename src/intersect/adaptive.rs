//! Adaptive set intersection algorithms.
// Thresholds follow CRoaring's array container intersection:
// https://github.com/RoaringBitmap/CRoaring

use std::fmt;

use smallvec::{SmallVec, smallvec};
use tracing::trace;

use crate::{
    intersect::{
        advance_until, batch_native, branchless_merge, broadcast_native, galloping,
        wide_broadcast_native, BATCH_ENABLED,
    },
    visitor::Visitor,
};

/// Size ratio from which the scalar dispatcher gallops through the larger set.
pub const GALLOPING_THRESHOLD: usize = 4;

/// Size ratio above which the batch dispatcher broadcasts elements of the
/// smaller set instead of matching block against block.
pub const BROADCAST_THRESHOLD: usize = 4;

/// Size ratio above which broadcasting uses the wide window.
pub const WIDE_BROADCAST_THRESHOLD: usize = 32;

/// Intersection algorithm picked for a pair of inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Linear two-pointer merge.
    Merge,
    /// Iterate the smaller set, gallop through the larger one.
    Galloping,
    /// Block-against-block matching with [crate::intersect::NativeBatch].
    Batch,
    /// Each element of the smaller set against a two-block window of the
    /// larger one.
    Broadcast,
    /// As [Strategy::Broadcast] with a four-block window.
    WideBroadcast,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Merge,
        Strategy::Galloping,
        Strategy::Batch,
        Strategy::Broadcast,
        Strategy::WideBroadcast,
    ];

    /// Strategy for inputs of the given sizes on this build.
    #[inline]
    pub fn select(len_a: usize, len_b: usize) -> Self {
        Self::select_for(len_a, len_b, BATCH_ENABLED)
    }

    /// Strategy for inputs of the given sizes, with or without batch
    /// matching available.
    pub fn select_for(len_a: usize, len_b: usize, batch: bool) -> Self {
        let (small, large) = if len_a <= len_b { (len_a, len_b) } else { (len_b, len_a) };

        if batch {
            if small.saturating_mul(WIDE_BROADCAST_THRESHOLD) < large {
                Strategy::WideBroadcast
            } else if small.saturating_mul(BROADCAST_THRESHOLD) < large {
                Strategy::Broadcast
            } else {
                Strategy::Batch
            }
        } else if small.saturating_mul(GALLOPING_THRESHOLD) <= large {
            Strategy::Galloping
        } else {
            Strategy::Merge
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Merge => "merge",
            Strategy::Galloping => "galloping",
            Strategy::Batch => "batch",
            Strategy::Broadcast => "broadcast",
            Strategy::WideBroadcast => "wide_broadcast",
        })
    }
}

/// Intersects two containers' values with the strategy suited to their
/// sizes.
pub fn adaptive<V>(set_a: &[u16], set_b: &[u16], visitor: &mut V)
where
    V: Visitor<u16>,
{
    intersect_with(Strategy::select(set_a.len(), set_b.len()), set_a, set_b, visitor)
}

/// Intersects with a fixed strategy. Every strategy visits the same values
/// in the same order.
pub fn intersect_with<V>(strategy: Strategy, set_a: &[u16], set_b: &[u16], visitor: &mut V)
where
    V: Visitor<u16>,
{
    let (small, large) = if set_a.len() <= set_b.len() { (set_a, set_b) } else { (set_b, set_a) };

    trace!(%strategy, small = small.len(), large = large.len(), "intersecting");

    match strategy {
        Strategy::Merge => branchless_merge(set_a, set_b, visitor),
        Strategy::Galloping => galloping(small, large, visitor),
        Strategy::Batch => batch_native(set_a, set_b, visitor),
        Strategy::Broadcast => broadcast_native(small, large, visitor),
        Strategy::WideBroadcast => wide_broadcast_native(small, large, visitor),
    }
}

/// Whether two sorted sets share any element. Stops at the first match.
pub fn intersects<T>(set_a: &[T], set_b: &[T]) -> bool
where
    T: Ord + Copy,
{
    let (small, large) = if set_a.len() <= set_b.len() { (set_a, set_b) } else { (set_b, set_a) };

    if small.is_empty() {
        return false;
    }

    if small.len().saturating_mul(GALLOPING_THRESHOLD) <= large.len() {
        let mut pos: isize = -1;
        for &target in small {
            let idx = advance_until(large, pos, large.len(), target);
            if idx == large.len() {
                return false;
            }
            if large[idx] == target {
                return true;
            }
            pos = idx as isize - 1;
        }
        return false;
    }

    let mut idx_s = 0;
    let mut idx_l = 0;
    while idx_s < small.len() && idx_l < large.len() {
        let value_s = small[idx_s];
        let value_l = large[idx_l];
        if value_s == value_l {
            return true;
        }
        idx_s += (value_s < value_l) as usize;
        idx_l += (value_l < value_s) as usize;
    }
    false
}

/// Demaine, E. D., López-Ortiz, A., & Ian Munro, J. (2001). Experiments on
/// adaptive set intersections for text retrieval systems. In Algorithm
/// Engineering and Experimentation: Third International Workshop, ALENEX 2001
/// Washington, DC, USA, January 5–6, 2001 Revised Papers 3 (pp. 91-104).
/// Springer Berlin Heidelberg.
///
/// Walks the smallest set and gallops every other set forward to each of its
/// elements. A single set is visited as is; no sets visit nothing.
pub fn small_adaptive<T, S, V>(sets: &[S], visitor: &mut V)
where
    T: Ord + Copy,
    S: AsRef<[T]>,
    V: Visitor<T>,
{
    debug_assert!(
        sets.iter().all(|set| set.as_ref().windows(2).all(|w| w[0] < w[1]))
    );

    let mut ordered: SmallVec<[&[T]; 8]> =
        sets.iter().map(|set| set.as_ref()).collect();
    ordered.sort_by_key(|set| set.len());

    let Some((&smallest, others)) = ordered.split_first() else {
        return;
    };

    let mut positions: SmallVec<[isize; 8]> = smallvec![-1; others.len()];

    'outer: for &element in smallest {
        for (set, position) in others.iter().zip(positions.iter_mut()) {
            let idx = advance_until(set, *position, set.len(), element);
            if idx == set.len() {
                return;
            }

            if set[idx] != element {
                *position = idx as isize - 1;
                continue 'outer;
            }
            *position = idx as isize;
        }
        visitor.visit(element);
    }
}
