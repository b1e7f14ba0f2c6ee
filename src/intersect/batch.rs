//! Batch matching: block-against-block comparison of two sorted arrays.
//!
//! Based on the SIMD shuffling intersection of Ilya Katsov (2012),
//! <https://highlyscalable.wordpress.com/2012/06/05/fast-intersection-sorted-lists-sse/>.
//! A block of `LANES` elements of one set is compared with every rotation of a
//! block of the other, the matching lanes are reported as a bitmask, and the
//! block with the smaller maximum is replaced. Elements left over once either
//! side runs out of full blocks are finished with [branchless_merge].
//!
//! Skewed inputs use broadcast matching instead: each element of the small
//! set is compared with a whole window of the large set at once, and windows
//! whose maximum is below it are skipped.
//!
//! The comparator is pluggable. [PortableBatch] is always available, the
//! others use whatever vector unit the target offers. All of them produce the
//! same output as the scalar merge.

use crate::{intersect::branchless_merge, visitor::Visitor};

/// Compares one block of each input.
pub trait BatchCompare {
    /// Elements per block. At most 32.
    const LANES: usize;

    /// Bitmask of the lanes of `block_a` whose value also occurs in
    /// `block_b`. Both blocks hold at least `LANES` elements.
    fn match_lanes(block_a: &[u16], block_b: &[u16]) -> u32;

    /// Whether `value` occurs in the first `LANES` elements of `block`.
    fn contains_value(block: &[u16], value: u16) -> bool;
}

/// Plain fixed-size array comparator, the fallback on every target.
pub struct PortableBatch;

impl BatchCompare for PortableBatch {
    const LANES: usize = 8;

    #[inline]
    fn match_lanes(block_a: &[u16], block_b: &[u16]) -> u32 {
        let v_a: [u16; 8] = std::array::from_fn(|i| block_a[i]);
        let v_b: [u16; 8] = std::array::from_fn(|i| block_b[i]);

        let mut mask = 0;
        for rotation in 0..Self::LANES {
            for lane in 0..Self::LANES {
                let hit = v_a[lane] == v_b[(lane + rotation) % Self::LANES];
                mask |= (hit as u32) << lane;
            }
        }
        mask
    }

    #[inline]
    fn contains_value(block: &[u16], value: u16) -> bool {
        let v_b: [u16; 8] = std::array::from_fn(|i| block[i]);
        v_b.iter().fold(false, |hit, &lane| hit | (lane == value))
    }
}

/// SSE2 compare-and-movemask comparator. SSE2 is part of the x86_64
/// baseline so no runtime detection is needed.
#[cfg(target_arch = "x86_64")]
pub struct Sse2Batch;

#[cfg(target_arch = "x86_64")]
impl BatchCompare for Sse2Batch {
    const LANES: usize = 8;

    #[inline]
    fn match_lanes(block_a: &[u16], block_b: &[u16]) -> u32 {
        use std::arch::x86_64::*;

        let block_a = &block_a[..Self::LANES];
        let block_b = &block_b[..Self::LANES];

        // SAFETY: both blocks are exactly 16 bytes long and the loads are
        // unaligned.
        unsafe {
            let v_a = _mm_loadu_si128(block_a.as_ptr() as *const __m128i);
            let mut v_b = _mm_loadu_si128(block_b.as_ptr() as *const __m128i);

            let mut eq = _mm_cmpeq_epi16(v_a, v_b);
            for _ in 1..Self::LANES {
                // rotate one u16 lane to the left
                v_b = _mm_or_si128(_mm_srli_si128::<2>(v_b), _mm_slli_si128::<14>(v_b));
                eq = _mm_or_si128(eq, _mm_cmpeq_epi16(v_a, v_b));
            }

            let packed = _mm_packs_epi16(eq, _mm_setzero_si128());
            (_mm_movemask_epi8(packed) as u32) & 0xFF
        }
    }

    #[inline]
    fn contains_value(block: &[u16], value: u16) -> bool {
        use std::arch::x86_64::*;

        let block = &block[..Self::LANES];

        // SAFETY: the block is exactly 16 bytes long and the load is
        // unaligned.
        unsafe {
            let v_a = _mm_set1_epi16(value as i16);
            let v_b = _mm_loadu_si128(block.as_ptr() as *const __m128i);
            _mm_movemask_epi8(_mm_cmpeq_epi16(v_a, v_b)) != 0
        }
    }
}

/// `std::simd` comparator.
#[cfg(feature = "simd")]
pub struct SimdBatch;

#[cfg(feature = "simd")]
impl BatchCompare for SimdBatch {
    const LANES: usize = 8;

    #[inline]
    fn match_lanes(block_a: &[u16], block_b: &[u16]) -> u32 {
        use std::simd::{cmp::SimdPartialEq, u16x8};

        let v_a = u16x8::from_slice(block_a);
        let v_b = u16x8::from_slice(block_b);

        let mask = v_a.simd_eq(v_b)
            | v_a.simd_eq(v_b.rotate_elements_left::<1>())
            | v_a.simd_eq(v_b.rotate_elements_left::<2>())
            | v_a.simd_eq(v_b.rotate_elements_left::<3>())
            | v_a.simd_eq(v_b.rotate_elements_left::<4>())
            | v_a.simd_eq(v_b.rotate_elements_left::<5>())
            | v_a.simd_eq(v_b.rotate_elements_left::<6>())
            | v_a.simd_eq(v_b.rotate_elements_left::<7>());

        mask.to_bitmask() as u32
    }

    #[inline]
    fn contains_value(block: &[u16], value: u16) -> bool {
        use std::simd::{cmp::SimdPartialEq, u16x8};

        u16x8::splat(value).simd_eq(u16x8::from_slice(&block[..Self::LANES])).any()
    }
}

/// Comparator used by the adaptive dispatcher on this build.
#[cfg(feature = "simd")]
pub type NativeBatch = SimdBatch;
#[cfg(all(not(feature = "simd"), target_arch = "x86_64"))]
pub type NativeBatch = Sse2Batch;
#[cfg(all(not(feature = "simd"), not(target_arch = "x86_64")))]
pub type NativeBatch = PortableBatch;

/// Whether [NativeBatch] is backed by a vector unit. Without one, batch
/// matching is not faster than the scalar merge and the dispatcher skips it.
pub const BATCH_ENABLED: bool = cfg!(any(feature = "simd", target_arch = "x86_64"));

/// Batch intersection using comparator `B`.
pub fn batch_intersect<B, V>(set_a: &[u16], set_b: &[u16], visitor: &mut V)
where
    B: BatchCompare,
    V: Visitor<u16>,
{
    let w = B::LANES;

    let st_a = (set_a.len() / w) * w;
    let st_b = (set_b.len() / w) * w;

    let mut i_a: usize = 0;
    let mut i_b: usize = 0;
    if (i_a < st_a) && (i_b < st_b) {
        loop {
            let block_a = &set_a[i_a..i_a + w];
            let block_b = &set_b[i_b..i_b + w];

            visitor.visit_batch(block_a, B::match_lanes(block_a, block_b));

            let a_max = block_a[w - 1];
            let b_max = block_b[w - 1];
            if a_max <= b_max {
                i_a += w;
                if i_a == st_a {
                    break;
                }
            }
            if b_max <= a_max {
                i_b += w;
                if i_b == st_b {
                    break;
                }
            }
        }
    }

    branchless_merge(&set_a[i_a..], &set_b[i_b..], visitor)
}

/// [batch_intersect] with the comparator native to this build.
pub fn batch_native<V>(set_a: &[u16], set_b: &[u16], visitor: &mut V)
where
    V: Visitor<u16>,
{
    batch_intersect::<NativeBatch, V>(set_a, set_b, visitor)
}

/// Broadcast intersection of a small set against a much larger one, using
/// comparator `B` on windows of `BLOCKS` blocks of `large`.
///
/// Windows are skipped while their maximum is below the current element of
/// `small`, so the large set is scanned at most once, a window at a time.
/// Elements left over once `large` runs out of full windows are finished
/// with [branchless_merge].
pub fn broadcast_intersect<B, const BLOCKS: usize, V>(small: &[u16], large: &[u16], visitor: &mut V)
where
    B: BatchCompare,
    V: Visitor<u16>,
{
    let w = B::LANES * BLOCKS;
    let st_large = (large.len() / w) * w;

    let mut i_s: usize = 0;
    let mut i_l: usize = 0;
    'outer: while i_s < small.len() && i_l < st_large {
        let value = small[i_s];
        while large[i_l + w - 1] < value {
            i_l += w;
            if i_l == st_large {
                break 'outer;
            }
        }

        let window = &large[i_l..i_l + w];
        if window.chunks_exact(B::LANES).any(|block| B::contains_value(block, value)) {
            visitor.visit(value);
        }
        i_s += 1;
    }

    branchless_merge(&small[i_s..], &large[i_l..], visitor)
}

/// Window of blocks per step for moderately skewed inputs.
pub const BROADCAST_BLOCKS: usize = 2;

/// Window of blocks per step for highly skewed inputs.
pub const WIDE_BROADCAST_BLOCKS: usize = 4;

/// [broadcast_intersect] with the native comparator and a two-block window.
/// Either argument may be the smaller one.
pub fn broadcast_native<V>(set_a: &[u16], set_b: &[u16], visitor: &mut V)
where
    V: Visitor<u16>,
{
    let (small, large) = if set_a.len() <= set_b.len() { (set_a, set_b) } else { (set_b, set_a) };
    broadcast_intersect::<NativeBatch, BROADCAST_BLOCKS, V>(small, large, visitor)
}

/// [broadcast_intersect] with the native comparator and a four-block window.
/// Either argument may be the smaller one.
pub fn wide_broadcast_native<V>(set_a: &[u16], set_b: &[u16], visitor: &mut V)
where
    V: Visitor<u16>,
{
    let (small, large) = if set_a.len() <= set_b.len() { (set_a, set_b) } else { (set_b, set_a) };
    broadcast_intersect::<NativeBatch, WIDE_BROADCAST_BLOCKS, V>(small, large, visitor)
}
