#![allow(dead_code)]

pub mod properties;

use arraycontainer::{
    intersect::{self, Intersect2, PortableBatch},
    visitor::VecWriter,
    ArrayContainer, Set,
};
use quickcheck::Arbitrary;
use std::fmt;

// Arbitrary Set //
#[derive(Debug, Clone)]
pub struct SortedSet(Vec<u16>);

impl SortedSet {
    pub fn from_unsorted(mut vec: Vec<u16>) -> Self {
        vec.sort_unstable();
        vec.dedup();
        Self(vec)
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.0
    }

    pub fn cardinality(&self) -> usize {
        self.0.len()
    }

    pub fn container(&self) -> ArrayContainer {
        container_of(&self.0)
    }
}

impl From<SortedSet> for Vec<u16> {
    fn from(value: SortedSet) -> Self {
        value.0
    }
}

impl From<Vec<u16>> for SortedSet {
    fn from(value: Vec<u16>) -> Self {
        Self::from_unsorted(value)
    }
}

impl quickcheck::Arbitrary for SortedSet {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Self::from_unsorted(Vec::<u16>::arbitrary(g))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Self::from_unsorted))
    }
}

impl AsRef<[u16]> for SortedSet {
    fn as_ref(&self) -> &[u16] {
        &self.0
    }
}

pub fn container_of(values: &[u16]) -> ArrayContainer {
    ArrayContainer::from_sorted(values).expect("sorted test input")
}

// Arbitrary Intersection Function //
#[derive(Clone)]
pub struct DualIntersectFn(
    &'static str, pub Intersect2<[u16], VecWriter<u16>>
);

impl fmt::Debug for DualIntersectFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl quickcheck::Arbitrary for DualIntersectFn {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        g.choose([
            DualIntersectFn("branchless_merge", intersect::branchless_merge),
            DualIntersectFn("galloping", intersect::galloping),
            DualIntersectFn("batch_portable", intersect::batch_intersect::<PortableBatch, _>),
            DualIntersectFn("broadcast_portable", intersect::broadcast_intersect::<PortableBatch, 2, _>),
            DualIntersectFn("broadcast_native", intersect::broadcast_native),
            DualIntersectFn("wide_broadcast_native", intersect::wide_broadcast_native),
            #[cfg(target_arch = "x86_64")]
            DualIntersectFn("batch_sse2", intersect::batch_intersect::<intersect::Sse2Batch, _>),
            #[cfg(target_arch = "x86_64")]
            DualIntersectFn("broadcast_sse2", intersect::broadcast_intersect::<intersect::Sse2Batch, 4, _>),
            #[cfg(feature = "simd")]
            DualIntersectFn("batch_simd", intersect::batch_intersect::<intersect::SimdBatch, _>),
            DualIntersectFn("adaptive", intersect::adaptive),
        ].as_slice())
        .unwrap()
        .clone()
    }
}

// Arbitrary Pair of Sets //
#[derive(Debug, Clone)]
pub struct SimilarSetPair(pub SortedSet, pub SortedSet);

impl quickcheck::Arbitrary for SimilarSetPair {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let shared: Vec<u16> = Vec::arbitrary(g);

        let mut left = Vec::arbitrary(g);
        let mut right = Vec::arbitrary(g);
        left.extend(&shared);
        right.extend(&shared);

        SimilarSetPair(left.into(), right.into())
    }
}

#[derive(Debug, Clone)]
pub struct SkewedSetPair {
    pub small: SortedSet,
    pub large: SortedSet,
}

impl quickcheck::Arbitrary for SkewedSetPair {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let small_size = (usize::arbitrary(g) % 128) + 1;
        let large_size = (usize::arbitrary(g) % 8192) + 128;
        let amount_shared = usize::arbitrary(g) % small_size;

        let shared: Vec<u16> = vec_of_len(amount_shared, g);

        let mut small = vec_of_len(small_size - amount_shared, g);
        let mut large = vec_of_len(large_size - amount_shared, g);
        small.extend(&shared);
        large.extend(&shared);

        SkewedSetPair {
            small: small.into(),
            large: large.into(),
        }
    }
}

fn vec_of_len(len: usize, g: &mut quickcheck::Gen) -> Vec<u16> {
    let mut result: Vec<u16> = Vec::with_capacity(len);
    while result.len() < len {
        let add: Vec<u16> = Vec::arbitrary(g);
        result.extend(&add);
        result.truncate(len);
    }
    result
}

// Arbitrary Collection of Sets //
#[derive(Clone, Debug)]
pub struct SetCollection {
    sets: Vec<SortedSet>,
}

impl SetCollection {
    pub fn as_slice(&self) -> &[SortedSet] {
        self.sets.as_slice()
    }
}

impl quickcheck::Arbitrary for SetCollection {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let set_count = u32::arbitrary(g) % 4 + 2;
        let mut sets: Vec<SortedSet> = Vec::new();

        let mutual: Vec<u16> = Vec::arbitrary(g);

        for _ in 0..set_count {
            let mut set = Vec::arbitrary(g);
            set.extend(&mutual);
            sets.push(SortedSet::from_unsorted(set));
        }

        Self { sets }
    }
}

// Arbitrary Mutation Sequence //
#[derive(Debug, Clone, Copy)]
pub enum Op {
    Add(u16),
    Remove(u16),
}

/// Mutations over a narrow key range so adds and removes collide.
#[derive(Debug, Clone)]
pub struct OpSequence(pub Vec<Op>);

impl quickcheck::Arbitrary for OpSequence {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let len = usize::arbitrary(g) % 512;
        let ops = (0..len)
            .map(|_| {
                let key = u16::arbitrary(g) % 256;
                if bool::arbitrary(g) || u8::arbitrary(g) % 4 == 0 {
                    Op::Add(key)
                } else {
                    Op::Remove(key)
                }
            })
            .collect();
        Self(ops)
    }
}
