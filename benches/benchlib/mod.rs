use std::{collections::BTreeSet, ops::Range};

use rand::{distributions::Uniform, prelude::Distribution, seq::SliceRandom, thread_rng};

pub fn uniform_sorted_set(range: Range<u32>, cardinality: usize) -> Vec<u16> {
    debug_assert!(range.end <= 1 << 16);
    let rng = &mut thread_rng();

    let density = cardinality as f64 / range.len() as f64;
    if density < 0.01 {
        let dist = Uniform::from(range);

        let mut set: BTreeSet<u16> = BTreeSet::new();
        while set.len() < cardinality {
            set.insert(dist.sample(rng) as u16);
        }
        set.iter().copied().collect()
    } else {
        let mut everything: Vec<u16> = range.map(|value| value as u16).collect();
        everything.shuffle(rng);

        let mut result = Vec::from(&everything[0..cardinality]);
        result.sort_unstable();
        result
    }
}

/// Keys in random order, for insertion benchmarks.
pub fn shuffled_keys(cardinality: usize) -> Vec<u16> {
    let mut keys = uniform_sorted_set(0..1 << 16, cardinality);
    keys.shuffle(&mut thread_rng());
    keys
}
