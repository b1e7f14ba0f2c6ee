mod adaptive;
mod batch;
mod galloping;
mod merge;

pub use {
    adaptive::*,
    batch::*,
    galloping::{advance_until, binary_search, galloping, galloping_inplace, galloping_retain},
    merge::*,
};

use crate::visitor::VecWriter;

pub type Intersect2<I, V> = fn(a: &I, b: &I, visitor: &mut V);
pub type IntersectK<S, V> = fn(sets: &[S], visitor: &mut V);

pub fn run_2set<T>(
    set_a: &[T],
    set_b: &[T],
    intersect: Intersect2<[T], VecWriter<T>>) -> Vec<T>
{
    let mut writer: VecWriter<T> =
        VecWriter::with_capacity(set_a.len().min(set_b.len()));
    intersect(set_a, set_b, &mut writer);
    writer.into()
}

pub fn run_kset<T, S>(sets: &[S], intersect: IntersectK<S, VecWriter<T>>) -> Vec<T>
where
    T: Ord + Copy,
    S: AsRef<[T]>,
{
    let mut writer: VecWriter<T> = VecWriter::new();
    intersect(sets, &mut writer);
    writer.into()
}
