use std::cmp::Ordering;

use crate::visitor::Visitor;

/// Basic linear intersection of two sorted arrays.
///
/// Zipper intersection derived from the 'tape' merging algorithm described in
/// <https://doi.org/10.1137/0201004>.
pub fn naive_merge<T, V>(set_a: &[T], set_b: &[T], visitor: &mut V)
where
    T: Ord + Copy,
    V: Visitor<T>,
{
    let mut idx_a = 0;
    let mut idx_b = 0;

    while idx_a < set_a.len() && idx_b < set_b.len() {
        let value_a = set_a[idx_a];
        let value_b = set_b[idx_b];

        match value_a.cmp(&value_b) {
            Ordering::Less => idx_a += 1,

            Ordering::Greater => idx_b += 1,

            Ordering::Equal => {
                visitor.visit(value_a);
                idx_a += 1;
                idx_b += 1;
            }
        }
    }
}

/// Zipper intersection rearranged for easier branch prediction and branchless
/// index updates.
///
/// Proposed in <https://doi.org/10.14778/2735508.2735518> by Inoue, Ohara, and
/// Taura.
pub fn branchless_merge<T, V>(set_a: &[T], set_b: &[T], visitor: &mut V)
where
    T: Ord + Copy,
    V: Visitor<T>,
{
    let mut idx_a = 0;
    let mut idx_b = 0;

    while idx_a < set_a.len() && idx_b < set_b.len() {
        let value_a = set_a[idx_a];
        let value_b = set_b[idx_b];

        if value_a == value_b {
            visitor.visit(value_a);
            idx_a += 1;
            idx_b += 1;
        } else {
            idx_a += (value_a < value_b) as usize;
            idx_b += (value_b < value_a) as usize;
        }
    }
}

/// Merge intersection writing the result over the front of `set_a`.
/// Returns the result length.
pub fn merge_inplace<T>(set_a: &mut [T], set_b: &[T]) -> usize
where
    T: Ord + Copy,
{
    let mut idx_a = 0;
    let mut idx_b = 0;
    let mut count = 0;

    while idx_a < set_a.len() && idx_b < set_b.len() {
        let value_a = set_a[idx_a];
        let value_b = set_b[idx_b];

        if value_a == value_b {
            set_a[count] = value_a;
            count += 1;
            idx_a += 1;
            idx_b += 1;
        } else {
            idx_a += (value_a < value_b) as usize;
            idx_b += (value_b < value_a) as usize;
        }
    }

    count
}
