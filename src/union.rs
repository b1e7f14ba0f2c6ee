//! Merge-based union and difference of sorted sets.

use std::cmp::Ordering;

use crate::{intersect::advance_until, visitor::Visitor};

/// Two-pointer union of two sorted sets. Equal elements are visited once and
/// whatever remains of the longer input is visited verbatim.
pub fn union<T, V>(set_a: &[T], set_b: &[T], visitor: &mut V)
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
            Ordering::Less => {
                visitor.visit(value_a);
                idx_a += 1;
            }
            Ordering::Greater => {
                visitor.visit(value_b);
                idx_b += 1;
            }
            Ordering::Equal => {
                visitor.visit(value_a);
                idx_a += 1;
                idx_b += 1;
            }
        }
    }

    visitor.visit_slice(&set_a[idx_a..]);
    visitor.visit_slice(&set_b[idx_b..]);
}

/// Elements of `set_a` absent from `set_b`, by linear merge.
pub fn difference<T, V>(set_a: &[T], set_b: &[T], visitor: &mut V)
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
            Ordering::Less => {
                visitor.visit(value_a);
                idx_a += 1;
            }
            Ordering::Greater => idx_b += 1,
            Ordering::Equal => {
                idx_a += 1;
                idx_b += 1;
            }
        }
    }

    visitor.visit_slice(&set_a[idx_a..]);
}

/// [difference] galloping through `set_b`, for when it is much larger than
/// `set_a`.
pub fn difference_galloping<T, V>(set_a: &[T], set_b: &[T], visitor: &mut V)
where
    T: Ord + Copy,
    V: Visitor<T>,
{
    let mut pos: isize = -1;

    for (i, &value) in set_a.iter().enumerate() {
        let idx = advance_until(set_b, pos, set_b.len(), value);
        if idx == set_b.len() {
            visitor.visit_slice(&set_a[i..]);
            return;
        }

        if set_b[idx] == value {
            pos = idx as isize;
        } else {
            visitor.visit(value);
            pos = idx as isize - 1;
        }
    }
}
