//! The array container: a sorted, deduplicated, growable array of 16-bit
//! keys.

use std::{fmt, iter::Copied, mem, slice};

use crate::{
    growth,
    intersect::{
        self, galloping_inplace, galloping_retain, merge_inplace, Strategy, GALLOPING_THRESHOLD,
    },
    search::search,
    union,
    visitor::{Counter, VecWriter},
    Error, Result, Set, DEFAULT_CAPACITY, MAX_CAPACITY,
};

/// Sorted array of distinct `u16` values.
///
/// `values` only ever holds the live elements. `capacity` is the number of
/// slots this container has allocated, which the buffer's own capacity never
/// falls below, so pushes within it do not allocate behind the growth policy's
/// back.
pub struct ArrayContainer {
    values: Vec<u16>,
    capacity: usize,
}

impl ArrayContainer {
    pub fn new() -> Self {
        Self {
            values: Vec::with_capacity(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
        }
    }

    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity > MAX_CAPACITY {
            return Err(Error::CapacityOverflow { requested: capacity });
        }

        let mut values = Vec::new();
        growth::reallocate(&mut values, capacity, false)?;
        Ok(Self { values, capacity })
    }

    #[inline]
    pub fn cardinality(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The live elements, strictly increasing.
    #[inline]
    pub fn as_slice(&self) -> &[u16] {
        &self.values
    }

    #[inline]
    pub fn iter(&self) -> Copied<slice::Iter<'_, u16>> {
        self.values.iter().copied()
    }

    #[inline]
    pub fn min(&self) -> Option<u16> {
        self.values.first().copied()
    }

    #[inline]
    pub fn max(&self) -> Option<u16> {
        self.values.last().copied()
    }

    #[inline]
    pub fn contains(&self, value: u16) -> bool {
        search(&self.values, value).is_ok()
    }

    /// Inserts `value`, returning whether it was absent.
    ///
    /// Values larger than the current maximum are appended directly, so
    /// loading keys in increasing order never searches or shifts.
    pub fn add(&mut self, value: u16) -> Result<bool> {
        if self.max().map_or(true, |max| max < value) {
            self.reserve_one()?;
            self.values.push(value);
            return Ok(true);
        }

        match search(&self.values, value) {
            Ok(_) => Ok(false),
            Err(index) => {
                self.reserve_one()?;
                self.values.insert(index, value);
                debug_assert!(is_strictly_increasing(&self.values));
                Ok(true)
            }
        }
    }

    /// Removes `value`, returning whether it was present.
    pub fn remove(&mut self, value: u16) -> bool {
        match search(&self.values, value) {
            Ok(index) => {
                self.values.remove(index);
                true
            }
            Err(_) => false,
        }
    }

    /// Number of elements less than or equal to `value`.
    pub fn rank(&self, value: u16) -> usize {
        match search(&self.values, value) {
            Ok(index) => index + 1,
            Err(index) => index,
        }
    }

    /// Element at position `index` in increasing order.
    #[inline]
    pub fn select(&self, index: usize) -> Option<u16> {
        self.values.get(index).copied()
    }

    /// Removes every element, keeping the allocation.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Frees the owned storage. The container stays usable and empty, and
    /// releasing twice is harmless.
    pub fn release(&mut self) {
        self.values = Vec::new();
        self.capacity = 0;
    }

    /// Reallocates so capacity equals cardinality.
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        let cardinality = self.cardinality();
        if self.capacity == cardinality {
            return Ok(());
        }
        growth::reallocate(&mut self.values, cardinality, true)?;
        self.capacity = cardinality;
        Ok(())
    }

    /// Writes the union of `self` and `other` to `out`, replacing its
    /// contents.
    pub fn union(&self, other: &Self, out: &mut Self) -> Result<()> {
        let max_cardinality = (self.cardinality() + other.cardinality()).min(MAX_CAPACITY);
        out.prepare(max_cardinality)?;

        let mut writer = VecWriter::from(mem::take(&mut out.values));
        union::union(&self.values, &other.values, &mut writer);
        out.values = writer.into();

        debug_assert!(out.cardinality() <= out.capacity);
        Ok(())
    }

    /// Writes the intersection of `self` and `other` to `out`, replacing its
    /// contents, and returns its cardinality.
    pub fn intersect(&self, other: &Self, out: &mut Self) -> Result<usize> {
        let strategy = Strategy::select(self.cardinality(), other.cardinality());
        self.intersect_with(other, out, strategy)
    }

    /// [ArrayContainer::intersect] with a fixed algorithm.
    pub fn intersect_with(&self, other: &Self, out: &mut Self, strategy: Strategy) -> Result<usize> {
        out.prepare(self.cardinality().min(other.cardinality()))?;

        let mut writer = VecWriter::from(mem::take(&mut out.values));
        intersect::intersect_with(strategy, &self.values, &other.values, &mut writer);
        out.values = writer.into();

        Ok(out.cardinality())
    }

    /// Keeps only the elements also present in `other`. Never allocates.
    pub fn intersect_inplace(&mut self, other: &Self) {
        let count = if self.cardinality().saturating_mul(GALLOPING_THRESHOLD) <= other.cardinality() {
            galloping_inplace(&mut self.values, &other.values)
        } else if other.cardinality().saturating_mul(GALLOPING_THRESHOLD) <= self.cardinality() {
            galloping_retain(&mut self.values, &other.values)
        } else {
            merge_inplace(&mut self.values, &other.values)
        };
        self.values.truncate(count);
    }

    /// Writes the intersection of all `containers` to `out` and returns its
    /// cardinality. No containers give an empty result.
    pub fn intersect_many(containers: &[&Self], out: &mut Self) -> Result<usize> {
        let min_cardinality = containers.iter()
            .map(|container| container.cardinality())
            .min()
            .unwrap_or(0);
        out.prepare(min_cardinality)?;

        let sets: Vec<&[u16]> = containers.iter().map(|container| container.as_slice()).collect();
        let mut writer = VecWriter::from(mem::take(&mut out.values));
        intersect::small_adaptive(&sets, &mut writer);
        out.values = writer.into();

        Ok(out.cardinality())
    }

    /// Size of the intersection, without materializing it.
    pub fn intersection_cardinality(&self, other: &Self) -> usize {
        let mut counter = Counter::new();
        intersect::adaptive(&self.values, &other.values, &mut counter);
        counter.count()
    }

    /// Whether `self` and `other` share any element.
    pub fn intersects(&self, other: &Self) -> bool {
        intersect::intersects(&self.values, &other.values)
    }

    /// Writes the elements of `self` absent from `other` to `out`, replacing
    /// its contents.
    pub fn difference(&self, other: &Self, out: &mut Self) -> Result<()> {
        out.prepare(self.cardinality())?;

        let mut writer = VecWriter::from(mem::take(&mut out.values));
        if self.cardinality().saturating_mul(GALLOPING_THRESHOLD) <= other.cardinality() {
            union::difference_galloping(&self.values, &other.values, &mut writer);
        } else {
            union::difference(&self.values, &other.values, &mut writer);
        }
        out.values = writer.into();

        Ok(())
    }

    /// Whether every element of `self` is in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        if self.cardinality() > other.cardinality() {
            return false;
        }

        let mut pos: isize = -1;
        for &value in &self.values {
            let idx = intersect::advance_until(&other.values, pos, other.cardinality(), value);
            if idx == other.cardinality() || other.values[idx] != value {
                return false;
            }
            pos = idx as isize;
        }
        true
    }

    /// Makes room for one more element, preserving the current ones.
    fn reserve_one(&mut self) -> Result<()> {
        if self.cardinality() == self.capacity {
            let min = self.capacity + 1;
            growth::grow_buffer(&mut self.values, &mut self.capacity, min, true)?;
        }
        Ok(())
    }

    /// Empties the container and makes sure it can hold `min` elements. The
    /// old contents are discarded, so growth does not copy them. On failure
    /// the container is unchanged.
    fn prepare(&mut self, min: usize) -> Result<()> {
        if self.capacity < min {
            growth::grow_buffer(&mut self.values, &mut self.capacity, min, false)?;
        }
        self.values.clear();
        Ok(())
    }
}

/// Index of the first element not greater than its predecessor.
fn first_unsorted(values: &[u16]) -> Option<usize> {
    values.windows(2).position(|w| w[0] >= w[1]).map(|i| i + 1)
}

fn is_strictly_increasing(values: &[u16]) -> bool {
    first_unsorted(values).is_none()
}

impl Default for ArrayContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ArrayContainer {
    fn clone(&self) -> Self {
        let mut values = Vec::with_capacity(self.capacity);
        values.extend_from_slice(&self.values);
        Self {
            values,
            capacity: self.capacity,
        }
    }
}

impl fmt::Debug for ArrayContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayContainer")
            .field("cardinality", &self.cardinality())
            .field("capacity", &self.capacity)
            .field("values", &self.values)
            .finish()
    }
}

/// Containers are equal when they hold the same elements, whatever their
/// capacity.
impl PartialEq for ArrayContainer {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Eq for ArrayContainer {}

impl Set<u16> for ArrayContainer {
    fn from_sorted(sorted: &[u16]) -> Result<Self> {
        if let Some(index) = first_unsorted(sorted) {
            return Err(Error::NotStrictlyIncreasing { index });
        }

        let mut container = Self::with_capacity(sorted.len().max(DEFAULT_CAPACITY))?;
        container.values.extend_from_slice(sorted);
        Ok(container)
    }
}

/// Takes ownership of a strictly increasing vector without copying it.
impl TryFrom<Vec<u16>> for ArrayContainer {
    type Error = Error;

    fn try_from(mut values: Vec<u16>) -> Result<Self> {
        if let Some(index) = first_unsorted(&values) {
            return Err(Error::NotStrictlyIncreasing { index });
        }

        if values.capacity() > MAX_CAPACITY {
            values.shrink_to(MAX_CAPACITY);
        }
        let capacity = values.capacity().min(MAX_CAPACITY);
        Ok(Self { values, capacity })
    }
}

impl<'a> IntoIterator for &'a ArrayContainer {
    type Item = u16;
    type IntoIter = Copied<slice::Iter<'a, u16>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
