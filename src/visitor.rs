/// Used to receive set operation results in a generic way. Inspired by
/// roaring-rs.
pub trait Visitor<T> {
    fn visit(&mut self, value: T);

    /// Visits a run of values copied verbatim from one input.
    #[inline]
    fn visit_slice(&mut self, values: &[T])
    where
        T: Copy,
    {
        for &value in values {
            self.visit(value);
        }
    }

    /// Visits the lanes of `block` selected by `mask`, lowest lane first.
    #[inline]
    fn visit_batch(&mut self, block: &[T], mask: u32)
    where
        T: Copy,
    {
        let mut remaining = mask;
        while remaining != 0 {
            let lane = remaining.trailing_zeros() as usize;
            self.visit(block[lane]);
            remaining &= remaining - 1;
        }
    }
}

/// Counts result size without storing result.
pub struct Counter {
    count: usize,
}

impl Counter {
    pub fn new() -> Self {
        Self { count: 0 }
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Visitor<T> for Counter {
    #[inline]
    fn visit(&mut self, _value: T) {
        self.count += 1;
    }

    #[inline]
    fn visit_slice(&mut self, values: &[T])
    where
        T: Copy,
    {
        self.count += values.len();
    }

    #[inline]
    fn visit_batch(&mut self, _block: &[T], mask: u32)
    where
        T: Copy,
    {
        self.count += mask.count_ones() as usize;
    }
}

/// Stores result in a vector.
pub struct VecWriter<T> {
    items: Vec<T>,
}

impl<T> VecWriter<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
        }
    }

    pub fn with_capacity(cardinality: usize) -> Self {
        Self {
            items: Vec::with_capacity(cardinality),
        }
    }
}

impl<T> AsRef<[T]> for VecWriter<T> {
    fn as_ref(&self) -> &[T] {
        &self.items
    }
}

/// Appends to an existing buffer, reusing its allocation.
impl<T> From<Vec<T>> for VecWriter<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> From<VecWriter<T>> for Vec<T> {
    fn from(value: VecWriter<T>) -> Self {
        value.items
    }
}

impl<T> Default for VecWriter<T> {
    fn default() -> Self {
        Self { items: Vec::default() }
    }
}

impl<T> Visitor<T> for VecWriter<T> {
    #[inline]
    fn visit(&mut self, value: T) {
        self.items.push(value);
    }

    #[inline]
    fn visit_slice(&mut self, values: &[T])
    where
        T: Copy,
    {
        self.items.extend_from_slice(values);
    }
}

/// Writes result to provided array slice.
pub struct SliceWriter<'a, T> {
    data: &'a mut [T],
    position: usize,
}

impl<'a, T> SliceWriter<'a, T> {
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<'a, T> From<&'a mut [T]> for SliceWriter<'a, T> {
    fn from(data: &'a mut [T]) -> Self {
        Self {
            data,
            position: 0,
        }
    }
}

impl<'a, T> Visitor<T> for SliceWriter<'a, T> {
    #[inline]
    fn visit(&mut self, value: T) {
        self.data[self.position] = value;
        self.position += 1;
    }

    #[inline]
    fn visit_slice(&mut self, values: &[T])
    where
        T: Copy,
    {
        let end = self.position + values.len();
        self.data[self.position..end].copy_from_slice(values);
        self.position = end;
    }
}

/// Ensures all visits match expected output.
/// Used for testing algorithm correctness.
pub struct EnsureVisitor<'a, T>
where
    T: PartialEq,
{
    expected: &'a [T],
    position: usize,
}

impl<'a, T> EnsureVisitor<'a, T>
where
    T: PartialEq,
{
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<'a, T> From<&'a [T]> for EnsureVisitor<'a, T>
where
    T: PartialEq,
{
    fn from(expected: &'a [T]) -> Self {
        Self {
            expected,
            position: 0,
        }
    }
}

impl<'a, T> Visitor<T> for EnsureVisitor<'a, T>
where
    T: PartialEq + std::fmt::Debug,
{
    fn visit(&mut self, value: T) {
        assert_eq!(value, self.expected[self.position]);
        self.position += 1;
    }
}
