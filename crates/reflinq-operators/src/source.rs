//! Source adapter: a non-owning view over a contiguous buffer.
//!
//! The view borrows `&'a mut [T]`, so elements handed out by its cursor
//! alias the buffer and writes land in place. Positional slicing
//! (`skip`/`take` and their `_last` forms) re-slices the view in O(1)
//! instead of wrapping it in an index filter.

use reflinq_core::cursor::Cursor;
use reflinq_core::error::{Error, Result};
use reflinq_core::sequence::Sequence;

pub struct Source<'a, T> {
    items: &'a mut [T],
}

impl<'a, T> Source<'a, T> {
    pub fn new(items: &'a mut [T]) -> Self {
        Self { items }
    }

    /// View of `length` elements starting at `offset`.
    ///
    /// A negative `offset` shortens the view from the front instead of
    /// moving it: the result starts at index 0 with `length + offset`
    /// elements. A non-positive resulting length gives an empty view, and
    /// the range is clamped to the buffer.
    pub fn with_range(items: &'a mut [T], offset: isize, length: isize) -> Self {
        if length <= 0 {
            return Self::new(&mut []);
        }
        let (start, len) = if offset >= 0 {
            (offset.unsigned_abs(), length.unsigned_abs())
        } else {
            (0, length.saturating_add(offset).max(0).unsigned_abs())
        };
        let start = start.min(items.len());
        let end = start.saturating_add(len).min(items.len());
        Self::new(&mut items[start..end])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &*self.items
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut *self.items
    }

    /// Give the borrowed buffer back.
    pub fn into_slice(self) -> &'a mut [T] {
        self.items
    }

    /// Drop the first `count` elements. O(1).
    pub fn skip(self, count: usize) -> Self {
        let at = count.min(self.items.len());
        Self::new(self.items.split_at_mut(at).1)
    }

    /// Keep the first `count` elements. O(1).
    pub fn take(self, count: usize) -> Self {
        let at = count.min(self.items.len());
        Self::new(self.items.split_at_mut(at).0)
    }

    /// Drop the last `count` elements. O(1).
    pub fn skip_last(self, count: usize) -> Self {
        let at = self.items.len().saturating_sub(count);
        Self::new(self.items.split_at_mut(at).0)
    }

    /// Keep the last `count` elements. O(1).
    pub fn take_last(self, count: usize) -> Self {
        let at = self.items.len().saturating_sub(count);
        Self::new(self.items.split_at_mut(at).1)
    }
}

impl<'a, T> From<&'a mut [T]> for Source<'a, T> {
    fn from(items: &'a mut [T]) -> Self {
        Self::new(items)
    }
}

impl<'a, T> From<&'a mut Vec<T>> for Source<'a, T> {
    fn from(items: &'a mut Vec<T>) -> Self {
        Self::new(items.as_mut_slice())
    }
}

/// Index-counter cursor over a [`Source`].
pub struct SourceCursor<'s, T> {
    items: &'s mut [T],
    next: usize,
}

impl<'s, T> Cursor for SourceCursor<'s, T> {
    type Item = T;

    #[inline]
    fn advance(&mut self) -> bool {
        if self.next < self.items.len() {
            self.next += 1;
            true
        } else {
            false
        }
    }

    #[inline]
    fn current(&mut self) -> &mut T {
        match self.next.checked_sub(1) {
            Some(i) => &mut self.items[i],
            None => panic!("SourceCursor::current called before advance"),
        }
    }
}

impl<'a, T> Sequence for Source<'a, T> {
    type Item = T;
    type Cursor<'s> = SourceCursor<'s, T> where Self: 's;

    fn cursor(&mut self) -> SourceCursor<'_, T> {
        SourceCursor {
            items: &mut *self.items,
            next: 0,
        }
    }

    fn fast_count(&self) -> Option<usize> {
        Some(self.items.len())
    }

    fn for_each_mut<F>(&mut self, f: F)
    where
        F: FnMut(&mut T),
    {
        self.items.iter_mut().for_each(f);
    }

    fn any(&mut self) -> bool {
        !self.items.is_empty()
    }

    fn any_by<P>(&mut self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.items.iter().any(predicate)
    }

    fn all<P>(&mut self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.items.iter().all(predicate)
    }

    fn count(&mut self) -> usize {
        self.items.len()
    }

    fn count_by<P>(&mut self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        self.items.iter().filter(|item| predicate(item)).count()
    }

    fn aggregate<A, F>(&mut self, seed: A, func: F) -> A
    where
        F: FnMut(A, &T) -> A,
    {
        self.items.iter().fold(seed, func)
    }

    fn contains(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.items.contains(value)
    }

    fn try_get_first(&mut self) -> Option<T>
    where
        T: Clone,
    {
        self.items.first().cloned()
    }

    fn try_get_last(&mut self) -> Option<T>
    where
        T: Clone,
    {
        self.items.last().cloned()
    }

    fn try_get_element_at(&mut self, index: usize) -> Option<T>
    where
        T: Clone,
    {
        self.items.get(index).cloned()
    }

    fn single(&mut self) -> Result<T>
    where
        T: Clone,
    {
        match &*self.items {
            [] => Err(Error::EmptySequence),
            [only] => Ok(only.clone()),
            _ => Err(Error::MoreThanOneElement),
        }
    }

    fn extend_list(&mut self, out: &mut Vec<T>)
    where
        T: Clone,
    {
        out.extend_from_slice(self.items);
    }

    fn to_list(&mut self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.to_vec()
    }

    fn to_array(&mut self) -> Box<[T]>
    where
        T: Clone,
    {
        Box::from(&*self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_range_clamps() {
        let mut data = [1, 2, 3, 4, 5];
        assert_eq!(Source::with_range(&mut data, 1, 3).to_list(), vec![2, 3, 4]);
        assert_eq!(Source::with_range(&mut data, 3, 10).to_list(), vec![4, 5]);
        assert_eq!(Source::with_range(&mut data, 9, 2).count(), 0);
        assert_eq!(Source::with_range(&mut data, -2, 4).to_list(), vec![1, 2]);
        assert_eq!(Source::with_range(&mut data, -4, 4).count(), 0);
        assert_eq!(Source::with_range(&mut data, 0, 0).count(), 0);
        assert_eq!(Source::with_range(&mut data, 0, -1).count(), 0);
    }

    #[test]
    fn test_positional_reslicing() {
        let mut data = [1, 2, 3, 4, 5];
        assert_eq!(Source::new(&mut data).skip(2).to_list(), vec![3, 4, 5]);
        assert_eq!(Source::new(&mut data).take(2).to_list(), vec![1, 2]);
        assert_eq!(Source::new(&mut data).skip_last(2).to_list(), vec![1, 2, 3]);
        assert_eq!(Source::new(&mut data).take_last(2).to_list(), vec![4, 5]);
        assert!(Source::new(&mut data).skip(9).is_empty());
        assert_eq!(Source::new(&mut data).take(9).len(), 5);
        assert_eq!(Source::new(&mut data).take_last(9).len(), 5);
    }

    #[test]
    fn test_cursor_exhaustion_is_sticky() {
        let mut data = [7];
        let mut src = Source::new(&mut data);
        let mut cursor = src.cursor();
        assert!(cursor.advance());
        assert_eq!(*cursor.current(), 7);
        assert!(!cursor.advance());
        assert!(!cursor.advance());
    }

    #[test]
    #[should_panic(expected = "before advance")]
    fn test_current_before_advance_panics() {
        let mut data = [1];
        let mut src = Source::new(&mut data);
        let mut cursor = src.cursor();
        cursor.current();
    }
}
