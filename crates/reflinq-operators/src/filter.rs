//! Filter combinator: yields the inner elements accepted by a predicate.
//!
//! The cursor forwards the inner element's reference unchanged, so writes
//! through a filtered cursor land in the source buffer.

use reflinq_core::cursor::Cursor;
use reflinq_core::sequence::Sequence;

pub struct Filter<S, P> {
    inner: S,
    predicate: P,
}

impl<S, P> Filter<S, P> {
    pub fn new(inner: S, predicate: P) -> Self {
        Self { inner, predicate }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

pub struct FilterCursor<'s, C, P> {
    inner: C,
    predicate: &'s P,
}

impl<'s, C, P> Cursor for FilterCursor<'s, C, P>
where
    C: Cursor,
    P: Fn(&C::Item) -> bool,
{
    type Item = C::Item;

    #[inline]
    fn advance(&mut self) -> bool {
        while self.inner.advance() {
            if (self.predicate)(self.inner.current()) {
                return true;
            }
        }
        false
    }

    #[inline]
    fn current(&mut self) -> &mut C::Item {
        self.inner.current()
    }

    fn release(&mut self) {
        self.inner.release();
    }
}

impl<S, P> Sequence for Filter<S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;
    type Cursor<'s> = FilterCursor<'s, S::Cursor<'s>, P> where Self: 's;

    fn cursor(&mut self) -> Self::Cursor<'_> {
        FilterCursor {
            inner: self.inner.cursor(),
            predicate: &self.predicate,
        }
    }

    // Never fast-countable: the accepted count is only known after a pass.

    fn any(&mut self) -> bool {
        let predicate = &self.predicate;
        self.inner.any_by(predicate)
    }

    fn any_by<Q>(&mut self, other: Q) -> bool
    where
        Q: Fn(&S::Item) -> bool,
    {
        let predicate = &self.predicate;
        self.inner.any_by(|item| predicate(item) && other(item))
    }

    fn count(&mut self) -> usize {
        let predicate = &self.predicate;
        self.inner.count_by(predicate)
    }

    fn count_by<Q>(&mut self, other: Q) -> usize
    where
        Q: Fn(&S::Item) -> bool,
    {
        let predicate = &self.predicate;
        self.inner.count_by(|item| predicate(item) && other(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Source;

    #[test]
    fn test_keeps_accepted_elements_in_order() {
        let mut data = [1, 2, 3, 4, 5];
        let mut evens = Filter::new(Source::new(&mut data), |x: &i32| x % 2 == 0);
        assert_eq!(evens.to_list(), vec![2, 4]);
        assert_eq!(evens.count(), 2);
        assert!(evens.fast_count().is_none());
    }

    #[test]
    fn test_writes_reach_the_buffer() {
        let mut data = [1, 2, 3, 4];
        Filter::new(Source::new(&mut data), |x: &i32| *x > 2).for_each_mut(|x| *x = 0);
        assert_eq!(data, [1, 2, 0, 0]);
    }

    #[test]
    fn test_rejecting_everything_is_empty() {
        let mut data = [1, 3, 5];
        let mut none = Filter::new(Source::new(&mut data), |x: &i32| x % 2 == 0);
        assert!(!none.any());
        assert_eq!(none.try_get_first(), None);
        let mut cursor = none.cursor();
        assert!(!cursor.advance());
        assert!(!cursor.advance());
    }
}
