//! Index-aware filter: the predicate also sees each element's position in
//! the inner sequence. Generic `skip`/`take` and their predicate-driven
//! `skip_while`/`take_while` forms are built on it.

use reflinq_core::capability::IndexPredicate;
use reflinq_core::cursor::Cursor;
use reflinq_core::sequence::Sequence;

pub struct IndexFilter<S, P> {
    inner: S,
    predicate: P,
}

impl<S, P> IndexFilter<S, P> {
    pub fn new(inner: S, predicate: P) -> Self {
        Self { inner, predicate }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

pub struct IndexFilterCursor<'s, C, P> {
    inner: C,
    predicate: &'s mut P,
    index: usize,
    done: bool,
}

impl<'s, C, P> Cursor for IndexFilterCursor<'s, C, P>
where
    C: Cursor,
    P: IndexPredicate<C::Item>,
{
    type Item = C::Item;

    fn advance(&mut self) -> bool {
        while !self.done {
            // Stop before pulling an element no position can accept.
            if self.predicate.exhausted(self.index) || !self.inner.advance() {
                self.done = true;
                break;
            }
            let index = self.index;
            self.index += 1;
            if self.predicate.test(self.inner.current(), index) {
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

impl<S, P> Sequence for IndexFilter<S, P>
where
    S: Sequence,
    P: IndexPredicate<S::Item>,
{
    type Item = S::Item;
    type Cursor<'s> = IndexFilterCursor<'s, S::Cursor<'s>, P> where Self: 's;

    fn cursor(&mut self) -> Self::Cursor<'_> {
        self.predicate.restart();
        IndexFilterCursor {
            inner: self.inner.cursor(),
            predicate: &mut self.predicate,
            index: 0,
            done: false,
        }
    }

    fn fast_count(&self) -> Option<usize> {
        self.predicate.accepted_count(self.inner.fast_count()?)
    }
}
