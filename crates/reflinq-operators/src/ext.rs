//! Combinator constructors for every sequence.
//!
//! Each call wraps `self` in a new concrete type, so a chain like
//! `src.filter(p).concat(gen)` is a nested generic type resolved at compile
//! time. Buffer views shadow `skip`/`take` with O(1) inherent versions.

use reflinq_core::capability::{
    IndexPredicate, SkipIndex, SkipWhileIndex, TakeIndex, TakeWhileIndex,
};
use reflinq_core::sequence::Sequence;

use crate::concat::Concat;
use crate::filter::Filter;
use crate::index_filter::IndexFilter;

/// Extension trait adding combinators to all sequences.
pub trait SequenceExt: Sequence {
    /// Elements accepted by `predicate`, in order.
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Item) -> bool,
    {
        Filter::new(self, predicate)
    }

    /// Elements accepted by `predicate`, which also receives the inner
    /// position.
    fn filter_indexed<P>(self, predicate: P) -> IndexFilter<Self, P>
    where
        Self: Sized,
        P: IndexPredicate<Self::Item>,
    {
        IndexFilter::new(self, predicate)
    }

    fn skip(self, count: usize) -> IndexFilter<Self, SkipIndex>
    where
        Self: Sized,
    {
        IndexFilter::new(self, SkipIndex { count })
    }

    fn take(self, count: usize) -> IndexFilter<Self, TakeIndex>
    where
        Self: Sized,
    {
        IndexFilter::new(self, TakeIndex { count })
    }

    /// Drops the leading elements accepted by `predicate`, then yields the
    /// rest unfiltered. The predicate also receives the inner position.
    fn skip_while<P>(self, predicate: P) -> IndexFilter<Self, SkipWhileIndex<P>>
    where
        Self: Sized,
        P: FnMut(&Self::Item, usize) -> bool,
    {
        IndexFilter::new(self, SkipWhileIndex::new(predicate))
    }

    /// Yields the leading elements accepted by `predicate` and stops at the
    /// first rejection.
    fn take_while<P>(self, predicate: P) -> IndexFilter<Self, TakeWhileIndex<P>>
    where
        Self: Sized,
        P: FnMut(&Self::Item, usize) -> bool,
    {
        IndexFilter::new(self, TakeWhileIndex::new(predicate))
    }

    /// Every element of `self`, then every element of `other`.
    fn concat<B>(self, other: B) -> Concat<Self, B>
    where
        Self: Sized,
        B: Sequence<Item = Self::Item>,
    {
        Concat::new(self, other)
    }
}

impl<S: Sequence> SequenceExt for S {}
