//! Concatenation combinator: every element of `first`, then every element of
//! `second`.
//!
//! The cursor is a three-state machine (`First -> Second -> Done`) that only
//! moves forward. Whole-sequence algorithms ask each side for its own answer
//! and combine the two, so a side that can answer without a traversal (a
//! buffer view, a generator) never pays for one.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use reflinq_core::cursor::Cursor;
use reflinq_core::error::{Error, Result};
use reflinq_core::sequence::Sequence;

pub struct Concat<A, B> {
    first: A,
    second: B,
}

impl<A, B> Concat<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    First,
    Second,
    Done,
}

pub struct ConcatCursor<A, B> {
    first: A,
    second: B,
    side: Side,
}

impl<A, B> Cursor for ConcatCursor<A, B>
where
    A: Cursor,
    B: Cursor<Item = A::Item>,
{
    type Item = A::Item;

    fn advance(&mut self) -> bool {
        match self.side {
            Side::First => {
                if self.first.advance() {
                    return true;
                }
                self.side = Side::Second;
                self.advance()
            }
            Side::Second => {
                if self.second.advance() {
                    return true;
                }
                self.side = Side::Done;
                false
            }
            Side::Done => false,
        }
    }

    fn current(&mut self) -> &mut A::Item {
        match self.side {
            Side::First => self.first.current(),
            Side::Second => self.second.current(),
            Side::Done => panic!("ConcatCursor::current called after exhaustion"),
        }
    }

    fn release(&mut self) {
        self.first.release();
        self.second.release();
    }
}

/// Combine two `single`-style results: exactly one side may hold the
/// element, and it must be the only one on that side.
fn combine_single<T, F>(first: Result<T>, second: F, none: Error) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    match first {
        Err(Error::MoreThanOneElement) => Err(Error::MoreThanOneElement),
        Ok(value) => match second() {
            Ok(_) | Err(Error::MoreThanOneElement) => Err(Error::MoreThanOneElement),
            Err(_) => Ok(value),
        },
        Err(_) => match second() {
            Ok(value) => Ok(value),
            Err(Error::MoreThanOneElement) => Err(Error::MoreThanOneElement),
            Err(_) => Err(none),
        },
    }
}

impl<A, B> Sequence for Concat<A, B>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
{
    type Item = A::Item;
    type Cursor<'s> = ConcatCursor<A::Cursor<'s>, B::Cursor<'s>> where Self: 's;

    fn cursor(&mut self) -> Self::Cursor<'_> {
        ConcatCursor {
            first: self.first.cursor(),
            second: self.second.cursor(),
            side: Side::First,
        }
    }

    fn fast_count(&self) -> Option<usize> {
        self.first.fast_count()?.checked_add(self.second.fast_count()?)
    }

    fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut A::Item),
    {
        self.first.for_each_mut(&mut f);
        self.second.for_each_mut(f);
    }

    fn any(&mut self) -> bool {
        self.first.any() || self.second.any()
    }

    fn any_by<P>(&mut self, predicate: P) -> bool
    where
        P: Fn(&A::Item) -> bool,
    {
        self.first.any_by(&predicate) || self.second.any_by(predicate)
    }

    fn all<P>(&mut self, predicate: P) -> bool
    where
        P: Fn(&A::Item) -> bool,
    {
        self.first.all(&predicate) && self.second.all(predicate)
    }

    fn count(&mut self) -> usize {
        self.first.count() + self.second.count()
    }

    fn count_by<P>(&mut self, predicate: P) -> usize
    where
        P: Fn(&A::Item) -> bool,
    {
        self.first.count_by(&predicate) + self.second.count_by(predicate)
    }

    fn aggregate<Acc, F>(&mut self, seed: Acc, mut func: F) -> Acc
    where
        F: FnMut(Acc, &A::Item) -> Acc,
    {
        let acc = self.first.aggregate(seed, &mut func);
        self.second.aggregate(acc, func)
    }

    fn contains(&mut self, value: &A::Item) -> bool
    where
        A::Item: PartialEq,
    {
        self.first.contains(value) || self.second.contains(value)
    }

    fn contains_by<E>(&mut self, value: &A::Item, equals: E) -> bool
    where
        E: Fn(&A::Item, &A::Item) -> bool,
    {
        self.first.contains_by(value, &equals) || self.second.contains_by(value, equals)
    }

    fn try_get_first(&mut self) -> Option<A::Item>
    where
        A::Item: Clone,
    {
        self.first
            .try_get_first()
            .or_else(|| self.second.try_get_first())
    }

    fn try_get_last(&mut self) -> Option<A::Item>
    where
        A::Item: Clone,
    {
        self.second
            .try_get_last()
            .or_else(|| self.first.try_get_last())
    }

    fn try_get_element_at(&mut self, index: usize) -> Option<A::Item>
    where
        A::Item: Clone,
    {
        match self.first.fast_count() {
            Some(n) if index >= n => self.second.try_get_element_at(index - n),
            Some(_) => self.first.try_get_element_at(index),
            None => {
                let mut cursor = self.first.cursor();
                let mut skipped = 0;
                while cursor.advance() {
                    if skipped == index {
                        return Some(cursor.current().clone());
                    }
                    skipped += 1;
                }
                drop(cursor);
                self.second.try_get_element_at(index - skipped)
            }
        }
    }

    fn single(&mut self) -> Result<A::Item>
    where
        A::Item: Clone,
    {
        let first = self.first.single();
        combine_single(first, || self.second.single(), Error::EmptySequence)
    }

    fn single_by<P>(&mut self, predicate: P) -> Result<A::Item>
    where
        A::Item: Clone,
        P: Fn(&A::Item) -> bool,
    {
        let first = self.first.single_by(&predicate);
        combine_single(first, || self.second.single_by(predicate), Error::NoMatch)
    }

    fn extend_list(&mut self, out: &mut Vec<A::Item>)
    where
        A::Item: Clone,
    {
        self.first.extend_list(out);
        self.second.extend_list(out);
    }

    fn extend_set<C, W>(&mut self, out: &mut HashSet<C>, mut wrap: W)
    where
        C: Eq + Hash,
        W: FnMut(&A::Item) -> C,
    {
        self.first.extend_set(out, &mut wrap);
        self.second.extend_set(out, wrap);
    }

    fn extend_dictionary<K, V, KF, VF>(
        &mut self,
        out: &mut HashMap<K, V>,
        mut key: KF,
        mut value: VF,
    ) -> Result<()>
    where
        K: Eq + Hash,
        KF: FnMut(&A::Item) -> K,
        VF: FnMut(&A::Item) -> V,
    {
        self.first.extend_dictionary(out, &mut key, &mut value)?;
        self.second.extend_dictionary(out, key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Filter;
    use crate::source::Source;

    #[test]
    fn test_second_cursor_takes_over_in_same_advance() {
        let mut a = [1, 2];
        let mut b = [3];
        let mut both = Concat::new(Source::new(&mut a), Source::new(&mut b));
        let mut cursor = both.cursor();
        let mut seen = Vec::new();
        while cursor.advance() {
            seen.push(*cursor.current());
        }
        assert_eq!(seen, vec![1, 2, 3]);
        assert!(!cursor.advance());
    }

    #[test]
    fn test_element_at_walks_into_second() {
        let mut a = [1, 2, 3];
        let mut b = [4, 5];
        let mut odd_then_b = Concat::new(
            Filter::new(Source::new(&mut a), |x: &i32| x % 2 == 1),
            Source::new(&mut b),
        );
        assert_eq!(odd_then_b.try_get_element_at(1), Some(3));
        assert_eq!(odd_then_b.try_get_element_at(2), Some(4));
        assert_eq!(odd_then_b.try_get_element_at(4), None);
    }

    #[test]
    fn test_single_over_both_sides() {
        let mut a = [1, 1];
        let mut b = [2];
        let mut both = Concat::new(Source::new(&mut a), Source::new(&mut b));
        assert_eq!(both.single_by(|x| *x == 2), Ok(2));
        assert_eq!(both.single_by(|x| *x == 1), Err(Error::MoreThanOneElement));
        assert_eq!(both.single_by(|x| *x == 9), Err(Error::NoMatch));
        assert_eq!(both.single(), Err(Error::MoreThanOneElement));
        assert_eq!(both.try_get_single_by(|x| *x == 1), None);
    }

    #[test]
    fn test_all_requires_both_sides() {
        let mut a = [2, 4];
        let mut b = [5];
        let mut both = Concat::new(Source::new(&mut a), Source::new(&mut b));
        assert!(!both.all(|x| x % 2 == 0));
        assert!(both.all(|x| *x > 0));
    }
}
