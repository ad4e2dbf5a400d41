//! Sequence protocol and the shared algorithm surface.
//!
//! A sequence is a description of how to produce elements; all work happens
//! when a cursor is created and advanced. Every algorithm below is written
//! once against the cursor protocol. Concrete sequences override the ones
//! they can answer better (a buffer knows its length, a concatenation can ask
//! each side separately), and the compiler specializes the rest per type.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::capability::{CompareBy, EqualityComparer};
use crate::cursor::Cursor;
use crate::error::{Error, Result};

pub trait Sequence {
    /// The type of elements produced.
    type Item;

    /// Cursor type for one traversal. It borrows the sequence, so the
    /// borrowed buffer (or generator state) outlives every cursor.
    type Cursor<'s>: Cursor<Item = Self::Item>
    where
        Self: 's;

    /// Start a new traversal positioned before the first element.
    fn cursor(&mut self) -> Self::Cursor<'_>;

    /// Element count when it is known without a traversal.
    fn fast_count(&self) -> Option<usize> {
        None
    }

    fn can_fast_count(&self) -> bool {
        self.fast_count().is_some()
    }

    // ----- element access -----

    /// Visit every element by mutable reference. Changes land in the source.
    fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Self::Item),
    {
        let mut cursor = self.cursor();
        while cursor.advance() {
            f(cursor.current());
        }
    }

    // ----- quantifiers -----

    fn any(&mut self) -> bool {
        if let Some(n) = self.fast_count() {
            return n != 0;
        }
        let mut cursor = self.cursor();
        cursor.advance()
    }

    fn any_by<P>(&mut self, predicate: P) -> bool
    where
        P: Fn(&Self::Item) -> bool,
    {
        let mut cursor = self.cursor();
        while cursor.advance() {
            if predicate(cursor.current()) {
                return true;
            }
        }
        false
    }

    /// True when every element satisfies `predicate`; true for an empty
    /// sequence.
    fn all<P>(&mut self, predicate: P) -> bool
    where
        P: Fn(&Self::Item) -> bool,
    {
        let mut cursor = self.cursor();
        while cursor.advance() {
            if !predicate(cursor.current()) {
                return false;
            }
        }
        true
    }

    // ----- counting -----

    fn count(&mut self) -> usize {
        if let Some(n) = self.fast_count() {
            return n;
        }
        let mut cursor = self.cursor();
        let mut n = 0;
        while cursor.advance() {
            n += 1;
        }
        n
    }

    fn count_by<P>(&mut self, predicate: P) -> usize
    where
        P: Fn(&Self::Item) -> bool,
    {
        let mut cursor = self.cursor();
        let mut n = 0;
        while cursor.advance() {
            if predicate(cursor.current()) {
                n += 1;
            }
        }
        n
    }

    // ----- folds -----

    /// Left fold over element references.
    fn aggregate<A, F>(&mut self, seed: A, mut func: F) -> A
    where
        F: FnMut(A, &Self::Item) -> A,
    {
        let mut cursor = self.cursor();
        let mut acc = seed;
        while cursor.advance() {
            acc = func(acc, cursor.current());
        }
        acc
    }

    /// Left fold followed by a projection of the final accumulator.
    fn aggregate_with<A, R, F, S>(&mut self, seed: A, func: F, result: S) -> R
    where
        F: FnMut(A, &Self::Item) -> A,
        S: FnOnce(A) -> R,
    {
        result(self.aggregate(seed, func))
    }

    /// Fold seeded with the first element. An empty sequence has no identity
    /// to fall back on and yields [`Error::EmptySequence`].
    fn reduce<F>(&mut self, mut func: F) -> Result<Self::Item>
    where
        Self::Item: Clone,
        F: FnMut(Self::Item, &Self::Item) -> Self::Item,
    {
        let mut cursor = self.cursor();
        if !cursor.advance() {
            return Err(Error::EmptySequence);
        }
        let mut acc = cursor.current().clone();
        while cursor.advance() {
            acc = func(acc, cursor.current());
        }
        Ok(acc)
    }

    // ----- search -----

    fn contains(&mut self, value: &Self::Item) -> bool
    where
        Self::Item: PartialEq,
    {
        self.any_by(|item| item == value)
    }

    /// Linear scan using a caller supplied equality.
    fn contains_by<E>(&mut self, value: &Self::Item, equals: E) -> bool
    where
        E: Fn(&Self::Item, &Self::Item) -> bool,
    {
        self.any_by(|item| equals(value, item))
    }

    fn try_get_first(&mut self) -> Option<Self::Item>
    where
        Self::Item: Clone,
    {
        let mut cursor = self.cursor();
        if cursor.advance() {
            Some(cursor.current().clone())
        } else {
            None
        }
    }

    fn try_get_last(&mut self) -> Option<Self::Item>
    where
        Self::Item: Clone,
    {
        let mut cursor = self.cursor();
        let mut last = None;
        while cursor.advance() {
            last = Some(cursor.current().clone());
        }
        last
    }

    fn try_get_element_at(&mut self, index: usize) -> Option<Self::Item>
    where
        Self::Item: Clone,
    {
        let mut cursor = self.cursor();
        let mut remaining = index;
        while cursor.advance() {
            if remaining == 0 {
                return Some(cursor.current().clone());
            }
            remaining -= 1;
        }
        None
    }

    /// The only element; `None` for zero or more than one.
    fn try_get_single(&mut self) -> Option<Self::Item>
    where
        Self::Item: Clone,
    {
        self.single().ok()
    }

    /// The only matching element; `None` for zero or more than one match.
    fn try_get_single_by<P>(&mut self, predicate: P) -> Option<Self::Item>
    where
        Self::Item: Clone,
        P: Fn(&Self::Item) -> bool,
    {
        self.single_by(predicate).ok()
    }

    // ----- strict accessors -----

    fn first(&mut self) -> Result<Self::Item>
    where
        Self::Item: Clone,
    {
        self.try_get_first().ok_or(Error::EmptySequence)
    }

    fn first_by<P>(&mut self, predicate: P) -> Result<Self::Item>
    where
        Self::Item: Clone,
        P: Fn(&Self::Item) -> bool,
    {
        let mut cursor = self.cursor();
        while cursor.advance() {
            let item = cursor.current();
            if predicate(item) {
                return Ok(item.clone());
            }
        }
        Err(Error::NoMatch)
    }

    fn first_or_default(&mut self) -> Self::Item
    where
        Self::Item: Clone + Default,
    {
        self.try_get_first().unwrap_or_default()
    }

    fn last(&mut self) -> Result<Self::Item>
    where
        Self::Item: Clone,
    {
        self.try_get_last().ok_or(Error::EmptySequence)
    }

    fn last_or_default(&mut self) -> Self::Item
    where
        Self::Item: Clone + Default,
    {
        self.try_get_last().unwrap_or_default()
    }

    fn single(&mut self) -> Result<Self::Item>
    where
        Self::Item: Clone,
    {
        let mut cursor = self.cursor();
        if !cursor.advance() {
            return Err(Error::EmptySequence);
        }
        let value = cursor.current().clone();
        if cursor.advance() {
            return Err(Error::MoreThanOneElement);
        }
        Ok(value)
    }

    fn single_by<P>(&mut self, predicate: P) -> Result<Self::Item>
    where
        Self::Item: Clone,
        P: Fn(&Self::Item) -> bool,
    {
        let mut cursor = self.cursor();
        let mut found = None;
        while cursor.advance() {
            let item = cursor.current();
            if predicate(item) {
                if found.is_some() {
                    return Err(Error::MoreThanOneElement);
                }
                found = Some(item.clone());
            }
        }
        found.ok_or(Error::NoMatch)
    }

    // ----- materialization -----

    /// Append every element to `out`.
    fn extend_list(&mut self, out: &mut Vec<Self::Item>)
    where
        Self::Item: Clone,
    {
        if let Some(n) = self.fast_count() {
            out.reserve(n);
        }
        let mut cursor = self.cursor();
        while cursor.advance() {
            out.push(cursor.current().clone());
        }
    }

    fn to_list(&mut self) -> Vec<Self::Item>
    where
        Self::Item: Clone,
    {
        let mut out = Vec::with_capacity(self.fast_count().unwrap_or(0));
        #[cfg(feature = "tracing")]
        tracing::trace!(presized = out.capacity(), "to_list");
        self.extend_list(&mut out);
        out
    }

    fn to_array(&mut self) -> Box<[Self::Item]>
    where
        Self::Item: Clone,
    {
        self.to_list().into_boxed_slice()
    }

    /// Insert every element into `out`, converted by `wrap`.
    fn extend_set<C, W>(&mut self, out: &mut HashSet<C>, mut wrap: W)
    where
        C: Eq + Hash,
        W: FnMut(&Self::Item) -> C,
    {
        let mut cursor = self.cursor();
        while cursor.advance() {
            out.insert(wrap(cursor.current()));
        }
    }

    fn to_hash_set(&mut self) -> HashSet<Self::Item>
    where
        Self::Item: Clone + Eq + Hash,
    {
        let mut out = HashSet::with_capacity(self.fast_count().unwrap_or(0));
        self.extend_set(&mut out, |item| item.clone());
        out
    }

    /// Hash set with custom equality and hashing from `comparer`.
    fn to_hash_set_by<C>(&mut self, comparer: C) -> HashSet<CompareBy<Self::Item, C>>
    where
        Self::Item: Clone,
        C: EqualityComparer<Self::Item> + Clone,
    {
        let mut out = HashSet::with_capacity(self.fast_count().unwrap_or(0));
        self.extend_set(&mut out, |item| CompareBy::new(item.clone(), comparer.clone()));
        out
    }

    /// Insert one entry per element; a repeated key fails with
    /// [`Error::DuplicateKey`].
    fn extend_dictionary<K, V, KF, VF>(
        &mut self,
        out: &mut HashMap<K, V>,
        mut key: KF,
        mut value: VF,
    ) -> Result<()>
    where
        K: Eq + Hash,
        KF: FnMut(&Self::Item) -> K,
        VF: FnMut(&Self::Item) -> V,
    {
        let mut cursor = self.cursor();
        while cursor.advance() {
            let item = cursor.current();
            match out.entry(key(item)) {
                Entry::Occupied(_) => return Err(Error::DuplicateKey),
                Entry::Vacant(slot) => {
                    slot.insert(value(item));
                }
            }
        }
        Ok(())
    }

    fn to_dictionary<K, V, KF, VF>(&mut self, key: KF, value: VF) -> Result<HashMap<K, V>>
    where
        K: Eq + Hash,
        KF: FnMut(&Self::Item) -> K,
        VF: FnMut(&Self::Item) -> V,
    {
        let mut out = HashMap::with_capacity(self.fast_count().unwrap_or(0));
        self.extend_dictionary(&mut out, key, value)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Cursor-only sequence: every algorithm runs through the defaults.
    struct Walk(Vec<i32>);

    struct WalkCursor<'s> {
        items: &'s mut [i32],
        pos: Option<usize>,
    }

    impl Cursor for WalkCursor<'_> {
        type Item = i32;

        fn advance(&mut self) -> bool {
            let next = self.pos.map_or(0, |p| p + 1);
            if next < self.items.len() {
                self.pos = Some(next);
                true
            } else {
                false
            }
        }

        fn current(&mut self) -> &mut i32 {
            &mut self.items[self.pos.unwrap()]
        }
    }

    impl Sequence for Walk {
        type Item = i32;
        type Cursor<'s> = WalkCursor<'s>;

        fn cursor(&mut self) -> WalkCursor<'_> {
            WalkCursor {
                items: &mut self.0,
                pos: None,
            }
        }
    }

    #[test]
    fn test_defaults_without_fast_count() {
        let mut seq = Walk(vec![3, 1, 4, 1, 5]);
        assert!(!seq.can_fast_count());
        assert_eq!(seq.count(), 5);
        assert_eq!(seq.count_by(|x| *x == 1), 2);
        assert_eq!(seq.try_get_element_at(2), Some(4));
        assert_eq!(seq.try_get_last(), Some(5));
        assert_eq!(seq.first_by(|x| *x > 3), Ok(4));
        assert_eq!(seq.single_by(|x| *x == 1), Err(Error::MoreThanOneElement));
        assert_eq!(seq.reduce(|a, b| a + b), Ok(14));
        assert_eq!(seq.to_hash_set().len(), 4);
    }

    #[test]
    fn test_empty_defaults() {
        let mut seq = Walk(Vec::new());
        assert!(!seq.any());
        assert!(seq.all(|_| false));
        assert_eq!(seq.try_get_first(), None);
        assert_eq!(seq.first_or_default(), 0);
        assert_eq!(seq.single(), Err(Error::EmptySequence));
        assert!(seq.to_array().is_empty());
    }

    #[test]
    fn test_for_each_mut_writes_back() {
        let mut seq = Walk(vec![1, 2]);
        seq.for_each_mut(|x| *x *= 2);
        assert_eq!(seq.0, vec![2, 4]);
    }
}
