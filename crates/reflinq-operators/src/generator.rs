//! Generator adapter: a synthetic sequence `[s, m(s), m(m(s)), ...]`.
//!
//! A traversal keeps its current value in a single arena slot, so the
//! element handed out by `current()` is a real `&mut` that survives until the
//! next `advance()`. The mutation runs in place on that slot, never before
//! the first element has been read, so a full pass over `n` elements runs it
//! exactly `n - 1` times.
//!
//! Whole-sequence algorithms (count, lookups, materialization) replay the
//! rule on a stack copy instead and never touch the arena.
//!
//! Every traversal and every replay clones the rule, so a stateful rule
//! always starts from its initial state.

use std::ops::AddAssign;

use reflinq_core::capability::{Identity, Increment, Mutation};
use reflinq_core::cursor::Cursor;
use reflinq_core::error::{Error, Result};
use reflinq_core::sequence::Sequence;
use reflinq_mem::{Arena, Slot};

pub struct Generator<T, M = Identity> {
    start: T,
    length: usize,
    mutation: M,
    arena: Arena,
}

impl<T, M> Generator<T, M>
where
    T: Clone,
    M: Mutation<T> + Clone,
{
    /// `length` elements starting at `start`; `length <= 0` is empty.
    pub fn new(start: T, length: isize, mutation: M, arena: Arena) -> Self {
        Self {
            start,
            length: length.max(0).unsigned_abs(),
            mutation,
            arena,
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Replay the sequence on a local copy, stopping when `visit` returns
    /// false.
    fn replay<F>(&self, mut visit: F)
    where
        F: FnMut(&T) -> bool,
    {
        if self.length == 0 {
            return;
        }
        let mut mutation = self.mutation.clone();
        let mut value = self.start.clone();
        if !visit(&value) {
            return;
        }
        for _ in 1..self.length {
            mutation.apply(&mut value);
            if !visit(&value) {
                return;
            }
        }
    }

    /// Element at `index`, computed on a local copy.
    fn nth(&self, index: usize) -> Option<T> {
        if index >= self.length {
            return None;
        }
        let mut mutation = self.mutation.clone();
        let mut value = self.start.clone();
        for _ in 0..index {
            mutation.apply(&mut value);
        }
        Some(value)
    }
}

impl<T: Clone> Generator<T, Identity> {
    /// `value` repeated `count` times.
    pub fn repeat(value: T, count: usize, arena: Arena) -> Self {
        Self {
            start: value,
            length: count,
            mutation: Identity,
            arena,
        }
    }
}

impl<T> Generator<T, Increment>
where
    T: Clone + AddAssign + From<u8>,
{
    /// `count` consecutive values starting at `start`.
    pub fn range(start: T, count: usize, arena: Arena) -> Self {
        Self {
            start,
            length: count,
            mutation: Increment,
            arena,
        }
    }
}

pub struct GeneratorCursor<T, M> {
    slot: Option<Slot<T>>,
    yielded: usize,
    length: usize,
    mutation: M,
}

impl<T, M> GeneratorCursor<T, M> {
    fn free_slot(&mut self) {
        if let Some(slot) = self.slot.take() {
            #[cfg(feature = "tracing")]
            tracing::trace!(bytes = slot.accounted_bytes(), "release slot");
            drop(slot);
        }
    }
}

impl<T, M> Cursor for GeneratorCursor<T, M>
where
    M: Mutation<T>,
{
    type Item = T;

    fn advance(&mut self) -> bool {
        if self.yielded >= self.length {
            return false;
        }
        let Some(slot) = self.slot.as_mut() else {
            return false;
        };
        if self.yielded > 0 {
            self.mutation.apply(slot.get_mut());
        }
        self.yielded += 1;
        true
    }

    fn current(&mut self) -> &mut T {
        match self.slot.as_mut() {
            Some(slot) if self.yielded > 0 => slot.get_mut(),
            Some(_) => panic!("GeneratorCursor::current called before advance"),
            None => panic!("GeneratorCursor::current called after release"),
        }
    }

    fn release(&mut self) {
        self.free_slot();
    }
}

impl<T, M> Drop for GeneratorCursor<T, M> {
    fn drop(&mut self) {
        self.free_slot();
    }
}

impl<T, M> Sequence for Generator<T, M>
where
    T: Clone,
    M: Mutation<T> + Clone,
{
    type Item = T;
    type Cursor<'s> = GeneratorCursor<T, M> where Self: 's;

    fn cursor(&mut self) -> GeneratorCursor<T, M> {
        GeneratorCursor {
            slot: Some(self.arena.slot(self.start.clone())),
            yielded: 0,
            length: self.length,
            mutation: self.mutation.clone(),
        }
    }

    fn fast_count(&self) -> Option<usize> {
        Some(self.length)
    }

    fn any(&mut self) -> bool {
        self.length != 0
    }

    fn any_by<P>(&mut self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        let mut found = false;
        self.replay(|value| {
            found = predicate(value);
            !found
        });
        found
    }

    fn all<P>(&mut self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        let mut ok = true;
        self.replay(|value| {
            ok = predicate(value);
            ok
        });
        ok
    }

    fn count(&mut self) -> usize {
        self.length
    }

    fn count_by<P>(&mut self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        let mut n = 0;
        self.replay(|value| {
            if predicate(value) {
                n += 1;
            }
            true
        });
        n
    }

    fn aggregate<A, F>(&mut self, seed: A, mut func: F) -> A
    where
        F: FnMut(A, &T) -> A,
    {
        if self.length == 0 {
            return seed;
        }
        let mut mutation = self.mutation.clone();
        let mut value = self.start.clone();
        let mut acc = func(seed, &value);
        for _ in 1..self.length {
            mutation.apply(&mut value);
            acc = func(acc, &value);
        }
        acc
    }

    fn contains(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.any_by(|item| item == value)
    }

    fn contains_by<E>(&mut self, value: &T, equals: E) -> bool
    where
        E: Fn(&T, &T) -> bool,
    {
        self.any_by(|item| equals(value, item))
    }

    fn try_get_first(&mut self) -> Option<T> {
        self.nth(0)
    }

    fn try_get_last(&mut self) -> Option<T> {
        self.nth(self.length.checked_sub(1)?)
    }

    fn try_get_element_at(&mut self, index: usize) -> Option<T> {
        self.nth(index)
    }

    fn single(&mut self) -> Result<T> {
        match self.length {
            0 => Err(Error::EmptySequence),
            1 => Ok(self.start.clone()),
            _ => Err(Error::MoreThanOneElement),
        }
    }

    fn extend_list(&mut self, out: &mut Vec<T>) {
        out.reserve(self.length);
        self.replay(|value| {
            out.push(value.clone());
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflinq_core::budget::AllocatorKind;

    fn arena() -> Arena {
        Arena::new(1024, AllocatorKind::Temp)
    }

    #[test]
    fn test_mutation_runs_length_minus_one_times() {
        use std::cell::Cell;

        let calls = Cell::new(0);
        let mut gen = Generator::new(
            0i32,
            5,
            |x: &mut i32| {
                calls.set(calls.get() + 1);
                *x += 1;
            },
            arena(),
        );
        let mut cursor = gen.cursor();
        let mut seen = Vec::new();
        while cursor.advance() {
            seen.push(*cursor.current());
        }
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn test_stateful_rule_restarts_every_traversal() {
        let mut step = 0;
        let mut gen = Generator::new(
            0i32,
            5,
            move |x: &mut i32| {
                step += 1;
                *x += step;
            },
            arena(),
        );
        let mut cursor = gen.cursor();
        let mut seen = Vec::new();
        while cursor.advance() {
            seen.push(*cursor.current());
        }
        drop(cursor);
        assert_eq!(seen, vec![0, 1, 3, 6, 10]);
        assert_eq!(gen.to_list(), vec![0, 1, 3, 6, 10]);
        assert_eq!(gen.try_get_element_at(3), Some(6));
        assert_eq!(gen.aggregate(0, |acc, x| acc + x), 20);
    }

    #[test]
    fn test_non_positive_length_is_empty() {
        let mut gen = Generator::new(3u8, -2, Identity, arena());
        assert_eq!(gen.count(), 0);
        let mut cursor = gen.cursor();
        assert!(!cursor.advance());
    }

    #[test]
    fn test_slot_released_on_early_drop() {
        let arena = arena();
        let mut gen = Generator::range(10u64, 100, arena.clone());
        {
            let mut cursor = gen.cursor();
            assert!(cursor.advance());
            assert!(cursor.advance());
            assert_eq!(*cursor.current(), 11);
            assert_eq!(arena.used_bytes(), 8);
        }
        assert_eq!(arena.used_bytes(), 0);
    }

    #[test]
    fn test_release_is_idempotent() {
        let arena = arena();
        let mut gen = Generator::repeat(1u32, 3, arena.clone());
        let mut cursor = gen.cursor();
        assert!(cursor.advance());
        cursor.release();
        cursor.release();
        assert!(!cursor.advance());
        assert_eq!(arena.used_bytes(), 0);
    }

    #[test]
    fn test_lookups_replay_without_cursor() {
        let arena = arena();
        let mut gen = Generator::range(5i64, 4, arena.clone());
        assert_eq!(gen.try_get_element_at(2), Some(7));
        assert_eq!(gen.try_get_element_at(4), None);
        assert_eq!(gen.try_get_last(), Some(8));
        assert!(gen.contains(&8));
        assert!(!gen.contains(&9));
        assert_eq!(gen.to_list(), vec![5, 6, 7, 8]);
        assert_eq!(arena.peak_bytes(), 0);
    }
}
