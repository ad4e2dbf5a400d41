//! Capability descriptors: small value types with a narrow contract that
//! combinators invoke once per element.
//!
//! Single-method capabilities (predicates, projections, accumulators,
//! equality tests) are plain closures bounded by the `Fn` family at the call
//! site, so argument types are inferred. The traits below cover the
//! capabilities that need more than one method or a named zero-sized
//! implementation; closures still satisfy them through blanket impls.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::AddAssign;

/// In-place step rule used by generators: turns the current element into
/// the next one.
///
/// Rules may carry state. Each traversal runs on its own copy of the rule,
/// so state never leaks from one pass into the next.
pub trait Mutation<T> {
    fn apply(&mut self, item: &mut T);
}

impl<T, F> Mutation<T> for F
where
    F: FnMut(&mut T),
{
    #[inline]
    fn apply(&mut self, item: &mut T) {
        self(item)
    }
}

/// Leaves the element untouched; generates a repeated value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<T> Mutation<T> for Identity {
    #[inline]
    fn apply(&mut self, _item: &mut T) {}
}

/// Adds one to the element; generates a counting range.
#[derive(Debug, Clone, Copy, Default)]
pub struct Increment;

impl<T> Mutation<T> for Increment
where
    T: AddAssign + From<u8>,
{
    #[inline]
    fn apply(&mut self, item: &mut T) {
        *item += T::from(1u8);
    }
}

/// Predicate that also sees the zero-based position of the element in the
/// inner sequence.
pub trait IndexPredicate<T> {
    fn test(&mut self, item: &T, index: usize) -> bool;

    /// Called before every traversal. Stateful windows rewind here.
    fn restart(&mut self) {}

    /// Returns true once no element at `index` or beyond can be accepted,
    /// letting the traversal stop early.
    fn exhausted(&self, _index: usize) -> bool {
        false
    }

    /// Number of accepted elements out of `inner_len`, when it follows from
    /// positions alone.
    fn accepted_count(&self, _inner_len: usize) -> Option<usize> {
        None
    }
}

impl<T, F> IndexPredicate<T> for F
where
    F: FnMut(&T, usize) -> bool,
{
    #[inline]
    fn test(&mut self, item: &T, index: usize) -> bool {
        self(item, index)
    }
}

/// Accepts positions at or after `count`.
#[derive(Debug, Clone, Copy)]
pub struct SkipIndex {
    pub count: usize,
}

impl<T> IndexPredicate<T> for SkipIndex {
    #[inline]
    fn test(&mut self, _item: &T, index: usize) -> bool {
        index >= self.count
    }

    #[inline]
    fn accepted_count(&self, inner_len: usize) -> Option<usize> {
        Some(inner_len.saturating_sub(self.count))
    }
}

/// Accepts positions before `count`.
#[derive(Debug, Clone, Copy)]
pub struct TakeIndex {
    pub count: usize,
}

impl<T> IndexPredicate<T> for TakeIndex {
    #[inline]
    fn test(&mut self, _item: &T, index: usize) -> bool {
        index < self.count
    }

    #[inline]
    fn exhausted(&self, index: usize) -> bool {
        index >= self.count
    }

    #[inline]
    fn accepted_count(&self, inner_len: usize) -> Option<usize> {
        Some(inner_len.min(self.count))
    }
}

/// Rejects the leading run of elements accepted by `predicate`, then
/// accepts everything from the first rejection onward.
#[derive(Debug, Clone, Copy)]
pub struct SkipWhileIndex<P> {
    predicate: P,
    skipping: bool,
}

impl<P> SkipWhileIndex<P> {
    pub fn new(predicate: P) -> Self {
        Self {
            predicate,
            skipping: true,
        }
    }
}

impl<T, P> IndexPredicate<T> for SkipWhileIndex<P>
where
    P: FnMut(&T, usize) -> bool,
{
    fn test(&mut self, item: &T, index: usize) -> bool {
        if self.skipping && (self.predicate)(item, index) {
            return false;
        }
        self.skipping = false;
        true
    }

    fn restart(&mut self) {
        self.skipping = true;
    }
}

/// Accepts the leading run of elements accepted by `predicate` and stops at
/// the first rejection.
#[derive(Debug, Clone, Copy)]
pub struct TakeWhileIndex<P> {
    predicate: P,
    taking: bool,
}

impl<P> TakeWhileIndex<P> {
    pub fn new(predicate: P) -> Self {
        Self {
            predicate,
            taking: true,
        }
    }
}

impl<T, P> IndexPredicate<T> for TakeWhileIndex<P>
where
    P: FnMut(&T, usize) -> bool,
{
    fn test(&mut self, item: &T, index: usize) -> bool {
        self.taking = self.taking && (self.predicate)(item, index);
        self.taking
    }

    fn exhausted(&self, _index: usize) -> bool {
        !self.taking
    }

    fn restart(&mut self) {
        self.taking = true;
    }
}

/// Equality plus a hash consistent with it.
///
/// Used where a host hash container needs custom key semantics
/// (`to_hash_set_by`).
pub trait EqualityComparer<T: ?Sized> {
    fn equals(&self, a: &T, b: &T) -> bool;
    fn hash_of(&self, item: &T) -> u64;
}

/// Structural equality and the standard hasher.
pub struct DefaultComparer<T: ?Sized>(PhantomData<fn(&T)>);

impl<T: ?Sized> DefaultComparer<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: ?Sized> Default for DefaultComparer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for DefaultComparer<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for DefaultComparer<T> {}

impl<T: Eq + Hash + ?Sized> EqualityComparer<T> for DefaultComparer<T> {
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }

    fn hash_of(&self, item: &T) -> u64 {
        // Fixed-key hasher: the hash must be stable across calls.
        let mut hasher = DefaultHasher::new();
        item.hash(&mut hasher);
        hasher.finish()
    }
}

/// Element wrapper whose `Eq`/`Hash` come from an [`EqualityComparer`].
///
/// `to_hash_set_by` stores these so the host `HashSet` applies the custom
/// semantics.
#[derive(Debug, Clone, Copy)]
pub struct CompareBy<T, C> {
    value: T,
    comparer: C,
}

impl<T, C> CompareBy<T, C> {
    pub fn new(value: T, comparer: C) -> Self {
        Self { value, comparer }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, C: EqualityComparer<T>> PartialEq for CompareBy<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.comparer.equals(&self.value, &other.value)
    }
}

impl<T, C: EqualityComparer<T>> Eq for CompareBy<T, C> {}

impl<T, C: EqualityComparer<T>> Hash for CompareBy<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.comparer.hash_of(&self.value));
    }
}
