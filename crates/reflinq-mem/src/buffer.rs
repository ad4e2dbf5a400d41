//! Typed owned buffers and single-element slots, both accounted against a
//! [`MemoryBudgetImpl`](crate::guard::MemoryBudgetImpl).
//!
//! The accounted size is always `capacity * size_of::<T>()`; growing the
//! buffer grows the guard first, so the budget is never exceeded.

use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};

use reflinq_core::budget::{AllocatorKind, BudgetGuard, MemoryBudget};

use crate::error::{Error, Result};
use crate::guard::{BudgetGuardImpl, MemoryBudgetImpl};

pub(crate) fn bytes_for<T>(len: usize, tag: &'static str) -> Result<usize> {
    let elem_bytes = mem::size_of::<T>();
    len.checked_mul(elem_bytes).ok_or(Error::SizeOverflow {
        tag,
        len,
        elem_bytes,
    })
}

/// Owned, budget-accounted buffer of `T`. Returns its bytes on drop.
pub struct OwnedBuffer<T> {
    guard: BudgetGuardImpl,
    buf: Vec<T>,
    kind: AllocatorKind,
}

impl<T> OwnedBuffer<T> {
    /// Empty buffer with room for `cap` elements.
    pub(crate) fn with_capacity(
        budget: &MemoryBudgetImpl,
        cap: usize,
        kind: AllocatorKind,
        tag: &'static str,
    ) -> Result<Self> {
        let bytes = bytes_for::<T>(cap, tag)?;
        let guard = budget
            .try_acquire(bytes, tag)
            .ok_or_else(|| Error::BudgetExceeded {
                tag,
                requested: bytes,
                capacity: budget.capacity_bytes(),
                used: budget.used_bytes(),
            })?;

        Ok(Self {
            guard,
            buf: Vec::with_capacity(cap),
            kind,
        })
    }

    /// Current accounted size (bytes).
    pub fn accounted_bytes(&self) -> usize {
        self.guard.bytes()
    }

    pub fn kind(&self) -> AllocatorKind {
        self.kind
    }

    /// Accounted element capacity.
    pub fn capacity(&self) -> usize {
        match mem::size_of::<T>() {
            0 => self.buf.capacity(),
            size => self.guard.bytes() / size,
        }
    }

    /// Try to grow the capacity, acquiring additional budget first.
    /// Returns false if the budget cannot cover `new_cap` elements.
    pub fn try_grow(&mut self, new_cap: usize) -> bool {
        if new_cap <= self.capacity() {
            return true;
        }
        let Some(new_bytes) = new_cap.checked_mul(mem::size_of::<T>()) else {
            return false;
        };
        if !self.guard.try_resize(new_bytes) {
            return false;
        }
        self.buf.reserve_exact(new_cap - self.buf.len());
        true
    }

    /// Append one element, doubling the accounted capacity when full.
    pub fn push(&mut self, value: T) -> Result<()> {
        if self.buf.len() == self.capacity() {
            let wanted = self.capacity().saturating_mul(2).max(self.buf.len() + 1);
            if !self.try_grow(wanted) && !self.try_grow(self.buf.len() + 1) {
                let requested = bytes_for::<T>(1, self.guard.tag())?;
                let (capacity, used) = self.guard.budget_snapshot();
                return Err(Error::BudgetExceeded {
                    tag: self.guard.tag(),
                    requested,
                    capacity,
                    used,
                });
            }
        }
        self.buf.push(value);
        Ok(())
    }

    /// Release the buffer and its accounted bytes now. Equivalent to drop.
    pub fn release(self) {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            bytes = self.guard.bytes(),
            kind = %self.kind,
            "release buffer"
        );
        drop(self);
    }

    /// Detach the elements from the arena; the accounted bytes are returned.
    pub fn into_vec(self) -> Vec<T> {
        self.buf
    }
}

impl<T> Deref for OwnedBuffer<T> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl<T> DerefMut for OwnedBuffer<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buf
    }
}

impl<T: fmt::Debug> fmt::Debug for OwnedBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedBuffer")
            .field("kind", &self.kind)
            .field("accounted_bytes", &self.guard.bytes())
            .field("items", &self.buf)
            .finish()
    }
}

/// One accounted element. Generators keep their current value here for the
/// duration of a traversal.
pub struct Slot<T> {
    value: Box<T>,
    _guard: BudgetGuardImpl,
}

impl<T> Slot<T> {
    pub(crate) fn new(value: T, guard: BudgetGuardImpl) -> Self {
        Self {
            value: Box::new(value),
            _guard: guard,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn accounted_bytes(&self) -> usize {
        self._guard.bytes()
    }
}
