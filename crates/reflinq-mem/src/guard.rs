//! Byte ledger behind every arena, and the guards that hold entries in it.
//!
//! Buffers and generator slots each own one `BudgetGuardImpl`. A guard's
//! bytes stay charged to the ledger until it is dropped or resized, so
//! `used_bytes()` is always the sum of the live guards.

use std::cmp::Ordering as Cmp;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use reflinq_core::budget::{BudgetGuard, MemoryBudget};

/// Capacity plus the running total charged against it.
struct Ledger {
    capacity: usize,
    used: AtomicUsize,
}

impl Ledger {
    /// Charge `bytes` if the total stays within capacity. Zero always fits,
    /// even when unchecked charges have pushed the total past capacity.
    fn reserve(&self, bytes: usize) -> bool {
        if bytes == 0 {
            return true;
        }
        self.used
            .fetch_update(Ordering::AcqRel, Ordering::Relaxed, |used| {
                used.checked_add(bytes).filter(|next| *next <= self.capacity)
            })
            .is_ok()
    }

    /// Charge `bytes` unconditionally. Only single-element slots use this.
    fn charge(&self, bytes: usize) {
        self.used.fetch_add(bytes, Ordering::AcqRel);
    }

    fn refund(&self, bytes: usize) {
        self.used.fetch_sub(bytes, Ordering::AcqRel);
    }

    fn used(&self) -> usize {
        self.used.load(Ordering::Relaxed)
    }
}

/// Shared byte budget. Clones draw from the same ledger.
#[derive(Clone)]
pub struct MemoryBudgetImpl {
    ledger: Arc<Ledger>,
}

impl MemoryBudgetImpl {
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            ledger: Arc::new(Ledger {
                capacity: capacity_bytes,
                used: AtomicUsize::new(0),
            }),
        }
    }

    pub fn used_bytes(&self) -> usize {
        self.ledger.used()
    }

    pub fn capacity_bytes(&self) -> usize {
        self.ledger.capacity
    }

    fn guard(&self, bytes: usize, tag: &'static str) -> BudgetGuardImpl {
        BudgetGuardImpl {
            ledger: Arc::clone(&self.ledger),
            bytes,
            tag,
        }
    }

    /// Guard for `bytes` that is granted even past capacity.
    pub(crate) fn acquire_unchecked(&self, bytes: usize, tag: &'static str) -> BudgetGuardImpl {
        self.ledger.charge(bytes);
        self.guard(bytes, tag)
    }
}

impl MemoryBudget for MemoryBudgetImpl {
    type Guard = BudgetGuardImpl;

    fn try_acquire(&self, bytes: usize, tag: &'static str) -> Option<Self::Guard> {
        self.ledger
            .reserve(bytes)
            .then(|| self.guard(bytes, tag))
    }

    fn capacity_bytes(&self) -> usize {
        self.ledger.capacity
    }

    fn used_bytes(&self) -> usize {
        self.ledger.used()
    }
}

/// Ledger entry owned by one buffer or slot. Refunds its bytes on drop.
pub struct BudgetGuardImpl {
    ledger: Arc<Ledger>,
    bytes: usize,
    tag: &'static str,
}

impl BudgetGuardImpl {
    /// `(capacity, used)` of the ledger this guard draws from.
    pub(crate) fn budget_snapshot(&self) -> (usize, usize) {
        (self.ledger.capacity, self.ledger.used())
    }

    /// Move this entry to `new_bytes`. Shrinking always succeeds; growing
    /// fails, leaving the entry untouched, when the ledger cannot cover it.
    pub fn try_resize(&mut self, new_bytes: usize) -> bool {
        match new_bytes.cmp(&self.bytes) {
            Cmp::Equal => return true,
            Cmp::Less => self.ledger.refund(self.bytes - new_bytes),
            Cmp::Greater => {
                if !self.ledger.reserve(new_bytes - self.bytes) {
                    return false;
                }
            }
        }
        self.bytes = new_bytes;
        true
    }
}

impl BudgetGuard for BudgetGuardImpl {
    fn bytes(&self) -> usize {
        self.bytes
    }

    fn tag(&self) -> &'static str {
        self.tag
    }
}

impl Drop for BudgetGuardImpl {
    fn drop(&mut self) {
        // Runs once per buffer and slot; kept free of tracing.
        if self.bytes > 0 {
            self.ledger.refund(self.bytes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_grow_and_shrink() {
        let budget = MemoryBudgetImpl::new(100);
        let mut guard = budget.try_acquire(40, "test").unwrap();
        assert!(guard.try_resize(90));
        assert_eq!(budget.used_bytes(), 90);
        assert!(!guard.try_resize(120));
        assert_eq!(budget.used_bytes(), 90);
        assert!(guard.try_resize(10));
        assert_eq!(budget.used_bytes(), 10);
        drop(guard);
        assert_eq!(budget.used_bytes(), 0);
    }

    #[test]
    fn test_zero_byte_guard_fits_a_full_ledger() {
        let budget = MemoryBudgetImpl::new(4);
        let full = budget.try_acquire(4, "full").unwrap();
        let empty = budget.try_acquire(0, "empty").unwrap();
        assert_eq!(empty.bytes(), 0);
        assert!(budget.try_acquire(1, "over").is_none());
        drop(empty);
        drop(full);
        assert_eq!(budget.used_bytes(), 0);
    }

    #[test]
    fn test_unchecked_guard_exceeds_capacity() {
        let budget = MemoryBudgetImpl::new(8);
        let guard = budget.acquire_unchecked(16, "slot");
        assert_eq!(budget.used_bytes(), 16);
        assert!(budget.try_acquire(1, "test").is_none());
        drop(guard);
        assert_eq!(budget.used_bytes(), 0);
    }
}
