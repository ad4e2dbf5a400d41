//! Arena handle: one budget, one allocator kind, one peak tracker.
//!
//! Arenas are cheap to clone; clones share the same budget. Every buffer and
//! slot handed out holds an RAII guard, so `used_bytes()` drops back to zero
//! once all of them are gone.

use std::sync::Arc;

use reflinq_core::budget::AllocatorKind;
use reflinq_core::config::QueryConfig;

use crate::buffer::{OwnedBuffer, Slot};
use crate::error::{Error, Result};
use crate::guard::MemoryBudgetImpl;
use crate::tracking::PeakTracker;

const BUFFER_TAG: &str = "arena.buffer";
const SLOT_TAG: &str = "arena.slot";

#[derive(Clone)]
pub struct Arena {
    budget: MemoryBudgetImpl,
    kind: AllocatorKind,
    peak: Arc<PeakTracker>,
    initial_capacity: usize,
}

impl Arena {
    pub fn new(capacity_bytes: usize, kind: AllocatorKind) -> Self {
        Self {
            budget: MemoryBudgetImpl::new(capacity_bytes),
            kind,
            peak: Arc::new(PeakTracker::new()),
            initial_capacity: QueryConfig::default().materialize_initial_capacity,
        }
    }

    /// Build an arena from a validated config.
    pub fn from_config(cfg: &QueryConfig) -> Result<Self> {
        cfg.validate().map_err(|e| Error::Budget(e.to_string()))?;
        let mut arena = Self::new(cfg.arena_capacity_bytes, cfg.default_allocator);
        arena.initial_capacity = cfg.materialize_initial_capacity;
        Ok(arena)
    }

    /// Buffer of `len` default-initialized elements.
    pub fn acquire<T: Default>(&self, len: usize) -> Result<OwnedBuffer<T>> {
        let mut buf = self.with_capacity::<T>(len)?;
        for _ in 0..len {
            buf.push(T::default())?;
        }
        Ok(buf)
    }

    /// Empty buffer with room for `cap` elements.
    pub fn with_capacity<T>(&self, cap: usize) -> Result<OwnedBuffer<T>> {
        let buf = OwnedBuffer::with_capacity(&self.budget, cap, self.kind, BUFFER_TAG)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            cap,
            bytes = buf.accounted_bytes(),
            kind = %self.kind,
            "acquire buffer"
        );

        self.peak.record_used(self.budget.used_bytes());
        Ok(buf)
    }

    /// Single-element slot. Never fails: slots are accounted but not capped,
    /// since a cursor must be creatable whenever its sequence is.
    pub fn slot<T>(&self, value: T) -> Slot<T> {
        let bytes = std::mem::size_of::<T>();
        let guard = self.budget.acquire_unchecked(bytes, SLOT_TAG);

        #[cfg(feature = "tracing")]
        tracing::trace!(bytes, kind = %self.kind, "acquire slot");

        self.peak.record_used(self.budget.used_bytes());
        Slot::new(value, guard)
    }

    pub fn used_bytes(&self) -> usize {
        self.budget.used_bytes()
    }

    pub fn capacity_bytes(&self) -> usize {
        self.budget.capacity_bytes()
    }

    /// Bytes still available under the cap. Zero once unchecked slots have
    /// pushed usage past it.
    pub fn available_bytes(&self) -> usize {
        self.budget
            .capacity_bytes()
            .saturating_sub(self.budget.used_bytes())
    }

    /// Highest `used_bytes()` observed after any acquisition.
    pub fn peak_bytes(&self) -> usize {
        self.peak.peak()
    }

    pub fn kind(&self) -> AllocatorKind {
        self.kind
    }

    pub fn materialize_initial_capacity(&self) -> usize {
        self.initial_capacity
    }
}

impl Default for Arena {
    fn default() -> Self {
        let cfg = QueryConfig::default();
        Self::new(cfg.arena_capacity_bytes, cfg.default_allocator)
    }
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("kind", &self.kind)
            .field("capacity_bytes", &self.budget.capacity_bytes())
            .field("used_bytes", &self.budget.used_bytes())
            .field("peak_bytes", &self.peak.peak())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_and_release_returns_bytes() {
        let arena = Arena::new(1024, AllocatorKind::Temp);
        let buf = arena.acquire::<u64>(8).unwrap();
        assert_eq!(buf.len(), 8);
        assert_eq!(arena.used_bytes(), 64);
        buf.release();
        assert_eq!(arena.used_bytes(), 0);
        assert_eq!(arena.peak_bytes(), 64);
    }

    #[test]
    fn test_acquire_over_capacity_fails() {
        let arena = Arena::new(16, AllocatorKind::Temp);
        let err = arena.acquire::<u64>(4).unwrap_err();
        assert!(matches!(err, Error::BudgetExceeded { requested: 32, .. }));
        assert_eq!(arena.used_bytes(), 0);
    }

    #[test]
    fn test_push_grows_within_budget() {
        let arena = Arena::new(64, AllocatorKind::TempJob);
        let mut buf = arena.with_capacity::<u32>(1).unwrap();
        for i in 0..16u32 {
            buf.push(i).unwrap();
        }
        assert_eq!(&buf[..3], &[0, 1, 2]);
        assert!(buf.push(16).is_err());
        assert_eq!(buf.kind(), AllocatorKind::TempJob);
        drop(buf);
        assert_eq!(arena.used_bytes(), 0);
    }

    #[test]
    fn test_available_bytes_saturates() {
        let arena = Arena::new(8, AllocatorKind::Temp);
        assert_eq!(arena.available_bytes(), 8);
        let buf = arena.with_capacity::<u16>(1).unwrap();
        assert_eq!(arena.available_bytes(), 6);
        let slot = arena.slot([0u8; 16]);
        assert_eq!(arena.available_bytes(), 0);
        drop(slot);
        drop(buf);
        assert_eq!(arena.available_bytes(), 8);
    }

    #[test]
    fn test_slot_accounted_and_freed() {
        let arena = Arena::new(4, AllocatorKind::Temp);
        let mut slot = arena.slot(7u64);
        *slot.get_mut() += 1;
        assert_eq!(*slot.get(), 8);
        assert_eq!(arena.used_bytes(), 8);
        drop(slot);
        assert_eq!(arena.used_bytes(), 0);
    }

    #[test]
    fn test_from_config_rejects_zero_capacity() {
        let cfg = QueryConfig {
            arena_capacity_bytes: 0,
            ..QueryConfig::default()
        };
        assert!(matches!(Arena::from_config(&cfg), Err(Error::Budget(_))));
    }
}
