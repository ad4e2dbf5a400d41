//! Materialization into arena-accounted buffers.
//!
//! The host containers (`Vec`, `HashSet`, `HashMap`) are produced by the
//! sequence algorithms themselves; this module covers the one target that
//! needs an arena. On failure the partial buffer is dropped and its bytes go
//! back to the budget.

use reflinq_core::cursor::Cursor;
use reflinq_core::sequence::Sequence;
use reflinq_mem::{Arena, OwnedBuffer, Result};

pub trait MaterializeExt: Sequence {
    /// Copy every element into a buffer owned by `arena`.
    ///
    /// Pre-sized from `fast_count()` when available. Otherwise starts at the
    /// arena's configured initial capacity, clamped to what the remaining
    /// budget covers, and grows within the budget. A result that fits the
    /// budget never fails.
    fn to_owned_buffer(&mut self, arena: &Arena) -> Result<OwnedBuffer<Self::Item>>
    where
        Self::Item: Clone,
    {
        let presized = self.fast_count();
        let cap = match presized {
            Some(n) => n,
            None => initial_guess::<Self::Item>(arena),
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(cap, exact = presized.is_some(), "to_owned_buffer");

        let mut buf = arena.with_capacity(cap)?;
        let mut cursor = self.cursor();
        while cursor.advance() {
            buf.push(cursor.current().clone())?;
        }
        Ok(buf)
    }
}

impl<S: Sequence> MaterializeExt for S {}

fn initial_guess<T>(arena: &Arena) -> usize {
    let wanted = arena.materialize_initial_capacity();
    match std::mem::size_of::<T>() {
        0 => wanted,
        size => wanted.min(arena.available_bytes() / size),
    }
}
