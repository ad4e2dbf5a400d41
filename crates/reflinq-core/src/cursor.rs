//! Cursor protocol: the pull model every operator implements.
//!
//! A cursor starts *before* the first element. `advance()` moves forward and
//! reports whether an element is available; `current()` then hands out a
//! mutable alias into wherever the element lives (the source buffer, or the
//! generator's slot). The alias is borrowed from the cursor, so it cannot
//! outlive the position it was taken at.

use crate::error::{Error, Result};

pub trait Cursor {
    /// The type of elements this cursor walks over.
    type Item;

    /// Move to the next element. Returns false once the sequence is
    /// exhausted, and keeps returning false on every later call.
    fn advance(&mut self) -> bool;

    /// Mutable alias to the element at the current position.
    ///
    /// # Panics
    ///
    /// Only valid after `advance()` returned true. Calling it before the
    /// first advance, or after exhaustion or release, is a programming error
    /// and may panic.
    fn current(&mut self) -> &mut Self::Item;

    /// Release ancillary resources held by the cursor. Safe to call more than
    /// once; dropping the cursor has the same effect.
    fn release(&mut self) {}

    /// Cursors are forward-only and single-pass.
    fn reset(&mut self) -> Result<()> {
        Err(Error::ResetUnsupported)
    }

    /// Drive the cursor to the end, handing each element to `f` by reference.
    fn for_each_mut<F>(&mut self, mut f: F)
    where
        Self: Sized,
        F: FnMut(&mut Self::Item),
    {
        while self.advance() {
            f(self.current());
        }
    }
}
