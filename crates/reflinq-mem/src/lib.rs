#![forbid(unsafe_code)]
//! reflinq-mem: hard memory budgeting, typed owned buffers, and cursor slots.
//!
//! This crate provides concrete implementations for the *interfaces* defined
//! in `reflinq-core::budget`. Every allocation a query makes (generator
//! slots, materialized buffers) flows through an [`Arena`] so the ceiling is
//! enforced with RAII guards and released on every exit path.

pub mod arena;
pub mod buffer;
pub mod error;
pub mod guard;
pub mod tracking;

pub use arena::Arena;
pub use buffer::{OwnedBuffer, Slot};
pub use error::{Error, Result};
pub use guard::{BudgetGuardImpl, MemoryBudgetImpl};
pub use tracking::PeakTracker;
