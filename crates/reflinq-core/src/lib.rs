#![forbid(unsafe_code)]
//! reflinq-core: the contracts every reflinq operator is built on.
//!
//! - `cursor`: the pull protocol (`advance` / `current` / `release`).
//! - `sequence`: how a sequence hands out cursors, plus the shared algorithm
//!   surface (quantifiers, counts, folds, lookups, materialization).
//! - `capability`: small value types invoked per element.
//! - `budget`: memory budget traits implemented by `reflinq-mem`.
//!
//! No allocation policy, buffers, or concrete operators live here.

pub mod budget;
pub mod capability;
pub mod config;
pub mod cursor;
pub mod error;
pub mod prelude;
pub mod sequence;

pub use cursor::Cursor;
pub use error::{Error, Result};
pub use sequence::Sequence;
