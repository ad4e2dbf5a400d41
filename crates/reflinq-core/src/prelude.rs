//! Convenient re-exports for downstream crates.

pub use crate::budget::{AllocatorKind, BudgetGuard, MemoryBudget};
pub use crate::capability::{
    CompareBy, DefaultComparer, EqualityComparer, Identity, Increment, IndexPredicate, Mutation,
    SkipIndex, SkipWhileIndex, TakeIndex, TakeWhileIndex,
};
pub use crate::config::QueryConfig;
pub use crate::cursor::Cursor;
pub use crate::error::{Error, Result};
pub use crate::sequence::Sequence;
