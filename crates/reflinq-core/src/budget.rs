//! Abstract memory budget interfaces.
//!
//! The concrete implementation lives in `reflinq-mem`. We keep only traits here
//! so any crate can depend on the API without pulling the arena logic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Lifetime class of an allocation, mirroring the arena's pools.
///
/// The kind does not change allocation behavior inside this workspace; it is
/// carried so accounting and tracing can tell short-lived cursor slots apart
/// from buffers that outlive a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocatorKind {
    /// Scratch memory scoped to a single traversal.
    #[default]
    Temp,
    /// Memory that lives for a few frames of work.
    TempJob,
    /// Memory released only by an explicit call.
    Persistent,
}

impl AllocatorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            AllocatorKind::Temp => "temp",
            AllocatorKind::TempJob => "temp_job",
            AllocatorKind::Persistent => "persistent",
        }
    }
}

impl fmt::Display for AllocatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AllocatorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "temp" => Ok(AllocatorKind::Temp),
            "temp_job" | "tempjob" => Ok(AllocatorKind::TempJob),
            "persistent" => Ok(AllocatorKind::Persistent),
            other => Err(Error::Config(format!("unknown allocator kind '{}'", other))),
        }
    }
}

/// A guard returned by a memory budget when bytes are acquired.
///
/// The concrete type lives in `reflinq-mem`. It must be RAII (releases on Drop),
/// `Send`, and `panic`-safe.
pub trait BudgetGuard: Send {
    /// Number of bytes currently accounted for by this guard.
    fn bytes(&self) -> usize;
    /// Optional debug tag for tracing.
    fn tag(&self) -> &'static str {
        "guard"
    }
}

/// A handle representing a memory-cap enforcer.
///
/// Implemented by `reflinq-mem`. Materializing operators call `try_acquire`
/// before allocating. If `None` is returned, the allocation must not happen.
pub trait MemoryBudget: Send + Sync + 'static {
    type Guard: BudgetGuard;

    /// Attempt to acquire `bytes` from the live budget. Returns a guard on success.
    fn try_acquire(&self, bytes: usize, tag: &'static str) -> Option<Self::Guard>;

    /// Total configured capacity (bytes).
    fn capacity_bytes(&self) -> usize;

    /// Approximate currently used bytes (advisory; not a correctness API).
    fn used_bytes(&self) -> usize;
}

// NOTE: Do *not* add default impls here that would silently "allow" allocations.
// The mem crate is the only place where guards should be constructed.
