//! Query configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::budget::AllocatorKind;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Hard cap (in bytes) for an arena built from this config. Owned buffers
    /// produced by materialization must *never* exceed it.
    pub arena_capacity_bytes: usize,

    /// Allocator kind stamped on arenas built from this config.
    pub default_allocator: AllocatorKind,

    /// Starting capacity for materialization when the element count is not
    /// known without a traversal.
    pub materialize_initial_capacity: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            arena_capacity_bytes: 64 * 1024 * 1024, // 64 MiB default
            default_allocator: AllocatorKind::Temp,
            materialize_initial_capacity: 16,
        }
    }
}

impl QueryConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `REFLINQ_ARENA_CAP_BYTES`: arena capacity in bytes
    /// - `REFLINQ_DEFAULT_ALLOCATOR`: `temp`, `temp_job` or `persistent`
    /// - `REFLINQ_MATERIALIZE_INITIAL_CAPACITY`: growth start for materialization
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("REFLINQ_ARENA_CAP_BYTES") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.arena_capacity_bytes = v;
            }
        }

        if let Ok(s) = std::env::var("REFLINQ_DEFAULT_ALLOCATOR") {
            if let Ok(v) = s.parse::<AllocatorKind>() {
                cfg.default_allocator = v;
            }
        }

        if let Ok(s) = std::env::var("REFLINQ_MATERIALIZE_INITIAL_CAPACITY") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.materialize_initial_capacity = v;
            }
        }

        cfg
    }

    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.arena_capacity_bytes == 0 {
            return Err(Error::Config("arena_capacity_bytes must be non-zero".into()));
        }
        Ok(())
    }
}
