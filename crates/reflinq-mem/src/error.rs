use thiserror::Error;

/// Result type local to reflinq-mem.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("memory budget exceeded for tag '{tag}': requested {requested} bytes, capacity {capacity}, used {used}")]
    BudgetExceeded {
        tag: &'static str,
        requested: usize,
        capacity: usize,
        used: usize,
    },

    #[error("allocation size overflow for {len} elements of {elem_bytes} bytes (tag '{tag}')")]
    SizeOverflow {
        tag: &'static str,
        len: usize,
        elem_bytes: usize,
    },

    #[error("memory budget error: {0}")]
    Budget(String),
}

impl From<Error> for reflinq_core::Error {
    fn from(e: Error) -> Self {
        reflinq_core::Error::Memory(e.to_string())
    }
}
