#![forbid(unsafe_code)]
//! reflinq-operators: the concrete sequences and combinators.
//!
//! Design intent:
//! - Every operator is its own statically-typed cursor; chains are nested
//!   generic types with no boxing or dynamic dispatch.
//! - Cursors hand out `&mut` aliases into the source buffer (or into the
//!   generator's slot), never copies.
//! - The only per-traversal allocation is the generator slot, taken from
//!   `reflinq-mem` and released on `release()` or drop.

pub mod concat;
pub mod ext;
pub mod filter;
pub mod generator;
pub mod index_filter;
pub mod materialize;
pub mod source;

pub use concat::{Concat, ConcatCursor};
pub use ext::SequenceExt;
pub use filter::{Filter, FilterCursor};
pub use generator::{Generator, GeneratorCursor};
pub use index_filter::{IndexFilter, IndexFilterCursor};
pub use materialize::MaterializeExt;
pub use source::{Source, SourceCursor};
