#![forbid(unsafe_code)]
//! reflinq: by-reference query operators over borrowed buffers.
//!
//! ```
//! use reflinq::prelude::*;
//!
//! let mut data = [1, 2, 3, 4, 5];
//! let mut evens = Source::new(&mut data).filter(|x: &i32| x % 2 == 0);
//! assert_eq!(evens.to_list(), vec![2, 4]);
//! ```

pub use reflinq_core::{Cursor, Error, Result, Sequence};
pub use reflinq_mem::Arena;
pub use reflinq_operators::{Concat, Filter, Generator, IndexFilter, Source};

pub mod prelude {
    pub use reflinq_core::prelude::*;
    pub use reflinq_mem::{Arena, OwnedBuffer, Slot};
    pub use reflinq_operators::{
        Concat, Filter, Generator, IndexFilter, MaterializeExt, SequenceExt, Source,
    };
}
