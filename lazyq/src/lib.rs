//! lazyq: deferred query operators over re-traversable sequences
//!
//! This crate is the entrypoint for the lazyq workspace. It re-exports the
//! sequence engine and the operator crates behind one API surface.
//!
//! # Quick Start
//!
//! ```rust
//! use lazyq::prelude::*;
//!
//! let squares = Sequence::range(-1, 5)?
//!     .filter(|x| *x > 0)
//!     .select(|x| x * x);
//! assert_eq!(squares.to_vec()?, vec![1, 4, 9]);
//! assert_eq!(squares.sum()?, 14);
//! # Ok::<(), lazyq::Error>(())
//! ```
//!
//! # Architecture
//!
//! - **Engine** (`lazyq-seq`): the `Cursor` state machine, `Sequence` factories
//!   and the single-pass, grouping, set, element and conversion operators.
//! - **Hashing** (`lazyq-lookup`, `lazyq-types`): `Lookup`, `KeySet` and the
//!   pluggable equality/ordering strategies.
//! - **Operators** (`lazyq-order`, `lazyq-join`, `lazyq-aggregate`): ordering,
//!   joins and numeric aggregation as extension traits.
//! - **Errors** (`lazyq-result`): the shared `Error` enum.

pub use lazyq_aggregate::{NullableAggregateExt, Numeric, SequenceAggregateExt};
pub use lazyq_join::{JoinType, SequenceJoinExt};
pub use lazyq_lookup::{Grouping, KeySet, Lookup, LookupBuilder, LookupOptions, NullKeyPolicy};
pub use lazyq_order::{OrderedSequence, SequenceOrderExt, SortDirection};
pub use lazyq_result::{Error, Result};
pub use lazyq_seq::{Cursor, CursorState, Producer, Sequence, Upstream};
pub use lazyq_types::{
    CaseInsensitive, Comparer, DefaultEquality, DefaultOrder, EqualityComparer, FnEquality,
    FromVariant, NullAware, Variant,
};

pub mod prelude {
    //! Glob-import this to bring `Sequence` and every operator trait into scope.

    pub use crate::{
        NullableAggregateExt, Sequence, SequenceAggregateExt, SequenceJoinExt, SequenceOrderExt,
    };
}
