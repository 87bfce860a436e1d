//! Deferred sequence engine.
//!
//! A [`Sequence`] is a re-traversable factory of [`Cursor`]s. Operators such as
//! [`Sequence::filter`] or [`Sequence::group_by`] wrap a sequence in another
//! one without doing any work; elements flow only when a cursor is advanced.
//! Every cursor runs the same state machine (see [`cursor`]) around a
//! [`Producer`], which guarantees that captured upstream cursors are disposed
//! exactly once however the traversal ends.
//!
//! Terminal operators (`first`, `single`, `to_vec`, `any`, ...) are plain
//! methods returning [`Result`](lazyq_result::Result). Ordering, joins and
//! numeric aggregation live in sibling crates as extension traits.
#![forbid(unsafe_code)]

pub mod cursor;
mod sequence;
mod upstream;

mod combine;
mod convert;
mod element;
mod filter;
mod grouping;
mod partition;
mod quantifier;
mod set_ops;

pub use cursor::{Cursor, CursorState, Producer};
pub use lazyq_lookup::{Grouping, Lookup, LookupOptions, NullKeyPolicy};
pub use sequence::Sequence;
pub use upstream::Upstream;
