//! Hash structures backing the grouping, join and set operators.
//!
//! - [`Lookup`] is an immutable multi-map from key to an ordered [`Grouping`],
//!   built in one eager pass through [`LookupBuilder`]. First-seen key order and
//!   first-seen element order within each key are preserved.
//! - [`KeySet`] is the growing/shrinking set used by Distinct, Union, Intersect
//!   and Except.
//!
//! Both are driven by an [`EqualityComparer`](lazyq_types::EqualityComparer).
//! Keys the comparer reports as null are kept in a dedicated slot rather than
//! hashed, so a null key can never collide with a real one.
#![forbid(unsafe_code)]

mod key_set;
mod lookup;
mod options;

pub use key_set::KeySet;
pub use lookup::{Grouping, Lookup, LookupBuilder};
pub use options::{LookupOptions, NullKeyPolicy};
