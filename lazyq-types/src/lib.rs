//! Value and comparer types shared by the lazyq crates.
//!
//! - [`Variant`] is the closed set of representations a loosely typed source can
//!   carry. `cast`/`of_type` pattern-match over it through [`FromVariant`].
//! - [`EqualityComparer`] and [`Comparer`] are the pluggable equality/hash and
//!   ordering strategies accepted by every operator that needs one. Omitting a
//!   comparer means [`DefaultEquality`] or [`DefaultOrder`].

pub mod comparer;
pub mod variant;

pub use comparer::{
    CaseInsensitive, Comparer, DefaultEquality, DefaultOrder, EqualityComparer, FnEquality,
    NullAware,
};
pub use variant::{FromVariant, Variant};
