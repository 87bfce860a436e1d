//! Error types and result definitions for the lazyq sequence engine.
//!
//! This crate provides the single error type ([`Error`]) and result alias
//! ([`Result<T>`]) used by every `lazyq-*` crate. Operators never report failure
//! through sentinel values: a failing terminal call or a failing advance of a
//! cursor returns `Err` exactly once, at the point where the failure happened.
//!
//! # Error Categories
//!
//! - **Empty input** ([`Error::EmptySequence`]): First/Last/Single/Aggregate/Min/Max/Average
//!   over a source that yields nothing
//! - **Predicate failures** ([`Error::NoMatch`], [`Error::MultipleMatches`])
//! - **Positional access** ([`Error::IndexOutOfRange`])
//! - **Conversions** ([`Error::InvalidCast`]): Cast over loosely typed sources
//! - **Keyed materialization** ([`Error::DuplicateKey`]): ToDictionary
//! - **Arithmetic/counting** ([`Error::Overflow`])
//! - **Caller mistakes** ([`Error::InvalidArgumentError`], [`Error::InvalidOperation`])
//! - **Internal errors** ([`Error::Internal`]): Bugs or unexpected states

pub mod error;
pub mod result;

pub use error::Error;
pub use result::Result;
