use std::fmt;
use thiserror::Error;

/// Unified error type for all lazyq operations.
///
/// Every operator, whether lazy or terminal, reports failure through this enum.
/// Lazy operators surface errors from the `advance` call that hit them; terminal
/// operators surface them from the call itself.
///
/// # Error Handling Strategy
///
/// Errors propagate upward with the `?` operator. A cursor that returns an error
/// has already transitioned to its faulted state and disposed of the resources
/// it captured, so callers can drop it without further cleanup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The source yielded no elements where at least one was required.
    ///
    /// Raised by First/Last/Single/Aggregate (without a seed), Min/Max and
    /// Average.
    #[error("Sequence contains no elements")]
    EmptySequence,

    /// No element satisfied the predicate of First/Last/Single.
    #[error("Sequence contains no matching element")]
    NoMatch,

    /// Single/SingleOrDefault found a second element (or a second match).
    ///
    /// The scan always continues past the first hit to detect this.
    #[error("Sequence contains more than one matching element")]
    MultipleMatches,

    /// Positional access outside the bounds of the source.
    ///
    /// `len` is the number of elements observed before the walk ended.
    #[error("Index {index} is out of range for a sequence of {len} elements")]
    IndexOutOfRange { index: usize, len: usize },

    /// An element of a loosely typed source could not be converted by Cast.
    ///
    /// OfType never raises this; it filters the element out instead.
    #[error("Unable to cast value of type {from} to type {to}")]
    InvalidCast { from: &'static str, to: &'static str },

    /// Two elements mapped to the same key while building a dictionary.
    ///
    /// ToLookup groups duplicates instead and never raises this.
    #[error("An element with the same key has already been added: {0}")]
    DuplicateKey(String),

    /// A running counter or checked sum exceeded its representable range.
    #[error("Arithmetic operation resulted in an overflow: {0}")]
    Overflow(String),

    /// Invalid user input or API parameter.
    ///
    /// This covers structurally invalid inputs such as negative counts passed to
    /// Range/Repeat or a Range whose last value would not fit.
    #[error("Invalid argument: {0}")]
    InvalidArgumentError(String),

    /// The call is not valid in the current state of the receiver.
    ///
    /// Reading the current value of a cursor before it produced one, or after
    /// it ended, reports this.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Internal error indicating a bug or unexpected state.
    #[error("An internal operation failed: {0}")]
    Internal(String),
}

impl Error {
    /// Create a duplicate key error from any debuggable key.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazyq_result::Error;
    ///
    /// let err = Error::duplicate_key(&"alpha");
    /// assert_eq!(err, Error::DuplicateKey("\"alpha\"".to_string()));
    /// ```
    #[inline]
    pub fn duplicate_key<K: fmt::Debug + ?Sized>(key: &K) -> Self {
        Error::DuplicateKey(format!("{key:?}"))
    }

    /// Create an overflow error naming the counter or accumulator that overflowed.
    #[inline]
    pub fn overflow<E: fmt::Display>(what: E) -> Self {
        Error::Overflow(what.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::EmptySequence.to_string(),
            "Sequence contains no elements"
        );
        assert_eq!(
            Error::IndexOutOfRange { index: 7, len: 3 }.to_string(),
            "Index 7 is out of range for a sequence of 3 elements"
        );
        assert_eq!(
            Error::InvalidCast {
                from: "Text",
                to: "i64"
            }
            .to_string(),
            "Unable to cast value of type Text to type i64"
        );
    }

    #[test]
    fn test_overflow_helper() {
        let err = Error::overflow("element index");
        assert!(matches!(err, Error::Overflow(msg) if msg == "element index"));
    }
}
