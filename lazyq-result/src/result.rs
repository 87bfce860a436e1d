use crate::error::Error;

/// Result type alias used throughout lazyq.
///
/// This is a type alias for `std::result::Result<T, Error>`. Every operator that
/// can fail, whether while traversing or in a terminal call, returns this type.
pub type Result<T> = std::result::Result<T, Error>;
