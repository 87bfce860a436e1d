use std::fmt;

/// A loosely typed value.
///
/// Sources that mix representations (the equivalent of a non-generic
/// enumerable) are modelled as sequences of `Variant`. Converting back to a
/// concrete element type is a pattern match, never a runtime type test.
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Variant {
    /// Name of the representation, used in cast error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Variant::Null => "Null",
            Variant::Bool(_) => "Bool",
            Variant::Int(_) => "Int",
            Variant::Float(_) => "Float",
            Variant::Text(_) => "Text",
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Variant::Null)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Null => write!(f, "NULL"),
            Variant::Bool(b) => write!(f, "{b}"),
            Variant::Int(i) => write!(f, "{i}"),
            Variant::Float(x) => write!(f, "{x}"),
            Variant::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for Variant {
    fn from(value: bool) -> Self {
        Variant::Bool(value)
    }
}

impl From<i64> for Variant {
    fn from(value: i64) -> Self {
        Variant::Int(value)
    }
}

impl From<f64> for Variant {
    fn from(value: f64) -> Self {
        Variant::Float(value)
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Variant::Text(value.to_string())
    }
}

impl From<String> for Variant {
    fn from(value: String) -> Self {
        Variant::Text(value)
    }
}

impl<T: Into<Variant>> From<Option<T>> for Variant {
    fn from(value: Option<T>) -> Self {
        value.map_or(Variant::Null, Into::into)
    }
}

/// Exact (unboxing-style) conversion out of a [`Variant`].
///
/// Conversions never widen or parse: `Int` only becomes `i64`, `Text` only
/// becomes `String`. On mismatch the original value is handed back so the
/// caller can report what it saw.
pub trait FromVariant: Sized {
    fn from_variant(value: Variant) -> Result<Self, Variant>;
}

impl FromVariant for Variant {
    fn from_variant(value: Variant) -> Result<Self, Variant> {
        Ok(value)
    }
}

impl FromVariant for bool {
    fn from_variant(value: Variant) -> Result<Self, Variant> {
        match value {
            Variant::Bool(b) => Ok(b),
            other => Err(other),
        }
    }
}

impl FromVariant for i64 {
    fn from_variant(value: Variant) -> Result<Self, Variant> {
        match value {
            Variant::Int(i) => Ok(i),
            other => Err(other),
        }
    }
}

impl FromVariant for f64 {
    fn from_variant(value: Variant) -> Result<Self, Variant> {
        match value {
            Variant::Float(x) => Ok(x),
            other => Err(other),
        }
    }
}

impl FromVariant for String {
    fn from_variant(value: Variant) -> Result<Self, Variant> {
        match value {
            Variant::Text(s) => Ok(s),
            other => Err(other),
        }
    }
}

/// `Null` converts to `None`; anything else must convert to `T`.
impl<T: FromVariant> FromVariant for Option<T> {
    fn from_variant(value: Variant) -> Result<Self, Variant> {
        match value {
            Variant::Null => Ok(None),
            other => T::from_variant(other).map(Some),
        }
    }
}
