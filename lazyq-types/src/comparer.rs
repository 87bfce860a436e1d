//! Pluggable equality and ordering strategies.
//!
//! Hash-based operators (GroupBy, Join, Distinct, Union, Intersect, Except,
//! ToLookup) take an [`EqualityComparer`]; ordering operators take a
//! [`Comparer`]. Both are object-safe so operators can hold them behind `Rc`.

use rustc_hash::FxHasher;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Equality plus a hash consistent with it.
///
/// `hash_code` must return equal values for keys that `equals` considers equal.
/// Keys for which `is_null` returns true never reach `equals`/`hash_code`
/// inside a lookup: they live in a dedicated null-key slot.
pub trait EqualityComparer<T: ?Sized> {
    fn equals(&self, a: &T, b: &T) -> bool;

    fn hash_code(&self, value: &T) -> u64;

    /// Whether `value` is the null key.
    fn is_null(&self, _value: &T) -> bool {
        false
    }
}

/// Natural equality through `Eq` + `Hash`, hashed with `FxHasher`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefaultEquality;

impl<T: Hash + Eq + ?Sized> EqualityComparer<T> for DefaultEquality {
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }

    #[inline]
    fn hash_code(&self, value: &T) -> u64 {
        let mut hasher = FxHasher::default();
        value.hash(&mut hasher);
        hasher.finish()
    }
}

/// Lifts a comparer over `T` to `Option<T>`, treating `None` as the null key.
///
/// Lookups built with this comparer keep every `None` key in a single null-key
/// group; joins built with it never match `None` keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAware<C = DefaultEquality>(pub C);

impl<T, C> EqualityComparer<Option<T>> for NullAware<C>
where
    C: EqualityComparer<T>,
{
    fn equals(&self, a: &Option<T>, b: &Option<T>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => self.0.equals(a, b),
            _ => false,
        }
    }

    fn hash_code(&self, value: &Option<T>) -> u64 {
        value.as_ref().map_or(0, |v| self.0.hash_code(v))
    }

    fn is_null(&self, value: &Option<T>) -> bool {
        value.is_none()
    }
}

/// Equality built from a pair of closures.
///
/// ```
/// use lazyq_types::{EqualityComparer, FnEquality};
///
/// let by_parity = FnEquality::new(|a: &i32, b: &i32| a % 2 == b % 2, |v: &i32| (v % 2) as u64);
/// assert!(by_parity.equals(&3, &7));
/// assert!(!by_parity.equals(&3, &4));
/// ```
#[derive(Clone, Copy)]
pub struct FnEquality<E, H> {
    eq: E,
    hash: H,
}

impl<E, H> FnEquality<E, H> {
    pub fn new(eq: E, hash: H) -> Self {
        Self { eq, hash }
    }
}

impl<T: ?Sized, E, H> EqualityComparer<T> for FnEquality<E, H>
where
    E: Fn(&T, &T) -> bool,
    H: Fn(&T) -> u64,
{
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        (self.eq)(a, b)
    }

    #[inline]
    fn hash_code(&self, value: &T) -> u64 {
        (self.hash)(value)
    }
}

/// ASCII case-insensitive string equality and ordering.
#[derive(Clone, Copy, Debug, Default)]
pub struct CaseInsensitive;

impl CaseInsensitive {
    fn hash_str(value: &str) -> u64 {
        let mut hasher = FxHasher::default();
        for b in value.bytes() {
            hasher.write_u8(b.to_ascii_lowercase());
        }
        hasher.finish()
    }

    fn cmp_str(a: &str, b: &str) -> Ordering {
        a.bytes()
            .map(|b| b.to_ascii_lowercase())
            .cmp(b.bytes().map(|b| b.to_ascii_lowercase()))
    }
}

impl EqualityComparer<str> for CaseInsensitive {
    fn equals(&self, a: &str, b: &str) -> bool {
        a.eq_ignore_ascii_case(b)
    }

    fn hash_code(&self, value: &str) -> u64 {
        Self::hash_str(value)
    }
}

impl EqualityComparer<String> for CaseInsensitive {
    fn equals(&self, a: &String, b: &String) -> bool {
        a.eq_ignore_ascii_case(b)
    }

    fn hash_code(&self, value: &String) -> u64 {
        Self::hash_str(value)
    }
}

impl Comparer<str> for CaseInsensitive {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        Self::cmp_str(a, b)
    }
}

impl Comparer<String> for CaseInsensitive {
    fn compare(&self, a: &String, b: &String) -> Ordering {
        Self::cmp_str(a, b)
    }
}

/// Total order over keys.
pub trait Comparer<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Natural order through `Ord`. `None` sorts before every `Some`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefaultOrder;

impl<T: Ord + ?Sized> Comparer<T> for DefaultOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Comparer<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
