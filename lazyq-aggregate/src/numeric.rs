/// Element types `sum` and `average` accept.
///
/// Integer addition is checked; float addition follows IEEE semantics and
/// never reports overflow.
pub trait Numeric: Copy {
    const ZERO: Self;

    fn checked_add(self, other: Self) -> Option<Self>;

    fn to_f64(self) -> f64;
}

macro_rules! impl_integer {
    ($($ty:ty),*) => {
        $(
            impl Numeric for $ty {
                const ZERO: Self = 0;

                #[inline]
                fn checked_add(self, other: Self) -> Option<Self> {
                    <$ty>::checked_add(self, other)
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

macro_rules! impl_float {
    ($($ty:ty),*) => {
        $(
            impl Numeric for $ty {
                const ZERO: Self = 0.0;

                #[inline]
                fn checked_add(self, other: Self) -> Option<Self> {
                    Some(self + other)
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    f64::from(self)
                }
            }
        )*
    };
}

impl_integer!(i32, i64, u32, u64, usize);
impl_float!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_add_is_checked() {
        assert_eq!(Numeric::checked_add(1i32, 2), Some(3));
        assert_eq!(Numeric::checked_add(i32::MAX, 1), None);
        assert_eq!(Numeric::checked_add(u64::MAX, 0), Some(u64::MAX));
    }

    #[test]
    fn test_float_add_never_overflows() {
        assert_eq!(Numeric::checked_add(f64::MAX, f64::MAX), Some(f64::INFINITY));
        assert_eq!(2.5f32.to_f64(), 2.5);
    }
}
