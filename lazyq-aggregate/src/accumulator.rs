//! Running state for the fold-style aggregates.

use crate::numeric::Numeric;
use lazyq_result::{Error, Result as LazyqResult};
use std::cmp::Ordering;
use std::fmt;

/// Which extremum an [`Extremum`] tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExtremumKind {
    Min,
    Max,
}

impl fmt::Display for ExtremumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtremumKind::Min => write!(f, "MIN"),
            ExtremumKind::Max => write!(f, "MAX"),
        }
    }
}

/// Smallest or largest value seen so far.
///
/// Among values that compare equal the first one seen is kept.
pub struct Extremum<T> {
    kind: ExtremumKind,
    value: Option<T>,
}

impl<T> Extremum<T> {
    pub fn new(kind: ExtremumKind) -> Self {
        Self { kind, value: None }
    }

    /// Offer `candidate`; `compare(candidate, current)` decides.
    pub fn update_by<F>(&mut self, candidate: T, compare: F)
    where
        F: Fn(&T, &T) -> Ordering,
    {
        let replace = match &self.value {
            None => true,
            Some(current) => {
                let ord = compare(&candidate, current);
                match self.kind {
                    ExtremumKind::Min => ord == Ordering::Less,
                    ExtremumKind::Max => ord == Ordering::Greater,
                }
            }
        };
        if replace {
            self.value = Some(candidate);
        }
    }

    pub fn finish(self) -> Option<T> {
        self.value
    }
}

/// Checked running sum.
pub struct Sum<N> {
    total: N,
}

impl<N: Numeric> Sum<N> {
    pub fn new() -> Self {
        Self { total: N::ZERO }
    }

    pub fn add(&mut self, value: N) -> LazyqResult<()> {
        self.total = self
            .total
            .checked_add(value)
            .ok_or_else(|| Error::overflow("sum exceeded the range of its element type"))?;
        Ok(())
    }

    pub fn finish(self) -> N {
        self.total
    }
}

impl<N: Numeric> Default for Sum<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Running mean, accumulated in `f64`.
#[derive(Debug, Default)]
pub struct Mean {
    total: f64,
    count: u64,
}

impl Mean {
    pub fn add<N: Numeric>(&mut self, value: N) {
        self.total += value.to_f64();
        self.count += 1;
    }

    /// `None` when nothing was added.
    pub fn finish(&self) -> Option<f64> {
        (self.count > 0).then(|| self.total / self.count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extremum_keeps_first_of_equals() {
        let mut min = Extremum::new(ExtremumKind::Min);
        for item in [(3, 'a'), (1, 'b'), (1, 'c'), (2, 'd')] {
            min.update_by(item, |a, b| a.0.cmp(&b.0));
        }
        assert_eq!(min.finish(), Some((1, 'b')));

        let mut max = Extremum::new(ExtremumKind::Max);
        for item in [(3, 'a'), (1, 'b'), (3, 'c')] {
            max.update_by(item, |a, b| a.0.cmp(&b.0));
        }
        assert_eq!(max.finish(), Some((3, 'a')));
        assert_eq!(ExtremumKind::Max.to_string(), "MAX");
    }

    #[test]
    fn test_sum_overflow() {
        let mut sum = Sum::<u32>::new();
        sum.add(u32::MAX).unwrap();
        assert!(matches!(sum.add(1), Err(Error::Overflow(_))));
    }

    #[test]
    fn test_mean() {
        let mut mean = Mean::default();
        assert_eq!(mean.finish(), None);
        mean.add(1i32);
        mean.add(2i32);
        assert_eq!(mean.finish(), Some(1.5));
    }
}
