use lazyq_types::Comparer;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

/// Direction of one sort criterion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[inline]
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "ASC"),
            SortDirection::Descending => write!(f, "DESC"),
        }
    }
}

/// Compares two buffered rows by position.
pub(crate) type RowComparator = Box<dyn Fn(usize, usize) -> Ordering>;

/// One key of a composite sort.
pub(crate) trait SortCriterion<T> {
    /// Extract this criterion's key for every buffered row, once.
    fn prepare(&self, rows: &[T]) -> RowComparator;

    fn direction(&self) -> SortDirection;
}

pub(crate) struct KeyCriterion<K, F, C> {
    key: F,
    comparer: Rc<C>,
    direction: SortDirection,
    _key: PhantomData<fn() -> K>,
}

impl<K, F, C> KeyCriterion<K, F, C> {
    pub(crate) fn new(key: F, comparer: C, direction: SortDirection) -> Self {
        Self {
            key,
            comparer: Rc::new(comparer),
            direction,
            _key: PhantomData,
        }
    }
}

impl<T, K, F, C> SortCriterion<T> for KeyCriterion<K, F, C>
where
    K: 'static,
    F: Fn(&T) -> K,
    C: Comparer<K> + 'static,
{
    fn prepare(&self, rows: &[T]) -> RowComparator {
        let keys: Vec<K> = rows.iter().map(&self.key).collect();
        let comparer = Rc::clone(&self.comparer);
        let direction = self.direction;
        Box::new(move |a, b| direction.apply(comparer.compare(&keys[a], &keys[b])))
    }

    fn direction(&self) -> SortDirection {
        self.direction
    }
}

/// Stable sort of `rows` under `criteria`, first criterion primary.
///
/// Rows equal under every criterion keep their input order: the final
/// tie-break is the input position.
pub(crate) fn sort_rows<T>(rows: Vec<T>, criteria: &[Rc<dyn SortCriterion<T>>]) -> Vec<T> {
    let comparators: Vec<RowComparator> = criteria.iter().map(|c| c.prepare(&rows)).collect();
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_unstable_by(|&a, &b| {
        comparators
            .iter()
            .map(|cmp| cmp(a, b))
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| a.cmp(&b))
    });

    let mut slots: Vec<Option<T>> = rows.into_iter().map(Some).collect();
    order.into_iter().filter_map(|idx| slots[idx].take()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazyq_types::DefaultOrder;

    fn criterion<T: 'static, K: Ord + 'static>(
        key: impl Fn(&T) -> K + 'static,
        direction: SortDirection,
    ) -> Rc<dyn SortCriterion<T>> {
        Rc::new(KeyCriterion::new(key, DefaultOrder, direction))
    }

    #[test]
    fn test_direction_display_and_apply() {
        assert_eq!(SortDirection::Ascending.to_string(), "ASC");
        assert_eq!(SortDirection::Descending.to_string(), "DESC");
        assert_eq!(SortDirection::Descending.apply(Ordering::Less), Ordering::Greater);
    }

    #[test]
    fn test_sort_rows_composite_and_stable() {
        let rows = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (2, 'a')];
        let by_num = criterion(|r: &(i32, char)| r.0, SortDirection::Ascending);
        let by_char = criterion(|r: &(i32, char)| r.1, SortDirection::Descending);

        let sorted = sort_rows(rows.clone(), &[Rc::clone(&by_num)]);
        assert_eq!(sorted, vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c'), (2, 'a')]);

        let sorted = sort_rows(rows, &[by_num, by_char]);
        assert_eq!(sorted, vec![(1, 'd'), (1, 'b'), (2, 'c'), (2, 'a'), (2, 'a')]);
    }

    #[test]
    fn test_sort_rows_empty() {
        let by_self = criterion(|x: &u8| *x, SortDirection::Ascending);
        assert!(sort_rows(Vec::new(), &[by_self]).is_empty());
    }
}
