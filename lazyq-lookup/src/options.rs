use std::fmt;

/// What a lookup does with keys its comparer reports as null.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum NullKeyPolicy {
    /// Collect every null-keyed element into one null-key group.
    #[default]
    Group,
    /// Drop null-keyed elements. Joins use this so null keys never match.
    Skip,
}

impl fmt::Display for NullKeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NullKeyPolicy::Group => write!(f, "GROUP"),
            NullKeyPolicy::Skip => write!(f, "SKIP"),
        }
    }
}

/// Options controlling how a [`Lookup`](crate::Lookup) is built.
#[derive(Clone, Debug, Default)]
pub struct LookupOptions {
    pub null_keys: NullKeyPolicy,
    /// Expected number of distinct keys; only a pre-allocation hint.
    pub capacity: usize,
}

impl LookupOptions {
    /// Options for GroupBy/ToLookup: null keys form their own group.
    pub fn for_grouping() -> Self {
        Self {
            null_keys: NullKeyPolicy::Group,
            ..Default::default()
        }
    }

    /// Options for the build side of Join/GroupJoin: null keys are dropped.
    pub fn for_join() -> Self {
        Self {
            null_keys: NullKeyPolicy::Skip,
            ..Default::default()
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}
