use lazyq_result::{Error, Result as LazyqResult};
use lazyq_seq::{Producer, Sequence};
use std::cell::Cell;
use std::rc::Rc;

/// Counters shared by every traversal of one [`Probe`].
#[derive(Debug, Default)]
pub struct ProbeStats {
    starts: Cell<usize>,
    pulls: Cell<usize>,
    disposes: Cell<usize>,
    ends: Cell<usize>,
}

impl ProbeStats {
    /// Traversals that ran their start hook.
    pub fn starts(&self) -> usize {
        self.starts.get()
    }

    /// Elements handed out, summed over all traversals.
    pub fn pulls(&self) -> usize {
        self.pulls.get()
    }

    pub fn disposes(&self) -> usize {
        self.disposes.get()
    }

    /// Traversals that ran to exhaustion.
    pub fn ends(&self) -> usize {
        self.ends.get()
    }

    fn bump(counter: &Cell<usize>) {
        counter.set(counter.get() + 1);
    }
}

/// A fixed list of values exposed as a [`Sequence`] that records how it is
/// driven.
///
/// ```
/// use lazyq_test_utils::Probe;
///
/// let probe = Probe::new(vec![1, 2, 3]);
/// let seq = probe.sequence().filter(|x| *x > 1);
/// assert_eq!(probe.stats().starts(), 0);
/// assert_eq!(seq.first().unwrap(), 2);
/// assert_eq!(probe.stats().pulls(), 2);
/// assert_eq!(probe.stats().disposes(), 1);
/// ```
pub struct Probe<T> {
    values: Rc<[T]>,
    stats: Rc<ProbeStats>,
    fail_at: Option<usize>,
}

impl<T: Clone + 'static> Probe<T> {
    pub fn new(values: Vec<T>) -> Self {
        Self {
            values: values.into(),
            stats: Rc::new(ProbeStats::default()),
            fail_at: None,
        }
    }

    /// Fail with [`Error::Internal`] instead of producing element `index`.
    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    pub fn stats(&self) -> Rc<ProbeStats> {
        Rc::clone(&self.stats)
    }

    /// An opaque sequence (no known length) over the probe's values.
    pub fn sequence(&self) -> Sequence<T> {
        let values = Rc::clone(&self.values);
        let stats = Rc::clone(&self.stats);
        let fail_at = self.fail_at;
        Sequence::from_producer(move || ProbeProducer {
            values: Rc::clone(&values),
            stats: Rc::clone(&stats),
            fail_at,
            pos: 0,
        })
    }
}

struct ProbeProducer<T> {
    values: Rc<[T]>,
    stats: Rc<ProbeStats>,
    fail_at: Option<usize>,
    pos: usize,
}

impl<T: Clone> Producer for ProbeProducer<T> {
    type Item = T;

    fn start(&mut self) -> LazyqResult<()> {
        ProbeStats::bump(&self.stats.starts);
        Ok(())
    }

    fn produce(&mut self) -> LazyqResult<Option<T>> {
        if self.fail_at == Some(self.pos) {
            return Err(Error::Internal(format!("probe failure at index {}", self.pos)));
        }
        let Some(value) = self.values.get(self.pos).cloned() else {
            return Ok(None);
        };
        self.pos += 1;
        ProbeStats::bump(&self.stats.pulls);
        Ok(Some(value))
    }

    fn dispose(&mut self) {
        ProbeStats::bump(&self.stats.disposes);
    }

    fn end(&mut self) {
        ProbeStats::bump(&self.stats.ends);
    }
}
