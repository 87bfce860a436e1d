//! The enumerator state machine every traversal runs on.
//!
//! A [`Cursor`] wraps a [`Producer`] (the pluggable hooks) and enforces the
//! protocol around it:
//!
//! ```text
//!            advance                 produce -> None
//!  Create ───────────► Next ───────────────────────────► End
//!   (start hook once)   │  ▲ produce -> Some                (dispose, then end hook)
//!                       └──┘
//!                       │ start/produce -> Err
//!                       └─────────────────────────────► Error
//!                                                           (dispose)
//! ```
//!
//! Once in `End` or `Error`, advancing returns `Ok(None)` without touching the
//! producer again. Disposal runs at most once, whether triggered by exhaustion,
//! a fault, an explicit [`Cursor::dispose`], or the cursor being dropped mid-way
//! (early `break`, `?` propagation, or a panic unwinding through a user
//! closure).

use lazyq_result::{Error, Result as LazyqResult};
use std::fmt;
use std::iter::FusedIterator;

/// The hooks a cursor drives.
///
/// Producers hold whatever a traversal needs as owned fields: an upstream
/// cursor, a running index, a buffered snapshot. Nothing should be opened in
/// the constructor; acquire resources in [`start`](Producer::start) and release
/// them in [`dispose`](Producer::dispose).
pub trait Producer {
    type Item;

    /// Called once, on the first advance.
    fn start(&mut self) -> LazyqResult<()> {
        Ok(())
    }

    /// Produce the next value, or `None` when exhausted.
    fn produce(&mut self) -> LazyqResult<Option<Self::Item>>;

    /// Release captured resources. The cursor guarantees a single call.
    fn dispose(&mut self) {}

    /// Called after `dispose` when the producer reported exhaustion.
    fn end(&mut self) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CursorState {
    /// Constructed; `start` has not run.
    Create,
    /// Started; values are being produced.
    Next,
    /// Exhausted normally.
    End,
    /// A hook returned an error.
    Error,
}

impl fmt::Display for CursorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CursorState::Create => write!(f, "CREATE"),
            CursorState::Next => write!(f, "NEXT"),
            CursorState::End => write!(f, "END"),
            CursorState::Error => write!(f, "ERROR"),
        }
    }
}

/// A single traversal over a sequence.
///
/// Two ways to consume it:
/// - the protocol form, [`move_next`](Cursor::move_next) followed by
///   [`current`](Cursor::current);
/// - the std form: `Cursor<T>` is an [`Iterator`] over `Result<T>`, fused after
///   the first `None` or `Err`. Values taken through `Iterator::next` are moved
///   out, so `current` reports no value afterwards.
pub struct Cursor<T> {
    producer: Box<dyn Producer<Item = T>>,
    state: CursorState,
    current: Option<T>,
    disposed: bool,
}

impl<T> Cursor<T> {
    pub fn new<P>(producer: P) -> Self
    where
        P: Producer<Item = T> + 'static,
    {
        Self {
            producer: Box::new(producer),
            state: CursorState::Create,
            current: None,
            disposed: false,
        }
    }

    #[inline]
    pub fn state(&self) -> CursorState {
        self.state
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Drive the state machine one step and hand back the produced value.
    ///
    /// This is the primitive operators use to pull from their upstream.
    pub fn advance(&mut self) -> LazyqResult<Option<T>> {
        match self.state {
            CursorState::End | CursorState::Error => return Ok(None),
            CursorState::Create => {
                tracing::trace!("cursor start");
                self.state = CursorState::Next;
                if let Err(err) = self.producer.start() {
                    return Err(self.fault(err));
                }
            }
            CursorState::Next => {}
        }

        match self.producer.produce() {
            Ok(Some(value)) => Ok(Some(value)),
            Ok(None) => {
                self.finish();
                Ok(None)
            }
            Err(err) => Err(self.fault(err)),
        }
    }

    /// Advance and keep the produced value as [`current`](Cursor::current).
    pub fn move_next(&mut self) -> LazyqResult<bool> {
        self.current = None;
        self.current = self.advance()?;
        Ok(self.current.is_some())
    }

    /// The value produced by the last successful [`move_next`](Cursor::move_next).
    pub fn current(&self) -> LazyqResult<&T> {
        match (self.state, &self.current) {
            (CursorState::Next, Some(value)) => Ok(value),
            (state, _) => Err(Error::InvalidOperation(format!(
                "cursor has no current value in state {state}"
            ))),
        }
    }

    /// Release the producer's resources. Safe to call any number of times;
    /// further advances report exhaustion.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.current = None;
        if matches!(self.state, CursorState::Create | CursorState::Next) {
            self.state = CursorState::End;
        }
        tracing::trace!(state = %self.state, "cursor dispose");
        self.producer.dispose();
    }

    fn finish(&mut self) {
        self.dispose();
        self.producer.end();
        self.state = CursorState::End;
        tracing::trace!("cursor end");
    }

    fn fault(&mut self, err: Error) -> Error {
        tracing::trace!(error = %err, "cursor faulted");
        self.state = CursorState::Error;
        self.dispose();
        // dispose() only rewrites Create/Next, so the fault state sticks.
        err
    }
}

impl<T> Drop for Cursor<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<T> Iterator for Cursor<T> {
    type Item = LazyqResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.current = None;
        self.advance().transpose()
    }
}

impl<T> FusedIterator for Cursor<T> {}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("state", &self.state)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}
