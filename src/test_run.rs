//! Test-scoped allocation and the diagnostic stream.
//!
//! A [`TestRun`] stands in for the enclosing test framework's scoped
//! allocator: every matcher, formatter, capturer, and action charges its
//! storage against the run's byte budget at construction time, and the whole
//! run is released at once when the `TestRun` and its handles drop. A
//! [`DiagStream`] is the append-only sink matchers narrate comparisons into;
//! it carries a reference to its owning run so capture functions can
//! allocate through it at match time.

use std::cell::Cell;

use crate::error::{Error, Result};

/// A test-scoped allocator.
///
/// `TestRun::new()` gives an unlimited budget; [`TestRun::with_budget`] caps
/// it, which is how tests exercise the allocation-failure paths. Exhaustion
/// surfaces as [`Error::ArenaExhausted`] from whichever constructor hit the
/// cap, never as a partially built object.
///
/// # Example
///
/// ```rust
/// use mockmatch::{eq, TestRun};
///
/// let test = TestRun::new();
/// let matcher = eq(&test, 42i32).unwrap();
///
/// let mut stream = test.stream();
/// assert!(matcher.matches(&mut stream, &42i32.into()));
/// assert_eq!(stream.contents(), "42 == 42");
/// ```
#[derive(Debug)]
pub struct TestRun {
    budget: Option<usize>,
    used: Cell<usize>,
}

impl TestRun {
    /// Create a run with an unlimited allocation budget.
    pub fn new() -> Self {
        Self {
            budget: None,
            used: Cell::new(0),
        }
    }

    /// Create a run that refuses allocations beyond `bytes` total.
    pub fn with_budget(bytes: usize) -> Self {
        Self {
            budget: Some(bytes),
            used: Cell::new(0),
        }
    }

    /// Bytes charged so far.
    pub fn bytes_used(&self) -> usize {
        self.used.get()
    }

    /// Open a fresh diagnostic stream owned by this run.
    pub fn stream(&self) -> DiagStream<'_> {
        DiagStream::new(self)
    }

    /// Charge an allocation against the budget.
    ///
    /// Public so user-supplied capture functions and custom matchers can
    /// account their own storage the same way the built-ins do.
    pub fn charge(&self, bytes: usize) -> Result<()> {
        let used = self.used.get();
        if let Some(limit) = self.budget {
            let remaining = limit.saturating_sub(used);
            if bytes > remaining {
                return Err(Error::ArenaExhausted {
                    requested: bytes,
                    remaining,
                });
            }
        }
        self.used.set(used + bytes);
        Ok(())
    }
}

impl Default for TestRun {
    fn default() -> Self {
        Self::new()
    }
}

/// Append-only text sink for match traces.
///
/// Matchers and formatters write human-readable comparison narration here.
/// The stream never fails and never truncates; the surrounding test engine
/// decides what to do with the accumulated text.
#[derive(Debug)]
pub struct DiagStream<'t> {
    test: &'t TestRun,
    buf: String,
}

impl<'t> DiagStream<'t> {
    /// Create a stream owned by the given run.
    pub fn new(test: &'t TestRun) -> Self {
        Self {
            test,
            buf: String::new(),
        }
    }

    /// Append text to the stream.
    pub fn add(&mut self, text: impl AsRef<str>) {
        self.buf.push_str(text.as_ref());
    }

    /// The run that owns this stream.
    pub fn test(&self) -> &'t TestRun {
        self.test
    }

    /// Everything written so far.
    pub fn contents(&self) -> &str {
        &self.buf
    }

    /// True when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Discard the accumulated text, keeping the stream usable.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_budget_accepts_everything() {
        let test = TestRun::new();
        assert!(test.charge(usize::MAX / 2).is_ok());
        assert_eq!(test.bytes_used(), usize::MAX / 2);
    }

    #[test]
    fn test_budget_exhaustion() {
        let test = TestRun::with_budget(8);
        assert!(test.charge(8).is_ok());
        let err = test.charge(1).unwrap_err();
        match err {
            Error::ArenaExhausted {
                requested,
                remaining,
            } => {
                assert_eq!(requested, 1);
                assert_eq!(remaining, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_partial_budget_reports_remaining() {
        let test = TestRun::with_budget(10);
        test.charge(4).unwrap();
        match test.charge(100).unwrap_err() {
            Error::ArenaExhausted {
                requested,
                remaining,
            } => {
                assert_eq!(requested, 100);
                assert_eq!(remaining, 6);
            }
            other => panic!("unexpected error: {other}"),
        }
        // A failed charge leaves the ledger untouched.
        assert_eq!(test.bytes_used(), 4);
    }

    #[test]
    fn test_stream_accumulates() {
        let test = TestRun::new();
        let mut stream = test.stream();
        assert!(stream.is_empty());
        stream.add("1 == 1");
        stream.add(", ");
        stream.add(format!("{} != {}", 2, 3));
        assert_eq!(stream.contents(), "1 == 1, 2 != 3");
        stream.clear();
        assert!(stream.is_empty());
    }
}
