//! Capturing matched arguments for later inspection.
//!
//! A [`Capturer`] decorates a child matcher: the verdict and trace come
//! entirely from the child, and when (and only when) the child matches, a
//! capture function snapshots the actual value into the capturer's slot.
//! Only the most recent capture survives; there is no accumulation across
//! calls.
//!
//! Capture success is deliberately independent of match success: if the
//! capture function cannot allocate its storage, the slot is left empty
//! even though `matches` reported true. Callers must read an empty slot as
//! "capture storage failed", not "the argument never matched".

use std::cell::RefCell;
use std::fmt;
use std::mem;
use std::rc::Rc;

use crate::error::Result;
use crate::matchers::{ArgMatcher, Matcher};
use crate::test_run::{DiagStream, TestRun};
use crate::value::ArgValue;

/// Capture function: snapshots an actual value into test-owned storage.
///
/// Returns `None` when the snapshot could not be allocated.
pub type CaptureFn = Rc<dyn Fn(&TestRun, &ArgValue) -> Option<ArgValue>>;

/// A matcher decorator that records the matched value.
///
/// # Example
///
/// ```rust
/// use mockmatch::{any, int_capturer_create, TestRun};
///
/// let test = TestRun::new();
/// let capturer = int_capturer_create(&test, any()).unwrap();
///
/// let mut stream = test.stream();
/// assert!(capturer.matcher().matches(&mut stream, &42i32.into()));
/// assert_eq!(capturer.captured(), Some(42i32.into()));
/// ```
pub struct Capturer {
    child: Matcher,
    capture: CaptureFn,
    slot: RefCell<Option<ArgValue>>,
}

impl Capturer {
    /// The most recently captured value, if any.
    pub fn captured(&self) -> Option<ArgValue> {
        self.slot.borrow().clone()
    }

    /// A matcher handle sharing this capturer.
    pub fn matcher(self: &Rc<Self>) -> Matcher {
        Matcher::from_rc(Rc::clone(self) as Rc<dyn ArgMatcher>)
    }
}

impl ArgMatcher for Capturer {
    fn matches(&self, stream: &mut DiagStream<'_>, actual: &ArgValue) -> bool {
        let matches = self.child.matches(stream, actual);
        if matches {
            // Overwrites unconditionally, including with None on a failed
            // capture allocation.
            *self.slot.borrow_mut() = (self.capture)(stream.test(), actual);
        }
        matches
    }
}

impl fmt::Debug for Capturer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capturer")
            .field("child", &self.child)
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

/// Create a capturer around `child` with a caller-supplied capture function.
pub fn param_capturer_create(
    test: &TestRun,
    child: Matcher,
    capture: impl Fn(&TestRun, &ArgValue) -> Option<ArgValue> + 'static,
) -> Result<Rc<Capturer>> {
    test.charge(mem::size_of::<Capturer>())?;
    Ok(Rc::new(Capturer {
        child,
        capture: Rc::new(capture),
        slot: RefCell::new(None),
    }))
}

fn capture_by_value(test: &TestRun, value: &ArgValue) -> Option<ArgValue> {
    test.charge(value.byte_len()).ok()?;
    Some(value.clone())
}

/// Capturer that records integer arguments by value.
pub fn int_capturer_create(test: &TestRun, child: Matcher) -> Result<Rc<Capturer>> {
    param_capturer_create(test, child, |test, value| {
        if !value.is_int() {
            return None;
        }
        capture_by_value(test, value)
    })
}

/// Capturer that records pointer arguments by value.
pub fn ptr_capturer_create(test: &TestRun, child: Matcher) -> Result<Rc<Capturer>> {
    param_capturer_create(test, child, |test, value| {
        if !matches!(value, ArgValue::Ptr(_)) {
            return None;
        }
        capture_by_value(test, value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::{any, eq, ge};

    #[test]
    fn test_capture_on_match() {
        let test = TestRun::new();
        let capturer = int_capturer_create(&test, eq(&test, 42i32).unwrap()).unwrap();
        let matcher = capturer.matcher();

        let mut stream = test.stream();
        assert!(matcher.matches(&mut stream, &42i32.into()));
        assert_eq!(capturer.captured(), Some(ArgValue::I32(42)));
        // The trace is the child's trace, untouched by the decorator.
        assert_eq!(stream.contents(), "42 == 42");
    }

    #[test]
    fn test_no_capture_on_mismatch() {
        let test = TestRun::new();
        let capturer = int_capturer_create(&test, eq(&test, 42i32).unwrap()).unwrap();
        let matcher = capturer.matcher();

        let mut stream = test.stream();
        assert!(!matcher.matches(&mut stream, &7i32.into()));
        assert_eq!(capturer.captured(), None);
    }

    #[test]
    fn test_only_latest_capture_survives() {
        let test = TestRun::new();
        let capturer = int_capturer_create(&test, ge(&test, 0i32).unwrap()).unwrap();
        let matcher = capturer.matcher();

        let mut stream = test.stream();
        assert!(matcher.matches(&mut stream, &1i32.into()));
        assert!(matcher.matches(&mut stream, &2i32.into()));
        assert_eq!(capturer.captured(), Some(ArgValue::I32(2)));

        // A later mismatch leaves the previous capture in place.
        assert!(!matcher.matches(&mut stream, &(-1i32).into()));
        assert_eq!(capturer.captured(), Some(ArgValue::I32(2)));
    }

    #[test]
    fn test_failed_capture_allocation_leaves_slot_empty() {
        // Budget covers the matcher and capturer, but not the captured
        // value itself.
        let test = TestRun::new();
        let _probe = eq(&test, 42i64).unwrap();
        let used = test.bytes_used();

        let test2 = TestRun::with_budget(used + mem::size_of::<Capturer>());
        let child = eq(&test2, 42i64).unwrap();
        let capturer = int_capturer_create(&test2, child).unwrap();
        let matcher = capturer.matcher();

        let mut stream = test2.stream();
        // The match still succeeds; only the capture is lost.
        assert!(matcher.matches(&mut stream, &42i64.into()));
        assert_eq!(capturer.captured(), None);
    }

    #[test]
    fn test_ptr_capturer() {
        let test = TestRun::new();
        let capturer = ptr_capturer_create(&test, any()).unwrap();
        let matcher = capturer.matcher();

        let mut stream = test.stream();
        assert!(matcher.matches(&mut stream, &ArgValue::ptr(0xbeef)));
        assert_eq!(capturer.captured(), Some(ArgValue::Ptr(0xbeef)));
    }

    #[test]
    fn test_kind_checked_capture() {
        let test = TestRun::new();
        let capturer = int_capturer_create(&test, any()).unwrap();
        let matcher = capturer.matcher();

        let mut stream = test.stream();
        // The wildcard matches a string, but the integer capture declines it.
        assert!(matcher.matches(&mut stream, &"hi".into()));
        assert_eq!(capturer.captured(), None);
    }

    #[test]
    fn test_custom_capture_function() {
        let test = TestRun::new();
        let capturer = param_capturer_create(&test, any(), |_, value| {
            Some(ArgValue::U64(value.byte_len() as u64))
        })
        .unwrap();
        let matcher = capturer.matcher();

        let mut stream = test.stream();
        assert!(matcher.matches(&mut stream, &"abcd".into()));
        assert_eq!(capturer.captured(), Some(ArgValue::U64(4)));
    }
}
