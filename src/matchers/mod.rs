//! Argument matchers.
//!
//! A matcher tests an actual argument against an expected condition, writes
//! a trace of the comparison into the diagnostic stream, and returns a
//! verdict. Matchers are non-generic (they operate on type-erased
//! [`ArgValue`]s), so the same handle works for any argument position.
//!
//! Constructors take the owning [`TestRun`] and return `Result<Matcher>`;
//! the only failure modes are arena exhaustion and (for `str_matches`) an
//! invalid pattern.
//!
//! # Example
//!
//! ```rust
//! use mockmatch::{eq, TestRun};
//!
//! let test = TestRun::new();
//! let is_42 = eq(&test, 42i32).unwrap();
//!
//! let mut stream = test.stream();
//! assert!(!is_42.matches(&mut stream, &7i32.into()));
//! assert_eq!(stream.contents(), "7 not == 42");
//! ```

mod binary;
mod composite;
mod relational;
mod string;

pub use binary::memeq;
pub use composite::{struct_cmp, va_format_cmp, FieldEntry, FieldExtract};
pub use relational::{any, cmp, eq, ge, gt, le, lt, ne, RelOp};
pub use string::{str_contains, str_matches, streq};

use std::fmt;
use std::mem;
use std::rc::Rc;

use crate::error::Result;
use crate::test_run::{DiagStream, TestRun};
use crate::value::ArgValue;

/// Behavior of a single argument matcher.
///
/// `matches` is a pure observation plus a trace side effect: it never
/// mutates the actual value and has no failure mode.
pub trait ArgMatcher: fmt::Debug {
    /// Test `actual`, narrating the comparison into `stream`.
    fn matches(&self, stream: &mut DiagStream<'_>, actual: &ArgValue) -> bool;
}

/// A shareable handle to a matcher.
///
/// Cloning is cheap; the underlying matcher lives until the last handle
/// drops, which the test run's teardown takes care of.
#[derive(Clone)]
pub struct Matcher(Rc<dyn ArgMatcher>);

impl Matcher {
    /// Wrap a user-implemented matcher, charging its storage to the run.
    pub fn custom<M: ArgMatcher + 'static>(test: &TestRun, matcher: M) -> Result<Self> {
        test.charge(mem::size_of::<M>())?;
        Ok(Self(Rc::new(matcher)))
    }

    pub(crate) fn from_rc(matcher: Rc<dyn ArgMatcher>) -> Self {
        Self(matcher)
    }

    /// Run the matcher against an actual value.
    pub fn matches(&self, stream: &mut DiagStream<'_>, actual: &ArgValue) -> bool {
        self.0.matches(stream, actual)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
