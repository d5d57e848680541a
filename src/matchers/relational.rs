//! Relational matchers and the wildcard.
//!
//! One comparison engine covers every primitive kind × operator pairing:
//! the expected value is erased into an [`ArgValue`] at construction, and
//! match-time comparison happens at the kind's native width via
//! [`ArgValue::compare`]. The per-type constructor families collapse into
//! six generic functions.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::matchers::{ArgMatcher, Matcher};
use crate::test_run::{DiagStream, TestRun};
use crate::value::ArgValue;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The six relational operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RelOp {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<=`
    Le,
    /// `<`
    Lt,
    /// `>=`
    Ge,
    /// `>`
    Gt,
}

impl RelOp {
    /// The operator's literal token, as rendered in traces.
    pub fn token(self) -> &'static str {
        match self {
            RelOp::Eq => "==",
            RelOp::Ne => "!=",
            RelOp::Le => "<=",
            RelOp::Lt => "<",
            RelOp::Ge => ">=",
            RelOp::Gt => ">",
        }
    }

    /// All six operators, in trace order.
    pub fn all() -> &'static [RelOp] {
        &[RelOp::Eq, RelOp::Ne, RelOp::Le, RelOp::Lt, RelOp::Ge, RelOp::Gt]
    }

    // Unordered (cross-kind) operands are not equal, so only `!=` holds.
    fn holds(self, ord: Option<Ordering>) -> bool {
        match (self, ord) {
            (RelOp::Ne, None) => true,
            (_, None) => false,
            (RelOp::Eq, Some(o)) => o == Ordering::Equal,
            (RelOp::Ne, Some(o)) => o != Ordering::Equal,
            (RelOp::Le, Some(o)) => o != Ordering::Greater,
            (RelOp::Lt, Some(o)) => o == Ordering::Less,
            (RelOp::Ge, Some(o)) => o != Ordering::Less,
            (RelOp::Gt, Some(o)) => o == Ordering::Greater,
        }
    }
}

impl fmt::Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug)]
struct RelMatcher {
    op: RelOp,
    expected: ArgValue,
}

impl ArgMatcher for RelMatcher {
    fn matches(&self, stream: &mut DiagStream<'_>, actual: &ArgValue) -> bool {
        let holds = self.op.holds(actual.compare(&self.expected));
        if holds {
            stream.add(format!("{} {} {}", actual, self.op, self.expected));
        } else {
            stream.add(format!("{} not {} {}", actual, self.op, self.expected));
        }
        holds
    }
}

/// Build a matcher for an arbitrary operator.
///
/// The typed constructor families ([`eq`], [`ne`], [`le`], [`lt`], [`ge`],
/// [`gt`]) all funnel through here.
pub fn cmp(test: &TestRun, op: RelOp, expected: impl Into<ArgValue>) -> Result<Matcher> {
    Matcher::custom(
        test,
        RelMatcher {
            op,
            expected: expected.into(),
        },
    )
}

/// Matches when the actual value equals `expected`.
pub fn eq(test: &TestRun, expected: impl Into<ArgValue>) -> Result<Matcher> {
    cmp(test, RelOp::Eq, expected)
}

/// Matches when the actual value differs from `expected`.
pub fn ne(test: &TestRun, expected: impl Into<ArgValue>) -> Result<Matcher> {
    cmp(test, RelOp::Ne, expected)
}

/// Matches when the actual value is at most `expected`.
pub fn le(test: &TestRun, expected: impl Into<ArgValue>) -> Result<Matcher> {
    cmp(test, RelOp::Le, expected)
}

/// Matches when the actual value is below `expected`.
pub fn lt(test: &TestRun, expected: impl Into<ArgValue>) -> Result<Matcher> {
    cmp(test, RelOp::Lt, expected)
}

/// Matches when the actual value is at least `expected`.
pub fn ge(test: &TestRun, expected: impl Into<ArgValue>) -> Result<Matcher> {
    cmp(test, RelOp::Ge, expected)
}

/// Matches when the actual value is above `expected`.
pub fn gt(test: &TestRun, expected: impl Into<ArgValue>) -> Result<Matcher> {
    cmp(test, RelOp::Gt, expected)
}

#[derive(Debug)]
struct AnyMatcher;

impl ArgMatcher for AnyMatcher {
    fn matches(&self, stream: &mut DiagStream<'_>, _actual: &ArgValue) -> bool {
        stream.add("don't care");
        true
    }
}

/// The wildcard matcher: accepts any value and traces `don't care`.
///
/// One stateless instance is shared per thread; calling this clones a
/// cached handle and never charges a test arena.
pub fn any() -> Matcher {
    thread_local! {
        static ANY: Matcher = Matcher::from_rc(Rc::new(AnyMatcher));
    }
    ANY.with(Matcher::clone)
}
