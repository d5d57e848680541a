//! # mockmatch
//!
//! Argument matchers, capturers, and stubbed-return actions for mock-based
//! tests.
//!
//! This crate is the matching core a mocking framework builds on: matchers
//! validate the arguments of a mocked call and narrate the comparison into
//! a diagnostic stream, capturers snapshot matched arguments for later
//! assertions, and actions compute the value the mocked call should return.
//! Call dispatch itself, deciding which expectation a call hits, belongs
//! to the surrounding framework.
//!
//! Every object is built through a [`TestRun`], the test-scoped allocator:
//! constructors charge their storage against its budget and fail cleanly
//! when it is exhausted, and everything is released together when the run
//! ends.
//!
//! ## Quick Start
//!
//! ```rust
//! use mockmatch::{eq, int_capturer_create, return_value, ArgValue, TestRun};
//!
//! let test = TestRun::new();
//!
//! // A matcher narrates its comparison into the diagnostic stream.
//! let is_42 = eq(&test, 42i32).unwrap();
//! let mut stream = test.stream();
//! assert!(is_42.matches(&mut stream, &42i32.into()));
//! assert_eq!(stream.contents(), "42 == 42");
//!
//! // A capturer records the matched argument for later assertions.
//! let capturer = int_capturer_create(&test, is_42).unwrap();
//! let mut stream = test.stream();
//! capturer.matcher().matches(&mut stream, &42i32.into());
//! assert_eq!(capturer.captured(), Some(42i32.into()));
//!
//! // An action supplies the mocked call's return value.
//! let action = return_value(&test, true).unwrap();
//! assert_eq!(action.invoke(&[]), ArgValue::Bool(true));
//! ```
//!
//! ## Composite values
//!
//! Struct-shaped arguments are matched field-by-field through a caller
//! supplied schema; every field is attempted and traced even after an
//! earlier mismatch, so the trace always carries a full structural diff.
//!
//! ```rust
//! use mockmatch::{eq, streq, struct_cmp, FieldEntry, StructValue, TestRun};
//!
//! let test = TestRun::new();
//! let matcher = struct_cmp(&test, "point", vec![
//!     FieldEntry::named("x", eq(&test, 5i32).unwrap()),
//!     FieldEntry::named("label", streq(&test, "ok").unwrap()),
//! ]).unwrap();
//!
//! let actual = StructValue::new().field("x", 5i32).field("label", "ok");
//! let mut stream = test.stream();
//! assert!(matcher.matches(&mut stream, &actual.into()));
//! assert_eq!(stream.contents(), "struct point { 5 == 5, ok == ok, }");
//! ```

pub mod actions;
pub mod capture;
pub mod error;
pub mod format;
pub mod matchers;
pub mod test_run;
pub mod value;

// Values and collaborators
pub use error::{Error, Result};
pub use test_run::{DiagStream, TestRun};
pub use value::{ArgValue, StructValue};

// Matchers
pub use matchers::{
    any, cmp, eq, ge, gt, le, lt, memeq, ne, str_contains, str_matches, streq, struct_cmp,
    va_format_cmp, ArgMatcher, FieldEntry, FieldExtract, Matcher, RelOp,
};

// Capturers
pub use capture::{
    int_capturer_create, param_capturer_create, ptr_capturer_create, CaptureFn, Capturer,
};

// Actions
pub use actions::{invoke_action, return_value, Action, MockAction};

// Formatters
pub use format::{struct_formatter, value_formatter, ArgFormatter, FormatEntry, Formatter};
