//! Property tests: relational matchers agree with the native operators at
//! the operand type's own width, and the string matchers agree with the
//! standard library predicates.

use mockmatch::{cmp, memeq, str_contains, ArgValue, RelOp, TestRun};
use proptest::prelude::*;

fn native<T: PartialOrd>(op: RelOp, actual: T, expected: T) -> bool {
    match op {
        RelOp::Eq => actual == expected,
        RelOp::Ne => actual != expected,
        RelOp::Le => actual <= expected,
        RelOp::Lt => actual < expected,
        RelOp::Ge => actual >= expected,
        RelOp::Gt => actual > expected,
    }
}

fn verdict(test: &TestRun, op: RelOp, expected: impl Into<ArgValue>, actual: impl Into<ArgValue>) -> bool {
    let matcher = cmp(test, op, expected).expect("construction");
    let mut stream = test.stream();
    matcher.matches(&mut stream, &actual.into())
}

macro_rules! relational_agrees {
    ($name:ident, $ty:ty) => {
        proptest! {
            #[test]
            fn $name(actual: $ty, expected: $ty) {
                let test = TestRun::new();
                for &op in RelOp::all() {
                    prop_assert_eq!(
                        verdict(&test, op, expected, actual),
                        native(op, actual, expected),
                        "{} {} {}", actual, op, expected
                    );
                }
            }
        }
    };
}

relational_agrees!(i8_agrees_with_native, i8);
relational_agrees!(i64_agrees_with_native, i64);
relational_agrees!(u8_agrees_with_native, u8);
relational_agrees!(u64_agrees_with_native, u64);
relational_agrees!(char_agrees_with_native, char);

proptest! {
    #[test]
    fn memeq_iff_byte_identical(a in proptest::collection::vec(any::<u8>(), 0..32),
                                b in proptest::collection::vec(any::<u8>(), 0..32)) {
        let test = TestRun::new();
        let matcher = memeq(&test, a.clone()).expect("construction");
        let mut stream = test.stream();
        let verdict = matcher.matches(&mut stream, &b.clone().into());
        prop_assert_eq!(verdict, a == b);
    }

    #[test]
    fn memeq_trace_has_full_dump(a in proptest::collection::vec(any::<u8>(), 0..16),
                                 b in proptest::collection::vec(any::<u8>(), 0..16)) {
        let test = TestRun::new();
        let matcher = memeq(&test, a.clone()).expect("construction");
        let mut stream = test.stream();
        matcher.matches(&mut stream, &b.clone().into());
        // One "xx, " pair per byte on each side, regardless of outcome.
        let pairs = stream.contents().matches(", ").count();
        prop_assert_eq!(pairs, a.len() + b.len());
    }

    #[test]
    fn str_contains_agrees_with_std(needle in "[a-c]{0,3}", haystack in "[a-c]{0,8}") {
        let test = TestRun::new();
        let matcher = str_contains(&test, needle.clone()).expect("construction");
        let mut stream = test.stream();
        let verdict = matcher.matches(&mut stream, &haystack.clone().into());
        prop_assert_eq!(verdict, haystack.contains(&needle));
    }
}
