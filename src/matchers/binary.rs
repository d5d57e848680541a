//! Byte-buffer equality matching.

use crate::error::Result;
use crate::matchers::{ArgMatcher, Matcher};
use crate::test_run::{DiagStream, TestRun};
use crate::value::ArgValue;

#[derive(Debug)]
struct MemEqMatcher {
    expected: Vec<u8>,
}

impl ArgMatcher for MemEqMatcher {
    fn matches(&self, stream: &mut DiagStream<'_>, actual: &ArgValue) -> bool {
        let actual_bytes = actual.as_bytes().unwrap_or(&[]);
        let matches = actual_bytes == self.expected.as_slice();

        // Both sides are dumped in full whether or not they match, so a
        // failing trace always shows the complete structural diff.
        for b in actual_bytes {
            stream.add(format!("{:02x}, ", b));
        }
        stream.add(if matches { "== " } else { "!= " });
        for b in &self.expected {
            stream.add(format!("{:02x}, ", b));
        }

        matches
    }
}

/// Matches when the actual buffer is byte-for-byte equal to `expected`.
///
/// The trace renders every actual byte as a two-digit hex pair, an equality
/// marker, then every expected byte, on success and failure alike.
pub fn memeq(test: &TestRun, expected: impl Into<Vec<u8>>) -> Result<Matcher> {
    let expected = expected.into();
    test.charge(expected.len())?;
    Matcher::custom(test, MemEqMatcher { expected })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(matcher: &Matcher, actual: impl Into<ArgValue>) -> (bool, String) {
        let test = TestRun::new();
        let mut stream = test.stream();
        let verdict = matcher.matches(&mut stream, &actual.into());
        (verdict, stream.contents().to_string())
    }

    #[test]
    fn test_equal_buffers_match() {
        let test = TestRun::new();
        let matcher = memeq(&test, vec![0x01u8, 0x02]).unwrap();
        let (ok, trace) = run(&matcher, vec![0x01u8, 0x02]);
        assert!(ok);
        assert_eq!(trace, "01, 02, == 01, 02, ");
    }

    #[test]
    fn test_unequal_buffers_dump_both_sides() {
        let test = TestRun::new();
        let matcher = memeq(&test, vec![0x01u8, 0x02]).unwrap();
        let (ok, trace) = run(&matcher, vec![0x01u8, 0x03]);
        assert!(!ok);
        assert_eq!(trace, "01, 03, != 01, 02, ");
    }

    #[test]
    fn test_trace_always_has_full_hex_dump() {
        let test = TestRun::new();
        let expected = vec![0xdeu8, 0xad, 0xbe, 0xef];
        let matcher = memeq(&test, expected.clone()).unwrap();

        for actual in [expected.clone(), vec![0x00u8, 0x00, 0x00, 0x00]] {
            let (_, trace) = run(&matcher, actual.clone());
            let pairs = trace.matches(", ").count();
            // Four pairs from each side, each followed by ", ".
            assert_eq!(pairs, 8, "trace: {trace}");
        }
    }

    #[test]
    fn test_length_mismatch_is_unequal() {
        let test = TestRun::new();
        let matcher = memeq(&test, vec![0x01u8, 0x02]).unwrap();
        let (ok, _) = run(&matcher, vec![0x01u8]);
        assert!(!ok);
    }

    #[test]
    fn test_string_actual_compares_its_bytes() {
        let test = TestRun::new();
        let matcher = memeq(&test, b"ok".to_vec()).unwrap();
        let (ok, _) = run(&matcher, "ok");
        assert!(ok);
    }

    #[test]
    fn test_non_buffer_actual_never_matches() {
        let test = TestRun::new();
        let matcher = memeq(&test, vec![0x01u8]).unwrap();
        let (ok, trace) = run(&matcher, 1i32);
        assert!(!ok);
        assert_eq!(trace, "!= 01, ");
    }

    #[test]
    fn test_construction_charges_the_buffer() {
        let test = TestRun::with_budget(1);
        assert!(memeq(&test, vec![0u8; 64]).is_err());
    }
}
