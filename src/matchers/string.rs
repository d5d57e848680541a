//! String matchers: equality, substring containment, and pattern match.

use regex::Regex;

use crate::error::Result;
use crate::matchers::{ArgMatcher, Matcher};
use crate::test_run::{DiagStream, TestRun};
use crate::value::ArgValue;

#[derive(Debug)]
struct StrEqMatcher {
    expected: String,
}

impl ArgMatcher for StrEqMatcher {
    fn matches(&self, stream: &mut DiagStream<'_>, actual: &ArgValue) -> bool {
        let matches = actual.as_str() == Some(self.expected.as_str());
        if matches {
            stream.add(format!("{} == {}", actual, self.expected));
        } else {
            stream.add(format!("{} != {}", actual, self.expected));
        }
        matches
    }
}

/// Matches when the actual string equals `expected` exactly.
pub fn streq(test: &TestRun, expected: impl Into<String>) -> Result<Matcher> {
    let expected = expected.into();
    test.charge(expected.len())?;
    Matcher::custom(test, StrEqMatcher { expected })
}

#[derive(Debug)]
struct StrContainsMatcher {
    needle: String,
}

impl ArgMatcher for StrContainsMatcher {
    fn matches(&self, stream: &mut DiagStream<'_>, actual: &ArgValue) -> bool {
        let matches = actual
            .as_str()
            .is_some_and(|haystack| haystack.contains(&self.needle));
        if matches {
            stream.add(format!("'{}' found in '{}'", self.needle, actual));
        } else {
            stream.add(format!("'{}' not found in '{}'", self.needle, actual));
        }
        matches
    }
}

/// Matches when `needle` occurs anywhere within the actual string.
///
/// An empty needle matches every string.
pub fn str_contains(test: &TestRun, needle: impl Into<String>) -> Result<Matcher> {
    let needle = needle.into();
    test.charge(needle.len())?;
    Matcher::custom(test, StrContainsMatcher { needle })
}

#[derive(Debug)]
struct StrPatternMatcher {
    pattern: Regex,
}

impl ArgMatcher for StrPatternMatcher {
    fn matches(&self, stream: &mut DiagStream<'_>, actual: &ArgValue) -> bool {
        let matches = actual
            .as_str()
            .is_some_and(|haystack| self.pattern.is_match(haystack));
        if matches {
            stream.add(format!("'{}' matches '{}'", self.pattern, actual));
        } else {
            stream.add(format!("'{}' does not match '{}'", self.pattern, actual));
        }
        matches
    }
}

/// Matches when the regex `pattern` matches anywhere in the actual string.
///
/// The pattern is compiled at construction; an invalid pattern is a
/// constructor error, not a silent mismatch.
pub fn str_matches(test: &TestRun, pattern: &str) -> Result<Matcher> {
    let pattern = Regex::new(pattern)?;
    test.charge(pattern.as_str().len())?;
    Matcher::custom(test, StrPatternMatcher { pattern })
}
