//! Field-wise matching of composite values.
//!
//! A composite is matched through a caller-supplied schema: an ordered list
//! of [`FieldEntry`] values, each pairing a label with an extractor closure
//! and a child matcher. [`FieldEntry::named`] covers the common case of
//! pulling a field out of a [`StructValue`](crate::StructValue) by name;
//! [`FieldEntry::with`] accepts an arbitrary extractor for anything else.

use std::fmt;
use std::mem;
use std::rc::Rc;

use crate::error::Result;
use crate::matchers::{ArgMatcher, Matcher};
use crate::test_run::{DiagStream, TestRun};
use crate::value::ArgValue;

/// Extractor closure: pulls one field out of a composite actual value.
///
/// Returning `None` means the field could not be extracted, which the
/// struct matcher counts as a mismatch.
pub type FieldExtract = Rc<dyn Fn(&ArgValue) -> Option<ArgValue>>;

/// One field of a composite schema: a label, an extractor, and the child
/// matcher applied to the extracted value.
#[derive(Clone)]
pub struct FieldEntry {
    label: String,
    extract: FieldExtract,
    matcher: Matcher,
}

impl FieldEntry {
    /// Entry that extracts a [`StructValue`](crate::StructValue) field by
    /// name.
    pub fn named(name: impl Into<String>, matcher: Matcher) -> Self {
        let name = name.into();
        let key = name.clone();
        Self {
            label: name,
            extract: Rc::new(move |actual| actual.field(&key).cloned()),
            matcher,
        }
    }

    /// Entry with a caller-supplied extractor.
    pub fn with(
        label: impl Into<String>,
        extract: impl Fn(&ArgValue) -> Option<ArgValue> + 'static,
        matcher: Matcher,
    ) -> Self {
        Self {
            label: label.into(),
            extract: Rc::new(extract),
            matcher,
        }
    }

    /// The entry's label, used when the extraction itself fails.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for FieldEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldEntry")
            .field("label", &self.label)
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct StructMatcher {
    type_name: String,
    entries: Vec<FieldEntry>,
}

impl ArgMatcher for StructMatcher {
    fn matches(&self, stream: &mut DiagStream<'_>, actual: &ArgValue) -> bool {
        let mut matches = true;

        stream.add(format!("struct {} {{ ", self.type_name));
        for entry in &self.entries {
            // Every field is attempted and traced even after a mismatch,
            // so the trace always carries the full structural diff.
            let field_ok = match (entry.extract)(actual) {
                Some(value) => entry.matcher.matches(stream, &value),
                None => {
                    stream.add(format!("{}: <missing>", entry.label));
                    false
                }
            };
            matches = matches && field_ok;
            stream.add(", ");
        }
        stream.add("}");

        matches
    }
}

/// Matches a composite field-by-field; the verdict is the AND of every
/// entry's verdict, with no short-circuit.
pub fn struct_cmp(
    test: &TestRun,
    type_name: impl Into<String>,
    entries: Vec<FieldEntry>,
) -> Result<Matcher> {
    test.charge(entries.len() * mem::size_of::<FieldEntry>())?;
    Matcher::custom(
        test,
        StructMatcher {
            type_name: type_name.into(),
            entries,
        },
    )
}

/// Convenience builder for the recurring two-field `va_format` composite:
/// a format string (`fmt`) and its argument list (`va`).
pub fn va_format_cmp(test: &TestRun, fmt_matcher: Matcher, va_matcher: Matcher) -> Result<Matcher> {
    struct_cmp(
        test,
        "va_format",
        vec![
            FieldEntry::named("fmt", fmt_matcher),
            FieldEntry::named("va", va_matcher),
        ],
    )
}
