//! Formatters: rendering values into the diagnostic stream.
//!
//! A formatter narrates a value's structure without judging it. The value
//! formatter renders any [`ArgValue`] with its display form; the struct
//! formatter walks the same field schema the struct matcher uses, rendering
//! each field with a child formatter.

use std::fmt;
use std::mem;
use std::rc::Rc;

use crate::error::Result;
use crate::matchers::FieldExtract;
use crate::test_run::{DiagStream, TestRun};
use crate::value::ArgValue;

/// Behavior of a formatter. Purely diagnostic; no verdict, no failure mode.
pub trait ArgFormatter: fmt::Debug {
    /// Render `value` into `stream`.
    fn format(&self, stream: &mut DiagStream<'_>, value: &ArgValue);
}

/// A shareable handle to a formatter.
#[derive(Clone)]
pub struct Formatter(Rc<dyn ArgFormatter>);

impl Formatter {
    /// Wrap a user-implemented formatter, charging its storage to the run.
    pub fn custom<F: ArgFormatter + 'static>(test: &TestRun, formatter: F) -> Result<Self> {
        test.charge(mem::size_of::<F>())?;
        Ok(Self(Rc::new(formatter)))
    }

    fn from_rc(formatter: Rc<dyn ArgFormatter>) -> Self {
        Self(formatter)
    }

    /// Render a value into the stream.
    pub fn format(&self, stream: &mut DiagStream<'_>, value: &ArgValue) {
        self.0.format(stream, value)
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug)]
struct ValueFormatter;

impl ArgFormatter for ValueFormatter {
    fn format(&self, stream: &mut DiagStream<'_>, value: &ArgValue) {
        stream.add(value.to_string());
    }
}

/// The primitive formatter: renders any value with its display form
/// (integers decimal, pointers hex, byte buffers as hex pairs).
///
/// Like the wildcard matcher, it is one shared stateless instance per
/// thread and never charges a test arena.
pub fn value_formatter() -> Formatter {
    thread_local! {
        static VALUE: Formatter = Formatter::from_rc(Rc::new(ValueFormatter));
    }
    VALUE.with(Formatter::clone)
}

/// One field of a struct-formatter schema.
#[derive(Clone)]
pub struct FormatEntry {
    label: String,
    extract: FieldExtract,
    formatter: Formatter,
}

impl FormatEntry {
    /// Entry that extracts a [`StructValue`](crate::StructValue) field by
    /// name.
    pub fn named(name: impl Into<String>, formatter: Formatter) -> Self {
        let name = name.into();
        let key = name.clone();
        Self {
            label: name,
            extract: Rc::new(move |value| value.field(&key).cloned()),
            formatter,
        }
    }

    /// Entry with a caller-supplied extractor.
    pub fn with(
        label: impl Into<String>,
        extract: impl Fn(&ArgValue) -> Option<ArgValue> + 'static,
        formatter: Formatter,
    ) -> Self {
        Self {
            label: label.into(),
            extract: Rc::new(extract),
            formatter,
        }
    }
}

impl fmt::Debug for FormatEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatEntry")
            .field("label", &self.label)
            .field("formatter", &self.formatter)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct StructFormatter {
    type_name: String,
    entries: Vec<FormatEntry>,
}

impl ArgFormatter for StructFormatter {
    fn format(&self, stream: &mut DiagStream<'_>, value: &ArgValue) {
        stream.add(format!("{} {{ ", self.type_name));
        for entry in &self.entries {
            match (entry.extract)(value) {
                Some(field) => entry.formatter.format(stream, &field),
                None => stream.add(format!("{}: <missing>", entry.label)),
            }
            stream.add(", ");
        }
        stream.add("}");
    }
}

/// Renders a composite field-by-field as `<type_name> { field1, field2, }`.
pub fn struct_formatter(
    test: &TestRun,
    type_name: impl Into<String>,
    entries: Vec<FormatEntry>,
) -> Result<Formatter> {
    test.charge(entries.len() * mem::size_of::<FormatEntry>())?;
    Formatter::custom(
        test,
        StructFormatter {
            type_name: type_name.into(),
            entries,
        },
    )
}
