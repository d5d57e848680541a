//! Type-erased argument values.
//!
//! Actual and expected arguments flow through the crate as [`ArgValue`], an
//! enum with one variant per supported primitive kind. Each variant stores
//! the native Rust type, so comparisons happen at the type's natural width:
//! an `I8` is compared as an `i8`, never widened first. Matchers stay
//! non-generic and shareable because they operate on the erased value.

use std::cmp::Ordering;
use std::fmt;
use std::mem;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A type-erased argument value.
///
/// Construct one with `From`/`Into` for the common kinds, or directly for
/// pointers and composites:
///
/// ```rust
/// use mockmatch::ArgValue;
///
/// let n: ArgValue = 42i32.into();
/// let s: ArgValue = "hello".into();
/// let p = ArgValue::ptr(0xdead_beef);
///
/// assert_eq!(n.to_string(), "42");
/// assert_eq!(p.to_string(), "0xdeadbeef");
/// # let _ = s;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ArgValue {
    /// Boolean value.
    Bool(bool),
    /// 8-bit signed integer.
    I8(i8),
    /// 16-bit signed integer.
    I16(i16),
    /// 32-bit signed integer.
    I32(i32),
    /// 64-bit signed integer.
    I64(i64),
    /// 8-bit unsigned integer.
    U8(u8),
    /// 16-bit unsigned integer.
    U16(u16),
    /// 32-bit unsigned integer.
    U32(u32),
    /// 64-bit unsigned integer.
    U64(u64),
    /// Character value.
    Char(char),
    /// Pointer value, stored as its address.
    Ptr(usize),
    /// Raw byte buffer.
    Bytes(Vec<u8>),
    /// Owned string.
    Str(String),
    /// Composite value with named fields.
    Struct(StructValue),
}

impl ArgValue {
    /// Create a pointer value from a raw address.
    pub fn ptr(addr: usize) -> Self {
        ArgValue::Ptr(addr)
    }

    /// Compare two values of the same kind at their native width.
    ///
    /// Returns `None` when the kinds differ (or for unequal composites,
    /// which have no meaningful ordering). Relational matchers treat `None`
    /// as "not equal and unordered": `!=` holds, every other operator fails.
    pub fn compare(&self, other: &ArgValue) -> Option<Ordering> {
        use ArgValue::*;
        match (self, other) {
            (Bool(a), Bool(b)) => Some(a.cmp(b)),
            (I8(a), I8(b)) => Some(a.cmp(b)),
            (I16(a), I16(b)) => Some(a.cmp(b)),
            (I32(a), I32(b)) => Some(a.cmp(b)),
            (I64(a), I64(b)) => Some(a.cmp(b)),
            (U8(a), U8(b)) => Some(a.cmp(b)),
            (U16(a), U16(b)) => Some(a.cmp(b)),
            (U32(a), U32(b)) => Some(a.cmp(b)),
            (U64(a), U64(b)) => Some(a.cmp(b)),
            (Char(a), Char(b)) => Some(a.cmp(b)),
            (Ptr(a), Ptr(b)) => Some(a.cmp(b)),
            (Bytes(a), Bytes(b)) => Some(a.cmp(b)),
            (Str(a), Str(b)) => Some(a.cmp(b)),
            (Struct(a), Struct(b)) => (a == b).then_some(Ordering::Equal),
            _ => None,
        }
    }

    /// Returns the string content for `Str` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the raw bytes for `Bytes` and `Str` values.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ArgValue::Bytes(b) => Some(b),
            ArgValue::Str(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// True for the eight integer kinds (not `Bool`, `Char`, or `Ptr`).
    pub fn is_int(&self) -> bool {
        matches!(
            self,
            ArgValue::I8(_)
                | ArgValue::I16(_)
                | ArgValue::I32(_)
                | ArgValue::I64(_)
                | ArgValue::U8(_)
                | ArgValue::U16(_)
                | ArgValue::U32(_)
                | ArgValue::U64(_)
        )
    }

    /// Look up a field of a composite value by name.
    pub fn field(&self, name: &str) -> Option<&ArgValue> {
        match self {
            ArgValue::Struct(s) => s.get(name),
            _ => None,
        }
    }

    /// The value's storage size in bytes, used when charging capture
    /// allocations against the test arena.
    pub fn byte_len(&self) -> usize {
        match self {
            ArgValue::Bool(_) | ArgValue::I8(_) | ArgValue::U8(_) => 1,
            ArgValue::I16(_) | ArgValue::U16(_) => 2,
            ArgValue::I32(_) | ArgValue::U32(_) => 4,
            ArgValue::I64(_) | ArgValue::U64(_) => 8,
            ArgValue::Char(_) => mem::size_of::<char>(),
            ArgValue::Ptr(_) => mem::size_of::<usize>(),
            ArgValue::Bytes(b) => b.len(),
            ArgValue::Str(s) => s.len(),
            ArgValue::Struct(s) => s.fields.iter().map(|(_, v)| v.byte_len()).sum(),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Bool(v) => write!(f, "{}", v),
            ArgValue::I8(v) => write!(f, "{}", v),
            ArgValue::I16(v) => write!(f, "{}", v),
            ArgValue::I32(v) => write!(f, "{}", v),
            ArgValue::I64(v) => write!(f, "{}", v),
            ArgValue::U8(v) => write!(f, "{}", v),
            ArgValue::U16(v) => write!(f, "{}", v),
            ArgValue::U32(v) => write!(f, "{}", v),
            ArgValue::U64(v) => write!(f, "{}", v),
            ArgValue::Char(c) => write!(f, "{}", c),
            ArgValue::Ptr(p) => write!(f, "{:#x}", p),
            ArgValue::Bytes(bytes) => {
                write!(f, "[")?;
                for (i, b) in bytes.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:02x}", b)?;
                }
                write!(f, "]")
            }
            ArgValue::Str(s) => write!(f, "{}", s),
            ArgValue::Struct(s) => write!(f, "{}", s),
        }
    }
}

/// A composite value with ordered, named fields.
///
/// Built with the fluent `field` method:
///
/// ```rust
/// use mockmatch::StructValue;
///
/// let point = StructValue::new().field("x", 5i32).field("y", 7i32);
/// assert_eq!(point.to_string(), "{ x: 5, y: 7 }");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StructValue {
    fields: Vec<(String, ArgValue)>,
}

impl StructValue {
    /// Create an empty composite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Iterate over the fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the composite has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for StructValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        write!(f, " }}")
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for ArgValue {
                fn from(v: $ty) -> Self {
                    ArgValue::$variant(v)
                }
            }
        )*
    };
}

impl_from_primitive! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    char => Char,
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::Str(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::Str(s)
    }
}

impl From<Vec<u8>> for ArgValue {
    fn from(b: Vec<u8>) -> Self {
        ArgValue::Bytes(b)
    }
}

impl From<&[u8]> for ArgValue {
    fn from(b: &[u8]) -> Self {
        ArgValue::Bytes(b.to_vec())
    }
}

impl From<StructValue> for ArgValue {
    fn from(s: StructValue) -> Self {
        ArgValue::Struct(s)
    }
}

impl<T> From<*const T> for ArgValue {
    fn from(p: *const T) -> Self {
        ArgValue::Ptr(p as usize)
    }
}

impl<T> From<*mut T> for ArgValue {
    fn from(p: *mut T) -> Self {
        ArgValue::Ptr(p as usize)
    }
}
