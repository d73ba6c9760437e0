//! Materialized values for the small sub-trees a dig chooses to keep.
//!
//! Digs never build a tree of the whole document. When a dig needs to look at
//! a flat object as a unit (a tileset rectangle, whose keys may come in any
//! order) it reads just that object into a `Value` and matches on it.

use std::borrow::Cow;

/// A JSON value with borrowed strings where no unescaping was needed.
///
/// The lifetime `'a` refers to the source buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// `null`
    Null,

    /// `true` or `false`
    Bool(bool),

    /// Number literal without fraction or exponent that fits in an `i64`
    Integer(i64),

    /// Any other number literal
    Float(f64),

    /// String (unescaped)
    String(Cow<'a, str>),

    /// Array, in document order
    Array(Vec<Value<'a>>),

    /// Object members, in document order
    Object(Vec<(Cow<'a, str>, Value<'a>)>),
}

impl<'a> Value<'a> {
    /// Try to get as integer.
    #[inline]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as object members.
    #[inline]
    pub fn as_object(&self) -> Option<&[(Cow<'a, str>, Value<'a>)]> {
        match self {
            Value::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Look up an object member by name. First match wins.
    pub fn get(&self, name: &str) -> Option<&Value<'a>> {
        self.as_object()?
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}
