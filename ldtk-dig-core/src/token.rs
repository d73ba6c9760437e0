//! Token classification - the unit the cursor moves over.
//!
//! Tokens are not values: an object is a `BeginObject`, a run of
//! `PropertyName` / `NameSeparator` / value / `ValueSeparator` tokens, and an
//! `EndObject`. Nothing is accumulated; structure is represented by
//! begin/end pairs.
//!
//! `{"a":[1,null]}` is:
//! ```text
//! BeginObject
//! PropertyName("a")
//! NameSeparator
//! BeginArray
//! Number(1)
//! ValueSeparator
//! Null
//! EndArray
//! EndObject
//! ```

/// Classification of the token under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ========== Structure ==========

    /// `{`
    BeginObject,
    /// `}`
    EndObject,
    /// `[`
    BeginArray,
    /// `]`
    EndArray,

    // ========== Names and separators ==========

    /// A string in key position inside an object
    PropertyName,
    /// `:`
    NameSeparator,
    /// `,`
    ValueSeparator,

    // ========== Values ==========

    /// A string in value position
    String,
    /// Integer or float literal
    Number,
    /// `true` or `false`
    Boolean,
    /// `null`
    Null,
}

impl TokenKind {
    /// Check if this token starts a value (can follow a name separator).
    pub fn is_value_start(self) -> bool {
        matches!(
            self,
            TokenKind::BeginObject
                | TokenKind::BeginArray
                | TokenKind::String
                | TokenKind::Number
                | TokenKind::Boolean
                | TokenKind::Null
        )
    }

    /// Check if this is a scalar value token.
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            TokenKind::String | TokenKind::Number | TokenKind::Boolean | TokenKind::Null
        )
    }
}

/// A lexed token: its kind and the byte range it covers in the source.
///
/// For strings and property names the range excludes the quotes.
/// `escaped` is set when the string body contains a backslash and must be
/// unescaped before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    pub escaped: bool,
}

impl Token {
    #[inline]
    pub(crate) fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self { kind, start, end, escaped: false }
    }
}
