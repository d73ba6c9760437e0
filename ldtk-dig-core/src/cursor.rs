//! Forward-only token cursor over a JSON byte buffer.
//!
//! The cursor always holds one lexed-but-unconsumed token (the *current*
//! token). Every operation either inspects it or consumes it and lexes the
//! next one. Nothing is ever rolled back.
//!
//! Grammar is checked only as far as needed to keep structure exact: property
//! names are told apart from string values by position, a `:` must follow
//! each name, and close tokens must match their open tokens. Content the
//! caller skips is lexed but never decoded, so an invalid UTF-8 sequence in a
//! skipped string goes unnoticed.
//!
//! ```
//! use ldtk_dig_core::{Cursor, TokenKind};
//!
//! let mut cursor = Cursor::new(br#"{"defaultGridSize": 16}"#).unwrap();
//! assert!(cursor.seek_property("defaultGridSize").unwrap());
//! assert_eq!(cursor.current_kind(), Some(TokenKind::Number));
//! assert_eq!(cursor.read_int().unwrap(), 16);
//! ```

use std::borrow::Cow;

use memchr::{memchr, memchr2};

use crate::error::{Error, ErrorCode, Result};
use crate::limits::Limits;
use crate::token::{Token, TokenKind};
use crate::value::Value;

const BYTE_ORDER_MARK: &[u8] = b"\xEF\xBB\xBF";

/// A container `read_value` has opened but not yet closed.
enum Partial<'a> {
    Array(Vec<Value<'a>>),
    /// Members so far, and the name awaiting its value
    Object(Vec<(Cow<'a, str>, Value<'a>)>, Option<Cow<'a, str>>),
}

/// Kind of an open container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Array,
    Object,
}

/// What the grammar allows as the next token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// Top-level start, or after `:` / `,` in an array
    Value,
    /// After `[`
    ValueOrEnd,
    /// After `{`
    NameOrEnd,
    /// After `,` in an object
    Name,
    /// After a property name
    NameSeparator,
    /// After a value inside a container
    SeparatorOrEnd,
    /// After the top-level value
    Done,
}

/// Pull-parsing cursor over one JSON document.
#[derive(Debug)]
pub struct Cursor<'a> {
    input: &'a [u8],
    /// Next unlexed byte
    pos: usize,
    /// Current token, `None` at end of input
    token: Option<Token>,
    /// Containers opened by consumed tokens
    stack: Vec<Container>,
    expect: Expect,
    max_depth: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor with default limits, positioned on the first token.
    pub fn new(input: &'a [u8]) -> Result<Self> {
        Self::with_limits(input, &Limits::default())
    }

    /// Create a cursor with explicit limits, positioned on the first token.
    pub fn with_limits(input: &'a [u8], limits: &Limits) -> Result<Self> {
        let pos = if input.starts_with(BYTE_ORDER_MARK) {
            BYTE_ORDER_MARK.len()
        } else {
            0
        };
        let mut cursor = Self {
            input,
            pos,
            token: None,
            stack: Vec::with_capacity(16),
            expect: Expect::Value,
            max_depth: limits.max_nesting_depth,
        };
        cursor.token = cursor.lex()?;
        Ok(cursor)
    }

    // ========================================================================
    // Position
    // ========================================================================

    /// Classification of the current token, `None` at end of input.
    #[inline]
    pub fn current_kind(&self) -> Option<TokenKind> {
        self.token.map(|t| t.kind)
    }

    /// The current token.
    #[inline]
    pub fn current_token(&self) -> Option<Token> {
        self.token
    }

    /// Number of containers opened and not yet closed by consumed tokens.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Container opened at `depth` (1-based), if still open.
    #[inline]
    pub fn container_at(&self, depth: usize) -> Option<Container> {
        depth.checked_sub(1).and_then(|i| self.stack.get(i)).copied()
    }

    /// Byte offset of the current token, or of the end of input.
    #[inline]
    pub fn offset(&self) -> usize {
        self.token.map_or(self.input.len(), |t| t.start)
    }

    /// Check if every token has been consumed.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.token.is_none()
    }

    // ========================================================================
    // Movement
    // ========================================================================

    /// Consume the current token and move to the next one.
    ///
    /// Returns `false` once the input is exhausted. Fails if the next token
    /// is malformed, breaks the grammar, or the input ends with a container
    /// still open.
    pub fn advance(&mut self) -> Result<bool> {
        let Some(token) = self.token else {
            return Ok(false);
        };
        self.consume(token)?;
        self.token = self.lex()?;
        Ok(self.token.is_some())
    }

    /// Consume the current token iff it is `:`.
    pub fn accept_name_separator(&mut self) -> Result<bool> {
        self.accept(TokenKind::NameSeparator)
    }

    /// Consume the current token iff it is `,`.
    pub fn accept_value_separator(&mut self) -> Result<bool> {
        self.accept(TokenKind::ValueSeparator)
    }

    fn accept(&mut self, kind: TokenKind) -> Result<bool> {
        if self.current_kind() != Some(kind) {
            return Ok(false);
        }
        self.advance()?;
        Ok(true)
    }

    /// Check for a property name equal to `name`.
    ///
    /// On a match the name and its `:` are consumed and the cursor sits on
    /// the value. Otherwise the cursor does not move.
    pub fn is_property_name(&mut self, name: &str) -> Result<bool> {
        let Some(token) = self.token else {
            return Ok(false);
        };
        if token.kind != TokenKind::PropertyName || !self.text_eq(&token, name)? {
            return Ok(false);
        }
        self.advance()?;
        self.accept_name_separator()?;
        Ok(true)
    }

    /// Scan forward to the next property named `name`, at any depth.
    ///
    /// Returns `true` with the cursor on the property's value, or `false`
    /// after consuming the rest of the input.
    pub fn seek_property(&mut self, name: &str) -> Result<bool> {
        while self.token.is_some() {
            if self.is_property_name(name)? {
                return Ok(true);
            }
            self.advance()?;
        }
        Ok(false)
    }

    /// Skip the current value including everything nested in it.
    ///
    /// On a property name the whole member (name, `:` and value) is skipped.
    /// This is the one subtree-skipping primitive; scopes and digs all
    /// bail out through it or through [`Cursor::skip_to_depth`].
    pub fn skip_value(&mut self) -> Result<()> {
        let Some(token) = self.token else {
            return Err(self.error_at(self.input.len(), ErrorCode::UnexpectedEof));
        };
        match token.kind {
            TokenKind::PropertyName => {
                self.advance()?;
                self.accept_name_separator()?;
                self.skip_value()
            }
            TokenKind::BeginObject | TokenKind::BeginArray => {
                let outside = self.depth();
                self.advance()?;
                self.skip_to_depth(outside)
            }
            kind if kind.is_scalar() => {
                self.advance()?;
                Ok(())
            }
            _ => Err(self.error_at(token.start, ErrorCode::UnexpectedToken)),
        }
    }

    /// Consume tokens until at most `depth` containers are open.
    pub fn skip_to_depth(&mut self, depth: usize) -> Result<()> {
        while self.depth() > depth {
            if !self.advance()? && self.depth() > depth {
                return Err(self.error_at(self.input.len(), ErrorCode::Unclosed));
            }
        }
        Ok(())
    }

    /// Skip to just past the `}` closing the object opened at `depth`.
    pub fn skip_to_object_end(&mut self, depth: usize) -> Result<()> {
        self.skip_to_close(depth, Container::Object)
    }

    /// Skip to just past the `]` closing the array opened at `depth`.
    pub fn skip_to_array_end(&mut self, depth: usize) -> Result<()> {
        self.skip_to_close(depth, Container::Array)
    }

    fn skip_to_close(&mut self, depth: usize, container: Container) -> Result<()> {
        match self.container_at(depth) {
            Some(open) if open == container => self.skip_to_depth(depth - 1),
            Some(_) => Err(self.error_at(self.offset(), ErrorCode::MismatchedClose)),
            None => Err(self.structure_error("skip target is not open")),
        }
    }

    /// Consume the rest of the document.
    ///
    /// Succeeds only if the input is well-formed to the end, which also means
    /// every container was closed.
    pub fn finish(&mut self) -> Result<()> {
        while self.advance()? {}
        debug_assert!(self.stack.is_empty());
        Ok(())
    }

    // ========================================================================
    // Typed reads
    // ========================================================================

    /// Consume a string value.
    pub fn read_string(&mut self) -> Result<Cow<'a, str>> {
        let token = self.expect_kind(TokenKind::String)?;
        let text = self.decode_str(&token)?;
        self.advance()?;
        Ok(text)
    }

    /// Consume a string value or `null`.
    pub fn read_string_or_null(&mut self) -> Result<Option<Cow<'a, str>>> {
        if self.current_kind() == Some(TokenKind::Null) {
            self.advance()?;
            return Ok(None);
        }
        self.read_string().map(Some)
    }

    /// Consume a property name and its `:`, leaving the cursor on the value.
    pub fn read_property_name(&mut self) -> Result<Cow<'a, str>> {
        let token = self.expect_kind(TokenKind::PropertyName)?;
        let name = self.decode_str(&token)?;
        self.advance()?;
        self.accept_name_separator()?;
        Ok(name)
    }

    /// Consume an integer number.
    ///
    /// A literal with a fraction or exponent is a type mismatch, even when
    /// its value is integral.
    pub fn read_int(&mut self) -> Result<i64> {
        let token = self.expect_kind(TokenKind::Number)?;
        let value = parse_integer(&self.input[token.start..token.end])
            .map_err(|code| self.error_at(token.start, code))?;
        self.advance()?;
        Ok(value)
    }

    /// Consume any number as a float.
    pub fn read_float(&mut self) -> Result<f64> {
        let token = self.expect_kind(TokenKind::Number)?;
        let value = std::str::from_utf8(&self.input[token.start..token.end])
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or_else(|| self.error_at(token.start, ErrorCode::InvalidNumber))?;
        self.advance()?;
        Ok(value)
    }

    /// Consume `true` or `false`.
    pub fn read_bool(&mut self) -> Result<bool> {
        let token = self.expect_kind(TokenKind::Boolean)?;
        let value = self.input[token.start] == b't';
        self.advance()?;
        Ok(value)
    }

    /// Consume the current value and materialize it.
    ///
    /// Open containers are kept on an explicit stack, so nesting up to the
    /// cursor's depth limit costs heap rather than call stack.
    pub fn read_value(&mut self) -> Result<Value<'a>> {
        let mut open: Vec<Partial<'a>> = Vec::new();
        loop {
            let Some(token) = self.token else {
                return Err(self.error_at(self.input.len(), ErrorCode::UnexpectedEof));
            };
            let value = match token.kind {
                TokenKind::BeginArray => {
                    self.advance()?;
                    open.push(Partial::Array(Vec::new()));
                    continue;
                }
                TokenKind::BeginObject => {
                    self.advance()?;
                    open.push(Partial::Object(Vec::new(), None));
                    continue;
                }
                TokenKind::EndArray | TokenKind::EndObject => {
                    let Some(partial) = open.pop() else {
                        return Err(self.error_at(token.start, ErrorCode::UnexpectedToken));
                    };
                    self.advance()?;
                    match partial {
                        Partial::Array(items) => Value::Array(items),
                        Partial::Object(members, _) => Value::Object(members),
                    }
                }
                TokenKind::PropertyName if !open.is_empty() => {
                    let name = self.read_property_name()?;
                    if let Some(Partial::Object(_, pending)) = open.last_mut() {
                        *pending = Some(name);
                    }
                    continue;
                }
                TokenKind::ValueSeparator if !open.is_empty() => {
                    self.advance()?;
                    continue;
                }
                TokenKind::PropertyName | TokenKind::NameSeparator | TokenKind::ValueSeparator => {
                    return Err(self.error_at(token.start, ErrorCode::UnexpectedToken));
                }
                TokenKind::Null => {
                    self.advance()?;
                    Value::Null
                }
                TokenKind::Boolean => Value::Bool(self.read_bool()?),
                TokenKind::String => Value::String(self.read_string()?),
                TokenKind::Number => match parse_integer(&self.input[token.start..token.end]) {
                    Ok(value) => {
                        self.advance()?;
                        Value::Integer(value)
                    }
                    Err(_) => Value::Float(self.read_float()?),
                },
            };

            match open.last_mut() {
                None => return Ok(value),
                Some(Partial::Array(items)) => items.push(value),
                Some(Partial::Object(members, pending)) => {
                    let Some(name) = pending.take() else {
                        return Err(self.structure_error("object member without a name"));
                    };
                    members.push((name, value));
                }
            }
        }
    }

    // ========================================================================
    // Errors
    // ========================================================================

    /// A structural violation at the current position.
    pub fn structure_error(&self, message: &'static str) -> Error {
        Error::Structure {
            offset: self.offset(),
            message,
        }
    }

    /// A decode error at the current position.
    pub fn decode_error(&self, code: ErrorCode) -> Error {
        self.error_at(self.offset(), code)
    }

    #[inline]
    fn error_at(&self, offset: usize, code: ErrorCode) -> Error {
        Error::Decode { offset, code }
    }

    fn expect_kind(&self, kind: TokenKind) -> Result<Token> {
        match self.token {
            Some(token) if token.kind == kind => Ok(token),
            Some(token) => Err(self.error_at(token.start, ErrorCode::TypeMismatch)),
            None => Err(self.error_at(self.input.len(), ErrorCode::UnexpectedEof)),
        }
    }

    // ========================================================================
    // Grammar
    // ========================================================================

    /// Apply the structural effect of consuming `token`.
    fn consume(&mut self, token: Token) -> Result<()> {
        self.expect = match token.kind {
            TokenKind::BeginObject | TokenKind::BeginArray => {
                if self.stack.len() >= self.max_depth {
                    return Err(self.error_at(token.start, ErrorCode::NestingTooDeep));
                }
                if token.kind == TokenKind::BeginObject {
                    self.stack.push(Container::Object);
                    Expect::NameOrEnd
                } else {
                    self.stack.push(Container::Array);
                    Expect::ValueOrEnd
                }
            }
            TokenKind::EndObject | TokenKind::EndArray => {
                self.stack.pop();
                self.after_value()
            }
            TokenKind::PropertyName => Expect::NameSeparator,
            TokenKind::NameSeparator => Expect::Value,
            TokenKind::ValueSeparator => match self.stack.last() {
                Some(Container::Object) => Expect::Name,
                _ => Expect::Value,
            },
            TokenKind::String | TokenKind::Number | TokenKind::Boolean | TokenKind::Null => {
                self.after_value()
            }
        };
        Ok(())
    }

    #[inline]
    fn after_value(&self) -> Expect {
        if self.stack.is_empty() {
            Expect::Done
        } else {
            Expect::SeparatorOrEnd
        }
    }

    /// Check a raw token against the grammar and classify strings.
    fn classify(&self, mut token: Token) -> Result<Option<Token>> {
        let kind = token.kind;
        let allowed = match self.expect {
            Expect::Value => kind.is_value_start(),
            Expect::ValueOrEnd => kind.is_value_start() || kind == TokenKind::EndArray,
            Expect::NameOrEnd | Expect::Name => {
                if kind == TokenKind::String {
                    token.kind = TokenKind::PropertyName;
                    true
                } else {
                    self.expect == Expect::NameOrEnd && kind == TokenKind::EndObject
                }
            }
            Expect::NameSeparator => kind == TokenKind::NameSeparator,
            Expect::SeparatorOrEnd => match (kind, self.stack.last()) {
                (TokenKind::ValueSeparator, _) => true,
                (TokenKind::EndArray, Some(Container::Array))
                | (TokenKind::EndObject, Some(Container::Object)) => true,
                (TokenKind::EndArray | TokenKind::EndObject, _) => {
                    return Err(self.error_at(token.start, ErrorCode::MismatchedClose));
                }
                _ => false,
            },
            Expect::Done => false,
        };
        if !allowed {
            return Err(self.error_at(token.start, ErrorCode::UnexpectedToken));
        }
        Ok(Some(token))
    }

    // ========================================================================
    // Lexer
    // ========================================================================

    fn lex(&mut self) -> Result<Option<Token>> {
        self.skip_whitespace();
        let start = self.pos;
        let Some(&byte) = self.input.get(start) else {
            return match self.expect {
                Expect::Done => Ok(None),
                _ if !self.stack.is_empty() => Err(self.error_at(start, ErrorCode::Unclosed)),
                _ => Err(self.error_at(start, ErrorCode::UnexpectedEof)),
            };
        };
        if self.expect == Expect::Done {
            return Err(self.error_at(start, ErrorCode::TrailingContent));
        }
        let token = match byte {
            b'{' => self.single(TokenKind::BeginObject),
            b'}' => self.single(TokenKind::EndObject),
            b'[' => self.single(TokenKind::BeginArray),
            b']' => self.single(TokenKind::EndArray),
            b':' => self.single(TokenKind::NameSeparator),
            b',' => self.single(TokenKind::ValueSeparator),
            b'"' => self.lex_string()?,
            b'-' | b'0'..=b'9' => self.lex_number()?,
            b't' => self.lex_literal(b"true", TokenKind::Boolean)?,
            b'f' => self.lex_literal(b"false", TokenKind::Boolean)?,
            b'n' => self.lex_literal(b"null", TokenKind::Null)?,
            _ => return Err(self.error_at(start, ErrorCode::UnexpectedToken)),
        };
        self.classify(token)
    }

    #[inline]
    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.input.get(self.pos) {
            self.pos += 1;
        }
    }

    #[inline]
    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.pos;
        self.pos += 1;
        Token::new(kind, start, start + 1)
    }

    fn lex_string(&mut self) -> Result<Token> {
        let body = self.pos + 1;
        let mut i = body;
        let mut escaped = false;
        loop {
            let Some(found) = memchr2(b'"', b'\\', &self.input[i..]) else {
                return Err(self.error_at(self.input.len(), ErrorCode::UnexpectedEof));
            };
            let at = i + found;
            if self.input[at] == b'"' {
                if let Some(bad) = self.input[body..at].iter().position(|&b| b < 0x20) {
                    return Err(self.error_at(body + bad, ErrorCode::ControlCharacter));
                }
                self.pos = at + 1;
                return Ok(Token {
                    kind: TokenKind::String,
                    start: body,
                    end: at,
                    escaped,
                });
            }
            escaped = true;
            i = self.check_escape(at)?;
        }
    }

    /// Validate the escape starting at the backslash at `at`.
    /// Returns the index just past it.
    fn check_escape(&self, at: usize) -> Result<usize> {
        match self.input.get(at + 1) {
            None => Err(self.error_at(self.input.len(), ErrorCode::UnexpectedEof)),
            Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => Ok(at + 2),
            Some(b'u') => match self.input.get(at + 2..at + 6) {
                Some(hex) if hex.iter().all(u8::is_ascii_hexdigit) => Ok(at + 6),
                Some(_) => Err(self.error_at(at, ErrorCode::InvalidEscape)),
                None => Err(self.error_at(self.input.len(), ErrorCode::UnexpectedEof)),
            },
            Some(_) => Err(self.error_at(at, ErrorCode::InvalidEscape)),
        }
    }

    fn lex_number(&mut self) -> Result<Token> {
        let input = self.input;
        let start = self.pos;
        let invalid = || self.error_at(start, ErrorCode::InvalidNumber);
        let mut i = start;

        if input.get(i) == Some(&b'-') {
            i += 1;
        }
        match input.get(i) {
            Some(b'0') => i += 1,
            Some(b'1'..=b'9') => i = skip_digits(input, i + 1),
            _ => return Err(invalid()),
        }
        if input.get(i) == Some(&b'.') {
            let digits = i + 1;
            i = skip_digits(input, digits);
            if i == digits {
                return Err(invalid());
            }
        }
        if let Some(b'e' | b'E') = input.get(i) {
            i += 1;
            if let Some(b'+' | b'-') = input.get(i) {
                i += 1;
            }
            let digits = i;
            i = skip_digits(input, digits);
            if i == digits {
                return Err(invalid());
            }
        }
        if !is_delimiter(input.get(i)) {
            return Err(invalid());
        }

        self.pos = i;
        Ok(Token::new(TokenKind::Number, start, i))
    }

    fn lex_literal(&mut self, word: &[u8], kind: TokenKind) -> Result<Token> {
        let start = self.pos;
        let end = start + word.len();
        if self.input.get(start..end) != Some(word) || !is_delimiter(self.input.get(end)) {
            return Err(self.error_at(start, ErrorCode::InvalidLiteral));
        }
        self.pos = end;
        Ok(Token::new(kind, start, end))
    }

    // ========================================================================
    // String decoding
    // ========================================================================

    fn text_eq(&self, token: &Token, text: &str) -> Result<bool> {
        if !token.escaped {
            return Ok(&self.input[token.start..token.end] == text.as_bytes());
        }
        Ok(self.decode_str(token)? == text)
    }

    fn decode_str(&self, token: &Token) -> Result<Cow<'a, str>> {
        let input: &'a [u8] = self.input;
        let raw = &input[token.start..token.end];
        if !token.escaped {
            return std::str::from_utf8(raw)
                .map(Cow::Borrowed)
                .map_err(|e| self.error_at(token.start + e.valid_up_to(), ErrorCode::InvalidUtf8));
        }
        unescape(raw, token.start).map(Cow::Owned)
    }
}

#[inline]
fn skip_digits(input: &[u8], mut i: usize) -> usize {
    while let Some(b'0'..=b'9') = input.get(i) {
        i += 1;
    }
    i
}

#[inline]
fn is_delimiter(byte: Option<&u8>) -> bool {
    matches!(
        byte,
        None | Some(b' ' | b'\t' | b'\n' | b'\r' | b',' | b':' | b']' | b'}')
    )
}

/// Parse a lexed number literal as an `i64`.
fn parse_integer(text: &[u8]) -> std::result::Result<i64, ErrorCode> {
    if text.iter().any(|&b| matches!(b, b'.' | b'e' | b'E')) {
        return Err(ErrorCode::TypeMismatch);
    }
    let (negative, digits) = match text.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, text),
    };
    let mut value: i64 = 0;
    for &b in digits {
        let digit = i64::from(b - b'0');
        // Accumulate negatives so i64::MIN parses
        value = value
            .checked_mul(10)
            .and_then(|v| if negative { v.checked_sub(digit) } else { v.checked_add(digit) })
            .ok_or(ErrorCode::IntegerOverflow)?;
    }
    Ok(value)
}

/// Unescape a string body. `base` is the body's offset, for errors.
fn unescape(raw: &[u8], base: usize) -> Result<String> {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        let Some(found) = memchr(b'\\', &raw[i..]) else {
            out.extend_from_slice(&raw[i..]);
            break;
        };
        let at = i + found;
        out.extend_from_slice(&raw[i..at]);
        let invalid = Error::Decode {
            offset: base + at,
            code: ErrorCode::InvalidEscape,
        };
        let simple = match raw.get(at + 1) {
            Some(b'"') => Some(b'"'),
            Some(b'\\') => Some(b'\\'),
            Some(b'/') => Some(b'/'),
            Some(b'b') => Some(0x08),
            Some(b'f') => Some(0x0C),
            Some(b'n') => Some(b'\n'),
            Some(b'r') => Some(b'\r'),
            Some(b't') => Some(b'\t'),
            Some(b'u') => None,
            _ => return Err(invalid),
        };
        if let Some(byte) = simple {
            out.push(byte);
            i = at + 2;
            continue;
        }

        let high = hex4(raw, at + 2).ok_or(Error::Decode {
            offset: base + at,
            code: ErrorCode::InvalidEscape,
        })?;
        let (code_point, next) = match high {
            0xD800..=0xDBFF => {
                if raw.get(at + 6..at + 8) != Some(b"\\u".as_slice()) {
                    return Err(invalid);
                }
                match hex4(raw, at + 8) {
                    Some(low @ 0xDC00..=0xDFFF) => {
                        (0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00), at + 12)
                    }
                    _ => return Err(invalid),
                }
            }
            0xDC00..=0xDFFF => return Err(invalid),
            _ => (high, at + 6),
        };
        let ch = char::from_u32(code_point).ok_or(invalid)?;
        let mut buf = [0u8; 4];
        out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
        i = next;
    }
    String::from_utf8(out).map_err(|e| Error::Decode {
        offset: base + e.utf8_error().valid_up_to(),
        code: ErrorCode::InvalidUtf8,
    })
}

fn hex4(raw: &[u8], at: usize) -> Option<u32> {
    let hex = raw.get(at..at + 4)?;
    let text = std::str::from_utf8(hex).ok()?;
    u32::from_str_radix(text, 16).ok()
}
