//! Structural tracking: iterate one container's direct children.
//!
//! A [`Scope`] pins the depth of a container when it is opened and answers a
//! single question per step: is the cursor still inside? The pin makes the
//! loop immune to whatever the body does with the current element:
//!
//! - read it fully, and the next step starts at the separator
//! - read it partially (opened an object and bailed), and the leftover
//!   internals are skipped until the pinned depth is reached again
//! - ignore it, and it is skipped whole
//!
//! ```
//! use ldtk_dig_core::{Cursor, Scope};
//!
//! let mut cursor = Cursor::new(br#"[{"t":1,"d":[0]}, 7, {"t":2}]"#).unwrap();
//! let mut tiles = Scope::array(&mut cursor).unwrap();
//! let mut seen = 0;
//! while tiles.still_inside(&mut cursor).unwrap() {
//!     seen += 1; // never touch the element
//! }
//! assert_eq!(seen, 3);
//! assert!(cursor.is_at_end());
//! ```
//!
//! Scanning a whole document for a property name, the third traversal state,
//! lives on the cursor as [`Cursor::seek_property`].

use std::borrow::Cow;

use crate::cursor::{Container, Cursor};
use crate::error::{ErrorCode, Result};
use crate::token::TokenKind;

/// Iteration state for one open container.
#[derive(Debug, Clone)]
pub struct Scope {
    container: Container,
    /// Cursor depth just inside the container
    depth: usize,
    /// Offset of the open token
    opened_at: usize,
    /// Offset of the element last handed to the caller
    yielded_at: Option<usize>,
    closed: bool,
}

impl Scope {
    /// Open the array or object under the cursor.
    pub fn open(cursor: &mut Cursor<'_>) -> Result<Self> {
        let container = match cursor.current_kind() {
            Some(TokenKind::BeginArray) => Container::Array,
            Some(TokenKind::BeginObject) => Container::Object,
            Some(_) => return Err(cursor.decode_error(ErrorCode::TypeMismatch)),
            None => return Err(cursor.decode_error(ErrorCode::UnexpectedEof)),
        };
        let opened_at = cursor.offset();
        cursor.advance()?;
        Ok(Self {
            container,
            depth: cursor.depth(),
            opened_at,
            yielded_at: None,
            closed: false,
        })
    }

    /// Open the array under the cursor.
    pub fn array(cursor: &mut Cursor<'_>) -> Result<Self> {
        Self::open_kind(cursor, TokenKind::BeginArray)
    }

    /// Open the object under the cursor.
    pub fn object(cursor: &mut Cursor<'_>) -> Result<Self> {
        Self::open_kind(cursor, TokenKind::BeginObject)
    }

    /// Open the container under the cursor, or consume a `null` in its place.
    pub fn open_nullable(cursor: &mut Cursor<'_>) -> Result<Option<Self>> {
        if cursor.current_kind() == Some(TokenKind::Null) {
            cursor.advance()?;
            return Ok(None);
        }
        Self::open(cursor).map(Some)
    }

    /// Open the array under the cursor, or consume a `null` in its place.
    pub fn array_or_null(cursor: &mut Cursor<'_>) -> Result<Option<Self>> {
        if cursor.current_kind() == Some(TokenKind::Null) {
            cursor.advance()?;
            return Ok(None);
        }
        Self::array(cursor).map(Some)
    }

    fn open_kind(cursor: &mut Cursor<'_>, kind: TokenKind) -> Result<Self> {
        match cursor.current_kind() {
            Some(found) if found == kind => Self::open(cursor),
            Some(_) => Err(cursor.decode_error(ErrorCode::TypeMismatch)),
            None => Err(cursor.decode_error(ErrorCode::UnexpectedEof)),
        }
    }

    #[inline]
    pub fn container(&self) -> Container {
        self.container
    }

    /// Depth pinned when the scope was opened.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Byte offset of the container's open token.
    #[inline]
    pub fn offset(&self) -> usize {
        self.opened_at
    }

    /// Move to the next direct child, or past the close token.
    ///
    /// Returns `true` with the cursor on the child's first token (for
    /// objects, the property name), or `false` once the container's close
    /// token has been consumed. Calling it again after `false` keeps
    /// returning `false`.
    pub fn still_inside(&mut self, cursor: &mut Cursor<'_>) -> Result<bool> {
        if self.closed {
            return Ok(false);
        }
        loop {
            if cursor.depth() < self.depth {
                return Err(cursor.structure_error("scope was closed underneath its loop"));
            }
            if cursor.depth() > self.depth {
                cursor.skip_to_depth(self.depth)?;
                continue;
            }

            let Some(token) = cursor.current_token() else {
                return Err(cursor.decode_error(ErrorCode::Unclosed));
            };
            if self.yielded_at == Some(token.start) {
                cursor.skip_value()?;
                continue;
            }
            match token.kind {
                TokenKind::ValueSeparator | TokenKind::NameSeparator => {
                    cursor.advance()?;
                }
                TokenKind::EndArray | TokenKind::EndObject => {
                    cursor.advance()?;
                    self.closed = true;
                    return Ok(false);
                }
                // A member value left behind after its name was read
                _ if self.container == Container::Object && token.kind.is_value_start() => {
                    cursor.skip_value()?;
                }
                _ => {
                    self.yielded_at = Some(token.start);
                    return Ok(true);
                }
            }
        }
    }

    /// Move to the next member of an object scope and read its name.
    ///
    /// The cursor is left on the member's value, which the caller may read
    /// or ignore.
    pub fn next_property<'a>(&mut self, cursor: &mut Cursor<'a>) -> Result<Option<Cow<'a, str>>> {
        if !self.still_inside(cursor)? {
            return Ok(None);
        }
        cursor.read_property_name().map(Some)
    }

    /// Skip everything up to and including the container's close token.
    pub fn skip_to_end(&mut self, cursor: &mut Cursor<'_>) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        match self.container {
            Container::Array => cursor.skip_to_array_end(self.depth)?,
            Container::Object => cursor.skip_to_object_end(self.depth)?,
        }
        self.closed = true;
        Ok(())
    }

    /// Check if the close token has been consumed.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
