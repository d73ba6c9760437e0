//! Tileset rectangles referenced by tile-typed field instances.
//!
//! A field instance stores its value in `__value`, whose shape depends on
//! the field type. Tile fields hold a rectangle object, or an array of
//! rectangles and nulls for `Array<Tile>`. Since `__type` may come after
//! `__value`, the value is classified by shape while it streams past. A
//! rectangle is flat, so only flat objects are ever materialized and anything
//! nested deeper is skipped unread.

use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::token::TokenKind;
use crate::tracker::Scope;
use crate::value::Value;

use super::{each_record, Dig};

/// A pixel rectangle inside one tileset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TilesetRect {
    pub tileset_uid: i64,
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

impl TilesetRect {
    const KEYS: [&'static str; 5] = ["tilesetUid", "x", "y", "w", "h"];

    /// Read a rectangle from an object with exactly the five integer keys.
    pub fn from_value(value: &Value<'_>) -> Option<Self> {
        let members = value.as_object()?;
        if members.len() != Self::KEYS.len() {
            return None;
        }
        let int = |key: &str| value.get(key).and_then(Value::as_integer);
        Some(Self {
            tileset_uid: int("tilesetUid")?,
            x: int("x")?,
            y: int("y")?,
            w: int("w")?,
            h: int("h")?,
        })
    }
}

/// One tile-typed field instance and the rectangles it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTileRef {
    /// Field `__identifier`
    pub identifier: String,
    /// Field `__type`, `Tile` or `Array<Tile>`
    pub type_tag: String,
    /// Uid of the field definition
    pub def_uid: i64,
    /// Non-empty, in document order
    pub rects: Vec<TilesetRect>,
}

/// Every field instance whose value references tileset rectangles, in
/// document order.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsedFieldTiles;

impl Dig for UsedFieldTiles {
    type Output = Vec<FieldTileRef>;
    const NAME: &'static str = "used field tiles";

    fn dig(cursor: &mut Cursor<'_>) -> Result<Vec<FieldTileRef>> {
        let mut fields = Vec::new();
        while cursor.seek_property("fieldInstances")? {
            each_record(cursor, |cursor, field| {
                let mut identifier = None;
                let mut type_tag = None;
                let mut def_uid = None;
                let mut rects = Vec::new();

                while let Some(name) = field.next_property(cursor)? {
                    match &*name {
                        "__identifier" => identifier = Some(cursor.read_string()?),
                        "__type" => type_tag = Some(cursor.read_string()?),
                        "defUid" => def_uid = Some(cursor.read_int()?),
                        "__value" => rects = read_tileset_rects(cursor)?,
                        _ => {}
                    }
                }
                if rects.is_empty() {
                    return Ok(());
                }

                let (Some(identifier), Some(type_tag), Some(def_uid)) = (identifier, type_tag, def_uid)
                else {
                    return Err(Error::Structure {
                        offset: field.offset(),
                        message: "tile field instance without __identifier, __type or defUid",
                    });
                };
                fields.push(FieldTileRef {
                    identifier: identifier.into_owned(),
                    type_tag: type_tag.into_owned(),
                    def_uid,
                    rects,
                });
                Ok(())
            })?;
        }
        Ok(fields)
    }
}

/// Consume the field value under the cursor and return its rectangles, or
/// none if the value is not tile-shaped.
///
/// An array qualifies only if every element is a rectangle or null.
fn read_tileset_rects(cursor: &mut Cursor<'_>) -> Result<Vec<TilesetRect>> {
    match cursor.current_kind() {
        Some(TokenKind::BeginObject) => Ok(read_flat_rect(cursor)?.into_iter().collect()),
        Some(TokenKind::BeginArray) => {
            let mut rects = Vec::new();
            let mut items = Scope::array(cursor)?;
            while items.still_inside(cursor)? {
                let rect = match cursor.current_kind() {
                    Some(TokenKind::Null) => {
                        cursor.advance()?;
                        continue;
                    }
                    Some(TokenKind::BeginObject) => read_flat_rect(cursor)?,
                    _ => None,
                };
                let Some(rect) = rect else {
                    items.skip_to_end(cursor)?;
                    return Ok(Vec::new());
                };
                rects.push(rect);
            }
            Ok(rects)
        }
        _ => {
            cursor.skip_value()?;
            Ok(Vec::new())
        }
    }
}

/// Consume the object under the cursor and read it as a rectangle.
///
/// Gives up and skips the rest of the object at the first member that is a
/// container, or once there are more members than a rectangle has.
fn read_flat_rect(cursor: &mut Cursor<'_>) -> Result<Option<TilesetRect>> {
    let mut members = Vec::with_capacity(TilesetRect::KEYS.len());
    let mut object = Scope::object(cursor)?;
    while let Some(name) = object.next_property(cursor)? {
        let scalar = cursor.current_kind().is_some_and(TokenKind::is_scalar);
        if !scalar || members.len() == TilesetRect::KEYS.len() {
            object.skip_to_end(cursor)?;
            return Ok(None);
        }
        members.push((name, cursor.read_value()?));
    }
    Ok(TilesetRect::from_value(&Value::Object(members)))
}
