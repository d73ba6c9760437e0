//! Header scalars. Each appears once, near the top of a project file.

use crate::cursor::Cursor;
use crate::error::{Error, Result};

use super::Dig;

/// `externalLevels`: whether levels live in separate `.ldtkl` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsExternalLevels;

/// `defaultGridSize`: the project's default cell size in pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultGridSize;

/// `jsonVersion`: the schema version string of the writing editor.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonVersion;

/// Seek `name` anywhere and read its value with `read`.
fn dig_scalar<'a, T>(
    cursor: &mut Cursor<'a>,
    name: &'static str,
    read: impl FnOnce(&mut Cursor<'a>) -> Result<T>,
) -> Result<T> {
    if !cursor.seek_property(name)? {
        return Err(Error::FieldNotFound { name });
    }
    read(cursor)
}

impl Dig for IsExternalLevels {
    type Output = bool;
    const NAME: &'static str = "is external levels";
    const SCANS_WHOLE_DOCUMENT: bool = false;

    fn dig(cursor: &mut Cursor<'_>) -> Result<bool> {
        dig_scalar(cursor, "externalLevels", Cursor::read_bool)
    }
}

impl Dig for DefaultGridSize {
    type Output = i64;
    const NAME: &'static str = "default grid size";
    const SCANS_WHOLE_DOCUMENT: bool = false;

    fn dig(cursor: &mut Cursor<'_>) -> Result<i64> {
        dig_scalar(cursor, "defaultGridSize", Cursor::read_int)
    }
}

impl Dig for JsonVersion {
    type Output = String;
    const NAME: &'static str = "json version";
    const SCANS_WHOLE_DOCUMENT: bool = false;

    fn dig(cursor: &mut Cursor<'_>) -> Result<String> {
        dig_scalar(cursor, "jsonVersion", |cursor| {
            cursor.read_string().map(|s| s.into_owned())
        })
    }
}
