//! Relative asset paths: tileset images and level backgrounds.

use std::collections::BTreeSet;

use crate::cursor::Cursor;
use crate::error::Result;

use super::{each_record, Dig};

/// `relPath` of every tileset definition.
#[derive(Debug, Clone, Copy, Default)]
pub struct TilesetRelPaths;

/// Every level `bgRelPath`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsedBackgrounds;

/// Insert a path unless it is null or empty.
///
/// A tileset with a null path is the editor's embedded icon atlas, and a
/// level without a background has a null `bgRelPath`.
fn insert_path(cursor: &mut Cursor<'_>, paths: &mut BTreeSet<String>) -> Result<()> {
    if let Some(path) = cursor.read_string_or_null()? {
        if !path.is_empty() {
            paths.insert(path.into_owned());
        }
    }
    Ok(())
}

impl Dig for TilesetRelPaths {
    type Output = BTreeSet<String>;
    const NAME: &'static str = "tileset rel paths";

    fn dig(cursor: &mut Cursor<'_>) -> Result<BTreeSet<String>> {
        let mut paths = BTreeSet::new();
        while cursor.seek_property("tilesets")? {
            each_record(cursor, |cursor, tileset| {
                while let Some(name) = tileset.next_property(cursor)? {
                    if name == "relPath" {
                        insert_path(cursor, &mut paths)?;
                    }
                }
                Ok(())
            })?;
        }
        Ok(paths)
    }
}

impl Dig for UsedBackgrounds {
    type Output = BTreeSet<String>;
    const NAME: &'static str = "used backgrounds";

    fn dig(cursor: &mut Cursor<'_>) -> Result<BTreeSet<String>> {
        let mut paths = BTreeSet::new();
        while cursor.seek_property("bgRelPath")? {
            insert_path(cursor, &mut paths)?;
        }
        Ok(paths)
    }
}
