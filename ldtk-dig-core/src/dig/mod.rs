//! Dig procedures: one forward scan per question.
//!
//! A dig recognizes one shape of data and accumulates only the values it
//! wants. Everything else is skipped without decoding. Digs are pure
//! functions of the cursor: they never touch the file system and keep no
//! state between calls.
//!
//! Collection digs scan the whole document and leave the final
//! end-of-input check to the dispatcher. Scalar digs stop at their first
//! match.

mod entities;
mod field_tiles;
mod int_grid;
mod paths;
mod scalar;
mod tiles;

pub use entities::UsedEntities;
pub use field_tiles::{FieldTileRef, TilesetRect, UsedFieldTiles};
pub use int_grid::UsedIntGridValues;
pub use paths::{TilesetRelPaths, UsedBackgrounds};
pub use scalar::{DefaultGridSize, IsExternalLevels, JsonVersion};
pub use tiles::{tile_array_for, UsedTilesetSprites};

use crate::cursor::{Container, Cursor};
use crate::error::Result;
use crate::token::TokenKind;
use crate::tracker::Scope;

/// One question asked of a document.
pub trait Dig {
    /// Accumulated answer
    type Output: Default;

    /// Name used in log lines.
    const NAME: &'static str;

    /// Whether the dig reads to the end of the document. The dispatcher then
    /// checks that the input is complete and every container was closed.
    const SCANS_WHOLE_DOCUMENT: bool = true;

    /// Run the dig from the start of a document.
    fn dig(cursor: &mut Cursor<'_>) -> Result<Self::Output>;
}

/// Visit each object element of the record array under the cursor.
///
/// A `null` in place of the array is an absent container. Elements that are
/// not objects are skipped. Each record is closed after `visit` returns,
/// however much of it `visit` read.
pub(crate) fn each_record<'a, F>(cursor: &mut Cursor<'a>, mut visit: F) -> Result<()>
where
    F: FnMut(&mut Cursor<'a>, &mut Scope) -> Result<()>,
{
    let Some(mut records) = Scope::open_nullable(cursor)? else {
        return Ok(());
    };
    if records.container() != Container::Array {
        return Err(crate::Error::Structure {
            offset: records.offset(),
            message: "expected an array of records",
        });
    }
    while records.still_inside(cursor)? {
        if cursor.current_kind() != Some(TokenKind::BeginObject) {
            continue;
        }
        let mut record = Scope::object(cursor)?;
        visit(cursor, &mut record)?;
        record.skip_to_end(cursor)?;
    }
    Ok(())
}
