//! Int-grid values in use, keyed by layer.
//!
//! An `intGridCsv` array belongs to the object that contains it, and that
//! object's `__identifier` names the layer. The two members can appear in
//! either order, so values are held in a frame per open object and turned
//! into keys when the object closes.

use std::collections::BTreeSet;

use crate::cursor::Cursor;
use crate::error::Result;
use crate::keys::int_grid_value_key;
use crate::token::TokenKind;
use crate::tracker::Scope;

use super::Dig;

/// `<identifier>_<value>` for every int-grid cell value of every layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsedIntGridValues;

#[derive(Debug, Default)]
struct RecordFrame {
    identifier: Option<String>,
    values: BTreeSet<i64>,
}

/// One frame per open object, innermost last.
#[derive(Debug, Default)]
struct RecordFrames {
    frames: Vec<RecordFrame>,
}

impl RecordFrames {
    fn open(&mut self) {
        self.frames.push(RecordFrame::default());
    }

    /// Close the innermost object and emit its keys.
    fn close(&mut self, keys: &mut BTreeSet<String>) {
        let Some(frame) = self.frames.pop() else {
            return;
        };
        // No identifier formats like an unnamed layer
        let identifier = frame.identifier.as_deref().unwrap_or("");
        keys.extend(frame.values.iter().map(|&v| int_grid_value_key(identifier, v)));
    }

    fn innermost(&mut self, cursor: &Cursor<'_>) -> Result<&mut RecordFrame> {
        self.frames
            .last_mut()
            .ok_or_else(|| cursor.structure_error("property outside of any object"))
    }
}

impl Dig for UsedIntGridValues {
    type Output = BTreeSet<String>;
    const NAME: &'static str = "used int grid values";

    fn dig(cursor: &mut Cursor<'_>) -> Result<BTreeSet<String>> {
        let mut keys = BTreeSet::new();
        let mut frames = RecordFrames::default();

        while let Some(kind) = cursor.current_kind() {
            match kind {
                TokenKind::BeginObject => {
                    frames.open();
                    cursor.advance()?;
                }
                TokenKind::EndObject => {
                    frames.close(&mut keys);
                    cursor.advance()?;
                }
                TokenKind::PropertyName => {
                    if cursor.is_property_name("__identifier")? {
                        let identifier = cursor.read_string()?.into_owned();
                        frames.innermost(cursor)?.identifier = Some(identifier);
                    } else if cursor.is_property_name("intGridCsv")? {
                        let Some(mut csv) = Scope::array_or_null(cursor)? else {
                            continue;
                        };
                        while csv.still_inside(cursor)? {
                            let value = cursor.read_int()?;
                            frames.innermost(cursor)?.values.insert(value);
                        }
                    } else {
                        cursor.advance()?;
                    }
                }
                _ => {
                    cursor.advance()?;
                }
            }
        }
        Ok(keys)
    }
}
