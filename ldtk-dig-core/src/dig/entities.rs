use std::collections::BTreeSet;

use crate::cursor::Cursor;
use crate::error::Result;

use super::{each_record, Dig};

/// `__identifier` of every entity instance.
///
/// Only the record-level identifier counts. Field instances nested in an
/// entity carry their own `__identifier`, which is skipped along with the
/// rest of the record.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsedEntities;

impl Dig for UsedEntities {
    type Output = BTreeSet<String>;
    const NAME: &'static str = "used entities";

    fn dig(cursor: &mut Cursor<'_>) -> Result<BTreeSet<String>> {
        let mut identifiers = BTreeSet::new();
        while cursor.seek_property("entityInstances")? {
            each_record(cursor, |cursor, entity| {
                while let Some(name) = entity.next_property(cursor)? {
                    if name == "__identifier" {
                        identifiers.insert(cursor.read_string()?.into_owned());
                        break;
                    }
                }
                Ok(())
            })?;
        }
        Ok(identifiers)
    }
}
