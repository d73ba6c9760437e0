//! Tile ids in use, per layer.

use std::collections::{BTreeMap, BTreeSet};

use phf::phf_map;

use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::tracker::Scope;

use super::{each_record, Dig};

/// Tile array holding the placed tiles of each tile-bearing layer type.
static TILE_ARRAYS: phf::Map<&'static str, &'static str> = phf_map! {
    "IntGrid" => "autoLayerTiles",
    "AutoLayer" => "autoLayerTiles",
    "Tiles" => "gridTiles",
};

/// Name of the tile array used by a layer `__type`, or `None` for layer
/// types that never carry tiles.
#[inline]
pub fn tile_array_for(layer_type: &str) -> Option<&'static str> {
    TILE_ARRAYS.get(layer_type).copied()
}

/// Tile ids (`t`) used on each layer, keyed by layer `__identifier`.
///
/// Layers sharing an identifier across levels merge into one set.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsedTilesetSprites;

impl Dig for UsedTilesetSprites {
    type Output = BTreeMap<String, BTreeSet<i64>>;
    const NAME: &'static str = "used tileset sprites";

    fn dig(cursor: &mut Cursor<'_>) -> Result<Self::Output> {
        let mut used = BTreeMap::new();
        while cursor.seek_property("layerInstances")? {
            each_record(cursor, |cursor, layer| dig_layer(cursor, layer, &mut used))?;
        }
        Ok(used)
    }
}

/// Collect the tiles of one layer record.
///
/// Both tile arrays are buffered until `__type` says which one counts,
/// since nothing orders `__type` before them.
fn dig_layer(
    cursor: &mut Cursor<'_>,
    layer: &mut Scope,
    used: &mut BTreeMap<String, BTreeSet<i64>>,
) -> Result<()> {
    let mut identifier = None;
    let mut wanted: Option<&'static str> = None;
    let mut grid_tiles = BTreeSet::new();
    let mut auto_layer_tiles = BTreeSet::new();

    while let Some(name) = layer.next_property(cursor)? {
        match &*name {
            "__identifier" => identifier = Some(cursor.read_string()?.into_owned()),
            "__type" => match tile_array_for(&cursor.read_string()?) {
                Some(array) => wanted = Some(array),
                None => return layer.skip_to_end(cursor),
            },
            "gridTiles" if wanted.map_or(true, |w| w == "gridTiles") => {
                collect_tile_ids(cursor, &mut grid_tiles)?;
            }
            "autoLayerTiles" if wanted.map_or(true, |w| w == "autoLayerTiles") => {
                collect_tile_ids(cursor, &mut auto_layer_tiles)?;
            }
            _ => {}
        }
    }

    let Some(wanted) = wanted else {
        return Err(Error::Structure {
            offset: layer.offset(),
            message: "layer instance without __type",
        });
    };
    let Some(identifier) = identifier else {
        return Err(Error::Structure {
            offset: layer.offset(),
            message: "layer instance without __identifier",
        });
    };
    let tiles = if wanted == "gridTiles" { grid_tiles } else { auto_layer_tiles };
    used.entry(identifier).or_default().extend(tiles);
    Ok(())
}

fn collect_tile_ids(cursor: &mut Cursor<'_>, ids: &mut BTreeSet<i64>) -> Result<()> {
    each_record(cursor, |cursor, tile| {
        while let Some(name) = tile.next_property(cursor)? {
            if name == "t" {
                ids.insert(cursor.read_int()?);
                break;
            }
        }
        Ok(())
    })
}
