//! Builders for LDtk-shaped documents
//!
//! Only the members the diggers look at, plus enough realistic padding to
//! make skipping matter.

use serde_json::{json, Value};

/// Serialize compactly.
pub fn bytes(doc: &Value) -> Vec<u8> {
    serde_json::to_vec(doc).expect("serializable")
}

/// Serialize with indentation, as the editor writes files.
pub fn pretty_bytes(doc: &Value) -> Vec<u8> {
    serde_json::to_vec_pretty(doc).expect("serializable")
}

pub fn project(tilesets: Vec<Value>, levels: Vec<Value>) -> Value {
    json!({
        "__header__": {"fileType": "LDtk Project JSON", "app": "LDtk", "appAuthor": "Sebastien 'deepnight' Benard"},
        "iid": "a1b2c3",
        "jsonVersion": "1.5.3",
        "appBuildId": 473703,
        "defaultGridSize": 16,
        "externalLevels": false,
        "bgColor": "#40465B",
        "defs": {
            "layers": [{"identifier": "Ground", "type": "IntGrid", "intGridValues": [{"value": 1, "identifier": "walls"}]}],
            "entities": [{"identifier": "Player", "uid": 1, "tilesetId": null}],
            "tilesets": tilesets,
            "enums": [],
            "levelFields": []
        },
        "levels": levels,
        "worlds": [],
        "toc": []
    })
}

pub fn tileset(uid: i64, rel_path: Option<&str>) -> Value {
    json!({
        "identifier": format!("Tileset_{uid}"),
        "uid": uid,
        "relPath": rel_path,
        "pxWid": 256,
        "pxHei": 256,
        "tileGridSize": 16,
        "customData": [],
        "enumTags": [],
        "tags": ["relPath"]
    })
}

pub fn level(identifier: &str, bg_rel_path: Option<&str>, layers: Option<Vec<Value>>) -> Value {
    json!({
        "identifier": identifier,
        "iid": format!("{identifier}-iid"),
        "worldX": 0,
        "worldY": 0,
        "bgRelPath": bg_rel_path,
        "bgPos": null,
        "fieldInstances": [],
        "layerInstances": layers,
        "__neighbours": []
    })
}

pub fn int_grid_layer(identifier: &str, csv: &[i64], auto_tiles: &[i64]) -> Value {
    json!({
        "__identifier": identifier,
        "__type": "IntGrid",
        "__cWid": csv.len(),
        "__cHei": 1,
        "intGridCsv": csv,
        "autoLayerTiles": tile_records(auto_tiles),
        "gridTiles": [],
        "entityInstances": []
    })
}

pub fn tiles_layer(identifier: &str, layer_type: &str, grid: &[i64], auto: &[i64]) -> Value {
    json!({
        "__identifier": identifier,
        "__type": layer_type,
        "__gridSize": 16,
        "intGridCsv": [],
        "autoLayerTiles": tile_records(auto),
        "gridTiles": tile_records(grid),
        "entityInstances": []
    })
}

pub fn entity_layer(identifier: &str, entities: Vec<Value>) -> Value {
    json!({
        "__identifier": identifier,
        "__type": "Entities",
        "intGridCsv": [],
        "autoLayerTiles": [],
        "gridTiles": [],
        "entityInstances": entities
    })
}

pub fn tile_records(ids: &[i64]) -> Vec<Value> {
    ids.iter()
        .enumerate()
        .map(|(i, &t)| json!({"px": [i * 16, 0], "src": [t * 16, 0], "f": 0, "t": t, "d": [i], "a": 1}))
        .collect()
}

pub fn entity(identifier: &str, fields: Vec<Value>) -> Value {
    json!({
        "__identifier": identifier,
        "__grid": [0, 0],
        "__tile": null,
        "iid": format!("{identifier}-iid"),
        "width": 16,
        "height": 16,
        "fieldInstances": fields,
        "px": [0, 0]
    })
}

pub fn field(identifier: &str, field_type: &str, value: Value, def_uid: i64) -> Value {
    json!({
        "__identifier": identifier,
        "__type": field_type,
        "__value": value,
        "__tile": null,
        "defUid": def_uid,
        "realEditorValues": []
    })
}

pub fn rect(tileset_uid: i64, x: i64, y: i64, w: i64, h: i64) -> Value {
    json!({"tilesetUid": tileset_uid, "x": x, "y": y, "w": w, "h": h})
}
