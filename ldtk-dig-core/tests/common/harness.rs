//! Test harness: stochastic variations and a reference walker
//!
//! The reference walker answers every dig's question from a fully parsed
//! `serde_json::Value`. Object members are visited in map order, which is
//! also the order `serde_json` serializes them in, so "document order"
//! means the same thing on both sides.

use serde_json::Value;

use super::fixtures;
use super::Gen;

/// A serialized variation of a document
#[derive(Debug)]
pub struct Variation {
    pub input: Vec<u8>,
    pub seed: u64,
}

impl Variation {
    /// Print detailed failure info
    pub fn print_failure(&self, case_id: &str) {
        eprintln!("\n=== FAILED: {} ===", case_id);
        eprintln!("Seed: {} (set LDTK_DIG_TEST_SEED={} to reproduce)", self.seed, self.seed);
        eprintln!("\nInput:");
        eprintln!("{}", String::from_utf8_lossy(&self.input));
    }
}

/// Serialize `doc` with independent variations:
/// - unrelated members scattered through objects
/// - 50% chance of pretty printing
/// - 10% chance of a byte-order mark
/// - surrounding whitespace
pub fn run_with_variations(doc: &Value, gen: &mut Gen) -> Variation {
    let mut doc = doc.clone();
    gen.scatter(&mut doc);

    let mut input = Vec::new();
    if gen.chance(0.1) {
        input.extend_from_slice(b"\xEF\xBB\xBF");
    }
    input.extend(std::iter::repeat(b' ').take(gen.geometric(0.3)));
    if gen.chance(0.5) {
        input.extend(fixtures::pretty_bytes(&doc));
    } else {
        input.extend(fixtures::bytes(&doc));
    }
    input.extend(std::iter::repeat(b'\n').take(gen.geometric(0.3)));

    Variation {
        input,
        seed: gen.seed,
    }
}

pub mod reference {
    use std::collections::{BTreeMap, BTreeSet};

    use ldtk_dig_core::{int_grid_value_key, FieldTileRef, TilesetRect};
    use serde_json::Value;

    /// Visit every object member depth-first. `visit` returns whether to
    /// descend into the member's value.
    fn walk<'v>(value: &'v Value, visit: &mut dyn FnMut(&'v str, &'v Value) -> bool) {
        match value {
            Value::Object(members) => {
                for (name, member) in members {
                    if visit(name.as_str(), member) {
                        walk(member, visit);
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    walk(item, visit);
                }
            }
            _ => {}
        }
    }

    /// Object elements of a record array. Null or missing means none.
    fn records(value: &Value) -> impl Iterator<Item = &serde_json::Map<String, Value>> {
        value.as_array().into_iter().flatten().filter_map(Value::as_object)
    }

    fn non_empty_str(value: Option<&Value>) -> Option<String> {
        value.and_then(Value::as_str).filter(|s| !s.is_empty()).map(str::to_string)
    }

    fn first<'v>(doc: &'v Value, name: &str) -> Option<&'v Value> {
        let mut found = None;
        walk(doc, &mut |key, value| {
            if found.is_none() && key == name {
                found = Some(value);
            }
            found.is_none()
        });
        found
    }

    pub fn json_version(doc: &Value) -> Option<String> {
        first(doc, "jsonVersion").and_then(Value::as_str).map(str::to_string)
    }

    pub fn default_grid_size(doc: &Value) -> Option<i64> {
        first(doc, "defaultGridSize").and_then(Value::as_i64)
    }

    pub fn is_external_levels(doc: &Value) -> Option<bool> {
        first(doc, "externalLevels").and_then(Value::as_bool)
    }

    pub fn tileset_rel_paths(doc: &Value) -> BTreeSet<String> {
        let mut paths = BTreeSet::new();
        walk(doc, &mut |key, value| {
            if key != "tilesets" {
                return true;
            }
            paths.extend(records(value).filter_map(|r| non_empty_str(r.get("relPath"))));
            false
        });
        paths
    }

    pub fn used_backgrounds(doc: &Value) -> BTreeSet<String> {
        let mut paths = BTreeSet::new();
        walk(doc, &mut |key, value| {
            if key == "bgRelPath" {
                paths.extend(non_empty_str(Some(value)));
                return false;
            }
            true
        });
        paths
    }

    pub fn used_entities(doc: &Value) -> BTreeSet<String> {
        let mut identifiers = BTreeSet::new();
        walk(doc, &mut |key, value| {
            if key != "entityInstances" {
                return true;
            }
            identifiers.extend(
                records(value).filter_map(|r| r.get("__identifier")?.as_str().map(str::to_string)),
            );
            false
        });
        identifiers
    }

    pub fn used_int_grid_values(doc: &Value) -> BTreeSet<String> {
        fn visit(value: &Value, keys: &mut BTreeSet<String>) {
            match value {
                Value::Object(members) => {
                    if let Some(csv) = members.get("intGridCsv").and_then(Value::as_array) {
                        let identifier = members.get("__identifier").and_then(Value::as_str).unwrap_or("");
                        keys.extend(
                            csv.iter()
                                .filter_map(Value::as_i64)
                                .map(|v| int_grid_value_key(identifier, v)),
                        );
                    }
                    members.values().for_each(|member| visit(member, keys));
                }
                Value::Array(items) => items.iter().for_each(|item| visit(item, keys)),
                _ => {}
            }
        }
        let mut keys = BTreeSet::new();
        visit(doc, &mut keys);
        keys
    }

    pub fn used_tileset_sprites(doc: &Value) -> BTreeMap<String, BTreeSet<i64>> {
        let mut used: BTreeMap<String, BTreeSet<i64>> = BTreeMap::new();
        walk(doc, &mut |key, value| {
            if key != "layerInstances" {
                return true;
            }
            for layer in records(value) {
                let array = match layer.get("__type").and_then(Value::as_str) {
                    Some("Tiles") => "gridTiles",
                    Some("IntGrid" | "AutoLayer") => "autoLayerTiles",
                    _ => continue,
                };
                let Some(identifier) = layer.get("__identifier").and_then(Value::as_str) else {
                    continue;
                };
                let ids = layer
                    .get(array)
                    .into_iter()
                    .flat_map(|tiles| records(tiles).filter_map(|tile| tile.get("t")?.as_i64()));
                used.entry(identifier.to_string()).or_default().extend(ids);
            }
            false
        });
        used
    }

    fn rect(value: &Value) -> Option<TilesetRect> {
        let members = value.as_object()?;
        if members.len() != 5 {
            return None;
        }
        let int = |key: &str| members.get(key)?.as_i64();
        Some(TilesetRect {
            tileset_uid: int("tilesetUid")?,
            x: int("x")?,
            y: int("y")?,
            w: int("w")?,
            h: int("h")?,
        })
    }

    fn tile_rects(value: Option<&Value>) -> Vec<TilesetRect> {
        match value {
            Some(Value::Object(_)) => value.and_then(rect).into_iter().collect(),
            Some(Value::Array(items)) => items
                .iter()
                .filter(|item| !item.is_null())
                .map(rect)
                .collect::<Option<Vec<_>>>()
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    pub fn used_field_tiles(doc: &Value) -> Vec<FieldTileRef> {
        let mut fields = Vec::new();
        walk(doc, &mut |key, value| {
            if key != "fieldInstances" {
                return true;
            }
            for field in records(value) {
                let rects = tile_rects(field.get("__value"));
                if rects.is_empty() {
                    continue;
                }
                fields.push(FieldTileRef {
                    identifier: field["__identifier"].as_str().unwrap_or_default().to_string(),
                    type_tag: field["__type"].as_str().unwrap_or_default().to_string(),
                    def_uid: field["defUid"].as_i64().unwrap_or_default(),
                    rects,
                });
            }
            false
        });
        fields
    }
}
