//! Stochastic document generators
//!
//! Uses seeded RNG for reproducibility. Print seed on failure for replay.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Map, Value};

use super::fixtures;

/// Layer identifiers drawn from a small pool so layers merge across levels.
const LAYER_NAMES: &[&str] = &["Ground", "Walls", "Deco", "Water", "Entities"];
const ENTITY_NAMES: &[&str] = &["Player", "Chest", "Door", "Enemy_Bat", "Sign"];

/// Strings that look like member names the diggers look for. Used as values
/// so that only position separates them from real names.
const DECOY_STRINGS: &[&str] = &[
    "relPath",
    "bgRelPath",
    "__identifier",
    "intGridCsv",
    "tilesets",
    "layerInstances",
    "fieldInstances",
    "t",
    "jsonVersion",
];

/// Seeded generator for reproducible stochastic tests
pub struct Gen {
    pub rng: StdRng,
    pub seed: u64,
}

impl Gen {
    /// Create with specific seed (for reproduction)
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create from environment or random seed
    pub fn from_env_or_random() -> Self {
        let seed = std::env::var("LDTK_DIG_TEST_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(rand::random);
        Self::new(seed)
    }

    /// Geometric distribution: count until rand > alpha
    pub fn geometric(&mut self, alpha: f64) -> usize {
        let mut n = 0;
        while self.rng.gen::<f64>() < alpha {
            n += 1;
        }
        n
    }

    /// Random boolean with probability p
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    pub fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.rng.gen_range(0..items.len())]
    }

    fn word(&mut self) -> String {
        let len = 1 + self.geometric(0.7);
        (0..len).map(|_| self.rng.gen_range(b'a'..=b'z') as char).collect()
    }

    /// Member name that no digger looks for. The suffix keeps it apart from
    /// every name of interest, the random stem spreads it through key order.
    pub fn noise_name(&mut self) -> String {
        let prefix = if self.chance(0.2) { "__" } else { "" };
        format!("{prefix}{}_n", self.word())
    }

    /// Random unrelated value, nesting bounded by `depth`
    pub fn noise_value(&mut self, depth: usize) -> Value {
        let pick = if depth == 0 { self.rng.gen_range(0..5) } else { self.rng.gen_range(0..7) };
        match pick {
            0 => Value::Null,
            1 => Value::Bool(self.chance(0.5)),
            2 => json!(self.rng.gen_range(-100_000i64..100_000)),
            3 => json!(self.rng.gen_range(-1000.0f64..1000.0)),
            4 => {
                if self.chance(0.4) {
                    Value::String(self.pick(DECOY_STRINGS).to_string())
                } else {
                    // Escapes and non-ASCII in skipped strings
                    Value::String(format!("{} \"q\" \\ \u{e9}\n", self.word()))
                }
            }
            5 => {
                let len = self.geometric(0.6);
                Value::Array((0..len).map(|_| self.noise_value(depth - 1)).collect())
            }
            _ => {
                let len = self.geometric(0.6);
                let mut members = Map::new();
                for _ in 0..len {
                    let name = self.noise_name();
                    members.insert(name, self.noise_value(depth - 1));
                }
                Value::Object(members)
            }
        }
    }

    /// Add unrelated members to objects throughout `doc`.
    ///
    /// Rectangle objects are left alone: an extra key would make them stop
    /// being rectangles.
    pub fn scatter(&mut self, doc: &mut Value) {
        match doc {
            Value::Object(members) => {
                for value in members.values_mut() {
                    self.scatter(value);
                }
                if members.contains_key("tilesetUid") {
                    return;
                }
                for _ in 0..self.geometric(0.3) {
                    let name = self.noise_name();
                    let value = self.noise_value(3);
                    members.insert(name, value);
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.scatter(item);
                }
            }
            _ => {}
        }
    }

    fn ids(&mut self, max: i64) -> Vec<i64> {
        let len = self.geometric(0.8);
        (0..len).map(|_| self.rng.gen_range(0..max)).collect()
    }

    fn rel_path(&mut self) -> Option<String> {
        match self.rng.gen_range(0..6) {
            0 => None,
            1 => Some(String::new()),
            _ => Some(format!("Tiles/{}.png", self.word())),
        }
    }

    fn rect(&mut self) -> Value {
        fixtures::rect(
            self.rng.gen_range(1..4),
            self.rng.gen_range(0..16) * 16,
            self.rng.gen_range(0..16) * 16,
            16,
            16,
        )
    }

    pub fn tile_field_value(&mut self) -> Value {
        match self.rng.gen_range(0..4) {
            0 => Value::Null,
            1 => self.rect(),
            _ => {
                let len = self.geometric(0.6);
                let mut items: Vec<Value> = (0..len).map(|_| self.rect()).collect();
                if self.chance(0.4) {
                    let at = self.rng.gen_range(0..=items.len());
                    items.insert(at, Value::Null);
                }
                Value::Array(items)
            }
        }
    }

    pub fn field(&mut self, def_uid: i64) -> Value {
        let name = format!("F_{}", self.word());
        match self.rng.gen_range(0..5) {
            0 => fixtures::field(&name, "Int", json!(self.rng.gen_range(0..100)), def_uid),
            1 => fixtures::field(&name, "Point", json!({"cx": 1, "cy": 2}), def_uid),
            2 => fixtures::field(&name, "Array<String>", json!(["a", "relPath", null]), def_uid),
            3 => {
                let value = self.tile_field_value();
                fixtures::field(&name, "Tile", value, def_uid)
            }
            _ => {
                let value = self.tile_field_value();
                fixtures::field(&name, "Array<Tile>", value, def_uid)
            }
        }
    }

    pub fn layer(&mut self) -> Value {
        let identifier = self.pick(LAYER_NAMES);
        match self.rng.gen_range(0..4) {
            0 => {
                let csv = self.ids(5);
                let auto = self.ids(64);
                fixtures::int_grid_layer(identifier, &csv, &auto)
            }
            1 => {
                let grid = self.ids(64);
                let auto = self.ids(64);
                fixtures::tiles_layer(identifier, "Tiles", &grid, &auto)
            }
            2 => {
                let grid = self.ids(64);
                let auto = self.ids(64);
                fixtures::tiles_layer(identifier, "AutoLayer", &grid, &auto)
            }
            _ => {
                let count = self.geometric(0.7);
                let entities = (0..count)
                    .map(|i| {
                        let name = self.pick(ENTITY_NAMES);
                        let fields = (0..self.geometric(0.6)).map(|j| self.field((i * 10 + j) as i64)).collect();
                        fixtures::entity(name, fields)
                    })
                    .collect();
                fixtures::entity_layer(identifier, entities)
            }
        }
    }

    pub fn level(&mut self, index: usize) -> Value {
        let layers = if self.chance(0.15) {
            None
        } else {
            Some((0..self.geometric(0.75)).map(|_| self.layer()).collect())
        };
        let bg = self.rel_path();
        let mut level = fixtures::level(&format!("Level_{index}"), bg.as_deref(), layers);
        if self.chance(0.3) {
            let fields = (0..1 + self.geometric(0.5)).map(|j| self.field(100 + j as i64)).collect();
            level["fieldInstances"] = Value::Array(fields);
        }
        level
    }

    /// A whole project document.
    pub fn project(&mut self) -> Value {
        let tilesets = (0..self.geometric(0.7))
            .map(|uid| {
                let path = self.rel_path();
                fixtures::tileset(uid as i64, path.as_deref())
            })
            .collect();
        let levels = (0..self.geometric(0.7)).map(|i| self.level(i)).collect();
        fixtures::project(tilesets, levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reproducibility() {
        let mut g1 = Gen::new(42);
        let mut g2 = Gen::new(42);
        for _ in 0..5 {
            assert_eq!(g1.project(), g2.project());
        }
    }
}
