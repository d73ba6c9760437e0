//! ldtk-dig-core - selective extraction from LDtk project and level files
//!
//! Answers narrow questions about `.ldtk` / `.ldtkl` documents (which
//! tilesets, entities, int-grid values, backgrounds and tiles are used, plus
//! a few header scalars) in one forward pass, without deserializing the
//! document.
//!
//! # Architecture
//!
//! ```text
//! bytes ──► Cursor ──► Scope ──► Dig ──► accumulator
//!           token      depth     one
//!           stream     pinned    question
//! ```
//!
//! - [`Cursor`]: forward-only pull tokenizer. Classifies property names by
//!   position and keeps the container stack.
//! - [`Scope`]: iterates one array or object, skipping whatever the caller
//!   left unread so depth never drifts.
//! - [`dig`]: one procedure per question, implementing [`Dig`].
//! - [`Digger`]: loads a document, runs a dig, logs and reports failures.
//!
//! # Example
//!
//! ```
//! use ldtk_dig_core::{dig::TilesetRelPaths, dig_bytes};
//!
//! let project = br#"{"defs":{"tilesets":[{"relPath":"cavern.png"},{"relPath":null}]}}"#;
//! let paths = dig_bytes::<TilesetRelPaths>(project).unwrap();
//! assert!(paths.contains("cavern.png"));
//! assert_eq!(paths.len(), 1);
//! ```

pub mod cursor;
pub mod dig;
pub mod dispatch;
pub mod error;
pub mod keys;
pub mod limits;
pub mod token;
pub mod tracker;
pub mod value;

pub use cursor::{Container, Cursor};
pub use dig::{Dig, FieldTileRef, TilesetRect};
pub use dispatch::{
    default_grid_size, dig_bytes, dig_file, is_external_levels, json_version, tileset_rel_paths,
    used_backgrounds, used_entities, used_field_tiles, used_int_grid_values,
    used_tileset_sprites, Digger, Source,
};
pub use error::{Error, ErrorCode, Result};
pub use keys::int_grid_value_key;
pub use limits::Limits;
pub use token::{Token, TokenKind};
pub use tracker::Scope;
pub use value::Value;
