//! Entry points: load a document, run one dig, report failures.
//!
//! ```no_run
//! use ldtk_dig_core::{dig::UsedEntities, Digger, Source};
//!
//! let digger = Digger::new();
//! let source = Source::read("World.ldtk", digger.limits())?;
//! let entities = digger.dig_source::<UsedEntities>(&source)?;
//! let version = ldtk_dig_core::json_version("World.ldtk")?;
//! # Ok::<(), ldtk_dig_core::Error>(())
//! ```

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cursor::Cursor;
use crate::dig::{
    DefaultGridSize, Dig, FieldTileRef, IsExternalLevels, JsonVersion, TilesetRelPaths,
    UsedBackgrounds, UsedEntities, UsedFieldTiles, UsedIntGridValues, UsedTilesetSprites,
};
use crate::error::{Error, Result};
use crate::limits::Limits;

/// The bytes of one document, read once and dug any number of times.
#[derive(Debug, Clone)]
pub struct Source {
    path: Option<PathBuf>,
    bytes: Vec<u8>,
}

impl Source {
    /// Read a whole file, refusing it if it exceeds the input limit.
    pub fn read(path: impl AsRef<Path>, limits: &Limits) -> Result<Self> {
        let path = path.as_ref();
        let unavailable = |source| Error::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        };
        let size = fs::metadata(path).map_err(unavailable)?.len();
        limits.check_input_size(size)?;
        let bytes = fs::read(path).map_err(unavailable)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            bytes,
        })
    }

    /// Wrap bytes already in memory.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            path: None,
            bytes: bytes.into(),
        }
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn label(&self) -> Cow<'_, str> {
        match &self.path {
            Some(path) => path.to_string_lossy(),
            None => Cow::Borrowed(MEMORY_LABEL),
        }
    }
}

const MEMORY_LABEL: &str = "<memory>";

/// Runs digs under a set of limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Digger {
    limits: Limits,
}

impl Digger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self { limits }
    }

    #[inline]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Read the file at `path` and run `D` over it.
    pub fn dig_file<D: Dig>(&self, path: impl AsRef<Path>) -> Result<D::Output> {
        let path = path.as_ref();
        let source = Source::read(path, &self.limits).inspect_err(|err| {
            log::error!("couldn't load {} for {}: {}", path.display(), D::NAME, err);
        })?;
        self.dig_source::<D>(&source)
    }

    /// Run `D` over a document read earlier.
    pub fn dig_source<D: Dig>(&self, source: &Source) -> Result<D::Output> {
        self.run::<D>(source.bytes(), &source.label())
    }

    /// Run `D` over bytes held by the caller.
    pub fn dig_bytes<D: Dig>(&self, bytes: &[u8]) -> Result<D::Output> {
        self.run::<D>(bytes, MEMORY_LABEL)
    }

    fn run<D: Dig>(&self, bytes: &[u8], label: &str) -> Result<D::Output> {
        let started = Instant::now();
        log::debug!("digging {} in {} ({} bytes)", D::NAME, label, bytes.len());

        let result = self.limits.check_input_size(bytes.len() as u64).and_then(|()| {
            let mut cursor = Cursor::with_limits(bytes, &self.limits)?;
            let output = D::dig(&mut cursor)?;
            if D::SCANS_WHOLE_DOCUMENT {
                cursor.finish()?;
            }
            Ok(output)
        });

        match &result {
            Ok(_) => log::debug!("dug {} in {} in {:?}", D::NAME, label, started.elapsed()),
            Err(err) => match err.offset() {
                Some(offset) => {
                    log::error!("issue digging {} in {} at offset {}: {}", D::NAME, label, offset, err)
                }
                None => log::error!("issue digging {} in {}: {}", D::NAME, label, err),
            },
        }
        result
    }
}

/// Run `D` over the file at `path` with default limits.
pub fn dig_file<D: Dig>(path: impl AsRef<Path>) -> Result<D::Output> {
    Digger::new().dig_file::<D>(path)
}

/// Run `D` over an in-memory document with default limits.
pub fn dig_bytes<D: Dig>(bytes: &[u8]) -> Result<D::Output> {
    Digger::new().dig_bytes::<D>(bytes)
}

// ============================================================================
// One function per question
// ============================================================================

/// Relative paths of every tileset image.
pub fn tileset_rel_paths(path: impl AsRef<Path>) -> Result<BTreeSet<String>> {
    dig_file::<TilesetRelPaths>(path)
}

/// Identifiers of every placed entity.
pub fn used_entities(path: impl AsRef<Path>) -> Result<BTreeSet<String>> {
    dig_file::<UsedEntities>(path)
}

/// `<layer>_<value>` for every int-grid value in use.
pub fn used_int_grid_values(path: impl AsRef<Path>) -> Result<BTreeSet<String>> {
    dig_file::<UsedIntGridValues>(path)
}

/// Relative paths of every level background.
pub fn used_backgrounds(path: impl AsRef<Path>) -> Result<BTreeSet<String>> {
    dig_file::<UsedBackgrounds>(path)
}

/// Tile-typed field instances and their rectangles.
pub fn used_field_tiles(path: impl AsRef<Path>) -> Result<Vec<FieldTileRef>> {
    dig_file::<UsedFieldTiles>(path)
}

/// Tile ids in use, per layer identifier.
pub fn used_tileset_sprites(path: impl AsRef<Path>) -> Result<BTreeMap<String, BTreeSet<i64>>> {
    dig_file::<UsedTilesetSprites>(path)
}

pub fn is_external_levels(path: impl AsRef<Path>) -> Result<bool> {
    dig_file::<IsExternalLevels>(path)
}

pub fn default_grid_size(path: impl AsRef<Path>) -> Result<i64> {
    dig_file::<DefaultGridSize>(path)
}

pub fn json_version(path: impl AsRef<Path>) -> Result<String> {
    dig_file::<JsonVersion>(path)
}
