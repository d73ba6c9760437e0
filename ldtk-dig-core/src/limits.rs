//! Resource limits for a dig call.
//!
//! Documents are editor-authored and bounded in practice, so the defaults are
//! generous. They exist to turn a corrupt or hostile file into a clean error
//! instead of an allocation failure or a runaway scan.

/// Limits applied by the dispatcher and the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum document size in bytes
    pub max_input_size: u64,
    /// Maximum number of simultaneously open arrays/objects
    pub max_nesting_depth: usize,
}

impl Limits {
    /// Default limits: 256 MiB documents, 512 levels of nesting.
    pub const fn new() -> Self {
        Self {
            max_input_size: 256 * 1024 * 1024,
            max_nesting_depth: 512,
        }
    }

    /// Lenient limits for tooling that reads arbitrary exports.
    pub const fn lenient() -> Self {
        Self {
            max_input_size: u64::MAX,
            max_nesting_depth: 4096,
        }
    }

    /// Check a document size against the input limit.
    pub fn check_input_size(&self, size: u64) -> crate::Result<()> {
        if size > self.max_input_size {
            return Err(crate::Error::InputTooLarge {
                size,
                limit: self.max_input_size,
            });
        }
        Ok(())
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new()
    }
}
