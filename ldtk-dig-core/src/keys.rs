//! Composite keys shared with consumers of dig results.

/// Key for one int-grid value on one layer: `<identifier>_<value>`.
///
/// Consumers match these against keys they build from layer definitions,
/// so the format is fixed.
pub fn int_grid_value_key(identifier: &str, value: i64) -> String {
    format!("{identifier}_{value}")
}
