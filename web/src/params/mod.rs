//! This module holds typed parameters for various endpoint inputs.
//!
//! Each parameter type is a struct deserialized by an axum extractor. Checks
//! that need no database access happen here; everything else is validated in
//! the entity layer.

use serde::{Deserialize, Deserializer};

pub(crate) mod category;
pub(crate) mod page;
pub(crate) mod product;

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field
/// (`None`, via `#[serde(default)]`).
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
