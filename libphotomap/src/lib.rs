//! This is a library for loading geotagged points of interest from a
//! spreadsheet-style dataset and presenting them as markers on an interactive
//! map, with a detail overlay for the selected marker.

use serde::{Deserialize, Deserializer};
use std::str::FromStr;

pub mod context;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod map;
pub mod presenter;
pub mod record;
pub mod source;

pub use error::Error;
pub use error::Result;

/// Deserializes a field as `None` when it is missing, empty or only whitespace.
/// Otherwise the trimmed value is parsed with [FromStr].
pub fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => FromStr::from_str(s)
            .map_err(serde::de::Error::custom)
            .map(Some),
    }
}
