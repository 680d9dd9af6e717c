//! Tag conversion between CLI input and the ARM wire dictionary.
//!
//! Tags arrive either as repeated `--tag key=value` arguments or as a map on
//! a previously fetched object. The wire representation is a flat JSON string
//! map. Absence and emptiness are distinct on the wire ("no tags" vs "empty
//! tags") and are preserved exactly as supplied.

use crate::error::{Error, Result};
use indexmap::IndexMap;

/// An order-preserving tag map.
pub type TagMap = IndexMap<String, String>;

/// Parse repeated `key=value` CLI arguments into a tag map.
///
/// Duplicate keys are rejected case-sensitively (`Env` and `env` are two
/// different tags as far as ARM is concerned).
pub fn parse_pairs(pairs: &[String]) -> Result<TagMap> {
    let mut tags = TagMap::with_capacity(pairs.len());
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| Error::invalid_tag(pair.clone(), "expected 'key=value'"))?;
        if key.is_empty() {
            return Err(Error::invalid_tag(pair.clone(), "tag key must not be empty"));
        }
        if tags.insert(key.to_string(), value.to_string()).is_some() {
            return Err(Error::invalid_tag(key, "duplicate tag key"));
        }
    }
    Ok(tags)
}

/// Convert a local tag map to the wire dictionary, validating keys.
///
/// `None` stays `None`; an empty map stays an empty map.
pub fn encode(tags: Option<&TagMap>) -> Result<Option<TagMap>> {
    match tags {
        None => Ok(None),
        Some(map) => {
            for key in map.keys() {
                if key.is_empty() {
                    return Err(Error::invalid_tag(key, "tag key must not be empty"));
                }
            }
            Ok(Some(map.clone()))
        }
    }
}

/// Convert the wire dictionary back to a local tag map.
pub fn decode(wire: Option<TagMap>) -> TagMap {
    wire.unwrap_or_default()
}
