//! Channel configuration marshalling.
//!
//! Callers work with a `name -> value` map; the server expects and returns
//! `[{"name": ..., "value": ...}, ...]`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::transport::lenient::LenientString;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedEntry<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConfigurationEntry {
    pub name: String,
    #[serde(default)]
    pub value: Option<LenientString>,
}

/// Map to wire list, one record per entry. Records follow key order, which
/// the server does not rely on.
pub fn encode_configuration(configuration: &BTreeMap<String, String>) -> Vec<EncodedEntry<'_>> {
    configuration
        .iter()
        .map(|(name, value)| EncodedEntry {
            name: name.as_str(),
            value: value.as_str(),
        })
        .collect()
}

/// Wire list to map. On duplicate names the last record wins; a `null`
/// value becomes the empty string.
pub fn decode_configuration(entries: Vec<ConfigurationEntry>) -> BTreeMap<String, String> {
    entries
        .into_iter()
        .map(|entry| {
            let value = entry
                .value
                .map(LenientString::into_string)
                .unwrap_or_default();
            (entry.name, value)
        })
        .collect()
}
