use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Custom attributes stored for an address. Values are arbitrary JSON
/// (strings, numbers, lists of strings).
pub type CustomAttributes = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    pub name: Option<String>,
    pub iso2: Option<String>,
    pub iso3: Option<String>,
    pub phone_prefix: Option<String>,
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Carrier {
    pub guid: Option<String>,
    pub name: Option<String>,
    pub country_iso2: Option<String>,
    /// Comma separated number prefixes, as stored by the server.
    pub prefixes: Option<String>,
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
/// One AO message as returned by `get_ao`.
pub struct AoRecord {
    pub guid: Option<String>,
    pub token: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub state: Option<String>,
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Successful HTTP response returned as-is (status, lowercase headers, body).
pub struct ApiResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    /// Look up a header by name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result of `send_ao`.
///
/// `id`, `token` and `guid` are read from the `x-nuntium-id`,
/// `x-nuntium-token` and `x-nuntium-guid` response headers.
pub struct SendAoResponse {
    pub status: u16,
    pub id: Option<String>,
    pub token: Option<String>,
    pub guid: Option<String>,
    pub body: String,
}
