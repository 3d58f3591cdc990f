use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::domain::value::ChannelName;

#[derive(Debug, Clone, PartialEq)]
/// A messaging endpoint configured in Nuntium (an SMS gateway connection,
/// an XMPP account, a QST server, ...).
///
/// `configuration` is a flat map here; on the wire it travels as a list of
/// `{name, value}` records.
pub struct Channel {
    pub name: ChannelName,
    pub kind: String,
    pub protocol: String,
    pub configuration: BTreeMap<String, String>,
    /// Remaining server-side fields (`direction`, `enabled`, `priority`,
    /// `restrictions`, ...). Sent back unchanged on create/update.
    pub attributes: Map<String, Value>,
}

impl Channel {
    /// Create a channel with an empty configuration.
    pub fn new(name: ChannelName, kind: impl Into<String>, protocol: impl Into<String>) -> Self {
        Self {
            name,
            kind: kind.into(),
            protocol: protocol.into(),
            configuration: BTreeMap::new(),
            attributes: Map::new(),
        }
    }

    /// Set one configuration entry, replacing any previous value.
    pub fn with_configuration(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.configuration.insert(name.into(), value.into());
        self
    }

    /// Set one extra attribute such as `enabled` or `priority`.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}
