use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{Channel, ChannelName};
use crate::transport::TransportError;
use crate::transport::configuration::{
    ConfigurationEntry, decode_configuration, encode_configuration,
};

#[derive(Debug, Clone, Deserialize)]
struct ChannelJson {
    name: String,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    protocol: Option<String>,
    #[serde(default)]
    configuration: Option<Vec<ConfigurationEntry>>,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl TryFrom<ChannelJson> for Channel {
    type Error = TransportError;

    fn try_from(value: ChannelJson) -> Result<Self, Self::Error> {
        let name = ChannelName::new(value.name.clone())
            .map_err(|_| TransportError::InvalidChannelName { name: value.name })?;
        Ok(Channel {
            name,
            kind: value.kind.unwrap_or_default(),
            protocol: value.protocol.unwrap_or_default(),
            configuration: decode_configuration(value.configuration.unwrap_or_default()),
            attributes: value.attributes,
        })
    }
}

/// Serialize a channel for create/update with `configuration` in wire form.
///
/// Core fields overwrite same-named entries of `attributes`.
pub fn encode_channel_json(channel: &Channel) -> Result<Value, serde_json::Error> {
    let mut object = channel.attributes.clone();
    object.insert(
        "name".to_owned(),
        Value::String(channel.name.as_str().to_owned()),
    );
    object.insert("kind".to_owned(), Value::String(channel.kind.clone()));
    object.insert(
        "protocol".to_owned(),
        Value::String(channel.protocol.clone()),
    );
    object.insert(
        "configuration".to_owned(),
        serde_json::to_value(encode_configuration(&channel.configuration))?,
    );
    Ok(Value::Object(object))
}

pub fn decode_channel(value: Value) -> Result<Channel, TransportError> {
    let parsed: ChannelJson = serde_json::from_value(value)?;
    parsed.try_into()
}

pub fn decode_channels(value: Value) -> Result<Vec<Channel>, TransportError> {
    let parsed: Vec<ChannelJson> = serde_json::from_value(value)?;
    parsed.into_iter().map(Channel::try_from).collect()
}
