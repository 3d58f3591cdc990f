//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod ao;
mod body;
mod catalog;
mod channel;
mod configuration;
mod custom_attributes;
mod lenient;

pub use ao::{decode_ao_records, decode_send_ao_response, encode_ao_batch_json, encode_ao_form};
pub use body::{ResponseBody, classify_body};
pub use catalog::{decode_carrier, decode_carriers, decode_countries, decode_country};
pub use channel::{decode_channel, decode_channels, encode_channel_json};
pub use custom_attributes::{decode_custom_attributes, encode_custom_attributes_form};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response contains an invalid channel name: {name:?}")]
    InvalidChannelName { name: String },
}
