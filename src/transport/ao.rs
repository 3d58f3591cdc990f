use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{AoMessage, AoRecord, SendAoResponse};
use crate::transport::TransportError;
use crate::transport::lenient::{LenientString, optional};

pub const ID_HEADER: &str = "x-nuntium-id";
pub const TOKEN_HEADER: &str = "x-nuntium-token";
pub const GUID_HEADER: &str = "x-nuntium-guid";

#[derive(Debug, Clone, Deserialize)]
struct AoRecordJson {
    #[serde(default)]
    guid: Option<String>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    subject: Option<LenientString>,
    #[serde(default)]
    body: Option<LenientString>,
    #[serde(default)]
    state: Option<String>,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl From<AoRecordJson> for AoRecord {
    fn from(value: AoRecordJson) -> Self {
        AoRecord {
            guid: value.guid,
            token: value.token,
            from: value.from,
            to: value.to,
            subject: optional(value.subject),
            body: optional(value.body),
            state: value.state,
            attributes: value.attributes,
        }
    }
}

fn message_fields(message: &AoMessage) -> Vec<(String, String)> {
    let mut fields = Vec::<(String, String)>::new();
    if let Some(from) = message.from.as_ref() {
        fields.push(("from".to_owned(), from.as_str().to_owned()));
    }
    fields.push(("to".to_owned(), message.to.as_str().to_owned()));
    if let Some(subject) = message.subject.as_ref() {
        fields.push(("subject".to_owned(), subject.clone()));
    }
    if let Some(body) = message.body.as_ref() {
        fields.push(("body".to_owned(), body.clone()));
    }
    if let Some(token) = message.token.as_ref() {
        fields.push(("token".to_owned(), token.as_str().to_owned()));
    }
    for (name, value) in &message.custom {
        if !is_reserved(name) {
            fields.push((name.clone(), value.clone()));
        }
    }
    fields
}

fn is_reserved(name: &str) -> bool {
    matches!(name, "from" | "to" | "subject" | "body" | "token")
}

/// Form parameters for a single AO message (`send_ao`, candidate channels).
pub fn encode_ao_form(message: &AoMessage) -> Vec<(String, String)> {
    message_fields(message)
}

/// JSON array body for `send_ao.json`.
pub fn encode_ao_batch_json(messages: &[AoMessage]) -> Value {
    let array = messages
        .iter()
        .map(|message| {
            let object = message_fields(message)
                .into_iter()
                .map(|(name, value)| (name, Value::String(value)))
                .collect::<Map<String, Value>>();
            Value::Object(object)
        })
        .collect::<Vec<_>>();
    Value::Array(array)
}

/// Build the `send_ao` result from the response headers (lowercase names).
pub fn decode_send_ao_response(
    status: u16,
    headers: &BTreeMap<String, String>,
    body: String,
) -> SendAoResponse {
    SendAoResponse {
        status,
        id: headers.get(ID_HEADER).cloned(),
        token: headers.get(TOKEN_HEADER).cloned(),
        guid: headers.get(GUID_HEADER).cloned(),
        body,
    }
}

pub fn decode_ao_records(json: &str) -> Result<Vec<AoRecord>, TransportError> {
    let parsed: Vec<AoRecordJson> = serde_json::from_str(json)?;
    Ok(parsed.into_iter().map(AoRecord::from).collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{Address, AoToken};

    fn message() -> AoMessage {
        AoMessage::new(Address::new("sms://2").unwrap())
            .from(Address::new("sms://1").unwrap())
            .subject("hello")
            .body("hi!")
    }

    #[test]
    fn encode_ao_form_params() {
        let message = message()
            .token(AoToken::new("my_token").unwrap())
            .custom("country", "ar");
        assert_eq!(
            encode_ao_form(&message),
            vec![
                ("from".to_owned(), "sms://1".to_owned()),
                ("to".to_owned(), "sms://2".to_owned()),
                ("subject".to_owned(), "hello".to_owned()),
                ("body".to_owned(), "hi!".to_owned()),
                ("token".to_owned(), "my_token".to_owned()),
                ("country".to_owned(), "ar".to_owned()),
            ]
        );
    }

    #[test]
    fn encode_ao_form_skips_absent_fields_and_reserved_custom_names() {
        let message = AoMessage::new(Address::new("sms://2").unwrap()).custom("to", "sms://9");
        assert_eq!(
            encode_ao_form(&message),
            vec![("to".to_owned(), "sms://2".to_owned())]
        );
    }

    #[test]
    fn encode_ao_batch_json_is_array_of_objects() {
        let second = AoMessage::new(Address::new("sms://3").unwrap()).body("bye");
        let encoded = encode_ao_batch_json(&[message(), second]);
        assert_eq!(
            encoded,
            json!([
                {"from": "sms://1", "to": "sms://2", "subject": "hello", "body": "hi!"},
                {"to": "sms://3", "body": "bye"}
            ])
        );
    }

    #[test]
    fn decode_send_ao_response_reads_nuntium_headers() {
        let headers = BTreeMap::from([
            (ID_HEADER.to_owned(), "42".to_owned()),
            (TOKEN_HEADER.to_owned(), "tok".to_owned()),
            (GUID_HEADER.to_owned(), "guid-1".to_owned()),
            ("content-type".to_owned(), "text/plain".to_owned()),
        ]);
        let response = decode_send_ao_response(200, &headers, String::new());
        assert_eq!(response.id.as_deref(), Some("42"));
        assert_eq!(response.token.as_deref(), Some("tok"));
        assert_eq!(response.guid.as_deref(), Some("guid-1"));
    }

    #[test]
    fn decode_send_ao_response_without_headers_is_none() {
        let response = decode_send_ao_response(200, &BTreeMap::new(), "ok".to_owned());
        assert_eq!(response.id, None);
        assert_eq!(response.token, None);
        assert_eq!(response.guid, None);
        assert_eq!(response.body, "ok");
    }

    #[test]
    fn decode_ao_records_maps_payload() {
        let json = r#"
        [
          {"guid": "g1", "token": "tok", "from": "sms://1", "to": "sms://2",
           "subject": null, "body": "hi!", "state": "delivered", "tries": 1}
        ]
        "#;
        let records = decode_ao_records(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].guid.as_deref(), Some("g1"));
        assert_eq!(records[0].subject, None);
        assert_eq!(records[0].body.as_deref(), Some("hi!"));
        assert_eq!(records[0].state.as_deref(), Some("delivered"));
        assert_eq!(records[0].attributes.get("tries"), Some(&json!(1)));
    }
}
