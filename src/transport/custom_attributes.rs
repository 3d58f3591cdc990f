use serde_json::Value;

use crate::domain::CustomAttributes;
use crate::transport::body::ResponseBody;

/// Only a JSON object counts as a set of attributes; strings, arrays and
/// scalars all mean "nothing stored for this address".
pub fn decode_custom_attributes(body: ResponseBody) -> Option<CustomAttributes> {
    match body {
        ResponseBody::Structured(Value::Object(attributes)) => Some(attributes),
        _ => None,
    }
}

/// Rails-style form encoding: lists become `name[]`, nested objects
/// become `name[key]`.
pub fn encode_custom_attributes_form(attributes: &CustomAttributes) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();
    for (name, value) in attributes {
        push_value(&mut params, name.clone(), value);
    }
    params
}

fn push_value(params: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => params.push((key, String::new())),
        Value::String(text) => params.push((key, text.clone())),
        Value::Bool(_) | Value::Number(_) => params.push((key, value.to_string())),
        Value::Array(items) => {
            let key = format!("{key}[]");
            for item in items {
                push_value(params, key.clone(), item);
            }
        }
        Value::Object(fields) => {
            for (name, field) in fields {
                push_value(params, format!("{key}[{name}]"), field);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decode_accepts_only_objects() {
        let attributes =
            decode_custom_attributes(ResponseBody::Structured(json!({"application": "foo"})))
                .unwrap();
        assert_eq!(attributes.get("application"), Some(&json!("foo")));

        assert_eq!(
            decode_custom_attributes(ResponseBody::Structured(json!(["a"]))),
            None
        );
        assert_eq!(
            decode_custom_attributes(ResponseBody::Text("not found".to_owned())),
            None
        );
        assert_eq!(
            decode_custom_attributes(ResponseBody::Structured(Value::Null)),
            None
        );
    }

    #[test]
    fn encode_flattens_lists_and_scalars() {
        let attributes = json!({
            "application": "foo",
            "carrier": ["a", "b"],
            "priority": 3,
            "geo": {"lat": 1.5}
        });
        let Value::Object(attributes) = attributes else {
            unreachable!()
        };

        assert_eq!(
            encode_custom_attributes_form(&attributes),
            vec![
                ("application".to_owned(), "foo".to_owned()),
                ("carrier[]".to_owned(), "a".to_owned()),
                ("carrier[]".to_owned(), "b".to_owned()),
                ("geo[lat]".to_owned(), "1.5".to_owned()),
                ("priority".to_owned(), "3".to_owned()),
            ]
        );
    }
}
