use serde::Deserialize;

/// Scalar the server may send as JSON string, number or boolean.
///
/// Numbers keep their JSON spelling (`5` stays `"5"`, `0.5` stays `"0.5"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LenientString {
    String(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl LenientString {
    pub fn into_string(self) -> String {
        match self {
            Self::String(value) => value,
            Self::Number(value) => value.to_string(),
            Self::Bool(value) => value.to_string(),
        }
    }
}

/// Flatten an optional lenient field; `null` and missing both become `None`.
pub fn optional(value: Option<LenientString>) -> Option<String> {
    value.map(LenientString::into_string)
}
