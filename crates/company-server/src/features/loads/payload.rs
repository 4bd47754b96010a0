//! Load request body decoding

use company_common::LoadRequest;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("records are not a valid JSON list: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request body must carry exactly one serialized record list, found {0}")]
    ListLength(usize),
}

/// Accepted shapes of a load request body
///
/// The object form is what the loader sends. A bare one-element list of the
/// serialized records is also accepted from older producers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LoadBody {
    Object(LoadRequest),
    List(Vec<String>),
}

impl LoadBody {
    /// The serialized record list
    pub fn into_records(self) -> Result<String, PayloadError> {
        match self {
            LoadBody::Object(request) => Ok(request.records),
            LoadBody::List(mut items) if items.len() == 1 => Ok(items.remove(0)),
            LoadBody::List(items) => Err(PayloadError::ListLength(items.len())),
        }
    }
}

/// Decode a serialized record list into individual record mappings.
///
/// The text is parsed as the contents of a JSON list, so both a bare
/// sequence of objects and a complete array are accepted. A complete array
/// therefore arrives nested one level deep; when the first element is itself
/// a list, that inner list is the record list. Producers serialize the array
/// before embedding it, and this unwrap compensates for that double encoding.
pub fn decode_records(raw: &str) -> Result<Vec<Value>, PayloadError> {
    let mut records: Vec<Value> = serde_json::from_str(&format!("[{}]", raw))?;

    if matches!(records.first(), Some(Value::Array(_))) {
        if let Value::Array(inner) = records.swap_remove(0) {
            records = inner;
        }
    }

    Ok(records)
}
