//! Lenient field decoders for use with `#[serde(deserialize_with = ...)]`
//!
//! The loader ships every CSV field as text, while single-create callers
//! send proper JSON numbers. Integer fields accept both forms.

use serde::{de::Error as _, Deserialize, Deserializer};

use super::SENTINEL_REFERENCE;

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrText {
    Int(i64),
    Text(String),
}

fn narrow<E: serde::de::Error>(value: i64) -> Result<i32, E> {
    i32::try_from(value).map_err(|_| E::custom(format!("integer {} is out of range", value)))
}

fn parse_text<E: serde::de::Error>(text: &str) -> Result<i32, E> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| E::custom(format!("invalid integer: {:?}", text)))
        .and_then(narrow)
}

/// Decode an `i32` from a JSON number or a decimal string.
pub fn int<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    match IntOrText::deserialize(deserializer)? {
        IntOrText::Int(value) => narrow(value),
        IntOrText::Text(text) => parse_text(&text),
    }
}

/// Decode a reference id; `null` and `""` become [`SENTINEL_REFERENCE`].
pub fn reference<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IntOrText>::deserialize(deserializer)? {
        None => Ok(SENTINEL_REFERENCE),
        Some(IntOrText::Int(value)) => narrow(value),
        Some(IntOrText::Text(text)) if text.trim().is_empty() => Ok(SENTINEL_REFERENCE),
        Some(IntOrText::Text(text)) => parse_text(&text),
    }
    .map_err(|e: D::Error| D::Error::custom(format!("reference field: {}", e)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "int")]
        id: i32,
        #[serde(deserialize_with = "reference", default = "sentinel")]
        job_id: i32,
    }

    fn sentinel() -> i32 {
        SENTINEL_REFERENCE
    }

    #[test]
    fn test_int_accepts_number_and_text() {
        let probe: Probe = serde_json::from_value(json!({"id": 7, "job_id": "3"})).unwrap();
        assert_eq!(probe.id, 7);
        assert_eq!(probe.job_id, 3);

        let probe: Probe = serde_json::from_value(json!({"id": " 12 ", "job_id": 4})).unwrap();
        assert_eq!(probe.id, 12);
        assert_eq!(probe.job_id, 4);
    }

    #[test]
    fn test_reference_sentinel() {
        let probe: Probe = serde_json::from_value(json!({"id": 1, "job_id": ""})).unwrap();
        assert_eq!(probe.job_id, SENTINEL_REFERENCE);

        let probe: Probe = serde_json::from_value(json!({"id": 1, "job_id": null})).unwrap();
        assert_eq!(probe.job_id, SENTINEL_REFERENCE);

        let probe: Probe = serde_json::from_value(json!({"id": 1, "job_id": -1})).unwrap();
        assert_eq!(probe.job_id, SENTINEL_REFERENCE);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_value::<Probe>(json!({"id": "abc", "job_id": 1})).is_err());
        assert!(serde_json::from_value::<Probe>(json!({"id": "", "job_id": 1})).is_err());
        assert!(serde_json::from_value::<Probe>(json!({"id": 1.5, "job_id": 1})).is_err());
        assert!(
            serde_json::from_value::<Probe>(json!({"id": 4_294_967_296_i64, "job_id": 1})).is_err()
        );
    }

    proptest! {
        #[test]
        fn prop_text_and_number_agree(value in any::<i32>()) {
            let from_number: Probe =
                serde_json::from_value(json!({"id": value, "job_id": value})).unwrap();
            let from_text: Probe =
                serde_json::from_value(json!({"id": value.to_string(), "job_id": value.to_string()}))
                    .unwrap();
            prop_assert_eq!(from_number.id, from_text.id);
            prop_assert_eq!(from_number.job_id, from_text.job_id);
        }
    }
}
