// Copyright 2026 the Crowdwatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Metric frame decoding with default substitution.
//!
//! Each pushed payload is a JSON object with an optional nested `crowd`
//! section (and, from the same producer, an optional `movement` section).
//! [`decode`] parses the payload and produces a [`MetricFrame`] that is always
//! fully populated: a field or section that is absent, `null`, or of the
//! wrong type is coerced to its documented default in a single auditable
//! step, never propagated as a missing value. Unknown sections (e.g.
//! `abnormal`) are ignored.
//!
//! A payload that is not well-formed JSON, or whose top level is not an
//! object, yields [`DecodeError`]. That error is terminal for the one message
//! only; the channel keeps delivering and prior state stays untouched.

use alloc::string::String;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use thiserror::Error;

/// Default label shown for the `time` field when the producer omits it.
pub const DEFAULT_TIME_LABEL: &str = "--";

/// A pushed payload could not be decoded into a [`MetricFrame`].
///
/// Dropping the message is the whole policy: display state and series history
/// are left untouched and the channel continues with the next message.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not well-formed JSON of the expected shape.
    #[error("payload is not a well-formed metric object: {0}")]
    Malformed(serde_json::Error),
    /// The payload parsed as JSON, but its top level is not an object.
    #[error("payload top level is not a metric object")]
    NotAnObject,
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err)
    }
}

/// One fully-decoded, fully-defaulted metric observation.
///
/// Invariant: every field is populated after [`decode`]; defaults are
/// substituted during decoding, so downstream code never sees a missing
/// value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricFrame {
    /// Producer-side timestamp label, used only for the "last update"
    /// display. Default `"--"`.
    pub time: String,
    /// Number of people currently detected. Default `0`.
    pub human_count: u32,
    /// Number of active safety violations. Default `0`.
    pub violation_count: u32,
    /// Whether someone entered a restricted area. Default `false`.
    pub restricted_entry: bool,
    /// Whether abnormal crowd activity was flagged. Default `false`.
    pub abnormal_activity: bool,
    /// Number of movement tracks currently followed. Default `0`.
    pub track_count: u32,
}

impl MetricFrame {
    fn from_raw(raw: RawPayload) -> Self {
        let crowd = raw.crowd.unwrap_or_default();
        let movement = raw.movement.unwrap_or_default();
        Self {
            time: crowd
                .time
                .unwrap_or_else(|| String::from(DEFAULT_TIME_LABEL)),
            human_count: crowd.human_count.unwrap_or(0),
            violation_count: crowd.violation_count.unwrap_or(0),
            restricted_entry: crowd.restricted_entry.unwrap_or(false),
            abnormal_activity: crowd.abnormal_activity.unwrap_or(false),
            track_count: movement.track_count.unwrap_or(0),
        }
    }
}

/// Decodes one raw text payload into a fully-populated [`MetricFrame`].
///
/// # Errors
///
/// Returns [`DecodeError`] if the payload is not well-formed JSON or its top
/// level is not an object. Anything below the top level is not an error:
/// absent, `null`, or wrong-typed sections and fields coerce to their
/// defaults.
pub fn decode(payload: &str) -> Result<MetricFrame, DecodeError> {
    let value: Value = serde_json::from_str(payload)?;
    if !value.is_object() {
        return Err(DecodeError::NotAnObject);
    }
    let raw: RawPayload = serde_json::from_value(value)?;
    Ok(MetricFrame::from_raw(raw))
}

// Raw shapes as the producer sends them. Sections and leaf fields all go
// through the lenient deserializers below.

#[derive(Debug, Default, Deserialize)]
struct RawPayload {
    #[serde(default, deserialize_with = "lenient_section")]
    crowd: Option<RawCrowd>,
    #[serde(default, deserialize_with = "lenient_section")]
    movement: Option<RawMovement>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCrowd {
    #[serde(default, deserialize_with = "lenient_label")]
    time: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    human_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    violation_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient_flag")]
    restricted_entry: Option<bool>,
    #[serde(default, deserialize_with = "lenient_flag")]
    abnormal_activity: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMovement {
    #[serde(default, deserialize_with = "lenient_count")]
    track_count: Option<u32>,
}

/// Accepts any JSON value; yields `Some` only for an object. A wrong-typed
/// section coerces to its defaults the same way a wrong-typed leaf does.
fn lenient_section<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(serde::de::Error::custom)
}

/// Accepts any JSON value; yields `Some` only for a non-empty string.
fn lenient_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .filter(|s| !s.is_empty())
        .map(String::from))
}

/// Accepts any JSON value; yields `Some` only for a non-negative integer
/// that fits in `u32`.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_u64().and_then(|n| u32::try_from(n).ok()))
}

/// Accepts any JSON value; yields `Some` only for a boolean.
fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_bool())
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString as _;

    use super::*;

    #[test]
    fn empty_object_yields_all_defaults() {
        let frame = decode("{}").expect("empty object is well-formed");
        assert_eq!(frame.time, DEFAULT_TIME_LABEL);
        assert_eq!(frame.human_count, 0);
        assert_eq!(frame.violation_count, 0);
        assert!(!frame.restricted_entry);
        assert!(!frame.abnormal_activity);
        assert_eq!(frame.track_count, 0);
    }

    #[test]
    fn empty_crowd_section_yields_all_defaults() {
        let frame = decode(r#"{"crowd":{}}"#).expect("empty section is well-formed");
        assert_eq!(frame, decode("{}").expect("empty object"));
    }

    #[test]
    fn default_substitution_is_idempotent() {
        let a = decode("{}").expect("first decode");
        let b = decode("{}").expect("second decode");
        assert_eq!(a, b, "two decodes of the same payload are field-wise equal");
    }

    #[test]
    fn fully_populated_payload_decodes_verbatim() {
        let payload = r#"{"crowd":{"time":"10:00:01","human_count":42,"violation_count":2,"restricted_entry":false,"abnormal_activity":false}}"#;
        let frame = decode(payload).expect("valid payload");
        assert_eq!(frame.time, "10:00:01");
        assert_eq!(frame.human_count, 42);
        assert_eq!(frame.violation_count, 2);
        assert!(!frame.restricted_entry);
        assert!(!frame.abnormal_activity);
    }

    #[test]
    fn movement_section_supplies_track_count() {
        let frame = decode(r#"{"movement":{"track_count":7}}"#).expect("valid payload");
        assert_eq!(frame.track_count, 7);
    }

    #[test]
    fn unknown_sections_are_ignored() {
        let frame =
            decode(r#"{"crowd":{"human_count":3},"abnormal":{"updated":1700000000.5}}"#)
                .expect("extra sections do not fail decoding");
        assert_eq!(frame.human_count, 3);
    }

    #[test]
    fn null_fields_coerce_to_defaults() {
        let payload = r#"{"crowd":{"time":null,"human_count":null,"violation_count":null,"restricted_entry":null,"abnormal_activity":null}}"#;
        let frame = decode(payload).expect("nulls are well-formed");
        assert_eq!(frame, decode("{}").expect("empty object"));
    }

    #[test]
    fn null_sections_coerce_to_defaults() {
        let frame = decode(r#"{"crowd":null,"movement":null}"#).expect("null sections");
        assert_eq!(frame, decode("{}").expect("empty object"));
    }

    #[test]
    fn wrong_typed_sections_coerce_to_defaults() {
        let frame = decode(r#"{"crowd":5,"movement":"tracks"}"#)
            .expect("wrong-typed sections are well-formed JSON");
        assert_eq!(frame, decode("{}").expect("empty object"));
    }

    #[test]
    fn wrong_typed_section_does_not_drop_the_other() {
        let frame = decode(r#"{"crowd":[1,2],"movement":{"track_count":4}}"#)
            .expect("array section coerces, object section decodes");
        assert_eq!(frame.human_count, 0);
        assert_eq!(frame.track_count, 4);
    }

    #[test]
    fn wrong_typed_fields_coerce_to_defaults() {
        let payload = r#"{"crowd":{"time":7,"human_count":"many","violation_count":true,"restricted_entry":"yes","abnormal_activity":1}}"#;
        let frame = decode(payload).expect("wrong types are well-formed JSON");
        assert_eq!(frame, decode("{}").expect("empty object"));
    }

    #[test]
    fn negative_and_fractional_counts_coerce_to_zero() {
        let frame = decode(r#"{"crowd":{"human_count":-3,"violation_count":2.5}}"#)
            .expect("numbers are well-formed");
        assert_eq!(frame.human_count, 0, "negative count defaults");
        assert_eq!(frame.violation_count, 0, "fractional count defaults");
    }

    #[test]
    fn empty_time_string_coerces_to_default() {
        let frame = decode(r#"{"crowd":{"time":""}}"#).expect("empty string is well-formed");
        assert_eq!(frame.time, DEFAULT_TIME_LABEL);
    }

    #[test]
    fn malformed_payload_is_a_decode_error() {
        let err = decode("not json at all").expect_err("garbage must not decode");
        assert!(
            err.to_string().contains("not a well-formed metric object"),
            "error message names the failure: {err}"
        );
    }

    #[test]
    fn non_object_payload_is_a_decode_error() {
        for payload in ["42", "[]", r#""text""#, "null", "true"] {
            let err = decode(payload).expect_err("only an object is a metric payload");
            assert!(
                matches!(err, DecodeError::NotAnObject),
                "{payload} must be rejected as a non-object"
            );
        }
    }
}
