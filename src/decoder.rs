// Hargassner - Boiler telemetry client
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Telemetry line decoding
//!
//! Turns one `pm ...` line into named, typed values using a compiled
//! [`Schema`]. Decoding degrades per parameter: a missing or malformed token
//! drops that parameter only.

use crate::error::DecodeError;
use crate::schema::{ChannelKind, ParameterDefinition, Schema};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Marker that opens every telemetry line
pub const DEFAULT_MARKER: &str = "pm";

/// Value payload of a telemetry line, if `line` is one
///
/// A line qualifies when, after trimming, it starts with `marker` followed
/// by a space.
pub fn telemetry_payload<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    line.trim()
        .strip_prefix(marker)
        .and_then(|rest| rest.strip_prefix(' '))
}

/// A decoded value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Digital channel state
    Bool(bool),
    /// Analog token without decimal point
    ///
    /// Tokens are parsed as `i64`. A token outside that range is not
    /// decodable and its parameter is omitted from the sample. Digital
    /// slots are parsed the same way.
    Integer(i64),
    /// Analog token with decimal point
    Float(f64),
}

impl Value {
    /// Numeric view (booleans map to 0/1)
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Bool(b) => {
                if b {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Integer(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    /// Boolean view of a digital value
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Integer view of an analog value
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Integer(i) => Some(i),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
        }
    }
}

/// One decoded parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedValue {
    /// Typed value
    pub value: Value,
    /// Unit of measurement
    pub unit: Option<String>,
    /// Human-readable label
    pub description: String,
}

/// All parameters decoded from one line
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DecodedSample {
    /// Decoded parameters keyed by name
    pub values: BTreeMap<String, DecodedValue>,
    /// Value tokens present in the line
    pub token_count: usize,
    /// Value tokens the schema expects
    pub expected_token_count: usize,
}

impl DecodedSample {
    /// Look up a decoded parameter
    pub fn get(&self, name: &str) -> Option<&DecodedValue> {
        self.values.get(name)
    }

    /// Look up a decoded value
    pub fn value(&self, name: &str) -> Option<Value> {
        self.values.get(name).map(|v| v.value)
    }

    /// Number of decoded parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing was decoded
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check if the line carried exactly the expected number of tokens
    pub fn is_complete(&self) -> bool {
        self.token_count == self.expected_token_count
    }

    /// Iterate decoded parameters in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DecodedValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Decodes telemetry lines against a schema
#[derive(Debug, Clone)]
pub struct LineDecoder {
    schema: Arc<Schema>,
    marker: String,
}

impl LineDecoder {
    /// Create a decoder for the default `pm` marker
    pub fn new(schema: Arc<Schema>) -> Self {
        Self::with_marker(schema, DEFAULT_MARKER)
    }

    /// Create a decoder for a custom marker
    pub fn with_marker(schema: Arc<Schema>, marker: impl Into<String>) -> Self {
        Self {
            schema,
            marker: marker.into(),
        }
    }

    /// Schema used for decoding
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Telemetry marker
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Decode one line
    ///
    /// Token-count mismatches are tolerated: every parameter whose slot is
    /// present is decoded, the rest are omitted.
    pub fn decode(&self, line: &str) -> Result<DecodedSample, DecodeError> {
        let payload = telemetry_payload(line, &self.marker).ok_or(DecodeError::NotTelemetry)?;
        let tokens: Vec<&str> = payload.split_whitespace().collect();
        let expected = self.schema.expected_token_count();

        if tokens.len() != expected {
            debug!(
                "Message length mismatch: expected {}, got {}",
                expected,
                tokens.len()
            );
        }

        let values: BTreeMap<String, DecodedValue> = self
            .schema
            .parameters()
            .filter_map(|def| {
                extract(def, &tokens).map(|value| {
                    (
                        def.name.clone(),
                        DecodedValue {
                            value,
                            unit: def.unit().map(str::to_string),
                            description: def.description.clone(),
                        },
                    )
                })
            })
            .collect();

        if values.is_empty() {
            return Err(DecodeError::NoValues {
                tokens: tokens.len(),
                expected,
            });
        }

        Ok(DecodedSample {
            values,
            token_count: tokens.len(),
            expected_token_count: expected,
        })
    }
}

fn extract(def: &ParameterDefinition, tokens: &[&str]) -> Option<Value> {
    let raw = tokens.get(def.slot_index)?;
    let value = match def.kind {
        ChannelKind::Analog { .. } => parse_analog(raw),
        ChannelKind::Digital { bit_mask } => raw
            .parse::<i64>()
            .ok()
            .map(|packed| Value::Bool(packed & i64::from(bit_mask) != 0)),
    };
    if value.is_none() {
        debug!(
            "Failed to parse value for {} at index {}: {:?}",
            def.name, def.slot_index, raw
        );
    }
    value
}

fn parse_analog(raw: &str) -> Option<Value> {
    if raw.contains('.') {
        raw.parse::<f64>().ok().map(Value::Float)
    } else {
        raw.parse::<i64>().ok().map(Value::Integer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Language;
    use crate::schema::SchemaCompiler;
    use approx::assert_relative_eq;

    const TEMPLATE: &str = "<DAQPRJ><ANALOG>\
        <CHANNEL id='0' name='ZK'/>\
        <CHANNEL id='1' name='TK' unit='°C'/>\
        <CHANNEL id='2' name='TRG'/>\
        </ANALOG><DIGITAL>\
        <CHANNEL id='0' bit='0' name='Störung'/>\
        <CHANNEL id='0' bit='2' name='Fuellstand'/>\
        </DIGITAL></DAQPRJ>";

    fn decoder() -> LineDecoder {
        let schema = SchemaCompiler::new(Language::En)
            .compile_template(TEMPLATE)
            .unwrap();
        LineDecoder::new(Arc::new(schema))
    }

    #[test]
    fn test_telemetry_payload() {
        assert_eq!(telemetry_payload("  pm 1 2\r", "pm"), Some("1 2"));
        assert_eq!(telemetry_payload("pm", "pm"), None);
        assert_eq!(telemetry_payload("pmx 1", "pm"), None);
        assert_eq!(telemetry_payload("z 1 2", "pm"), None);
    }

    #[test]
    fn test_decode_full_line() {
        let sample = decoder().decode("pm 7 55.3 180 5").unwrap();

        assert!(sample.is_complete());
        assert_eq!(sample.len(), 5);
        assert_eq!(sample.value("ZK"), Some(Value::Integer(7)));
        assert_relative_eq!(sample.value("TK").unwrap().as_f64(), 55.3);
        assert_eq!(sample.get("TK").unwrap().unit.as_deref(), Some("°C"));
        assert_eq!(sample.value("TRG"), Some(Value::Integer(180)));
        assert_eq!(sample.value("Störung"), Some(Value::Bool(true)));
        assert_eq!(sample.value("Fuellstand"), Some(Value::Bool(true)));
    }

    #[test]
    fn test_digital_bit_masking() {
        let d = decoder();
        // 3 = 0b011: bit 2 clear
        let sample = d.decode("pm 0 0 0 3").unwrap();
        assert_eq!(sample.value("Fuellstand"), Some(Value::Bool(false)));
        assert_eq!(sample.value("Störung"), Some(Value::Bool(true)));
    }

    #[test]
    fn test_malformed_token_omitted() {
        let sample = decoder().decode("pm 7 abc 180 x").unwrap();
        assert!(sample.get("TK").is_none());
        assert!(sample.get("Störung").is_none());
        assert_eq!(sample.value("ZK"), Some(Value::Integer(7)));
        assert_eq!(sample.value("TRG"), Some(Value::Integer(180)));
    }

    #[test]
    fn test_short_line_omits_out_of_range() {
        let sample = decoder().decode("pm 7 55.3 180").unwrap();
        assert!(!sample.is_complete());
        assert_eq!(sample.token_count, 3);
        assert_eq!(sample.len(), 3);
        assert!(sample.get("Störung").is_none());
        assert!(sample.get("Fuellstand").is_none());
    }

    #[test]
    fn test_long_line_still_decodes() {
        let sample = decoder().decode("pm 7 55.3 180 1 99 99").unwrap();
        assert_eq!(sample.token_count, 6);
        assert_eq!(sample.len(), 5);
    }

    #[test]
    fn test_non_telemetry_rejected() {
        assert_eq!(
            decoder().decode("z 7 55.3 180 1"),
            Err(DecodeError::NotTelemetry)
        );
    }

    #[test]
    fn test_nothing_decodable() {
        assert_eq!(
            decoder().decode("pm foo bar"),
            Err(DecodeError::NoValues {
                tokens: 2,
                expected: 4
            })
        );
    }

    #[test]
    fn test_float_requires_decimal_point() {
        assert_eq!(parse_analog("42"), Some(Value::Integer(42)));
        assert_eq!(parse_analog("-3"), Some(Value::Integer(-3)));
        assert_eq!(parse_analog("42.5"), Some(Value::Float(42.5)));
        assert_eq!(parse_analog("1e3"), None);
        assert_eq!(parse_analog("abc"), None);
    }

    #[test]
    fn test_integer_outside_i64_omitted() {
        assert_eq!(parse_analog("9223372036854775807"), Some(Value::Integer(i64::MAX)));
        assert_eq!(parse_analog("9223372036854775808"), None);
        assert_eq!(parse_analog("-9223372036854775809"), None);

        let sample = decoder()
            .decode("pm 7 99999999999999999999 180 18446744073709551616")
            .unwrap();
        assert!(sample.get("TK").is_none());
        assert!(sample.get("Störung").is_none());
        assert_eq!(sample.value("TRG"), Some(Value::Integer(180)));
    }

    #[test]
    fn test_value_serializes_untagged() {
        assert_eq!(serde_json::to_string(&Value::Integer(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&Value::Float(55.5)).unwrap(), "55.5");
        assert_eq!(serde_json::to_string(&Value::Bool(true)).unwrap(), "true");
    }
}
