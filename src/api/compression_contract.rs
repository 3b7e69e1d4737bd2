use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{AlignedPoint, RawSample, RawTimestamp};
use crate::error::{ReviewError, ReviewResult};

use super::compression_config::{CompressionParameters, DeviationType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestSample {
    pub timestamp: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParameters {
    pub deviation_limit: f64,
    pub deviation_type: DeviationType,
}

/// Body POSTed to the compression endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionRequest {
    pub raw_data: Vec<RequestSample>,
    pub parameters: RequestParameters,
}

impl CompressionRequest {
    /// Builds a request from aligned raw points, timestamps encoded as ISO-8601.
    #[must_use]
    pub fn from_points(points: &[AlignedPoint], params: &CompressionParameters) -> Self {
        Self {
            raw_data: points
                .iter()
                .map(|point| RequestSample {
                    timestamp: point.time.to_iso_string(),
                    value: point.value,
                })
                .collect(),
            parameters: RequestParameters {
                deviation_limit: request_deviation_limit(params),
                deviation_type: params.compression_deviation_type,
            },
        }
    }

    pub fn to_json(&self) -> ReviewResult<String> {
        serde_json::to_string(self).map_err(|e| {
            ReviewError::InvalidData(format!("failed to serialize compression request: {e}"))
        })
    }
}

/// Validates a compression response and converts it into samples.
///
/// The payload must be an array whose elements all carry `timestamp` and
/// `value`. Numeric strings are accepted as values; any other non-number value
/// becomes NaN so alignment drops the point. An empty array is valid.
pub fn parse_compression_response(payload: &Value) -> ReviewResult<Vec<RawSample>> {
    let Some(items) = payload.as_array() else {
        return Err(ReviewError::ResponseFormat(format!(
            "expected an array, got {}",
            json_kind(payload)
        )));
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let Some(fields) = item.as_object() else {
                return Err(ReviewError::ResponseFormat(format!(
                    "element {index} is {}, expected an object",
                    json_kind(item)
                )));
            };
            let (Some(timestamp), Some(value)) = (fields.get("timestamp"), fields.get("value"))
            else {
                return Err(ReviewError::ResponseFormat(format!(
                    "element {index} is missing `timestamp` or `value`"
                )));
            };
            Ok(RawSample {
                timestamp: match timestamp {
                    Value::String(text) => RawTimestamp::Text(text.clone()),
                    other => RawTimestamp::Other(other.clone()),
                },
                value: numeric_value(value),
                segment_break: fields
                    .get("segmentBreak")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            })
        })
        .collect()
}

pub fn parse_compression_response_str(input: &str) -> ReviewResult<Vec<RawSample>> {
    let payload: Value = serde_json::from_str(input).map_err(|e| {
        ReviewError::ResponseFormat(format!("response is not valid json: {e}"))
    })?;
    parse_compression_response(&payload)
}

/// Compression limit, or the exception-filter limit when the former is unset (zero).
fn request_deviation_limit(params: &CompressionParameters) -> f64 {
    [
        params.compression_deviation_limit,
        params.exception_filter_deviation_limit,
    ]
    .into_iter()
    .find(|limit| *limit != 0.0 && !limit.is_nan())
    .unwrap_or(0.0)
}

fn numeric_value(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => text.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{CompressionRequest, parse_compression_response, parse_compression_response_str};
    use crate::api::CompressionParameters;
    use crate::core::{AlignedPoint, CanonicalInstant, RawTimestamp};
    use crate::error::ReviewError;

    #[test]
    fn request_uses_camel_case_and_lowercase_deviation_type() {
        let point = AlignedPoint::new(
            CanonicalInstant::from_epoch_millis(1_739_836_800_000).expect("instant"),
            12.5,
        );
        let json = CompressionRequest::from_points(&[point], &CompressionParameters::default())
            .to_json()
            .expect("json");
        assert_eq!(
            json,
            r#"{"rawData":[{"timestamp":"2025-02-18T00:00:00.000Z","value":12.5}],"parameters":{"deviationLimit":2.0,"deviationType":"percentage"}}"#
        );
    }

    #[test]
    fn zero_compression_limit_falls_back_to_exception_filter_limit() {
        let params = CompressionParameters {
            compression_deviation_limit: 0.0,
            exception_filter_deviation_limit: 1.5,
            ..CompressionParameters::default()
        };
        let request = CompressionRequest::from_points(&[], &params);
        assert_eq!(request.parameters.deviation_limit, 1.5);

        let both_zero = CompressionParameters {
            exception_filter_deviation_limit: 0.0,
            ..params
        };
        let request = CompressionRequest::from_points(&[], &both_zero);
        assert_eq!(request.parameters.deviation_limit, 0.0);
    }

    #[test]
    fn non_array_payload_is_a_format_error() {
        let err = parse_compression_response(&json!({"error": "boom"})).expect_err("object");
        assert!(matches!(err, ReviewError::ResponseFormat(_)));
    }

    #[test]
    fn element_missing_value_is_a_format_error() {
        let err = parse_compression_response(&json!([{"timestamp": "2025-02-18T00:00:00Z"}]))
            .expect_err("missing value");
        assert!(format!("{err}").contains("element 0"));
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_compression_response_str("[]").expect("empty").is_empty());
    }

    #[test]
    fn values_are_coerced_and_flags_read() {
        let samples = parse_compression_response(&json!([
            {"timestamp": "2025-02-18T00:00:00Z", "value": "7.5"},
            {"timestamp": 12, "value": null, "segmentBreak": true}
        ]))
        .expect("samples");
        assert_eq!(samples[0].value, 7.5);
        assert!(samples[1].value.is_nan());
        assert!(samples[1].segment_break);
        assert!(matches!(samples[1].timestamp, RawTimestamp::Other(_)));
    }

    #[test]
    fn invalid_json_is_a_format_error() {
        let err = parse_compression_response_str("not json").expect_err("invalid");
        assert!(matches!(err, ReviewError::ResponseFormat(_)));
    }
}
