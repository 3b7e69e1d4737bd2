use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ReviewError, ReviewResult};

pub const COMPRESSION_SERVICE_URL_ENV: &str = "COMPRESSION_SERVICE_URL";
pub const COMPRESSION_SERVICE_KEY_ENV: &str = "COMPRESSION_SERVICE_KEY";
pub const COMPRESSION_SERVICE_TIMEOUT_ENV: &str = "COMPRESSION_SERVICE_TIMEOUT_SECS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviationType {
    #[serde(alias = "ABSOLUTE", alias = "Absolute")]
    Absolute,
    #[serde(alias = "PERCENTAGE", alias = "Percentage")]
    Percentage,
}

impl DeviationType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Absolute => "absolute",
            Self::Percentage => "percentage",
        }
    }
}

/// Inclusive range accepted for one tunable parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
}

impl ParameterRange {
    fn check(self, value: f64) -> ReviewResult<()> {
        if !value.is_finite() || value < self.min || value > self.max {
            return Err(ReviewError::InvalidData(format!(
                "{} must be between {} and {}",
                self.name, self.min, self.max
            )));
        }
        Ok(())
    }
}

pub const COMPRESSION_DEVIATION_LIMIT_RANGE: ParameterRange = ParameterRange {
    name: "compressionDeviationLimit",
    min: 0.0,
    max: 200.0,
};
pub const EXCEPTION_FILTER_DEVIATION_LIMIT_RANGE: ParameterRange = ParameterRange {
    name: "exceptionFilterDeviationLimit",
    min: 0.0,
    max: 100.0,
};
pub const MIN_RESAMPLE_LIMIT_RANGE: ParameterRange = ParameterRange {
    name: "minResampleLimit",
    min: 0.0,
    max: 3_600.0,
};
pub const MAX_RESAMPLE_LIMIT_RANGE: ParameterRange = ParameterRange {
    name: "maxResampleLimit",
    min: 0.0,
    max: 86_400.0,
};

/// Compression settings under review. Resample limits are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompressionParameters {
    pub compression_deviation_limit: f64,
    pub compression_deviation_type: DeviationType,
    pub exception_filter_deviation_limit: f64,
    pub exception_filter_deviation_type: DeviationType,
    pub min_resample_limit: f64,
    pub max_resample_limit: f64,
}

impl Default for CompressionParameters {
    fn default() -> Self {
        Self {
            compression_deviation_limit: 2.0,
            compression_deviation_type: DeviationType::Percentage,
            exception_filter_deviation_limit: 1.0,
            exception_filter_deviation_type: DeviationType::Absolute,
            min_resample_limit: 0.0,
            max_resample_limit: 5.0,
        }
    }
}

impl CompressionParameters {
    pub fn validate(self) -> ReviewResult<Self> {
        COMPRESSION_DEVIATION_LIMIT_RANGE.check(self.compression_deviation_limit)?;
        EXCEPTION_FILTER_DEVIATION_LIMIT_RANGE.check(self.exception_filter_deviation_limit)?;
        MIN_RESAMPLE_LIMIT_RANGE.check(self.min_resample_limit)?;
        MAX_RESAMPLE_LIMIT_RANGE.check(self.max_resample_limit)?;
        if self.max_resample_limit < self.min_resample_limit {
            return Err(ReviewError::InvalidData(format!(
                "max resample limit must be >= min interval {}",
                self.min_resample_limit
            )));
        }
        Ok(self)
    }

    /// Returns a copy with every field present in `patch` overwritten.
    #[must_use]
    pub fn patched(self, patch: &CompressionParametersPatch) -> Self {
        Self {
            compression_deviation_limit: patch
                .compression_deviation_limit
                .unwrap_or(self.compression_deviation_limit),
            compression_deviation_type: patch
                .compression_deviation_type
                .unwrap_or(self.compression_deviation_type),
            exception_filter_deviation_limit: patch
                .exception_filter_deviation_limit
                .unwrap_or(self.exception_filter_deviation_limit),
            exception_filter_deviation_type: patch
                .exception_filter_deviation_type
                .unwrap_or(self.exception_filter_deviation_type),
            min_resample_limit: patch.min_resample_limit.unwrap_or(self.min_resample_limit),
            max_resample_limit: patch.max_resample_limit.unwrap_or(self.max_resample_limit),
        }
    }
}

/// Partial parameter update, e.g. a parameter file or a saved review.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionParametersPatch {
    pub compression_deviation_limit: Option<f64>,
    pub compression_deviation_type: Option<DeviationType>,
    pub exception_filter_deviation_limit: Option<f64>,
    pub exception_filter_deviation_type: Option<DeviationType>,
    pub min_resample_limit: Option<f64>,
    pub max_resample_limit: Option<f64>,
}

impl CompressionParametersPatch {
    pub fn from_json_str(input: &str) -> ReviewResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input).map_err(|e| {
            ReviewError::InvalidData(format!("failed to read parameter json: {e}"))
        })?;
        if !value.is_object() {
            return Err(ReviewError::InvalidData(
                "invalid JSON parameter format".to_owned(),
            ));
        }
        serde_json::from_value(value).map_err(|e| {
            ReviewError::InvalidData(format!("failed to read parameter json: {e}"))
        })
    }
}

/// Location and credentials of the external compression endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionEndpointConfig {
    pub url: String,
    #[serde(default)]
    pub function_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl CompressionEndpointConfig {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            function_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }

    #[must_use]
    pub fn with_function_key(mut self, key: impl Into<String>) -> Self {
        self.function_key = Some(key.into());
        self
    }

    /// Reads `COMPRESSION_SERVICE_URL`, `COMPRESSION_SERVICE_KEY` and
    /// `COMPRESSION_SERVICE_TIMEOUT_SECS`.
    pub fn from_env() -> ReviewResult<Self> {
        let url = env::var(COMPRESSION_SERVICE_URL_ENV).map_err(|_| {
            ReviewError::InvalidData(format!("{COMPRESSION_SERVICE_URL_ENV} is not set"))
        })?;
        let timeout_secs = match env::var(COMPRESSION_SERVICE_TIMEOUT_ENV) {
            Ok(raw) => raw.trim().parse().map_err(|e| {
                ReviewError::InvalidData(format!(
                    "{COMPRESSION_SERVICE_TIMEOUT_ENV} must be a whole number of seconds: {e}"
                ))
            })?,
            Err(_) => default_timeout_secs(),
        };
        Self {
            url,
            function_key: env::var(COMPRESSION_SERVICE_KEY_ENV).ok(),
            timeout_secs,
        }
        .validate()
    }

    pub fn validate(self) -> ReviewResult<Self> {
        if !(self.url.starts_with("https://") || self.url.starts_with("http://")) {
            return Err(ReviewError::InvalidData(
                "compression endpoint url must be http(s)".to_owned(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ReviewError::InvalidData(
                "compression endpoint timeout must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CompressionEndpointConfig, CompressionParameters, CompressionParametersPatch,
        DeviationType,
    };

    #[test]
    fn defaults_are_valid() {
        assert!(CompressionParameters::default().validate().is_ok());
    }

    #[test]
    fn out_of_range_limit_names_the_parameter() {
        let params = CompressionParameters {
            compression_deviation_limit: 250.0,
            ..CompressionParameters::default()
        };
        let err = params.validate().expect_err("out of range");
        assert!(format!("{err}").contains("compressionDeviationLimit must be between 0 and 200"));
    }

    #[test]
    fn max_resample_below_min_is_rejected() {
        let params = CompressionParameters {
            min_resample_limit: 10.0,
            max_resample_limit: 5.0,
            ..CompressionParameters::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn patch_overwrites_only_present_fields() {
        let patch = CompressionParametersPatch::from_json_str(
            r#"{"compressionDeviationLimit": 4.5, "exceptionFilterDeviationType": "PERCENTAGE"}"#,
        )
        .expect("patch");
        let params = CompressionParameters::default().patched(&patch);
        assert_eq!(params.compression_deviation_limit, 4.5);
        assert_eq!(
            params.exception_filter_deviation_type,
            DeviationType::Percentage
        );
        assert_eq!(params.max_resample_limit, 5.0);
    }

    #[test]
    fn non_object_patch_is_rejected() {
        let err = CompressionParametersPatch::from_json_str("[1, 2]").expect_err("array");
        assert!(format!("{err}").contains("invalid JSON parameter format"));
    }

    #[test]
    fn endpoint_requires_http_url() {
        assert!(CompressionEndpointConfig::new("ftp://host").validate().is_err());
        assert!(
            CompressionEndpointConfig::new("https://example.test/api/compressdata")
                .validate()
                .is_ok()
        );
    }
}
