use serde_json::Value;

use crate::error::ReviewResult;

use super::compression_contract::CompressionRequest;

/// External compression endpoint.
///
/// Implementations return the raw JSON payload; shape validation happens in
/// [`super::parse_compression_response`] so every transport shares it.
pub trait CompressionService {
    fn compress(&self, request: &CompressionRequest) -> ReviewResult<Value>;
}

impl<F> CompressionService for F
where
    F: Fn(&CompressionRequest) -> ReviewResult<Value>,
{
    fn compress(&self, request: &CompressionRequest) -> ReviewResult<Value> {
        self(request)
    }
}

#[cfg(feature = "http-client")]
pub use http::HttpCompressionService;

#[cfg(feature = "http-client")]
mod http {
    use serde_json::Value;
    use tracing::{debug, warn};

    use crate::api::compression_config::CompressionEndpointConfig;
    use crate::api::compression_contract::CompressionRequest;
    use crate::error::{ReviewError, ReviewResult};

    use super::CompressionService;

    /// Blocking HTTP client for the compression endpoint.
    pub struct HttpCompressionService {
        client: reqwest::blocking::Client,
        config: CompressionEndpointConfig,
    }

    impl HttpCompressionService {
        pub fn new(config: CompressionEndpointConfig) -> ReviewResult<Self> {
            let config = config.validate()?;
            let client = reqwest::blocking::Client::builder()
                .timeout(config.timeout())
                .build()
                .map_err(|e| ReviewError::Transport(format!("reqwest client error: {e}")))?;
            Ok(Self { client, config })
        }

        pub fn from_env() -> ReviewResult<Self> {
            Self::new(CompressionEndpointConfig::from_env()?)
        }
    }

    impl CompressionService for HttpCompressionService {
        fn compress(&self, request: &CompressionRequest) -> ReviewResult<Value> {
            let mut call = self.client.post(&self.config.url).json(request);
            if let Some(key) = &self.config.function_key {
                call = call.query(&[("code", key.as_str())]);
            }
            debug!(
                points = request.raw_data.len(),
                url = %self.config.url,
                "posting compression request"
            );

            let response = call
                .send()
                .map_err(|e| ReviewError::Transport(format!("compression request error: {e}")))?;
            let status = response.status();
            if !status.is_success() {
                let details = response.text().unwrap_or_default();
                warn!(status = status.as_u16(), "compression endpoint returned an error");
                return Err(ReviewError::Transport(format!(
                    "HTTP error! Status: {}, Details: {details}",
                    status.as_u16()
                )));
            }

            response
                .json()
                .map_err(|e| ReviewError::ResponseFormat(format!("response decode error: {e}")))
        }
    }
}
