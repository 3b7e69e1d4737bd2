mod chart_data;
mod compression_config;
mod compression_contract;
mod compression_service;
mod data_sources;
mod label_text_formatter;
mod metrics;
mod review_session;
mod time_range;
mod viewport_clamp_controller;
mod viewport_validation;

pub use chart_data::{ChartData, SeriesData};
pub use compression_config::{
    COMPRESSION_DEVIATION_LIMIT_RANGE, COMPRESSION_SERVICE_KEY_ENV,
    COMPRESSION_SERVICE_TIMEOUT_ENV, COMPRESSION_SERVICE_URL_ENV, CompressionEndpointConfig,
    CompressionParameters, CompressionParametersPatch, DeviationType,
    EXCEPTION_FILTER_DEVIATION_LIMIT_RANGE, MAX_RESAMPLE_LIMIT_RANGE, MIN_RESAMPLE_LIMIT_RANGE,
    ParameterRange,
};
pub use compression_contract::{
    CompressionRequest, RequestParameters, RequestSample, parse_compression_response,
    parse_compression_response_str,
};
#[cfg(feature = "http-client")]
pub use compression_service::HttpCompressionService;
pub use compression_service::CompressionService;
pub use data_sources::{DataSourceCatalog, NumericField, SourceRow, short_name};
pub use label_text_formatter::{format_time_tick, format_time_tick_text};
pub use metrics::{BYTES_PER_SAMPLE, CompressionMetrics};
pub use review_session::{CompressionOutcome, EMPTY_RESULT_MESSAGE, ReviewSession, SavedReview};
pub use time_range::{full_range_labels, select_time_range};
pub use viewport_clamp_controller::{AxisChange, ViewportClampController, ViewportUpdate};
