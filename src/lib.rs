//! compression-viewer: client core for reviewing time-series compression.
//!
//! Raw samples are normalized to canonical UTC instants, aligned into sorted
//! series, and compared against the output of an external compression service.
//! Unbridged gaps in the compressed series become explicit breaks, and a
//! clamp controller keeps pan/zoom inside the padded data envelope.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod telemetry;

pub use api::{
    ChartData, CompressionOutcome, CompressionParameters, CompressionService,
    ViewportClampController, ViewportUpdate, ReviewSession,
};
pub use error::{ReviewError, ReviewResult};
