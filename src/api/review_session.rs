use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::core::{
    AlignedPoint, ChartPoint, RawDataset, RawSample, ViewportTuning, align, align_samples,
    reconcile,
};
use crate::error::{ReviewError, ReviewResult};

use super::chart_data::ChartData;
use super::compression_config::{CompressionParameters, CompressionParametersPatch};
use super::compression_contract::{CompressionRequest, parse_compression_response};
use super::compression_service::CompressionService;
use super::metrics::CompressionMetrics;
use super::time_range::{full_range_labels, select_time_range};
use super::viewport_clamp_controller::ViewportClampController;

pub const EMPTY_RESULT_MESSAGE: &str =
    "No data points remained after compression. Try adjusting the parameters.";

/// Result of a compression attempt that reached the service and parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompressionOutcome {
    Compressed { points: usize, breaks: usize },
    /// The service returned no usable points; the compressed chart is cleared.
    Empty,
}

/// A previously saved review: raw data, optional compressed data, parameters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SavedReview {
    pub name: String,
    #[serde(default)]
    pub parameters: Option<CompressionParametersPatch>,
    pub raw: RawDataset,
    #[serde(default)]
    pub compressed: Option<RawDataset>,
}

/// Caller-owned state of one review: loaded data, parameters, chart payload.
///
/// All sequence-level failures return before any field is touched, so a failed
/// load or compression leaves the previously rendered state intact.
#[derive(Debug)]
pub struct ReviewSession {
    tuning: ViewportTuning,
    params: CompressionParameters,
    last_params: Option<CompressionParameters>,
    source_name: Option<String>,
    full: RawDataset,
    active: RawDataset,
    raw_points: Vec<AlignedPoint>,
    compressed_points: Vec<ChartPoint>,
    chart: ChartData,
    viewport: Option<ViewportClampController>,
    message: Option<String>,
}

struct RenderState {
    chart: ChartData,
    viewport: Option<ViewportClampController>,
}

impl ReviewSession {
    pub fn new(tuning: ViewportTuning) -> ReviewResult<Self> {
        Ok(Self {
            tuning: tuning.validate()?,
            params: CompressionParameters::default(),
            last_params: None,
            source_name: None,
            full: RawDataset::default(),
            active: RawDataset::default(),
            raw_points: Vec::new(),
            compressed_points: Vec::new(),
            chart: ChartData::default(),
            viewport: None,
            message: None,
        })
    }

    /// Starts a session from parameters the caller kept from an earlier one.
    pub fn with_last_params(
        tuning: ViewportTuning,
        last_params: CompressionParameters,
    ) -> ReviewResult<Self> {
        let mut session = Self::new(tuning)?;
        session.set_params(last_params)?;
        session.last_params = Some(session.params);
        Ok(session)
    }

    #[must_use]
    pub fn params(&self) -> CompressionParameters {
        self.params
    }

    pub fn set_params(&mut self, params: CompressionParameters) -> ReviewResult<()> {
        self.params = params.validate()?;
        Ok(())
    }

    pub fn apply_params_patch(&mut self, patch: &CompressionParametersPatch) -> ReviewResult<()> {
        self.set_params(self.params.patched(patch))
    }

    /// Parameters of the last successful compression or loaded review.
    #[must_use]
    pub fn last_params(&self) -> Option<CompressionParameters> {
        self.last_params
    }

    #[must_use]
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn raw_points(&self) -> &[AlignedPoint] {
        &self.raw_points
    }

    #[must_use]
    pub fn compressed_points(&self) -> &[ChartPoint] {
        &self.compressed_points
    }

    #[must_use]
    pub fn chart_data(&self) -> &ChartData {
        &self.chart
    }

    #[must_use]
    pub fn viewport(&self) -> Option<&ViewportClampController> {
        self.viewport.as_ref()
    }

    pub fn viewport_mut(&mut self) -> Option<&mut ViewportClampController> {
        self.viewport.as_mut()
    }

    /// The dataset currently selected for compression.
    #[must_use]
    pub fn active_dataset(&self) -> &RawDataset {
        &self.active
    }

    /// Clears data, chart and parameters. `last_params` survives.
    pub fn reset(&mut self) {
        self.params = CompressionParameters::default();
        self.source_name = None;
        self.full = RawDataset::default();
        self.active = RawDataset::default();
        self.raw_points.clear();
        self.compressed_points.clear();
        self.chart = ChartData::default();
        self.viewport = None;
        self.message = None;
    }

    /// Replaces the raw dataset; any compressed series is discarded.
    pub fn load_dataset(&mut self, name: &str, dataset: RawDataset) -> ReviewResult<()> {
        let raw_points = align(&dataset.values, &dataset.raw_timestamps)?;
        let render = self.render(&raw_points, &[])?;
        debug!(name, points = raw_points.len(), "loaded dataset");

        self.message = Some(format!("Loaded {} data points from {name}", dataset.len()));
        self.source_name = Some(name.to_owned());
        self.full = dataset.clone();
        self.active = dataset;
        self.raw_points = raw_points;
        self.compressed_points.clear();
        self.commit(render);
        Ok(())
    }

    /// Restores a saved review, including its compressed series and parameters.
    pub fn load_saved(&mut self, saved: SavedReview) -> ReviewResult<()> {
        let raw_points = align(&saved.raw.values, &saved.raw.raw_timestamps)?;
        let compressed_points = match &saved.compressed {
            Some(compressed) => reconcile(&align(&compressed.values, &compressed.raw_timestamps)?),
            None => Vec::new(),
        };
        let params = match &saved.parameters {
            Some(patch) => CompressionParameters::default().patched(patch).validate()?,
            None => self.params,
        };
        let render = self.render(&raw_points, &compressed_points)?;
        debug!(
            name = %saved.name,
            raw = raw_points.len(),
            compressed = compressed_points.len(),
            "loaded saved review"
        );

        if saved.parameters.is_some() {
            self.last_params = Some(params);
        }
        self.params = params;
        self.message = Some(format!("Loaded {}", saved.name));
        self.source_name = Some(saved.name);
        self.full = saved.raw.clone();
        self.active = saved.raw;
        self.raw_points = raw_points;
        self.compressed_points = compressed_points;
        self.commit(render);
        Ok(())
    }

    /// Narrows the active dataset to the inclusive range between two raw labels.
    pub fn select_time_range(&mut self, start: &str, end: &str) -> ReviewResult<()> {
        if self.full.is_empty() {
            return Err(ReviewError::NoDataLoaded);
        }
        let selected = select_time_range(&self.full, start, end)?;
        let raw_points = align(&selected.values, &selected.raw_timestamps)?;
        let render = self.render(&raw_points, &self.compressed_points)?;

        self.message = Some(format!("Showing {} points from {start} to {end}", selected.len()));
        self.active = selected;
        self.raw_points = raw_points;
        self.commit(render);
        Ok(())
    }

    pub fn reset_time_range(&mut self) -> ReviewResult<()> {
        let Some((start, end)) = full_range_labels(&self.full) else {
            return Err(ReviewError::NoDataLoaded);
        };
        let (start, end) = (start.to_owned(), end.to_owned());
        self.select_time_range(&start, &end)?;
        self.message = Some("Showing full dataset".to_owned());
        Ok(())
    }

    /// Sends the active raw series to `service` and renders the result.
    pub fn compress<S>(&mut self, service: &S) -> ReviewResult<CompressionOutcome>
    where
        S: CompressionService + ?Sized,
    {
        if self.raw_points.is_empty() {
            return Err(ReviewError::NoDataLoaded);
        }
        let params = self.params.validate()?;
        let request = CompressionRequest::from_points(&self.raw_points, &params);
        let payload = service.compress(&request)?;
        self.apply_compression_payload(&payload)
    }

    /// Validates and renders a compression payload obtained by the host.
    pub fn apply_compression_payload(&mut self, payload: &Value) -> ReviewResult<CompressionOutcome> {
        let samples = parse_compression_response(payload)?;
        self.apply_compressed_samples(&samples)
    }

    fn apply_compressed_samples(&mut self, samples: &[RawSample]) -> ReviewResult<CompressionOutcome> {
        let aligned = align_samples(samples);
        let compressed_points = reconcile(&aligned);
        let render = self.render(&self.raw_points, &compressed_points)?;

        let outcome = if compressed_points.is_empty() {
            info!("compression returned no points");
            self.message = Some(EMPTY_RESULT_MESSAGE.to_owned());
            CompressionOutcome::Empty
        } else {
            let breaks = compressed_points.len() - aligned.len();
            info!(points = aligned.len(), breaks, "compression applied");
            self.message = None;
            CompressionOutcome::Compressed {
                points: aligned.len(),
                breaks,
            }
        };

        self.last_params = Some(self.params);
        self.compressed_points = compressed_points;
        self.commit(render);
        Ok(outcome)
    }

    pub fn metrics(&self) -> ReviewResult<CompressionMetrics> {
        let raw: Vec<f64> = self.raw_points.iter().map(|p| p.value).collect();
        let compressed: Vec<f64> = self
            .compressed_points
            .iter()
            .filter_map(|p| p.value)
            .collect();
        CompressionMetrics::compute(&raw, &compressed)
    }

    fn render(&self, raw: &[AlignedPoint], compressed: &[ChartPoint]) -> ReviewResult<RenderState> {
        let chart = ChartData::build(raw, compressed);
        let viewport = chart.viewport_controller(self.tuning)?;
        Ok(RenderState { chart, viewport })
    }

    fn commit(&mut self, render: RenderState) {
        self.chart = render.chart;
        self.viewport = render.viewport;
    }
}
