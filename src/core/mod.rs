pub mod category_scale;
pub mod gaps;
pub mod primitives;
pub mod series;
pub mod timestamp;
pub mod types;
pub mod value_scale;
pub mod viewport;

pub use category_scale::CategoryAxis;
pub use gaps::{connected_runs, reconcile};
pub use primitives::CanonicalInstant;
pub use series::{align, align_samples};
pub use timestamp::{SYNTHETIC_BASE_EPOCH_MILLIS, normalize};
pub use types::{AlignedPoint, ChartPoint, RawDataset, RawSample, RawTimestamp};
pub use value_scale::{AxisBounds, fit_value_bounds};
pub use viewport::{ViewportBounds, ViewportTuning};
