use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::{RawDataset, RawTimestamp};
use crate::error::{ReviewError, ReviewResult};

/// Numeric column that may arrive as a number or as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
}

impl NumericField {
    /// Parsed value; unparseable text yields NaN so alignment drops the point.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Number(value) => *value,
            Self::Text(text) => text.trim().parse().unwrap_or(f64::NAN),
        }
    }
}

/// One row of the sample catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRow {
    #[serde(rename = "DataSource")]
    pub data_source: String,
    #[serde(rename = "UtcSampleTime")]
    pub utc_sample_time: String,
    #[serde(rename = "NumericValue")]
    pub numeric_value: NumericField,
}

/// Samples of several qualified data sources, selectable one at a time.
#[derive(Debug, Clone, Default)]
pub struct DataSourceCatalog {
    rows: Vec<SourceRow>,
    // `IndexSet` keeps first-seen order for a stable source listing.
    sources: IndexSet<String>,
}

impl DataSourceCatalog {
    #[must_use]
    pub fn from_rows(rows: Vec<SourceRow>) -> Self {
        let sources = rows.iter().map(|row| row.data_source.clone()).collect();
        Self { rows, sources }
    }

    pub fn from_json_str(input: &str) -> ReviewResult<Self> {
        let rows: Vec<SourceRow> = serde_json::from_str(input).map_err(|e| {
            ReviewError::InvalidData(format!("failed to parse data source rows: {e}"))
        })?;
        Ok(Self::from_rows(rows))
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> + '_ {
        self.sources.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Raw dataset of one source, rows kept in catalog order.
    pub fn dataset(&self, qualified_name: &str) -> ReviewResult<RawDataset> {
        if !self.sources.contains(qualified_name) {
            return Err(ReviewError::InvalidData(format!(
                "unknown data source `{qualified_name}`"
            )));
        }
        let (raw_timestamps, values) = self
            .rows
            .iter()
            .filter(|row| row.data_source == qualified_name)
            .map(|row| {
                (
                    RawTimestamp::Text(row.utc_sample_time.clone()),
                    row.numeric_value.as_f64(),
                )
            })
            .unzip();
        Ok(RawDataset::new(raw_timestamps, values))
    }
}

/// Last dot-separated segment of a qualified source name.
#[must_use]
pub fn short_name(qualified_name: &str) -> &str {
    qualified_name.rsplit('.').next().unwrap_or(qualified_name)
}

#[cfg(test)]
mod tests {
    use super::{DataSourceCatalog, short_name};

    const ROWS: &str = r#"[
        {"DataSource": "plant.unit1.temp", "UtcSampleTime": "2025-02-18T00:00:00Z", "NumericValue": "20.5"},
        {"DataSource": "plant.unit2.flow", "UtcSampleTime": "2025-02-18T00:00:00Z", "NumericValue": 3},
        {"DataSource": "plant.unit1.temp", "UtcSampleTime": "2025-02-18T00:01:00Z", "NumericValue": "21"}
    ]"#;

    #[test]
    fn sources_are_unique_in_first_seen_order() {
        let catalog = DataSourceCatalog::from_json_str(ROWS).expect("catalog");
        let sources: Vec<&str> = catalog.sources().collect();
        assert_eq!(sources, vec!["plant.unit1.temp", "plant.unit2.flow"]);
    }

    #[test]
    fn dataset_filters_rows_of_one_source() {
        let catalog = DataSourceCatalog::from_json_str(ROWS).expect("catalog");
        let dataset = catalog.dataset("plant.unit1.temp").expect("dataset");
        assert_eq!(dataset.values, vec![20.5, 21.0]);
        assert_eq!(dataset.raw_timestamps.len(), 2);
    }

    #[test]
    fn unknown_source_is_rejected() {
        let catalog = DataSourceCatalog::from_json_str(ROWS).expect("catalog");
        assert!(catalog.dataset("plant.unit3.level").is_err());
    }

    #[test]
    fn short_name_is_last_segment() {
        assert_eq!(short_name("plant.unit1.temp"), "temp");
        assert_eq!(short_name("flat"), "flat");
    }
}
