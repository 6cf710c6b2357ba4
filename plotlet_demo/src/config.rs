// Copyright 2025 the Plotlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart configuration.
//!
//! A [`ChartConfig`] is always complete: it starts from the preset of a [`Dataset`] and
//! is then overridden by whatever a TOML [`ConfigFile`] sets.

use std::path::Path;
use std::time::Duration;

use log::debug;
use plotlet_charts::Margins;
use serde::{Deserialize, Serialize};

use crate::error::{PlotletError, Result};
use crate::source::{DataSource, Dataset, IRIS_URL, LABEL_FIELD, SERIES_FIELD, VALUE_FIELD};

/// The chart a view draws.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Points coloured by category, with a legend.
    #[default]
    Scatter,
    /// One point per record along a zero-based x axis, with gridlines.
    Strip,
    /// Horizontal bars grouped by label, one per series.
    Bars,
}

/// Grouped bar options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarConfig {
    /// Band padding as a fraction of the band step, in `[0, 1)`.
    pub padding: f64,
    /// Plot height per bar.
    pub row_height: f64,
    /// Gap subtracted from each bar's thickness.
    pub series_gap: f64,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            padding: 0.15,
            row_height: 50.0,
            series_gap: 15.0,
        }
    }
}

/// Resolved chart configuration, owned by the chart view.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    /// Dataset loaded by default.
    pub dataset: Dataset,
    /// Chart kind.
    pub chart: ChartKind,
    /// Margins around the plot.
    pub margins: Margins,
    /// Plot width.
    pub width: f64,
    /// Plot height (bar charts derive theirs from the data).
    pub height: f64,
    /// Fields that may be selected for either axis. Empty means unrestricted.
    pub fields: Vec<String>,
    /// Field on the horizontal axis (the value field for bars).
    pub x_field: String,
    /// Field on the vertical axis (the label field for bars).
    pub y_field: String,
    /// Field that colours marks (the series field for bars).
    pub category_field: Option<String>,
    /// Horizontal axis title; defaults to the field name.
    pub x_title: Option<String>,
    /// Vertical axis title; defaults to the field name.
    pub y_title: Option<String>,
    /// URL fetched for remote datasets.
    pub data_url: Option<String>,
    /// Request timeout for remote datasets.
    pub fetch_timeout_secs: u64,
    /// Grouped bar options.
    pub bars: BarConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::for_dataset(Dataset::Iris)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_string()).collect()
}

impl ChartConfig {
    /// The preset for one of the built-in datasets.
    pub fn for_dataset(dataset: Dataset) -> Self {
        let base = Self {
            dataset,
            chart: ChartKind::Scatter,
            margins: Margins {
                left: 100.0,
                right: 200.0,
                top: 50.0,
                bottom: 50.0,
            },
            width: 400.0,
            height: 400.0,
            fields: Vec::new(),
            x_field: String::new(),
            y_field: String::new(),
            category_field: None,
            x_title: None,
            y_title: None,
            data_url: None,
            fetch_timeout_secs: 30,
            bars: BarConfig::default(),
        };
        match dataset {
            Dataset::Iris => Self {
                fields: strings(&["sepalLength", "sepalWidth", "petalLength", "petalWidth"]),
                x_field: "sepalLength".to_string(),
                y_field: "sepalWidth".to_string(),
                category_field: Some("species".to_string()),
                data_url: Some(IRIS_URL.to_string()),
                ..base
            },
            Dataset::Temperature => Self {
                chart: ChartKind::Strip,
                margins: Margins {
                    left: 100.0,
                    right: 100.0,
                    top: 20.0,
                    bottom: 100.0,
                },
                // One 50px row per month plus one.
                height: 650.0,
                fields: strings(&["temperature", "month"]),
                x_field: "temperature".to_string(),
                y_field: "month".to_string(),
                ..base
            },
            Dataset::Grouped => Self {
                chart: ChartKind::Bars,
                margins: Margins {
                    left: 100.0,
                    right: 300.0,
                    top: 0.0,
                    bottom: 100.0,
                },
                width: 800.0,
                fields: strings(&[VALUE_FIELD, LABEL_FIELD, SERIES_FIELD]),
                x_field: VALUE_FIELD.to_string(),
                y_field: LABEL_FIELD.to_string(),
                category_field: Some(SERIES_FIELD.to_string()),
                ..base
            },
        }
    }

    /// Loads a TOML config file and resolves it against its dataset preset.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("loading config from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parses TOML text and resolves it against its dataset preset.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(text)?;
        let config = file.resolve();
        config.validate()?;
        Ok(config)
    }

    /// Returns the fetch timeout.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Picks where the records come from.
    ///
    /// A configured `data_url` wins over the dataset's inline records.
    pub fn data_source(&self) -> Result<DataSource> {
        if let Some(url) = &self.data_url {
            if self.dataset.inline_records().is_some() {
                debug!("{:?}: fetching {url} instead of inline records", self.dataset);
            }
            return Ok(DataSource::remote(url.clone()));
        }
        self.dataset
            .inline_records()
            .map(DataSource::Inline)
            .ok_or_else(|| {
                PlotletError::Config(format!("dataset {:?} has no data_url", self.dataset))
            })
    }

    /// Checks that `field` may be selected for an axis.
    pub fn check_field(&self, field: &str) -> Result<()> {
        if self.fields.is_empty() || self.fields.iter().any(|f| f == field) {
            Ok(())
        } else {
            Err(PlotletError::InvalidField {
                field: field.to_string(),
                allowed: self.fields.clone(),
            })
        }
    }

    /// Rejects sizes, margins and selections that cannot produce a chart.
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(PlotletError::Config(format!(
                "width must be positive, got {}",
                self.width
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(PlotletError::Config(format!(
                "height must be positive, got {}",
                self.height
            )));
        }
        let m = self.margins;
        if [m.left, m.right, m.top, m.bottom]
            .iter()
            .any(|v| !(v.is_finite() && *v >= 0.0))
        {
            return Err(PlotletError::Config(format!(
                "margins must be non-negative, got {m:?}"
            )));
        }
        if !(0.0..1.0).contains(&self.bars.padding) {
            return Err(PlotletError::Config(format!(
                "bar padding must be in [0, 1), got {}",
                self.bars.padding
            )));
        }
        if !(self.bars.row_height.is_finite() && self.bars.row_height > 0.0) {
            return Err(PlotletError::Config(format!(
                "bar row_height must be positive, got {}",
                self.bars.row_height
            )));
        }
        if !(self.bars.series_gap.is_finite() && self.bars.series_gap >= 0.0) {
            return Err(PlotletError::Config(format!(
                "bar series_gap must be non-negative, got {}",
                self.bars.series_gap
            )));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(PlotletError::Config(
                "fetch_timeout_secs must be at least 1".to_string(),
            ));
        }
        self.check_field(&self.x_field)?;
        self.check_field(&self.y_field)
    }
}

/// Partial margins as written in a config file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarginsFile {
    /// Left margin.
    pub left: Option<f64>,
    /// Right margin.
    pub right: Option<f64>,
    /// Top margin.
    pub top: Option<f64>,
    /// Bottom margin.
    pub bottom: Option<f64>,
}

/// Partial bar options as written in a config file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BarsFile {
    /// Band padding.
    pub padding: Option<f64>,
    /// Plot height per bar.
    pub row_height: Option<f64>,
    /// Bar thickness reduction.
    pub series_gap: Option<f64>,
}

/// The TOML shape of a config file. Every key is optional.
///
/// ```toml
/// dataset = "iris"
/// x_field = "petalWidth"
///
/// [margins]
/// left = 120
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Dataset whose preset fills unset keys.
    pub dataset: Option<Dataset>,
    /// Chart kind.
    pub chart: Option<ChartKind>,
    /// Margin overrides.
    pub margins: MarginsFile,
    /// Plot width.
    pub width: Option<f64>,
    /// Plot height.
    pub height: Option<f64>,
    /// Selectable fields.
    pub fields: Option<Vec<String>>,
    /// Horizontal field.
    pub x_field: Option<String>,
    /// Vertical field.
    pub y_field: Option<String>,
    /// Colour field; an empty string disables colouring.
    pub category_field: Option<String>,
    /// Horizontal axis title.
    pub x_title: Option<String>,
    /// Vertical axis title.
    pub y_title: Option<String>,
    /// Data URL for remote datasets.
    pub data_url: Option<String>,
    /// Request timeout in seconds.
    pub fetch_timeout_secs: Option<u64>,
    /// Grouped bar overrides.
    pub bars: BarsFile,
}

impl ConfigFile {
    /// Applies these overrides to the preset of the chosen dataset.
    pub fn resolve(self) -> ChartConfig {
        let mut config = ChartConfig::for_dataset(self.dataset.unwrap_or_default());

        if let Some(chart) = self.chart {
            config.chart = chart;
        }
        let margins = &mut config.margins;
        margins.left = self.margins.left.unwrap_or(margins.left);
        margins.right = self.margins.right.unwrap_or(margins.right);
        margins.top = self.margins.top.unwrap_or(margins.top);
        margins.bottom = self.margins.bottom.unwrap_or(margins.bottom);
        config.width = self.width.unwrap_or(config.width);
        config.height = self.height.unwrap_or(config.height);
        if let Some(fields) = self.fields {
            config.fields = fields;
        }
        if let Some(x) = self.x_field {
            config.x_field = x;
        }
        if let Some(y) = self.y_field {
            config.y_field = y;
        }
        if let Some(category) = self.category_field {
            config.category_field = (!category.is_empty()).then_some(category);
        }
        config.x_title = self.x_title.or(config.x_title);
        config.y_title = self.y_title.or(config.y_title);
        config.data_url = self.data_url.or(config.data_url);
        config.fetch_timeout_secs = self
            .fetch_timeout_secs
            .unwrap_or(config.fetch_timeout_secs);
        let bars = &mut config.bars;
        bars.padding = self.bars.padding.unwrap_or(bars.padding);
        bars.row_height = self.bars.row_height.unwrap_or(bars.row_height);
        bars.series_gap = self.bars.series_gap.unwrap_or(bars.series_gap);

        config
    }
}
