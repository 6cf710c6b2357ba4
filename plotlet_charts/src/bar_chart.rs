// Copyright 2025 the Plotlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouped horizontal bar chart composition.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use peniko::Brush;
use peniko::color::palette::css;
use plotlet_core::{TableData, distinct_categories};

use crate::{
    AXIS_ID_SPAN, AxisSpec, CategoryPalette, ChartFrame, ChartSpec, GridStyle, GroupedBarMarkSpec,
    LegendPlacement, LegendSwatchesSpec, Margins, ScaleBandSpec, ScaleLinearSpec, Size,
    StrokeStyle, TextMeasurer, legend_items,
};

const X_AXIS_ID: u64 = AXIS_ID_SPAN;
const Y_AXIS_ID: u64 = 2 * AXIS_ID_SPAN;
const LEGEND_ID: u64 = 3 * AXIS_ID_SPAN;
const BARS_ID: u64 = 1 << 32;

/// Horizontal bars for each label, one bar per series, from long-format records.
///
/// Labels and series are taken in first-seen order. The value axis starts at zero and is
/// nice-rounded; the plot height grows with the number of bars.
#[derive(Clone, Debug)]
pub struct GroupedBarChartSpec {
    /// Field naming the band (row group) of each record.
    pub label_field: String,
    /// Field naming the series of each record.
    pub series_field: String,
    /// Field holding the bar value.
    pub value_field: String,
    /// Band padding (inner and outer) as a fraction of the step.
    pub padding: f64,
    /// Plot height per bar.
    pub row_height: f64,
    /// Plot width.
    pub width: f64,
    /// Gap subtracted from each bar's thickness.
    pub series_gap: f64,
    /// Margins around the plot.
    pub margins: Margins,
    /// Optional value axis title.
    pub x_title: Option<String>,
    /// Gridline paint.
    pub grid_stroke: Brush,
    /// Legend offset from the plot.
    pub legend_placement: LegendPlacement,
}

impl GroupedBarChartSpec {
    /// Creates a grouped bar chart over the given fields.
    ///
    /// Defaults: padding 0.15, 50px per bar, an 800px wide plot, a 15px series gap and
    /// 100/300/0/100 (left/right/top/bottom) margins.
    pub fn new(
        label_field: impl Into<String>,
        series_field: impl Into<String>,
        value_field: impl Into<String>,
    ) -> Self {
        Self {
            label_field: label_field.into(),
            series_field: series_field.into(),
            value_field: value_field.into(),
            padding: 0.15,
            row_height: 50.0,
            width: 800.0,
            series_gap: 15.0,
            margins: Margins {
                left: 100.0,
                right: 300.0,
                top: 0.0,
                bottom: 100.0,
            },
            x_title: None,
            grid_stroke: css::GRAY.into(),
            legend_placement: LegendPlacement {
                offset_x: 10.0,
                offset_y: 10.0,
            },
        }
    }

    /// Sets the band padding.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the plot height per bar.
    pub fn with_row_height(mut self, row_height: f64) -> Self {
        self.row_height = row_height;
        self
    }

    /// Sets the plot width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Sets the gap subtracted from each bar's thickness.
    pub fn with_series_gap(mut self, series_gap: f64) -> Self {
        self.series_gap = series_gap;
        self
    }

    /// Sets the margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Sets the value axis title.
    pub fn with_x_title(mut self, title: impl Into<String>) -> Self {
        self.x_title = Some(title.into());
        self
    }

    /// Builds the chart description for `data`, returning it with the series order.
    pub fn chart(&self, data: &dyn TableData) -> (ChartSpec, Vec<String>) {
        let labels = distinct_categories(data, &self.label_field);
        let series = distinct_categories(data, &self.series_field);
        let plot_size = Size::new(
            self.width,
            self.row_height * (series.len() * labels.len()) as f64,
        );

        let x_scale = ScaleLinearSpec::from_data(data, &self.value_field)
            .with_zero(true)
            .with_nice(true);
        let mut x_axis = AxisSpec::bottom(X_AXIS_ID, x_scale).with_grid(GridStyle {
            stroke: StrokeStyle::solid(self.grid_stroke.clone(), 1.0),
        });
        if let Some(title) = &self.x_title {
            x_axis = x_axis.with_title(title.clone());
        }
        let y_axis = AxisSpec::left(
            Y_AXIS_ID,
            ScaleBandSpec::new(labels).with_padding(self.padding),
        );

        let mut palette = CategoryPalette::from_categories(series.iter().cloned());
        let items = legend_items(data, &self.series_field, &mut palette);
        let legend = LegendSwatchesSpec::new(LEGEND_ID, items)
            .with_swatch_size(20.0)
            .with_row_gap(10.0)
            .with_label_dx(5.0);

        let chart = ChartSpec {
            margins: self.margins,
            plot_size,
            axis_left: Some(y_axis),
            axis_bottom: Some(x_axis),
            legend: Some((legend, self.legend_placement)),
        };
        (chart, series)
    }

    /// Renders the chart for `data`.
    pub fn render(&self, data: &dyn TableData, measurer: &dyn TextMeasurer) -> ChartFrame {
        let (chart, series) = self.chart(data);
        chart.frame(measurer, |chart, plot| {
            let (Some(band), Some(x_scale)) = (chart.y_band(plot), chart.x_scale(plot)) else {
                return Vec::new();
            };
            GroupedBarMarkSpec::new(
                BARS_ID,
                [
                    self.label_field.as_str(),
                    self.series_field.as_str(),
                    self.value_field.as_str(),
                ],
                band,
                x_scale,
                series,
            )
            .with_series_gap(self.series_gap)
            .marks(data)
        })
    }
}
