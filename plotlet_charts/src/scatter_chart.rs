// Copyright 2025 the Plotlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter (and strip) chart composition.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use peniko::Brush;
use peniko::color::palette::css;
use plotlet_core::TableData;

use crate::{
    AXIS_ID_SPAN, AxisSpec, CategoryPalette, ChartFrame, ChartSpec, GridStyle, LegendPlacement,
    LegendSwatchesSpec, Margins, PointMarkSpec, ScaleLinearSpec, Size, TextMeasurer,
    legend_items,
};

const X_AXIS_ID: u64 = AXIS_ID_SPAN;
const Y_AXIS_ID: u64 = 2 * AXIS_ID_SPAN;
const LEGEND_ID: u64 = 3 * AXIS_ID_SPAN;
const POINTS_ID: u64 = 1 << 32;

/// A scatter plot of two numeric fields, optionally coloured by a category field.
///
/// Both axes use nice-rounded linear scales over the data extent. Points with a missing
/// x or y value are skipped.
#[derive(Clone, Debug)]
pub struct ScatterChartSpec {
    /// Field plotted along x.
    pub x_field: String,
    /// Field plotted along y.
    pub y_field: String,
    /// Optional field that picks point colours and drives the legend.
    pub category_field: Option<String>,
    /// Optional x axis title.
    pub x_title: Option<String>,
    /// Optional y axis title.
    pub y_title: Option<String>,
    /// Margins around the plot.
    pub margins: Margins,
    /// Plot size.
    pub plot_size: Size,
    /// Point radius.
    pub radius: f64,
    /// Point fill when there is no category field.
    pub fill: Brush,
    /// Whether to draw gridlines for the x axis.
    pub grid: bool,
    /// Whether the x domain is extended to include zero.
    pub x_zero: bool,
    /// Approximate tick count for both axes.
    pub tick_count: usize,
    /// Legend offset from the plot.
    pub legend_placement: LegendPlacement,
}

impl ScatterChartSpec {
    /// Creates a scatter chart of `y_field` against `x_field`.
    ///
    /// Defaults: 100/200/50/50 (left/right/top/bottom) margins, a 400×400 plot and
    /// black 5px points.
    pub fn new(x_field: impl Into<String>, y_field: impl Into<String>) -> Self {
        Self {
            x_field: x_field.into(),
            y_field: y_field.into(),
            category_field: None,
            x_title: None,
            y_title: None,
            margins: Margins {
                left: 100.0,
                right: 200.0,
                top: 50.0,
                bottom: 50.0,
            },
            plot_size: Size::new(400.0, 400.0),
            radius: 5.0,
            fill: css::BLACK.into(),
            grid: false,
            x_zero: false,
            tick_count: crate::DEFAULT_TICK_COUNT,
            legend_placement: LegendPlacement::default(),
        }
    }

    /// Colours points by `field` and adds a legend.
    pub fn with_category(mut self, field: impl Into<String>) -> Self {
        self.category_field = Some(field.into());
        self
    }

    /// Sets both axis titles.
    pub fn with_titles(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_title = Some(x.into());
        self.y_title = Some(y.into());
        self
    }

    /// Sets the margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Sets the plot size.
    pub fn with_plot_size(mut self, plot_size: Size) -> Self {
        self.plot_size = plot_size;
        self
    }

    /// Sets the point radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the fill used without a category field.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Enables or disables x gridlines.
    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    /// Enables or disables including zero in the x domain.
    pub fn with_x_zero(mut self, x_zero: bool) -> Self {
        self.x_zero = x_zero;
        self
    }

    /// Builds the chart description for `data`.
    ///
    /// Scales, palette and legend rows are derived from `data` on every call.
    pub fn chart(&self, data: &dyn TableData) -> (ChartSpec, CategoryPalette) {
        let x_scale = ScaleLinearSpec::from_data(data, &self.x_field)
            .with_nice(true)
            .with_zero(self.x_zero);
        let y_scale = ScaleLinearSpec::from_data(data, &self.y_field).with_nice(true);

        let mut x_axis = AxisSpec::bottom(X_AXIS_ID, x_scale).with_tick_count(self.tick_count);
        if self.grid {
            x_axis = x_axis.with_grid(GridStyle::default());
        }
        if let Some(title) = &self.x_title {
            x_axis = x_axis.with_title(title.clone());
        }
        let mut y_axis = AxisSpec::left(Y_AXIS_ID, y_scale).with_tick_count(self.tick_count);
        if let Some(title) = &self.y_title {
            y_axis = y_axis.with_title(title.clone());
        }

        let mut palette = CategoryPalette::new();
        let legend = self.category_field.as_deref().map(|field| {
            let items = legend_items(data, field, &mut palette);
            (LegendSwatchesSpec::new(LEGEND_ID, items), self.legend_placement)
        });

        let chart = ChartSpec {
            margins: self.margins,
            plot_size: self.plot_size,
            axis_left: Some(y_axis),
            axis_bottom: Some(x_axis),
            legend,
        };
        (chart, palette)
    }

    /// Renders the chart for `data`.
    ///
    /// The result is a pure function of `self` and the data.
    pub fn render(&self, data: &dyn TableData, measurer: &dyn TextMeasurer) -> ChartFrame {
        let (chart, palette) = self.chart(data);
        chart.frame(measurer, |chart, plot| {
            let (Some(x_scale), Some(y_scale)) = (chart.x_scale(plot), chart.y_scale(plot)) else {
                return Vec::new();
            };
            let mut points =
                PointMarkSpec::new(POINTS_ID, &*self.x_field, &*self.y_field, x_scale, y_scale)
                    .with_radius(self.radius)
                    .with_fill(self.fill.clone());
            if let Some(field) = &self.category_field {
                points = points.with_category(field.clone(), palette);
            }
            points.marks(data)
        })
    }
}
