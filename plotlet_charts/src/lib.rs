// Copyright 2025 the Plotlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart building blocks for `plotlet_core`.
//!
//! This crate is the reusable layer between a [`RecordSet`](plotlet_core::RecordSet) and a
//! primitive mark tree:
//! - **Scales** map data values into screen coordinates (linear with "nice" rounding,
//!   and categorical bands).
//! - **Guides** (axes, legends) generate `plotlet_core::Mark`s from those scales.
//! - **Series** (points, grouped bars) map each record through the scales.
//! - **Charts** ([`ScatterChartSpec`], [`GroupedBarChartSpec`]) compose all of the above
//!   into one pure `render(data) -> ChartFrame` call.
//!
//! Text shaping is out of scope; text marks store unshaped strings and layout uses a
//! pluggable [`TextMeasurer`].

#![no_std]

extern crate alloc;

mod axis;
mod bar_chart;
mod bar_mark;
mod chart_spec;
#[cfg(test)]
mod chart_tests;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod layout;
mod legend;
mod measure;
mod palette;
mod point_mark;
mod scale;
mod scatter_chart;
mod z_order;

pub use axis::{AXIS_ID_SPAN, AxisOrient, AxisSpec, AxisStyle, AxisTick, GridStyle, StrokeStyle};
pub use bar_chart::GroupedBarChartSpec;
pub use bar_mark::GroupedBarMarkSpec;
pub use chart_spec::{ChartFrame, ChartSpec};
pub use format::format_tick_with_step;
pub use layout::{ChartLayout, ChartLayoutSpec, LegendPlacement, Margins, Size};
pub use legend::{LEGEND_ID_SPAN, LegendItem, LegendSwatches, LegendSwatchesSpec, legend_items};
pub use measure::{HeuristicTextMeasurer, TextMeasurer, TextMetrics, TextStyle};
pub use palette::{CATEGORY10, CategoryPalette};
pub use point_mark::PointMarkSpec;
pub use scale::{
    DEFAULT_TICK_COUNT, ScaleBand, ScaleBandSpec, ScaleLinear, ScaleLinearSpec, ScaleSpec,
    build_band_scale, build_continuous_scale, infer_domain_f64,
};
pub use scatter_chart::ScatterChartSpec;
pub use z_order::*;
