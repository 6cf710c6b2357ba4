// Copyright 2025 the Plotlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart composition helpers.
//!
//! A [`ChartSpec`] owns layout inputs and the common guides (axes, legend). A chart is
//! assembled from the plot rectangle, those guides, and a set of series marks supplied
//! by the caller.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;
use plotlet_core::Mark;

use crate::{
    AxisSpec, ChartLayout, ChartLayoutSpec, LegendItem, LegendPlacement, LegendSwatchesSpec,
    Margins, ScaleBand, ScaleLinear, Size, TextMeasurer,
};

/// A composed chart description that owns guide specs and layout inputs.
#[derive(Clone, Debug, Default)]
pub struct ChartSpec {
    /// Configured margins around the plot.
    pub margins: Margins,
    /// Plot (content) size.
    pub plot_size: Size,
    /// Optional left axis.
    pub axis_left: Option<AxisSpec>,
    /// Optional bottom axis.
    pub axis_bottom: Option<AxisSpec>,
    /// Optional legend.
    pub legend: Option<(LegendSwatchesSpec, LegendPlacement)>,
}

impl ChartSpec {
    /// Computes layout for this chart.
    ///
    /// A legend without items reserves no space.
    pub fn layout(&self, measurer: &dyn TextMeasurer) -> ChartLayout {
        let legend = self
            .legend
            .as_ref()
            .filter(|(spec, _)| !spec.is_empty())
            .map(|(spec, placement)| (spec.measure(measurer), *placement));

        ChartLayout::arrange(&ChartLayoutSpec {
            margins: self.margins,
            plot_size: self.plot_size,
            axis_left: self.axis_left.as_ref().map(|a| a.measure(measurer)),
            axis_bottom: self.axis_bottom.as_ref().map(|a| a.measure(measurer)),
            legend,
        })
    }

    /// Instantiates the bottom axis scale, if it is linear.
    pub fn x_scale(&self, plot: Rect) -> Option<ScaleLinear> {
        self.axis_bottom.as_ref().and_then(|a| a.scale_linear(plot))
    }

    /// Instantiates the left axis scale, if it is linear.
    pub fn y_scale(&self, plot: Rect) -> Option<ScaleLinear> {
        self.axis_left.as_ref().and_then(|a| a.scale_linear(plot))
    }

    /// Instantiates the left axis scale, if it is a band scale.
    pub fn y_band(&self, plot: Rect) -> Option<ScaleBand> {
        self.axis_left.as_ref().and_then(|a| a.scale_band(plot))
    }

    /// Generates marks for axes and legend, given a computed layout.
    pub fn guide_marks(&self, layout: &ChartLayout) -> Vec<Mark> {
        let mut out = Vec::new();

        let plot = layout.plot;
        if let (Some(axis), Some(axis_rect)) = (self.axis_bottom.as_ref(), layout.axis_bottom) {
            out.extend(axis.marks(plot, axis_rect));
        }
        if let (Some(axis), Some(axis_rect)) = (self.axis_left.as_ref(), layout.axis_left) {
            out.extend(axis.marks(plot, axis_rect));
        }

        if let (Some((legend, _placement)), Some(rect)) = (self.legend.as_ref(), layout.legend) {
            out.extend(legend.marks(rect.x0, rect.y0));
        }

        out
    }

    /// Produces a full frame: series marks followed by guide marks.
    ///
    /// The series builder is invoked with the resolved plot rectangle.
    pub fn frame(
        &self,
        measurer: &dyn TextMeasurer,
        build_series: impl FnOnce(&Self, Rect) -> Vec<Mark>,
    ) -> ChartFrame {
        let layout = self.layout(measurer);
        let mut marks = build_series(self, layout.plot);
        marks.extend(self.guide_marks(&layout));
        ChartFrame {
            layout,
            marks,
            x_scale: self.x_scale(layout.plot),
            y_scale: self.y_scale(layout.plot),
            y_band: self.y_band(layout.plot),
            legend: self
                .legend
                .as_ref()
                .map(|(spec, _)| spec.items.clone())
                .unwrap_or_default(),
        }
    }
}

/// One rendered chart: the layout, every mark, and the scales the marks were built with.
#[derive(Clone, Debug)]
pub struct ChartFrame {
    /// Arranged layout.
    pub layout: ChartLayout,
    /// Series and guide marks.
    pub marks: Vec<Mark>,
    /// Horizontal linear scale, if the chart has one.
    pub x_scale: Option<ScaleLinear>,
    /// Vertical linear scale, if the chart has one.
    pub y_scale: Option<ScaleLinear>,
    /// Vertical band scale, if the chart has one.
    pub y_band: Option<ScaleBand>,
    /// Legend rows in display order.
    pub legend: Vec<LegendItem>,
}

impl ChartFrame {
    /// Returns the outer chart bounds.
    pub fn view(&self) -> Rect {
        self.layout.view
    }
}
