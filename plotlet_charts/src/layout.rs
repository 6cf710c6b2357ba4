// Copyright 2025 the Plotlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tiny measure/arrange layout helper for charts.
//!
//! - **Measure**: guides (axes, legend) report the thickness or size they need.
//! - **Arrange**: the plot rectangle is placed inside the configured margins, each margin
//!   growing if a guide needs more room, and guide rectangles are placed adjacent to it.

use kurbo::Rect;

/// A width/height pair used by chart layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in chart coordinate units.
    pub width: f64,
    /// Height in chart coordinate units.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Space reserved around the plot rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margins {
    /// Space left of the plot.
    pub left: f64,
    /// Space right of the plot.
    pub right: f64,
    /// Space above the plot.
    pub top: f64,
    /// Space below the plot.
    pub bottom: f64,
}

impl Margins {
    /// The same margin on every side.
    pub const fn uniform(v: f64) -> Self {
        Self {
            left: v,
            right: v,
            top: v,
            bottom: v,
        }
    }
}

/// Legend placement, relative to the top-right corner of the plot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendPlacement {
    /// Horizontal distance from the plot's right edge.
    pub offset_x: f64,
    /// Vertical distance from the plot's top edge.
    pub offset_y: f64,
}

impl Default for LegendPlacement {
    fn default() -> Self {
        Self {
            offset_x: 20.0,
            offset_y: 20.0,
        }
    }
}

/// Layout inputs for a single chart: a plot area plus optional axes/legend.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChartLayoutSpec {
    /// Configured margins around the plot.
    pub margins: Margins,
    /// The plot (content) size.
    pub plot_size: Size,
    /// Measured left axis thickness, if there is a left axis.
    pub axis_left: Option<f64>,
    /// Measured bottom axis thickness, if there is a bottom axis.
    pub axis_bottom: Option<f64>,
    /// An optional legend, given by its measured size and placement.
    pub legend: Option<(Size, LegendPlacement)>,
}

/// Output of the arrange pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// Outer chart bounds.
    pub view: Rect,
    /// The plot rectangle that scales map into.
    pub plot: Rect,
    /// Reserved rectangle for the left axis (if any).
    pub axis_left: Option<Rect>,
    /// Reserved rectangle for the bottom axis (if any).
    pub axis_bottom: Option<Rect>,
    /// Legend placement rectangle (if any).
    pub legend: Option<Rect>,
}

impl ChartLayout {
    /// Computes a layout from the provided specification.
    pub fn arrange(spec: &ChartLayoutSpec) -> Self {
        let axis_left_w = spec.axis_left.unwrap_or(0.0).max(0.0);
        let axis_bottom_h = spec.axis_bottom.unwrap_or(0.0).max(0.0);

        let margin_left = spec.margins.left.max(0.0).max(axis_left_w);
        let margin_top = spec.margins.top.max(0.0);
        let margin_bottom = spec.margins.bottom.max(0.0).max(axis_bottom_h);
        let mut margin_right = spec.margins.right.max(0.0);
        if let Some((size, placement)) = spec.legend {
            margin_right = margin_right.max(placement.offset_x.max(0.0) + size.width.max(0.0));
        }

        let plot_w = spec.plot_size.width.max(0.0);
        let plot_h = spec.plot_size.height.max(0.0);
        let plot = Rect::new(
            margin_left,
            margin_top,
            margin_left + plot_w,
            margin_top + plot_h,
        );

        let axis_left = spec
            .axis_left
            .map(|_| Rect::new(plot.x0 - axis_left_w, plot.y0, plot.x0, plot.y1));
        let axis_bottom = spec
            .axis_bottom
            .map(|_| Rect::new(plot.x0, plot.y1, plot.x1, plot.y1 + axis_bottom_h));

        let legend = spec.legend.map(|(size, placement)| {
            let x = plot.x1 + placement.offset_x;
            let y = plot.y0 + placement.offset_y;
            Rect::new(x, y, x + size.width.max(0.0), y + size.height.max(0.0))
        });

        let mut view_h = plot.y1 + margin_bottom;
        if let Some(rect) = legend {
            view_h = view_h.max(rect.y1);
        }
        let view = Rect::new(0.0, 0.0, plot.x1 + margin_right, view_h);

        Self {
            view,
            plot,
            axis_left,
            axis_bottom,
            legend,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn spec() -> ChartLayoutSpec {
        ChartLayoutSpec {
            margins: Margins {
                left: 100.0,
                right: 200.0,
                top: 50.0,
                bottom: 50.0,
            },
            plot_size: Size::new(400.0, 400.0),
            ..ChartLayoutSpec::default()
        }
    }

    #[test]
    fn configured_margins_place_the_plot() {
        let layout = ChartLayout::arrange(&spec());
        assert_eq!(layout.plot, Rect::new(100.0, 50.0, 500.0, 450.0));
        assert_eq!(layout.view, Rect::new(0.0, 0.0, 700.0, 500.0));
        assert!(layout.axis_left.is_none());
        assert!(layout.legend.is_none());
    }

    #[test]
    fn wide_axes_grow_their_margins() {
        let layout = ChartLayout::arrange(&ChartLayoutSpec {
            axis_left: Some(130.0),
            axis_bottom: Some(20.0),
            ..spec()
        });
        assert_eq!(layout.plot.x0, 130.0);
        assert_eq!(layout.axis_left, Some(Rect::new(0.0, 50.0, 130.0, 450.0)));
        assert_eq!(
            layout.axis_bottom,
            Some(Rect::new(130.0, 450.0, 530.0, 470.0))
        );
        assert_eq!(layout.view.y1, 500.0);
    }

    #[test]
    fn legend_sits_right_of_the_plot() {
        let layout = ChartLayout::arrange(&ChartLayoutSpec {
            legend: Some((Size::new(80.0, 50.0), LegendPlacement::default())),
            ..spec()
        });
        assert_eq!(layout.legend, Some(Rect::new(520.0, 70.0, 600.0, 120.0)));
        assert_eq!(layout.view.x1, 700.0);
    }

    #[test]
    fn tall_legend_extends_the_view() {
        let layout = ChartLayout::arrange(&ChartLayoutSpec {
            legend: Some((Size::new(80.0, 600.0), LegendPlacement::default())),
            ..spec()
        });
        assert_eq!(layout.view.y1, 670.0);
    }
}
