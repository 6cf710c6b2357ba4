// Copyright 2025 the Plotlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! An [`AxisSpec`] pairs a scale spec with an orientation. It can be measured (for layout)
//! and arranged against a plot rectangle (to generate marks). Generation is a pure
//! function of the axis and the rectangles.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;
use plotlet_core::{Mark, MarkId, TextAnchor, TextBaseline, TextPayload};

use crate::format::format_tick_with_step;
use crate::scale::{ScaleBand, ScaleLinear, ScaleSpec};
use crate::z_order;
use crate::{TextMeasurer, TextStyle};

const EPS: f64 = 1.0e-9;

/// A paint + width pair for stroked lines (domain lines, ticks, gridlines).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Style for the axis domain line and tick marks.
    pub rule: StrokeStyle,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
    /// Fill paint for the axis title.
    pub title_fill: Brush,
    /// Font size for the axis title.
    pub title_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let rule = StrokeStyle::default();
        Self {
            rule: rule.clone(),
            label_fill: rule.brush.clone(),
            label_font_size: 10.0,
            title_fill: rule.brush,
            title_font_size: 12.0,
        }
    }
}

/// Gridline styling.
#[derive(Clone, Debug, PartialEq)]
pub struct GridStyle {
    /// Stroke style for gridlines.
    pub stroke: StrokeStyle,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            stroke: StrokeStyle {
                brush: Brush::Solid(css::BLACK.with_alpha(40.0 / 255.0)),
                stroke_width: 1.0,
            },
        }
    }
}

/// Axis placement relative to the plot area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis placed below the plot area.
    Bottom,
    /// A vertical axis placed to the left of the plot area.
    Left,
}

/// One resolved tick: data value, pixel position along the axis, and label.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    /// Tick value. For band scales this is the band index.
    pub value: f64,
    /// Position along the axis in scene coordinates.
    pub position: f64,
    /// Formatted label.
    pub label: String,
}

/// Id offset of the first tick label; ticks occupy the lane below it.
const LABEL_IDS: u64 = 1 << 20;
/// Id offset of the first gridline.
const GRID_IDS: u64 = 2 << 20;
/// Id offset of the axis title.
const TITLE_ID: u64 = 3 << 20;

/// Number of ids an axis reserves above its `id_base`.
pub const AXIS_ID_SPAN: u64 = 4 << 20;

/// An axis specification.
#[derive(Clone)]
pub struct AxisSpec {
    /// Stable-id base; generated marks use ids in `id_base..id_base + AXIS_ID_SPAN`.
    pub id_base: u64,
    /// The axis scale specification.
    pub scale: ScaleSpec,
    /// Axis placement relative to the plot.
    pub orient: AxisOrient,
    /// Approximate number of ticks (continuous scales only).
    pub tick_count: usize,
    /// Tick line length, pointing away from the plot.
    pub tick_size: f64,
    /// Whether to draw tick marks.
    pub ticks: bool,
    /// Whether to draw tick labels.
    pub labels: bool,
    /// Whether to draw the axis domain line.
    pub show_domain: bool,
    /// Padding between the tick end and the tick label.
    pub tick_padding: f64,
    /// Axis styling.
    pub style: AxisStyle,
    /// Optional gridline styling.
    ///
    /// If `Some`, continuous axes generate one gridline per tick spanning the plot.
    pub grid: Option<GridStyle>,
    /// Optional axis title text.
    pub title: Option<String>,
    /// Distance from tick labels to the title.
    pub title_offset: f64,
    /// Optional tick label formatter, called with `(value, step)`.
    pub tick_formatter: Option<Arc<dyn Fn(f64, f64) -> String>>,
}

impl core::fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisSpec")
            .field("id_base", &self.id_base)
            .field("scale", &self.scale)
            .field("orient", &self.orient)
            .field("tick_count", &self.tick_count)
            .field("tick_size", &self.tick_size)
            .field("ticks", &self.ticks)
            .field("labels", &self.labels)
            .field("show_domain", &self.show_domain)
            .field("tick_padding", &self.tick_padding)
            .field("style", &self.style)
            .field("grid", &self.grid)
            .field("title", &self.title)
            .field("title_offset", &self.title_offset)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .finish()
    }
}

impl AxisSpec {
    /// Creates a new axis specification.
    ///
    /// The returned axis has `tick_count = 10`, `tick_size = 5`, `tick_padding = 3`,
    /// the default style, no title and no grid.
    pub fn new(id_base: u64, scale: impl Into<ScaleSpec>, orient: AxisOrient) -> Self {
        Self {
            id_base,
            scale: scale.into(),
            orient,
            tick_count: crate::DEFAULT_TICK_COUNT,
            tick_size: 5.0,
            ticks: true,
            labels: true,
            show_domain: true,
            tick_padding: 3.0,
            style: AxisStyle::default(),
            grid: None,
            title: None,
            title_offset: 10.0,
            tick_formatter: None,
        }
    }

    /// Convenience constructor for a `bottom` axis.
    pub fn bottom(id_base: u64, scale: impl Into<ScaleSpec>) -> Self {
        Self::new(id_base, scale, AxisOrient::Bottom)
    }

    /// Convenience constructor for a `left` axis.
    pub fn left(id_base: u64, scale: impl Into<ScaleSpec>) -> Self {
        Self::new(id_base, scale, AxisOrient::Left)
    }

    /// Set the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Set tick size in scene coordinates.
    pub fn with_tick_size(mut self, tick_size: f64) -> Self {
        self.tick_size = tick_size;
        self
    }

    /// Enable or disable tick marks.
    pub fn with_ticks(mut self, ticks: bool) -> Self {
        self.ticks = ticks;
        self
    }

    /// Enable or disable tick labels.
    pub fn with_labels(mut self, labels: bool) -> Self {
        self.labels = labels;
        self
    }

    /// Enable or disable the axis domain line.
    pub fn with_domain(mut self, domain: bool) -> Self {
        self.show_domain = domain;
        self
    }

    /// Set tick padding in scene coordinates.
    pub fn with_tick_padding(mut self, tick_padding: f64) -> Self {
        self.tick_padding = tick_padding;
        self
    }

    /// Set a custom tick label formatter.
    pub fn with_tick_formatter(mut self, f: impl Fn(f64, f64) -> String + 'static) -> Self {
        self.tick_formatter = Some(Arc::new(f));
        self
    }

    /// Set the axis style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Enable gridlines using the provided style.
    pub fn with_grid(mut self, grid: GridStyle) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Set the axis title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the title offset in scene coordinates.
    pub fn with_title_offset(mut self, title_offset: f64) -> Self {
        self.title_offset = title_offset;
        self
    }

    fn range(&self, plot: Rect) -> (f64, f64) {
        match (self.orient, &self.scale) {
            (AxisOrient::Bottom, _) => (plot.x0, plot.x1),
            // Continuous values grow upward; categories read top to bottom.
            (AxisOrient::Left, ScaleSpec::Linear(_)) => (plot.y1, plot.y0),
            (AxisOrient::Left, ScaleSpec::Band(_)) => (plot.y0, plot.y1),
        }
    }

    /// Returns the linear scale this axis maps through, or `None` for a band axis.
    ///
    /// The domain is resolved with the axis tick count, so data marks drawn with this
    /// scale line up with the ticks.
    pub fn scale_linear(&self, plot: Rect) -> Option<ScaleLinear> {
        match &self.scale {
            ScaleSpec::Linear(s) => Some(s.instantiate_resolved(self.range(plot), self.tick_count)),
            ScaleSpec::Band(_) => None,
        }
    }

    /// Returns the band scale this axis maps through, or `None` for a linear axis.
    pub fn scale_band(&self, plot: Rect) -> Option<ScaleBand> {
        match &self.scale {
            ScaleSpec::Band(s) => Some(s.instantiate(self.range(plot))),
            ScaleSpec::Linear(_) => None,
        }
    }

    /// Resolves the ticks for a plot rectangle.
    ///
    /// Continuous axes use nice ticks inside the resolved domain; band axes place one tick
    /// at the centre of each band. A degenerate continuous scale has no ticks.
    pub fn ticks(&self, plot: Rect) -> Vec<AxisTick> {
        if let Some(scale) = self.scale_linear(plot) {
            let step = scale.tick_step(self.tick_count);
            return scale
                .ticks(self.tick_count)
                .into_iter()
                .map(|v| AxisTick {
                    value: v,
                    position: scale.map(v),
                    label: self.format_tick(v, step),
                })
                .collect();
        }
        let Some(band) = self.scale_band(plot) else {
            return Vec::new();
        };
        band.labels()
            .iter()
            .enumerate()
            .map(|(i, label)| AxisTick {
                value: i as f64,
                position: band.center(i),
                label: label.clone(),
            })
            .collect()
    }

    fn format_tick(&self, v: f64, step: f64) -> String {
        match &self.tick_formatter {
            Some(f) => (f)(v, step),
            None => format_tick_with_step(v, step),
        }
    }

    /// Measure the thickness this axis needs along its normal direction.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> f64 {
        let tick_extent = if self.ticks {
            self.tick_size.abs()
        } else {
            0.0
        };
        let label_style = TextStyle::new(self.style.label_font_size);

        let mut max_label_extent = 0.0_f64;
        if self.labels {
            // Labels do not depend on the range, so any rectangle will do.
            for tick in self.ticks(Rect::ZERO) {
                let metrics = measurer.measure(&tick.label, label_style);
                let extent = match self.orient {
                    AxisOrient::Bottom => metrics.line_height(),
                    AxisOrient::Left => metrics.advance_width,
                };
                max_label_extent = max_label_extent.max(extent);
            }
        }
        let label_thickness = if self.labels && max_label_extent > 0.0 {
            self.tick_padding.max(0.0) + max_label_extent
        } else {
            0.0
        };

        let mut out = tick_extent + label_thickness;
        if let Some(title) = &self.title {
            let metrics = measurer.measure(title, TextStyle::new(self.style.title_font_size));
            // A rotated left title is as wide as it is tall.
            out += self.title_offset.max(0.0) + metrics.line_height();
        }
        out
    }

    /// Generate axis marks for the given plot rectangle and arranged axis rectangle.
    ///
    /// `axis_rect` should be the reserved region for this axis, adjacent to `plot`.
    pub fn marks(&self, plot: Rect, axis_rect: Rect) -> Vec<Mark> {
        let ticks = self.ticks(plot);
        let tick_size = self.tick_size.abs();
        let tick_extent = if self.ticks { tick_size } else { 0.0 };
        let label_gap = self.tick_padding.max(0.0);
        let (lo, hi) = match self.orient {
            AxisOrient::Bottom => (plot.x0, plot.x1),
            AxisOrient::Left => (plot.y0, plot.y1),
        };
        let in_plot = |p: f64| p >= lo - EPS && p <= hi + EPS;

        let mut out = Vec::new();

        if let Some(grid) = &self.grid
            && let Some(scale) = self.scale_linear(plot)
        {
            let mut values: Vec<f64> = ticks
                .iter()
                .filter(|t| in_plot(t.position))
                .map(|t| t.value)
                .collect();
            if let Some((d0, d1)) = scale.domain() {
                push_if_missing(&mut values, d0);
                push_if_missing(&mut values, d1);
            }
            for (i, v) in values.into_iter().enumerate() {
                let p = scale.map(v);
                let (p0, p1) = match self.orient {
                    AxisOrient::Bottom => (Point::new(p, plot.y0), Point::new(p, plot.y1)),
                    AxisOrient::Left => (Point::new(plot.x0, p), Point::new(plot.x1, p)),
                };
                out.push(
                    Mark::line(
                        MarkId::from_raw(self.id_base + GRID_IDS + i as u64),
                        p0,
                        p1,
                        grid.stroke.brush.clone(),
                        grid.stroke.stroke_width,
                    )
                    .with_z_index(z_order::GRID_LINES),
                );
            }
        }

        if self.show_domain {
            let (p0, p1) = match self.orient {
                AxisOrient::Bottom => (Point::new(plot.x0, plot.y1), Point::new(plot.x1, plot.y1)),
                AxisOrient::Left => (Point::new(plot.x0, plot.y0), Point::new(plot.x0, plot.y1)),
            };
            out.push(self.rule(MarkId::from_raw(self.id_base), p0, p1));
        }

        for (i, tick) in ticks.into_iter().enumerate() {
            let p = tick.position;
            if !in_plot(p) {
                continue;
            }
            let (anchor, tick_end, label_pos, anchor_h, baseline) = match self.orient {
                AxisOrient::Bottom => (
                    Point::new(p, plot.y1),
                    Point::new(p, plot.y1 + tick_size),
                    Point::new(p, plot.y1 + tick_extent + label_gap),
                    TextAnchor::Middle,
                    TextBaseline::Hanging,
                ),
                AxisOrient::Left => (
                    Point::new(plot.x0, p),
                    Point::new(plot.x0 - tick_size, p),
                    Point::new(plot.x0 - tick_extent - label_gap, p),
                    TextAnchor::End,
                    TextBaseline::Middle,
                ),
            };

            if self.ticks {
                out.push(self.rule(
                    MarkId::from_raw(self.id_base + 1 + i as u64),
                    anchor,
                    tick_end,
                ));
            }

            if self.labels {
                out.push(
                    Mark::text(
                        MarkId::from_raw(self.id_base + LABEL_IDS + i as u64),
                        TextPayload::new(label_pos, tick.label)
                            .with_anchor(anchor_h)
                            .with_baseline(baseline)
                            .with_font_size(self.style.label_font_size)
                            .with_fill(self.style.label_fill.clone()),
                    )
                    .with_z_index(z_order::AXIS_LABELS),
                );
            }
        }

        if let Some(title) = &self.title {
            let text = match self.orient {
                // The title sits in the strip at the outer edge of `axis_rect`, which
                // `measure` reserved past the labels and `title_offset`.
                AxisOrient::Bottom => TextPayload::new(
                    ((plot.x0 + plot.x1) * 0.5, axis_rect.y1 - self.style.title_font_size),
                    title.clone(),
                )
                .with_baseline(TextBaseline::Hanging),
                AxisOrient::Left => TextPayload::new(
                    (
                        axis_rect.x0 + 0.5 * self.style.title_font_size,
                        (plot.y0 + plot.y1) * 0.5,
                    ),
                    title.clone(),
                )
                .with_baseline(TextBaseline::Middle)
                .with_angle(-90.0),
            };
            out.push(
                Mark::text(
                    MarkId::from_raw(self.id_base + TITLE_ID),
                    text.with_anchor(TextAnchor::Middle)
                        .with_font_size(self.style.title_font_size)
                        .with_fill(self.style.title_fill.clone()),
                )
                .with_z_index(z_order::AXIS_TITLES),
            );
        }

        out
    }

    fn rule(&self, id: MarkId, p0: Point, p1: Point) -> Mark {
        Mark::line(
            id,
            p0,
            p1,
            self.style.rule.brush.clone(),
            self.style.rule.stroke_width,
        )
        .with_z_index(z_order::AXIS_RULES)
    }
}

fn push_if_missing(values: &mut Vec<f64>, v: f64) {
    if !v.is_finite() {
        return;
    }
    if values.iter().any(|t| (*t - v).abs() <= EPS) {
        return;
    }
    values.push(v);
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::Rect;
    use plotlet_core::{MarkKind, MarkPayload};

    use super::*;
    use crate::HeuristicTextMeasurer;
    use crate::scale::{ScaleBandSpec, ScaleLinearSpec};

    fn texts(marks: &[Mark]) -> Vec<&TextPayload> {
        marks.iter().filter_map(|m| m.payload.as_text()).collect()
    }

    #[test]
    fn axis_measure_respects_ticks_and_labels_toggles() {
        let measurer = HeuristicTextMeasurer;
        let axis = AxisSpec::left(1, ScaleLinearSpec::new((0.0, 10.0))).with_tick_count(3);

        let with_all = axis.measure(&measurer);
        let no_labels = axis.clone().with_labels(false).measure(&measurer);
        let no_ticks = axis.clone().with_ticks(false).measure(&measurer);
        let none = axis
            .clone()
            .with_ticks(false)
            .with_labels(false)
            .with_domain(false)
            .measure(&measurer);

        assert!(with_all > 0.0);
        assert!(no_labels < with_all);
        assert!(no_ticks < with_all);
        assert_eq!(none, 0.0);
    }

    #[test]
    fn bottom_ticks_are_nice_and_inside_the_plot() {
        let plot = Rect::new(0.0, 0.0, 100.0, 50.0);
        let axis = AxisSpec::bottom(1, ScaleLinearSpec::new((0.0, 10.0))).with_tick_count(5);
        let ticks = axis.ticks(plot);
        let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["0", "2", "4", "6", "8", "10"]);
        assert!((ticks[1].position - 20.0).abs() < 1e-9);
    }

    #[test]
    fn left_linear_axis_grows_upward() {
        let plot = Rect::new(0.0, 0.0, 100.0, 100.0);
        let axis = AxisSpec::left(1, ScaleLinearSpec::new((0.0, 10.0)));
        let ticks = axis.ticks(plot);
        let first = ticks.first().expect("ticks");
        let last = ticks.last().expect("ticks");
        assert!((first.position - 100.0).abs() < 1e-9);
        assert!((last.position - 0.0).abs() < 1e-9);
    }

    #[test]
    fn band_axis_ticks_sit_at_band_centres_top_to_bottom() {
        let plot = Rect::new(0.0, 0.0, 100.0, 90.0);
        let axis = AxisSpec::left(1, ScaleBandSpec::new(["A", "B", "C"]).with_padding(0.0));
        let ticks = axis.ticks(plot);
        let positions: Vec<f64> = ticks.iter().map(|t| t.position).collect();
        assert_eq!(positions, [15.0, 45.0, 75.0]);
        assert_eq!(ticks[0].label, "A");
    }

    #[test]
    fn long_band_axes_keep_every_mark_id_distinct() {
        let labels: Vec<String> = (0..1500).map(|i| alloc::format!("L{i}")).collect();
        let plot = Rect::new(100.0, 0.0, 400.0, 15_000.0);
        let axis_rect = Rect::new(0.0, 0.0, 100.0, 15_000.0);
        let axis = AxisSpec::left(7, ScaleBandSpec::new(labels)).with_title("label");
        let marks = axis.marks(plot, axis_rect);

        // Domain line, title, and a tick and label per band.
        assert_eq!(marks.len(), 2 + 2 * 1500);
        let ids: hashbrown::HashSet<_> = marks.iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), marks.len());
        assert!(marks.iter().all(|m| m.id.0 < 7 + AXIS_ID_SPAN));
    }

    #[test]
    fn axis_uses_custom_tick_formatter_for_labels() {
        let plot = Rect::new(0.0, 0.0, 100.0, 50.0);
        let axis_rect = Rect::new(0.0, 50.0, 100.0, 60.0);

        let axis = AxisSpec::bottom(1, ScaleLinearSpec::new((0.0, 10.0)))
            .with_tick_count(3)
            .with_tick_formatter(|_v, _step| String::from("X"));

        let marks = axis.marks(plot, axis_rect);
        let labels = texts(&marks);
        assert!(!labels.is_empty());
        assert!(labels.iter().all(|t| t.text == "X"));
    }

    #[test]
    fn axis_left_title_uses_axis_rect_edge() {
        let measurer = HeuristicTextMeasurer;
        let plot = Rect::new(100.0, 0.0, 200.0, 100.0);

        let axis = AxisSpec::left(1, ScaleLinearSpec::new((0.0, 10.0)))
            .with_tick_count(3)
            .with_title("Y")
            .with_title_offset(10.0);

        let w = axis.measure(&measurer);
        let axis_rect = Rect::new(plot.x0 - w, plot.y0, plot.x0, plot.y1);
        let marks = axis.marks(plot, axis_rect);

        let title = marks
            .iter()
            .find(|m| m.id == MarkId::from_raw(1 + TITLE_ID))
            .and_then(|m| m.payload.as_text())
            .expect("missing title");
        let expected = axis_rect.x0 + 0.5 * axis.style.title_font_size;
        assert!((title.pos.x - expected).abs() < 1e-9);
        assert_eq!(title.angle, -90.0);
    }

    #[test]
    fn axis_bottom_title_uses_axis_rect_edge() {
        let measurer = HeuristicTextMeasurer;
        let plot = Rect::new(0.0, 0.0, 100.0, 100.0);

        let axis = AxisSpec::bottom(1, ScaleLinearSpec::new((0.0, 10.0)))
            .with_tick_count(3)
            .with_title("X");

        let h = axis.measure(&measurer);
        let axis_rect = Rect::new(plot.x0, plot.y1, plot.x1, plot.y1 + h);
        let marks = axis.marks(plot, axis_rect);

        let title = marks
            .iter()
            .find(|m| m.id == MarkId::from_raw(1 + TITLE_ID))
            .and_then(|m| m.payload.as_text())
            .expect("missing title");
        let expected = axis_rect.y1 - axis.style.title_font_size;
        assert!((title.pos.y - expected).abs() < 1e-9);
    }

    #[test]
    fn axis_without_ticks_emits_only_the_domain_line() {
        let plot = Rect::new(0.0, 0.0, 100.0, 100.0);
        let axis_rect = Rect::new(0.0, 100.0, 100.0, 120.0);
        let axis = AxisSpec::bottom(1, ScaleLinearSpec::new((0.0, 10.0))).with_ticks(false);
        let lines = axis
            .marks(plot, axis_rect)
            .into_iter()
            .filter(|m| m.kind() == MarkKind::Line)
            .count();
        assert_eq!(lines, 1);
    }

    #[test]
    fn degenerate_axis_draws_baseline_and_title_only() {
        let plot = Rect::new(0.0, 0.0, 100.0, 100.0);
        let axis_rect = Rect::new(0.0, 100.0, 100.0, 130.0);
        let axis = AxisSpec::bottom(1, ScaleLinearSpec::empty().with_nice(true))
            .with_title("x")
            .with_grid(GridStyle::default());
        let marks = axis.marks(plot, axis_rect);
        assert_eq!(marks.len(), 2);
        let MarkPayload::Line(domain) = &marks[0].payload else {
            panic!("expected domain line first");
        };
        assert_eq!(domain.line.p0, Point::new(0.0, 100.0));
        assert_eq!(domain.line.p1, Point::new(100.0, 100.0));
    }

    #[test]
    fn axis_grid_spans_plot_and_includes_domain_endpoints() {
        let plot = Rect::new(0.0, 0.0, 100.0, 100.0);
        let axis_rect = Rect::new(0.0, 100.0, 100.0, 120.0);
        let axis = AxisSpec::bottom(
            1,
            ScaleLinearSpec::new((0.5, 9.5)),
        )
        .with_tick_count(5)
        .with_grid(GridStyle::default());

        let grid: Vec<_> = axis
            .marks(plot, axis_rect)
            .into_iter()
            .filter(|m| m.z_index == z_order::GRID_LINES)
            .filter_map(|m| m.payload.as_line().map(|l| l.line))
            .collect();
        assert!(grid.iter().all(|l| l.p0.y == plot.y0 && l.p1.y == plot.y1));
        assert!(grid.iter().any(|l| (l.p0.x - plot.x0).abs() < 1e-9));
        assert!(grid.iter().any(|l| (l.p0.x - plot.x1).abs() < 1e-9));
    }

    #[test]
    fn band_axis_never_draws_gridlines() {
        let plot = Rect::new(0.0, 0.0, 100.0, 100.0);
        let axis_rect = Rect::new(-30.0, 0.0, 0.0, 100.0);
        let axis =
            AxisSpec::left(1, ScaleBandSpec::new(["A", "B"])).with_grid(GridStyle::default());
        assert!(
            axis.marks(plot, axis_rect)
                .iter()
                .all(|m| m.z_index != z_order::GRID_LINES)
        );
    }
}
