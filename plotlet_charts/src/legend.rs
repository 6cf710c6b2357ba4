// Copyright 2025 the Plotlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend mark generation.
//!
//! A "swatches + labels" legend: one coloured square and one text label per category,
//! stacked in rows (optionally wrapped into columns).

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::color::palette::css;
use peniko::{Brush, Color};
use plotlet_core::{Mark, MarkId, TableData, TextAnchor, TextBaseline, TextPayload};

use crate::layout::Size;
use crate::measure::{TextMeasurer, TextStyle};
use crate::palette::CategoryPalette;
use crate::z_order;

fn union_rect(a: Rect, b: Rect) -> Rect {
    Rect::new(
        a.x0.min(b.x0),
        a.y0.min(b.y0),
        a.x1.max(b.x1),
        a.y1.max(b.y1),
    )
}

fn text_bounds(
    x: f64,
    y: f64,
    size: (f64, f64),
    anchor: TextAnchor,
    baseline: TextBaseline,
) -> Rect {
    let (w, h) = size;
    let (x0, x1) = match anchor {
        TextAnchor::Start => (x, x + w),
        TextAnchor::Middle => (x - w * 0.5, x + w * 0.5),
        TextAnchor::End => (x - w, x),
    };
    let (y0, y1) = match baseline {
        TextBaseline::Middle => (y - h * 0.5, y + h * 0.5),
        TextBaseline::Alphabetic => (y - h, y),
        TextBaseline::Hanging => (y, y + h),
    };
    Rect::new(x0, y0, x1, y1)
}

/// A simple legend row item.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    /// The label string shown next to the swatch.
    pub label: String,
    /// The swatch fill paint.
    pub fill: Brush,
}

impl LegendItem {
    /// Convenience constructor for a solid-color swatch.
    pub fn solid(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            fill: Brush::Solid(color),
        }
    }
}

/// Builds one legend item per distinct value of `field`, in first-seen order.
///
/// Colours come from `palette`; keys it has not seen yet are assigned on the way.
pub fn legend_items(
    data: &dyn TableData,
    field: &str,
    palette: &mut CategoryPalette,
) -> Vec<LegendItem> {
    plotlet_core::distinct_categories(data, field)
        .into_iter()
        .map(|label| {
            let color = palette.color(&label);
            LegendItem::solid(label, color)
        })
        .collect()
}

/// Id offset of the first label; swatches occupy the lane below it.
const LABEL_IDS: u64 = 1 << 20;

/// Number of ids a legend reserves above its `id_base`.
pub const LEGEND_ID_SPAN: u64 = 2 << 20;

/// A positioned legend: a vertical list of colour swatches with text labels.
#[derive(Clone, Debug)]
pub struct LegendSwatches {
    /// Stable-id base; generated marks use ids in `id_base..id_base + LEGEND_ID_SPAN`.
    pub id_base: u64,
    /// Legend origin (top-left).
    pub x: f64,
    /// Legend origin (top-left).
    pub y: f64,
    /// Swatch square size.
    pub swatch_size: f64,
    /// Vertical gap between rows.
    pub row_gap: f64,
    /// Horizontal gap between swatch and label.
    pub label_dx: f64,
    /// Number of columns.
    ///
    /// Items are laid out top-to-bottom, then left-to-right into columns.
    pub columns: usize,
    /// Horizontal gap between columns.
    pub column_gap: f64,
    /// Label font size.
    pub font_size: f64,
    /// Label color.
    pub text_fill: Brush,
    /// Items in display order.
    pub items: Vec<LegendItem>,
}

struct RowSlot {
    swatch: Rect,
    label_x: f64,
    label_y: f64,
}

impl LegendSwatches {
    fn row_height(&self) -> f64 {
        self.swatch_size.max(self.font_size)
    }

    fn slots(&self) -> impl Iterator<Item = (usize, &LegendItem, RowSlot)> + '_ {
        let column_width = self.column_width();
        let columns = self.columns.max(1);
        let rows_per_col = self.items.len().div_ceil(columns).max(1);
        let row_height = self.row_height();
        self.items.iter().enumerate().map(move |(i, item)| {
            let col = i / rows_per_col;
            let row = i % rows_per_col;
            let x = self.x + col as f64 * (column_width + self.column_gap);
            let y = self.y + row as f64 * (row_height + self.row_gap);
            let swatch_y = y + (row_height - self.swatch_size) * 0.5;
            let slot = RowSlot {
                swatch: Rect::new(x, swatch_y, x + self.swatch_size, swatch_y + self.swatch_size),
                label_x: x + self.swatch_size + self.label_dx,
                label_y: y + row_height * 0.5,
            };
            (i, item, slot)
        })
    }

    fn column_width(&self) -> f64 {
        self.swatch_size + self.label_dx
    }

    /// Generate legend marks (swatch rect + label text per item).
    pub fn marks(&self) -> Vec<Mark> {
        let mut out = Vec::with_capacity(self.items.len() * 2);
        for (i, item, slot) in self.slots() {
            out.push(
                Mark::rect(
                    MarkId::from_raw(self.id_base + i as u64),
                    slot.swatch,
                    item.fill.clone(),
                )
                .with_z_index(z_order::LEGEND_SWATCHES),
            );
            out.push(
                Mark::text(
                    MarkId::from_raw(self.id_base + LABEL_IDS + i as u64),
                    TextPayload::new((slot.label_x, slot.label_y), item.label.clone())
                        .with_font_size(self.font_size)
                        .with_fill(self.text_fill.clone())
                        .with_anchor(TextAnchor::Start)
                        .with_baseline(TextBaseline::Middle),
                )
                .with_z_index(z_order::LEGEND_LABELS),
            );
        }
        out
    }

    /// Estimates legend bounds using the provided text measurer.
    ///
    /// An empty legend has zero-size bounds at its origin.
    pub fn bounds(&self, measurer: &dyn TextMeasurer) -> Rect {
        let style = TextStyle::new(self.font_size);
        let mut bounds: Option<Rect> = None;
        for (_, item, slot) in self.slots() {
            let metrics = measurer.measure(&item.label, style);
            let label = text_bounds(
                slot.label_x,
                slot.label_y,
                (metrics.advance_width, metrics.line_height()),
                TextAnchor::Start,
                TextBaseline::Middle,
            );
            let row = union_rect(slot.swatch, label);
            bounds = Some(match bounds {
                None => row,
                Some(r) => union_rect(r, row),
            });
        }
        bounds.unwrap_or_else(|| Rect::new(self.x, self.y, self.x, self.y))
    }
}

/// An unpositioned legend specification (swatches + labels).
///
/// Use this with a measure/arrange layout pass:
/// - Measure: call [`LegendSwatchesSpec::measure`] to get a desired size.
/// - Arrange: call [`LegendSwatchesSpec::at`] once you know the origin.
#[derive(Clone, Debug)]
pub struct LegendSwatchesSpec {
    /// Stable-id base; generated marks use ids in `id_base..id_base + LEGEND_ID_SPAN`.
    pub id_base: u64,
    /// Swatch square size.
    pub swatch_size: f64,
    /// Vertical gap between rows.
    pub row_gap: f64,
    /// Horizontal gap between swatch and label.
    pub label_dx: f64,
    /// Number of columns.
    pub columns: usize,
    /// Horizontal gap between columns.
    pub column_gap: f64,
    /// Label font size.
    pub font_size: f64,
    /// Label color.
    pub text_fill: Brush,
    /// Items in display order.
    pub items: Vec<LegendItem>,
}

impl LegendSwatchesSpec {
    /// Creates a new legend specification.
    ///
    /// Defaults give 10px swatches on a 20px row pitch with labels starting 20px from
    /// the row origin.
    pub fn new(id_base: u64, items: Vec<LegendItem>) -> Self {
        Self {
            id_base,
            swatch_size: 10.0,
            row_gap: 10.0,
            label_dx: 10.0,
            columns: 1,
            column_gap: 12.0,
            font_size: 10.0,
            text_fill: css::BLACK.into(),
            items,
        }
    }

    /// Set the label text paint.
    pub fn with_text_fill(mut self, text_fill: impl Into<Brush>) -> Self {
        self.text_fill = text_fill.into();
        self
    }

    /// Set the label font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Set the swatch size.
    pub fn with_swatch_size(mut self, swatch_size: f64) -> Self {
        self.swatch_size = swatch_size;
        self
    }

    /// Set the vertical gap between rows.
    pub fn with_row_gap(mut self, row_gap: f64) -> Self {
        self.row_gap = row_gap.max(0.0);
        self
    }

    /// Set the gap between swatch and label.
    pub fn with_label_dx(mut self, label_dx: f64) -> Self {
        self.label_dx = label_dx;
        self
    }

    /// Sets the number of columns.
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    /// Sets the gap between columns.
    pub fn with_column_gap(mut self, column_gap: f64) -> Self {
        self.column_gap = column_gap.max(0.0);
        self
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Measures the desired legend size (width/height).
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> Size {
        let b = self.at(0.0, 0.0).bounds(measurer);
        Size {
            width: b.width(),
            height: b.height(),
        }
    }

    /// Creates a positioned legend at the given origin.
    pub fn at(&self, x: f64, y: f64) -> LegendSwatches {
        LegendSwatches {
            id_base: self.id_base,
            x,
            y,
            swatch_size: self.swatch_size,
            row_gap: self.row_gap,
            label_dx: self.label_dx,
            columns: self.columns,
            column_gap: self.column_gap,
            font_size: self.font_size,
            text_fill: self.text_fill.clone(),
            items: self.items.clone(),
        }
    }

    /// Generates marks for this legend for the given origin.
    pub fn marks(&self, x: f64, y: f64) -> Vec<Mark> {
        self.at(x, y).marks()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use plotlet_core::{Record, RecordSet};

    use super::*;
    use crate::measure::HeuristicTextMeasurer;
    use crate::palette::CATEGORY10;

    fn items() -> Vec<LegendItem> {
        vec![
            LegendItem::solid("A", css::BLACK),
            LegendItem::solid("BBBB", css::BLACK),
            LegendItem::solid("CC", css::BLACK),
            LegendItem::solid("DDDDDD", css::BLACK),
        ]
    }

    #[test]
    fn rows_use_a_fixed_pitch() {
        let spec = LegendSwatchesSpec::new(1, items());
        let marks = spec.marks(420.0, 20.0);
        let swatches: Vec<Rect> = marks
            .iter()
            .filter_map(|m| m.payload.as_rect().map(|r| r.rect))
            .collect();
        assert_eq!(swatches.len(), 4);
        assert_eq!(swatches[0], Rect::new(420.0, 20.0, 430.0, 30.0));
        assert_eq!(swatches[1].y0, 40.0);

        let first_label = marks
            .iter()
            .find_map(|m| m.payload.as_text())
            .expect("label");
        assert_eq!(first_label.pos.x, 440.0);
        assert_eq!(first_label.text, "A");
    }

    #[test]
    fn measure_accounts_for_columns() {
        let measurer = HeuristicTextMeasurer;
        let one_col = LegendSwatchesSpec::new(1, items()).with_columns(1);
        let two_col = LegendSwatchesSpec::new(1, items()).with_columns(2);

        let s1 = one_col.measure(&measurer);
        let s2 = two_col.measure(&measurer);

        assert!(s2.width > s1.width);
        assert!(s2.height < s1.height);
    }

    #[test]
    fn bounds_match_measure_at_origin() {
        let measurer = HeuristicTextMeasurer;
        let spec = LegendSwatchesSpec::new(1, items()).with_columns(2);

        let desired = spec.measure(&measurer);
        let legend = spec.at(10.0, 20.0);
        let b = legend.bounds(&measurer);

        assert_eq!(b.x0, 10.0);
        assert_eq!(b.y0, 20.0);
        assert!((b.width() - desired.width).abs() < 1e-6);
        assert!((b.height() - desired.height).abs() < 1e-6);
    }

    #[test]
    fn long_legends_keep_every_mark_id_distinct() {
        let many = (0..1500)
            .map(|i| LegendItem::solid(alloc::format!("item {i}"), css::BLACK))
            .collect();
        let marks = LegendSwatchesSpec::new(1, many).marks(0.0, 0.0);
        assert_eq!(marks.len(), 3000);
        let ids: hashbrown::HashSet<_> = marks.iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), 3000);
    }

    #[test]
    fn empty_legend_has_no_marks_and_zero_size() {
        let spec = LegendSwatchesSpec::new(1, Vec::new());
        assert!(spec.marks(0.0, 0.0).is_empty());
        let size = spec.measure(&HeuristicTextMeasurer);
        assert_eq!(size.width, 0.0);
        assert_eq!(size.height, 0.0);
    }

    #[test]
    fn legend_items_follow_first_seen_order_and_palette() {
        let data = RecordSet::new(vec![
            Record::new().with("species", "virginica"),
            Record::new().with("species", "setosa"),
            Record::new().with("species", "virginica"),
            Record::new().with("other", 1.0),
        ]);
        let mut palette = CategoryPalette::new();
        let items = legend_items(&data, "species", &mut palette);
        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["virginica", "setosa"]);
        assert_eq!(items[1].fill, Brush::Solid(CATEGORY10[1]));
    }
}
