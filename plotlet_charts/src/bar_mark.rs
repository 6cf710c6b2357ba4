// Copyright 2025 the Plotlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouped horizontal bar mark generation.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use plotlet_core::{Mark, MarkId, TableData};

use crate::palette::CategoryPalette;
use crate::scale::{ScaleBand, ScaleLinear};

/// Horizontal bars grouped by a band label and split by series.
///
/// Input is long-format: each record carries a label, a series name and a value. Within
/// a band the series share the band width equally, in the order of
/// [`GroupedBarMarkSpec::series`]. Bars grow from `baseline` along the x scale.
#[derive(Clone, Debug)]
pub struct GroupedBarMarkSpec {
    /// Stable-id base; the bar for row `i` uses `id_base + i`.
    pub id_base: u64,
    /// Field naming the band each record belongs to.
    pub label_field: String,
    /// Field naming the series each record belongs to.
    pub series_field: String,
    /// Field holding the bar value.
    pub value_field: String,
    /// Band scale along y.
    pub band: ScaleBand,
    /// Linear scale along x.
    pub x_scale: ScaleLinear,
    /// Series names in sub-band order.
    pub series: Vec<String>,
    /// Baseline in data units (typically `0.0`).
    pub baseline: f64,
    /// Gap subtracted from each bar's thickness.
    pub series_gap: f64,
    /// Colours per series.
    pub palette: CategoryPalette,
    /// Rendering order hint.
    pub z_index: i32,
}

impl GroupedBarMarkSpec {
    /// Creates a grouped bar spec with `baseline = 0` and no series gap.
    ///
    /// The palette is seeded with `series` so colours follow series order.
    pub fn new(
        id_base: u64,
        fields: [&str; 3],
        band: ScaleBand,
        x_scale: ScaleLinear,
        series: Vec<String>,
    ) -> Self {
        let [label_field, series_field, value_field] = fields;
        Self {
            id_base,
            label_field: label_field.into(),
            series_field: series_field.into(),
            value_field: value_field.into(),
            band,
            x_scale,
            palette: CategoryPalette::from_categories(series.iter().cloned()),
            series,
            baseline: 0.0,
            series_gap: 0.0,
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Sets the baseline in data units.
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the gap subtracted from each bar's thickness.
    pub fn with_series_gap(mut self, series_gap: f64) -> Self {
        self.series_gap = series_gap;
        self
    }

    /// Replaces the series palette.
    pub fn with_palette(mut self, palette: CategoryPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Returns the thickness of one bar.
    pub fn bar_thickness(&self) -> f64 {
        let n = self.series.len().max(1) as f64;
        (self.band.band_width() / n - self.series_gap).max(0.0)
    }

    /// Generates one rectangle per plottable record.
    ///
    /// Records with an unknown label or series, or a non-numeric value, are skipped.
    pub fn marks(&self, data: &dyn TableData) -> Vec<Mark> {
        let mut palette = self.palette.clone();
        let slot = self.band.band_width() / self.series.len().max(1) as f64;
        let thickness = self.bar_thickness();
        let x0 = self.x_scale.map(self.baseline);

        let mut out = Vec::new();
        for row in 0..data.row_count() {
            let Some(label) = data.category(row, &self.label_field) else {
                continue;
            };
            let Some(series) = data.category(row, &self.series_field) else {
                continue;
            };
            let Some(value) = data.f64(row, &self.value_field) else {
                continue;
            };
            let (Some(band_y), Some(series_index)) = (
                self.band.position(&label),
                self.series.iter().position(|s| *s == series),
            ) else {
                continue;
            };

            let y = band_y + series_index as f64 * slot;
            let x1 = self.x_scale.map(value);
            let fill = palette.color(&series);
            out.push(
                Mark::rect(
                    MarkId::for_row(self.id_base, row),
                    Rect::new(x0.min(x1), y, x0.max(x1), y + thickness),
                    fill,
                )
                .with_z_index(self.z_index),
            );
        }
        out
    }
}
