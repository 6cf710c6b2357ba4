// Copyright 2025 the Plotlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point mark generation.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use peniko::Brush;
use peniko::color::palette::css;
use plotlet_core::{Mark, MarkId, TableData};

use crate::palette::CategoryPalette;
use crate::scale::ScaleLinear;

/// A circle-per-record mark for scatter and strip plots.
///
/// Each record with numeric `x_field` and `y_field` values becomes one circle at
/// `(x_scale(x), y_scale(y))`. Records missing either value are skipped.
#[derive(Clone, Debug)]
pub struct PointMarkSpec {
    /// Stable-id base; the circle for row `i` uses `id_base + i`.
    pub id_base: u64,
    /// Field for x values.
    pub x_field: String,
    /// Field for y values.
    pub y_field: String,
    /// Optional field whose category picks the fill from [`PointMarkSpec::palette`].
    pub category_field: Option<String>,
    /// Colours per category.
    pub palette: CategoryPalette,
    /// X scale mapping data x into scene x.
    pub x_scale: ScaleLinear,
    /// Y scale mapping data y into scene y.
    pub y_scale: ScaleLinear,
    /// Circle radius in scene coordinates.
    pub radius: f64,
    /// Fill used without a category field (or for records without a category).
    pub fill: Brush,
    /// Rendering order hint.
    pub z_index: i32,
}

impl PointMarkSpec {
    /// Creates a point mark spec with a radius of 5 and a black fill.
    pub fn new(
        id_base: u64,
        x_field: impl Into<String>,
        y_field: impl Into<String>,
        x_scale: ScaleLinear,
        y_scale: ScaleLinear,
    ) -> Self {
        Self {
            id_base,
            x_field: x_field.into(),
            y_field: y_field.into(),
            category_field: None,
            palette: CategoryPalette::new(),
            x_scale,
            y_scale,
            radius: 5.0,
            fill: css::BLACK.into(),
            z_index: crate::z_order::SERIES_POINTS,
        }
    }

    /// Colours circles by the category of `field`, using `palette`.
    pub fn with_category(mut self, field: impl Into<String>, palette: CategoryPalette) -> Self {
        self.category_field = Some(field.into());
        self.palette = palette;
        self
    }

    /// Sets the circle radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the fixed fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates one circle per plottable record.
    ///
    /// Mark identity is derived from the row index, so it is stable across frames that
    /// render the same record set.
    pub fn marks(&self, data: &dyn TableData) -> Vec<Mark> {
        let mut palette = self.palette.clone();
        let mut out = Vec::new();
        for row in 0..data.row_count() {
            let (Some(x), Some(y)) = (data.f64(row, &self.x_field), data.f64(row, &self.y_field))
            else {
                continue;
            };
            let fill: Brush = match self
                .category_field
                .as_deref()
                .and_then(|field| data.category(row, field))
            {
                Some(key) => palette.color(&key).into(),
                None => self.fill.clone(),
            };
            out.push(
                Mark::circle(
                    MarkId::for_row(self.id_base, row),
                    (self.x_scale.map(x), self.y_scale.map(y)),
                    self.radius,
                    fill,
                )
                .with_z_index(self.z_index),
            );
        }
        out
    }
}
