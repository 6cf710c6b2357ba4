// Copyright 2025 the Plotlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive marks.
//!
//! A mark is one renderable primitive with a stable identity and a paint-order hint.
//! Geometry is stored in scene coordinates; backends only need to place rects, circles,
//! line segments and unshaped text.

extern crate alloc;

use alloc::string::String;

use kurbo::{Circle, Line, Point, Rect, Shape};
use peniko::Brush;
use peniko::color::palette::css;

/// Stable identity for a mark across frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Wraps a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives a per-row id from an id base and a row index.
    pub const fn for_row(base: u64, row: usize) -> Self {
        Self(base.wrapping_add(row as u64))
    }
}

/// The primitive kind of a mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// Filled axis-aligned rectangle.
    Rect,
    /// Filled circle.
    Circle,
    /// Stroked line segment.
    Line,
    /// Single line of text.
    Text,
}

/// Horizontal text alignment relative to the text position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the position.
    Start,
    /// Text is centered on the position.
    Middle,
    /// Text ends at the position.
    End,
}

/// Vertical text alignment relative to the text position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The position is on the alphabetic baseline.
    Alphabetic,
    /// The position is on the vertical middle of the text.
    Middle,
    /// The position is at the top of the text.
    Hanging,
}

/// A filled rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct RectPayload {
    /// Geometry in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
}

/// A filled circle.
#[derive(Clone, Debug, PartialEq)]
pub struct CirclePayload {
    /// Geometry in scene coordinates.
    pub circle: Circle,
    /// Fill paint.
    pub fill: Brush,
}

/// A stroked line segment.
#[derive(Clone, Debug, PartialEq)]
pub struct LinePayload {
    /// Geometry in scene coordinates.
    pub line: Line,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width.
    pub stroke_width: f64,
}

/// A single line of unshaped text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPayload {
    /// Anchor point in scene coordinates.
    pub pos: Point,
    /// The text content.
    pub text: String,
    /// Font size.
    pub font_size: f64,
    /// Rotation in degrees around `pos`.
    pub angle: f64,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
    /// Vertical alignment.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

impl TextPayload {
    /// Creates black, 10px, start-anchored text at `pos`.
    pub fn new(pos: impl Into<Point>, text: impl Into<String>) -> Self {
        Self {
            pos: pos.into(),
            text: text.into(),
            font_size: 10.0,
            angle: 0.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
            fill: css::BLACK.into(),
        }
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the rotation in degrees.
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Sets the horizontal alignment.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the vertical alignment.
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }
}

/// The geometry and paint of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// See [`RectPayload`].
    Rect(RectPayload),
    /// See [`CirclePayload`].
    Circle(CirclePayload),
    /// See [`LinePayload`].
    Line(LinePayload),
    /// See [`TextPayload`].
    Text(TextPayload),
}

impl MarkPayload {
    /// Returns the primitive kind.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Rect(_) => MarkKind::Rect,
            Self::Circle(_) => MarkKind::Circle,
            Self::Line(_) => MarkKind::Line,
            Self::Text(_) => MarkKind::Text,
        }
    }

    /// Returns geometric bounds.
    ///
    /// Text has no intrinsic bounds without a text measurer, so this returns `None`.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect.abs()),
            Self::Circle(c) => Some(c.circle.bounding_box()),
            Self::Line(l) => Some(l.line.bounding_box()),
            Self::Text(_) => None,
        }
    }

    /// Returns the rect payload, if this is a rect.
    pub fn as_rect(&self) -> Option<&RectPayload> {
        match self {
            Self::Rect(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the circle payload, if this is a circle.
    pub fn as_circle(&self) -> Option<&CirclePayload> {
        match self {
            Self::Circle(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the line payload, if this is a line.
    pub fn as_line(&self) -> Option<&LinePayload> {
        match self {
            Self::Line(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the text payload, if this is text.
    pub fn as_text(&self) -> Option<&TextPayload> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// A renderable primitive with stable identity.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Paint-order hint. Renderers sort by `(z_index, id)`.
    pub z_index: i32,
    /// Geometry and paint.
    pub payload: MarkPayload,
}

impl Mark {
    /// Creates a mark at z-index 0.
    pub fn new(id: MarkId, payload: MarkPayload) -> Self {
        Self {
            id,
            z_index: 0,
            payload,
        }
    }

    /// Creates a filled rectangle.
    pub fn rect(id: MarkId, rect: Rect, fill: impl Into<Brush>) -> Self {
        Self::new(
            id,
            MarkPayload::Rect(RectPayload {
                rect,
                fill: fill.into(),
            }),
        )
    }

    /// Creates a filled circle.
    pub fn circle(
        id: MarkId,
        center: impl Into<Point>,
        radius: f64,
        fill: impl Into<Brush>,
    ) -> Self {
        Self::new(
            id,
            MarkPayload::Circle(CirclePayload {
                circle: Circle::new(center, radius),
                fill: fill.into(),
            }),
        )
    }

    /// Creates a stroked line segment.
    pub fn line(
        id: MarkId,
        p0: impl Into<Point>,
        p1: impl Into<Point>,
        stroke: impl Into<Brush>,
        stroke_width: f64,
    ) -> Self {
        Self::new(
            id,
            MarkPayload::Line(LinePayload {
                line: Line::new(p0, p1),
                stroke: stroke.into(),
                stroke_width,
            }),
        )
    }

    /// Creates a text mark.
    pub fn text(id: MarkId, text: TextPayload) -> Self {
        Self::new(id, MarkPayload::Text(text))
    }

    /// Sets the z-index.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Returns the primitive kind.
    pub fn kind(&self) -> MarkKind {
        self.payload.kind()
    }
}
