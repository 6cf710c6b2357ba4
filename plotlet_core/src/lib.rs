// Copyright 2025 the Plotlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core data and output model for `plotlet`.
//!
//! This crate owns the two ends of the chart pipeline:
//! - **Records**: flat, immutable rows addressed by field name, grouped into a
//!   versioned [`RecordSet`] that is replaced wholesale on reload.
//! - **Marks**: a declarative tree of primitive shapes (rects, circles, lines, text)
//!   that any vector backend can place, plus a [`Scene`] that swaps whole frames and
//!   reports what entered, changed and left.
//!
//! Scales, axes and legends live in `plotlet_charts`.

#![no_std]

extern crate alloc;

mod mark;
mod scene;
mod table;

pub use mark::{
    CirclePayload, LinePayload, Mark, MarkId, MarkKind, MarkPayload, RectPayload, TextAnchor,
    TextBaseline, TextPayload,
};
pub use scene::{MarkDiff, Scene};
pub use table::{Record, RecordSet, TableData, Value, distinct_categories};
