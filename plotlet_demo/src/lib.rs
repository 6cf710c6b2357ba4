// Copyright 2025 the Plotlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart demos for `plotlet`.
//!
//! This crate wires the pure chart pipeline in `plotlet_charts` to the outside world:
//! - [`ChartConfig`]: presets per [`Dataset`], overridable from TOML.
//! - [`DataSource`]: inline records or a remote JSON array, fetched through an
//!   [`HttpClient`].
//! - [`ChartView`]: the Loading/Ready/Error state machine that re-renders whenever the
//!   records or the axis selection change.
//! - [`SvgScene`]: a retained SVG writer fed by mark diffs.

mod config;
mod error;
mod source;
mod svg;
mod view;

pub use config::{BarConfig, BarsFile, ChartConfig, ChartKind, ConfigFile, MarginsFile};
pub use error::{DataFetchError, PlotletError, Result};
pub use source::{
    DataSource, Dataset, GroupedSeries, HttpClient, IRIS_URL, LABEL_FIELD, NamedSeries,
    ReqwestClient, SERIES_FIELD, VALUE_FIELD, fetch_records, parse_records, temperature_records,
};
pub use svg::SvgScene;
pub use view::{ChartView, ViewEvent, ViewState, render_frame};
