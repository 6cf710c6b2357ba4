// Copyright 2025 the Plotlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The chart view: a Loading/Ready/Error state machine that re-renders on change.
//!
//! A [`ChartView`] owns the configuration, the current record set and the [`Scene`].
//! Rendering is synchronous and runs on the owning thread. The only concurrent work is
//! a remote fetch, which runs on a worker thread and reports back over a channel that
//! [`ChartView::poll`] or [`ChartView::wait`] drains.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use log::{debug, info, warn};
use peniko::color::palette::css;
use plotlet_charts::{
    ChartFrame, GroupedBarChartSpec, HeuristicTextMeasurer, ScatterChartSpec, Size, TextMeasurer,
};
use plotlet_core::{MarkDiff, Record, RecordSet, Scene, TableData};

use crate::config::{ChartConfig, ChartKind};
use crate::error::{DataFetchError, Result};
use crate::source::{DataSource, HttpClient, ReqwestClient, SERIES_FIELD, fetch_records};

/// Lifecycle of the view's data.
#[derive(Clone, Debug)]
pub enum ViewState {
    /// No records yet; a load is pending (or was cancelled).
    Loading,
    /// Records are loaded and the chart is drawn.
    Ready(RecordSet),
    /// The last load failed. No chart is drawn and nothing is retried.
    Error(DataFetchError),
}

impl ViewState {
    /// Returns the loaded records, if ready.
    pub fn records(&self) -> Option<&RecordSet> {
        match self {
            Self::Ready(records) => Some(records),
            _ => None,
        }
    }
}

/// Inputs that drive the view.
#[derive(Clone, Debug)]
pub enum ViewEvent {
    /// A load finished.
    DataLoaded(std::result::Result<Vec<Record>, DataFetchError>),
    /// Select the horizontal field.
    SelectX(String),
    /// Select the vertical field.
    SelectY(String),
}

type Subscriber = Box<dyn FnMut(Option<&ChartFrame>, &[MarkDiff])>;

type FetchResult = std::result::Result<Vec<Record>, DataFetchError>;

struct PendingFetch {
    url: String,
    results: Receiver<FetchResult>,
    cancelled: Arc<AtomicBool>,
}

impl PendingFetch {
    fn spawn(client: Arc<dyn HttpClient>, url: String) -> Self {
        let (tx, results) = mpsc::channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let worker_url = url.clone();
        thread::spawn(move || {
            let result = fetch_records(&*client, &worker_url);
            if flag.load(Ordering::Acquire) {
                debug!("discarding cancelled fetch of {worker_url}");
                return;
            }
            // The view may already be gone.
            let _ = tx.send(result);
        });
        Self {
            url,
            results,
            cancelled,
        }
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

/// A chart that re-renders whenever its data or axis selection changes.
///
/// Every render builds a fresh [`ChartFrame`] and ticks the [`Scene`], so the diffs handed
/// to subscribers always replace the previous frame completely.
pub struct ChartView {
    config: ChartConfig,
    state: ViewState,
    client: Arc<dyn HttpClient>,
    measurer: Box<dyn TextMeasurer>,
    scene: Scene,
    frame: Option<ChartFrame>,
    /// The most recently loaded records, kept across reloads and errors for versioning.
    last_records: Option<RecordSet>,
    pending: Option<PendingFetch>,
    subscribers: Vec<Subscriber>,
}

impl fmt::Debug for ChartView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartView")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("scene_len", &self.scene.len())
            .field("frame", &self.frame.is_some())
            .field("pending", &self.pending.as_ref().map(|p| p.url.as_str()))
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl ChartView {
    /// Creates a view that fetches with a [`ReqwestClient`].
    pub fn new(config: ChartConfig) -> Self {
        let client = Arc::new(ReqwestClient::new(config.fetch_timeout()));
        Self::with_client(config, client)
    }

    /// Creates a view that fetches through `client`.
    pub fn with_client(config: ChartConfig, client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            state: ViewState::Loading,
            client,
            measurer: Box::new(HeuristicTextMeasurer),
            scene: Scene::new(),
            frame: None,
            last_records: None,
            pending: None,
            subscribers: Vec::new(),
        }
    }

    /// Replaces the text measurer used for layout.
    pub fn with_measurer(mut self, measurer: Box<dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Returns the current state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Returns the last rendered frame, if the view is ready.
    pub fn frame(&self) -> Option<&ChartFrame> {
        self.frame.as_ref()
    }

    /// Returns `true` while a remote fetch is in flight.
    pub fn is_fetching(&self) -> bool {
        self.pending.is_some()
    }

    /// Registers a callback run after every render and every clear.
    ///
    /// The frame is `None` when the chart was cleared (reload or load error).
    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(Option<&ChartFrame>, &[MarkDiff]) + 'static,
    ) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Starts loading `source`, superseding any load in flight.
    ///
    /// Inline records are ready immediately; remote sources leave the view `Loading`
    /// until [`poll`](Self::poll) or [`wait`](Self::wait) picks up the result.
    pub fn load(&mut self, source: DataSource) {
        self.cancel();
        self.enter_loading();
        match source {
            DataSource::Inline(records) => {
                self.loaded(records);
            }
            DataSource::Remote { url } => {
                info!("fetching {url}");
                self.pending = Some(PendingFetch::spawn(Arc::clone(&self.client), url));
            }
        }
    }

    /// Applies one event.
    ///
    /// Selecting a field outside the configured list fails with
    /// [`PlotletError::InvalidField`](crate::PlotletError::InvalidField) and changes nothing.
    pub fn handle(&mut self, event: ViewEvent) -> Result<()> {
        match event {
            ViewEvent::DataLoaded(Ok(records)) => {
                self.pending = None;
                self.loaded(records);
            }
            ViewEvent::DataLoaded(Err(err)) => {
                self.pending = None;
                warn!("data load failed: {err}");
                self.state = ViewState::Error(err);
                self.clear();
            }
            ViewEvent::SelectX(field) => {
                self.select(&field)?;
                info!("x field: {} -> {field}", self.config.x_field);
                self.config.x_field = field;
                self.render();
            }
            ViewEvent::SelectY(field) => {
                self.select(&field)?;
                info!("y field: {} -> {field}", self.config.y_field);
                self.config.y_field = field;
                self.render();
            }
        }
        Ok(())
    }

    /// Applies a finished fetch without blocking. Returns `true` if one was applied.
    pub fn poll(&mut self) -> Result<bool> {
        let Some(pending) = &self.pending else {
            return Ok(false);
        };
        let result = match pending.results.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return Ok(false),
            Err(TryRecvError::Disconnected) => Err(worker_stopped(&pending.url)),
        };
        self.handle(ViewEvent::DataLoaded(result))?;
        Ok(true)
    }

    /// Blocks until the fetch in flight (if any) finishes, then applies it.
    pub fn wait(&mut self) -> Result<()> {
        let Some(pending) = &self.pending else {
            return Ok(());
        };
        let result = pending
            .results
            .recv()
            .unwrap_or_else(|_| Err(worker_stopped(&pending.url)));
        self.handle(ViewEvent::DataLoaded(result))
    }

    /// Abandons the fetch in flight. Its result will never reach the view.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            info!("cancelling fetch of {}", pending.url);
            pending.cancel();
        }
    }

    fn select(&self, field: &str) -> Result<()> {
        self.config.check_field(field).inspect_err(|err| {
            warn!("rejected selection: {err}");
        })
    }

    fn enter_loading(&mut self) {
        if !matches!(self.state, ViewState::Loading) {
            info!("view: loading");
        }
        self.state = ViewState::Loading;
        self.clear();
    }

    fn loaded(&mut self, rows: Vec<Record>) {
        let records = match &self.last_records {
            Some(previous) => previous.replaced(rows),
            None => RecordSet::new(rows),
        };
        self.last_records = Some(records.clone());
        info!(
            "view: ready with {} records (version {})",
            records.len(),
            records.version()
        );
        self.state = ViewState::Ready(records);
        self.render();
    }

    fn clear(&mut self) {
        if self.frame.take().is_none() && self.scene.is_empty() {
            return;
        }
        let diffs = self.scene.clear();
        for subscriber in &mut self.subscribers {
            subscriber(None, &diffs);
        }
    }

    fn render(&mut self) {
        let ViewState::Ready(records) = &self.state else {
            return;
        };
        let frame = render_frame(&self.config, records, &*self.measurer);
        let diffs = self.scene.tick(frame.marks.iter().cloned());
        debug!(
            "rendered {} marks ({} diffs, frame {})",
            frame.marks.len(),
            diffs.len(),
            self.scene.frame()
        );
        for subscriber in &mut self.subscribers {
            subscriber(Some(&frame), &diffs);
        }
        self.frame = Some(frame);
    }
}

impl Drop for ChartView {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn worker_stopped(url: &str) -> DataFetchError {
    DataFetchError::Http {
        url: url.to_string(),
        message: "fetch worker stopped without a result".to_string(),
    }
}

/// Renders the configured chart for `data`.
pub fn render_frame(
    config: &ChartConfig,
    data: &dyn TableData,
    measurer: &dyn TextMeasurer,
) -> ChartFrame {
    let x_title = config.x_title.as_deref().unwrap_or(&config.x_field);
    let y_title = config.y_title.as_deref().unwrap_or(&config.y_field);
    let plot_size = Size::new(config.width, config.height);

    match config.chart {
        ChartKind::Scatter => {
            let mut spec = ScatterChartSpec::new(&*config.x_field, &*config.y_field)
                .with_titles(x_title, y_title)
                .with_margins(config.margins)
                .with_plot_size(plot_size);
            if let Some(category) = &config.category_field {
                spec = spec.with_category(category.clone());
            }
            spec.render(data, measurer)
        }
        ChartKind::Strip => ScatterChartSpec::new(&*config.x_field, &*config.y_field)
            .with_titles(x_title, y_title)
            .with_margins(config.margins)
            .with_plot_size(plot_size)
            .with_x_zero(true)
            .with_grid(true)
            .with_fill(css::ORANGE)
            .render(data, measurer),
        ChartKind::Bars => GroupedBarChartSpec::new(
            &*config.y_field,
            config.category_field.as_deref().unwrap_or(SERIES_FIELD),
            &*config.x_field,
        )
        .with_padding(config.bars.padding)
        .with_row_height(config.bars.row_height)
        .with_series_gap(config.bars.series_gap)
        .with_width(config.width)
        .with_margins(config.margins)
        .with_x_title(x_title)
        .render(data, measurer),
    }
}
