// Copyright 2025 the Plotlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders a plotlet demo chart to an SVG file.

use std::cell::RefCell;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use log::{error, info};
use plotlet_demo::{
    ChartConfig, ChartKind, ChartView, DataSource, Dataset, Result, SvgScene, ViewEvent,
    ViewState,
};

/// Render a plotlet demo chart to SVG.
#[derive(Parser, Debug)]
#[command(name = "plotlet", version, about)]
struct Cli {
    /// TOML config file.
    #[arg(long, conflicts_with = "dataset")]
    config: Option<PathBuf>,

    /// Built-in dataset (and its chart preset).
    #[arg(long, value_enum)]
    dataset: Option<Dataset>,

    /// Chart kind, overriding the preset.
    #[arg(long, value_enum)]
    chart: Option<ChartKind>,

    /// Field for the horizontal axis.
    #[arg(long)]
    x: Option<String>,

    /// Field for the vertical axis.
    #[arg(long)]
    y: Option<String>,

    /// Fetch records from this URL instead of the dataset's source.
    #[arg(long)]
    url: Option<String>,

    /// Output SVG path.
    #[arg(long, short, default_value = "plotlet.svg")]
    out: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_module_path(false)
        .init();

    match run(&Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => ChartConfig::load(path)?,
        None => ChartConfig::for_dataset(cli.dataset.unwrap_or_default()),
    };
    if let Some(chart) = cli.chart {
        config.chart = chart;
    }

    let source = match &cli.url {
        Some(url) => DataSource::remote(url.clone()),
        None => config.data_source()?,
    };

    let svg = Rc::new(RefCell::new(SvgScene::new()));
    let mut view = ChartView::new(config);
    let sink = Rc::clone(&svg);
    view.subscribe(move |frame, diffs| {
        let mut svg = sink.borrow_mut();
        if let Some(frame) = frame {
            svg.set_view_box(frame.view());
        }
        svg.apply_diffs(diffs);
    });

    view.load(source);
    view.wait()?;
    if let ViewState::Error(err) = view.state() {
        return Err(err.clone().into());
    }

    if let Some(x) = &cli.x {
        view.handle(ViewEvent::SelectX(x.clone()))?;
    }
    if let Some(y) = &cli.y {
        view.handle(ViewEvent::SelectY(y.clone()))?;
    }

    std::fs::write(&cli.out, svg.borrow().to_svg_string())?;
    info!("wrote {} ({} marks)", cli.out.display(), svg.borrow().len());
    Ok(())
}
