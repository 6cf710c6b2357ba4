// Copyright 2025 the Plotlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use plotlet_core::{MarkDiff, MarkKind, Record, RecordSet, Scene};

use crate::{CATEGORY10, ChartFrame, GroupedBarChartSpec, HeuristicTextMeasurer, ScatterChartSpec};

fn iris() -> RecordSet {
    let rows = [
        (5.1, 3.5, 0.2, "setosa"),
        (4.9, 3.0, 0.2, "setosa"),
        (7.0, 3.2, 1.4, "versicolor"),
        (6.4, 3.2, 1.5, "versicolor"),
        (6.3, 3.3, 2.5, "virginica"),
        (5.8, 2.7, 1.9, "virginica"),
    ];
    rows.iter()
        .map(|&(sl, sw, pw, species)| {
            Record::new()
                .with("sepalLength", sl)
                .with("sepalWidth", sw)
                .with("petalWidth", pw)
                .with("species", species)
        })
        .collect()
}

fn circle_centers(frame: &ChartFrame) -> Vec<Point> {
    frame
        .marks
        .iter()
        .filter_map(|m| m.payload.as_circle().map(|c| c.circle.center))
        .collect()
}

fn assert_rect_close(a: Rect, b: Rect) {
    let eps = 1e-9;
    assert!((a.x0 - b.x0).abs() <= eps, "x0 {a:?} != {b:?}");
    assert!((a.y0 - b.y0).abs() <= eps, "y0 {a:?} != {b:?}");
    assert!((a.x1 - b.x1).abs() <= eps, "x1 {a:?} != {b:?}");
    assert!((a.y1 - b.y1).abs() <= eps, "y1 {a:?} != {b:?}");
}

#[test]
fn scatter_places_points_and_legend() {
    let data = iris();
    let frame = ScatterChartSpec::new("sepalLength", "sepalWidth")
        .with_category("species")
        .render(&data, &HeuristicTextMeasurer);

    assert_eq!(frame.layout.plot, Rect::new(100.0, 50.0, 500.0, 450.0));
    assert_eq!(circle_centers(&frame).len(), 6);

    let labels: Vec<&str> = frame.legend.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, ["setosa", "versicolor", "virginica"]);

    let x_scale = frame.x_scale.expect("x scale");
    assert_eq!(x_scale.domain(), Some((4.8, 7.0)));
    let first = frame.marks[0].payload.as_circle().expect("first mark is a point");
    assert!((first.circle.center.x - x_scale.map(5.1)).abs() < 1e-9);
    assert_eq!(first.fill, peniko::Brush::Solid(CATEGORY10[0]));

    let legend = frame.layout.legend.expect("legend rect");
    assert_eq!((legend.x0, legend.y0), (520.0, 70.0));
}

#[test]
fn equal_temperatures_share_an_x_position() {
    let data = RecordSet::new(vec![
        Record::new().with("month", 1).with("temperature", 10.0),
        Record::new().with("month", 2).with("temperature", 10.0),
        Record::new().with("month", 3).with("temperature", 14.0),
    ]);
    let frame = ScatterChartSpec::new("temperature", "month")
        .with_x_zero(true)
        .render(&data, &HeuristicTextMeasurer);

    let centers = circle_centers(&frame);
    assert_eq!(centers.len(), 3);
    assert_eq!(centers[0].x, centers[1].x);
    assert_ne!(centers[0].y, centers[1].y);
    let (d0, _) = frame.x_scale.and_then(|s| s.domain()).expect("domain");
    assert_eq!(d0, 0.0);
}

#[test]
fn empty_data_renders_axis_baselines_only() {
    let frame = ScatterChartSpec::new("sepalLength", "sepalWidth")
        .with_category("species")
        .render(&RecordSet::empty(), &HeuristicTextMeasurer);

    assert!(frame.legend.is_empty());
    assert!(frame.layout.legend.is_none());
    assert_eq!(frame.marks.len(), 2);
    assert!(frame.marks.iter().all(|m| m.kind() == MarkKind::Line));
    assert!(!frame.x_scale.expect("x scale").is_defined());
}

#[test]
fn changing_x_field_leaves_y_untouched() {
    let data = iris();
    let before = ScatterChartSpec::new("sepalLength", "sepalWidth")
        .with_category("species")
        .render(&data, &HeuristicTextMeasurer);
    let after = ScatterChartSpec::new("petalWidth", "sepalWidth")
        .with_category("species")
        .render(&data, &HeuristicTextMeasurer);

    assert_eq!(before.y_scale, after.y_scale);
    assert_ne!(before.x_scale, after.x_scale);

    let ys_before: Vec<f64> = circle_centers(&before).iter().map(|p| p.y).collect();
    let ys_after: Vec<f64> = circle_centers(&after).iter().map(|p| p.y).collect();
    assert_eq!(ys_before, ys_after);

    let xs_before: Vec<f64> = circle_centers(&before).iter().map(|p| p.x).collect();
    let xs_after: Vec<f64> = circle_centers(&after).iter().map(|p| p.x).collect();
    assert_ne!(xs_before, xs_after);
}

#[test]
fn re_render_is_idempotent() {
    let data = iris();
    let spec = ScatterChartSpec::new("sepalLength", "sepalWidth").with_category("species");
    let a = spec.render(&data, &HeuristicTextMeasurer);
    let b = spec.render(&data, &HeuristicTextMeasurer);
    assert_eq!(a.marks, b.marks);

    let mut scene = Scene::new();
    let first = scene.tick(a.marks);
    assert!(first.iter().all(|d| matches!(d, MarkDiff::Enter { .. })));
    let second = scene.tick(b.marks);
    assert!(second.is_empty(), "unexpected diffs: {second:?}");
}

#[test]
fn switching_fields_replaces_the_frame_without_stale_marks() {
    let data = iris();
    let mut scene = Scene::new();
    let a = ScatterChartSpec::new("sepalLength", "sepalWidth")
        .with_category("species")
        .render(&data, &HeuristicTextMeasurer);
    let a_len = a.marks.len();
    scene.tick(a.marks);

    let b = ScatterChartSpec::new("petalWidth", "sepalWidth")
        .with_category("species")
        .render(&data, &HeuristicTextMeasurer);
    let b_ids: Vec<_> = b.marks.iter().map(|m| m.id).collect();
    scene.tick(b.marks);

    assert_eq!(scene.len(), b_ids.len());
    assert!(a_len > 0);
    assert!(b_ids.iter().all(|id| scene.get(*id).is_some()));
}

fn grouped() -> RecordSet {
    let mut rows = Vec::new();
    let series = [
        ("data", [123.0, 456.0, 789.0]),
        ("another data", [234.0, 567.0, 891.0]),
    ];
    for (series, values) in series {
        for (label, value) in ["A", "B", "C"].into_iter().zip(values) {
            rows.push(
                Record::new()
                    .with("label", label)
                    .with("series", series)
                    .with("value", value),
            );
        }
    }
    RecordSet::new(rows)
}

#[test]
fn grouped_bars_grow_from_zero_and_split_bands() {
    let spec = GroupedBarChartSpec::new("label", "series", "value");
    let frame = spec.render(&grouped(), &HeuristicTextMeasurer);

    let plot = frame.layout.plot;
    assert_eq!(plot, Rect::new(100.0, 0.0, 900.0, 300.0));
    assert_eq!(frame.x_scale.and_then(|s| s.domain()), Some((0.0, 900.0)));

    let band = frame.y_band.clone().expect("band scale");
    let bars: Vec<Rect> = frame
        .marks
        .iter()
        .filter(|m| m.z_index == crate::SERIES_FILL)
        .filter_map(|m| m.payload.as_rect().map(|r| r.rect))
        .collect();
    assert_eq!(bars.len(), 6);
    assert!(bars.iter().all(|r| (r.x0 - plot.x0).abs() < 1e-9));

    let thickness = band.band_width() / 2.0 - 15.0;
    // Row order is series-major: "data"/A is first, "another data"/A is fourth.
    let a_y = band.position("A").expect("A");
    assert_rect_close(
        bars[0],
        Rect::new(plot.x0, a_y, plot.x0 + 123.0 / 900.0 * 800.0, a_y + thickness),
    );
    let half = band.band_width() / 2.0;
    assert!((bars[3].y0 - (a_y + half)).abs() < 1e-9);

    let labels: Vec<&str> = frame.legend.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, ["data", "another data"]);
}

#[test]
fn grouped_bars_draw_a_gridline_per_tick() {
    let frame = GroupedBarChartSpec::new("label", "series", "value")
        .render(&grouped(), &HeuristicTextMeasurer);
    let grid = frame
        .marks
        .iter()
        .filter(|m| m.z_index == crate::GRID_LINES)
        .count();
    // Ticks 0, 100, ..., 900.
    assert_eq!(grid, 10);
}
