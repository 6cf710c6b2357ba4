// Copyright 2025 the Plotlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A retained SVG backend driven by mark diffs.

use std::collections::HashMap;

use kurbo::Rect;
use peniko::Brush;
use plotlet_core::{MarkDiff, MarkId, MarkPayload, TextAnchor, TextBaseline};

/// Marks accumulated from [`MarkDiff`]s, serialisable as one SVG document.
#[derive(Debug, Default)]
pub struct SvgScene {
    marks: HashMap<MarkId, (i32, MarkPayload)>,
    view_box: Option<Rect>,
}

impl SvgScene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document bounds (normally the chart's view rectangle).
    pub fn set_view_box(&mut self, view_box: Rect) {
        self.view_box = Some(view_box);
    }

    /// Applies one frame of diffs.
    pub fn apply_diffs(&mut self, diffs: &[MarkDiff]) {
        for diff in diffs {
            match diff {
                MarkDiff::Enter {
                    id, z_index, new, ..
                } => {
                    self.marks.insert(*id, (*z_index, (**new).clone()));
                }
                MarkDiff::Update {
                    id,
                    new_z_index,
                    new,
                    ..
                } => {
                    self.marks.insert(*id, (*new_z_index, (**new).clone()));
                }
                MarkDiff::Exit { id, .. } => {
                    self.marks.remove(id);
                }
            }
        }
    }

    /// Returns the number of retained marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if no marks are retained.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Writes the retained marks in `(z_index, id)` order.
    ///
    /// Without an explicit view box the document is sized to the shape bounds.
    pub fn to_svg_string(&self) -> String {
        let view_box = self
            .view_box
            .or_else(|| self.shape_bounds())
            .unwrap_or_else(|| Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut out = String::new();

        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        out.push_str(&format!(
            r#"viewBox="{} {} {} {}" width="{}" height="{}">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        ));
        out.push('\n');

        let mut entries: Vec<_> = self.marks.iter().collect();
        entries.sort_by_key(|(id, (z, _))| (*z, id.0));

        for (_id, (_z, payload)) in entries {
            match payload {
                MarkPayload::Rect(r) => {
                    let rect = r.rect.abs();
                    out.push_str(&format!(
                        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                        rect.x0,
                        rect.y0,
                        rect.width(),
                        rect.height(),
                    ));
                    write_paint_attr(&mut out, "fill", &r.fill);
                    out.push_str("/>\n");
                }
                MarkPayload::Circle(c) => {
                    out.push_str(&format!(
                        r#"<circle cx="{}" cy="{}" r="{}""#,
                        c.circle.center.x, c.circle.center.y, c.circle.radius,
                    ));
                    write_paint_attr(&mut out, "fill", &c.fill);
                    out.push_str("/>\n");
                }
                MarkPayload::Line(l) => {
                    out.push_str(&format!(
                        r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                        l.line.p0.x, l.line.p0.y, l.line.p1.x, l.line.p1.y,
                    ));
                    write_paint_attr(&mut out, "stroke", &l.stroke);
                    out.push_str(&format!(r#" stroke-width="{}"/>"#, l.stroke_width));
                    out.push('\n');
                }
                MarkPayload::Text(t) => {
                    let baseline = match t.baseline {
                        TextBaseline::Middle => "middle",
                        TextBaseline::Alphabetic => "alphabetic",
                        TextBaseline::Hanging => "hanging",
                    };
                    out.push_str(&format!(
                        r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
                        t.pos.x, t.pos.y, t.font_size, baseline
                    ));
                    if t.angle != 0.0 {
                        out.push_str(&format!(
                            r#" transform="rotate({} {} {})""#,
                            t.angle, t.pos.x, t.pos.y
                        ));
                    }
                    out.push_str(match t.anchor {
                        TextAnchor::Start => r#" text-anchor="start""#,
                        TextAnchor::Middle => r#" text-anchor="middle""#,
                        TextAnchor::End => r#" text-anchor="end""#,
                    });
                    write_paint_attr(&mut out, "fill", &t.fill);
                    out.push('>');
                    out.push_str(&escape_xml(&t.text));
                    out.push_str("</text>\n");
                }
            }
        }

        out.push_str("</svg>\n");
        out
    }

    fn shape_bounds(&self) -> Option<Rect> {
        self.marks
            .values()
            .filter_map(|(_z, payload)| payload.bounds())
            .reduce(|a, b| a.union(b))
            .map(|r| r.inflate(10.0, 10.0))
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let paint = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (paint, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use peniko::Color;
    use peniko::color::palette::css;
    use plotlet_core::{Mark, Scene, TextPayload};

    use super::*;

    fn render(marks: Vec<Mark>) -> (Scene, SvgScene) {
        let mut scene = Scene::new();
        let mut svg = SvgScene::new();
        svg.apply_diffs(&scene.tick(marks));
        (scene, svg)
    }

    #[test]
    fn writes_each_primitive_in_paint_order() {
        let (_scene, mut svg) = render(vec![
            Mark::text(
                MarkId(3),
                TextPayload::new((5.0, 6.0), "a < b")
                    .with_anchor(TextAnchor::End)
                    .with_angle(-90.0),
            )
            .with_z_index(10),
            Mark::circle(MarkId(2), (1.0, 2.0), 5.0, css::RED),
            Mark::rect(MarkId(1), Rect::new(0.0, 0.0, 4.0, 3.0), css::BLUE),
            Mark::line(MarkId(4), (0.0, 0.0), (10.0, 0.0), css::BLACK, 1.0).with_z_index(-1),
        ]);
        svg.set_view_box(Rect::new(0.0, 0.0, 700.0, 500.0));
        let doc = svg.to_svg_string();

        assert!(doc.contains(r#"viewBox="0 0 700 500" width="700" height="500""#));
        assert!(doc.contains(r##"<circle cx="1" cy="2" r="5" fill="#ff0000"/>"##));
        assert!(doc.contains(r##"<rect x="0" y="0" width="4" height="3" fill="#0000ff"/>"##));
        assert!(doc.contains(r#"transform="rotate(-90 5 6)""#));
        assert!(doc.contains(r#"text-anchor="end""#));
        assert!(doc.contains(">a &lt; b</text>"));

        let line = doc.find("<line").expect("line");
        let rect = doc.find("<rect").expect("rect");
        let circle = doc.find("<circle").expect("circle");
        let text = doc.find("<text").expect("text");
        assert!(line < rect && rect < circle && circle < text, "{doc}");
    }

    #[test]
    fn translucent_paint_gets_an_opacity_attribute() {
        let (_scene, svg) = render(vec![Mark::line(
            MarkId(1),
            (0.0, 0.0),
            (0.0, 10.0),
            Color::from_rgba8(0, 0, 0, 51),
            1.0,
        )]);
        let doc = svg.to_svg_string();
        assert!(doc.contains(r##"stroke="#000000" stroke-opacity="0.2""##), "{doc}");
    }

    #[test]
    fn exits_remove_marks() {
        let (mut scene, mut svg) = render(vec![
            Mark::circle(MarkId(1), (1.0, 2.0), 5.0, css::RED),
            Mark::circle(MarkId(2), (3.0, 4.0), 5.0, css::RED),
        ]);
        assert_eq!(svg.len(), 2);
        svg.apply_diffs(&scene.tick(vec![Mark::circle(
            MarkId(2),
            (3.0, 8.0),
            5.0,
            css::RED,
        )]));
        assert_eq!(svg.len(), 1);
        assert!(svg.to_svg_string().contains(r#"cy="8""#));

        svg.apply_diffs(&scene.clear());
        assert!(svg.is_empty());
    }

    #[test]
    fn view_box_falls_back_to_shape_bounds() {
        let (_scene, svg) = render(vec![Mark::rect(
            MarkId(1),
            Rect::new(10.0, 10.0, 30.0, 20.0),
            css::BLUE,
        )]);
        assert!(svg.to_svg_string().contains(r#"viewBox="0 0 40 30""#));
    }
}
