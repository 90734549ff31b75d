//! The canvas-like drawing surface the chart renders onto.
//!
//! The engine never talks to a real canvas: it issues primitive draw calls
//! through the [`Surface`] trait, and the embedding shell decides what backs
//! it. [`SvgSurface`] is the built-in backend; it records the commands of the
//! current frame and can serialize them as an SVG document.

use maud::{Markup, html};

/// A point in surface coordinates (origin top-left, y growing downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An axis-aligned rectangle in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Rect { x, y, w, h }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
}

/// Fill style for a text run.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub color: String,
}

/// Stroke style for polylines and rectangle outlines. `dash` plus
/// `dash_offset` implement the partial-length path reveal.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    pub dash: Option<(f64, f64)>,
    pub dash_offset: f64,
}

impl Stroke {
    pub fn solid(color: &str, width: f64) -> Self {
        Stroke {
            color: color.to_owned(),
            width,
            dash: None,
            dash_offset: 0.0,
        }
    }
}

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Clear,
    Polyline {
        points: Vec<Point>,
        stroke: Stroke,
    },
    Circle {
        center: Point,
        radius: f64,
        color: String,
    },
    RoundRectFill {
        rect: Rect,
        corner_radius: f64,
        color: String,
    },
    RoundRectStroke {
        rect: Rect,
        corner_radius: f64,
        stroke: Stroke,
    },
    Text {
        text: String,
        at: Point,
        style: TextStyle,
    },
}

/// Drawing surface handle supplied by the UI shell. Exclusively owned by the
/// chart renderer while a frame is being drawn.
pub trait Surface {
    /// Current drawable size in surface units.
    fn size(&self) -> (f64, f64);
    fn clear(&mut self);
    fn stroke_polyline(&mut self, points: &[Point], stroke: &Stroke);
    fn fill_circle(&mut self, center: Point, radius: f64, color: &str);
    fn fill_round_rect(&mut self, rect: Rect, corner_radius: f64, color: &str);
    fn stroke_round_rect(&mut self, rect: Rect, corner_radius: f64, stroke: &Stroke);
    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle);
}

/// Command-recording surface with an SVG serializer.
#[derive(Clone, Debug)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCmd>,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        SvgSurface {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Change the drawable size, as a shell would on a container resize.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Commands recorded since the last [`Surface::clear`].
    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// Serialize the current frame as a standalone SVG document.
    pub fn to_svg(&self) -> Markup {
        html! {
            svg viewBox=(format!("0 0 {} {}", self.width, self.height))
                xmlns="http://www.w3.org/2000/svg"
                style="width:100%;height:auto" {
                @for cmd in &self.commands {
                    (render_cmd(cmd))
                }
            }
        }
    }
}

impl Surface for SvgSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCmd::Clear);
    }

    fn stroke_polyline(&mut self, points: &[Point], stroke: &Stroke) {
        self.commands.push(DrawCmd::Polyline {
            points: points.to_vec(),
            stroke: stroke.clone(),
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: &str) {
        self.commands.push(DrawCmd::Circle {
            center,
            radius,
            color: color.to_owned(),
        });
    }

    fn fill_round_rect(&mut self, rect: Rect, corner_radius: f64, color: &str) {
        self.commands.push(DrawCmd::RoundRectFill {
            rect,
            corner_radius,
            color: color.to_owned(),
        });
    }

    fn stroke_round_rect(&mut self, rect: Rect, corner_radius: f64, stroke: &Stroke) {
        self.commands.push(DrawCmd::RoundRectStroke {
            rect,
            corner_radius,
            stroke: stroke.clone(),
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.commands.push(DrawCmd::Text {
            text: text.to_owned(),
            at,
            style: style.clone(),
        });
    }
}

fn polyline_points(points: &[Point]) -> String {
    use std::fmt::Write;
    let mut out = String::new();
    for p in points {
        if !out.is_empty() {
            out.push(' ');
        }
        let _ = write!(out, "{},{}", p.x, p.y);
    }
    out
}

fn dash_array(stroke: &Stroke) -> Option<String> {
    stroke.dash.map(|(a, b)| format!("{a} {b}"))
}

fn anchor(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    }
}

fn baseline(b: TextBaseline) -> &'static str {
    match b {
        TextBaseline::Top => "hanging",
        TextBaseline::Middle => "middle",
    }
}

fn render_cmd(cmd: &DrawCmd) -> Markup {
    match cmd {
        DrawCmd::Clear => html! {},
        DrawCmd::Polyline { points, stroke } => html! {
            polyline points=(polyline_points(points))
                fill="none"
                stroke=(stroke.color)
                stroke-width=(stroke.width)
                stroke-dasharray=[dash_array(stroke)]
                stroke-dashoffset=[stroke.dash.map(|_| stroke.dash_offset)] {}
        },
        DrawCmd::Circle {
            center,
            radius,
            color,
        } => html! {
            circle cx=(center.x) cy=(center.y) r=(radius) fill=(color) {}
        },
        DrawCmd::RoundRectFill {
            rect,
            corner_radius,
            color,
        } => html! {
            rect x=(rect.x) y=(rect.y) width=(rect.w) height=(rect.h)
                rx=(corner_radius) fill=(color) {}
        },
        DrawCmd::RoundRectStroke {
            rect,
            corner_radius,
            stroke,
        } => html! {
            rect x=(rect.x) y=(rect.y) width=(rect.w) height=(rect.h)
                rx=(corner_radius) fill="none"
                stroke=(stroke.color) stroke-width=(stroke.width) {}
        },
        DrawCmd::Text { text, at, style } => html! {
            text x=(at.x) y=(at.y)
                font-size=(style.size)
                text-anchor=(anchor(style.align))
                dominant-baseline=(baseline(style.baseline))
                fill=(style.color) {
                (text)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_drops_previous_commands() {
        let mut surface = SvgSurface::new(600.0, 300.0);
        surface.fill_circle(Point::new(1.0, 2.0), 5.0, "red");
        surface.clear();
        assert_eq!(surface.commands(), [DrawCmd::Clear]);
    }

    #[test]
    fn svg_document_shape() {
        let mut surface = SvgSurface::new(600.0, 300.0);
        surface.clear();
        surface.stroke_polyline(
            &[Point::new(0.0, 0.0), Point::new(10.0, 10.0)],
            &Stroke {
                color: "#fff".to_owned(),
                width: 1.7,
                dash: Some((40.0, 40.0)),
                dash_offset: 12.0,
            },
        );
        surface.fill_text(
            "00:00",
            Point::new(42.0, 10.0),
            &TextStyle {
                size: 11.0,
                align: TextAlign::Right,
                baseline: TextBaseline::Middle,
                color: "#aaa".to_owned(),
            },
        );

        let svg = surface.to_svg().into_string();
        assert!(svg.starts_with("<svg viewBox=\"0 0 600 300\""));
        assert!(svg.contains("polyline points=\"0,0 10,10\""));
        assert!(svg.contains("stroke-dasharray=\"40 40\""));
        assert!(svg.contains("stroke-dashoffset=\"12\""));
        assert!(svg.contains("text-anchor=\"end\""));
    }

    #[test]
    fn solid_strokes_emit_no_dash_attributes() {
        let mut surface = SvgSurface::new(100.0, 100.0);
        surface.stroke_polyline(
            &[Point::new(0.0, 0.0), Point::new(5.0, 5.0)],
            &Stroke::solid("#fff", 1.0),
        );
        let svg = surface.to_svg().into_string();
        assert!(!svg.contains("stroke-dasharray"));
        assert!(!svg.contains("stroke-dashoffset"));
    }

    #[test]
    fn rect_containment_is_inclusive() {
        let r = Rect::new(10.0, 10.0, 20.0, 10.0);
        assert!(r.contains(10.0, 10.0));
        assert!(r.contains(30.0, 20.0));
        assert!(!r.contains(30.1, 20.0));
        assert!(!r.contains(9.9, 15.0));
    }
}
