//! Layout and drawing for the trailing-window line chart.
//!
//! The horizontal axis is the calendar day (oldest on the left), the
//! vertical axis the civil time of day with hour 0 at the bottom. One dot
//! per upload; days with no uploads produce no dot, and the connecting path
//! follows chronological order even when two dots share an x-coordinate.

use chrono::{DateTime, Datelike, Utc};

use super::palette;
use super::{Dot, PlottedVideo};
use crate::civil;
use crate::record::VideoRecord;
use crate::surface::{Point, Rect, Stroke, Surface, TextAlign, TextBaseline, TextStyle};

const PAD_TOP: f64 = 24.0;
const PAD_RIGHT: f64 = 20.0;
const PAD_BOTTOM: f64 = 40.0;
const PAD_LEFT: f64 = 52.0;

const DOT_RADIUS: f64 = 5.0;
const LINE_WIDTH: f64 = 1.7;
const GRID_DASH: (f64, f64) = (4.0, 4.0);

/// Horizontal guide lines are fixed at these hours.
const GUIDE_HOURS: [u32; 7] = [0, 4, 8, 12, 16, 20, 23];

/// Maximum number of day labels on the horizontal axis.
const MAX_DAY_LABELS: u32 = 8;

/// Axis geometry, retained between frames so redraws need no recomputation.
#[derive(Clone, Debug)]
pub struct GridLayout {
    pub plot: Rect,
    /// `(y, "HH:00")` per guide hour.
    pub h_lines: Vec<(f64, String)>,
    /// `(x, "d/m")` per labelled day.
    pub v_lines: Vec<(f64, String)>,
    /// Label for the newest day at the right edge, when the window spans
    /// more than one day.
    pub end_label: Option<(f64, String)>,
}

pub struct LineLayout {
    pub grid: GridLayout,
    pub dots: Vec<Dot>,
    pub path_len: f64,
}

fn axis_label(date: chrono::NaiveDate) -> String {
    format!("{}/{}", date.day(), date.month())
}

/// Compute dot positions and axis geometry for `days` trailing calendar
/// days ending at `anchor`'s civil date.
pub fn layout(
    videos: &[VideoRecord],
    days: u32,
    size: (f64, f64),
    anchor: DateTime<Utc>,
) -> LineLayout {
    let (w, h) = size;
    let plot = Rect::new(
        PAD_LEFT,
        PAD_TOP,
        (w - PAD_LEFT - PAD_RIGHT).max(0.0),
        (h - PAD_TOP - PAD_BOTTOM).max(0.0),
    );

    let axis_days = civil::trailing_days(anchor, days);
    let day_span = f64::from(days.saturating_sub(1).max(1));

    let mut dots = Vec::new();
    for v in videos {
        let c = civil::normalize(v.published_at);
        let Some(day_index) = axis_days
            .iter()
            .position(|d| civil::date_key_of(*d) == c.date_key)
        else {
            continue;
        };

        let hour_frac = f64::from(c.hour) + f64::from(c.minute) / 60.0;
        let x = plot.x + (day_index as f64 / day_span) * plot.w;
        let y = plot.y + plot.h - (hour_frac / 23.0) * plot.h;
        dots.push(Dot {
            at: Point::new(x, y),
            radius: DOT_RADIUS,
            video: PlottedVideo {
                record: v.clone(),
                time_display: civil::rounded_time(c.hour, c.minute),
                day_label: c.day_label,
            },
        });
    }
    dots.sort_by_key(|d| d.video.record.published_at);

    let path_len = dots
        .windows(2)
        .map(|pair| pair[0].at.distance_to(pair[1].at))
        .sum();

    let mut h_lines = Vec::new();
    for hour in GUIDE_HOURS {
        let y = plot.y + plot.h - (f64::from(hour) / 23.0) * plot.h;
        h_lines.push((y, format!("{hour:02}:00")));
    }

    let stride = if days <= 7 {
        1
    } else {
        days.div_ceil(MAX_DAY_LABELS)
    };
    let mut v_lines = Vec::new();
    for (i, date) in axis_days.iter().enumerate() {
        if i as u32 % stride != 0 {
            continue;
        }
        let x = plot.x + (i as f64 / day_span) * plot.w;
        v_lines.push((x, axis_label(*date)));
    }

    let end_label = (days > 1)
        .then(|| axis_days.last().map(|d| (plot.x + plot.w, axis_label(*d))))
        .flatten();

    LineLayout {
        grid: GridLayout {
            plot,
            h_lines,
            v_lines,
            end_label,
        },
        dots,
        path_len,
    }
}

/// Draw one frame at eased reveal `progress` in `[0, 1]`.
pub fn draw(
    surface: &mut dyn Surface,
    grid: Option<&GridLayout>,
    dots: &[Dot],
    path_len: f64,
    progress: f64,
) {
    surface.clear();
    let Some(grid) = grid else {
        return;
    };
    if grid.plot.w <= 0.0 || grid.plot.h <= 0.0 {
        return;
    }

    draw_grid(surface, grid);
    draw_path(surface, dots, path_len, progress);
    draw_dots(surface, dots, progress);
}

fn draw_grid(surface: &mut dyn Surface, grid: &GridLayout) {
    let stroke = Stroke {
        color: palette::GRID.to_owned(),
        width: 1.0,
        dash: Some(GRID_DASH),
        dash_offset: 0.0,
    };
    let hour_style = TextStyle {
        size: 11.0,
        align: TextAlign::Right,
        baseline: TextBaseline::Middle,
        color: palette::GRID_TEXT.to_owned(),
    };
    let day_style = TextStyle {
        size: 10.0,
        align: TextAlign::Center,
        baseline: TextBaseline::Top,
        color: palette::GRID_TEXT.to_owned(),
    };
    let plot = grid.plot;

    for (y, label) in &grid.h_lines {
        surface.stroke_polyline(
            &[Point::new(plot.x, *y), Point::new(plot.x + plot.w, *y)],
            &stroke,
        );
        surface.fill_text(label, Point::new(plot.x - 10.0, *y), &hour_style);
    }

    let label_y = plot.y + plot.h + 10.0;
    for (x, label) in &grid.v_lines {
        surface.stroke_polyline(
            &[Point::new(*x, plot.y), Point::new(*x, plot.y + plot.h)],
            &stroke,
        );
        surface.fill_text(label, Point::new(*x, label_y), &day_style);
    }
    if let Some((x, label)) = &grid.end_label {
        surface.fill_text(label, Point::new(*x, label_y), &day_style);
    }
}

fn draw_path(surface: &mut dyn Surface, dots: &[Dot], path_len: f64, progress: f64) {
    if dots.len() <= 1 {
        return;
    }
    let points: Vec<Point> = dots.iter().map(|d| d.at).collect();
    let reveal = (progress < 1.0 && path_len > 0.0).then_some((path_len, path_len));
    surface.stroke_polyline(
        &points,
        &Stroke {
            color: palette::LINE.to_owned(),
            width: LINE_WIDTH,
            dash: reveal,
            dash_offset: path_len * (1.0 - progress),
        },
    );
}

fn draw_dots(surface: &mut dyn Surface, dots: &[Dot], progress: f64) {
    let a = progress.clamp(0.0, 1.0);
    for d in dots {
        // Halo first, then the dot itself; opacity floors at 0.35 so dots
        // never vanish early in the reveal.
        surface.fill_circle(d.at, d.radius + 5.0, &dot_color(0.22 * a));
        surface.fill_circle(d.at, d.radius, &dot_color(a.max(0.35)));
    }
}

fn dot_color(alpha: f64) -> String {
    format!("rgba(62,166,255,{alpha:.3})")
}
