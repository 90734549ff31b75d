//! Layout and drawing for the single-day band chart: 24 hour slots in a
//! 6x4 grid, lit when the hour contains at least one upload.

use super::palette;
use super::{BandSlot, PlottedVideo};
use crate::bucket;
use crate::civil;
use crate::record::VideoRecord;
use crate::surface::{Point, Rect, Stroke, Surface, TextAlign, TextBaseline, TextStyle};

const PAD_TOP: f64 = 22.0;
const PAD_RIGHT: f64 = 18.0;
const PAD_BOTTOM: f64 = 34.0;
const PAD_LEFT: f64 = 18.0;

const COLS: u32 = 6;
const ROWS: u32 = 4;
const GAP: f64 = 10.0;
const CORNER_RADIUS: f64 = 16.0;

const HEADER: &str = "24 hour slots (hours with uploads light up)";

/// Slot rectangles for one day's records. All 24 hours are present so every
/// slot is hit-testable; slots without uploads carry an empty video list.
pub fn layout(videos: &[VideoRecord], size: (f64, f64)) -> Vec<BandSlot> {
    let (w, h) = size;
    let plot_w = (w - PAD_LEFT - PAD_RIGHT).max(0.0);
    let plot_h = (h - PAD_TOP - PAD_BOTTOM).max(0.0);
    let cell_w = ((plot_w - GAP * f64::from(COLS - 1)) / f64::from(COLS)).max(0.0);
    let cell_h = ((plot_h - GAP * f64::from(ROWS - 1)) / f64::from(ROWS)).max(0.0);

    let refs: Vec<&VideoRecord> = videos.iter().collect();
    let mut by_hour = bucket::group_by_hour(&refs);

    (0..24)
        .map(|hour| {
            let row = hour / COLS;
            let col = hour % COLS;
            let rect = Rect::new(
                PAD_LEFT + f64::from(col) * (cell_w + GAP),
                PAD_TOP + f64::from(row) * (cell_h + GAP),
                cell_w,
                cell_h,
            );
            let videos = std::mem::take(&mut by_hour[hour as usize])
                .into_iter()
                .map(|v| {
                    let c = civil::normalize(v.published_at);
                    PlottedVideo {
                        record: v.clone(),
                        time_display: civil::rounded_time(c.hour, c.minute),
                        day_label: c.day_label,
                    }
                })
                .collect();
            BandSlot { hour, rect, videos }
        })
        .collect()
}

/// Band mode has no reveal animation; one call draws the settled frame.
pub fn draw(surface: &mut dyn Surface, bands: &[BandSlot]) {
    surface.clear();
    if bands.is_empty() {
        return;
    }

    surface.fill_text(
        HEADER,
        Point::new(PAD_LEFT, 6.0),
        &TextStyle {
            size: 12.0,
            align: TextAlign::Left,
            baseline: TextBaseline::Top,
            color: palette::GRID_TEXT.to_owned(),
        },
    );

    let outline = Stroke::solid(palette::BAND_STROKE, 1.0);
    for slot in bands {
        let on = !slot.videos.is_empty();
        let fill = if on {
            palette::BAND_ON
        } else {
            palette::BAND_OFF
        };
        surface.fill_round_rect(slot.rect, CORNER_RADIUS, fill);
        surface.stroke_round_rect(slot.rect, CORNER_RADIUS, &outline);

        let label_color = if on {
            palette::BAND_TEXT_ON
        } else {
            palette::BAND_TEXT_OFF
        };
        surface.fill_text(
            &format!("{:02}:00", slot.hour),
            Point::new(slot.rect.x + 12.0, slot.rect.y + 10.0),
            &TextStyle {
                size: 12.0,
                align: TextAlign::Left,
                baseline: TextBaseline::Top,
                color: label_color.to_owned(),
            },
        );

        if on {
            surface.fill_text(
                &format!("{} video", slot.videos.len()),
                Point::new(slot.rect.x + slot.rect.w - 12.0, slot.rect.y + 10.0),
                &TextStyle {
                    size: 12.0,
                    align: TextAlign::Right,
                    baseline: TextBaseline::Top,
                    color: palette::BAND_COUNT.to_owned(),
                },
            );
        }
    }
}
