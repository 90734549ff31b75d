//! Pointer hit-testing against the last settled chart geometry.
//!
//! Dots are tested before band slots, in reverse draw order so the most
//! recently drawn dot wins an overlap. The geometry is owned by the
//! renderer and only read here; before the first settled render there is
//! nothing to hit and every query clears the tooltip.

use maud::Markup;

use crate::chart::{BandSlot, ChartGeometry, Dot};
use crate::tooltip::{self, TooltipItem};

/// Extra hit margin around a dot, in surface units.
pub const POINTER_TOLERANCE: f64 = 8.0;

/// What the shell should do with the tooltip after a pointer event.
pub enum TooltipAction {
    Show {
        items: Vec<TooltipItem>,
        /// HTML-safe markup for the tooltip body, built from `items`.
        html: Markup,
    },
    Hide,
}

/// Answer a pointer-move at surface coordinates `(x, y)`.
pub fn pointer_move(geometry: Option<&ChartGeometry>, x: f64, y: f64) -> TooltipAction {
    let Some(geometry) = geometry else {
        return TooltipAction::Hide;
    };

    if let Some(dot) = hit_dot(&geometry.dots, x, y) {
        return show(vec![TooltipItem::from_plotted(&dot.video)]);
    }
    if let Some(slot) = hit_band(&geometry.bands, x, y) {
        return show(slot.videos.iter().map(TooltipItem::from_plotted).collect());
    }
    TooltipAction::Hide
}

/// Pointer-leave always clears the tooltip.
pub fn pointer_leave() -> TooltipAction {
    TooltipAction::Hide
}

fn show(items: Vec<TooltipItem>) -> TooltipAction {
    let html = tooltip::render(&items);
    TooltipAction::Show { items, html }
}

fn hit_dot(dots: &[Dot], x: f64, y: f64) -> Option<&Dot> {
    // Reverse order: highest z wins on overlap.
    dots.iter().rev().find(|d| {
        let reach = d.radius + POINTER_TOLERANCE;
        let (dx, dy) = (x - d.at.x, y - d.at.y);
        dx * dx + dy * dy <= reach * reach
    })
}

fn hit_band(bands: &[BandSlot], x: f64, y: f64) -> Option<&BandSlot> {
    // Slots do not overlap; the first containing slot decides, and an empty
    // one yields no hit at all.
    let slot = bands.iter().find(|b| b.rect.contains(x, y))?;
    (!slot.videos.is_empty()).then_some(slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::PlottedVideo;
    use crate::record::VideoRecord;
    use crate::surface::{Point, Rect};

    fn plotted(id: &str) -> PlottedVideo {
        PlottedVideo {
            record: VideoRecord {
                id: id.to_owned(),
                title: format!("title {id}"),
                published_at: "2024-01-10T15:06:00Z".parse().unwrap(),
                thumbnail_url: format!("https://img.test/{id}.jpg"),
            },
            time_display: "19:00".to_owned(),
            day_label: "10 Yanvar".to_owned(),
        }
    }

    fn dot(id: &str, x: f64, y: f64) -> Dot {
        Dot {
            at: Point::new(x, y),
            radius: 5.0,
            video: plotted(id),
        }
    }

    #[test]
    fn no_geometry_means_no_tooltip() {
        assert!(matches!(pointer_move(None, 10.0, 10.0), TooltipAction::Hide));
    }

    #[test]
    fn dot_hit_uses_radius_plus_tolerance() {
        let geometry = ChartGeometry {
            dots: vec![dot("a", 100.0, 100.0)],
            bands: Vec::new(),
        };
        // 13 = radius 5 + tolerance 8: on the edge still hits.
        match pointer_move(Some(&geometry), 113.0, 100.0) {
            TooltipAction::Show { items, .. } => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].title, "title a");
            }
            TooltipAction::Hide => panic!("expected a dot hit"),
        }
        assert!(matches!(
            pointer_move(Some(&geometry), 113.5, 100.0),
            TooltipAction::Hide
        ));
    }

    #[test]
    fn last_drawn_dot_wins_overlap() {
        let geometry = ChartGeometry {
            dots: vec![dot("under", 100.0, 100.0), dot("over", 102.0, 100.0)],
            bands: Vec::new(),
        };
        match pointer_move(Some(&geometry), 101.0, 100.0) {
            TooltipAction::Show { items, .. } => assert_eq!(items[0].title, "title over"),
            TooltipAction::Hide => panic!("expected a hit"),
        }
    }

    #[test]
    fn band_hit_collects_the_whole_hour() {
        let geometry = ChartGeometry {
            dots: Vec::new(),
            bands: vec![
                BandSlot {
                    hour: 18,
                    rect: Rect::new(0.0, 0.0, 50.0, 30.0),
                    videos: Vec::new(),
                },
                BandSlot {
                    hour: 19,
                    rect: Rect::new(60.0, 0.0, 50.0, 30.0),
                    videos: vec![plotted("a"), plotted("b")],
                },
            ],
        };
        match pointer_move(Some(&geometry), 70.0, 10.0) {
            TooltipAction::Show { items, .. } => assert_eq!(items.len(), 2),
            TooltipAction::Hide => panic!("expected a band hit"),
        }
        // Empty slot: hit-testable but silent.
        assert!(matches!(
            pointer_move(Some(&geometry), 10.0, 10.0),
            TooltipAction::Hide
        ));
    }
}
