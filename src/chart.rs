//! Stateful chart renderer.
//!
//! Owns the drawing state machine (`Idle -> Animating -> Settled`), the
//! animation progress, and the geometry of the last settled frame. The
//! embedding shell drives it cooperatively: `begin_*` stages a chart and
//! hands back a [`RenderToken`], then the shell calls [`render_frame`] once
//! per display frame until [`FrameStatus::Settled`]. Starting a new render
//! bumps the generation, so a stale frame callback holding an old token
//! draws nothing.
//!
//! [`render_frame`]: ChartRenderer::render_frame

pub mod band;
pub mod line;

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::record::VideoRecord;
use crate::surface::{Rect, Surface};

/// Reveal animation length.
pub const ANIMATION: Duration = Duration::from_millis(520);

/// Coalescing window for rapid-fire resize notifications.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(200);

/// Chart palette, shared by both modes.
pub(crate) mod palette {
    pub const GRID: &str = "rgba(255,255,255,0.08)";
    pub const GRID_TEXT: &str = "rgba(233,238,245,0.55)";
    pub const LINE: &str = "rgba(62,166,255,0.65)";
    pub const BAND_ON: &str = "rgba(62,166,255,0.28)";
    pub const BAND_OFF: &str = "rgba(255,255,255,0.06)";
    pub const BAND_STROKE: &str = "rgba(255,255,255,0.10)";
    pub const BAND_TEXT_ON: &str = "rgba(233,238,245,0.95)";
    pub const BAND_TEXT_OFF: &str = "rgba(233,238,245,0.55)";
    pub const BAND_COUNT: &str = "rgba(233,238,245,0.85)";
}

/// Wall-clock inputs for one render pass: `instant` drives animation
/// progress, `utc` anchors the civil-day axis.
#[derive(Clone, Copy, Debug)]
pub struct RenderClock {
    pub instant: Instant,
    pub utc: DateTime<Utc>,
}

impl RenderClock {
    pub fn now() -> Self {
        RenderClock {
            instant: Instant::now(),
            utc: Utc::now(),
        }
    }

    #[cfg(test)]
    pub(crate) fn advanced(self, by: Duration) -> Self {
        RenderClock {
            instant: self.instant + by,
            utc: self.utc + chrono::Duration::from_std(by).unwrap_or_default(),
        }
    }
}

/// Identifies one `begin_*` call. A token from a superseded render is stale
/// and its frames are cancelled instead of drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderToken(u64);

/// Outcome of one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// More frames wanted; keep pumping.
    Animating,
    /// The chart is fully drawn and its geometry is hit-testable.
    Settled,
    /// The token was stale; nothing was drawn.
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Animating,
    Settled,
}

/// A record copy annotated with the display strings the tooltip needs.
#[derive(Clone, Debug, PartialEq)]
pub struct PlottedVideo {
    pub record: VideoRecord,
    /// Minute-rounded civil time, e.g. `"19:00"`.
    pub time_display: String,
    /// Civil day label, e.g. `"10 Yanvar"`.
    pub day_label: String,
}

/// One plotted point of the line chart.
#[derive(Clone, Debug, PartialEq)]
pub struct Dot {
    pub at: crate::surface::Point,
    pub radius: f64,
    pub video: PlottedVideo,
}

/// One hour slot of the band chart. Present for all 24 hours; empty slots
/// are hit-testable but yield no tooltip.
#[derive(Clone, Debug, PartialEq)]
pub struct BandSlot {
    pub hour: u32,
    pub rect: Rect,
    pub videos: Vec<PlottedVideo>,
}

/// Geometry of the last laid-out frame. Rebuilt on every layout; published
/// to hit-testing only once the renderer settles.
#[derive(Clone, Debug, Default)]
pub struct ChartGeometry {
    pub dots: Vec<Dot>,
    pub bands: Vec<BandSlot>,
}

/// Retained inputs, so a debounced resize can re-lay-out without the caller
/// resupplying data.
enum RenderPlan {
    Line { videos: Vec<VideoRecord>, days: u32 },
    Band { videos: Vec<VideoRecord> },
}

pub struct ChartRenderer {
    phase: Phase,
    generation: u64,
    plan: Option<RenderPlan>,
    animate: bool,
    anim_start: Instant,
    axis_anchor: DateTime<Utc>,
    laid_out_size: (f64, f64),
    geometry: ChartGeometry,
    grid: Option<line::GridLayout>,
    /// Total path length of the current line layout, for the dash reveal.
    path_len: f64,
    resize_deadline: Option<Instant>,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRenderer {
    pub fn new() -> Self {
        ChartRenderer {
            phase: Phase::Idle,
            generation: 0,
            plan: None,
            animate: true,
            anim_start: Instant::now(),
            axis_anchor: Utc::now(),
            laid_out_size: (0.0, 0.0),
            geometry: ChartGeometry::default(),
            grid: None,
            path_len: 0.0,
            resize_deadline: None,
        }
    }

    /// Stage a line chart over the trailing `days` window. Supersedes any
    /// in-flight render.
    pub fn begin_line(
        &mut self,
        videos: Vec<VideoRecord>,
        days: u32,
        clock: RenderClock,
        animate: bool,
    ) -> RenderToken {
        tracing::debug!(records = videos.len(), days, animate, "begin line chart");
        self.stage(RenderPlan::Line { videos, days }, clock, animate)
    }

    /// Stage the 24-slot band chart for one day's records (already filtered
    /// to the selected civil date). Band mode draws settled, no reveal.
    pub fn begin_band(&mut self, videos: Vec<VideoRecord>, clock: RenderClock) -> RenderToken {
        tracing::debug!(records = videos.len(), "begin band chart");
        self.stage(RenderPlan::Band { videos }, clock, false)
    }

    fn stage(&mut self, plan: RenderPlan, clock: RenderClock, animate: bool) -> RenderToken {
        self.generation += 1;
        self.phase = Phase::Animating;
        self.plan = Some(plan);
        self.animate = animate;
        self.anim_start = clock.instant;
        self.axis_anchor = clock.utc;
        self.laid_out_size = (0.0, 0.0);
        self.geometry = ChartGeometry::default();
        self.grid = None;
        self.path_len = 0.0;
        self.resize_deadline = None;
        RenderToken(self.generation)
    }

    /// Coalesce resize notifications; the re-layout happens on the first
    /// frame after the debounce window closes.
    pub fn notify_resize(&mut self, now: Instant) {
        if self.plan.is_some() {
            self.resize_deadline = Some(now + RESIZE_DEBOUNCE);
        }
    }

    /// Whether the shell should keep scheduling frames.
    pub fn needs_frame(&self) -> bool {
        self.phase == Phase::Animating || self.resize_deadline.is_some()
    }

    /// Geometry for pointer hit-testing. Absent until the current render has
    /// settled, so a half-revealed chart is never hit-testable.
    pub fn geometry(&self) -> Option<&ChartGeometry> {
        (self.phase == Phase::Settled).then_some(&self.geometry)
    }

    /// Draw one frame. A zero-area surface draws nothing and reports the
    /// current status unchanged.
    pub fn render_frame(
        &mut self,
        surface: &mut dyn Surface,
        token: RenderToken,
        clock: RenderClock,
    ) -> FrameStatus {
        if token.0 != self.generation {
            return FrameStatus::Cancelled;
        }
        let Some(plan) = &self.plan else {
            return FrameStatus::Settled;
        };

        let (w, h) = surface.size();
        if w <= 0.0 || h <= 0.0 {
            return self.status();
        }

        if let Some(deadline) = self.resize_deadline
            && clock.instant >= deadline
        {
            self.resize_deadline = None;
            self.laid_out_size = (0.0, 0.0);
        }

        // While animating, follow the surface size every frame; once
        // settled, geometry only moves on the debounced resize path above.
        let follow_size = self.phase == Phase::Animating;
        if self.laid_out_size != (w, h) && (follow_size || self.laid_out_size == (0.0, 0.0)) {
            let anchor = self.axis_anchor;
            match plan {
                RenderPlan::Line { videos, days } => {
                    let layout = line::layout(videos, *days, (w, h), anchor);
                    self.path_len = layout.path_len;
                    self.geometry = ChartGeometry {
                        dots: layout.dots,
                        bands: Vec::new(),
                    };
                    self.grid = Some(layout.grid);
                }
                RenderPlan::Band { videos } => {
                    self.geometry = ChartGeometry {
                        dots: Vec::new(),
                        bands: band::layout(videos, (w, h)),
                    };
                    self.grid = None;
                }
            }
            self.laid_out_size = (w, h);
        }

        let progress = self.progress(clock.instant);
        match &self.plan {
            Some(RenderPlan::Line { .. }) => {
                line::draw(
                    surface,
                    self.grid.as_ref(),
                    &self.geometry.dots,
                    self.path_len,
                    progress,
                );
            }
            Some(RenderPlan::Band { .. }) => {
                band::draw(surface, &self.geometry.bands);
            }
            None => {}
        }

        if progress >= 1.0 {
            self.phase = Phase::Settled;
        }
        self.status()
    }

    fn status(&self) -> FrameStatus {
        match self.phase {
            Phase::Animating => FrameStatus::Animating,
            _ => FrameStatus::Settled,
        }
    }

    /// Eased reveal progress in `[0, 1]` for the current frame.
    fn progress(&self, now: Instant) -> f64 {
        // Single dots and band mode render settled immediately.
        let skip_animation = !self.animate || self.geometry.dots.len() <= 1;
        if skip_animation || self.phase == Phase::Settled {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.anim_start);
        let t = (elapsed.as_secs_f64() / ANIMATION.as_secs_f64()).min(1.0);
        ease_out_cubic(t)
    }
}

/// `1 - (1 - t)^3`.
fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SvgSurface;
    use chrono::TimeZone;

    fn video(iso: &str) -> VideoRecord {
        VideoRecord {
            id: iso.to_owned(),
            title: String::new(),
            published_at: iso.parse().unwrap(),
            thumbnail_url: String::new(),
        }
    }

    fn videos() -> Vec<VideoRecord> {
        vec![
            video("2024-01-08T08:00:00Z"),
            video("2024-01-09T10:00:00Z"),
            video("2024-01-10T12:30:00Z"),
        ]
    }

    fn clock() -> RenderClock {
        RenderClock {
            instant: Instant::now(),
            utc: Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn geometry_is_unpublished_until_settled() {
        let mut renderer = ChartRenderer::new();
        let mut surface = SvgSurface::new(600.0, 300.0);
        let t0 = clock();

        let token = renderer.begin_line(videos(), 7, t0, true);
        assert!(renderer.geometry().is_none());

        assert_eq!(
            renderer.render_frame(&mut surface, token, t0),
            FrameStatus::Animating
        );
        assert!(renderer.geometry().is_none(), "mid-reveal is not hit-testable");

        let end = t0.advanced(ANIMATION);
        assert_eq!(
            renderer.render_frame(&mut surface, token, end),
            FrameStatus::Settled
        );
        let geometry = renderer.geometry().expect("published after settle");
        assert_eq!(geometry.dots.len(), 3);
    }

    #[test]
    fn disabling_animation_settles_on_the_first_frame() {
        let mut renderer = ChartRenderer::new();
        let mut surface = SvgSurface::new(600.0, 300.0);
        let t0 = clock();

        let token = renderer.begin_line(videos(), 7, t0, false);
        assert_eq!(
            renderer.render_frame(&mut surface, token, t0),
            FrameStatus::Settled
        );
        assert!(renderer.geometry().is_some());
        assert!(!renderer.needs_frame());
    }

    #[test]
    fn a_new_begin_invalidates_the_old_token() {
        let mut renderer = ChartRenderer::new();
        let mut surface = SvgSurface::new(600.0, 300.0);
        let t0 = clock();

        let old = renderer.begin_line(videos(), 7, t0, true);
        let new = renderer.begin_band(videos(), t0.advanced(Duration::from_millis(1)));
        assert_ne!(old, new);

        assert_eq!(
            renderer.render_frame(&mut surface, old, t0),
            FrameStatus::Cancelled
        );
        assert_eq!(
            renderer.render_frame(&mut surface, new, t0.advanced(Duration::from_millis(2))),
            FrameStatus::Settled
        );
        assert_eq!(renderer.geometry().map(|g| g.bands.len()), Some(24));
    }

    #[test]
    fn resize_after_settle_requests_one_more_frame() {
        let mut renderer = ChartRenderer::new();
        let mut surface = SvgSurface::new(600.0, 300.0);
        let t0 = clock();

        let token = renderer.begin_line(videos(), 7, t0, false);
        renderer.render_frame(&mut surface, token, t0);
        assert!(!renderer.needs_frame());

        surface.set_size(900.0, 400.0);
        renderer.notify_resize(t0.instant + Duration::from_millis(1));
        assert!(renderer.needs_frame());

        // Before the debounce window closes, geometry stays put.
        let early = t0.advanced(Duration::from_millis(50));
        renderer.render_frame(&mut surface, token, early);
        assert!(renderer.needs_frame());

        let late = t0.advanced(RESIZE_DEBOUNCE + Duration::from_millis(10));
        assert_eq!(
            renderer.render_frame(&mut surface, token, late),
            FrameStatus::Settled
        );
        assert!(!renderer.needs_frame());
        let dots = &renderer.geometry().expect("still published").dots;
        let max_x = dots.iter().fold(0.0_f64, |m, d| m.max(d.at.x));
        assert!((max_x - 880.0).abs() < 1e-9, "laid out at the new width");
    }

    #[test]
    fn ease_out_cubic_boundaries() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5, "ease-out front-loads the reveal");
    }
}
