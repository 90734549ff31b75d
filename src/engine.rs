//! Caller-facing facade wiring the pipeline together: raw records in,
//! window filtering, summary statistics, chart rendering, and pointer
//! queries against the last-drawn geometry.

use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::bucket::{self, DayCursor, WindowMode};
use crate::chart::{ChartRenderer, FrameStatus, RenderClock, RenderToken};
use crate::civil;
use crate::hover::{self, TooltipAction};
use crate::metrics::{self, Summary};
use crate::record::VideoRecord;
use crate::surface::Surface;

/// Single-day navigation state for the shell's arrow buttons.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayNavState {
    /// Day label of the selected date, e.g. `"10 Yanvar"`.
    pub label: String,
    pub can_prev: bool,
    pub can_next: bool,
}

/// One analyzer instance per chart. Owns the record list, the current
/// window mode, the day cursor, and the renderer; nothing lives in module
/// globals, so instances are independent.
#[derive(Default)]
pub struct UploadAnalyzer {
    videos: Vec<VideoRecord>,
    mode: WindowMode,
    cursor: DayCursor,
    renderer: ChartRenderer,
}

impl UploadAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the dataset. The day cursor resets to the most recent date
    /// with an upload, and the mode resets to the 30-day window.
    pub fn set_videos(&mut self, videos: Vec<VideoRecord>) {
        if videos.is_empty() {
            tracing::warn!("dataset has no uploads; charts will render empty");
        }
        self.cursor = DayCursor::from_videos(&videos);
        self.videos = videos;
        self.mode = WindowMode::Days30;
    }

    pub fn videos(&self) -> &[VideoRecord] {
        &self.videos
    }

    pub fn mode(&self) -> WindowMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: WindowMode) {
        self.mode = mode;
    }

    /// Step to the previous upload day. Only meaningful in day mode;
    /// clamped at the oldest date.
    pub fn day_prev(&mut self) -> bool {
        self.mode == WindowMode::Day && self.cursor.prev()
    }

    /// Step to the next upload day; clamped at the newest date.
    pub fn day_next(&mut self) -> bool {
        self.mode == WindowMode::Day && self.cursor.next()
    }

    pub fn day_nav_state(&self) -> DayNavState {
        // With no uploads the cursor has nothing selected; the header then
        // shows today's civil date rather than a blank.
        let key = match self.cursor.selected() {
            Some(key) => key.to_owned(),
            None => civil::latest_upload_date(&self.videos),
        };
        DayNavState {
            label: civil::day_label_for_key(&key),
            can_prev: self.cursor.can_prev(),
            can_next: self.cursor.can_next(),
        }
    }

    fn filtered(&self, now: DateTime<Utc>) -> Vec<&VideoRecord> {
        bucket::filter_by_mode(&self.videos, self.mode, self.cursor.selected(), now)
    }

    /// Metrics summary for the records visible in the current mode.
    pub fn summary(&self, now: DateTime<Utc>) -> Summary {
        metrics::summarize(&self.filtered(now))
    }

    /// Stage a render of the current view. Supersedes any in-flight
    /// animation; the returned token must accompany every frame.
    pub fn begin_render(&mut self, clock: RenderClock, animate: bool) -> RenderToken {
        let filtered: Vec<VideoRecord> = self
            .filtered(clock.utc)
            .into_iter()
            .cloned()
            .collect();
        match self.mode {
            WindowMode::Day => self.renderer.begin_band(filtered, clock),
            mode => self
                .renderer
                .begin_line(filtered, mode.days(), clock, animate),
        }
    }

    /// Draw one frame; pump until [`FrameStatus::Settled`].
    pub fn render_frame(
        &mut self,
        surface: &mut dyn Surface,
        token: RenderToken,
        clock: RenderClock,
    ) -> FrameStatus {
        self.renderer.render_frame(surface, token, clock)
    }

    /// Forward a (debounced) container resize.
    pub fn notify_resize(&mut self, now: Instant) {
        self.renderer.notify_resize(now);
    }

    /// Whether the shell should keep its frame callback scheduled.
    pub fn needs_frame(&self) -> bool {
        self.renderer.needs_frame()
    }

    /// Answer a pointer move at surface coordinates.
    pub fn pointer_move(&self, x: f64, y: f64) -> TooltipAction {
        hover::pointer_move(self.renderer.geometry(), x, y)
    }

    /// Pointer left the surface: always hide.
    pub fn pointer_leave(&self) -> TooltipAction {
        hover::pointer_leave()
    }
}
