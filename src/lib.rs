//! Upload-time analytics engine.
//!
//! Takes a channel's recent uploads, converts every publish instant into one
//! fixed civil timezone (UTC+4), derives publishing-time statistics, and
//! renders two interactive chart modes onto a caller-supplied drawing
//! surface:
//!
//! - a line chart of publish times across a trailing 30- or 7-day window,
//!   with an animated path reveal
//! - a 24-slot "heat band" for a single selected day
//!
//! The engine is single-threaded and frame-driven: the embedding shell owns
//! the frame callback and pumps [`engine::UploadAnalyzer::render_frame`]
//! until the chart settles. Pointer queries are answered against the
//! geometry of the last settled render.
//!
//! Fetching video metadata, the HTTP edge, and DOM plumbing are the caller's
//! concern; the engine starts from a ready-made [`record::VideoRecord`] list
//! and a [`surface::Surface`] handle.

pub mod bucket;
pub mod chart;
pub mod civil;
pub mod engine;
pub mod hover;
pub mod metrics;
pub mod record;
pub mod surface;
pub mod tooltip;

pub use bucket::{DayCursor, WindowMode};
pub use chart::{ChartRenderer, FrameStatus, RenderClock, RenderToken};
pub use engine::{DayNavState, UploadAnalyzer};
pub use hover::TooltipAction;
pub use metrics::Summary;
pub use record::VideoRecord;
pub use surface::{Surface, SvgSurface};
pub use tooltip::TooltipItem;
