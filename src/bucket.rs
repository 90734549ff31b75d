//! Window filtering and day-keyed grouping.
//!
//! Records are partitioned by their civil date key: trailing windows keep
//! everything on or after a cutoff key, single-day mode keeps one key, and
//! the [`DayCursor`] walks the ascending set of dates that actually contain
//! uploads.

use chrono::{DateTime, Utc};

use crate::civil;
use crate::record::VideoRecord;

/// The selected reporting horizon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WindowMode {
    /// Trailing 30 days.
    #[default]
    Days30,
    /// Trailing 7 days.
    Days7,
    /// One selected day, navigated with a [`DayCursor`].
    Day,
}

impl WindowMode {
    /// Number of calendar days the window spans.
    pub fn days(self) -> u32 {
        match self {
            WindowMode::Days30 => 30,
            WindowMode::Days7 => 7,
            WindowMode::Day => 1,
        }
    }
}

/// Keep the records visible in `mode`.
///
/// Trailing windows keep `date_key >= days_ago(window)` (inclusive cutoff;
/// the upper bound is implicit in the source data being recent). Day mode
/// keeps exactly `selected_day`, and keeps nothing when no day is selected
/// (empty dataset).
pub fn filter_by_mode<'a>(
    videos: &'a [VideoRecord],
    mode: WindowMode,
    selected_day: Option<&str>,
    now: DateTime<Utc>,
) -> Vec<&'a VideoRecord> {
    match mode {
        WindowMode::Day => {
            let Some(target) = selected_day else {
                return Vec::new();
            };
            videos
                .iter()
                .filter(|v| civil::normalize(v.published_at).date_key == target)
                .collect()
        }
        _ => {
            let cutoff = civil::days_ago_from(now, i64::from(mode.days()));
            videos
                .iter()
                .filter(|v| civil::normalize(v.published_at).date_key >= cutoff)
                .collect()
        }
    }
}

/// Group a day's records into 24 hour-of-day buckets.
pub fn group_by_hour<'a>(videos: &[&'a VideoRecord]) -> [Vec<&'a VideoRecord>; 24] {
    let mut hours: [Vec<&VideoRecord>; 24] = Default::default();
    for v in videos {
        hours[civil::normalize(v.published_at).hour as usize].push(*v);
    }
    hours
}

/// Cursor over the ascending set of civil dates with at least one upload.
///
/// Starts on the most recent such date. Navigation clamps at both ends:
/// stepping past an end is a no-op, never a wrap or an error.
#[derive(Clone, Debug, Default)]
pub struct DayCursor {
    dates: Vec<String>,
    index: usize,
}

impl DayCursor {
    pub fn from_videos(videos: &[VideoRecord]) -> Self {
        let mut dates: Vec<String> = videos
            .iter()
            .map(|v| civil::normalize(v.published_at).date_key)
            .collect();
        dates.sort();
        dates.dedup();
        let index = dates.len().saturating_sub(1);
        DayCursor { dates, index }
    }

    /// The selected date key, or `None` when no date has uploads.
    pub fn selected(&self) -> Option<&str> {
        self.dates.get(self.index).map(String::as_str)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn can_prev(&self) -> bool {
        self.index > 0
    }

    pub fn can_next(&self) -> bool {
        self.index + 1 < self.dates.len()
    }

    /// Step to the previous upload date. Returns whether the cursor moved.
    pub fn prev(&mut self) -> bool {
        if self.can_prev() {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Step to the next upload date. Returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        if self.can_next() {
            self.index += 1;
            true
        } else {
            false
        }
    }
}
