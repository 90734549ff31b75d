//! Conversion of UTC instants into the fixed civil timezone used for every
//! display and bucketing decision.
//!
//! The zone is a constant UTC+4 offset with no daylight-saving transitions,
//! so conversion is pure arithmetic: the same instant always yields the same
//! civil tuple regardless of the host's locale or zone database.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Timelike, Utc};

use crate::record::VideoRecord;

/// Offset of the civil zone from UTC, in hours.
pub const CIVIL_OFFSET_HOURS: i32 = 4;

/// Month names for `day_label`, in the product locale.
const MONTHS: [&str; 12] = [
    "Yanvar", "Fevral", "Mart", "Aprel", "May", "İyun", "İyul", "Avqust", "Sentyabr", "Oktyabr",
    "Noyabr", "Dekabr",
];

/// A UTC instant expressed in the civil zone.
///
/// `hour` is always in `0..=23`: an exact-midnight instant belongs to hour 0
/// of the already-advanced civil date (`2024-01-09T20:00:00Z` at +04:00 is
/// `2024-01-10`, hour 0), never to hour 24 of the previous one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CivilInstant {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    /// Zero-padded `YYYY-MM-DD`, the key all window filtering compares on.
    pub date_key: String,
    /// `"{day} {month-name}"`, e.g. `"4 Mart"`.
    pub day_label: String,
}

impl CivilInstant {
    /// Minutes since civil midnight; the sample the consistency metric uses.
    pub fn minute_of_day(&self) -> u32 {
        self.hour * 60 + self.minute
    }
}

fn civil_offset() -> FixedOffset {
    FixedOffset::east_opt(CIVIL_OFFSET_HOURS * 3600).expect("UTC+4 is a valid offset")
}

/// Convert a UTC instant into the civil zone. Deterministic and pure.
pub fn normalize(instant: DateTime<Utc>) -> CivilInstant {
    let local = instant.with_timezone(&civil_offset());
    let (year, month, day) = (local.year(), local.month(), local.day());
    CivilInstant {
        year,
        month,
        day,
        hour: local.hour(),
        minute: local.minute(),
        date_key: format!("{year:04}-{month:02}-{day:02}"),
        day_label: day_label(day, month),
    }
}

/// Presentation-only minute value: minutes 0-9 collapse to `:00`, minutes
/// 10+ stay as they are. The underlying instant is never altered.
pub fn round_minute(minute: u32) -> u32 {
    if minute <= 9 { 0 } else { minute }
}

/// `HH:MM` with the rounding rule applied, e.g. 19:06 -> `"19:00"`,
/// 19:31 -> `"19:31"`.
pub fn rounded_time(hour: u32, minute: u32) -> String {
    format!("{hour:02}:{:02}", round_minute(minute))
}

/// `"{day} {month-name}"` from the fixed month table. Out-of-range months
/// cannot come out of a chrono date; they render with an empty name rather
/// than panicking.
pub fn day_label(day: u32, month: u32) -> String {
    let name = (month as usize)
        .checked_sub(1)
        .and_then(|i| MONTHS.get(i))
        .copied()
        .unwrap_or_default();
    format!("{day} {name}")
}

/// Day label for a `YYYY-MM-DD` key, used by the single-day navigation
/// header. Keys the engine did not generate fall back to the raw string.
pub fn day_label_for_key(key: &str) -> String {
    match NaiveDate::parse_from_str(key, "%Y-%m-%d") {
        Ok(d) => day_label(d.day(), d.month()),
        Err(_) => key.to_owned(),
    }
}

/// Civil date of `now`, as a `NaiveDate`.
fn civil_date(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&civil_offset()).date_naive()
}

/// `YYYY-MM-DD` key for a civil date.
pub fn date_key_of(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// The `days` civil dates ending at `now`'s civil date, oldest first. This
/// is the horizontal axis of the trailing-window chart.
pub fn trailing_days(now: DateTime<Utc>, days: u32) -> Vec<NaiveDate> {
    let today = civil_date(now);
    (0..days)
        .rev()
        .map(|i| today - Duration::days(i64::from(i)))
        .collect()
}

/// Date key for "now minus `n` calendar days", computed in the civil zone so
/// window cutoffs never depend on the host's local zone.
pub fn days_ago_from(now: DateTime<Utc>, n: i64) -> String {
    date_key_of(civil_date(now) - Duration::days(n))
}

/// [`days_ago_from`] anchored at the current instant.
pub fn days_ago(n: i64) -> String {
    days_ago_from(Utc::now(), n)
}

/// Today's civil date key.
pub fn today() -> String {
    days_ago(0)
}

/// Most recent civil date key present in `videos`. An empty set falls back
/// to today's key, so day navigation always has a date to stand on.
pub fn latest_upload_date(videos: &[VideoRecord]) -> String {
    max_date_key(videos).unwrap_or_else(today)
}

/// [`latest_upload_date`] with an explicit fallback anchor.
pub fn latest_upload_date_from(videos: &[VideoRecord], now: DateTime<Utc>) -> String {
    max_date_key(videos).unwrap_or_else(|| days_ago_from(now, 0))
}

fn max_date_key(videos: &[VideoRecord]) -> Option<String> {
    videos
        .iter()
        .map(|v| normalize(v.published_at).date_key)
        .max()
}
