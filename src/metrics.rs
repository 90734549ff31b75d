//! Aggregate statistics over the uploads currently in view: peak publishing
//! hour, publishing-time consistency, and the recommendation confidence.

use serde::Serialize;

use crate::civil;
use crate::record::VideoRecord;

/// Standard-deviation thresholds (minutes) for the consistency labels.
const REGULAR_SD_MAX: f64 = 45.0;
const MODERATE_SD_MAX: f64 = 120.0;

/// Sentinel shown wherever a metric has no defined value.
pub const EMPTY_SENTINEL: &str = "—";

/// The hour-of-day with the most uploads in view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PeakHour {
    pub hour: u32,
    pub count: usize,
    /// `"HH:00 – HH:00"` covering the peak hour.
    pub display: String,
}

/// Publishing-time consistency classification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Consistency {
    pub label: String,
    pub sub: String,
}

/// The metrics summary handed to the UI shell, covering the currently
/// filtered view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub peak_display: String,
    pub recommended_display: String,
    pub recommended_confidence_text: String,
    pub consistency_label: String,
    pub consistency_sub: String,
}

/// Histogram the civil hour of every record and return the fullest bin.
/// Ties resolve to the lowest hour index; an empty input yields hour 0 with
/// count 0.
pub fn peak_hour(videos: &[&VideoRecord]) -> PeakHour {
    let mut counts = [0usize; 24];
    for v in videos {
        counts[civil::normalize(v.published_at).hour as usize] += 1;
    }
    let mut max_idx = 0;
    for h in 1..24 {
        if counts[h] > counts[max_idx] {
            max_idx = h;
        }
    }
    PeakHour {
        hour: max_idx as u32,
        count: counts[max_idx],
        display: hour_range_display(max_idx as u32),
    }
}

fn hour_range_display(hour: u32) -> String {
    format!("{hour:02}:00 – {:02}:00", (hour + 1) % 24)
}

/// Classify how tightly publish times cluster, from the population standard
/// deviation of minute-of-day samples. Fewer than 3 samples cannot support a
/// meaningful deviation and report as insufficient instead.
pub fn consistency(videos: &[&VideoRecord]) -> Consistency {
    let minutes: Vec<f64> = videos
        .iter()
        .map(|v| f64::from(civil::normalize(v.published_at).minute_of_day()))
        .collect();

    if minutes.is_empty() {
        return Consistency {
            label: EMPTY_SENTINEL.to_owned(),
            sub: String::new(),
        };
    }
    if minutes.len() < 3 {
        tracing::debug!(samples = minutes.len(), "too few samples for consistency");
        return Consistency {
            label: "Insufficient data".to_owned(),
            sub: "At least 3 uploads needed".to_owned(),
        };
    }

    let n = minutes.len() as f64;
    let mean = minutes.iter().sum::<f64>() / n;
    let variance = minutes.iter().map(|m| (m - mean).powi(2)).sum::<f64>() / n;
    let sd = variance.sqrt();

    let label = if sd <= REGULAR_SD_MAX {
        "Regular"
    } else if sd <= MODERATE_SD_MAX {
        "Moderate"
    } else {
        "Scattered"
    };
    Consistency {
        label: label.to_owned(),
        sub: format!("Spread: ~{} min", sd.round() as i64),
    }
}

/// Build the full summary for the view. The primary metrics (total, peak)
/// are computed first so a degraded consistency can never blank them.
pub fn summarize(videos: &[&VideoRecord]) -> Summary {
    let total = videos.len();
    let peak = peak_hour(videos);

    let (recommended_display, recommended_confidence_text) = if total == 0 {
        (EMPTY_SENTINEL.to_owned(), String::new())
    } else {
        let pct = ((peak.count as f64 / total as f64) * 100.0).round() as u32;
        (
            peak.display.clone(),
            format!("Confidence: {}/{} ({pct}%)", peak.count, total),
        )
    };

    let cons = consistency(videos);

    Summary {
        total,
        peak_display: peak.display,
        recommended_display,
        recommended_confidence_text,
        consistency_label: cons.label,
        consistency_sub: cons.sub,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(iso: &str) -> VideoRecord {
        VideoRecord {
            id: iso.to_owned(),
            title: format!("upload {iso}"),
            published_at: iso.parse().unwrap(),
            thumbnail_url: String::new(),
        }
    }

    fn refs(videos: &[VideoRecord]) -> Vec<&VideoRecord> {
        videos.iter().collect()
    }

    #[test]
    fn peak_hour_of_empty_input_is_zero_count() {
        let peak = peak_hour(&[]);
        assert_eq!(peak.count, 0);
        assert_eq!(peak.hour, 0);
        assert_eq!(peak.display, "00:00 – 01:00");
    }

    #[test]
    fn peak_hour_uses_civil_hours_and_lowest_index_ties() {
        // 15:xxZ = 19:xx civil, 03:xxZ = 07:xx civil. Two uploads each;
        // the lower hour (7) must win the tie.
        let videos = vec![
            video("2024-01-10T15:06:00Z"),
            video("2024-01-10T15:31:00Z"),
            video("2024-01-11T03:05:00Z"),
            video("2024-01-12T03:45:00Z"),
        ];
        let peak = peak_hour(&refs(&videos));
        assert_eq!(peak.hour, 7);
        assert_eq!(peak.count, 2);
        assert_eq!(peak.display, "07:00 – 08:00");
    }

    #[test]
    fn peak_display_wraps_at_midnight() {
        // 19:30Z = 23:30 civil.
        let videos = vec![video("2024-01-10T19:30:00Z")];
        assert_eq!(peak_hour(&refs(&videos)).display, "23:00 – 00:00");
    }

    #[test]
    fn identical_minutes_are_perfectly_regular() {
        let videos = vec![
            video("2024-01-10T15:30:00Z"),
            video("2024-01-11T15:30:00Z"),
            video("2024-01-12T15:30:00Z"),
        ];
        let cons = consistency(&refs(&videos));
        assert_eq!(cons.label, "Regular");
        assert_eq!(cons.sub, "Spread: ~0 min");
    }

    #[test]
    fn scattered_times_classify_as_scattered() {
        let videos = vec![
            video("2024-01-10T02:00:00Z"),
            video("2024-01-11T09:00:00Z"),
            video("2024-01-12T16:00:00Z"),
        ];
        assert_eq!(consistency(&refs(&videos)).label, "Scattered");
    }

    #[test]
    fn fewer_than_three_samples_report_insufficient_data() {
        let videos = vec![video("2024-01-10T15:00:00Z"), video("2024-01-11T15:00:00Z")];
        let cons = consistency(&refs(&videos));
        assert_eq!(cons.label, "Insufficient data");
        assert_eq!(cons.sub, "At least 3 uploads needed");
    }

    #[test]
    fn empty_summary_uses_sentinels_not_nan() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.recommended_display, EMPTY_SENTINEL);
        assert_eq!(summary.recommended_confidence_text, "");
        assert_eq!(summary.consistency_label, EMPTY_SENTINEL);
        assert_eq!(summary.consistency_sub, "");
    }

    #[test]
    fn confidence_is_an_integer_percentage() {
        let videos = vec![
            video("2024-01-10T15:06:00Z"),
            video("2024-01-11T15:20:00Z"),
            video("2024-01-12T08:00:00Z"),
        ];
        let summary = summarize(&refs(&videos));
        assert_eq!(summary.total, 3);
        assert_eq!(summary.peak_display, "19:00 – 20:00");
        assert_eq!(summary.recommended_confidence_text, "Confidence: 2/3 (67%)");
    }

    #[test]
    fn summary_serializes_for_the_shell() {
        let json = serde_json::to_value(summarize(&[])).unwrap();
        assert_eq!(json["total"], 0);
        assert_eq!(json["recommended_display"], EMPTY_SENTINEL);
    }
}
