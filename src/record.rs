use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single upload as handed over by the data-source collaborator.
///
/// The engine never mutates records; chart geometry carries annotated
/// copies. Field names follow the collaborator's JSON (`publishedAt`,
/// `thumbnailUrl`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub published_at: DateTime<Utc>,
    pub thumbnail_url: String,
}
