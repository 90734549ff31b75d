//! Tooltip content: one entry per record under the pointer, rendered as
//! HTML-safe markup for the shell to place next to the cursor.

use maud::{Markup, html};
use serde::Serialize;

use crate::chart::PlottedVideo;

/// One tooltip row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TooltipItem {
    pub thumbnail_url: String,
    pub title: String,
    /// Minute-rounded civil publish time.
    pub time_display: String,
}

impl TooltipItem {
    pub fn from_plotted(video: &PlottedVideo) -> Self {
        TooltipItem {
            thumbnail_url: video.record.thumbnail_url.clone(),
            title: video.record.title.clone(),
            time_display: video.time_display.clone(),
        }
    }
}

/// Tooltip body markup. Escaping is maud's, so titles cannot inject markup.
pub fn render(items: &[TooltipItem]) -> Markup {
    html! {
        @for item in items {
            div.tooltip-item {
                img.tooltip-thumb src=(item.thumbnail_url) alt="" loading="lazy";
                div {
                    div.tooltip-title { (item.title) }
                    div.tooltip-time { (item.time_display) }
                }
            }
        }
    }
}
