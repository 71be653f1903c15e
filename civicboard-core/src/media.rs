//! Media records: photos, videos and presentations.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BoardError;
use crate::event::DATE_FORMAT;

/// A media item. The kind-specific fields live in `content`, which is
/// flattened into the record so the stored shape is
/// `{"id": …, "kind": "photo", "url": …, "caption": …}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: String,
    #[serde(flatten)]
    pub content: MediaContent,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaContent {
    Photo {
        url: String,
        caption: String,
    },
    Video {
        url: String,
        title: String,
        description: String,
    },
    Presentation {
        url: String,
        title: String,
        description: String,
        /// Presentation date, `YYYY-MM-DD`
        date: String,
        /// File format label, e.g. "PDF" or "PowerPoint"
        format: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Photo,
    Video,
    Presentation,
}

impl Media {
    pub fn new(content: MediaContent) -> Self {
        Media {
            id: uuid::Uuid::new_v4().to_string(),
            content,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn kind(&self) -> MediaKind {
        self.content.kind()
    }

    pub fn url(&self) -> &str {
        match &self.content {
            MediaContent::Photo { url, .. }
            | MediaContent::Video { url, .. }
            | MediaContent::Presentation { url, .. } => url,
        }
    }

    /// Display label: caption for photos, title otherwise.
    pub fn label(&self) -> &str {
        match &self.content {
            MediaContent::Photo { caption, .. } => caption,
            MediaContent::Video { title, .. } | MediaContent::Presentation { title, .. } => title,
        }
    }

    /// Where a video should be played from. `None` for photos and presentations.
    pub fn video_source(&self) -> Option<VideoSource> {
        match &self.content {
            MediaContent::Video { url, .. } => Some(VideoSource::detect(url)),
            _ => None,
        }
    }

    /// Presentation date, if this is a presentation with a valid date.
    pub fn presentation_date(&self) -> Option<NaiveDate> {
        match &self.content {
            MediaContent::Presentation { date, .. } => {
                NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok()
            }
            _ => None,
        }
    }
}

impl MediaContent {
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaContent::Photo { .. } => MediaKind::Photo,
            MediaContent::Video { .. } => MediaKind::Video,
            MediaContent::Presentation { .. } => MediaKind::Presentation,
        }
    }
}

impl MediaKind {
    pub const ALL: [MediaKind; 3] = [MediaKind::Photo, MediaKind::Video, MediaKind::Presentation];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
            MediaKind::Presentation => "presentation",
        }
    }

    /// Message shown when there are no items of this kind.
    pub fn empty_message(&self) -> &'static str {
        match self {
            MediaKind::Photo => "No photos yet. Add one to get started!",
            MediaKind::Video => "No videos yet. Add one to get started!",
            MediaKind::Presentation => "No presentations yet. Add one to get started!",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "photo" => Ok(MediaKind::Photo),
            "video" => Ok(MediaKind::Video),
            "presentation" => Ok(MediaKind::Presentation),
            other => Err(BoardError::InvalidInput(format!(
                "Unknown media kind '{}'. Expected photo, video or presentation",
                other
            ))),
        }
    }
}

static YOUTUBE_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
    )
    .expect("valid YouTube id pattern")
});

/// Where a video is hosted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// `id` is empty when the URL points at YouTube but no id could be found.
    YouTube { id: String },
    Vimeo { id: String },
    Direct { url: String },
}

impl VideoSource {
    pub fn detect(url: &str) -> Self {
        if url.contains("youtube.com") || url.contains("youtu.be") {
            let id = YOUTUBE_ID
                .captures(url)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            return VideoSource::YouTube { id };
        }

        if url.contains("vimeo.com") {
            let id = url.rsplit('/').next().unwrap_or_default().to_string();
            return VideoSource::Vimeo { id };
        }

        VideoSource::Direct {
            url: url.to_string(),
        }
    }

    /// URL of an embeddable player for this video.
    pub fn embed_url(&self) -> String {
        match self {
            VideoSource::YouTube { id } => format!("https://www.youtube.com/embed/{}", id),
            VideoSource::Vimeo { id } => format!("https://player.vimeo.com/video/{}", id),
            VideoSource::Direct { url } => url.clone(),
        }
    }
}
