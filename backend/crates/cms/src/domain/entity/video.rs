//! Video Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{VideoId, text};
use crate::error::{CmsError, CmsResult};

pub const TITLE_MAX_LENGTH: usize = 200;
pub const DESCRIPTION_MAX_LENGTH: usize = 5000;
pub const URL_MAX_LENGTH: usize = 2048;
pub const DURATION_MAX_LENGTH: usize = 20;
const YOUTUBE_ID_LENGTH: usize = 11;

#[derive(Debug, Clone)]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    pub description: Option<String>,
    pub youtube_id: String,
    pub thumbnail: Option<String>,
    /// Display string such as "12:34"
    pub duration: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct VideoDraft {
    pub title: String,
    pub description: Option<String>,
    pub youtube_id: String,
    pub thumbnail: Option<String>,
    pub duration: Option<String>,
    pub published: bool,
    pub featured: bool,
}

impl Default for VideoDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            youtube_id: String::new(),
            thumbnail: None,
            duration: None,
            published: true,
            featured: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VideoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub youtube_id: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<String>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VideoFilter {
    pub published_only: bool,
    pub featured_only: bool,
}

/// Accepts a bare video id or a `watch?v=`, `youtu.be/` or `embed/` URL
pub fn parse_youtube_id(raw: &str) -> CmsResult<String> {
    let raw = raw.trim();
    let candidate = ["watch?v=", "youtu.be/", "/embed/", "/shorts/"]
        .iter()
        .find_map(|marker| raw.split_once(marker).map(|(_, rest)| rest))
        .unwrap_or(raw);
    let id: String = candidate
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();

    if id.len() != YOUTUBE_ID_LENGTH {
        return Err(CmsError::invalid("YouTube ID is invalid"));
    }
    Ok(id)
}

impl Video {
    pub fn create(draft: VideoDraft) -> CmsResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: VideoId::new(),
            title: text::required("Title", &draft.title, TITLE_MAX_LENGTH)?,
            description: text::optional(
                "Description",
                draft.description.as_deref(),
                DESCRIPTION_MAX_LENGTH,
            )?,
            youtube_id: parse_youtube_id(&draft.youtube_id)?,
            thumbnail: text::optional("Thumbnail", draft.thumbnail.as_deref(), URL_MAX_LENGTH)?,
            duration: text::optional("Duration", draft.duration.as_deref(), DURATION_MAX_LENGTH)?,
            published: draft.published,
            featured: draft.featured,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply(&mut self, patch: VideoPatch) -> CmsResult<()> {
        if let Some(title) = patch.title {
            self.title = text::required("Title", &title, TITLE_MAX_LENGTH)?;
        }
        if let Some(description) = patch.description {
            self.description =
                text::optional("Description", Some(&description), DESCRIPTION_MAX_LENGTH)?;
        }
        if let Some(youtube_id) = patch.youtube_id {
            self.youtube_id = parse_youtube_id(&youtube_id)?;
        }
        if let Some(thumbnail) = patch.thumbnail {
            self.thumbnail = text::optional("Thumbnail", Some(&thumbnail), URL_MAX_LENGTH)?;
        }
        if let Some(duration) = patch.duration {
            self.duration = text::optional("Duration", Some(&duration), DURATION_MAX_LENGTH)?;
        }
        if let Some(published) = patch.published {
            self.published = published;
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_id_forms() {
        let id = "dQw4w9WgXcQ";
        assert_eq!(parse_youtube_id(id).unwrap(), id);
        assert_eq!(
            parse_youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42").unwrap(),
            id
        );
        assert_eq!(parse_youtube_id("https://youtu.be/dQw4w9WgXcQ").unwrap(), id);
        assert_eq!(
            parse_youtube_id("https://www.youtube.com/embed/dQw4w9WgXcQ").unwrap(),
            id
        );
        assert!(parse_youtube_id("short").is_err());
        assert!(parse_youtube_id("").is_err());
    }

    #[test]
    fn test_published_by_default() {
        let video = Video::create(VideoDraft {
            title: "Intro".into(),
            youtube_id: "dQw4w9WgXcQ".into(),
            ..Default::default()
        })
        .unwrap();
        assert!(video.published);
        assert!(!video.featured);
    }
}
