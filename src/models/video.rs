// src/models/video.rs
//! Video records as the client sees them.
//!
//! The backend is inconsistent about field naming (`id` vs `videoId`, string
//! vs numeric ids), so decoding goes through an explicit normalization
//! boundary here: `RawVideoItem::normalize` resolves the canonical id once
//! and the rest of the crate only ever deals with `VideoItem::id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One playable video record, fully normalized. Joined attributes (like
/// count, aggregate score) are fetched separately and are not part of
/// identity — see `VideoScore`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoItem {
    pub id: String,
    #[serde(rename = "thumbnailUrl")]
    pub thumbnail_url: String,
    pub title: String,
    #[serde(rename = "ownerName")]
    pub owner_name: String,
    #[serde(rename = "ownerAvatarUrl")]
    pub owner_avatar_url: Option<String>,
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// A video id as it appears on the wire: some endpoints send strings,
/// others numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(u64),
}

impl RawId {
    fn into_canonical(self) -> Option<String> {
        match self {
            RawId::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            RawId::Number(n) => Some(n.to_string()),
        }
    }
}

/// A video record exactly as one of the list endpoints returned it.
/// Different endpoints disagree on field names, hence the fallbacks.
#[derive(Debug, Clone, Deserialize)]
pub struct RawVideoItem {
    pub id: Option<RawId>,
    #[serde(rename = "videoId")]
    pub video_id: Option<RawId>,
    #[serde(rename = "thumbnailUrl")]
    pub thumbnail_url: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "ownerName")]
    pub owner_name: Option<String>,
    #[serde(rename = "ownerAvatarUrl")]
    pub owner_avatar_url: Option<String>,
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl RawVideoItem {
    /// Resolve the canonical record, trying `id` then `videoId` for
    /// identity. Records with no usable id or no usable thumbnail are not
    /// presentable and normalize to `None`.
    pub fn normalize(self) -> Option<VideoItem> {
        let id = self
            .id
            .and_then(RawId::into_canonical)
            .or_else(|| self.video_id.and_then(RawId::into_canonical))?;

        let thumbnail_url = match self.thumbnail_url {
            Some(url) if !url.trim().is_empty() => url,
            _ => {
                log::debug!("Dropping video {} with no usable thumbnail", id);
                return None;
            }
        };

        Some(VideoItem {
            id,
            thumbnail_url,
            title: self.title.unwrap_or_default(),
            owner_name: self.owner_name.unwrap_or_default(),
            owner_avatar_url: self.owner_avatar_url,
            uploaded_at: self.uploaded_at,
        })
    }
}

/// One page of a paginated list endpoint:
/// `{ "items": [...], "totalPages": n }`.
#[derive(Debug, Deserialize)]
pub struct VideoPage {
    pub items: Vec<RawVideoItem>,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

impl VideoPage {
    /// Normalize every raw record, dropping the unpresentable ones.
    /// Order is preserved; de-duplication happens in the store, where the
    /// combined sequence is known.
    pub fn normalized_items(self) -> Vec<VideoItem> {
        self.items
            .into_iter()
            .filter_map(RawVideoItem::normalize)
            .collect()
    }
}

/// Per-video aggregate stats, joined on demand.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VideoScore {
    #[serde(rename = "likeCount")]
    pub like_count: u64,
    #[serde(rename = "averageScore")]
    pub average_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(json: &str) -> RawVideoItem {
        serde_json::from_str(json).expect("raw video should parse")
    }

    #[test]
    fn normalizes_canonical_id_field() {
        let item = raw(r#"{"id": "v1", "thumbnailUrl": "http://t/1.jpg"}"#)
            .normalize()
            .expect("presentable item");
        assert_eq!(item.id, "v1");
    }

    #[test]
    fn falls_back_to_video_id_field() {
        let item = raw(r#"{"videoId": 42, "thumbnailUrl": "http://t/42.jpg", "title": "Intro"}"#)
            .normalize()
            .expect("presentable item");
        assert_eq!(item.id, "42");
        assert_eq!(item.title, "Intro");
    }

    #[test]
    fn primary_id_wins_over_fallback() {
        let item = raw(r#"{"id": "a", "videoId": "b", "thumbnailUrl": "http://t/a.jpg"}"#)
            .normalize()
            .expect("presentable item");
        assert_eq!(item.id, "a");
    }

    #[test]
    fn numeric_id_becomes_string() {
        let item = raw(r#"{"id": 7, "thumbnailUrl": "http://t/7.jpg"}"#)
            .normalize()
            .expect("presentable item");
        assert_eq!(item.id, "7");
    }

    #[test]
    fn missing_thumbnail_is_dropped() {
        assert!(raw(r#"{"id": "v1"}"#).normalize().is_none());
        assert!(raw(r#"{"id": "v1", "thumbnailUrl": ""}"#).normalize().is_none());
        assert!(raw(r#"{"id": "v1", "thumbnailUrl": "   "}"#).normalize().is_none());
    }

    #[test]
    fn missing_id_is_dropped() {
        assert!(raw(r#"{"thumbnailUrl": "http://t/x.jpg"}"#).normalize().is_none());
        assert!(raw(r#"{"id": "  ", "thumbnailUrl": "http://t/x.jpg"}"#)
            .normalize()
            .is_none());
    }

    #[test]
    fn page_normalization_filters_and_preserves_order() {
        let page: VideoPage = serde_json::from_str(
            r#"{
                "items": [
                    {"id": "a", "thumbnailUrl": "http://t/a.jpg"},
                    {"id": "bad"},
                    {"videoId": "b", "thumbnailUrl": "http://t/b.jpg"}
                ],
                "totalPages": 3
            }"#,
        )
        .expect("page should parse");
        assert_eq!(page.total_pages, 3);
        let ids: Vec<String> = page.normalized_items().into_iter().map(|v| v.id).collect();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
    }
}
