// src/api/endpoints.rs
//! Backend query identities.
//!
//! An `EndpointKey` names which backend query produced a collection's
//! contents. The store compares keys across fetches to decide whether cached
//! items are still valid for the caller's current context — a changed role,
//! job or search query yields a different key and defeats the cached-skip.

use crate::models::IdentityContext;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EndpointKey {
    /// Global video feed.
    AllVideos,
    /// Feed scoped to one job posting (placement-drive / academy accounts).
    JobVideos(String),
    /// Videos liked by one user.
    LikedVideos(String),
    /// Full-text search over the feed.
    SearchVideos(String),
}

impl EndpointKey {
    /// Selects the primary-feed query for the given identity. Recomputed on
    /// every fetch so a context change between calls invalidates the cache
    /// naturally.
    pub fn feed_for(identity: &IdentityContext) -> EndpointKey {
        match (&identity.job_id, identity.is_scoped_role()) {
            (Some(job_id), true) => EndpointKey::JobVideos(job_id.clone()),
            _ => EndpointKey::AllVideos,
        }
    }

    /// URL path relative to the API base.
    pub fn path(&self) -> String {
        match self {
            EndpointKey::AllVideos => "videos".to_string(),
            EndpointKey::JobVideos(job_id) => format!("jobs/{}/videos", job_id),
            EndpointKey::LikedVideos(user_id) => format!("users/{}/liked", user_id),
            EndpointKey::SearchVideos(_) => "videos/search".to_string(),
        }
    }

    /// Extra query parameters beyond pagination.
    pub fn query_params(&self) -> Vec<(&'static str, &str)> {
        match self {
            EndpointKey::SearchVideos(query) => vec![("q", query.as_str())],
            _ => Vec::new(),
        }
    }
}

impl std::fmt::Display for EndpointKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndpointKey::AllVideos => write!(f, "videos"),
            EndpointKey::JobVideos(job_id) => write!(f, "videos:job:{}", job_id),
            EndpointKey::LikedVideos(user_id) => write!(f, "liked:{}", user_id),
            EndpointKey::SearchVideos(query) => write!(f, "search:{}", query),
        }
    }
}
