// src/store/cache.rs
//! The video-list cache: named, independently paginated collections over
//! the backend's list endpoints.
//!
//! Each collection is a small state machine (items, loading flags, cursor,
//! last error) keyed in a `DashMap`, so different collections never contend
//! with each other. In-flight guards are plain booleans checked and set
//! under the entry lock before the network await; the lock is never held
//! across a request. Completions carry a per-collection sequence number and
//! only the latest issued request may apply its result — an older response
//! arriving late (or after a context switch or `clear`) is discarded.

use dashmap::DashMap;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::api::{ApiClient, EndpointKey};
use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::models::{IdentityProvider, VideoItem, VideoScore};

use super::collection::{CollectionSnapshot, CollectionState};

/// The fixed set of named collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionId {
    /// Primary role-scoped feed (job-scoped for placement-drive/academy
    /// accounts, global otherwise).
    Feed,
    /// Videos the current user has liked.
    Liked,
    /// Results of the active search query.
    Search,
}

impl std::fmt::Display for CollectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectionId::Feed => write!(f, "feed"),
            CollectionId::Liked => write!(f, "liked"),
            CollectionId::Search => write!(f, "search"),
        }
    }
}

const ALL_COLLECTIONS: [CollectionId; 3] =
    [CollectionId::Feed, CollectionId::Liked, CollectionId::Search];

pub struct VideoListCache {
    client: Arc<ApiClient>,
    identity: Arc<dyn IdentityProvider>,
    page_size: u32,
    collections: DashMap<CollectionId, CollectionState>,
}

impl VideoListCache {
    pub fn new(client: Arc<ApiClient>, identity: Arc<dyn IdentityProvider>, page_size: u32) -> Self {
        Self {
            client,
            identity,
            page_size,
            collections: DashMap::new(),
        }
    }

    pub fn from_config(config: &Config, identity: Arc<dyn IdentityProvider>) -> Result<Self> {
        let client = Arc::new(ApiClient::new(config)?);
        Ok(Self::new(client, identity, config.page_size))
    }

    /// Current read-only view of a collection. Collections that were never
    /// touched report the initial empty state.
    pub fn snapshot(&self, id: CollectionId) -> CollectionSnapshot {
        self.collections
            .get(&id)
            .map(|state| state.snapshot())
            .unwrap_or_default()
    }

    /// Fetch the primary feed. With `force_refresh = false`, items already
    /// cached for the same backend query are returned without a network
    /// call. Requires an identity context; absent identity yields an empty
    /// result with no side effects ("not ready yet", not a failure).
    pub async fn fetch_feed(&self, force_refresh: bool) -> Vec<VideoItem> {
        let Some(identity) = self.identity.current() else {
            debug!("feed: fetch skipped, identity context not available yet");
            return Vec::new();
        };
        let key = EndpointKey::feed_for(&identity);
        self.fetch_collection(CollectionId::Feed, key, force_refresh)
            .await
    }

    /// Fetch the current user's liked videos.
    pub async fn fetch_liked(&self, force_refresh: bool) -> Vec<VideoItem> {
        let Some(identity) = self.identity.current() else {
            debug!("liked: fetch skipped, identity context not available yet");
            return Vec::new();
        };
        let key = EndpointKey::LikedVideos(identity.user_id);
        self.fetch_collection(CollectionId::Liked, key, force_refresh)
            .await
    }

    /// Fetch search results for `query`. The query is part of the
    /// collection's source key, so a changed query always refetches.
    pub async fn search(&self, query: &str, force_refresh: bool) -> Vec<VideoItem> {
        if self.identity.current().is_none() {
            debug!("search: fetch skipped, identity context not available yet");
            return Vec::new();
        }
        let key = EndpointKey::SearchVideos(query.to_string());
        self.fetch_collection(CollectionId::Search, key, force_refresh)
            .await
    }

    /// Request the next page and append it. No-op (current items returned
    /// unchanged) when there are no more pages, a request is already in
    /// flight, or the collection was never fetched.
    pub async fn load_more(&self, id: CollectionId) -> Vec<VideoItem> {
        let (key, next_page, seq) = {
            let mut state = self.collections.entry(id).or_default();
            if !state.has_more_pages() {
                debug!("{}: load_more skipped, no more pages", id);
                return state.items_snapshot();
            }
            if state.is_loading() {
                debug!("{}: load_more skipped, request already in flight", id);
                return state.items_snapshot();
            }
            let Some(key) = state.source_key() else {
                debug!("{}: load_more skipped, nothing fetched yet", id);
                return state.items_snapshot();
            };
            state.loading_more = true;
            (key, state.current_page() + 1, state.begin_request())
        };

        let result = self.client.fetch_page(&key, next_page, self.page_size).await;

        let mut state = self.collections.entry(id).or_default();
        if !state.is_current(seq) {
            // A clear() raced this request; the loading flag may already
            // belong to a newer in-flight request, so leave it alone.
            debug!("{}: discarding stale load_more completion (seq {})", id, seq);
            return state.items_snapshot();
        }
        state.loading_more = false;
        match result {
            Ok(page) => {
                let total_pages = page.total_pages;
                state.append_page(page.normalized_items(), total_pages);
                info!(
                    "{}: appended page {} ({} items total, more={})",
                    id,
                    next_page,
                    state.items_snapshot().len(),
                    state.has_more_pages()
                );
            }
            Err(e) => {
                warn!("{}: load_more failed: {}", id, e);
                state.record_failure(e.display_message());
            }
        }
        state.items_snapshot()
    }

    /// Reset paging and re-fetch page 0 unconditionally.
    pub async fn refresh(&self, id: CollectionId) -> Vec<VideoItem> {
        let Some(key) = self.resolve_key(id) else {
            debug!("{}: refresh skipped, no resolvable endpoint", id);
            return self.snapshot(id).items;
        };
        if let Some(mut state) = self.collections.get_mut(&id) {
            state.reset_paging();
        }
        self.fetch_collection(id, key, true).await
    }

    /// Empty one collection back to its initial state. No network effect;
    /// any response still in flight for it will be discarded.
    pub fn clear(&self, id: CollectionId) {
        if let Some(mut state) = self.collections.get_mut(&id) {
            state.clear();
            info!("{}: cleared", id);
        }
    }

    /// Logout path: every collection back to its initial state.
    pub fn clear_all(&self) {
        for id in ALL_COLLECTIONS {
            self.clear(id);
        }
    }

    /// Like a video for the current user. Re-raises failures so the caller
    /// can surface them inline; on success the Liked collection is marked
    /// stale (next non-forced fetch refetches, items stay visible until
    /// then).
    pub async fn like(&self, video_id: &str) -> Result<()> {
        let identity = self.identity.current().ok_or(ClientError::Unauthenticated)?;
        self.client.like(&identity.user_id, video_id).await?;
        self.invalidate(CollectionId::Liked);
        Ok(())
    }

    /// Remove a like. Same contract as [`like`](Self::like).
    pub async fn unlike(&self, video_id: &str) -> Result<()> {
        let identity = self.identity.current().ok_or(ClientError::Unauthenticated)?;
        self.client.unlike(&identity.user_id, video_id).await?;
        self.invalidate(CollectionId::Liked);
        Ok(())
    }

    /// Aggregate like count and score for one video. Joined data, not part
    /// of any collection; failures re-raise.
    pub async fn video_score(&self, video_id: &str) -> Result<VideoScore> {
        self.client.video_score(video_id).await
    }

    /// Shared fetch algorithm for all collections: cached-skip, in-flight
    /// guard, page-0 replace, failure folding.
    async fn fetch_collection(
        &self,
        id: CollectionId,
        key: EndpointKey,
        force_refresh: bool,
    ) -> Vec<VideoItem> {
        let seq = {
            let mut state = self.collections.entry(id).or_default();
            if state.is_loading() {
                debug!("{}: fetch skipped, request already in flight", id);
                return state.items_snapshot();
            }
            if !force_refresh && state.holds_contents_for(&key) {
                debug!("{}: cache hit for {}", id, key);
                return state.items_snapshot();
            }
            state.loading_initial = true;
            state.begin_request()
        };

        let result = self.client.fetch_page(&key, 0, self.page_size).await;

        let mut state = self.collections.entry(id).or_default();
        if !state.is_current(seq) {
            // A clear() raced this request; the loading flag may already
            // belong to a newer in-flight request, so leave it alone.
            debug!("{}: discarding stale fetch completion (seq {})", id, seq);
            return state.items_snapshot();
        }
        state.loading_initial = false;
        match result {
            Ok(page) => {
                let total_pages = page.total_pages;
                state.apply_first_page(page.normalized_items(), total_pages, key);
                info!(
                    "{}: loaded page 0 ({} items, {} backend pages)",
                    id,
                    state.items_snapshot().len(),
                    total_pages
                );
            }
            Err(e) => {
                warn!("{}: fetch failed: {}", id, e);
                state.record_failure(e.display_message());
            }
        }
        state.items_snapshot()
    }

    fn resolve_key(&self, id: CollectionId) -> Option<EndpointKey> {
        match id {
            CollectionId::Feed => self
                .identity
                .current()
                .map(|identity| EndpointKey::feed_for(&identity)),
            CollectionId::Liked => self
                .identity
                .current()
                .map(|identity| EndpointKey::LikedVideos(identity.user_id)),
            // A search can only be refreshed once a query has been issued;
            // the active query lives in the collection's source key.
            CollectionId::Search => self
                .collections
                .get(&CollectionId::Search)
                .and_then(|state| state.source_key()),
        }
    }

    fn invalidate(&self, id: CollectionId) {
        if let Some(mut state) = self.collections.get_mut(&id) {
            state.invalidate();
        }
    }
}
