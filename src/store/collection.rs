// src/store/collection.rs
//! Per-collection state: items, loading flags, pagination cursor and the
//! request sequence used to discard stale completions.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::api::EndpointKey;
use crate::models::VideoItem;

/// Read-only view of one collection, cloned out for callers. The live state
/// stays inside the cache and is only mutated by its own request
/// completions.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSnapshot {
    pub items: Vec<VideoItem>,
    pub is_loading_initial: bool,
    pub is_loading_more: bool,
    pub has_more_pages: bool,
    pub last_error: Option<String>,
    pub current_page: u32,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl Default for CollectionSnapshot {
    /// Mirrors a collection's initial state (`has_more_pages` starts true).
    fn default() -> Self {
        CollectionState::new().snapshot()
    }
}

#[derive(Debug)]
pub(crate) struct CollectionState {
    items: Vec<VideoItem>,
    pub(crate) loading_initial: bool,
    pub(crate) loading_more: bool,
    has_more_pages: bool,
    last_error: Option<String>,
    current_page: u32,
    source_key: Option<EndpointKey>,
    // Monotonic per-collection request sequence. A completion only applies
    // if its captured sequence is still the latest issued; anything older
    // lost the race and is discarded.
    req_seq: u64,
    fetched_at: Option<DateTime<Utc>>,
}

impl Default for CollectionState {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionState {
    pub(crate) fn new() -> Self {
        Self {
            items: Vec::new(),
            loading_initial: false,
            loading_more: false,
            has_more_pages: true,
            last_error: None,
            current_page: 0,
            source_key: None,
            req_seq: 0,
            fetched_at: None,
        }
    }

    pub(crate) fn is_loading(&self) -> bool {
        // Never both at once: every operation checks this before setting
        // either flag.
        self.loading_initial || self.loading_more
    }

    pub(crate) fn has_more_pages(&self) -> bool {
        self.has_more_pages
    }

    pub(crate) fn current_page(&self) -> u32 {
        self.current_page
    }

    pub(crate) fn source_key(&self) -> Option<EndpointKey> {
        self.source_key.clone()
    }

    /// True when the current contents were produced by `key` — the
    /// stale-while-valid-key shortcut in `fetch`.
    pub(crate) fn holds_contents_for(&self, key: &EndpointKey) -> bool {
        self.fetched_at.is_some() && self.source_key.as_ref() == Some(key)
    }

    pub(crate) fn begin_request(&mut self) -> u64 {
        self.req_seq += 1;
        self.req_seq
    }

    pub(crate) fn is_current(&self, seq: u64) -> bool {
        self.req_seq == seq
    }

    /// Replace contents with page 0 of `key`.
    pub(crate) fn apply_first_page(
        &mut self,
        items: Vec<VideoItem>,
        total_pages: u32,
        key: EndpointKey,
    ) {
        self.items = dedup_by_id(items);
        self.current_page = 0;
        self.has_more_pages = total_pages > 1;
        self.source_key = Some(key);
        self.last_error = None;
        self.fetched_at = Some(Utc::now());
    }

    /// Append the next page. De-duplication re-runs over the combined
    /// sequence because a backend page may repeat an id already present.
    pub(crate) fn append_page(&mut self, new_items: Vec<VideoItem>, total_pages: u32) {
        let mut combined = std::mem::take(&mut self.items);
        combined.extend(new_items);
        self.items = dedup_by_id(combined);
        self.current_page += 1;
        self.has_more_pages = self.current_page + 1 < total_pages;
        self.last_error = None;
        self.fetched_at = Some(Utc::now());
    }

    /// Record a failed request. Existing items, cursor and paging state are
    /// deliberately left untouched — stale-but-present data beats an empty
    /// screen.
    pub(crate) fn record_failure(&mut self, message: String) {
        self.last_error = Some(message);
    }

    /// Reset to the initial empty state. Advances the request sequence so a
    /// response still in flight cannot resurrect the cleared contents.
    pub(crate) fn clear(&mut self) {
        self.req_seq += 1;
        self.items.clear();
        self.loading_initial = false;
        self.loading_more = false;
        self.has_more_pages = true;
        self.last_error = None;
        self.current_page = 0;
        self.source_key = None;
        self.fetched_at = None;
    }

    /// Mark cached contents stale without dropping them: the next
    /// non-forced fetch will hit the network, but callers keep seeing the
    /// old items until it completes.
    pub(crate) fn invalidate(&mut self) {
        self.source_key = None;
        self.fetched_at = None;
    }

    pub(crate) fn reset_paging(&mut self) {
        self.current_page = 0;
        self.has_more_pages = true;
    }

    pub(crate) fn items_snapshot(&self) -> Vec<VideoItem> {
        self.items.clone()
    }

    pub(crate) fn snapshot(&self) -> CollectionSnapshot {
        CollectionSnapshot {
            items: self.items.clone(),
            is_loading_initial: self.loading_initial,
            is_loading_more: self.loading_more,
            has_more_pages: self.has_more_pages,
            last_error: self.last_error.clone(),
            current_page: self.current_page,
            fetched_at: self.fetched_at,
        }
    }
}

/// Stable de-duplication by canonical id: first occurrence wins, relative
/// order preserved. Idempotent by construction.
pub fn dedup_by_id(items: Vec<VideoItem>) -> Vec<VideoItem> {
    let mut seen: HashSet<String> = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn video(id: &str) -> VideoItem {
        VideoItem {
            id: id.to_string(),
            thumbnail_url: format!("http://t/{}.jpg", id),
            title: String::new(),
            owner_name: String::new(),
            owner_avatar_url: None,
            uploaded_at: None,
        }
    }

    #[test]
    fn dedup_keeps_first_occurrence_in_order() {
        let deduped = dedup_by_id(vec![video("a"), video("b"), video("a"), video("c")]);
        let ids: Vec<&str> = deduped.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn dedup_is_idempotent() {
        let once = dedup_by_id(vec![video("a"), video("a"), video("b")]);
        let twice = dedup_by_id(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn first_page_replaces_contents_and_computes_paging() {
        let mut state = CollectionState::new();
        state.record_failure("old error".to_string());
        state.apply_first_page(vec![video("a")], 3, EndpointKey::AllVideos);

        let snap = state.snapshot();
        assert_eq!(snap.items.len(), 1);
        assert_eq!(snap.current_page, 0);
        assert!(snap.has_more_pages);
        assert!(snap.last_error.is_none());
    }

    #[test]
    fn single_page_result_has_no_more_pages() {
        let mut state = CollectionState::new();
        state.apply_first_page(vec![video("a")], 1, EndpointKey::AllVideos);
        assert!(!state.has_more_pages());
    }

    #[test]
    fn append_dedups_across_the_combined_sequence() {
        let mut state = CollectionState::new();
        state.apply_first_page(vec![video("a"), video("b"), video("c")], 2, EndpointKey::AllVideos);
        state.append_page(vec![video("c"), video("d")], 2);

        let snap = state.snapshot();
        let ids: Vec<&str> = snap.items.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert_eq!(snap.current_page, 1);
        assert!(!snap.has_more_pages);
    }

    #[test]
    fn stale_completion_is_not_current() {
        let mut state = CollectionState::new();
        let first = state.begin_request();
        let second = state.begin_request();
        assert!(!state.is_current(first));
        assert!(state.is_current(second));
    }

    #[test]
    fn clear_resets_everything_and_outdates_in_flight_requests() {
        let mut state = CollectionState::new();
        let seq = state.begin_request();
        state.apply_first_page(vec![video("a")], 5, EndpointKey::AllVideos);
        state.record_failure("boom".to_string());

        state.clear();

        let snap = state.snapshot();
        assert!(snap.items.is_empty());
        assert!(snap.last_error.is_none());
        assert_eq!(snap.current_page, 0);
        assert!(snap.has_more_pages);
        assert!(!state.is_current(seq));
        assert!(state.source_key().is_none());
    }

    #[test]
    fn invalidate_keeps_items_but_defeats_the_cached_skip() {
        let mut state = CollectionState::new();
        state.apply_first_page(vec![video("a")], 1, EndpointKey::AllVideos);
        assert!(state.holds_contents_for(&EndpointKey::AllVideos));

        state.invalidate();
        assert!(!state.holds_contents_for(&EndpointKey::AllVideos));
        assert_eq!(state.items_snapshot().len(), 1);
    }
}
