// src/store/mod.rs
//! Client-side store: the video-list cache and its per-collection state.

pub mod cache;
pub mod collection;

pub use cache::{CollectionId, VideoListCache};
pub use collection::{dedup_by_id, CollectionSnapshot};
