//! Client-side cache and API consumer for the ReelCV video-résumé platform.
//!
//! The centerpiece is [`VideoListCache`]: a set of named, independently
//! paginated video collections (primary feed, liked, search) kept as a thin
//! cache over the backend's REST endpoints. Presentational layers read
//! snapshots and call fetch / load-more / refresh / clear; they never talk
//! to the network directly.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use api::{ApiClient, EndpointKey};
pub use config::{load_config, Config};
pub use error::{ClientError, Result};
pub use models::{
    IdentityContext, IdentityProvider, PersistedIdentity, Role, SharedIdentity, VideoItem,
    VideoScore,
};
pub use store::{CollectionId, CollectionSnapshot, VideoListCache};
