// src/models/mod.rs
//! Data model: normalized video records and the identity context.

pub mod identity;
pub mod video;

pub use identity::{IdentityContext, IdentityProvider, PersistedIdentity, Role, SharedIdentity};
pub use video::{RawVideoItem, VideoItem, VideoPage, VideoScore};
