// src/api/mod.rs
//! HTTP collaborator: endpoint construction and the authenticated client.

pub mod client;
pub mod endpoints;

pub use client::ApiClient;
pub use endpoints::EndpointKey;
