// src/models/identity.rs
//! The authenticated user's identity context, plus the small slice of it
//! that survives restarts.
//!
//! The cache only ever reads identity (to pick endpoints and detect context
//! changes); writing it is the embedding application's job. Collections are
//! rebuilt from the network every session — only `PersistedIdentity` crosses
//! the serialization boundary.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::RwLock;

/// Account role. Placement-drive and academy accounts see a job-scoped
/// primary feed instead of the global one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Candidate,
    Recruiter,
    PlacementDrive,
    Academy,
}

impl Role {
    pub fn is_scoped(&self) -> bool {
        matches!(self, Role::PlacementDrive | Role::Academy)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    pub user_id: String,
    pub role: Role,
    pub job_id: Option<String>,
}

impl IdentityContext {
    pub fn new(user_id: impl Into<String>, role: Role, job_id: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            job_id,
        }
    }

    /// True when the primary feed should be scoped to this account's job.
    pub fn is_scoped_role(&self) -> bool {
        self.role.is_scoped()
    }
}

/// Read-only seam between the cache and whoever owns authentication state.
/// `None` means "identity not loaded yet", which fetches treat as a quiet
/// no-op rather than an error.
pub trait IdentityProvider: Send + Sync {
    fn current(&self) -> Option<IdentityContext>;
}

/// An `IdentityProvider` over shared mutable state. The embedding app sets
/// it after login / token refresh; the cache reads it on every fetch.
#[derive(Debug, Default)]
pub struct SharedIdentity {
    inner: RwLock<Option<IdentityContext>>,
}

impl SharedIdentity {
    pub fn new(initial: Option<IdentityContext>) -> Self {
        Self {
            inner: RwLock::new(initial),
        }
    }

    pub fn set(&self, context: Option<IdentityContext>) {
        *self.inner.write().unwrap() = context;
    }
}

impl IdentityProvider for SharedIdentity {
    fn current(&self) -> Option<IdentityContext> {
        self.inner.read().unwrap().clone()
    }
}

/// The part of identity that is persisted across sessions, with an explicit
/// JSON serialization boundary. Everything else (collections, flags) is
/// ephemeral by design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedIdentity {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub role: Role,
    #[serde(rename = "jobId")]
    pub job_id: Option<String>,
    #[serde(rename = "authToken")]
    pub auth_token: Option<String>,
}

impl PersistedIdentity {
    /// Restore a previously saved identity. `Ok(None)` when no identity has
    /// been persisted yet — a fresh install, not an error.
    pub fn load(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading persisted identity from {}", path.display()))?;
        let identity = serde_json::from_str(&raw)
            .with_context(|| format!("parsing persisted identity at {}", path.display()))?;
        Ok(Some(identity))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating identity directory {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)
            .with_context(|| format!("writing persisted identity to {}", path.display()))?;
        log::info!("Persisted identity for user {}", self.user_id);
        Ok(())
    }

    /// Delete the persisted identity, e.g. on logout. Missing file is fine.
    pub fn remove(path: &Path) -> anyhow::Result<()> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("removing persisted identity {}", path.display()))
            }
        }
    }

    pub fn context(&self) -> IdentityContext {
        IdentityContext {
            user_id: self.user_id.clone(),
            role: self.role,
            job_id: self.job_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scoped_roles_are_job_scoped() {
        assert!(Role::PlacementDrive.is_scoped());
        assert!(Role::Academy.is_scoped());
        assert!(!Role::Candidate.is_scoped());
        assert!(!Role::Recruiter.is_scoped());
    }

    #[test]
    fn shared_identity_reflects_updates() {
        let shared = SharedIdentity::default();
        assert!(shared.current().is_none());

        shared.set(Some(IdentityContext::new("u1", Role::Candidate, None)));
        assert_eq!(shared.current().unwrap().user_id, "u1");

        shared.set(None);
        assert!(shared.current().is_none());
    }

    #[test]
    fn role_serializes_snake_case() {
        let json = serde_json::to_string(&Role::PlacementDrive).unwrap();
        assert_eq!(json, r#""placement_drive""#);
    }
}
