//! Round-trip tests for the persisted identity boundary.

use pretty_assertions::assert_eq;
use reelcv_client::{PersistedIdentity, Role};

#[test]
fn save_then_load_restores_the_identity() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("identity.json");

    let identity = PersistedIdentity {
        user_id: "u42".to_string(),
        role: Role::PlacementDrive,
        job_id: Some("J1".to_string()),
        auth_token: Some("token-abc".to_string()),
    };
    identity.save(&path).expect("save should succeed");

    let restored = PersistedIdentity::load(&path)
        .expect("load should succeed")
        .expect("identity should be present");
    assert_eq!(restored, identity);

    let context = restored.context();
    assert_eq!(context.user_id, "u42");
    assert!(context.is_scoped_role());
    assert_eq!(context.job_id.as_deref(), Some("J1"));
}

#[test]
fn loading_a_missing_file_is_not_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("never-written.json");

    let restored = PersistedIdentity::load(&path).expect("load should succeed");
    assert!(restored.is_none());
}

#[test]
fn remove_is_idempotent() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("identity.json");

    let identity = PersistedIdentity {
        user_id: "u1".to_string(),
        role: Role::Candidate,
        job_id: None,
        auth_token: None,
    };
    identity.save(&path).expect("save should succeed");

    PersistedIdentity::remove(&path).expect("first remove");
    PersistedIdentity::remove(&path).expect("second remove is a no-op");
    assert!(PersistedIdentity::load(&path).unwrap().is_none());
}

#[test]
fn corrupt_identity_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("identity.json");
    std::fs::write(&path, "not json at all").expect("write");

    assert!(PersistedIdentity::load(&path).is_err());
}
