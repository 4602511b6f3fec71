//! Durable Client Session Store
//!
//! File-backed replacement for the browser's durable keys: one file for
//! the credential string, one for the last-known account snapshot. The
//! store is an explicit owned object rooted at a caller-supplied
//! directory, never an ambient singleton.

use std::fs;
use std::path::PathBuf;

use crate::error::ClientResult;
use crate::types::User;

const TOKEN_KEY: &str = "modai_token";
const USER_KEY: &str = "modai_user";

/// Durable session store
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    pub fn save_token(&self, token: &str) -> ClientResult<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(TOKEN_KEY), token)?;
        Ok(())
    }

    /// Missing or unreadable token reads as absent
    pub fn load_token(&self) -> Option<String> {
        let token = fs::read_to_string(self.path(TOKEN_KEY)).ok()?;
        if token.is_empty() { None } else { Some(token) }
    }

    pub fn save_user(&self, user: &User) -> ClientResult<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_vec(user)?;
        fs::write(self.path(USER_KEY), json)?;
        Ok(())
    }

    /// Load the persisted snapshot.
    ///
    /// A corrupt snapshot is dropped (file removed) and reported as
    /// absent; it must never take the application down.
    pub fn load_user(&self) -> Option<User> {
        let path = self.path(USER_KEY);
        let bytes = fs::read(&path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding corrupt stored session snapshot");
                let _ = fs::remove_file(&path);
                None
            }
        }
    }

    /// Remove both durable keys together
    pub fn clear(&self) {
        let _ = fs::remove_file(self.path(TOKEN_KEY));
        let _ = fs::remove_file(self.path(USER_KEY));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        assert!(store.load_token().is_none());
        assert!(store.load_user().is_none());

        let mut user = User::guest();
        user.id = "abc".to_string();
        user.name = "Ana".to_string();

        store.save_token("tok.sig").unwrap();
        store.save_user(&user).unwrap();

        assert_eq!(store.load_token().as_deref(), Some("tok.sig"));
        assert_eq!(store.load_user().unwrap(), user);

        store.clear();
        assert!(store.load_token().is_none());
        assert!(store.load_user().is_none());
    }

    #[test]
    fn test_corrupt_snapshot_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        fs::create_dir_all(dir.path()).unwrap();
        fs::write(dir.path().join(USER_KEY), b"{not json").unwrap();

        assert!(store.load_user().is_none());
        // The broken file is gone, not left to fail again
        assert!(!dir.path().join(USER_KEY).exists());
    }
}
