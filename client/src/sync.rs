//! Optimistic Sync Controller
//!
//! Makes profile mutations feel synchronous: every patch is committed
//! locally first, then confirmed remotely. The server's returned
//! account is the merge source of truth on success; on failure the
//! local snapshot rolls back to its exact pre-mutation state and the
//! error surfaces as a dismissible message plus the returned `Err`.
//!
//! Applies are not queued or versioned; when two land remotely the last
//! response wins. A hardened revision would serialize them per account
//! or attach a monotonic patch version for the server to check.

use serde_json::json;

use crate::api::RemoteApi;
use crate::error::ClientResult;
use crate::session::SessionStore;
use crate::types::User;

/// Client-side account state owner.
///
/// Holds the current snapshot, the credential, and the session store.
/// Nothing else writes the store.
pub struct SyncController<A>
where
    A: RemoteApi,
{
    api: A,
    store: SessionStore,
    user: User,
    token: Option<String>,
    last_error: Option<String>,
}

impl<A> SyncController<A>
where
    A: RemoteApi,
{
    /// Restore a persisted session if one exists, else start as a
    /// local-only guest.
    pub fn new(api: A, store: SessionStore) -> Self {
        let user = store.load_user().unwrap_or_else(User::guest);
        let token = store.load_token();
        Self {
            api,
            store,
            user,
            token,
            last_error: None,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// True once a register/login has bound this session to an account
    pub fn is_authenticated(&self) -> bool {
        !self.user.id.is_empty() && self.token.is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Persist and adopt a snapshot. Persistence failures degrade to a
    /// log line; the in-memory state is still the caller's truth.
    fn set_user(&mut self, user: User) {
        if let Err(e) = self.store.save_user(&user) {
            tracing::warn!(error = %e, "Failed to persist session snapshot");
        }
        self.user = user;
    }

    fn install_session(&mut self, user: User, token: String) {
        if let Err(e) = self.store.save_token(&token) {
            tracing::warn!(error = %e, "Failed to persist credential");
        }
        self.set_user(user);
        self.token = Some(token);
        self.last_error = None;
    }

    pub async fn register(&mut self, name: &str, email: &str, password: &str) -> ClientResult<()> {
        let success = self.api.register(name, email, password).await?;
        self.install_session(success.user, success.token);
        Ok(())
    }

    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<()> {
        let success = self.api.login(email, password).await?;
        self.install_session(success.user, success.token);
        Ok(())
    }

    /// Drop the session: snapshot, credential, pending error and both
    /// durable keys go together.
    pub fn logout(&mut self) {
        self.store.clear();
        self.user = User::guest();
        self.token = None;
        self.last_error = None;
    }

    /// Apply a profile patch optimistically.
    ///
    /// Commits the shallow merge locally before any network traffic.
    /// Without a bound account the change stays local. Otherwise the
    /// patch goes to the server; success adopts the server's account,
    /// failure restores the exact pre-patch snapshot, records the
    /// message, and returns the error so composed flows stop chaining.
    pub async fn apply(&mut self, patch: serde_json::Value) -> ClientResult<()> {
        let snapshot = self.user.clone();

        let merged = self.user.merged(&patch)?;
        self.set_user(merged);

        if self.user.id.is_empty() {
            return Ok(());
        }
        let Some(token) = self.token.clone() else {
            return Ok(());
        };

        match self.api.update_user(&snapshot.id, &token, &patch).await {
            Ok(server_user) => {
                self.set_user(server_user);
                Ok(())
            }
            Err(e) => {
                self.set_user(snapshot);
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Flip between light and dark
    pub async fn toggle_theme(&mut self) -> ClientResult<()> {
        let next = if self.user.theme == "dark" {
            "light"
        } else {
            "dark"
        };
        self.apply(json!({ "theme": next })).await
    }

    pub async fn set_language(&mut self, language: &str) -> ClientResult<()> {
        self.apply(json!({ "language": language })).await
    }

    pub async fn set_style_preference(&mut self, style: &str) -> ClientResult<()> {
        self.apply(json!({ "stylePreference": style })).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AuthSuccess;
    use crate::error::ClientError;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scripted fake: pops one pre-loaded result per update call and
    /// records the patches it was sent.
    #[derive(Default)]
    struct ScriptedApi {
        update_results: Mutex<VecDeque<Result<User, ClientError>>>,
        update_calls: Mutex<Vec<serde_json::Value>>,
        auth_result: Mutex<Option<AuthSuccess>>,
    }

    impl ScriptedApi {
        fn push_update(&self, result: Result<User, ClientError>) {
            self.update_results.lock().unwrap().push_back(result);
        }

        fn update_call_count(&self) -> usize {
            self.update_calls.lock().unwrap().len()
        }
    }

    fn api_error(status: u16, message: &str) -> ClientError {
        ClientError::Api {
            status,
            message: message.to_string(),
        }
    }

    impl RemoteApi for ScriptedApi {
        async fn register(
            &self,
            _name: &str,
            _email: &str,
            _password: &str,
        ) -> ClientResult<AuthSuccess> {
            Ok(self.auth_result.lock().unwrap().clone().unwrap())
        }

        async fn login(&self, _email: &str, _password: &str) -> ClientResult<AuthSuccess> {
            Ok(self.auth_result.lock().unwrap().clone().unwrap())
        }

        async fn update_user(
            &self,
            _id: &str,
            _token: &str,
            patch: &serde_json::Value,
        ) -> ClientResult<User> {
            self.update_calls.lock().unwrap().push(patch.clone());
            self.update_results
                .lock()
                .unwrap()
                .pop_front()
                .expect("unscripted update call")
        }
    }

    fn registered_user() -> User {
        let mut user = User::guest();
        user.id = "acc-1".to_string();
        user.name = "Ana".to_string();
        user.email = "ana@test.com".to_string();
        user
    }

    fn controller_with(
        api: ScriptedApi,
        user: User,
        token: Option<&str>,
    ) -> (SyncController<ScriptedApi>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        if let Some(token) = token {
            store.save_token(token).unwrap();
        }
        store.save_user(&user).unwrap();
        (SyncController::new(api, store), dir)
    }

    #[tokio::test]
    async fn test_apply_success_adopts_server_account() {
        let api = ScriptedApi::default();
        let mut server_user = registered_user();
        server_user.theme = "dark".to_string();
        server_user.updated_at = "2025-02-01T00:00:00Z".to_string();
        api.push_update(Ok(server_user.clone()));

        let (mut controller, _dir) = controller_with(api, registered_user(), Some("tok"));

        controller.apply(json!({ "theme": "dark" })).await.unwrap();

        // Server response wins, including fields the patch never touched
        assert_eq!(controller.user(), &server_user);
        assert!(controller.last_error().is_none());
    }

    #[tokio::test]
    async fn test_apply_failure_rolls_back_exactly() {
        let api = ScriptedApi::default();
        api.push_update(Err(api_error(409, "Email already registered")));

        let mut before = registered_user();
        before.favorites = vec!["p1".to_string()];
        let (mut controller, _dir) = controller_with(api, before.clone(), Some("tok"));

        let result = controller
            .apply(json!({ "email": "eva@test.com", "theme": "dark" }))
            .await;

        assert!(result.is_err());
        // Bit-for-bit restoration, theme side effect included
        assert_eq!(controller.user(), &before);
        assert_eq!(controller.last_error(), Some("Email already registered"));

        controller.dismiss_error();
        assert!(controller.last_error().is_none());
    }

    #[tokio::test]
    async fn test_guest_apply_stays_local() {
        let api = ScriptedApi::default();
        let (mut controller, _dir) = controller_with(api, User::guest(), None);

        controller.apply(json!({ "theme": "dark" })).await.unwrap();

        assert_eq!(controller.user().theme, "dark");
        assert_eq!(controller.api.update_call_count(), 0);
    }

    #[tokio::test]
    async fn test_toggle_theme_composes_through_apply() {
        let api = ScriptedApi::default();
        let mut dark = registered_user();
        dark.theme = "dark".to_string();
        api.push_update(Ok(dark));

        let (mut controller, _dir) = controller_with(api, registered_user(), Some("tok"));
        controller.toggle_theme().await.unwrap();

        assert_eq!(controller.user().theme, "dark");
        let calls = controller.api.update_calls.lock().unwrap();
        assert_eq!(calls[0], json!({ "theme": "dark" }));
    }

    #[tokio::test]
    async fn test_login_installs_and_logout_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        let api = ScriptedApi::default();
        *api.auth_result.lock().unwrap() = Some(AuthSuccess {
            user: registered_user(),
            token: "fresh-token".to_string(),
        });

        let mut controller = SyncController::new(api, store);
        controller.login("ana@test.com", "Passw0rd").await.unwrap();

        assert!(controller.is_authenticated());
        assert_eq!(controller.token(), Some("fresh-token"));
        assert_eq!(controller.store.load_token().as_deref(), Some("fresh-token"));
        assert_eq!(controller.store.load_user().unwrap().id, "acc-1");

        controller.logout();
        assert!(!controller.is_authenticated());
        assert!(controller.store.load_token().is_none());
        assert!(controller.store.load_user().is_none());
        assert_eq!(controller.user().id, "");
    }

    #[tokio::test]
    async fn test_failed_apply_does_not_stop_later_applies() {
        let api = ScriptedApi::default();
        api.push_update(Err(api_error(400, "Invalid plan")));
        let mut ok_user = registered_user();
        ok_user.language = "en".to_string();
        api.push_update(Ok(ok_user));

        let (mut controller, _dir) = controller_with(api, registered_user(), Some("tok"));

        assert!(controller.apply(json!({ "plan": "gold" })).await.is_err());
        controller.set_language("en").await.unwrap();

        assert_eq!(controller.user().language, "en");
        // The rejected patch left no trace
        assert_eq!(controller.user().plan, "free");
    }
}
