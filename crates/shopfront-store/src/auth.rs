//! # Auth Session Container
//!
//! Owns the current user identity and the persisted session behind it.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Lifecycle                                    │
//! │                                                                         │
//! │  startup ──► restore() ──► auth_token + user_data present & parseable? │
//! │                               │ yes: current user set                   │
//! │                               │ malformed: keys cleared, logged out     │
//! │                               └ absent: logged out                      │
//! │                                                                         │
//! │  login/register ──► simulated latency ──► synthesize User ──► persist  │
//! │                     (no backend, no credential check — the password    │
//! │                      is accepted and discarded)                        │
//! │                                                                         │
//! │  logout ──► remove both keys, clear current user                       │
//! │                                                                         │
//! │  Identity changes must be propagated to the cart container by the     │
//! │  caller via CartStore::set_user, which swaps the visible cart.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shopfront_core::{Role, User};

use crate::kv::KeyValueStore;

/// Key holding the opaque session token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Key holding the serialized user record.
pub const USER_DATA_KEY: &str = "user_data";

/// Stand-in for the absent backend round-trip on login/registration.
const AUTH_LATENCY: Duration = Duration::from_millis(1000);

/// The auth state container.
///
/// ## Thread Safety
/// The current user sits behind a `Mutex` so the container can be shared
/// (`Arc<AuthStore>`) with whatever drives the UI; operations are quick
/// and mostly writes, so a `Mutex` beats a `RwLock` here.
pub struct AuthStore {
    kv: Arc<dyn KeyValueStore>,
    user: Mutex<Option<User>>,
}

impl AuthStore {
    /// Creates a container with no authenticated user.
    ///
    /// Call [`AuthStore::restore`] right after construction to pick up a
    /// persisted session.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        AuthStore {
            kv,
            user: Mutex::new(None),
        }
    }

    /// Attempts to resume a persisted session.
    ///
    /// ## Behavior
    /// - Token and user record both present and parseable: current user set
    /// - Record malformed: both keys cleared, session stays unauthenticated
    /// - Anything missing: session stays unauthenticated
    ///
    /// Never returns an error — corruption is logged and treated as a
    /// logged-out state.
    pub fn restore(&self) {
        let Some(token) = self.kv.get(AUTH_TOKEN_KEY) else {
            debug!("No persisted session");
            return;
        };

        let Some(raw) = self.kv.get(USER_DATA_KEY) else {
            // Token without a user record is corruption; drop it
            warn!("Session token present without user record, clearing");
            self.kv.remove(AUTH_TOKEN_KEY);
            return;
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => {
                debug!(email = %user.email, token = %token, "Session restored");
                *self.user.lock().expect("auth mutex poisoned") = Some(user);
            }
            Err(err) => {
                warn!(%err, "Persisted user record malformed, clearing session");
                self.kv.remove(AUTH_TOKEN_KEY);
                self.kv.remove(USER_DATA_KEY);
            }
        }
    }

    /// Logs in with the given email.
    ///
    /// This is a local simulation: the user record is synthesized from the
    /// email alone (display name = local part, role by "admin" substring)
    /// and the password is never checked. Completes after a simulated
    /// backend delay and only fails on an internal serialization problem.
    pub async fn login(&self, email: &str, _password: &str) -> bool {
        tokio::time::sleep(AUTH_LATENCY).await;

        let name = email.split('@').next().unwrap_or(email).to_string();
        let user = User {
            id: User::id_for_email(email),
            email: email.to_string(),
            name,
            role: Role::from_email(email),
            created_at: Utc::now(),
        };

        self.start_session(user)
    }

    /// Registers a new account.
    ///
    /// Same simulation as [`AuthStore::login`], except the supplied display
    /// name is used verbatim and the role is always the default.
    pub async fn register(&self, name: &str, email: &str, _password: &str) -> bool {
        tokio::time::sleep(AUTH_LATENCY).await;

        let user = User {
            id: User::id_for_email(email),
            email: email.to_string(),
            name: name.to_string(),
            role: Role::default(),
            created_at: Utc::now(),
        };

        self.start_session(user)
    }

    /// Ends the session: both keys removed, current user cleared.
    pub fn logout(&self) {
        info!("Logging out");
        self.kv.remove(AUTH_TOKEN_KEY);
        self.kv.remove(USER_DATA_KEY);
        *self.user.lock().expect("auth mutex poisoned") = None;
    }

    /// Returns a snapshot of the current user, if any.
    pub fn current_user(&self) -> Option<User> {
        self.user.lock().expect("auth mutex poisoned").clone()
    }

    /// Checks whether a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.user.lock().expect("auth mutex poisoned").is_some()
    }

    /// Persists the session and installs the user as current.
    fn start_session(&self, user: User) -> bool {
        let token = format!("session-{}", Uuid::new_v4());

        let raw = match serde_json::to_string(&user) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(%err, "Could not serialize user record");
                return false;
            }
        };

        self.kv.set(AUTH_TOKEN_KEY, &token);
        self.kv.set(USER_DATA_KEY, &raw);

        info!(email = %user.email, role = ?user.role, "Session started");
        *self.user.lock().expect("auth mutex poisoned") = Some(user);
        true
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    fn auth() -> AuthStore {
        AuthStore::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_synthesizes_user_from_email() {
        let auth = auth();

        assert!(auth.login("jane@x.com", "hunter2").await);

        let user = auth.current_user().unwrap();
        assert_eq!(user.email, "jane@x.com");
        assert_eq!(user.name, "jane");
        assert_eq!(user.role, Role::User);
    }

    #[tokio::test(start_paused = true)]
    async fn test_admin_email_gets_admin_role() {
        let auth = auth();

        assert!(auth.login("admin@x.com", "whatever").await);
        assert_eq!(auth.current_user().unwrap().role, Role::Admin);
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_uses_name_verbatim_and_default_role() {
        let auth = auth();

        assert!(auth.register("Jane Doe", "admin-jane@x.com", "pw").await);

        let user = auth.current_user().unwrap();
        assert_eq!(user.name, "Jane Doe");
        // Registration never grants admin, even for "admin" emails
        assert_eq!(user.role, Role::User);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_persists_and_restores() {
        let kv: Arc<MemoryStore> = Arc::new(MemoryStore::new());

        let auth = AuthStore::new(kv.clone());
        assert!(auth.login("jane@x.com", "pw").await);
        assert!(kv.get(AUTH_TOKEN_KEY).is_some());

        // A fresh container over the same store resumes the session
        let resumed = AuthStore::new(kv);
        assert!(!resumed.is_authenticated());
        resumed.restore();
        assert_eq!(resumed.current_user().unwrap().email, "jane@x.com");
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_clears_persisted_session() {
        let kv: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let auth = AuthStore::new(kv.clone());

        assert!(auth.login("jane@x.com", "pw").await);
        auth.logout();

        assert!(!auth.is_authenticated());
        assert_eq!(kv.get(AUTH_TOKEN_KEY), None);
        assert_eq!(kv.get(USER_DATA_KEY), None);
    }

    #[test]
    fn test_restore_with_malformed_record_clears_keys() {
        let kv: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        kv.set(AUTH_TOKEN_KEY, "session-stale");
        kv.set(USER_DATA_KEY, "{not json");

        let auth = AuthStore::new(kv.clone());
        auth.restore();

        assert!(!auth.is_authenticated());
        assert_eq!(kv.get(AUTH_TOKEN_KEY), None);
        assert_eq!(kv.get(USER_DATA_KEY), None);
    }

    #[test]
    fn test_restore_with_token_but_no_record_clears_token() {
        let kv: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        kv.set(AUTH_TOKEN_KEY, "session-orphan");

        let auth = AuthStore::new(kv.clone());
        auth.restore();

        assert!(!auth.is_authenticated());
        assert_eq!(kv.get(AUTH_TOKEN_KEY), None);
    }

    #[test]
    fn test_restore_without_session_is_noop() {
        let auth = auth();
        auth.restore();
        assert!(!auth.is_authenticated());
    }
}
