//! Session state machine.
//!
//! The session is the single shared mutable resource in the application.
//! Every transition replaces the whole state value in one assignment, so
//! under the single-threaded event model no observer can ever see
//! `authenticated` disagree with `user`. The durable subset is
//! re-projected after each replacement; the token is written and cleared
//! on its own schedule.

use anyhow::Result;
use tracing::{debug, warn};

use crate::api::AuthClient;
use crate::models::User;

use super::storage::{PersistedSession, StateStore};

/// In-memory session state.
///
/// Invariant: `authenticated == user.is_some()` after every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: Option<User>,
    pub authenticated: bool,
    pub loading: bool,
}

impl Session {
    /// Shape at process start: nobody logged in, startup verify pending.
    fn initial() -> Self {
        Self {
            user: None,
            authenticated: false,
            loading: true,
        }
    }

    fn unauthenticated(loading: bool) -> Self {
        Self {
            user: None,
            authenticated: false,
            loading,
        }
    }

    /// Project the durable subset. `loading` and the token never persist.
    pub fn persisted(&self) -> PersistedSession {
        PersistedSession {
            user: self.user.clone(),
            authenticated: self.authenticated,
        }
    }
}

/// Owner of the session state. All mutations go through the four
/// operations below; nothing else writes the fields.
pub struct SessionStore {
    state: Session,
    storage: StateStore,
}

impl SessionStore {
    /// Open the store, rehydrating the durable `{user, authenticated}`
    /// subset. `loading` always starts true; the startup verify decides
    /// how it resolves. A persisted record whose `authenticated` flag
    /// disagrees with its `user` is discarded rather than trusted.
    pub fn open(storage: StateStore) -> Self {
        let mut state = Session::initial();

        match storage.load_session() {
            Ok(Some(persisted)) => {
                if persisted.authenticated == persisted.user.is_some() {
                    state = Session {
                        user: persisted.user,
                        authenticated: persisted.authenticated,
                        loading: true,
                    };
                } else {
                    warn!("Persisted session record is inconsistent, discarding");
                }
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Failed to load persisted session"),
        }

        Self { state, storage }
    }

    /// Current session state, read-only.
    pub fn session(&self) -> &Session {
        &self.state
    }

    /// Record a successful login: durable token write, then the
    /// authenticated state. No network I/O happens here.
    pub fn login(&mut self, token: &str, user: User) -> Result<()> {
        self.storage.save_token(token)?;
        self.replace(Session {
            user: Some(user),
            authenticated: true,
            loading: self.state.loading,
        });
        debug!("Session established");
        Ok(())
    }

    /// End the session. The backend call is best-effort: failure is
    /// logged and local teardown runs unconditionally.
    pub async fn logout(&mut self, gateway: &AuthClient) -> Result<()> {
        if let Err(e) = gateway.logout().await {
            warn!(error = %e, "Logout request failed, clearing local session anyway");
        }

        self.storage.clear_token()?;
        self.replace(Session::unauthenticated(self.state.loading));
        debug!("Session cleared");
        Ok(())
    }

    /// Startup check: exchange the stored token for a current identity.
    ///
    /// No stored token is "not logged in", not an error, and makes no
    /// network call. Any gateway failure, rejected token or unreachable
    /// server alike, purges the token and resolves to the unauthenticated
    /// shape. Either way `loading` ends false.
    pub async fn verify(&mut self, gateway: &AuthClient) -> Result<()> {
        let Some(token) = self.storage.load_token()? else {
            debug!("No stored token, skipping verify");
            self.replace(Session::unauthenticated(false));
            return Ok(());
        };

        match gateway.verify(&token).await {
            Ok(user) => {
                debug!(user_id = %user.id, "Verify succeeded");
                self.replace(Session {
                    user: Some(user),
                    authenticated: true,
                    loading: false,
                });
            }
            Err(e) => {
                debug!(error = %e, "Verify failed, treating as logged out");
                self.storage.clear_token()?;
                self.replace(Session::unauthenticated(false));
            }
        }
        Ok(())
    }

    /// Flip the loading flag, leaving the rest of the state as is.
    pub fn set_loading(&mut self, loading: bool) {
        self.replace(Session {
            loading,
            ..self.state.clone()
        });
    }

    /// The single point where the session value changes. The whole state
    /// is replaced in one assignment and the durable subset re-projected.
    fn replace(&mut self, next: Session) {
        self.state = next;
        if let Err(e) = self.storage.save_session(&self.state.persisted()) {
            warn!(error = %e, "Failed to persist session record");
        }
    }
}
