//! Route guard: maps session state to a navigation decision.
//!
//! Three states, driven entirely by the session's `{loading,
//! authenticated}` pair. The guard is re-evaluated on every session change
//! for the lifetime of the application; there is no terminal state.

use crate::auth::Session;

/// Guard classification of the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Startup verify still in flight.
    Loading,
    /// Live session.
    Authenticated,
    /// Nobody logged in.
    Unauthenticated,
}

/// What to do with a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// No navigation decision yet; render a placeholder.
    Placeholder,
    /// Render the protected content.
    Render,
    /// Go to the login entry point. `from` is the location that was asked
    /// for, recorded so a later login can return there; it is advisory
    /// only and nothing enforces its use.
    RedirectToLogin { from: String },
}

#[derive(Debug, Default)]
pub struct RouteGuard {
    return_to: Option<String>,
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify the session. Loading wins regardless of `authenticated`.
    pub fn state(session: &Session) -> GuardState {
        if session.loading {
            GuardState::Loading
        } else if session.authenticated {
            GuardState::Authenticated
        } else {
            GuardState::Unauthenticated
        }
    }

    /// Decide what to do with a navigation to `requested`.
    pub fn evaluate(&mut self, session: &Session, requested: &str) -> RouteDecision {
        match Self::state(session) {
            GuardState::Loading => RouteDecision::Placeholder,
            GuardState::Authenticated => RouteDecision::Render,
            GuardState::Unauthenticated => {
                self.return_to = Some(requested.to_string());
                RouteDecision::RedirectToLogin {
                    from: requested.to_string(),
                }
            }
        }
    }

    /// Take the recorded return location, if a redirect stored one.
    pub fn take_return_location(&mut self) -> Option<String> {
        self.return_to.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn session(loading: bool, authenticated: bool) -> Session {
        Session {
            user: authenticated.then(|| User {
                id: "1".to_string(),
                email: None,
                username: None,
            }),
            authenticated,
            loading,
        }
    }

    #[test]
    fn test_loading_wins_regardless_of_authenticated() {
        let mut guard = RouteGuard::new();
        assert_eq!(
            guard.evaluate(&session(true, false), "/"),
            RouteDecision::Placeholder
        );
        assert_eq!(
            guard.evaluate(&session(true, true), "/"),
            RouteDecision::Placeholder
        );
    }

    #[test]
    fn test_authenticated_renders_protected_content() {
        let mut guard = RouteGuard::new();
        assert_eq!(
            guard.evaluate(&session(false, true), "/"),
            RouteDecision::Render
        );
    }

    #[test]
    fn test_unauthenticated_redirects_and_records_location() {
        let mut guard = RouteGuard::new();
        assert_eq!(
            guard.evaluate(&session(false, false), "/reports"),
            RouteDecision::RedirectToLogin {
                from: "/reports".to_string()
            }
        );
        assert_eq!(guard.take_return_location().as_deref(), Some("/reports"));
        // Consumed once.
        assert_eq!(guard.take_return_location(), None);
    }

    #[test]
    fn test_guard_reevaluates_on_session_change() {
        let mut guard = RouteGuard::new();
        assert_eq!(
            guard.evaluate(&session(true, false), "/"),
            RouteDecision::Placeholder
        );
        assert!(matches!(
            guard.evaluate(&session(false, false), "/"),
            RouteDecision::RedirectToLogin { .. }
        ));
        assert_eq!(guard.evaluate(&session(false, true), "/"), RouteDecision::Render);
    }
}
