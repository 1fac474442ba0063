//! Route access decisions driven by the local session.

use crate::config;
use crate::session::{SessionState, SessionStore};

/// Which session a route expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Only for signed-in users (the dashboard pages).
    Private,
    /// Only for signed-out users (login, registration).
    GuestOnly,
    Public,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(String),
    /// The session is still being resolved; decide later.
    Pending,
}

/// Decides whether a route may render or must redirect.
///
/// The check reads the token straight from storage, so a sign-out in another
/// window is honored even before the state machine has resynced.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    login_route: String,
    home_route: String,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(config::LOGIN_ROUTE, config::HOME_ROUTE)
    }
}

impl RouteGuard {
    pub fn new(login_route: impl Into<String>, home_route: impl Into<String>) -> Self {
        Self {
            login_route: login_route.into(),
            home_route: home_route.into(),
        }
    }

    pub fn check(&self, kind: RouteKind, state: &SessionState, store: &SessionStore) -> Access {
        if matches!(state, SessionState::Loading) {
            return Access::Pending;
        }
        match kind {
            RouteKind::Private if !store.is_present() => {
                Access::Redirect(self.login_route.clone())
            }
            RouteKind::GuestOnly if store.is_present() => {
                Access::Redirect(self.home_route.clone())
            }
            _ => Access::Allow,
        }
    }
}
