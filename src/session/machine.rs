//! Authentication state machine.
//!
//! ```text
//! Loading ──initialize──▶ Authenticated | Unauthenticated
//! Unauthenticated ──login/register ok──▶ Authenticated
//! Authenticated ──logout──▶ Unauthenticated
//! ```
//!
//! Remote failures never escape the public operations. A failed login or
//! registration keeps whatever session is persisted: with one, the machine
//! stays `Authenticated`; without one, it ends `Unauthenticated` carrying a
//! message for the user.

use crate::config::{AUTH_TOKEN_KEY, USER_DATA_KEY};
use crate::error::{Result, WordbookError};
use crate::models::{LoginRequest, RegistrationRequest, SessionRecord, User};
use crate::storage::StorageEvent;

use super::store::SessionStore;

const LOGIN_OK: &str = "Login successful! Welcome back.";
const REGISTER_OK: &str = "Registration successful! Welcome to our platform.";
const UNEXPECTED: &str = "An unexpected error occurred";
const LOGIN_TRANSPORT: &str = "Login failed. Please try again.";
const REGISTER_TRANSPORT: &str = "Registration failed. Please try again.";

/// Remote side of authentication.
pub trait AuthBackend {
    fn register(&self, details: &RegistrationRequest) -> Result<User>;
    fn login(&self, credentials: &LoginRequest) -> Result<User>;
    fn logout(&self) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Authenticated(SessionRecord),
    Unauthenticated { error: Option<String> },
}

impl SessionState {
    fn signed_out() -> Self {
        SessionState::Unauthenticated { error: None }
    }

    fn failed(message: impl Into<String>) -> Self {
        SessionState::Unauthenticated {
            error: Some(message.into()),
        }
    }
}

/// Result of a login attempt as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub success: bool,
    pub message: String,
    pub user: Option<User>,
}

impl AuthOutcome {
    fn ok(message: &str, user: User) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            user: Some(user),
        }
    }

    fn failed(message: String) -> Self {
        Self {
            success: false,
            message,
            user: None,
        }
    }
}

// ---------------------------------------------------------------------------
// SessionMachine
// ---------------------------------------------------------------------------

/// Owns the session state of one application instance.
pub struct SessionMachine<B> {
    backend: B,
    store: SessionStore,
    state: SessionState,
}

impl<B: AuthBackend> SessionMachine<B> {
    /// A machine in `Loading`, before the store has been read.
    pub fn new(backend: B, store: SessionStore) -> Self {
        Self {
            backend,
            store,
            state: SessionState::Loading,
        }
    }

    /// Construct and immediately [`initialize`](Self::initialize).
    pub fn start(backend: B, store: SessionStore) -> Self {
        let mut machine = Self::new(backend, store);
        machine.initialize();
        machine
    }

    // -- Accessors ---------------------------------------------------------

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&SessionRecord> {
        match &self.state {
            SessionState::Authenticated(record) => Some(record),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SessionState::Unauthenticated { error } => error.as_deref(),
            _ => None,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // -- Transitions -------------------------------------------------------

    /// Re-derive the state from durable storage.
    ///
    /// A token without a readable user projection counts as signed out.
    pub fn initialize(&mut self) {
        self.state = match self.store.load_record() {
            Some(record) => SessionState::Authenticated(record),
            None => SessionState::signed_out(),
        };
        tracing::debug!(authenticated = self.is_authenticated(), "session initialized");
    }

    /// Alias of [`initialize`](Self::initialize) for forcing a resync.
    pub fn refresh(&mut self) {
        self.initialize();
    }

    /// React to a storage change made elsewhere (another window or process).
    ///
    /// Only session keys, or a full wipe, trigger a re-read. Returns whether
    /// the state was re-derived.
    pub fn handle_storage_event(&mut self, event: &StorageEvent) -> bool {
        let relevant = match event.key.as_deref() {
            None => true,
            Some(key) => key == AUTH_TOKEN_KEY || key == USER_DATA_KEY,
        };
        if relevant {
            self.initialize();
        }
        relevant
    }

    pub fn login(&mut self, credentials: &LoginRequest) -> AuthOutcome {
        self.state = SessionState::Loading;
        let result = self.backend.login(credentials);
        match self.establish(result, LOGIN_TRANSPORT) {
            Ok(user) => AuthOutcome::ok(LOGIN_OK, user),
            Err(message) => AuthOutcome::failed(message),
        }
    }

    /// Register and, on success, sign the new user in.
    pub fn register(&mut self, details: &RegistrationRequest) -> bool {
        self.state = SessionState::Loading;
        let result = self.backend.register(details);
        match self.establish(result, REGISTER_TRANSPORT) {
            Ok(user) => {
                tracing::debug!(username = %user.username, "{}", REGISTER_OK);
                true
            }
            Err(_) => false,
        }
    }

    /// Sign out. Always ends `Unauthenticated`, whatever the remote says.
    pub fn logout(&mut self) {
        self.state = SessionState::Loading;
        if let Err(e) = self.backend.logout() {
            tracing::warn!(error = %e, "remote logout failed");
        }
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to clear session storage");
        }
        self.state = SessionState::signed_out();
    }

    /// Drop the error message, keeping the current variant.
    pub fn clear_error(&mut self) {
        if let SessionState::Unauthenticated { error } = &mut self.state {
            *error = None;
        }
    }

    /// Persist a successful remote result and enter `Authenticated`, or
    /// record the failure message.
    fn establish(
        &mut self,
        result: Result<User>,
        transport_message: &str,
    ) -> std::result::Result<User, String> {
        let user = match result {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "authentication failed");
                return Err(self.fail(failure_message(&e, transport_message)));
            }
        };

        if let Err(e) = self.store.save(&user) {
            tracing::warn!(error = %e, "failed to persist session");
            return Err(self.fail(UNEXPECTED.to_string()));
        }

        self.state = SessionState::Authenticated(user.clone().into());
        Ok(user)
    }

    /// Settle after a failed attempt: the persisted session, if any, still
    /// holds. The message is returned to the caller either way.
    fn fail(&mut self, message: String) -> String {
        self.state = match self.store.load_record() {
            Some(record) => SessionState::Authenticated(record),
            None => SessionState::failed(message.clone()),
        };
        message
    }
}

fn failure_message(error: &WordbookError, transport_message: &str) -> String {
    match error {
        WordbookError::Api {
            error: Some(reason),
            ..
        } if !reason.trim().is_empty() => reason.clone(),
        WordbookError::Http(_) | WordbookError::Io(_) => transport_message.to_string(),
        _ => UNEXPECTED.to_string(),
    }
}
