//! Token and user projection kept in durable storage.
//!
//! Presence of a non-blank token is all that counts as "logged in" locally;
//! nothing here checks expiry.

use std::sync::Arc;

use crate::config::{AUTH_TOKEN_KEY, USER_DATA_KEY};
use crate::error::Result;
use crate::models::{SessionRecord, StoredUser, User};
use crate::storage::KeyValueStorage;

#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Persist the token and `{username, _id}`, replacing any previous session.
    ///
    /// On failure the previous session is left in place: a token written
    /// before the projection write failed is rolled back. If the rollback
    /// fails too, both entries are removed.
    pub fn save(&self, user: &User) -> Result<()> {
        let projection = serde_json::to_string(&StoredUser::from(user))?;
        let previous_token = self.storage.get(AUTH_TOKEN_KEY);

        self.storage.set(AUTH_TOKEN_KEY, &user.token)?;
        if let Err(e) = self.storage.set(USER_DATA_KEY, &projection) {
            self.rollback_token(previous_token);
            return Err(e);
        }
        Ok(())
    }

    fn rollback_token(&self, previous: Option<String>) {
        let restored = match previous {
            Some(token) => self.storage.set(AUTH_TOKEN_KEY, &token),
            None => self.storage.remove(AUTH_TOKEN_KEY),
        };
        if let Err(e) = restored {
            tracing::warn!(error = %e, "failed to roll back session token, clearing session");
            if let Err(e) = self.clear() {
                tracing::warn!(error = %e, "failed to clear session storage");
            }
        }
    }

    /// Remove both entries. Removing both is attempted even if the first fails.
    pub fn clear(&self) -> Result<()> {
        let token = self.storage.remove(AUTH_TOKEN_KEY);
        let user = self.storage.remove(USER_DATA_KEY);
        token.and(user)
    }

    pub fn is_present(&self) -> bool {
        self.load_token().is_some()
    }

    /// The stored token, if non-blank.
    pub fn load_token(&self) -> Option<String> {
        self.storage
            .get(AUTH_TOKEN_KEY)
            .filter(|t| !t.trim().is_empty())
    }

    /// The stored user projection. Missing or corrupt data reads as `None`.
    pub fn load_user(&self) -> Option<StoredUser> {
        let raw = self.storage.get(USER_DATA_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "corrupt user data in session storage");
                None
            }
        }
    }

    /// Token and projection together, only when both are usable.
    pub fn load_record(&self) -> Option<SessionRecord> {
        let token = self.load_token()?;
        let user = self.load_user()?;
        Some(SessionRecord {
            token,
            user_id: user.id,
            username: user.username,
        })
    }
}
