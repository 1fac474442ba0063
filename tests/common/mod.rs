//! Shared test fixtures for the Wordbook SDK integration tests.
//!
//! Provides sample countries, a scripted [`AuthBackend`] and helpers for
//! building session stores over in-memory storage.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::json;
use wordbook_sdk::models::{Country, LoginRequest, RegistrationRequest, User};
use wordbook_sdk::session::AuthBackend;
use wordbook_sdk::{KeyValueStorage, MemoryStorage, Result, SessionStore, WordbookError};

// ---------------------------------------------------------------------------
// Countries
// ---------------------------------------------------------------------------

/// Build a country with the given code, independence flag and currency map.
pub fn country(cca3: &str, independent: bool, currencies: serde_json::Value) -> Country {
    serde_json::from_value(json!({
        "name": { "common": format!("Country {}", cca3), "official": format!("Republic of {}", cca3) },
        "cca3": cca3,
        "independent": independent,
        "currencies": currencies,
        "region": "Europe",
    }))
    .unwrap()
}

pub fn euro_country(cca3: &str, independent: bool) -> Country {
    country(cca3, independent, json!({ "EUR": { "name": "Euro", "symbol": "€" } }))
}

pub fn dollar_country(cca3: &str, independent: bool) -> Country {
    country(
        cca3,
        independent,
        json!({ "USD": { "name": "United States dollar", "symbol": "$" } }),
    )
}

/// `n` countries; the ones whose index is in `independent` are independent.
/// Even indices use EUR, odd indices USD.
pub fn numbered_countries(n: usize, independent: &[usize]) -> Vec<Country> {
    (0..n)
        .map(|i| {
            let code = format!("C{:02}", i);
            let indep = independent.contains(&i);
            if i % 2 == 0 {
                euro_country(&code, indep)
            } else {
                dollar_country(&code, indep)
            }
        })
        .collect()
}

pub fn codes(items: &[&Country]) -> Vec<String> {
    items.iter().map(|c| c.cca3.clone()).collect()
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

pub fn memory_store() -> (SessionStore, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    (SessionStore::new(storage.clone()), storage)
}

pub fn sample_user() -> User {
    User {
        username: "ada".to_string(),
        token: "tok-123".to_string(),
        id: "user-1".to_string(),
    }
}

/// In-memory storage whose writes to one key fail while `failing` is set.
pub struct FlakyStorage {
    inner: MemoryStorage,
    key: &'static str,
    pub failing: AtomicBool,
}

impl FlakyStorage {
    pub fn failing_on(key: &'static str) -> Self {
        Self {
            inner: MemoryStorage::new(),
            key,
            failing: AtomicBool::new(false),
        }
    }

    pub fn arm(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

impl KeyValueStorage for FlakyStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if key == self.key && self.failing.load(Ordering::SeqCst) {
            return Err(WordbookError::Io(std::io::Error::other("disk full")));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key)
    }
}

pub fn flaky_store(key: &'static str) -> (SessionStore, Arc<FlakyStorage>) {
    let storage = Arc::new(FlakyStorage::failing_on(key));
    (SessionStore::new(storage.clone()), storage)
}

pub fn other_user() -> User {
    User {
        username: "mallory".to_string(),
        token: "tok-mallory".to_string(),
        id: "user-2".to_string(),
    }
}

/// How the scripted backend answers.
#[derive(Clone)]
pub enum Reply {
    Ok,
    Api { status: u16, error: Option<String> },
    /// Anything that is not an API error: stands in for a transport failure.
    Broken,
}

impl Reply {
    fn into_result<T>(self, ok: T) -> Result<T> {
        match self {
            Reply::Ok => Ok(ok),
            Reply::Api { status, error } => Err(WordbookError::Api {
                status,
                message: None,
                error,
            }),
            Reply::Broken => Err(WordbookError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset",
            ))),
        }
    }
}

/// Auth backend answering from a script and counting calls.
pub struct ScriptedBackend {
    pub login_reply: RefCell<Reply>,
    pub register_reply: RefCell<Reply>,
    pub logout_reply: RefCell<Reply>,
    pub user: User,
    pub logout_calls: Cell<usize>,
    pub last_login: RefCell<Option<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            login_reply: RefCell::new(Reply::Ok),
            register_reply: RefCell::new(Reply::Ok),
            logout_reply: RefCell::new(Reply::Ok),
            user: sample_user(),
            logout_calls: Cell::new(0),
            last_login: RefCell::new(None),
        }
    }

    pub fn failing_login(reply: Reply) -> Self {
        let backend = Self::new();
        *backend.login_reply.borrow_mut() = reply;
        backend
    }
}

impl AuthBackend for ScriptedBackend {
    fn register(&self, details: &RegistrationRequest) -> Result<User> {
        let user = User {
            username: details.username.clone(),
            ..self.user.clone()
        };
        self.register_reply.borrow().clone().into_result(user)
    }

    fn login(&self, credentials: &LoginRequest) -> Result<User> {
        *self.last_login.borrow_mut() = Some(credentials.username.clone());
        self.login_reply.borrow().clone().into_result(self.user.clone())
    }

    fn logout(&self) -> Result<()> {
        self.logout_calls.set(self.logout_calls.get() + 1);
        self.logout_reply.borrow().clone().into_result(())
    }
}
