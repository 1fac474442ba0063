//! Wordbook SDK for Rust.
//!
//! Client-side core of the Wordbook admin dashboard: a persisted session with
//! an authentication state machine, typed access to the vocabulary
//! ("captions") API, and a country list that is filtered, paginated and
//! mirrored into a shareable query string entirely on the client.
//!
//! # Quick start
//!
//! ```no_run
//! use wordbook_sdk::listing::FilterUpdate;
//! use wordbook_sdk::models::LoginRequest;
//! use wordbook_sdk::WordbookSdk;
//!
//! let mut sdk = WordbookSdk::builder().build().unwrap();
//!
//! // Sign in
//! let outcome = sdk.session_mut().login(&LoginRequest::new("ada", "secret"));
//! assert!(outcome.success);
//!
//! // Browse independent countries paying in euros
//! let mut list = sdk.country_list();
//! list.load_collection(&sdk.countries());
//! list.sync_from_url("independent=true");
//! let query = list.set_filter(FilterUpdate::Category("EUR".into()));
//! assert_eq!(query, "independent=true&currency=EUR");
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod client;
pub mod config;
pub mod error;
pub mod listing;
pub mod models;
pub mod navigation;
pub mod queries;
pub mod session;
pub mod storage;

#[cfg(feature = "async")]
pub use async_client::AsyncWordbookSdk;
pub use client::{ApiClient, HttpAuthBackend};
pub use error::{Result, WordbookError};
pub use listing::{ListConfig, ListViewModel};
pub use session::{SessionMachine, SessionState, SessionStore};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageEvent};

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use models::Country;
use navigation::{Access, RouteGuard, RouteKind};

// ---------------------------------------------------------------------------
// WordbookSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`WordbookSdk`] instance.
///
/// Use [`WordbookSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](WordbookSdkBuilder::build) to create the SDK.
pub struct WordbookSdkBuilder {
    base_url: String,
    countries_url: String,
    data_dir: Option<PathBuf>,
    storage: Option<Arc<dyn KeyValueStorage>>,
    in_memory: bool,
    timeout: Duration,
}

impl Default for WordbookSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: config::API_BASE_URL.to_string(),
            countries_url: config::COUNTRIES_BASE_URL.to_string(),
            data_dir: None,
            storage: None,
            in_memory: false,
            timeout: Duration::from_secs(30),
        }
    }
}

impl WordbookSdkBuilder {
    /// Set the dashboard API base URL. Defaults to `http://localhost:3000/api`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the countries API base URL. Defaults to `https://restcountries.com/v3.1`.
    pub fn countries_url(mut self, url: impl Into<String>) -> Self {
        self.countries_url = url.into();
        self
    }

    /// Set the directory holding the persisted session.
    ///
    /// If not set, the platform data directory is used (e.g.
    /// `~/.local/share/wordbook-sdk` on Linux).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Keep the session in memory only.
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Use a caller-provided storage backend. Takes precedence over
    /// [`data_dir`](Self::data_dir) and [`in_memory`](Self::in_memory).
    pub fn storage(mut self, storage: Arc<dyn KeyValueStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the SDK and restore any persisted session.
    ///
    /// Both base URLs must parse as absolute URLs. No network request is made.
    pub fn build(self) -> Result<WordbookSdk> {
        url::Url::parse(&self.base_url)?;
        url::Url::parse(&self.countries_url)?;

        let storage: Arc<dyn KeyValueStorage> = match self.storage {
            Some(storage) => storage,
            None if self.in_memory => Arc::new(MemoryStorage::new()),
            None => Arc::new(FileStorage::open(self.data_dir)?),
        };
        let store = SessionStore::new(storage.clone());
        let client = ApiClient::new(&self.base_url, self.timeout, store.clone())?;
        let session = SessionMachine::start(HttpAuthBackend::new(client.clone()), store);

        Ok(WordbookSdk {
            client,
            session,
            storage,
            countries_url: self.countries_url,
            guard: RouteGuard::default(),
        })
    }
}

// ---------------------------------------------------------------------------
// WordbookSdk
// ---------------------------------------------------------------------------

/// The main entry point for the Wordbook SDK.
///
/// Owns the HTTP client, the storage backend and the session state machine,
/// and exposes the query interfaces as lightweight borrowing wrappers.
///
/// Created via [`WordbookSdk::builder()`].
pub struct WordbookSdk {
    client: ApiClient,
    session: SessionMachine<HttpAuthBackend>,
    storage: Arc<dyn KeyValueStorage>,
    countries_url: String,
    guard: RouteGuard,
}

impl WordbookSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> WordbookSdkBuilder {
        WordbookSdkBuilder::default()
    }

    // -- Session -----------------------------------------------------------

    pub fn session(&self) -> &SessionMachine<HttpAuthBackend> {
        &self.session
    }

    /// Mutable access for login, registration and logout.
    pub fn session_mut(&mut self) -> &mut SessionMachine<HttpAuthBackend> {
        &mut self.session
    }

    /// Pull in storage changes made by other processes and resync the
    /// session if any of them touched it.
    ///
    /// Returns whether the session state was re-derived.
    pub fn sync_storage(&mut self) -> Result<bool> {
        let mut resynced = false;
        for event in self.storage.reload()? {
            resynced |= self.session.handle_storage_event(&event);
        }
        Ok(resynced)
    }

    /// Decide whether a route of `kind` may render right now.
    pub fn access(&self, kind: RouteKind) -> Access {
        self.guard
            .check(kind, self.session.state(), self.session.store())
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the country dataset.
    pub fn countries(&self) -> queries::CountryQuery<'_> {
        queries::CountryQuery::new(&self.client, &self.countries_url)
    }

    /// Access the signed-in user's vocabulary list.
    pub fn captions(&self) -> queries::CaptionQuery<'_> {
        queries::CaptionQuery::new(&self.client)
    }

    /// A fresh, unloaded view model for the countries page.
    pub fn country_list(&self) -> ListViewModel<Country> {
        ListViewModel::new(ListConfig::countries())
    }

    /// Return a reference to the underlying [`ApiClient`] for advanced usage.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Consume the SDK and release all resources.
    pub fn close(self) {
        drop(self);
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for WordbookSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = match self.session.state() {
            SessionState::Loading => "loading".to_string(),
            SessionState::Authenticated(record) => format!("user={}", record.username),
            SessionState::Unauthenticated { .. } => "signed-out".to_string(),
        };
        write!(
            f,
            "WordbookSdk(base_url={}, countries_url={}, session={})",
            self.client.base_url(),
            self.countries_url,
            session
        )
    }
}
