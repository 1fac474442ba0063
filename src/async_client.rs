//! Async wrapper around [`WordbookSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the blocking HTTP client waits on the network.
//!
//! # Example
//!
//! ```no_run
//! use wordbook_sdk::models::LoginRequest;
//! use wordbook_sdk::AsyncWordbookSdk;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncWordbookSdk::builder().in_memory().build().await.unwrap();
//!
//!     let outcome = sdk
//!         .run(|s| Ok(s.session_mut().login(&LoginRequest::new("ada", "secret"))))
//!         .await
//!         .unwrap();
//!
//!     let words = sdk.run(|s| s.captions().list()).await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{Result, WordbookError};
use crate::models::Country;
use crate::WordbookSdk;

// ---------------------------------------------------------------------------
// AsyncWordbookSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncWordbookSdk`] instance.
#[derive(Default)]
pub struct AsyncWordbookSdkBuilder {
    base_url: Option<String>,
    countries_url: Option<String>,
    data_dir: Option<PathBuf>,
    in_memory: bool,
    timeout: Option<Duration>,
}

impl AsyncWordbookSdkBuilder {
    /// Set the dashboard API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the countries API base URL.
    pub fn countries_url(mut self, url: impl Into<String>) -> Self {
        self.countries_url = Some(url.into());
        self
    }

    /// Set the directory holding the persisted session.
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Keep the session in memory only.
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the async SDK on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncWordbookSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = WordbookSdk::builder();
            if let Some(url) = self.base_url {
                builder = builder.base_url(url);
            }
            if let Some(url) = self.countries_url {
                builder = builder.countries_url(url);
            }
            if let Some(dir) = self.data_dir {
                builder = builder.data_dir(dir);
            }
            if self.in_memory {
                builder = builder.in_memory();
            }
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            let sdk = builder.build()?;
            Ok(AsyncWordbookSdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| WordbookError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncWordbookSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`WordbookSdk`].
///
/// All operations are dispatched to a blocking thread pool. The SDK sits
/// behind a [`Mutex`], so operations on one instance run one at a time and
/// the session keeps a single writer.
#[derive(Clone)]
pub struct AsyncWordbookSdk {
    inner: Arc<Mutex<WordbookSdk>>,
}

impl AsyncWordbookSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncWordbookSdkBuilder {
        AsyncWordbookSdkBuilder::default()
    }

    /// Wrap an already-built SDK.
    pub fn from_sdk(sdk: WordbookSdk) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sdk)),
        }
    }

    /// Run a sync SDK operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut WordbookSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = sdk
                .lock()
                .map_err(|_| WordbookError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| WordbookError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Fetch the full countries dataset asynchronously.
    pub async fn fetch_countries(&self) -> Result<Vec<Country>> {
        self.run(|s| s.countries().fetch_all()).await
    }

    /// Resync the session from storage asynchronously.
    pub async fn sync_storage(&self) -> Result<bool> {
        self.run(|s| s.sync_storage()).await
    }

    /// Sign out asynchronously. Never fails on remote errors.
    pub async fn logout(&self) -> Result<()> {
        self.run(|s| {
            s.session_mut().logout();
            Ok(())
        })
        .await
    }

    /// Close the SDK, releasing the HTTP client on the blocking pool.
    ///
    /// The blocking HTTP client must not be dropped on an async worker, so
    /// prefer this over letting the last handle fall out of scope.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || drop(self.inner))
            .await
            .map_err(|e| WordbookError::InvalidArgument(format!("Task join error: {e}")))
    }
}
