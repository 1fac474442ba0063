//! Country dataset fetched from the public countries API.
//!
//! The API is read-only and unpaginated: the whole list is fetched once and
//! all filtering and paging happens client-side in a
//! [`ListViewModel`](crate::listing::ListViewModel).

use crate::client::ApiClient;
use crate::config;
use crate::error::Result;
use crate::listing::CollectionSource;
use crate::models::Country;

/// Query interface for the countries dataset.
pub struct CountryQuery<'a> {
    client: &'a ApiClient,
    base_url: &'a str,
}

impl<'a> CountryQuery<'a> {
    /// Create a new `CountryQuery` against `base_url` (e.g. `https://restcountries.com/v3.1`).
    pub fn new(client: &'a ApiClient, base_url: &'a str) -> Self {
        Self { client, base_url }
    }

    /// Fetch every country.
    ///
    /// The request goes out without the dashboard's bearer token.
    pub fn fetch_all(&self) -> Result<Vec<Country>> {
        let url = format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            config::COUNTRIES_ALL_PATH
        );
        self.client.get_public(&url).inspect_err(|e| {
            tracing::warn!(error = %e, "error fetching countries");
        })
    }
}

impl CollectionSource<Country> for CountryQuery<'_> {
    fn fetch_all(&self) -> Result<Vec<Country>> {
        CountryQuery::fetch_all(self)
    }
}
