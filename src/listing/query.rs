//! Query-string form of the list browsing state.
//!
//! The encoding is canonical: the flag key appears only as `flag=true`, the
//! category key only when a category is selected, the page key only past
//! page one. Parsing is lenient; anything unrecognized falls back to the
//! default for that dimension.

use url::form_urlencoded;
use url::Url;

use super::filter::{normalize_category, FilterState};

/// Names of the query keys for one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryKeys {
    pub flag: &'static str,
    pub category: &'static str,
    pub page: &'static str,
}

impl QueryKeys {
    pub const fn new(flag: &'static str, category: &'static str, page: &'static str) -> Self {
        Self {
            flag,
            category,
            page,
        }
    }
}

/// Filters plus the requested (not yet clamped) page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub filters: FilterState,
    pub page: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filters: FilterState::default(),
            page: 1,
        }
    }
}

impl ListQuery {
    /// Normalizes the category and raises the page to at least 1.
    pub fn new(filters: FilterState, page: usize) -> Self {
        Self {
            filters: filters.normalized(),
            page: page.max(1),
        }
    }

    /// Parse a query string, with or without the leading `?`.
    ///
    /// For repeated keys the first occurrence wins.
    pub fn parse(query: &str, keys: &QueryKeys) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut flag: Option<String> = None;
        let mut category: Option<String> = None;
        let mut page: Option<String> = None;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = if key == keys.flag {
                &mut flag
            } else if key == keys.category {
                &mut category
            } else if key == keys.page {
                &mut page
            } else {
                continue;
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        Self {
            filters: FilterState {
                flag: flag.as_deref() == Some("true"),
                category: normalize_category(category.as_deref()),
            },
            page: page.as_deref().map(parse_page).unwrap_or(1),
        }
    }

    /// Parse the query part of a full URL.
    pub fn from_url(url: &Url, keys: &QueryKeys) -> Self {
        Self::parse(url.query().unwrap_or(""), keys)
    }

    /// Canonical query string without the leading `?`; empty at defaults.
    pub fn to_query_string(&self, keys: &QueryKeys) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if self.filters.flag {
            serializer.append_pair(keys.flag, "true");
        }
        if let Some(category) = &self.filters.category {
            serializer.append_pair(keys.category, category);
        }
        if self.page > 1 {
            serializer.append_pair(keys.page, &self.page.to_string());
        }
        serializer.finish()
    }

    /// `base` with its query replaced by the canonical encoding.
    ///
    /// Unrelated query parameters on `base` are dropped.
    pub fn to_url(&self, base: &Url, keys: &QueryKeys) -> Url {
        let mut url = base.clone();
        let query = self.to_query_string(keys);
        url.set_query(if query.is_empty() { None } else { Some(&query) });
        url
    }
}

fn parse_page(raw: &str) -> usize {
    match raw.trim().parse::<i64>() {
        Ok(n) if n >= 1 => usize::try_from(n).unwrap_or(usize::MAX),
        _ => 1,
    }
}
