//! Stateful list browsing: a loaded collection, its filters and page cursor.
//!
//! Two kinds of input drive the state. Navigation ([`ListViewModel::sync_from_url`])
//! takes filters and page verbatim from the URL and only re-clamps the page.
//! User edits ([`ListViewModel::set_filter`], [`ListViewModel::set_page`]) change
//! the in-memory state and return the canonical query string to push back to
//! the URL. Editing a filter always resets the page to 1; paging never touches
//! the filters.

use url::Url;

use super::filter::{apply_filters, FilterState, FilterUpdate, Filterable};
use super::pagination::{clamp_page, total_pages, PageInfo};
use super::query::{ListQuery, QueryKeys};
use crate::config;
use crate::error::{Result, WordbookError};

/// Remote provider of the full, unfiltered collection.
pub trait CollectionSource<T> {
    fn fetch_all(&self) -> Result<Vec<T>>;
}

impl<T, F> CollectionSource<T> for F
where
    F: Fn() -> Result<Vec<T>>,
{
    fn fetch_all(&self) -> Result<Vec<T>> {
        self()
    }
}

// ---------------------------------------------------------------------------
// ListConfig
// ---------------------------------------------------------------------------

/// Fixed parameters of one list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListConfig {
    page_size: usize,
    keys: QueryKeys,
    label: &'static str,
}

impl ListConfig {
    /// `label` names the collection in user-facing messages.
    pub fn new(page_size: usize, keys: QueryKeys, label: &'static str) -> Result<Self> {
        if page_size == 0 {
            return Err(WordbookError::InvalidArgument(
                "page size must be positive".into(),
            ));
        }
        Ok(Self {
            page_size,
            keys,
            label,
        })
    }

    /// The countries page: 15 per page, `independent` / `currency` / `page`.
    pub fn countries() -> Self {
        Self {
            page_size: config::COUNTRIES_PAGE_SIZE,
            keys: QueryKeys::new(
                config::COUNTRIES_FLAG_KEY,
                config::COUNTRIES_CATEGORY_KEY,
                config::PAGE_KEY,
            ),
            label: "countries",
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn keys(&self) -> &QueryKeys {
        &self.keys
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

/// Handle for one collection load. Only the newest ticket can complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

// ---------------------------------------------------------------------------
// ListViewModel
// ---------------------------------------------------------------------------

pub struct ListViewModel<T> {
    config: ListConfig,
    items: Vec<T>,
    filters: FilterState,
    /// Page asked for by the URL or the last edit, before clamping.
    requested_page: usize,
    current_page: usize,
    loaded: bool,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl<T: Filterable> ListViewModel<T> {
    pub fn new(config: ListConfig) -> Self {
        Self {
            config,
            items: Vec::new(),
            filters: FilterState::default(),
            requested_page: 1,
            current_page: 1,
            loaded: false,
            loading: false,
            error: None,
            generation: 0,
        }
    }

    /// A view model whose collection is already in memory.
    pub fn with_items(config: ListConfig, items: Vec<T>) -> Self {
        let mut vm = Self::new(config);
        vm.items = items;
        vm.loaded = true;
        vm
    }

    // -- Accessors ---------------------------------------------------------

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    /// The full, unfiltered collection.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The last load failure, shown until cleared or a load succeeds.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    // -- Loading -----------------------------------------------------------

    /// Start a load. Any ticket handed out earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Finish the load started with `ticket`.
    ///
    /// Returns `false` (and changes nothing) when a newer load has started
    /// since. A failed load keeps the collection already in memory.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<Vec<T>>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                list = self.config.label,
                stale = ticket.generation,
                current = self.generation,
                "discarding stale collection load"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(items) => {
                tracing::debug!(list = self.config.label, count = items.len(), "collection loaded");
                self.items = items;
                self.loaded = true;
                self.error = None;
                self.reclamp();
            }
            Err(e) => {
                tracing::warn!(list = self.config.label, error = %e, "collection load failed");
                self.error = Some(format!("Failed to load {} data", self.config.label));
            }
        }
        true
    }

    /// Fetch the collection unless it is already loaded.
    ///
    /// Returns whether a fetch was made.
    pub fn load_collection<S>(&mut self, source: &S) -> bool
    where
        S: CollectionSource<T> + ?Sized,
    {
        if self.loaded {
            return false;
        }
        self.reload(source);
        true
    }

    /// Fetch the collection even if one is already loaded.
    pub fn reload<S>(&mut self, source: &S)
    where
        S: CollectionSource<T> + ?Sized,
    {
        let ticket = self.begin_load();
        let result = source.fetch_all();
        self.complete_load(ticket, result);
    }

    // -- Derived views -----------------------------------------------------

    /// Items passing the current filters, in collection order.
    pub fn filtered(&self) -> Vec<&T> {
        apply_filters(&self.items, &self.filters)
    }

    pub fn filtered_len(&self) -> usize {
        self.items.iter().filter(|i| self.filters.matches(*i)).count()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered_len(), self.config.page_size)
    }

    /// The items on the current page and where that page sits.
    pub fn page(&self) -> (Vec<&T>, PageInfo) {
        let filtered = self.filtered();
        let info = PageInfo::new(filtered.len(), self.config.page_size, self.current_page);
        let items = filtered
            .into_iter()
            .skip(info.start)
            .take(info.len())
            .collect();
        (items, info)
    }

    // -- URL state ---------------------------------------------------------

    /// The state as a [`ListQuery`], page already clamped.
    pub fn query(&self) -> ListQuery {
        ListQuery::new(self.filters.clone(), self.current_page)
    }

    /// Canonical query string of the current state (no leading `?`).
    pub fn query_string(&self) -> String {
        self.query().to_query_string(&self.config.keys)
    }

    /// `base` carrying the canonical query of the current state.
    pub fn url(&self, base: &Url) -> Url {
        self.query().to_url(base, &self.config.keys)
    }

    /// Adopt the state encoded in a query string after navigation.
    ///
    /// Filters and page come from the URL as-is; the page is clamped against
    /// the filtered length of the collection currently in memory.
    pub fn sync_from_url(&mut self, query: &str) {
        let parsed = ListQuery::parse(query, &self.config.keys);
        self.sync_from_query(parsed);
    }

    /// Adopt an already-parsed state. The category is normalized first.
    pub fn sync_from_query(&mut self, query: ListQuery) {
        self.filters = query.filters.normalized();
        self.requested_page = query.page.max(1);
        self.reclamp();
        tracing::debug!(
            list = self.config.label,
            page = self.current_page,
            requested = self.requested_page,
            "synced from url"
        );
    }

    // -- User edits --------------------------------------------------------

    /// Change one filter dimension and go back to page 1.
    ///
    /// Returns the canonical query string to write to the URL.
    pub fn set_filter(&mut self, update: FilterUpdate) -> String {
        self.filters.apply(update);
        self.requested_page = 1;
        self.current_page = 1;
        self.query_string()
    }

    /// Move to `page`, clamped into `[1, total_pages]`.
    ///
    /// Returns the canonical query string to write to the URL.
    pub fn set_page(&mut self, page: usize) -> String {
        let clamped = clamp_page(page, self.total_pages());
        if clamped != page {
            tracing::debug!(list = self.config.label, page, clamped, "page out of range");
        }
        self.requested_page = clamped;
        self.current_page = clamped;
        self.query_string()
    }

    pub fn next_page(&mut self) -> String {
        self.set_page(self.current_page + 1)
    }

    pub fn previous_page(&mut self) -> String {
        self.set_page(self.current_page.saturating_sub(1))
    }

    fn reclamp(&mut self) {
        self.current_page = clamp_page(self.requested_page, self.total_pages());
    }
}
