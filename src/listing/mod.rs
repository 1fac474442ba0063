//! Client-side list browsing: filtering, pagination and URL-state sync.
//!
//! The pieces compose bottom-up. [`apply_filters`] and [`paginate`] are pure
//! functions over a slice; [`ListQuery`] is the canonical query-string form
//! of the browsing state; [`ListViewModel`] owns a loaded collection plus the
//! state and keeps the three consistent.

pub mod filter;
pub mod pagination;
pub mod query;
pub mod view_model;

pub use filter::{apply_filters, FilterState, FilterUpdate, Filterable};
pub use pagination::{clamp_page, page_window, paginate, total_pages, PageInfo};
pub use query::{ListQuery, QueryKeys};
pub use view_model::{CollectionSource, ListConfig, ListViewModel, LoadTicket};
