//! Query modules for the Wordbook SDK.
//!
//! Each module provides a query struct that borrows an
//! [`ApiClient`](crate::client::ApiClient) and exposes typed methods returning
//! `Result<T>`.

pub mod captions;
pub mod countries;

pub use captions::CaptionQuery;
pub use countries::CountryQuery;
