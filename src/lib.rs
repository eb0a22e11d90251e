pub mod api;
pub mod cache;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod models;
pub mod query;
pub mod scroll;
pub mod search;
pub mod url_state;

pub use api::{HttpListApi, ListApi, ListKind, PageRequest};
pub use config::ClientConfig;
pub use controller::{FetchMode, FetchOutcome, ListState, PagedFilteredListController};
pub use error::ApiError;
pub use models::filters::FilterSet;

#[macro_use]
extern crate rust_i18n;

i18n!("locales", fallback = "en");
