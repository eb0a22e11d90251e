pub mod agencies;
pub mod filters;
pub mod freelancers;
pub mod teams;

use serde::{Deserialize, Serialize};

/// Fixed page size requested from every list endpoint.
pub const ITEMS_PER_PAGE: u32 = 12;

/// Pagination block returned alongside every page. The server is authoritative
/// for these numbers; nothing here re-derives `total_pages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub current_page: u32,
    #[serde(default)]
    pub item_count: Option<u32>,
    pub total_items: u64,
    pub items_per_page: u32,
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// One page of a list endpoint: `{ items: [...], meta: {...} }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PaginationMeta,
}
