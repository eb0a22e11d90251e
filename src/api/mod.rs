pub mod http;

use async_trait::async_trait;
use std::fmt;

use crate::error::ApiResult;
use crate::models::{ITEMS_PER_PAGE, Page};

pub use http::HttpListApi;

/// Which entity a list shows. Freelancers and agencies share the profiles
/// endpoint and are told apart by `kind`; teams have their own endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Freelancer,
    Agency,
    Team,
}

impl ListKind {
    pub const ALL: [ListKind; 3] = [ListKind::Freelancer, ListKind::Agency, ListKind::Team];

    /// Value of the `kind` query parameter, or `None` for endpoints without one.
    pub fn kind_param(&self) -> Option<&'static str> {
        match self {
            ListKind::Freelancer => Some("FREELANCER"),
            ListKind::Agency => Some("AGENCY"),
            ListKind::Team => None,
        }
    }

    pub fn is_profile(&self) -> bool {
        self.kind_param().is_some()
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::Freelancer => f.write_str("freelancers"),
            ListKind::Agency => f.write_str("agencies"),
            ListKind::Team => f.write_str("teams"),
        }
    }
}

impl std::str::FromStr for ListKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "freelancer" | "freelancers" => Ok(ListKind::Freelancer),
            "agency" | "agencies" => Ok(ListKind::Agency),
            "team" | "teams" => Ok(ListKind::Team),
            other => Err(format!("unknown list kind: {other}")),
        }
    }
}

/// A single page request, with the filter parameters already mapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub kind: ListKind,
    pub page: u32,
    pub limit: u32,
    pub params: Vec<(String, String)>,
}

impl PageRequest {
    pub fn new(kind: ListKind, page: u32, params: Vec<(String, String)>) -> Self {
        Self {
            kind,
            page: page.max(1),
            limit: ITEMS_PER_PAGE,
            params,
        }
    }

    /// Full parameter list in wire order: `kind`, `page`, `limit`, then filters.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.params.len() + 3);
        if let Some(kind) = self.kind.kind_param() {
            pairs.push(("kind".to_string(), kind.to_string()));
        }
        pairs.push(("page".to_string(), self.page.to_string()));
        pairs.push(("limit".to_string(), self.limit.to_string()));
        pairs.extend(self.params.iter().cloned());
        pairs
    }

    /// URL-encoded query string, also used as the cache key body.
    pub fn query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query_pairs())
            .finish()
    }
}

/// The REST list endpoint, seen from the client.
#[async_trait]
pub trait ListApi<T>: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> ApiResult<Page<T>>;
}
