use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::api::{ListApi, PageRequest};
use crate::error::ApiResult;
use crate::models::Page;

/// Short-lived page cache in front of any [`ListApi`].
///
/// Only successful pages are stored, so an error is never replayed from cache
/// and a retry always reaches the server.
pub struct CachedListApi<T> {
    inner: Arc<dyn ListApi<T>>,
    cache: Cache<String, Page<T>>,
}

impl<T> CachedListApi<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(inner: Arc<dyn ListApi<T>>, ttl: Duration, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .time_to_live(ttl)
            .max_capacity(max_capacity)
            .build();

        Self { inner, cache }
    }

    /// Drop every cached page, e.g. after the user edits a listing.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    pub async fn cached_pages(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

/// Cache key for a page request.
pub fn page_key(request: &PageRequest) -> String {
    format!("lists:{}:{}", request.kind, request.query_string())
}

#[async_trait]
impl<T> ListApi<T> for CachedListApi<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn fetch_page(&self, request: &PageRequest) -> ApiResult<Page<T>> {
        let key = page_key(request);

        if let Some(cached) = self.cache.get(&key).await {
            debug!("Page cache hit for {key}");
            return Ok(cached);
        }

        let page = self.inner.fetch_page(request).await?;
        self.cache.insert(key, page.clone()).await;
        Ok(page)
    }
}
