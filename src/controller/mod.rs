pub mod state;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::{ListApi, ListKind, PageRequest};
use crate::models::filters::FilterSet;
use crate::query;

pub use state::ListState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Start over from page 1; the response replaces `items`.
    Replace,
    /// Load the next page; the response is appended to `items`.
    Append,
}

/// What a fetch call ended up doing. Errors are stored in the state, never returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { received: usize },
    /// A guard or precondition refused the call; no request was sent.
    Skipped,
    /// The response arrived for a superseded filter set and was dropped.
    Stale,
    Failed,
}

struct Inner<T> {
    state: ListState<T>,
    /// Last filter set observed; `None` until the list is mounted.
    filters: Option<FilterSet>,
    /// Bumped by every replace fetch. Responses tagged with an older value are dropped.
    generation: u64,
    /// Page 1 of `filters` has been applied. Appends wait for it.
    first_page_landed: bool,
}

struct Ticket {
    generation: u64,
    mode: FetchMode,
    request: PageRequest,
}

/// Fetch lifecycle, pagination cursor and append-vs-replace semantics behind
/// one list view (freelancers, agencies or teams).
///
/// State is published on a `watch` channel after every transition, so a view
/// re-renders from [`subscribe`](Self::subscribe) rather than polling.
pub struct PagedFilteredListController<T> {
    kind: ListKind,
    locale: String,
    api: Arc<dyn ListApi<T>>,
    inner: Mutex<Inner<T>>,
    state_tx: watch::Sender<ListState<T>>,
}

impl<T> PagedFilteredListController<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(kind: ListKind, api: Arc<dyn ListApi<T>>, locale: impl Into<String>) -> Self {
        let (state_tx, _) = watch::channel(ListState::default());
        Self {
            kind,
            locale: locale.into(),
            api,
            inner: Mutex::new(Inner {
                state: ListState::default(),
                filters: None,
                generation: 0,
                first_page_landed: false,
            }),
            state_tx,
        }
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState<T>> {
        self.state_tx.subscribe()
    }

    pub fn state(&self) -> ListState<T> {
        self.lock().state.clone()
    }

    /// Filter set the list currently shows (empty before mount).
    pub fn filters(&self) -> FilterSet {
        self.lock().filters.clone().unwrap_or_default()
    }

    /// React to a new filter set, including the initial mount.
    ///
    /// This is the only path that clears `items`: the state is reset to page 1
    /// and a replace fetch starts in the same step. An unchanged filter set is
    /// a no-op once its first page is loaded or loading.
    pub async fn on_filter_set_changed(&self, filters: FilterSet) -> FetchOutcome {
        let filters = filters.normalized();
        let ticket = {
            let mut inner = self.lock();
            let settled = inner.first_page_landed || inner.state.is_loading;
            if settled && inner.filters.as_ref() == Some(&filters) {
                debug!("{} filters unchanged, keeping current list", self.kind);
                return FetchOutcome::Skipped;
            }
            inner.state = ListState::default();
            self.begin(&mut inner, &filters, 1, FetchMode::Replace)
        };

        match ticket {
            Some(ticket) => self.run(ticket).await,
            None => FetchOutcome::Skipped,
        }
    }

    /// Scroll sentinel became visible: load the next page when allowed.
    ///
    /// No-op unless the list is mounted, has a next page, nothing is in
    /// flight and the last fetch did not fail.
    pub async fn on_sentinel_intersecting(&self) -> FetchOutcome {
        let (filters, next_page) = {
            let inner = self.lock();
            let Some(filters) = inner.filters.clone() else {
                return FetchOutcome::Skipped;
            };
            if !inner.first_page_landed || !inner.state.can_load_more() {
                debug!(
                    "{} load-more ignored (has_next_page={}, busy={}, error={})",
                    self.kind,
                    inner.state.has_next_page,
                    inner.state.is_busy(),
                    inner.state.error.is_some()
                );
                return FetchOutcome::Skipped;
            }
            (filters, inner.state.current_page + 1)
        };

        self.fetch_page(&filters, next_page, FetchMode::Append).await
    }

    /// Explicit retry after an error: page 1 of the current filters, replace mode.
    pub async fn retry(&self) -> FetchOutcome {
        let filters = self.filters();
        self.fetch_page(&filters, 1, FetchMode::Replace).await
    }

    /// Fetch one page and fold it into the state.
    ///
    /// Append requires `!is_loading_more && !is_loading && has_next_page`, a
    /// loaded first page and `page == current_page + 1`; otherwise nothing is
    /// sent. Replace always proceeds and supersedes any request still in flight.
    pub async fn fetch_page(&self, filters: &FilterSet, page: u32, mode: FetchMode) -> FetchOutcome {
        let ticket = {
            let mut inner = self.lock();
            self.begin(&mut inner, filters, page, mode)
        };

        match ticket {
            Some(ticket) => self.run(ticket).await,
            None => FetchOutcome::Skipped,
        }
    }

    fn begin(
        &self,
        inner: &mut Inner<T>,
        filters: &FilterSet,
        page: u32,
        mode: FetchMode,
    ) -> Option<Ticket> {
        match mode {
            FetchMode::Append => {
                let state = &inner.state;
                if state.is_loading || state.is_loading_more || !state.has_next_page {
                    debug!("{} append of page {page} refused, list is busy or exhausted", self.kind);
                    return None;
                }
                if !inner.first_page_landed || page != state.current_page + 1 {
                    debug!(
                        "{} append of page {page} refused, list is at page {} (first page loaded: {})",
                        self.kind, state.current_page, inner.first_page_landed
                    );
                    return None;
                }
                inner.state.is_loading_more = true;
            }
            FetchMode::Replace => {
                inner.generation += 1;
                inner.first_page_landed = false;
                inner.filters = Some(filters.clone().normalized());
                inner.state.is_loading = true;
                inner.state.is_loading_more = false;
            }
        }
        self.publish(inner);

        let params = query::build_params(self.kind, filters, &self.locale);
        Some(Ticket {
            generation: inner.generation,
            mode,
            request: PageRequest::new(self.kind, page, params),
        })
    }

    async fn run(&self, ticket: Ticket) -> FetchOutcome {
        debug!(
            "Fetching {} page {} ({:?}, generation {})",
            self.kind, ticket.request.page, ticket.mode, ticket.generation
        );

        let mut in_flight = InFlight {
            controller: self,
            generation: ticket.generation,
            mode: ticket.mode,
            settled: false,
        };
        let result = self.api.fetch_page(&ticket.request).await;
        in_flight.settled = true;

        let mut inner = self.lock();
        if inner.generation != ticket.generation {
            debug!(
                "Dropping stale {} page {} (generation {} superseded by {})",
                self.kind, ticket.request.page, ticket.generation, inner.generation
            );
            return FetchOutcome::Stale;
        }

        let outcome = match result {
            Ok(page) => {
                let received = page.items.len();
                if ticket.mode == FetchMode::Replace {
                    inner.first_page_landed = true;
                }
                let state = &mut inner.state;
                match ticket.mode {
                    FetchMode::Replace => state.items = page.items,
                    // No de-duplication: a row can repeat if the server's
                    // collection shifts between pages.
                    FetchMode::Append => state.items.extend(page.items),
                }
                state.current_page = page.meta.current_page;
                state.has_next_page = page.meta.has_next_page();
                state.total_items = Some(page.meta.total_items);
                state.error = None;
                debug!(
                    "{} page {}/{} applied, {} items loaded",
                    self.kind,
                    page.meta.current_page,
                    page.meta.total_pages,
                    state.items.len()
                );
                FetchOutcome::Applied { received }
            }
            Err(e) => {
                warn!("Failed to fetch {} page {}: {e}", self.kind, ticket.request.page);
                inner.state.error = Some(e.to_string());
                FetchOutcome::Failed
            }
        };

        clear_flag(&mut inner.state, ticket.mode);
        self.publish(&inner);
        outcome
    }

    fn publish(&self, inner: &Inner<T>) {
        self.state_tx.send_replace(inner.state.clone());
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn clear_flag<T>(state: &mut ListState<T>, mode: FetchMode) {
    match mode {
        FetchMode::Replace => state.is_loading = false,
        FetchMode::Append => state.is_loading_more = false,
    }
}

/// Resets the loading flag if a fetch future is dropped before it settles.
struct InFlight<'a, T>
where
    T: Clone + Send + Sync + 'static,
{
    controller: &'a PagedFilteredListController<T>,
    generation: u64,
    mode: FetchMode,
    settled: bool,
}

impl<T> Drop for InFlight<'_, T>
where
    T: Clone + Send + Sync + 'static,
{
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut inner = self.controller.lock();
        if inner.generation == self.generation {
            debug!("{} fetch cancelled before it settled", self.controller.kind);
            clear_flag(&mut inner.state, self.mode);
            self.controller.publish(&inner);
        }
    }
}
