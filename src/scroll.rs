//! Infinite-scroll wiring: decides when the end-of-list sentinel has come
//! into view and asks a [`LoadMoreTarget`] for the next page.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::controller::{FetchOutcome, PagedFilteredListController};

/// Margin added around the viewport before testing the sentinel, in pixels.
pub const DEFAULT_ROOT_MARGIN_PX: f64 = 100.0;

/// Visibility thresholds for the sentinel element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentinelConfig {
    pub root_margin_px: f64,
    /// Fraction of the sentinel that must be inside the extended viewport, 0.0..=1.0.
    pub threshold: f64,
}

impl Default for SentinelConfig {
    fn default() -> Self {
        Self {
            root_margin_px: DEFAULT_ROOT_MARGIN_PX,
            threshold: 0.0,
        }
    }
}

/// Layout snapshot in content coordinates, emitted on scroll and resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportEvent {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub sentinel_top: f64,
    pub sentinel_height: f64,
}

/// Edge-triggered visibility test for the sentinel.
#[derive(Debug, Clone)]
pub struct SentinelObserver {
    config: SentinelConfig,
    was_intersecting: bool,
}

impl SentinelObserver {
    pub fn new(config: SentinelConfig) -> Self {
        Self {
            config,
            was_intersecting: false,
        }
    }

    pub fn is_intersecting(&self, event: &ViewportEvent) -> bool {
        let root_start = event.scroll_top - self.config.root_margin_px;
        let root_end = event.scroll_top + event.viewport_height + self.config.root_margin_px;
        let start = event.sentinel_top;
        let end = event.sentinel_top + event.sentinel_height.max(0.0);

        if event.sentinel_height <= 0.0 {
            return start >= root_start && start <= root_end;
        }

        let overlap = end.min(root_end) - start.max(root_start);
        if overlap <= 0.0 {
            return false;
        }
        overlap / event.sentinel_height >= self.config.threshold
    }

    /// True only when the sentinel goes from hidden to visible.
    pub fn observe(&mut self, event: &ViewportEvent) -> bool {
        let now = self.is_intersecting(event);
        let entered = now && !self.was_intersecting;
        self.was_intersecting = now;
        entered
    }

    /// Forget the last visibility so a still-visible sentinel fires again,
    /// as a freshly attached observer would.
    pub fn rearm(&mut self) {
        self.was_intersecting = false;
    }
}

/// Whatever can load the next page when the sentinel shows up.
#[async_trait]
pub trait LoadMoreTarget: Send + Sync {
    async fn load_more(&self) -> FetchOutcome;
}

#[async_trait]
impl<T> LoadMoreTarget for PagedFilteredListController<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn load_more(&self) -> FetchOutcome {
        self.on_sentinel_intersecting().await
    }
}

/// Feed viewport events through a [`SentinelObserver`] and call `target`
/// on every rising edge. Ends when the event sender is dropped.
///
/// After a page is applied the observer is re-armed, so a short list whose
/// sentinel never leaves the viewport keeps loading on the next event.
pub fn spawn_infinite_scroll(
    target: Arc<dyn LoadMoreTarget>,
    mut events: mpsc::Receiver<ViewportEvent>,
    config: SentinelConfig,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut observer = SentinelObserver::new(config);

        while let Some(event) = events.recv().await {
            if !observer.observe(&event) {
                continue;
            }

            let outcome = target.load_more().await;
            debug!("Sentinel load-more finished: {outcome:?}");
            if matches!(outcome, FetchOutcome::Applied { .. }) {
                observer.rearm();
            }
        }

        debug!("Viewport event stream closed, infinite scroll stopped");
    })
}
