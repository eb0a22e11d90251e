use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::controller::PagedFilteredListController;

/// Turns a burst of search keystrokes into one filter change.
///
/// Each pushed string restarts the quiet period; when it elapses the latest
/// text is merged into the controller's current filters and handed to
/// `on_filter_set_changed`.
pub struct SearchDebouncer {
    tx: mpsc::UnboundedSender<String>,
    handle: JoinHandle<()>,
}

impl SearchDebouncer {
    pub fn spawn<T>(controller: Arc<PagedFilteredListController<T>>, delay: Duration) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let handle = tokio::spawn(async move {
            let mut pending: Option<String> = None;

            loop {
                match pending.take() {
                    None => match rx.recv().await {
                        Some(text) => pending = Some(text),
                        None => break,
                    },
                    Some(text) => match tokio::time::timeout(delay, rx.recv()).await {
                        Ok(Some(newer)) => pending = Some(newer),
                        Ok(None) => {
                            apply(&controller, &text).await;
                            break;
                        }
                        Err(_) => apply(&controller, &text).await,
                    },
                }
            }
        });

        Self { tx, handle }
    }

    /// Record the latest search text. Returns false once the debouncer has stopped.
    pub fn push(&self, text: impl Into<String>) -> bool {
        self.tx.send(text.into()).is_ok()
    }

    /// Flush any pending text immediately and stop.
    pub async fn close(self) {
        drop(self.tx);
        if let Err(e) = self.handle.await {
            warn!("Search debouncer task ended abnormally: {e}");
        }
    }
}

async fn apply<T>(controller: &PagedFilteredListController<T>, text: &str)
where
    T: Clone + Send + Sync + 'static,
{
    let filters = controller.filters().with_search(text);
    debug!("Applying debounced {} search {:?}", controller.kind(), text);
    controller.on_filter_set_changed(filters).await;
}
