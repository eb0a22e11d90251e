/// Everything a list view renders from.
///
/// `is_loading` covers the page-1 fetch of a fresh filter set and
/// `is_loading_more` a page-N fetch; the controller never sets both.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub is_loading: bool,
    pub is_loading_more: bool,
    pub error: Option<String>,
    pub current_page: u32,
    pub has_next_page: bool,
    /// Server-side total for the current filter set, once a page has landed.
    pub total_items: Option<u64>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            is_loading_more: false,
            error: None,
            current_page: 1,
            has_next_page: true,
            total_items: None,
        }
    }
}

impl<T> ListState<T> {
    pub fn is_busy(&self) -> bool {
        self.is_loading || self.is_loading_more
    }

    /// Whether a scroll signal may start the next page.
    ///
    /// An error blocks it too: after a failure only an explicit retry or a
    /// filter change fetches again.
    pub fn can_load_more(&self) -> bool {
        self.has_next_page && !self.is_busy() && self.error.is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && !self.is_busy() && self.error.is_none()
    }
}
