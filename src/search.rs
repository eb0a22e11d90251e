//! Client-side substring search over items already downloaded.
//!
//! This is the second tier of filtering: the server narrows the collection
//! through the `search`/`name` parameter and paginates it, while this pass
//! narrows what is displayed instantly as the user types. It only ever sees
//! the downloaded window and leaves `has_next_page`/`total_items` alone.

use std::borrow::Cow;

use crate::controller::ListState;
use crate::models::agencies::Agency;
use crate::models::freelancers::Freelancer;
use crate::models::teams::Team;

/// Text an item is matched against.
pub trait Searchable {
    fn search_text(&self) -> Cow<'_, str>;
}

impl Searchable for Freelancer {
    fn search_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.full_name())
    }
}

impl Searchable for Agency {
    fn search_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

impl Searchable for Team {
    fn search_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

/// Case-insensitive substring match; blank needles match everything.
pub fn matches<T: Searchable>(item: &T, needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return true;
    }
    item.search_text()
        .to_lowercase()
        .contains(&needle.to_lowercase())
}

/// Items matching `needle`, in list order.
pub fn filter_items<'a, T: Searchable>(items: &'a [T], needle: &str) -> Vec<&'a T> {
    items.iter().filter(|item| matches(*item, needle)).collect()
}

impl<T: Searchable> ListState<T> {
    /// Read-time projection of `items` through the live search string.
    pub fn visible_items(&self, search: &str) -> Vec<&T> {
        filter_items(&self.items, search)
    }
}
