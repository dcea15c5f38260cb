//! Process-held table of the latest processed news.

use std::sync::{Mutex, MutexGuard};

use newsintel_core::NewsItem;

/// Holds the output of the most recent pipeline run.
///
/// Starts empty. Each [`replace`](Self::replace) swaps the whole table; there
/// are no partial updates. Owned by the caller and handed to the pipeline by
/// reference.
#[derive(Debug, Default)]
pub struct NewsMemory {
    table: Mutex<Vec<NewsItem>>,
}

impl NewsMemory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the stored table.
    pub fn replace(&self, items: Vec<NewsItem>) {
        let count = items.len();
        *self.lock() = items;
        tracing::debug!(items = count, "news memory replaced");
    }

    /// Copy of the current table.
    #[must_use]
    pub fn snapshot(&self) -> Vec<NewsItem> {
        self.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // The table is only ever swapped whole, so a poisoned lock still guards
    // a consistent value.
    fn lock(&self) -> MutexGuard<'_, Vec<NewsItem>> {
        self.table
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
