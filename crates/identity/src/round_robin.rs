use std::sync::atomic::{AtomicUsize, Ordering};

/// Cycles through a fixed, non-empty list of items.
///
/// Safe to share between tasks; each call to [`RoundRobin::next`] advances a
/// shared cursor.
#[derive(Debug)]
pub struct RoundRobin<T> {
    items: Vec<T>,
    cursor: AtomicUsize,
}

impl<T> RoundRobin<T> {
    /// Returns `None` when `items` is empty
    pub fn new(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }

        Some(Self {
            items,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Returns the next item, wrapping around after the last one
    pub fn next(&self) -> &T {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.items.len();
        &self.items[index]
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }
}
