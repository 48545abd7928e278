//! Observable in-memory list.
//!
//! # Responsibility
//! - Hold the items a list page renders.
//! - Notify observers after every mutation.
//!
//! # Invariants
//! - Observers always see a complete list snapshot, never a partial edit.
//! - Mutations that change nothing do not notify.

use tokio::sync::watch;

/// Ordered list whose changes can be observed through a `watch` channel.
pub struct ObservableCollection<T> {
    items: watch::Sender<Vec<T>>,
}

impl<T: Clone> ObservableCollection<T> {
    pub fn new() -> Self {
        let (items, _) = watch::channel(Vec::new());
        Self { items }
    }

    /// Returns a receiver that is notified after each change.
    pub fn subscribe(&self) -> watch::Receiver<Vec<T>> {
        self.items.subscribe()
    }

    /// Copies the current contents.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn push(&self, item: T) {
        self.items.send_modify(|items| items.push(item));
    }

    /// Inserts at `index`, clamped to the current length.
    pub fn insert(&self, index: usize, item: T) {
        self.items.send_modify(|items| {
            let index = index.min(items.len());
            items.insert(index, item);
        });
    }

    pub fn extend(&self, new_items: impl IntoIterator<Item = T>) {
        let new_items: Vec<T> = new_items.into_iter().collect();
        self.items.send_if_modified(|items| {
            if new_items.is_empty() {
                return false;
            }
            items.extend(new_items);
            true
        });
    }

    pub fn clear(&self) {
        self.items.send_if_modified(|items| {
            if items.is_empty() {
                return false;
            }
            items.clear();
            true
        });
    }

    /// Removes the first element matching `predicate` and returns it with its
    /// former position.
    pub fn remove_where(&self, predicate: impl Fn(&T) -> bool) -> Option<(usize, T)> {
        let mut removed = None;
        self.items.send_if_modified(|items| {
            let Some(index) = items.iter().position(|item| predicate(item)) else {
                return false;
            };
            removed = Some((index, items.remove(index)));
            true
        });
        removed
    }

    /// Undoes a `push` by removing the last element matching `predicate`.
    pub fn rollback_push(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        let mut removed = None;
        self.items.send_if_modified(|items| {
            let Some(index) = items.iter().rposition(|item| predicate(item)) else {
                return false;
            };
            removed = Some(items.remove(index));
            true
        });
        removed
    }
}

impl<T: Clone> Default for ObservableCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}
