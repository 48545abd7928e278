//! Item index view model.
//!
//! # Responsibility
//! - Mirror the stored items into an observable list for the index page.
//! - Apply create/update/delete intents from item pages to list and store.
//!
//! # Invariants
//! - At most one load runs at a time; overlapping requests are skipped.
//! - The busy flag is cleared on every load exit path.
//! - A create or delete the store does not confirm is rolled back in the
//!   in-memory list.
//! - Every update that reached the store is followed by a full reload.

use super::collection::ObservableCollection;
use crate::events::{ItemEvent, ItemEventBus};
use crate::model::item::Item;
use crate::store::{DataStore, StoreResult};
use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

const TITLE: &str = "Items";

/// Result of a [`ItemIndexViewModel::load_items`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Another load was running; nothing changed.
    Skipped,
    /// The list now holds this many items.
    Loaded(usize),
    /// The store failed; the list was left empty and the error logged.
    Failed,
}

/// View model behind the item index page.
pub struct ItemIndexViewModel<S> {
    store: S,
    data_set: ObservableCollection<Item>,
    is_busy: AtomicBool,
}

/// Clears the busy flag when a load finishes, however it finishes.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: DataStore<Item>> ItemIndexViewModel<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            data_set: ObservableCollection::new(),
            is_busy: AtomicBool::new(false),
        }
    }

    pub fn title(&self) -> &'static str {
        TITLE
    }

    /// Items currently shown by the index page.
    pub fn data_set(&self) -> &ObservableCollection<Item> {
        &self.data_set
    }

    pub fn is_busy(&self) -> bool {
        self.is_busy.load(Ordering::Acquire)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replaces the list with the full store contents.
    ///
    /// Store failures are logged and reported as [`LoadOutcome::Failed`];
    /// they are never returned as errors.
    pub async fn load_items(&self) -> LoadOutcome {
        if self
            .is_busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("event=items_load module=view_model status=skipped reason=busy");
            return LoadOutcome::Skipped;
        }
        let _busy = BusyGuard(&self.is_busy);

        self.data_set.clear();
        match self.store.list(true).await {
            Ok(items) => {
                let count = items.len();
                self.data_set.extend(items);
                info!("event=items_load module=view_model status=ok count={count}");
                LoadOutcome::Loaded(count)
            }
            Err(err) => {
                error!("event=items_load module=view_model status=error error={err}");
                LoadOutcome::Failed
            }
        }
    }

    /// Reads one item from the store.
    pub async fn read(&self, id: &str) -> StoreResult<Option<Item>> {
        self.store.read(id).await
    }

    /// Shows `item` immediately, then persists it.
    ///
    /// The optimistic append is undone when the store does not confirm.
    pub async fn create(&self, item: Item) -> StoreResult<bool> {
        self.data_set.push(item.clone());

        let result = self.store.create(&item).await;
        if !matches!(result, Ok(true)) {
            self.data_set.rollback_push(|shown| shown.id == item.id);
            warn!(
                "event=item_create module=view_model status=rolled_back item_id={}",
                item.id
            );
        }
        result
    }

    /// Removes `item` from the list and the store.
    ///
    /// Returns `Ok(false)` without touching the list when the store does not
    /// know the item. A failed store delete puts the item back in place.
    pub async fn delete(&self, item: &Item) -> StoreResult<bool> {
        if self.read(&item.id).await?.is_none() {
            return Ok(false);
        }

        let removed = self.data_set.remove_where(|shown| shown.id == item.id);

        let result = self.store.delete(&item.id).await;
        if !matches!(result, Ok(true)) {
            if let Some((index, shown)) = removed {
                self.data_set.insert(index, shown);
            }
            warn!(
                "event=item_delete module=view_model status=rolled_back item_id={}",
                item.id
            );
        }
        result
    }

    /// Writes `item` to the store, then reloads the whole list.
    ///
    /// Returns `Ok(false)` with no reload when the store does not know the
    /// item.
    pub async fn update(&self, item: &Item) -> StoreResult<bool> {
        if self.read(&item.id).await?.is_none() {
            return Ok(false);
        }

        let result = self.store.update(item).await;
        self.load_items().await;
        result
    }

    /// Routes a page event to its handler.
    pub async fn dispatch(&self, event: ItemEvent) -> StoreResult<bool> {
        debug!(
            "event=item_dispatch module=view_model name={} item_id={}",
            event.name(),
            event.item().id
        );
        match event {
            ItemEvent::AddItem(item) => self.create(item).await,
            ItemEvent::UpdateItem(item) => self.update(&item).await,
            ItemEvent::DeleteItem(item) => self.delete(&item).await,
        }
    }
}

impl<S: DataStore<Item> + 'static> ItemIndexViewModel<S> {
    /// Handles every event published on `bus` until the bus is dropped.
    ///
    /// Must be called from within a tokio runtime. Events are handled one at
    /// a time in publish order and none are skipped; handler errors are
    /// logged.
    pub fn subscribe(self: &Arc<Self>, bus: &ItemEventBus) -> JoinHandle<()> {
        let mut events = bus.subscribe();
        let view_model = Arc::clone(self);

        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let name = event.name();
                if let Err(err) = view_model.dispatch(event).await {
                    error!(
                        "event=item_dispatch module=view_model status=error name={name} error={err}"
                    );
                }
            }
            debug!("event=bus_closed module=view_model");
        })
    }
}
