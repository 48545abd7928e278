//! Typed item events exchanged between pages and view models.
//!
//! # Responsibility
//! - Carry create/update/delete intents with a compile-time checked payload.
//! - Fan each published event out to every live subscriber.
//!
//! # Invariants
//! - Every subscriber receives every event published while it is subscribed,
//!   in publish order. Nothing is dropped for a slow subscriber.
//! - Publishing never blocks and never fails; with no subscribers the event
//!   is dropped.
//! - Subscribers whose receiver was dropped are pruned on the next publish.

use crate::model::item::Item;
use log::debug;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Intent raised by an item page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemEvent {
    /// Raised by the create page on save.
    AddItem(Item),
    /// Raised by the update page on save.
    UpdateItem(Item),
    /// Raised by the delete page on confirm.
    DeleteItem(Item),
}

impl ItemEvent {
    /// Stable event name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddItem(_) => "AddItem",
            Self::UpdateItem(_) => "UpdateItem",
            Self::DeleteItem(_) => "DeleteItem",
        }
    }

    /// Item carried by this event.
    pub fn item(&self) -> &Item {
        match self {
            Self::AddItem(item) | Self::UpdateItem(item) | Self::DeleteItem(item) => item,
        }
    }
}

/// Fan-out bus for [`ItemEvent`]s.
///
/// Each subscriber owns an unbounded queue. Cloning the bus yields another
/// publisher for the same subscriber set; subscribers see the end of the
/// stream once every clone is dropped.
#[derive(Clone)]
pub struct ItemEventBus {
    subscribers: Arc<Mutex<Vec<UnboundedSender<ItemEvent>>>>,
}

impl ItemEventBus {
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Publishes `event` and returns how many subscribers queued it.
    pub fn publish(&self, event: ItemEvent) -> usize {
        let name = event.name();
        let mut subscribers = self.lock_subscribers();
        subscribers.retain(|sender| sender.send(event.clone()).is_ok());
        let delivered = subscribers.len();
        debug!("event=bus_publish module=events name={name} subscribers={delivered}");
        delivered
    }

    pub fn subscribe(&self) -> UnboundedReceiver<ItemEvent> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.lock_subscribers().push(sender);
        receiver
    }

    pub fn subscriber_count(&self) -> usize {
        let mut subscribers = self.lock_subscribers();
        subscribers.retain(|sender| !sender.is_closed());
        subscribers.len()
    }

    // A panic while holding the lock cannot leave the list half-edited.
    fn lock_subscribers(&self) -> MutexGuard<'_, Vec<UnboundedSender<ItemEvent>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ItemEventBus {
    fn default() -> Self {
        Self::new()
    }
}
