//! Item domain model.
//!
//! # Responsibility
//! - Define the flat record rendered by item pages and stored in `items`.
//! - Provide constructors that generate stable identifiers.
//!
//! # Invariants
//! - `id` is generated once at creation and never changes afterwards.
//! - A blank `id` stands for a missing item; store calls reject it.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of an item, stored as UUID text.
pub type ItemId = String;

/// Default text shown by the create page before the user edits it.
pub const PLACEHOLDER_TEXT: &str = "Item name";
/// Default description shown by the create page before the user edits it.
pub const PLACEHOLDER_DESCRIPTION: &str = "This is an item description.";

/// Validation errors for item identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemValidationError {
    /// Identifier is empty or whitespace only.
    MissingId,
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingId => write!(f, "item id must not be blank"),
        }
    }
}

impl Error for ItemValidationError {}

/// Tracked item persisted in the local database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identifier, UUID v4 text for items created locally.
    pub id: ItemId,
    /// Display text shown in the item list.
    pub text: String,
    /// Free-form description shown on detail pages.
    pub description: String,
    /// Counter edited with the create page stepper.
    #[serde(default)]
    pub value: i64,
}

impl Item {
    /// Creates an item with a freshly generated identifier.
    pub fn new(text: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), text, description)
    }

    /// Creates an item with a caller-provided identifier.
    ///
    /// Used when the identity already exists, e.g. when a page edits a loaded
    /// item. The identifier is not validated here; store calls do that.
    pub fn with_id(
        id: impl Into<ItemId>,
        text: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            description: description.into(),
            value: 0,
        }
    }

    /// Returns the default item a create page starts from.
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_TEXT, PLACEHOLDER_DESCRIPTION)
    }

    /// Sets the stepper value.
    pub fn with_value(mut self, value: i64) -> Self {
        self.value = value;
        self
    }

    /// Checks that the item can be addressed by the store.
    ///
    /// # Errors
    /// - [`ItemValidationError::MissingId`] when `id` is blank.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if is_blank_id(&self.id) {
            return Err(ItemValidationError::MissingId);
        }
        Ok(())
    }
}

/// Returns whether `id` cannot identify any stored item.
pub fn is_blank_id(id: &str) -> bool {
    id.trim().is_empty()
}
