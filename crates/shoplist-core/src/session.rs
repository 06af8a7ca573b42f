//! Command dispatch over a persisted list.
//!
//! Front ends turn user actions into [`Command`]s; [`apply`] is the pure
//! reducer and [`Session`] couples it with a [`ListStore`] so every change is
//! written back.

use crate::engine;
use crate::error::StoreError;
use crate::models::{Category, Filter, Item, ItemCounts};
use crate::share;
use crate::store::{ListStore, Storage};
use chrono::{DateTime, Utc};
use url::Url;

/// A user action against the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        name: String,
        quantity: i64,
        category: Category,
    },
    TogglePurchased(i64),
    Delete(i64),
    ClearPurchased,
    ClearAll,
}

/// Compute the list that results from `command`.
pub fn apply(items: &[Item], command: &Command, now: DateTime<Utc>) -> Vec<Item> {
    match command {
        Command::Add {
            name,
            quantity,
            category,
        } => engine::add_item(items, name, *quantity, *category, now),
        Command::TogglePurchased(id) => engine::toggle_purchased(items, *id),
        Command::Delete(id) => engine::delete_item(items, *id),
        Command::ClearPurchased => engine::clear_purchased(items),
        Command::ClearAll => engine::clear_all(items),
    }
}

/// The live list of one front end, backed by a store.
pub struct Session<S> {
    items: Vec<Item>,
    store: ListStore<S>,
    save_error: Option<StoreError>,
}

impl<S: Storage> Session<S> {
    /// Start from whatever `store` holds.
    pub fn open(store: ListStore<S>) -> Self {
        let items = store.load();
        tracing::info!("Opened list {:?} with {} items", store.key(), items.len());
        Self {
            items,
            store,
            save_error: None,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn store(&self) -> &ListStore<S> {
        &self.store
    }

    pub fn counts(&self) -> ItemCounts {
        engine::counts(&self.items)
    }

    pub fn filtered(&self, filter: Filter) -> Vec<&Item> {
        engine::filter(&self.items, filter)
    }

    /// Filtered items bucketed by category.
    pub fn grouped(&self, filter: Filter) -> Vec<(Category, Vec<&Item>)> {
        engine::group_by_category(self.filtered(filter))
    }

    /// Apply `command` now. Returns whether the list changed.
    pub fn dispatch(&mut self, command: Command) -> bool {
        self.dispatch_at(command, Utc::now())
    }

    /// Apply `command` as if issued at `now`.
    pub fn dispatch_at(&mut self, command: Command, now: DateTime<Utc>) -> bool {
        let next = apply(&self.items, &command, now);
        if next == self.items {
            tracing::debug!("{:?} left the list unchanged", command);
            return false;
        }

        tracing::debug!("{:?}: {} -> {} items", command, self.items.len(), next.len());
        self.items = next;
        self.persist();
        true
    }

    /// Replace the whole list.
    pub fn replace(&mut self, items: Vec<Item>) {
        self.items = items;
        self.persist();
    }

    /// Import a list carried by `location`.
    ///
    /// A non-empty shared list replaces the current one. Returns the location
    /// with the token removed, or `None` if nothing was imported.
    pub fn import_shared(&mut self, location: &Url) -> Option<Url> {
        let shared = share::take_shared_list(location)?;
        if !self.items.is_empty() {
            tracing::info!(
                "Replacing {} items with {} shared items",
                self.items.len(),
                shared.items.len()
            );
        }
        self.replace(shared.items);
        Some(shared.stripped)
    }

    /// Link carrying the current list, based on `location`.
    pub fn share_url(&self, location: &Url) -> Url {
        share::share_url(location, &self.items)
    }

    /// The most recent save failure, if any, cleared by reading it.
    pub fn take_save_error(&mut self) -> Option<StoreError> {
        self.save_error.take()
    }

    fn persist(&mut self) {
        match self.store.save(&self.items) {
            Ok(()) => self.save_error = None,
            Err(e) => {
                tracing::warn!("Failed to save list: {}", e);
                self.save_error = Some(e);
            }
        }
    }
}
