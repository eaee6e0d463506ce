//! Packing List State Store
//!
//! Uses Leptos reactive_stores; every DOM update is derived from this state.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::error::RequestError;
use crate::models::{CategoryGroup, ItemKey, ItemRow, QuantityUpdate, ToggleResponse};
use crate::view_model::{self, ToggleSettlement};

/// Page state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct PackingState {
    /// Every item row on the page, in document order
    pub rows: Vec<ItemRow>,
    /// Category groups (fixed after the initial scan)
    pub categories: Vec<CategoryGroup>,
}

/// Type alias for the store
pub type PackingStore = Store<PackingState>;

pub fn create_store(rows: Vec<ItemRow>, categories: Vec<CategoryGroup>) -> PackingStore {
    Store::new(PackingState { rows, categories })
}

// ========================
// Store Helper Functions
// ========================

/// Tracked snapshot of the rows
pub fn store_rows(store: &PackingStore) -> Vec<ItemRow> {
    store.rows().get()
}

/// Tracked snapshot of the categories
pub fn store_categories(store: &PackingStore) -> Vec<CategoryGroup> {
    store.categories().get()
}

/// Optimistically flip a row; returns the state before the flip
pub fn store_flip_packed(store: &PackingStore, key: ItemKey) -> Option<bool> {
    view_model::flip_packed(&mut store.rows().write(), key)
}

/// Reconcile a finished toggle request with the row
pub fn store_settle_toggle(
    store: &PackingStore,
    key: ItemKey,
    superseded: bool,
    result: Result<ToggleResponse, RequestError>,
) -> ToggleSettlement {
    view_model::settle_toggle(&mut store.rows().write(), key, superseded, result)
}

pub fn store_apply_quantity(store: &PackingStore, key: ItemKey, update: QuantityUpdate) {
    view_model::apply_quantity(&mut store.rows().write(), key, update);
}
