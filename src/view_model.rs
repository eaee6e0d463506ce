//! Packing List View Model
//!
//! Row state transitions. The store holds the rows; the DOM only renders them.

use crate::error::RequestError;
use crate::models::{ItemKey, ItemRow, QuantityUpdate, ToggleResponse};

fn row_mut(rows: &mut [ItemRow], key: ItemKey) -> Option<&mut ItemRow> {
    rows.iter_mut().find(|row| row.key == key)
}

pub fn find_row(rows: &[ItemRow], key: ItemKey) -> Option<&ItemRow> {
    rows.iter().find(|row| row.key == key)
}

/// Optimistically flip the checkbox; returns the state before the flip
pub fn flip_packed(rows: &mut [ItemRow], key: ItemKey) -> Option<bool> {
    let row = row_mut(rows, key)?;
    let prior = row.packed;
    row.packed = !prior;
    Some(prior)
}

/// Undo one optimistic flip after a failed request
pub fn revert_flip(rows: &mut [ItemRow], key: ItemKey) {
    if let Some(row) = row_mut(rows, key) {
        row.packed = !row.packed;
    }
}

/// Adopt the server's packed state
pub fn confirm_packed(rows: &mut [ItemRow], key: ItemKey, is_packed: bool) {
    if let Some(row) = row_mut(rows, key) {
        row.packed = is_packed;
        row.confirmed_packed = is_packed;
    }
}

pub fn apply_quantity(rows: &mut [ItemRow], key: ItemKey, update: QuantityUpdate) {
    if let Some(row) = row_mut(rows, key) {
        row.quantity = Some(update.quantity);
        row.can_decrease = update.can_decrease;
    }
}

/// What a finished toggle request did to its row
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleSettlement {
    /// Server state adopted
    Confirmed(bool),
    /// Another toggle for the row is queued; only the label state is adopted
    Superseded(bool),
    /// Request failed; optimistic flip undone
    Reverted(RequestError),
}

/// Apply a toggle response. `superseded` is true when the user toggled the
/// same row again while this request was in flight.
pub fn settle_toggle(
    rows: &mut [ItemRow],
    key: ItemKey,
    superseded: bool,
    result: Result<ToggleResponse, RequestError>,
) -> ToggleSettlement {
    match result {
        Ok(resp) if superseded => {
            if let Some(row) = row_mut(rows, key) {
                row.confirmed_packed = resp.is_packed;
            }
            ToggleSettlement::Superseded(resp.is_packed)
        }
        Ok(resp) => {
            confirm_packed(rows, key, resp.is_packed);
            ToggleSettlement::Confirmed(resp.is_packed)
        }
        Err(err) => {
            revert_flip(rows, key);
            ToggleSettlement::Reverted(err)
        }
    }
}
