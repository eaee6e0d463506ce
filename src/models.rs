//! Frontend Models
//!
//! Row/category view models and the JSON shapes returned by the packing-list endpoints.

use serde::Deserialize;
use std::fmt;

/// Identifies one packing-list entry (trip + item ids from the row's data attributes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub trip_id: u32,
    pub item_id: u32,
}

impl ItemKey {
    pub fn new(trip_id: u32, item_id: u32) -> Self {
        Self { trip_id, item_id }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trip {} / item {}", self.trip_id, self.item_id)
    }
}

/// One item row as the page shows it
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    pub key: ItemKey,
    /// Checkbox state, including optimistic flips not yet confirmed
    pub packed: bool,
    /// Last state the server confirmed; drives the label styling
    pub confirmed_packed: bool,
    /// None when the row has no quantity controls
    pub quantity: Option<u32>,
    pub can_decrease: bool,
}

impl ItemRow {
    pub fn new(key: ItemKey, packed: bool) -> Self {
        Self {
            key,
            packed,
            confirmed_packed: packed,
            quantity: None,
            can_decrease: false,
        }
    }

    pub fn with_quantity(mut self, quantity: u32, can_decrease: bool) -> Self {
        self.quantity = Some(quantity);
        self.can_decrease = can_decrease;
        self
    }
}

/// A collapsible group of rows under one heading
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    /// Id of the group's header element
    pub id: String,
    pub members: Vec<ItemKey>,
}

/// Quantity button that was pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityAction {
    Increase,
    Decrease,
}

impl QuantityAction {
    /// Value of the `action` form field
    pub fn as_str(&self) -> &'static str {
        match self {
            QuantityAction::Increase => "increase",
            QuantityAction::Decrease => "decrease",
        }
    }
}

/// Body of a successful toggle response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToggleResponse {
    pub is_packed: bool,
}

/// Raw body of a quantity response; only `status` is guaranteed
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuantityResponse {
    pub status: String,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub can_decrease: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Validated outcome of a quantity change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityUpdate {
    pub quantity: u32,
    pub can_decrease: bool,
}
