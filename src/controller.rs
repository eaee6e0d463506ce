//! Packing List Controller
//!
//! Click handling for item rows, checkboxes and quantity buttons. Requests for
//! the same item go out one at a time through `RequestLanes`.

use std::cell::RefCell;
use std::rc::Rc;

use dom_events::{bind_click, event_element, within};
use leptos::logging::{error, log};
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{Element, EventTarget, HtmlLabelElement, MouseEvent};

use crate::api::ApiClient;
use crate::error::RequestError;
use crate::lanes::RequestLanes;
use crate::markup::{PageMarkup, RowMarkup};
use crate::models::{ItemKey, QuantityAction, QuantityUpdate, ToggleResponse};
use crate::store::{store_apply_quantity, store_flip_packed, store_settle_toggle, PackingStore};
use crate::view_model::ToggleSettlement;

/// Clicks inside these never toggle the row
pub const ROW_CLICK_EXCLUSIONS: [&str; 5] = [
    ".delete-btn",
    ".increase-btn",
    ".decrease-btn",
    ".quantity-display",
    "form",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Toggle,
    Quantity(QuantityAction),
}

/// `inside(selector)` answers whether the click target sits inside `selector`
pub fn is_row_click_excluded(inside: impl Fn(&str) -> bool) -> bool {
    ROW_CLICK_EXCLUSIONS.iter().copied().any(|selector| inside(selector))
}

#[derive(Clone)]
pub struct PackingController {
    store: PackingStore,
    api: Rc<ApiClient>,
    lanes: Rc<RefCell<RequestLanes<PendingAction>>>,
    failure_alert: Rc<str>,
}

impl PackingController {
    pub fn new(store: PackingStore, api: ApiClient, failure_alert: &str) -> Self {
        Self {
            store,
            api: Rc::new(api),
            lanes: Rc::new(RefCell::new(RequestLanes::new())),
            failure_alert: Rc::from(failure_alert),
        }
    }

    /// Attach click handlers to every scanned row
    pub fn bind(&self, markup: &PageMarkup) {
        for (key, row) in &markup.rows {
            self.bind_row(*key, row);
        }
        log!("[PACKING] Bound {} item rows", markup.rows.len());
    }

    fn bind_row(&self, key: ItemKey, row: &RowMarkup) {
        let this = self.clone();
        bind_click(&row.row, move |ev: MouseEvent| {
            let Some(target) = event_element(&ev) else {
                return;
            };
            if is_row_click_excluded(|selector| within(&target, selector)) {
                return;
            }
            // The browser forwards label clicks to the checkbox, whose own handler toggles
            if forwards_to_control(&target) {
                return;
            }
            this.toggle(key);
        });

        let this = self.clone();
        bind_click(&row.checkbox, move |ev: MouseEvent| {
            ev.stop_propagation();
            this.toggle(key);
        });

        if let Some(button) = &row.increase_btn {
            self.bind_quantity_button(key, button, QuantityAction::Increase);
        }
        if let Some(button) = &row.decrease_btn {
            self.bind_quantity_button(key, button, QuantityAction::Decrease);
        }
    }

    fn bind_quantity_button(&self, key: ItemKey, button: &EventTarget, action: QuantityAction) {
        let this = self.clone();
        bind_click(button, move |ev: MouseEvent| {
            ev.prevent_default();
            ev.stop_propagation();
            this.change_quantity(key, action);
        });
    }

    /// Flip the row immediately, then ask the server
    pub fn toggle(&self, key: ItemKey) {
        if store_flip_packed(&self.store, key).is_none() {
            error!("[PACKING] Toggle for unknown row {}", key);
            return;
        }
        self.submit(key, PendingAction::Toggle);
    }

    pub fn change_quantity(&self, key: ItemKey, action: QuantityAction) {
        self.submit(key, PendingAction::Quantity(action));
    }

    fn submit(&self, key: ItemKey, action: PendingAction) {
        let ready = self.lanes.borrow_mut().submit(key, action);
        if let Some(action) = ready {
            self.dispatch(key, action);
        }
    }

    fn dispatch(&self, key: ItemKey, action: PendingAction) {
        let this = self.clone();
        spawn_local(async move {
            match action {
                PendingAction::Toggle => {
                    let result = this.api.toggle_packed(key).await;
                    this.settle_toggle(key, result);
                }
                PendingAction::Quantity(action) => {
                    let result = this.api.update_quantity(key, action).await;
                    this.settle_quantity(key, result);
                }
            }

            let next = this.lanes.borrow_mut().complete(key);
            if let Some(next) = next {
                this.dispatch(key, next);
            }
        });
    }

    fn settle_toggle(&self, key: ItemKey, result: Result<ToggleResponse, RequestError>) {
        let superseded = self
            .lanes
            .borrow()
            .any_queued(key, |queued| *queued == PendingAction::Toggle);

        match store_settle_toggle(&self.store, key, superseded, result) {
            ToggleSettlement::Confirmed(is_packed) => {
                log!("[PACKING] {} packed={}", key, is_packed);
            }
            ToggleSettlement::Superseded(is_packed) => {
                log!("[PACKING] {} packed={}, toggled again since", key, is_packed);
            }
            ToggleSettlement::Reverted(err) => {
                error!("[PACKING] Toggle failed for {}: {}", key, err);
            }
        }
    }

    fn settle_quantity(&self, key: ItemKey, result: Result<QuantityUpdate, RequestError>) {
        match result {
            Ok(update) => store_apply_quantity(&self.store, key, update),
            Err(err) => {
                error!("[PACKING] Quantity update failed for {}: {}", key, err);
                if let Some(win) = web_sys::window() {
                    let _ = win.alert_with_message(&self.failure_alert);
                }
            }
        }
    }
}

fn forwards_to_control(target: &Element) -> bool {
    let Ok(Some(label)) = target.closest("label") else {
        return false;
    };
    label
        .dyn_into::<HtmlLabelElement>()
        .ok()
        .and_then(|label| label.control())
        .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Simulates `closest()` for a target whose ancestors carry `selectors`
    fn inside(selectors: &'static [&'static str]) -> impl Fn(&str) -> bool {
        move |selector| selectors.iter().any(|s| *s == selector)
    }

    #[test]
    fn test_plain_row_click_toggles() {
        assert!(!is_row_click_excluded(inside(&[".item-row", ".form-check-label"])));
    }

    #[test]
    fn test_delete_and_form_clicks_are_excluded() {
        assert!(is_row_click_excluded(inside(&[".item-row", ".delete-btn"])));
        assert!(is_row_click_excluded(inside(&[".item-row", "form"])));
    }

    #[test]
    fn test_quantity_controls_are_excluded() {
        assert!(is_row_click_excluded(inside(&[".increase-btn"])));
        assert!(is_row_click_excluded(inside(&[".decrease-btn"])));
        assert!(is_row_click_excluded(inside(&[".quantity-display"])));
    }
}
