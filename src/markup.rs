//! Server Markup
//!
//! Reads the rendered packing list into the view model and keeps handles to
//! the elements the renderer writes to.

use std::collections::HashMap;

use dom_events::{parse_id, select_all, select_one};
use leptos::logging::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement};

use crate::models::{CategoryGroup, ItemKey, ItemRow};

pub const ROW_SELECTOR: &str = ".item-row";
pub const CHECKBOX_SELECTOR: &str = ".toggle-packed";
pub const LABEL_SELECTOR: &str = ".form-check-label";
pub const QUANTITY_DISPLAY_SELECTOR: &str = ".quantity-display";
pub const INCREASE_SELECTOR: &str = ".increase-btn";
pub const DECREASE_SELECTOR: &str = ".decrease-btn";
pub const CATEGORY_SELECTOR: &str = ".accordion-item";
pub const CATEGORY_HEADER_SELECTOR: &str = ".accordion-header";
pub const BADGE_SELECTOR: &str = ".badge";
pub const SUMMARY_BADGE_SELECTOR: &str = ".card-body .badge";
pub const PROGRESS_BAR_SELECTOR: &str = ".progress-bar";

pub const TRIP_ID_ATTR: &str = "data-trip-id";
pub const ITEM_ID_ATTR: &str = "data-item-id";

/// Label classes for a packed item
pub const PACKED_LABEL_CLASSES: [&str; 2] = ["text-decoration-line-through", "text-muted"];

pub struct RowMarkup {
    pub row: Element,
    pub checkbox: HtmlInputElement,
    pub label: Option<Element>,
    pub quantity_display: Option<Element>,
    pub increase_btn: Option<Element>,
    pub decrease_btn: Option<HtmlButtonElement>,
}

pub struct CategoryMarkup {
    pub badge: Option<Element>,
}

pub struct SummaryMarkup {
    pub badge: Element,
    pub bar: HtmlElement,
}

/// Element handles, indexed the same way as the view model
#[derive(Default)]
pub struct PageMarkup {
    pub rows: HashMap<ItemKey, RowMarkup>,
    /// Same order as the scanned categories
    pub categories: Vec<CategoryMarkup>,
    pub summary: Option<SummaryMarkup>,
}

/// Result of reading the page
#[derive(Default)]
pub struct ScannedPage {
    pub markup: PageMarkup,
    pub rows: Vec<ItemRow>,
    pub categories: Vec<CategoryGroup>,
}

pub fn scan(doc: &Document) -> ScannedPage {
    let Some(root) = doc.document_element() else {
        return ScannedPage::default();
    };

    let mut page = ScannedPage::default();

    for row in select_all(&root, ROW_SELECTOR) {
        let Some((key, row_markup, model)) = scan_row(row) else {
            continue;
        };
        if page.markup.rows.contains_key(&key) {
            warn!("[PACKING] Duplicate row for {}, ignoring", key);
            continue;
        }
        page.rows.push(model);
        page.markup.rows.insert(key, row_markup);
    }

    for (index, category) in select_all(&root, CATEGORY_SELECTOR).into_iter().enumerate() {
        let id = select_one(&category, CATEGORY_HEADER_SELECTOR)
            .map(|header| header.id())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| format!("category-{}", index));
        let members = select_all(&category, ROW_SELECTOR)
            .iter()
            .filter_map(item_key)
            .filter(|key| page.markup.rows.contains_key(key))
            .collect();

        page.categories.push(CategoryGroup { id, members });
        page.markup.categories.push(CategoryMarkup {
            badge: select_one(&category, BADGE_SELECTOR),
        });
    }

    page.markup.summary = scan_summary(&root);
    page
}

/// Key for an item row; older templates put the ids on the checkbox only
pub fn item_key(row: &Element) -> Option<ItemKey> {
    let checkbox = select_one(row, CHECKBOX_SELECTOR);
    resolve_item_key(
        |attr| row.get_attribute(attr),
        |attr| checkbox.as_ref().and_then(|el| el.get_attribute(attr)),
    )
}

/// Ids from the row's attributes, falling back to the checkbox's
pub fn resolve_item_key(
    row_attr: impl Fn(&str) -> Option<String>,
    checkbox_attr: impl Fn(&str) -> Option<String>,
) -> Option<ItemKey> {
    key_from(&row_attr).or_else(|| key_from(&checkbox_attr))
}

fn key_from(attr: &impl Fn(&str) -> Option<String>) -> Option<ItemKey> {
    let trip_id = parse_id(&attr(TRIP_ID_ATTR)?)?;
    let item_id = parse_id(&attr(ITEM_ID_ATTR)?)?;
    Some(ItemKey::new(trip_id, item_id))
}

fn scan_row(row: Element) -> Option<(ItemKey, RowMarkup, ItemRow)> {
    let checkbox = select_one(&row, CHECKBOX_SELECTOR)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
    let Some(checkbox) = checkbox else {
        warn!("[PACKING] Item row without a checkbox, skipping");
        return None;
    };

    let Some(key) = item_key(&row) else {
        warn!("[PACKING] Item row without numeric {} / {}, skipping", TRIP_ID_ATTR, ITEM_ID_ATTR);
        return None;
    };

    if let Some(el) = row.dyn_ref::<HtmlElement>() {
        let _ = el.style().set_property("cursor", "pointer");
    }

    let quantity_display = select_one(&row, QUANTITY_DISPLAY_SELECTOR);
    let decrease_btn = select_one(&row, DECREASE_SELECTOR)
        .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());

    let packed = checkbox.checked();
    let mut model = ItemRow::new(key, packed);
    if let Some(quantity) = quantity_display
        .as_ref()
        .and_then(|el| el.text_content())
        .and_then(|text| text.trim().parse::<u32>().ok())
    {
        let can_decrease = decrease_btn.as_ref().is_some_and(|btn| !btn.disabled());
        model = model.with_quantity(quantity, can_decrease);
    }

    let row_markup = RowMarkup {
        label: select_one(&row, LABEL_SELECTOR),
        increase_btn: select_one(&row, INCREASE_SELECTOR),
        quantity_display,
        decrease_btn,
        checkbox,
        row,
    };
    Some((key, row_markup, model))
}

fn scan_summary(root: &Element) -> Option<SummaryMarkup> {
    let badge = select_one(root, SUMMARY_BADGE_SELECTOR)?;
    let bar = select_one(root, PROGRESS_BAR_SELECTOR)?
        .dyn_into::<HtmlElement>()
        .ok()?;
    Some(SummaryMarkup { badge, bar })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn lookup(map: &HashMap<String, String>) -> impl Fn(&str) -> Option<String> + '_ {
        move |attr| map.get(attr).cloned()
    }

    #[test]
    fn test_key_from_row_attributes() {
        let row = attrs(&[(TRIP_ID_ATTR, "7"), (ITEM_ID_ATTR, "42")]);
        let checkbox = attrs(&[(TRIP_ID_ATTR, "8"), (ITEM_ID_ATTR, "99")]);
        assert_eq!(resolve_item_key(lookup(&row), lookup(&checkbox)), Some(ItemKey::new(7, 42)));
    }

    #[test]
    fn test_key_falls_back_to_checkbox() {
        // Category membership and the row model both resolve keys through here
        let row = attrs(&[("class", "item-row")]);
        let checkbox = attrs(&[(TRIP_ID_ATTR, "7"), (ITEM_ID_ATTR, "42")]);
        assert_eq!(resolve_item_key(lookup(&row), lookup(&checkbox)), Some(ItemKey::new(7, 42)));
    }

    #[test]
    fn test_key_falls_back_when_row_ids_are_partial() {
        let row = attrs(&[(TRIP_ID_ATTR, "7"), (ITEM_ID_ATTR, "abc")]);
        let checkbox = attrs(&[(TRIP_ID_ATTR, "7"), (ITEM_ID_ATTR, "42")]);
        assert_eq!(resolve_item_key(lookup(&row), lookup(&checkbox)), Some(ItemKey::new(7, 42)));
    }

    #[test]
    fn test_key_missing_everywhere() {
        let empty = attrs(&[]);
        assert_eq!(resolve_item_key(lookup(&empty), lookup(&empty)), None);
    }
}
