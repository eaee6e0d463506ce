//! DOM Event Helpers
//!
//! Small utilities for wiring listeners onto markup that was rendered by the server.
//! Closures are leaked on purpose: the elements live as long as the page.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, MouseEvent, NodeList};

/// Bind a click handler to an existing element
pub fn bind_click<F>(target: &EventTarget, handler: F)
where
    F: FnMut(MouseEvent) + 'static,
{
    let on_click = Closure::<dyn FnMut(MouseEvent)>::new(handler);
    let _ = target.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
    on_click.forget();
}

/// Bind a handler for `event` on the window (scroll, resize, ...)
pub fn bind_window<F>(event: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    if let Some(win) = web_sys::window() {
        let _ = win.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
    }
    callback.forget();
}

/// Element an event was dispatched on, if any
pub fn event_element(ev: &Event) -> Option<Element> {
    ev.target()?.dyn_into::<Element>().ok()
}

/// True when `el` or one of its ancestors matches `selector`
pub fn within(el: &Element, selector: &str) -> bool {
    matches!(el.closest(selector), Ok(Some(_)))
}

/// Flatten a `NodeList` into its element nodes
pub fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// All elements under `root` matching `selector`
pub fn select_all(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector).map(elements).unwrap_or_default()
}

/// First element under `root` matching `selector`
pub fn select_one(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// Parse an id as rendered by a template (surrounding whitespace allowed)
pub fn parse_id(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id(" 7\n"), Some(7));
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("-1"), None);
    }
}
