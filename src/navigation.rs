//! Navigation Helpers
//!
//! Smooth scrolling for in-page anchors and the navbar scroll style.

use dom_events::{bind_click, bind_window, select_all};
use leptos::logging::log;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MouseEvent, ScrollBehavior, ScrollIntoViewOptions};

use crate::config::NavbarConfig;

/// Navbar appearance relative to the scroll threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarPhase {
    Top,
    Scrolled,
}

impl NavbarPhase {
    pub fn at(scroll_y: f64, threshold_px: f64) -> Self {
        if scroll_y > threshold_px {
            NavbarPhase::Scrolled
        } else {
            NavbarPhase::Top
        }
    }
}

impl NavbarConfig {
    pub fn background(&self, phase: NavbarPhase) -> &str {
        match phase {
            NavbarPhase::Top => &self.top_background,
            NavbarPhase::Scrolled => &self.scrolled_background,
        }
    }
}

/// Element id an in-page `href` points at; `None` for a bare `#`
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn install(doc: &Document, navbar: NavbarConfig) {
    bind_anchor_scrolling(doc);
    bind_navbar_style(doc, navbar);
}

fn bind_anchor_scrolling(doc: &Document) {
    let Some(root) = doc.document_element() else {
        return;
    };

    let anchors = select_all(&root, "a[href^=\"#\"]");
    log!("[NAV] Smooth scrolling for {} anchors", anchors.len());

    for anchor in anchors {
        let doc = doc.clone();
        let href_source = anchor.clone();
        bind_click(&anchor, move |ev: MouseEvent| {
            let Some(href) = href_source.get_attribute("href") else {
                return;
            };
            let Some(target) = fragment_id(&href).and_then(|id| doc.get_element_by_id(id)) else {
                return;
            };
            ev.prevent_default();
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        });
    }
}

fn bind_navbar_style(doc: &Document, config: NavbarConfig) {
    let Some(navbar) = doc
        .query_selector(&config.selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };

    let threshold = config.threshold_px;
    let apply = move |phase: NavbarPhase| {
        let _ = navbar.style().set_property("background-color", config.background(phase));
        let _ = navbar
            .class_list()
            .toggle_with_force(&config.scrolled_class, phase == NavbarPhase::Scrolled);
    };

    bind_window("scroll", move |_| {
        let scroll_y = web_sys::window()
            .and_then(|win| win.scroll_y().ok())
            .unwrap_or(0.0);
        apply(NavbarPhase::at(scroll_y, threshold));
    });
}
