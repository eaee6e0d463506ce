//! Packing List App
//!
//! Takes over the server-rendered page. Renders nothing itself: it wires the
//! navigation helpers and, where item rows exist, the packing-list controller.

use std::rc::Rc;

use leptos::logging::{log, warn};
use leptos::prelude::*;
use web_sys::Document;

use crate::api::ApiClient;
use crate::config::{UiConfig, CONFIG_ELEMENT_ID};
use crate::controller::PackingController;
use crate::csrf::TokenProvider;
use crate::store::create_store;
use crate::{markup, navigation, render};

#[component]
pub fn App() -> impl IntoView {
    let Some(doc) = web_sys::window().and_then(|win| win.document()) else {
        return;
    };

    let config = load_config(&doc);
    navigation::install(&doc, config.navbar.clone());

    let page = markup::scan(&doc);
    log!(
        "[APP] Found {} item rows in {} categories",
        page.rows.len(),
        page.categories.len()
    );

    let store = create_store(page.rows, page.categories);
    let page_markup = Rc::new(page.markup);
    render::bind(store, Rc::clone(&page_markup));

    let api = ApiClient::new(config.endpoints, TokenProvider::from_config(&config.csrf));
    let controller = PackingController::new(store, api, &config.quantity_failure_alert);
    controller.bind(&page_markup);
}

/// Page overrides, or defaults when absent or invalid
fn load_config(doc: &Document) -> UiConfig {
    let Some(raw) = doc
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return UiConfig::default();
    };

    match UiConfig::from_json(&raw) {
        Ok(config) => config,
        Err(e) => {
            warn!("[APP] Ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
            UiConfig::default()
        }
    }
}
