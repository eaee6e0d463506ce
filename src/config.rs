//! Page Configuration
//!
//! Optional overrides embedded by the server template as
//! `<script type="application/json" id="packing-list-config">`.
//! Every field has a default matching the stock templates.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::ItemKey;

/// Id of the JSON script element holding overrides
pub const CONFIG_ELEMENT_ID: &str = "packing-list-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub endpoints: EndpointConfig,
    pub csrf: CsrfConfig,
    pub navbar: NavbarConfig,
    /// Shown in a blocking alert when a quantity change fails
    pub quantity_failure_alert: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            endpoints: EndpointConfig::default(),
            csrf: CsrfConfig::default(),
            navbar: NavbarConfig::default(),
            quantity_failure_alert: "Failed to update quantity. Please try again.".to_string(),
        }
    }
}

impl UiConfig {
    /// Parse overrides; missing fields keep their defaults
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(raw)?)
    }
}

/// Endpoint path templates with `{trip_id}` / `{item_id}` placeholders
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub toggle: String,
    pub update_quantity: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            toggle: "/trips/packing-list/{trip_id}/toggle/{item_id}/".to_string(),
            update_quantity: "/trips/packing-list/{trip_id}/update-quantity/{item_id}/".to_string(),
        }
    }
}

impl EndpointConfig {
    pub fn toggle_url(&self, key: ItemKey) -> String {
        expand_path(&self.toggle, key)
    }

    pub fn update_quantity_url(&self, key: ItemKey) -> String {
        expand_path(&self.update_quantity, key)
    }
}

fn expand_path(template: &str, key: ItemKey) -> String {
    template
        .replace("{trip_id}", &key.trip_id.to_string())
        .replace("{item_id}", &key.item_id.to_string())
}

/// Where a CSRF token may be found on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenSourceKind {
    Cookie,
    HiddenField,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CsrfConfig {
    pub cookie_name: String,
    pub field_name: String,
    /// Tried in order; the first source yielding a token wins
    pub sources: Vec<TokenSourceKind>,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            cookie_name: "csrftoken".to_string(),
            field_name: "csrfmiddlewaretoken".to_string(),
            sources: vec![TokenSourceKind::Cookie, TokenSourceKind::HiddenField],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    pub selector: String,
    pub threshold_px: f64,
    pub scrolled_background: String,
    pub top_background: String,
    pub scrolled_class: String,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            selector: ".navbar".to_string(),
            threshold_px: 50.0,
            scrolled_background: "var(--navbar-bg)".to_string(),
            top_background: "var(--navbar-bg)".to_string(),
            scrolled_class: "navbar-scrolled".to_string(),
        }
    }
}
