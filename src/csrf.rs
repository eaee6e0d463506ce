//! CSRF Token Provider
//!
//! One lookup for every request: the `csrftoken` cookie or the hidden
//! `csrfmiddlewaretoken` form field, tried in configured order.

use percent_encoding::percent_decode_str;
use wasm_bindgen::JsCast;

use crate::config::{CsrfConfig, TokenSourceKind};

pub trait TokenSource {
    fn token(&self) -> Option<String>;
}

/// Reads the token from `document.cookie`
pub struct CookieSource {
    pub name: String,
}

impl TokenSource for CookieSource {
    fn token(&self) -> Option<String> {
        let doc = web_sys::window()?
            .document()?
            .dyn_into::<web_sys::HtmlDocument>()
            .ok()?;
        let cookies = doc.cookie().ok()?;
        find_cookie(&cookies, &self.name)
    }
}

/// Reads the token from a hidden `<input name=...>`
pub struct HiddenFieldSource {
    pub name: String,
}

impl TokenSource for HiddenFieldSource {
    fn token(&self) -> Option<String> {
        let doc = web_sys::window()?.document()?;
        let input = doc
            .query_selector(&format!("[name=\"{}\"]", self.name))
            .ok()??
            .dyn_into::<web_sys::HtmlInputElement>()
            .ok()?;
        non_empty(input.value())
    }
}

pub struct TokenProvider {
    sources: Vec<Box<dyn TokenSource>>,
}

impl TokenProvider {
    pub fn new(sources: Vec<Box<dyn TokenSource>>) -> Self {
        Self { sources }
    }

    pub fn from_config(config: &CsrfConfig) -> Self {
        let sources = config
            .sources
            .iter()
            .map(|kind| -> Box<dyn TokenSource> {
                match kind {
                    TokenSourceKind::Cookie => Box::new(CookieSource { name: config.cookie_name.clone() }),
                    TokenSourceKind::HiddenField => Box::new(HiddenFieldSource { name: config.field_name.clone() }),
                }
            })
            .collect();
        Self::new(sources)
    }

    /// First token any source yields
    pub fn token(&self) -> Option<String> {
        self.sources.iter().find_map(|source| source.token())
    }
}

/// Look up `name` in a `document.cookie` string, percent-decoding the value
pub fn find_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == name).then_some(value)
        })
        .and_then(|raw| percent_decode_str(raw).decode_utf8().ok())
        .map(|value| value.into_owned())
        .and_then(non_empty)
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<&'static str>);

    impl TokenSource for Fixed {
        fn token(&self) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    #[test]
    fn test_find_cookie() {
        let cookies = "sessionid=abc; csrftoken=XyZ123; theme=dark";
        assert_eq!(find_cookie(cookies, "csrftoken").as_deref(), Some("XyZ123"));
        assert_eq!(find_cookie(cookies, "theme").as_deref(), Some("dark"));
        assert_eq!(find_cookie(cookies, "missing"), None);
    }

    #[test]
    fn test_find_cookie_requires_exact_name() {
        let cookies = "xcsrftoken=wrong; csrftoken2=wrong";
        assert_eq!(find_cookie(cookies, "csrftoken"), None);
    }

    #[test]
    fn test_find_cookie_decodes_value() {
        assert_eq!(find_cookie("csrftoken=a%2Bb%3D", "csrftoken").as_deref(), Some("a+b="));
    }

    #[test]
    fn test_find_cookie_empty_input() {
        assert_eq!(find_cookie("", "csrftoken"), None);
        assert_eq!(find_cookie("csrftoken=", "csrftoken"), None);
    }

    #[test]
    fn test_provider_falls_through_sources() {
        let provider = TokenProvider::new(vec![Box::new(Fixed(None)), Box::new(Fixed(Some("field-token")))]);
        assert_eq!(provider.token().as_deref(), Some("field-token"));
    }

    #[test]
    fn test_provider_prefers_first_source() {
        let provider = TokenProvider::new(vec![Box::new(Fixed(Some("cookie"))), Box::new(Fixed(Some("field")))]);
        assert_eq!(provider.token().as_deref(), Some("cookie"));
    }

    #[test]
    fn test_provider_without_sources() {
        assert_eq!(TokenProvider::new(Vec::new()).token(), None);
    }
}
