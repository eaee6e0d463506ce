//! Packing List Endpoints
//!
//! Bindings to the server's toggle and update-quantity views.

use gloo_net::http::{Request, RequestBuilder, Response};
use web_sys::{FormData, RequestCredentials};

use crate::config::EndpointConfig;
use crate::csrf::TokenProvider;
use crate::error::{RequestError, DEFAULT_QUANTITY_FAILURE};
use crate::models::{ItemKey, QuantityAction, QuantityResponse, QuantityUpdate, ToggleResponse};

pub struct ApiClient {
    endpoints: EndpointConfig,
    tokens: TokenProvider,
}

impl ApiClient {
    pub fn new(endpoints: EndpointConfig, tokens: TokenProvider) -> Self {
        Self { endpoints, tokens }
    }

    fn post(&self, url: &str) -> Result<RequestBuilder, RequestError> {
        let token = self.tokens.token().ok_or(RequestError::MissingCsrfToken)?;
        Ok(Request::post(url)
            .header("X-CSRFToken", &token)
            .header("X-Requested-With", "XMLHttpRequest")
            .credentials(RequestCredentials::SameOrigin))
    }

    /// Flip the packed flag server-side; the response carries the new state
    pub async fn toggle_packed(&self, key: ItemKey) -> Result<ToggleResponse, RequestError> {
        let url = self.endpoints.toggle_url(key);
        let resp = self.post(&url)?.send().await?;
        check_status(&resp)?;
        Ok(resp.json::<ToggleResponse>().await?)
    }

    pub async fn update_quantity(
        &self,
        key: ItemKey,
        action: QuantityAction,
    ) -> Result<QuantityUpdate, RequestError> {
        let url = self.endpoints.update_quantity_url(key);
        let form = FormData::new().map_err(|e| RequestError::Body(format!("{:?}", e)))?;
        form.append_with_str("action", action.as_str())
            .map_err(|e| RequestError::Body(format!("{:?}", e)))?;

        let resp = self.post(&url)?.body(form)?.send().await?;
        check_status(&resp)?;
        interpret_quantity(resp.json::<QuantityResponse>().await?)
    }
}

fn check_status(resp: &Response) -> Result<(), RequestError> {
    status_to_result(resp.status())
}

/// Anything outside 2xx is a failure
pub fn status_to_result(status: u16) -> Result<(), RequestError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(RequestError::Status(status))
    }
}

/// Turn a quantity response body into an update or an error
pub fn interpret_quantity(resp: QuantityResponse) -> Result<QuantityUpdate, RequestError> {
    if resp.status != "success" {
        let message = resp
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_QUANTITY_FAILURE.to_string());
        return Err(RequestError::Rejected(message));
    }

    match (resp.quantity, resp.can_decrease) {
        (Some(quantity), Some(can_decrease)) => Ok(QuantityUpdate { quantity, can_decrease }),
        _ => Err(RequestError::Malformed(
            "success response without quantity/can_decrease".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> QuantityResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_status_range() {
        assert!(status_to_result(200).is_ok());
        assert!(status_to_result(204).is_ok());
        assert_eq!(status_to_result(403), Err(RequestError::Status(403)));
        assert_eq!(status_to_result(500), Err(RequestError::Status(500)));
        assert_eq!(status_to_result(302), Err(RequestError::Status(302)));
    }

    #[test]
    fn test_quantity_success() {
        let update = interpret_quantity(parse(
            r#"{"status": "success", "quantity": 2, "can_decrease": true}"#,
        ))
        .unwrap();
        assert_eq!(update, QuantityUpdate { quantity: 2, can_decrease: true });
    }

    #[test]
    fn test_quantity_at_minimum_disables_decrease() {
        let update = interpret_quantity(parse(
            r#"{"status": "success", "quantity": 1, "can_decrease": false}"#,
        ))
        .unwrap();
        assert!(!update.can_decrease);
    }

    #[test]
    fn test_quantity_rejected_with_message() {
        let err = interpret_quantity(parse(r#"{"status": "error", "message": "Item not found"}"#))
            .unwrap_err();
        assert_eq!(err, RequestError::Rejected("Item not found".to_string()));
    }

    #[test]
    fn test_quantity_rejected_default_message() {
        let err = interpret_quantity(parse(r#"{"status": "error"}"#)).unwrap_err();
        assert_eq!(err.to_string(), "Failed to update quantity");

        let err = interpret_quantity(parse(r#"{"status": "error", "message": ""}"#)).unwrap_err();
        assert_eq!(err.to_string(), "Failed to update quantity");
    }

    #[test]
    fn test_quantity_success_missing_fields() {
        let err = interpret_quantity(parse(r#"{"status": "success", "quantity": 3}"#)).unwrap_err();
        assert!(matches!(err, RequestError::Malformed(_)));
    }
}
