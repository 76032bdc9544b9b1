//! Responses read back from the API.

use std::time::Duration;

use serde_json::Value;

/// A response with its body decoded as JSON.
///
/// An empty body decodes to `{}`. A body that is not JSON is kept as a
/// JSON string so error messages can still show it.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Value of the `X-Request-Id` header.
    pub request_id: Option<String>,
    /// Wait requested by a `Retry-After` header given in seconds.
    pub retry_after: Option<Duration>,
    /// Decoded body.
    pub body: Value,
}

impl ApiResponse {
    /// Builds a response from its status, selected headers and raw body.
    #[must_use]
    pub fn new(
        status: u16,
        request_id: Option<String>,
        retry_after: Option<&str>,
        raw_body: &str,
    ) -> Self {
        let body = if raw_body.trim().is_empty() {
            Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_str(raw_body).unwrap_or_else(|_| Value::String(raw_body.to_string()))
        };

        let retry_after = retry_after
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .map(Duration::from_secs_f64);

        Self {
            status,
            request_id,
            retry_after,
            body,
        }
    }

    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Error text for a failed response: the `error`/`errors` fields when
    /// the API sent them, otherwise the whole body.
    #[must_use]
    pub fn error_message(&self) -> String {
        match &self.body {
            Value::Object(body) => match (body.get("error"), body.get("errors")) {
                (Some(Value::String(error)), _) => error.clone(),
                (Some(error), _) | (None, Some(error)) => error.to_string(),
                (None, None) => self.body.to_string(),
            },
            Value::String(raw) => raw.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_body_is_empty_object() {
        let response = ApiResponse::new(204, None, None, "");
        assert_eq!(response.body, json!({}));
        assert!(response.is_success());
    }

    #[test]
    fn test_non_json_body_is_kept_as_string() {
        let response = ApiResponse::new(502, None, None, "<html>Bad gateway</html>");
        assert_eq!(response.body, json!("<html>Bad gateway</html>"));
        assert_eq!(response.error_message(), "<html>Bad gateway</html>");
        assert!(!response.is_success());
    }

    #[test]
    fn test_error_message_prefers_error_field() {
        let response = ApiResponse::new(404, None, None, r#"{"error":"Not found","id":1}"#);
        assert_eq!(response.error_message(), "Not found");

        let response = ApiResponse::new(422, None, None, r#"{"errors":{"name":["blank"]}}"#);
        assert_eq!(response.error_message(), r#"{"name":["blank"]}"#);
    }

    #[test]
    fn test_retry_after_parsing() {
        let response = ApiResponse::new(429, None, Some("2.5"), "{}");
        assert_eq!(response.retry_after, Some(Duration::from_millis(2500)));

        for bad in ["soon", "-1", "NaN"] {
            assert_eq!(ApiResponse::new(429, None, Some(bad), "{}").retry_after, None);
        }
    }
}
