//! A completed-exchange view consumed by the sync layer.

use crate::headers::HeaderMap;
use serde_json::{Map, Value};

/// Status code for a rejected conditional request.
pub const PRECONDITION_FAILED: u16 = 412;

/// The portion of a finished HTTP exchange the sync layer inspects.
///
/// Transports adapt their own response type into this view: a status code,
/// case-insensitive headers and the raw body. Body interpretation is
/// deliberately lenient, a malformed body degrades rather than erroring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    status: u16,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Response {
    /// Creates a response with the given status and no headers or body.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets a raw body and content type.
    pub fn with_body(mut self, content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.headers.insert("content-type", content_type);
        self.body = body.into();
        self
    }

    /// Sets a JSON body with an `application/json` content type.
    pub fn with_json_body(self, body: &Value) -> Self {
        let bytes = serde_json::to_vec(body).unwrap_or_default();
        self.with_body("application/json", bytes)
    }

    /// Returns the status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns true if this is a 412 Precondition Failed response.
    pub fn is_precondition_failed(&self) -> bool {
        self.status == PRECONDITION_FAILED
    }

    /// Looks up a header value by name, case-insensitively.
    pub fn header(&self, name: impl AsRef<str>) -> Option<&str> {
        self.headers.get(name)
    }

    /// Returns all headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the content type, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type")
    }

    /// Returns true if the content type indicates structured JSON data.
    pub fn is_json(&self) -> bool {
        self.content_type()
            .map(|mime| mime.contains("json"))
            .unwrap_or(false)
    }

    /// Returns the raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns the body as text, if valid UTF-8.
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Reads the body as JSON, leniently.
    ///
    /// Parse failures fall back to the raw text, and an unreadable or
    /// empty body falls back to an empty object. Never an error.
    pub fn body_json_lenient(&self) -> Value {
        if let Ok(value) = serde_json::from_slice(&self.body) {
            return value;
        }
        match self.body_text() {
            Some(text) if !text.is_empty() => Value::String(text.to_string()),
            _ => Value::Object(Map::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let response = Response::new(200).with_header("Last-Modified", "v1");
        assert_eq!(response.header("last-modified"), Some("v1"));
        assert_eq!(response.header("LAST-MODIFIED"), Some("v1"));
        assert_eq!(response.header("etag"), None);
    }

    #[test]
    fn json_sniffing() {
        let response = Response::new(200).with_body("application/json; charset=utf-8", "{}");
        assert!(response.is_json());

        let response = Response::new(200).with_body("text/html", "<p>hi</p>");
        assert!(!response.is_json());

        assert!(!Response::new(204).is_json());
    }

    #[test]
    fn lenient_body_parses_json() {
        let response = Response::new(200).with_json_body(&json!({"a": 1}));
        assert_eq!(response.body_json_lenient(), json!({"a": 1}));
    }

    #[test]
    fn lenient_body_falls_back_to_text() {
        let response = Response::new(200).with_body("application/json", "not json {");
        assert_eq!(
            response.body_json_lenient(),
            Value::String("not json {".to_string())
        );
    }

    #[test]
    fn lenient_body_falls_back_to_empty_object() {
        let response = Response::new(412);
        assert_eq!(response.body_json_lenient(), json!({}));

        let response = Response::new(200).with_body("application/json", vec![0xff, 0xfe]);
        assert_eq!(response.body_json_lenient(), json!({}));
    }

    #[test]
    fn precondition_failed_status() {
        assert!(Response::new(412).is_precondition_failed());
        assert!(!Response::new(409).is_precondition_failed());
    }
}
