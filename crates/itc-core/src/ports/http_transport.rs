use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("connection to {url} failed: {message}")]
    Connection { url: String, message: String },

    #[error("HTTP {status} returned by {url}")]
    Status { url: String, status: u16 },

    #[error("invalid url {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("invalid proxy {proxy}: {message}")]
    InvalidProxy { proxy: String, message: String },

    #[error("too many redirects starting at {url}")]
    TooManyRedirects { url: String },

    #[error("failed to read response body from {url}: {message}")]
    Body { url: String, message: String },
}

/// A single outgoing request. GET when there is no body, POST otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub body: Option<Vec<u8>>,
    pub content_type: Option<String>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: None,
            content_type: None,
        }
    }

    pub fn post(url: impl Into<String>, body: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: Some(body),
            content_type: Some(content_type.into()),
        }
    }

    pub fn method(&self) -> &'static str {
        if self.body.is_some() {
            "POST"
        } else {
            "GET"
        }
    }

    pub fn body_text(&self) -> Option<String> {
        self.body
            .as_ref()
            .map(|body| String::from_utf8_lossy(body).into_owned())
    }
}

/// Cookie-aware HTTP session. Implementations own their cookie store and
/// absorb every `Set-Cookie` directive before handing back the body.
pub trait HttpTransport {
    fn request(&mut self, request: HttpRequest) -> Result<Vec<u8>, TransportError>;

    /// Drops every stored cookie.
    fn clear_cookies(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_without_body_is_get() {
        let request = HttpRequest::get("https://example.com/");

        assert_eq!(request.method(), "GET");
        assert!(request.content_type.is_none());
    }

    #[test]
    fn request_with_body_is_post() {
        let request = HttpRequest::post(
            "https://example.com/",
            b"{}".to_vec(),
            "application/json",
        );

        assert_eq!(request.method(), "POST");
        assert_eq!(request.content_type.as_deref(), Some("application/json"));
        assert_eq!(request.body_text().as_deref(), Some("{}"));
    }
}
