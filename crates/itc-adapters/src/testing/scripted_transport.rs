use std::collections::VecDeque;

use itc_core::{HttpRequest, HttpTransport, TransportError};
use url::Url;

use crate::cookies::CookieJar;

struct ScriptedResponse {
    body: Vec<u8>,
    set_cookies: Vec<String>,
}

/// Replays canned responses in order and records every request it sees.
///
/// Cookies go through a real [`CookieJar`], so login flows can be checked
/// for what the session would send and keep.
#[derive(Default)]
pub struct ScriptedTransport {
    script: VecDeque<Result<ScriptedResponse, TransportError>>,
    requests: Vec<HttpRequest>,
    cookie_headers: Vec<Option<String>>,
    cookies: CookieJar,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(self, body: &str) -> Self {
        self.respond_with_cookies(body, &[])
    }

    pub fn respond_with_cookies(mut self, body: &str, set_cookies: &[&str]) -> Self {
        self.script.push_back(Ok(ScriptedResponse {
            body: body.as_bytes().to_vec(),
            set_cookies: set_cookies.iter().map(|header| header.to_string()).collect(),
        }));
        self
    }

    pub fn fail_with(mut self, error: TransportError) -> Self {
        self.script.push_back(Err(error));
        self
    }

    pub fn requests(&self) -> &[HttpRequest] {
        &self.requests
    }

    /// `Cookie` header attached to each recorded request, by position.
    pub fn cookie_headers(&self) -> &[Option<String>] {
        &self.cookie_headers
    }

    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }
}

impl HttpTransport for ScriptedTransport {
    fn request(&mut self, request: HttpRequest) -> Result<Vec<u8>, TransportError> {
        let url = Url::parse(&request.url).ok();
        self.cookie_headers.push(
            url.as_ref()
                .and_then(|url| self.cookies.cookie_header(url)),
        );
        let request_url = request.url.clone();
        self.requests.push(request);

        let response = self.script.pop_front().unwrap_or_else(|| {
            Err(TransportError::Connection {
                url: request_url,
                message: "no scripted response left".to_string(),
            })
        })?;

        if let Some(url) = url {
            self.cookies
                .absorb(&url, response.set_cookies.iter().map(String::as_str));
        }

        Ok(response.body)
    }

    fn clear_cookies(&mut self) {
        self.cookies.clear();
    }
}
