use std::io::Read;

use itc_core::{HttpRequest, HttpTransport, TransportError};
use url::Url;

use crate::cookies::CookieJar;

pub const MAX_REDIRECTS: usize = 10;

const USER_AGENT: &str = concat!("itc-analytics/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP session bound to its own cookie jar.
///
/// Redirects are followed here rather than by ureq: cookies set on every hop
/// go through the jar's version checks, and a 307/308 answer to a POST is
/// re-sent with its body, which ureq 2 does not do.
pub struct UreqSession {
    agent: ureq::Agent,
    cookies: CookieJar,
}

impl UreqSession {
    pub fn new(proxy: Option<&str>) -> Result<Self, TransportError> {
        let mut builder = ureq::AgentBuilder::new()
            .redirects(0)
            .user_agent(USER_AGENT);

        if let Some(proxy) = proxy {
            let proxy = ureq::Proxy::new(proxy).map_err(|error| TransportError::InvalidProxy {
                proxy: proxy.to_string(),
                message: error.to_string(),
            })?;
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            agent: builder.build(),
            cookies: CookieJar::new(),
        })
    }

    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    fn send(
        &mut self,
        method: &str,
        url: &Url,
        body: Option<&[u8]>,
        content_type: Option<&str>,
    ) -> Result<ureq::Response, TransportError> {
        let mut request = self.agent.request(method, url.as_str());

        if let Some(cookie_header) = self.cookies.cookie_header(url) {
            request = request.set("Cookie", &cookie_header);
        }
        if let Some(content_type) = content_type {
            request = request.set("Content-Type", content_type);
        }

        let result = match body {
            Some(body) => request.send_bytes(body),
            None => request.call(),
        };

        match result {
            Ok(response) => {
                self.absorb_cookies(url, &response);
                Ok(response)
            }
            Err(ureq::Error::Status(status, response)) => {
                self.absorb_cookies(url, &response);
                Err(TransportError::Status {
                    url: url.to_string(),
                    status,
                })
            }
            Err(ureq::Error::Transport(transport)) => Err(TransportError::Connection {
                url: url.to_string(),
                message: transport.to_string(),
            }),
        }
    }

    fn absorb_cookies(&mut self, url: &Url, response: &ureq::Response) {
        let headers = response.all("set-cookie");
        if headers.is_empty() {
            return;
        }

        let applied = self.cookies.absorb(url, headers);
        tracing::debug!(applied, host = url.host_str(), "stored response cookies");
    }
}

impl HttpTransport for UreqSession {
    fn request(&mut self, request: HttpRequest) -> Result<Vec<u8>, TransportError> {
        let origin = request.url.clone();
        let mut url = Url::parse(&request.url).map_err(|error| TransportError::InvalidUrl {
            url: request.url.clone(),
            message: error.to_string(),
        })?;
        let mut method = request.method();
        let mut body = request.body;
        let mut content_type = request.content_type;

        for _ in 0..=MAX_REDIRECTS {
            let response = self.send(method, &url, body.as_deref(), content_type.as_deref())?;
            let status = response.status();

            tracing::debug!(method, url = %url, status, "http response");

            let location = response.header("location").map(str::to_string);
            let location = match location {
                Some(location) if is_redirect(status) => location,
                _ => return read_body(response, &url),
            };

            url = url.join(&location).map_err(|error| TransportError::InvalidUrl {
                url: location.clone(),
                message: error.to_string(),
            })?;

            if matches!(status, 301..=303) {
                method = "GET";
                body = None;
                content_type = None;
            }
        }

        Err(TransportError::TooManyRedirects { url: origin })
    }

    fn clear_cookies(&mut self) {
        self.cookies.clear();
    }
}

fn is_redirect(status: u16) -> bool {
    matches!(status, 301 | 302 | 303 | 307 | 308)
}

fn read_body(response: ureq::Response, url: &Url) -> Result<Vec<u8>, TransportError> {
    let mut body = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut body)
        .map_err(|error| TransportError::Body {
            url: url.to_string(),
            message: error.to_string(),
        })?;
    Ok(body)
}
