use std::collections::BTreeMap;

use cookie::Cookie as RawCookie;
use cookie_store::{Cookie, CookieStore};
use url::Url;

use super::policy::{check_versioned, declared_version};
use super::CookieError;

/// In-memory cookie store for one session.
///
/// Parsing, expiry and domain/path matching are RFC 6265 as implemented by
/// `cookie_store`. Cookies carrying a `Version` attribute additionally pass
/// the RFC 2965 host-prefix and path-prefix checks, and their normalized
/// version is kept by name.
#[derive(Default)]
pub struct CookieJar {
    store: CookieStore,
    versions: BTreeMap<String, u32>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one `Set-Cookie` header received in response to `request_url`.
    pub fn store(&mut self, request_url: &Url, header: &str) -> Result<(), CookieError> {
        let cookie = RawCookie::parse(header.to_string()).map_err(|error| CookieError::Malformed {
            message: error.to_string(),
        })?;
        let version = declared_version(header, cookie.name())?;

        if version.unwrap_or(0) > 0 {
            check_versioned(&cookie, request_url)?;
        }

        self.store
            .insert_raw(&cookie, request_url)
            .map_err(|error| CookieError::Rejected {
                name: cookie.name().to_string(),
                message: error.to_string(),
            })?;

        match version {
            Some(version) => self.versions.insert(cookie.name().to_string(), version),
            None => self.versions.remove(cookie.name()),
        };

        Ok(())
    }

    /// Stores every acceptable header and returns how many were applied.
    /// Rejected cookies are logged and skipped.
    pub fn absorb<'a, I>(&mut self, request_url: &Url, headers: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut applied = 0;

        for header in headers {
            match self.store(request_url, header) {
                Ok(()) => applied += 1,
                Err(error) => {
                    tracing::warn!(%error, host = request_url.host_str(), "cookie rejected");
                }
            }
        }

        applied
    }

    /// `Cookie` header value for a request to `url`.
    pub fn cookie_header(&self, url: &Url) -> Option<String> {
        let pairs: Vec<String> = self
            .store
            .get_request_values(url)
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();

        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }

    pub fn get(&self, name: &str) -> Option<&Cookie<'static>> {
        self.store.iter_unexpired().find(|cookie| cookie.name() == name)
    }

    /// Normalized `Version` attribute of the named cookie, if it had one.
    pub fn version(&self, name: &str) -> Option<u32> {
        self.versions.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.store.iter_unexpired().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.store = CookieStore::default();
        self.versions.clear();
    }
}
