use cookie::Cookie as RawCookie;
use url::Url;

use super::CookieError;

/// The portal sends `Version="1"` where an integer is expected; strip the
/// quotes before parsing.
pub fn normalize_version(raw: &str) -> Option<u32> {
    raw.replace('"', "").trim().parse().ok()
}

/// Reads the `Version` attribute of a raw `Set-Cookie` line. The cookie
/// parser drops it, so it is picked out of the header text here.
pub(super) fn declared_version(header: &str, name: &str) -> Result<Option<u32>, CookieError> {
    let raw = header
        .split(';')
        .skip(1)
        .filter_map(|attribute| attribute.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("version"))
        .map(|(_, value)| value.trim());

    match raw {
        None => Ok(None),
        Some(raw) => normalize_version(raw)
            .map(Some)
            .ok_or_else(|| CookieError::InvalidVersion {
                name: name.to_string(),
                version: raw.to_string(),
            }),
    }
}

/// Extra RFC 2965 checks for versioned cookies: the host part left of an
/// explicit domain must not contain a dot, and an explicit path must prefix
/// the request path. Domain matching itself is left to the store.
pub(super) fn check_versioned(cookie: &RawCookie<'_>, request_url: &Url) -> Result<(), CookieError> {
    let host = request_url
        .host_str()
        .map(|host| host.to_ascii_lowercase())
        .ok_or(CookieError::NoHost)?;

    if let Some(domain) = cookie.domain() {
        let domain = domain.trim_start_matches('.').to_ascii_lowercase();
        let prefix = host
            .strip_suffix(domain.as_str())
            .and_then(|rest| rest.strip_suffix('.'));

        if prefix.is_some_and(|prefix| prefix.contains('.')) {
            return Err(CookieError::DomainRejected {
                name: cookie.name().to_string(),
                domain,
                host,
            });
        }
    }

    if let Some(path) = cookie.path().filter(|path| path.starts_with('/')) {
        let request_path = request_url.path();
        if !request_path.starts_with(path) {
            return Err(CookieError::PathRejected {
                name: cookie.name().to_string(),
                path: path.to_string(),
                request_path: request_path.to_string(),
            });
        }
    }

    Ok(())
}
