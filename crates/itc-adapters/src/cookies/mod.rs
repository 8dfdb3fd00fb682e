mod jar;
mod policy;

pub use jar::CookieJar;
pub use policy::normalize_version;

use thiserror::Error;

/// Reasons a single `Set-Cookie` directive is refused. Never fatal to the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CookieError {
    #[error("malformed Set-Cookie header: {message}")]
    Malformed { message: String },

    #[error("cookie {name} has a non-numeric version {version}")]
    InvalidVersion { name: String, version: String },

    #[error("cookie {name} rejected: host {host} has a dotted prefix before domain {domain}")]
    DomainRejected {
        name: String,
        domain: String,
        host: String,
    },

    #[error("cookie {name} rejected: path {path} is not a prefix of {request_path}")]
    PathRejected {
        name: String,
        path: String,
        request_path: String,
    },

    #[error("cookie {name} rejected by the store: {message}")]
    Rejected { name: String, message: String },

    #[error("request url has no host")]
    NoHost,
}
