//! itc-analytics adapters - Infrastructure implementations
//!
//! This crate contains concrete implementations of the ports defined in itc-core:
//! the cookie-backed HTTP session, the portal login flow and the analytics API
//! gateway built on top of them.

pub mod analytics;
pub mod cookies;
pub mod http;
pub mod portal;
pub mod testing;

pub use analytics::ItcAnalyticsGateway;
pub use cookies::{CookieError, CookieJar};
pub use http::UreqSession;
pub use portal::{AuthState, Authenticator};
pub use testing::{
    FailingAnalyticsGateway, FailingTransport, ScriptedTransport, StubAnalyticsGateway,
};
