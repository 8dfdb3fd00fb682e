use std::sync::OnceLock;

use itc_core::Credentials;
use regex::Regex;

static ACTION_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Finds the submission url of the portal login form.
///
/// Returns `None` when the markup does not contain the expected form, which
/// usually means the portal page changed.
pub fn extract_login_action(html: &str) -> Option<&str> {
    let pattern = ACTION_PATTERN.get_or_init(|| {
        Regex::new(r#"" action="([^"]+)""#).expect("regex to extract the login form action")
    });

    pattern
        .captures(html)
        .and_then(|captures| captures.get(1))
        .map(|action| action.as_str())
}

/// Url-encoded body of the login form submission.
pub fn encode_login_form(credentials: &Credentials) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("theAccountName", credentials.account_name())
        .append_pair("theAccountPW", credentials.password())
        .append_pair("1.Continue", "0")
        .finish()
}
