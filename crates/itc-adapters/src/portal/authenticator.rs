use itc_core::{AnalyticsError, Credentials, EndpointConfig, HttpRequest, HttpTransport};

use super::login_form::{encode_login_form, extract_login_action};

/// Text the portal shows when the account name or password is wrong.
pub const LOGIN_FAILURE_PHRASE: &str = "Your Apple ID or password was entered incorrectly.";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
    Failed,
}

/// Runs the two-step portal login: scrape the form action from the landing
/// page, then post the credentials to it.
///
/// The session is not checked for expiry; callers log in again before every
/// API call.
#[derive(Debug)]
pub struct Authenticator {
    credentials: Credentials,
    endpoints: EndpointConfig,
    state: AuthState,
}

impl Authenticator {
    pub fn new(credentials: Credentials, endpoints: EndpointConfig) -> Self {
        Self {
            credentials,
            endpoints,
            state: AuthState::Unauthenticated,
        }
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    /// Every attempt ends `Authenticated` or `Failed`, whichever step broke.
    pub fn login<T: HttpTransport>(&mut self, transport: &mut T) -> Result<(), AnalyticsError> {
        match self.attempt(transport) {
            Ok(()) => {
                self.state = AuthState::Authenticated;
                tracing::info!("logged in to portal");
                Ok(())
            }
            Err(error) => {
                self.state = AuthState::Failed;
                Err(error)
            }
        }
    }

    fn attempt<T: HttpTransport>(&self, transport: &mut T) -> Result<(), AnalyticsError> {
        let landing_url = self.endpoints.login_page_url().to_string();
        let landing_page = transport.request(HttpRequest::get(landing_url.as_str()))?;
        let landing_page = String::from_utf8_lossy(&landing_page);

        let action = extract_login_action(&landing_page).ok_or_else(|| AnalyticsError::Parse {
            url: landing_url.clone(),
            message: "no form action in login page markup".to_string(),
        })?;
        let submit_url = self
            .endpoints
            .resolve_portal_path(action)
            .map_err(|error| AnalyticsError::Parse {
                url: landing_url.clone(),
                message: format!("form action {} is not a valid path: {}", action, error),
            })?;

        let form = encode_login_form(&self.credentials);
        let response = transport.request(HttpRequest::post(
            submit_url.as_str(),
            form.into_bytes(),
            FORM_CONTENT_TYPE,
        ))?;

        if String::from_utf8_lossy(&response).contains(LOGIN_FAILURE_PHRASE) {
            transport.clear_cookies();
            tracing::warn!("portal rejected credentials");
            return Err(AnalyticsError::Authentication);
        }

        Ok(())
    }
}
