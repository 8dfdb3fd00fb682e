mod authenticator;
mod login_form;

pub use authenticator::{AuthState, Authenticator, LOGIN_FAILURE_PHRASE};
pub use login_form::{encode_login_form, extract_login_action};
