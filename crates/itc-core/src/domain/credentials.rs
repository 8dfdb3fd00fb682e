use std::fmt;

/// Portal login. The password never appears in `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    account_name: String,
    password: String,
}

impl Credentials {
    pub fn new(account_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            account_name: account_name.into(),
            password: password.into(),
        }
    }

    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("account_name", &self.account_name)
            .field("password", &"<redacted>")
            .finish()
    }
}
