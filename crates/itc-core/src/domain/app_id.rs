use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppIdError {
    #[error("app id is not a number: {input}")]
    NotNumeric { input: String },

    #[error("app id must be a positive integer")]
    NotPositive,
}

/// Identifier of the application the reports are requested for.
///
/// Validated as a positive integer, stored as a string because the
/// analytics API expects `adamId` values as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppId(String);

impl AppId {
    pub fn parse(input: &str) -> Result<Self, AppIdError> {
        let trimmed = input.trim();
        let number = trimmed
            .parse::<u64>()
            .map_err(|_| AppIdError::NotNumeric {
                input: trimmed.to_string(),
            })?;

        if number == 0 {
            return Err(AppIdError::NotPositive);
        }

        Ok(Self(number.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AppId {
    type Err = AppIdError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}
