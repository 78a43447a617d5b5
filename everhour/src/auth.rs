use std::fmt;

use thiserror::Error;

/// The secret token authorizing API calls for one account.
///
/// Sent as the `X-Api-Key` request header on every call, never as part of a
/// URL or request body. The `Debug` impl redacts the token so it cannot leak
/// through logs or error chains.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

#[derive(Error, Debug, PartialEq, Eq)]
#[error("API key must not be empty")]
pub struct InvalidApiKey;

impl ApiKey {
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidApiKey> {
        let trimmed = raw.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(InvalidApiKey);
        }
        Ok(Self(trimmed))
    }

    /// The raw header value for `X-Api-Key`.
    pub fn as_header_value(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(<redacted>)")
    }
}
