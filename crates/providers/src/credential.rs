//! Local API key validation.
//!
//! Runs before any provider is built so an obviously bad key never costs a
//! network round trip.

use litlens_core::error::{Error, ProviderError};

/// A key that passed local validation. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Validate a user-supplied key.
    ///
    /// - absent or blank: [`Error::MissingCredential`]
    /// - containing whitespace or control characters:
    ///   [`ProviderError::AuthenticationFailed`]
    pub fn parse(raw: Option<&str>) -> Result<Self, Error> {
        let key = raw.map(str::trim).unwrap_or_default();
        if key.is_empty() {
            return Err(Error::MissingCredential);
        }
        if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ProviderError::AuthenticationFailed(
                "API key contains whitespace or control characters".into(),
            )
            .into());
        }
        Ok(Self(key.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}
