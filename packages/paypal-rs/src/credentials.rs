use std::fmt;

use crate::error::{PayPalError, Result};

pub const LIVE_BASE_URL: &str = "https://api-m.paypal.com";
pub const SANDBOX_BASE_URL: &str = "https://api-m.sandbox.paypal.com";
pub const DEFAULT_API_VERSION: &str = "v2";

/// REST app credentials for one PayPal account.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub secret: String,
    pub sandbox: bool,
    pub api_version: String,
}

impl Credentials {
    /// Live credentials on the default API version.
    pub fn new(client_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            secret: secret.into(),
            sandbox: false,
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Reject credentials that could never authenticate.
    pub fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() {
            return Err(PayPalError::Config("client id must not be empty".into()));
        }
        if self.secret.trim().is_empty() {
            return Err(PayPalError::Config("secret must not be empty".into()));
        }
        Ok(())
    }

    pub fn key(&self) -> CredentialKey {
        CredentialKey {
            client_id: self.client_id.clone(),
            secret: self.secret.clone(),
            sandbox: self.sandbox,
            api_version: self.api_version.clone(),
        }
    }

    /// Live or sandbox host, picked by the sandbox flag.
    pub fn base_url(&self) -> &'static str {
        if self.sandbox {
            SANDBOX_BASE_URL
        } else {
            LIVE_BASE_URL
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("secret", &"<redacted>")
            .field("sandbox", &self.sandbox)
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// Registry key for a credential tuple.
///
/// Fields are compared individually, so `("ab", "c")` and `("a", "bc")` are
/// different keys.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CredentialKey {
    client_id: String,
    secret: String,
    sandbox: bool,
    api_version: String,
}

impl fmt::Debug for CredentialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CredentialKey")
            .field(&self.client_id)
            .field(&"<redacted>")
            .field(&self.sandbox)
            .field(&self.api_version)
            .finish()
    }
}
