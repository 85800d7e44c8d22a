use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use paypal::Credentials;
use std::env;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub mailchimp_api_key: String,
    pub paypal_client_id: String,
    pub paypal_secret: String,
    pub paypal_sandbox: bool,
    pub paypal_api_version: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &str| lookup(name).context(format!("{} must be set", name));

        let paypal_sandbox = match lookup("PAYPAL_SANDBOX") {
            Some(value) => parse_flag(&value).context("PAYPAL_SANDBOX must be true or false")?,
            None => false,
        };

        Ok(Self {
            mailchimp_api_key: required("MAILCHIMP_API_KEY")?,
            paypal_client_id: required("PAYPAL_CLIENT_ID")?,
            paypal_secret: required("PAYPAL_SECRET")?,
            paypal_sandbox,
            paypal_api_version: lookup("PAYPAL_API_VERSION")
                .unwrap_or_else(|| paypal::credentials::DEFAULT_API_VERSION.to_string()),
        })
    }

    pub fn paypal_credentials(&self) -> Credentials {
        Credentials::new(&self.paypal_client_id, &self.paypal_secret)
            .sandbox(self.paypal_sandbox)
            .api_version(&self.paypal_api_version)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => bail!("invalid flag value: {}", other),
    }
}
