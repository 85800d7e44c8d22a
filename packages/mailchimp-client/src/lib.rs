//! Mailchimp Marketing API client.
//!
//! Only member search is covered: one call to `/search-members`, mapped into
//! flat [`ClubMember`] records.
//!
//! # Example
//!
//! ```rust,ignore
//! use mailchimp_client::MailchimpClient;
//!
//! let client = MailchimpClient::new("0123456789abcdef-us6")?;
//!
//! for member in client.search_members("smith").await? {
//!     println!("{} {} <{}>", member.first_name, member.last_name, member.email);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{MailchimpError, Result};
pub use types::ClubMember;

use types::SearchMembersResponse;

pub struct MailchimpClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl MailchimpClient {
    /// Client for the datacenter named by the key suffix (`...-us6`).
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        let datacenter = api_key
            .rsplit_once('-')
            .map(|(_, dc)| dc)
            .filter(|dc| !dc.is_empty())
            .ok_or_else(|| {
                MailchimpError::Config("API key has no datacenter suffix (e.g. -us6)".into())
            })?;

        let base_url = format!("https://{}.api.mailchimp.com/3.0", datacenter);
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
        })
    }

    /// Point the client at another host (proxies, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search members across all lists.
    pub async fn search_members(&self, query: &str) -> Result<Vec<ClubMember>> {
        let url = format!("{}/search-members", self.base_url);
        tracing::debug!(query, "Searching Mailchimp members");

        let resp = self
            .client
            .get(&url)
            .basic_auth("anystring", Some(&self.api_key))
            .query(&[("query", query)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(%status, "Mailchimp returned an error");
            return Err(MailchimpError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let searched: SearchMembersResponse = resp.json().await?;
        let members: Vec<ClubMember> = searched
            .full_search
            .members
            .into_iter()
            .map(ClubMember::from)
            .collect();
        tracing::debug!(count = members.len(), "Mailchimp search complete");

        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datacenter_from_api_key() {
        let client = MailchimpClient::new("abc123-us6").unwrap();
        assert_eq!(client.base_url(), "https://us6.api.mailchimp.com/3.0");
    }

    #[test]
    fn api_key_without_datacenter_is_rejected() {
        assert!(matches!(
            MailchimpClient::new("abc123"),
            Err(MailchimpError::Config(_))
        ));
        assert!(matches!(
            MailchimpClient::new("abc123-"),
            Err(MailchimpError::Config(_))
        ));
    }
}
