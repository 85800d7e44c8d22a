use chrono::Local;
use reqwest::{Method, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::credentials::Credentials;
use crate::error::{PayPalError, Result};
use crate::invoice::{InvoiceDraft, InvoiceOptions};
use crate::types::{
    AccessToken, Invoice, InvoiceList, LinkDescription, NextInvoiceNumber, TemplateList,
};

const TOKEN_PATH: &str = "/v1/oauth2/token";
const SEARCH_PAGE_SIZE: u32 = 100;
const NO_BODY: Option<&()> = None;

/// Invoicing client bound to one set of PayPal credentials.
///
/// Call [`authenticate`](Self::authenticate) once before any other operation;
/// the access token is then reused for every request.
pub struct InvoiceClient {
    http: reqwest::Client,
    credentials: Credentials,
    base_url: String,
    token: Option<AccessToken>,
}

impl InvoiceClient {
    /// Unauthenticated client against the live or sandbox host.
    pub fn new(credentials: Credentials) -> Self {
        let base_url = credentials.base_url().to_string();
        Self::with_client(reqwest::Client::new(), credentials, base_url)
    }

    /// Unauthenticated client with a caller-supplied transport and host.
    pub fn with_client(
        http: reqwest::Client,
        credentials: Credentials,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            credentials,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Build and authenticate in one step.
    pub async fn connect(credentials: Credentials) -> Result<Self> {
        credentials.validate()?;
        let mut client = Self::new(credentials);
        client.authenticate().await?;
        Ok(client)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Exchange the client id and secret for an access token.
    pub async fn authenticate(&mut self) -> Result<()> {
        let url = format!("{}{}", self.base_url, TOKEN_PATH);
        let resp = self
            .http
            .post(&url)
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(%status, client_id = %self.credentials.client_id, "PayPal rejected credentials");
            return Err(match status.as_u16() {
                400 | 401 | 403 => PayPalError::Authentication(body),
                _ => PayPalError::from_status(status, TOKEN_PATH, body),
            });
        }

        let token: AccessToken = resp.json().await?;
        info!(
            client_id = %self.credentials.client_id,
            sandbox = self.credentials.sandbox,
            expires_in = ?token.expires_in,
            "PayPal client authenticated"
        );
        self.token = Some(token);
        Ok(())
    }

    /// Ask PayPal for the next free invoice number.
    pub async fn generate_next_invoice_number(&self) -> Result<String> {
        let next: NextInvoiceNumber = self
            .request(
                Method::POST,
                "/invoicing/generate-next-invoice-number",
                NO_BODY,
            )
            .await?;
        Ok(next.invoice_number)
    }

    /// Create a draft invoice from a complete provider payload.
    pub async fn create<B: Serialize + ?Sized>(&self, invoice: &B) -> Result<LinkDescription> {
        self.request(Method::POST, "/invoicing/invoices", Some(invoice))
            .await
    }

    /// Send a draft invoice to its recipients.
    ///
    /// PayPal answers with either a link or an empty 202.
    pub async fn send(&self, invoice_id: &str) -> Result<Option<LinkDescription>> {
        let path = format!("/invoicing/invoices/{}/send", invoice_id);
        let resp = self.send_request(Method::POST, &path, NO_BODY).await?;
        let body = resp.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| PayPalError::Parse(format!("Failed to parse send response: {}", e)))
    }

    /// First page of invoices, provider default page size.
    pub async fn list(&self) -> Result<InvoiceList> {
        self.request(Method::GET, "/invoicing/invoices", NO_BODY)
            .await
    }

    /// Search invoices. Always requests a page of 100.
    pub async fn search<C: Serialize + ?Sized>(&self, criteria: &C) -> Result<InvoiceList> {
        let path = format!("/invoicing/search-invoices?page_size={}", SEARCH_PAGE_SIZE);
        self.request(Method::POST, &path, Some(criteria)).await
    }

    pub async fn detail(&self, invoice_id: &str) -> Result<Invoice> {
        let path = format!("/invoicing/invoices/{}", invoice_id);
        self.request(Method::GET, &path, NO_BODY).await
    }

    /// Delete a draft invoice. PayPal returns 204; the body is never read.
    pub async fn delete(&self, invoice_id: &str) -> Result<()> {
        let path = format!("/invoicing/invoices/{}", invoice_id);
        self.send_request(Method::DELETE, &path, NO_BODY).await?;
        Ok(())
    }

    pub async fn list_templates(&self) -> Result<TemplateList> {
        self.request(Method::GET, "/invoicing/templates", NO_BODY)
            .await
    }

    /// Build an invoice dated today from `options` and create it.
    pub async fn generate(&self, options: &InvoiceOptions) -> Result<LinkDescription> {
        let draft = InvoiceDraft::from_options(options, Local::now().date_naive());
        debug!(
            reference = ?draft.detail.reference,
            items = draft.items.len(),
            "Generated invoice draft"
        );
        self.create(&draft).await
    }

    async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let resp = self.send_request(method, path, body).await?;
        Ok(resp.json::<T>().await?)
    }

    /// Authenticated request with status classification. Leaves the body unread.
    async fn send_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response> {
        let token = self.token.as_ref().ok_or_else(|| {
            PayPalError::Authentication("client has not been authenticated".into())
        })?;

        let url = format!(
            "{}/{}{}",
            self.base_url, self.credentials.api_version, path
        );
        debug!(%method, path, "PayPal request");

        let mut builder = self
            .http
            .request(method, &url)
            .bearer_auth(&token.access_token);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            warn!(%status, path, "PayPal returned an error");
            return Err(PayPalError::from_status(status, path, message));
        }

        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn operations_require_authentication() {
        let client = InvoiceClient::with_client(
            reqwest::Client::new(),
            Credentials::new("id", "secret"),
            "http://127.0.0.1:9",
        );

        assert!(!client.is_authenticated());
        let err = client.list().await.unwrap_err();
        assert!(matches!(err, PayPalError::Authentication(_)));
    }

    #[test]
    fn picks_host_from_sandbox_flag() {
        let live = InvoiceClient::new(Credentials::new("id", "secret"));
        let sandbox = InvoiceClient::new(Credentials::new("id", "secret").sandbox(true));

        assert_eq!(live.base_url(), "https://api-m.paypal.com");
        assert_eq!(sandbox.base_url(), "https://api-m.sandbox.paypal.com");
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let client = InvoiceClient::with_client(
            reqwest::Client::new(),
            Credentials::new("id", "secret"),
            "http://localhost:8080/",
        );
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
