//! One authenticated [`InvoiceClient`] per credential set.
//!
//! The registry is an ordinary value: build one at startup and share it
//! (usually behind an `Arc`) with whatever needs invoice clients.
//!
//! First use of a credential set inserts an empty `OnceCell` before the token
//! request starts. Concurrent callers for the same key wait on that cell, so
//! each key authenticates once. A failed handshake leaves the cell empty and
//! the entry is dropped; the next caller authenticates again.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::OnceCell;
use tracing::debug;

use crate::client::InvoiceClient;
use crate::credentials::{CredentialKey, Credentials};
use crate::error::{PayPalError, Result};

type Slot = Arc<OnceCell<Arc<InvoiceClient>>>;

pub struct InvoiceClientRegistry {
    http: reqwest::Client,
    base_url: Option<String>,
    clients: Mutex<HashMap<CredentialKey, Slot>>,
}

impl Default for InvoiceClientRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceClientRegistry {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: None,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Send every client's requests to `base_url` instead of PayPal.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Share one transport across all clients this registry builds.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Return the authenticated client for `credentials`, authenticating on
    /// first use.
    pub async fn get_client(&self, credentials: Credentials) -> Result<Arc<InvoiceClient>> {
        credentials.validate()?;
        let key = credentials.key();

        let slot = {
            let mut clients = self.lock();
            Arc::clone(clients.entry(key.clone()).or_default())
        };

        if let Some(client) = slot.get() {
            debug!(client_id = %credentials.client_id, "Using existing invoice client");
            return Ok(Arc::clone(client));
        }

        let result = slot
            .get_or_try_init(|| async {
                let mut client = self.build_client(credentials);
                client.authenticate().await?;
                Ok::<_, PayPalError>(Arc::new(client))
            })
            .await;

        match result {
            Ok(client) => Ok(Arc::clone(client)),
            Err(err) => {
                self.evict_failed(&key, &slot);
                Err(err)
            }
        }
    }

    /// `get_client` with the four credential values spelled out.
    pub async fn get_client_with(
        &self,
        client_id: &str,
        secret: &str,
        sandbox: bool,
        api_version: &str,
    ) -> Result<Arc<InvoiceClient>> {
        let credentials = Credentials::new(client_id, secret)
            .sandbox(sandbox)
            .api_version(api_version);
        self.get_client(credentials).await
    }

    /// Number of authenticated clients held.
    pub fn len(&self) -> usize {
        self.lock()
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an authenticated client exists for `credentials`.
    pub fn contains(&self, credentials: &Credentials) -> bool {
        self.lock()
            .get(&credentials.key())
            .is_some_and(|slot| slot.initialized())
    }

    /// Forget every client. In-flight authentications still complete for
    /// their own callers.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn build_client(&self, credentials: Credentials) -> InvoiceClient {
        let base_url = self
            .base_url
            .clone()
            .unwrap_or_else(|| credentials.base_url().to_string());
        InvoiceClient::with_client(self.http.clone(), credentials, base_url)
    }

    /// Drop a slot whose initialisation failed, unless another caller is
    /// still waiting on it.
    fn evict_failed(&self, key: &CredentialKey, slot: &Slot) {
        let mut clients = self.lock();
        let unused = clients.get(key).is_some_and(|current| {
            Arc::ptr_eq(current, slot) && !current.initialized() && Arc::strong_count(slot) <= 2
        });
        if unused {
            clients.remove(key);
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CredentialKey, Slot>> {
        self.clients.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_empty_credentials_without_registering() {
        let registry = InvoiceClientRegistry::new().with_base_url("http://127.0.0.1:9");

        let err = registry
            .get_client(Credentials::new("", "secret"))
            .await
            .err()
            .unwrap();

        assert!(matches!(err, PayPalError::Config(_)));
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn unreachable_provider_is_not_cached() {
        let registry = InvoiceClientRegistry::new().with_base_url("http://127.0.0.1:9");
        let creds = Credentials::new("id", "secret");

        let err = registry.get_client(creds.clone()).await.err().unwrap();

        assert!(err.is_transport());
        assert!(!registry.contains(&creds));
        assert!(registry.lock().is_empty());
    }
}
