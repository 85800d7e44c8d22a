//! Shared wiremock stubs for the PayPal integration tests.

#![allow(dead_code)]

use paypal::{Credentials, InvoiceClient};
use serde_json::json;
use wiremock::matchers::{basic_auth, body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CLIENT_ID: &str = "club-client";
pub const SECRET: &str = "club-secret";
pub const ACCESS_TOKEN: &str = "A21AAtest-token";

pub fn credentials() -> Credentials {
    Credentials::new(CLIENT_ID, SECRET)
}

pub fn token_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "scope": "https://uri.paypal.com/services/invoicing",
        "access_token": ACCESS_TOKEN,
        "token_type": "Bearer",
        "app_id": "APP-80W284485P519543T",
        "expires_in": 32400,
        "nonce": "2024-04-12T10:00:00Z"
    }))
}

/// Stub the token endpoint for `CLIENT_ID`/`SECRET`, expecting `times` calls.
pub async fn mount_token(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(path("/v1/oauth2/token"))
        .and(basic_auth(CLIENT_ID, SECRET))
        .and(body_string("grant_type=client_credentials"))
        .respond_with(token_response())
        .expect(times)
        .mount(server)
        .await;
}

/// An authenticated client pointed at the mock server.
pub async fn authenticated_client(server: &MockServer) -> InvoiceClient {
    mount_token(server, 1).await;
    let mut client = InvoiceClient::with_client(reqwest::Client::new(), credentials(), server.uri());
    client.authenticate().await.expect("token exchange should succeed");
    client
}
