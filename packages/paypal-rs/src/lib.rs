//! PayPal Invoicing v2 client.
//!
//! Covers the invoicing calls a club needs: numbering, create/send/delete,
//! list/search/detail, templates, and building an invoice from a list of
//! fees. Clients are handed out by an [`InvoiceClientRegistry`] so each
//! credential set authenticates once per process.
//!
//! # Example
//!
//! ```rust,ignore
//! use paypal::{Credentials, InvoiceClientRegistry};
//!
//! let registry = InvoiceClientRegistry::new();
//! let client = registry
//!     .get_client(Credentials::new(client_id, secret).sandbox(true))
//!     .await?;
//!
//! let created = client.generate(&options).await?;
//! if let Some(id) = created.invoice_id() {
//!     client.send(id).await?;
//! }
//! ```

pub mod client;
pub mod credentials;
pub mod error;
pub mod invoice;
pub mod registry;
pub mod types;

pub use client::InvoiceClient;
pub use credentials::{CredentialKey, Credentials};
pub use error::{PayPalError, Result};
pub use invoice::{Fee, FeeType, InvoiceDraft, InvoiceOptions, Invoicer, Recipient};
pub use registry::InvoiceClientRegistry;
pub use types::{Invoice, InvoiceList, LinkDescription, SearchCriteria, Template, TemplateList};
