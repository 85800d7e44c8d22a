use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// OAuth2 client-credentials grant response.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub app_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct NextInvoiceNumber {
    pub invoice_number: String,
}

/// HATEOAS link returned by create/send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDescription {
    pub href: String,
    #[serde(default)]
    pub rel: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
}

impl LinkDescription {
    /// Invoice id is the last segment of a `self` link.
    pub fn invoice_id(&self) -> Option<&str> {
        self.href
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
    }
}

/// An invoice as returned by detail/list/search.
///
/// Only the fields callers commonly branch on are typed; the rest of the
/// representation is kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of invoices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceList {
    #[serde(default)]
    pub items: Vec<Invoice>,
    #[serde(default)]
    pub total_items: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u64>,
    #[serde(default)]
    pub links: Vec<LinkDescription>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub default_template: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateList {
    #[serde(default)]
    pub templates: Vec<Template>,
    #[serde(default)]
    pub links: Vec<LinkDescription>,
}

/// Common search-invoices filters. Any other `Serialize` value is accepted by
/// `InvoiceClient::search` too.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn invoice_id_from_self_link() {
        let link = LinkDescription {
            href: "https://api-m.paypal.com/v2/invoicing/invoices/INV2-Z56S-5LLA-Q52L-CPZ5".into(),
            rel: Some("self".into()),
            method: Some("GET".into()),
        };
        assert_eq!(link.invoice_id(), Some("INV2-Z56S-5LLA-Q52L-CPZ5"));
        assert_eq!(LinkDescription::default().invoice_id(), None);
    }

    #[test]
    fn invoice_keeps_untyped_fields() {
        let invoice: Invoice = serde_json::from_value(json!({
            "id": "INV2-1",
            "status": "DRAFT",
            "amount": {"currency_code": "GBP", "value": "20.00"}
        }))
        .unwrap();
        assert_eq!(invoice.status.as_deref(), Some("DRAFT"));
        assert!(invoice.extra.contains_key("amount"));
    }

    #[test]
    fn empty_criteria_serialize_to_empty_object() {
        let value = serde_json::to_value(SearchCriteria::default()).unwrap();
        assert_eq!(value, json!({}));
    }
}
