//! Invoice payloads built from club fee data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Who the invoice is addressed to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    pub name: String,
    pub email_address: String,
}

/// The club issuing the invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoicer {
    pub company_name: String,
    pub name: String,
    pub email: String,
    pub logo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeType {
    pub description: String,
    pub amount: f64,
}

/// A single charge, e.g. a match fee for one fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fee {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub fee_type: FeeType,
}

/// High-level input for `InvoiceClient::generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceOptions {
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    pub note: String,
    pub due_date: NaiveDate,
    pub currency: String,
    pub recipient: Recipient,
    pub invoicer: Invoicer,
    pub fees: Vec<Fee>,
}

// ============================================================================
// Provider payload
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceDraft {
    pub detail: DraftDetail,
    pub invoicer: DraftInvoicer,
    pub primary_recipients: Vec<DraftRecipient>,
    pub items: Vec<LineItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub invoice_date: String,
    pub currency_code: String,
    pub note: String,
    pub payment_term: PaymentTerm,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentTerm {
    pub due_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftInvoicer {
    pub business_name: String,
    pub name: FullName,
    pub email_address: String,
    pub logo_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullName {
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftRecipient {
    pub billing_info: BillingInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillingInfo {
    pub full_name: String,
    pub email_address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub name: String,
    pub description: String,
    pub quantity: u32,
    pub unit_amount: Money,
    pub unit_of_measure: UnitOfMeasure,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Money {
    pub currency_code: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitOfMeasure {
    Quantity,
    Hours,
    Amount,
}

impl InvoiceDraft {
    /// Map club options onto the provider's invoice shape, dated `today`.
    pub fn from_options(options: &InvoiceOptions, today: NaiveDate) -> Self {
        let items = options
            .fees
            .iter()
            .map(|fee| LineItem {
                name: fee.name.clone(),
                description: format!("{} - {}", fee.fee_type.description, fee.description),
                quantity: 1,
                unit_amount: Money {
                    currency_code: options.currency.clone(),
                    value: fee.fee_type.amount,
                },
                unit_of_measure: UnitOfMeasure::Amount,
            })
            .collect();

        Self {
            detail: DraftDetail {
                invoice_number: options.invoice_number.clone(),
                reference: options.reference.clone(),
                invoice_date: today.format(DATE_FORMAT).to_string(),
                currency_code: options.currency.clone(),
                note: options.note.clone(),
                payment_term: PaymentTerm {
                    due_date: options.due_date.format(DATE_FORMAT).to_string(),
                },
            },
            invoicer: DraftInvoicer {
                business_name: options.invoicer.company_name.clone(),
                name: FullName {
                    full_name: options.invoicer.name.clone(),
                },
                email_address: options.invoicer.email.clone(),
                logo_url: options.invoicer.logo.clone(),
            },
            primary_recipients: vec![DraftRecipient {
                billing_info: BillingInfo {
                    full_name: options.recipient.name.clone(),
                    email_address: options.recipient.email_address.clone(),
                },
            }],
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn match_fee_options() -> InvoiceOptions {
        InvoiceOptions {
            invoice_number: None,
            reference: Some("R1".into()),
            note: "N".into(),
            due_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            currency: "GBP".into(),
            recipient: Recipient {
                name: "Bob".into(),
                email_address: "b@x.com".into(),
            },
            invoicer: Invoicer {
                company_name: "Co".into(),
                name: "Al".into(),
                email: "a@x.com".into(),
                logo: "L".into(),
            },
            fees: vec![Fee {
                name: "Match Fee".into(),
                description: "April".into(),
                fee_type: FeeType {
                    description: "Match".into(),
                    amount: 20.0,
                },
            }],
        }
    }

    #[test]
    fn maps_match_fee_options() {
        let today = NaiveDate::from_ymd_opt(2024, 4, 12).unwrap();
        let draft = InvoiceDraft::from_options(&match_fee_options(), today);
        let value = serde_json::to_value(&draft).unwrap();

        assert_eq!(value["detail"]["invoice_date"], "2024-04-12");
        assert_eq!(value["detail"]["payment_term"]["due_date"], "2024-05-01");
        assert_eq!(value["detail"]["reference"], "R1");
        assert_eq!(value["detail"]["currency_code"], "GBP");
        assert!(value["detail"].get("invoice_number").is_none());
        assert_eq!(
            value["items"][0],
            json!({
                "name": "Match Fee",
                "description": "Match - April",
                "quantity": 1,
                "unit_amount": {"currency_code": "GBP", "value": 20.0},
                "unit_of_measure": "AMOUNT"
            })
        );
    }

    #[test]
    fn maps_invoicer_and_recipient() {
        let today = NaiveDate::from_ymd_opt(2024, 4, 12).unwrap();
        let value =
            serde_json::to_value(InvoiceDraft::from_options(&match_fee_options(), today)).unwrap();

        assert_eq!(
            value["invoicer"],
            json!({
                "business_name": "Co",
                "name": {"full_name": "Al"},
                "email_address": "a@x.com",
                "logo_url": "L"
            })
        );
        assert_eq!(
            value["primary_recipients"],
            json!([{"billing_info": {"full_name": "Bob", "email_address": "b@x.com"}}])
        );
    }

    #[test]
    fn one_item_per_fee() {
        let mut options = match_fee_options();
        options.invoice_number = Some("0042".into());
        options.fees.push(Fee {
            name: "Subs".into(),
            description: "2024".into(),
            fee_type: FeeType {
                description: "Annual".into(),
                amount: 45.5,
            },
        });

        let draft = InvoiceDraft::from_options(&options, options.due_date);
        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.items[1].description, "Annual - 2024");
        assert_eq!(draft.items[1].quantity, 1);
        assert_eq!(draft.detail.invoice_number.as_deref(), Some("0042"));
    }
}
