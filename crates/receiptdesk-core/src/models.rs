//! Records exchanged with the receipt backend
//!
//! Field names follow the backend's camelCase JSON.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::LogoPosition;

/// Organization issuing the receipts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub ein: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    /// Contact person named on receipts
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub url: String,
}

/// Logo as stored by the backend; the image travels as a plain byte array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logo {
    #[serde(default)]
    pub logo: Vec<u8>,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub position: LogoPosition,
    #[serde(default)]
    pub filename: String,
}

/// Email delivery settings as returned by the backend.
///
/// There is deliberately no password field: it is write-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EmailSettings {
    #[serde(default)]
    pub use_custom: bool,
    #[serde(default)]
    pub smtp_host: String,
    #[serde(default)]
    pub smtp_port: Option<u16>,
    #[serde(default)]
    pub smtp_user: String,
    #[serde(default)]
    pub smtp_secure: bool,
    #[serde(default)]
    pub from_email: String,
    #[serde(default)]
    pub from_name: String,
}

/// Body of `POST /api/email/settings`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSettingsUpdate {
    #[serde(flatten)]
    pub settings: EmailSettings,
    /// Omitted when blank so the stored password survives
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smtp_password: Option<String>,
}

/// Body of `POST /api/receipts/email`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailReceiptRequest {
    pub transaction_id: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ReceiptCheck {
    pub exists: bool,
}

/// Outcome of a bulk generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub struct GenerateResults {
    #[serde(default)]
    pub generated: u32,
    #[serde(default)]
    pub skipped: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct GenerateAllResponse {
    pub results: GenerateResults,
}

/// Generic `{success, message}` acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Ack {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickBooksStatus {
    pub is_authenticated: bool,
}

/// A donation pulled from QuickBooks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationTransaction {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub donor_name: String,
    #[serde(default)]
    pub donor_email: String,
    pub amount: Decimal,
    #[serde(default, rename = "qbDocNum", alias = "docNumber")]
    pub qb_docnum: String,
    #[serde(default)]
    pub receipt_generated: bool,
}

/// Line item of a donation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionItem {
    pub id: String,
    #[serde(default)]
    pub description: String,
    // The items endpoint stores JSON numbers
    #[serde(default = "default_quantity", with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

fn default_quantity() -> Decimal {
    Decimal::ONE
}

/// Body of `POST /api/feedback`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub category: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

/// Body of `POST /api/beta/submit`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BetaSignup {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_amounts_serialize_as_numbers() {
        let item = TransactionItem {
            id: "a".to_string(),
            description: "Books".to_string(),
            quantity: Decimal::from(2),
            amount: Decimal::new(1250, 2),
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["quantity"], serde_json::json!(2.0));
        assert_eq!(value["amount"], serde_json::json!(12.5));

        let back: TransactionItem = serde_json::from_value(serde_json::json!({
            "id": "a",
            "amount": 12.5
        }))
        .unwrap();
        assert_eq!(back.amount, Decimal::new(1250, 2));
        assert_eq!(back.quantity, Decimal::ONE);
    }

    #[test]
    fn test_transaction_from_backend_json() {
        let tx: DonationTransaction = serde_json::from_value(serde_json::json!({
            "id": "101",
            "date": "2024-01-15",
            "donorName": "Jane Smith",
            "donorEmail": "jane@example.org",
            "amount": 1200.5,
            "docNumber": "INV-7"
        }))
        .unwrap();

        assert_eq!(tx.donor_name, "Jane Smith");
        assert_eq!(tx.qb_docnum, "INV-7");
        assert_eq!(tx.amount.to_string(), "1200.5");
        assert!(!tx.receipt_generated);
    }

    #[test]
    fn test_settings_update_omits_blank_password() {
        let update = EmailSettingsUpdate {
            settings: EmailSettings {
                use_custom: true,
                smtp_host: "smtp.example.org".to_string(),
                ..Default::default()
            },
            smtp_password: None,
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["useCustom"], true);
        assert!(value.get("smtpPassword").is_none());
    }

    #[test]
    fn test_email_request_uses_camel_case() {
        let request = EmailReceiptRequest {
            transaction_id: "55".to_string(),
            email: "a@b.org".to_string(),
            subject: "Receipt".to_string(),
            message: String::new(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["transactionId"], "55");
    }

    #[test]
    fn test_logo_bytes_are_numeric_array() {
        let logo = Logo {
            logo: vec![137, 80, 78, 71],
            width: 10,
            height: 10,
            position: LogoPosition::TopRight,
            filename: "logo.png".to_string(),
        };
        let value = serde_json::to_value(&logo).unwrap();
        assert_eq!(value["logo"], serde_json::json!([137, 80, 78, 71]));
        assert_eq!(value["position"], "top-right");
    }
}
