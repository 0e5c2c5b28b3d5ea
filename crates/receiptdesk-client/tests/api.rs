//! Endpoint wrappers against the fake backend

mod common;

use common::{connected_state, TestBackend};
use receiptdesk_client::ApiError;
use receiptdesk_core::{EmailReceiptRequest, Organization, OptionStore, TransactionItem};
use rust_decimal::Decimal;
use serde_json::json;

#[tokio::test]
async fn test_check_receipt_encodes_path() {
    let backend = TestBackend::start().await;
    backend.with(|s| {
        s.receipts.insert("INV/7".to_string());
    });
    let client = backend.client();

    assert!(client.check_receipt("INV/7").await.unwrap().exists);
    assert!(!client.check_receipt("8").await.unwrap().exists);
    backend.with(|s| assert_eq!(s.checked_receipts, vec!["INV/7", "8"]));
}

#[tokio::test]
async fn test_current_organization_absent_then_created() {
    let backend = TestBackend::start().await;
    let client = backend.client();

    assert_eq!(client.current_organization().await.unwrap(), None);

    let created = client
        .create_organization(&Organization {
            name: "Food Bank".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.id, Some(1));

    let current = client.current_organization().await.unwrap().unwrap();
    assert_eq!(current.name, "Food Bank");
}

#[tokio::test]
async fn test_server_error_message_is_surfaced() {
    let backend = TestBackend::start().await;
    let client = backend.client();

    let error = client
        .email_receipt(&EmailReceiptRequest {
            transaction_id: "1".to_string(),
            email: "bounce@example.org".to_string(),
            subject: "Receipt".to_string(),
            message: String::new(),
        })
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::Status { status: 500, .. }));
    assert_eq!(error.to_string(), "SMTP rejected recipient");
    assert!(!error.is_benign());
}

#[tokio::test]
async fn test_non_json_error_gets_generic_message() {
    let backend = TestBackend::start().await;
    let client = backend.client();

    let item = TransactionItem {
        id: "a".to_string(),
        description: "reject".to_string(),
        quantity: Decimal::ONE,
        amount: Decimal::from(5),
    };
    let error = client.update_transaction_item("1", &item).await.unwrap_err();
    assert_eq!(error.to_string(), "Request failed with status 422");
}

#[tokio::test]
async fn test_missing_logo_is_none() {
    let backend = TestBackend::start().await;
    assert_eq!(backend.client().current_logo().await.unwrap(), None);
}

#[tokio::test]
async fn test_options_round_trip_through_option_store() {
    let backend = TestBackend::start().await;
    let client = backend.client();

    assert_eq!(client.get_option("showOpeningScreenPreference").await.unwrap(), None);
    client
        .set_option("showOpeningScreenPreference", json!(false))
        .await
        .unwrap();
    assert_eq!(
        client.get_option("showOpeningScreenPreference").await.unwrap(),
        Some(json!(false))
    );

    backend.with(|s| s.options_offline = true);
    assert!(client.get_option("showOpeningScreenPreference").await.is_err());
}

#[tokio::test]
async fn test_transactions_and_status() {
    let backend = TestBackend::with_state(connected_state()).await;
    let client = backend.client();

    assert!(client.quickbooks_status().await.unwrap().is_authenticated);
    let transactions = client.transactions().await.unwrap();
    assert_eq!(transactions.len(), 3);
    assert_eq!(transactions[0].donor_name, "Jane Smith");
    assert_eq!(transactions[0].qb_docnum, "DOC-1");
    assert_eq!(transactions[1].amount, Decimal::from(50));

    client.disconnect_quickbooks().await.unwrap();
    let error = client.transactions().await.unwrap_err();
    assert_eq!(error.status(), Some(401));
    assert!(error.is_benign());
}

#[tokio::test]
async fn test_generate_all_counts() {
    let backend = TestBackend::with_state(connected_state()).await;
    let client = backend.client();

    client.generate_receipt("2").await.unwrap();
    let results = client.generate_all_receipts().await.unwrap();
    assert_eq!(results.generated, 2);
    assert_eq!(results.skipped, 1);
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let client = receiptdesk_client::ApiClient::new(
        "http://127.0.0.1:9",
        std::time::Duration::from_secs(2),
    )
    .unwrap();
    let error = client.quickbooks_status().await.unwrap_err();
    assert!(matches!(error, ApiError::Transport(_)));
}
