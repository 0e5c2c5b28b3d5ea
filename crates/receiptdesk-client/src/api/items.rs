//! Transaction line item endpoints

use super::{segment, unwrap_field, ApiClient};
use crate::error::ApiResult;
use receiptdesk_core::TransactionItem;

impl ApiClient {
    pub async fn transaction_items(&self, transaction_id: &str) -> ApiResult<Vec<TransactionItem>> {
        let value: serde_json::Value = self
            .get_json(&format!("/api/transaction-items/{}", segment(transaction_id)))
            .await?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        unwrap_field(value, "items")
    }

    /// Save one edited item; the backend echoes the stored item back
    pub async fn update_transaction_item(
        &self,
        transaction_id: &str,
        item: &TransactionItem,
    ) -> ApiResult<TransactionItem> {
        let value: serde_json::Value = self
            .put_json(
                &format!(
                    "/api/transaction-items/{}/{}",
                    segment(transaction_id),
                    segment(&item.id)
                ),
                item,
            )
            .await?;
        if value.is_null() {
            return Ok(item.clone());
        }
        unwrap_field(value, "item")
    }
}
