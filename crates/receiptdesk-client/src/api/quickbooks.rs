//! QuickBooks connection endpoints

use super::{unwrap_field, ApiClient};
use crate::error::ApiResult;
use receiptdesk_core::{Ack, DonationTransaction, QuickBooksStatus};

impl ApiClient {
    pub async fn quickbooks_status(&self) -> ApiResult<QuickBooksStatus> {
        self.get_json("/api/quickbooks/status").await
    }

    /// Donations pulled from QuickBooks, either as a bare array or under
    /// `transactions`
    pub async fn transactions(&self) -> ApiResult<Vec<DonationTransaction>> {
        let value: serde_json::Value = self.get_json("/api/quickbooks/transactions").await?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        unwrap_field(value, "transactions")
    }

    pub async fn disconnect_quickbooks(&self) -> ApiResult<Ack> {
        let ack: Option<Ack> = self
            .post_json("/api/quickbooks/disconnect", None::<&()>)
            .await?;
        Ok(ack.unwrap_or_default())
    }
}
