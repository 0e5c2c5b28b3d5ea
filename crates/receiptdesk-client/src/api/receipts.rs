//! Receipt endpoints

use super::{segment, ApiClient};
use crate::error::ApiResult;
use receiptdesk_core::{Ack, EmailReceiptRequest, GenerateAllResponse, GenerateResults, ReceiptCheck};

impl ApiClient {
    /// `GET /api/receipts/check/:id`
    pub async fn check_receipt(&self, transaction_id: &str) -> ApiResult<ReceiptCheck> {
        self.get_json(&format!("/api/receipts/check/{}", segment(transaction_id)))
            .await
    }

    /// `POST /api/receipts/generate/:id`
    pub async fn generate_receipt(&self, transaction_id: &str) -> ApiResult<Ack> {
        let ack: Option<Ack> = self
            .post_json(
                &format!("/api/receipts/generate/{}", segment(transaction_id)),
                None::<&()>,
            )
            .await?;
        Ok(ack.unwrap_or_default())
    }

    /// `POST /api/receipts/generate-all`
    pub async fn generate_all_receipts(&self) -> ApiResult<GenerateResults> {
        let response: GenerateAllResponse = self
            .post_json("/api/receipts/generate-all", None::<&()>)
            .await?;
        Ok(response.results)
    }

    /// `POST /api/receipts/email`
    pub async fn email_receipt(&self, request: &EmailReceiptRequest) -> ApiResult<Ack> {
        let ack: Option<Ack> = self.post_json("/api/receipts/email", Some(request)).await?;
        Ok(ack.unwrap_or_default())
    }
}
