//! Logo endpoints
//!
//! The image bytes travel as a JSON array of numbers.

use super::ApiClient;
use crate::error::ApiResult;
use receiptdesk_core::{Ack, Logo};

impl ApiClient {
    /// Current logo; `None` when the backend reports 404, 400 or 401
    pub async fn current_logo(&self) -> ApiResult<Option<Logo>> {
        match self.get_json("/api/logos").await {
            Ok(logo) => Ok(logo),
            Err(e) if e.is_benign() => {
                log::debug!("No logo available: {}", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn upload_logo(&self, logo: &Logo) -> ApiResult<Ack> {
        let ack: Option<Ack> = self.post_json("/api/logos", Some(logo)).await?;
        Ok(ack.unwrap_or_default())
    }

    pub async fn delete_logo(&self) -> ApiResult<Ack> {
        let ack: Option<Ack> = self.delete_json("/api/logos").await?;
        Ok(ack.unwrap_or_default())
    }
}
