//! Email settings endpoints

use super::ApiClient;
use crate::error::ApiResult;
use receiptdesk_core::{Ack, EmailSettings, EmailSettingsUpdate};

impl ApiClient {
    /// Stored settings; the SMTP password is never part of the response
    pub async fn email_settings(&self) -> ApiResult<EmailSettings> {
        let settings: Option<EmailSettings> = self.get_json("/api/email/settings").await?;
        Ok(settings.unwrap_or_default())
    }

    pub async fn save_email_settings(&self, update: &EmailSettingsUpdate) -> ApiResult<Ack> {
        let ack: Option<Ack> = self.post_json("/api/email/settings", Some(update)).await?;
        Ok(ack.unwrap_or_default())
    }

    pub async fn send_test_email(&self, address: &str) -> ApiResult<Ack> {
        let body = serde_json::json!({ "email": address });
        let ack: Option<Ack> = self.post_json("/api/email/test", Some(&body)).await?;
        Ok(ack.unwrap_or_default())
    }
}
