use super::ApiClient;
use crate::error::ApiResult;
use receiptdesk_core::{Ack, BetaSignup, Feedback};

impl ApiClient {
    pub async fn submit_feedback(&self, feedback: &Feedback) -> ApiResult<Ack> {
        let ack: Option<Ack> = self.post_json("/api/feedback", Some(feedback)).await?;
        Ok(ack.unwrap_or_default())
    }

    pub async fn submit_beta_signup(&self, signup: &BetaSignup) -> ApiResult<Ack> {
        let ack: Option<Ack> = self.post_json("/api/beta/submit", Some(signup)).await?;
        Ok(ack.unwrap_or_default())
    }
}
