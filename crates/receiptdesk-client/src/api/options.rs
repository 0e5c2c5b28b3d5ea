//! Server-side options
//!
//! `GET /api/options/:name` answers 404 for an option that was never set.
//! The value may come back bare or wrapped as `{"value": ...}`.

use async_trait::async_trait;

use super::{segment, ApiClient};
use crate::error::ApiResult;
use receiptdesk_core::{CoreResult, OptionStore};

impl ApiClient {
    pub async fn fetch_option(&self, name: &str) -> ApiResult<Option<serde_json::Value>> {
        let value: serde_json::Value = match self
            .get_json(&format!("/api/options/{}", segment(name)))
            .await
        {
            Ok(value) => value,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };

        let value = match value {
            serde_json::Value::Object(mut map) if map.contains_key("value") => {
                map.remove("value").unwrap_or(serde_json::Value::Null)
            }
            other => other,
        };
        Ok(if value.is_null() { None } else { Some(value) })
    }

    pub async fn store_option(&self, name: &str, value: serde_json::Value) -> ApiResult<()> {
        let body = serde_json::json!({ "value": value });
        let _: serde_json::Value = self
            .post_json(&format!("/api/options/{}", segment(name)), Some(&body))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl OptionStore for ApiClient {
    async fn get_option(&self, name: &str) -> CoreResult<Option<serde_json::Value>> {
        Ok(self.fetch_option(name).await?)
    }

    async fn set_option(&self, name: &str, value: serde_json::Value) -> CoreResult<()> {
        Ok(self.store_option(name, value).await?)
    }
}
