//! Organization endpoints

use super::{segment, ApiClient};
use crate::error::ApiResult;
use receiptdesk_core::Organization;

impl ApiClient {
    pub async fn list_organizations(&self) -> ApiResult<Vec<Organization>> {
        self.get_json("/api/organizations").await
    }

    pub async fn get_organization(&self, id: i64) -> ApiResult<Organization> {
        self.get_json(&format!("/api/organizations/{}", segment(&id.to_string())))
            .await
    }

    /// The organization receipts are issued for; `None` until one is saved
    pub async fn current_organization(&self) -> ApiResult<Option<Organization>> {
        match self.get_json("/api/organizations/current").await {
            Ok(org) => Ok(org),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn create_organization(&self, org: &Organization) -> ApiResult<Organization> {
        self.post_json("/api/organizations", Some(org)).await
    }

    pub async fn update_organization(&self, id: i64, org: &Organization) -> ApiResult<Organization> {
        self.put_json(&format!("/api/organizations/{}", segment(&id.to_string())), org)
            .await
    }
}
