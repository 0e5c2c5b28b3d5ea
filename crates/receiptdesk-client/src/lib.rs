//! Backend client and page controller for the receipt desk
//!
//! - api: typed wrappers around the backend's REST endpoints
//! - page: the `Page` controller that owns all page state
//! - controllers: per-dialog handlers on `Page`
//! - session: QuickBooks connect, sync and disconnect

pub mod api;
pub mod controllers;
pub mod error;
pub mod page;
pub mod session;

pub use api::ApiClient;
pub use error::{ApiError, ApiResult};
pub use page::Page;
