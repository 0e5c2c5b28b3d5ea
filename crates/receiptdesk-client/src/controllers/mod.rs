//! Dialog handlers
//!
//! One module per dialog, each adding its handlers to [`Page`](crate::Page).

pub mod email_send;
pub mod email_settings;
pub mod feedback;
pub mod items;
pub mod legal;
pub mod logo;
pub mod organization;
pub mod receipt;
pub mod welcome;
