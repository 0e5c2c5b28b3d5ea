//! Core page logic for the receipt desk
//!
//! Everything here is independent of the transport: models shared with the
//! backend, form validation, the receipt table, notifications, dialog state
//! and the preference fallback chain.

pub mod error;
pub mod forms;
pub mod inline;
pub mod modal;
pub mod models;
pub mod notify;
pub mod preferences;
pub mod table;
pub mod time;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger, ErrorSeverity};
pub use forms::{
    BetaSignupForm, EmailSendForm, EmailSettingsForm, FeedbackForm, ItemField, ItemsForm, LogoForm,
    OrganizationForm, ReceiptStatus, ReceiptView,
};
pub use inline::InlineEditor;
pub use modal::{ModalForm, ModalKind, ModalRegistry, ModalState};
pub use models::*;
pub use notify::{Notification, NotificationId, NotificationKind, Notifier};
pub use preferences::{
    CookieJar, FileStorage, FlushOutcome, KeyValueStorage, MemoryStorage, OptionStore, PersistTier,
    PreferenceStore, Session, SessionFlags,
};
pub use table::{ReceiptTable, RowId, RowSnapshot, SortState, TableRow};
pub use time::{SearchFilter, TimeFilter, TimePeriod};
pub use types::{Column, LogoPosition, PageAction, SortDirection};
pub use validation::{ImageDimensions, LogoFile};
