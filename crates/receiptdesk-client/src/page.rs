//! Page controller
//!
//! `Page` owns every piece of state the receipt page works with: the
//! backend client, dialog registry, notifications, the receipt table, the
//! preference store and one form per dialog. Handlers live in
//! `controllers` and `session` as further `impl Page` blocks; each takes
//! `&mut self` and reports failures through the notifier.

use chrono::{Local, NaiveDate};
use std::time::Duration;

use crate::api::ApiClient;
use crate::error::ApiResult;
use receiptdesk_config::Config;
use receiptdesk_core::{
    BetaSignupForm, CoreError, DefaultErrorLogger, EmailSendForm, EmailSettingsForm, ErrorContext,
    ErrorLogger, FeedbackForm, ItemsForm, LogoForm, ModalForm, ModalKind, ModalRegistry, Notifier,
    OrganizationForm, PreferenceStore, ReceiptTable, ReceiptView, Session, SessionFlags,
};

pub struct Page {
    pub(crate) client: ApiClient,
    pub(crate) config: Config,
    pub modals: ModalRegistry,
    pub notifier: Notifier,
    pub table: ReceiptTable,
    pub preferences: PreferenceStore,
    pub session_flags: SessionFlags,
    /// Last known QuickBooks connection state
    pub authenticated: bool,
    pub current_organization_id: Option<i64>,
    pub current_email_transaction_id: Option<String>,
    pub receipt: ReceiptView,
    pub organization_form: OrganizationForm,
    pub logo_form: LogoForm,
    pub email_settings_form: EmailSettingsForm,
    pub email_send_form: EmailSendForm,
    pub items_form: ItemsForm,
    pub feedback_form: FeedbackForm,
    pub beta_form: BetaSignupForm,
    /// Pinned "today" for time phrases; the local date when unset
    today: Option<NaiveDate>,
    error_logger: DefaultErrorLogger,
}

impl Page {
    pub fn new(config: Config, client: ApiClient, preferences: PreferenceStore) -> Self {
        Self {
            modals: ModalRegistry::new(),
            notifier: Notifier::new(Duration::from_millis(config.notifications.duration_ms)),
            table: ReceiptTable::new(config.table.min_column_width),
            preferences,
            session_flags: SessionFlags::new(),
            authenticated: false,
            current_organization_id: None,
            current_email_transaction_id: None,
            receipt: ReceiptView::default(),
            organization_form: OrganizationForm::default(),
            logo_form: LogoForm::default(),
            email_settings_form: EmailSettingsForm::default(),
            email_send_form: EmailSendForm::default(),
            items_form: ItemsForm::default(),
            feedback_form: FeedbackForm::default(),
            beta_form: BetaSignupForm::default(),
            today: None,
            error_logger: DefaultErrorLogger,
            client,
            config,
        }
    }

    /// Client and file-backed preference store built from configuration
    pub fn from_config(config: Config) -> ApiResult<Self> {
        let client = ApiClient::from_config(&config.server)?;
        let preferences = PreferenceStore::from_config(&config);
        Ok(Self::new(config, client, preferences))
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Fix the date time phrases are resolved against
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = Some(today);
    }

    /// Server option access when connected, local storage otherwise
    pub fn session(&self) -> Session<'_> {
        if self.authenticated {
            Session::Authenticated(&self.client)
        } else {
            Session::Anonymous
        }
    }

    /// Log a failed handler and show it to the user
    pub(crate) fn fail(&mut self, operation: &str, error: impl Into<CoreError>) {
        let error = error.into();
        self.error_logger
            .log_error(&error, &ErrorContext::new(operation));
        self.notifier.report(&error);
    }

    /// Log a failure the user is not told about
    pub(crate) fn log_quiet_failure(&self, operation: &str, message: &str) {
        self.error_logger
            .log_warning(message, &ErrorContext::new(operation));
    }

    /// Same as `fail` with the transaction the handler was working on
    pub(crate) fn fail_for(&mut self, operation: &str, transaction_id: &str, error: impl Into<CoreError>) {
        let error = error.into();
        self.error_logger.log_error(
            &error,
            &ErrorContext::new(operation).with_transaction(transaction_id),
        );
        self.notifier.report(&error);
    }

    // ==================== Dialog lifecycle ====================

    pub fn open_modal(&mut self, kind: ModalKind) -> bool {
        self.modals.open(kind)
    }

    /// Close a dialog, resetting its form and dialog-scoped ids
    pub fn close_modal(&mut self, kind: ModalKind) -> bool {
        let closed = self.modals.close(kind);
        if closed {
            self.reset_modal(kind);
        }
        closed
    }

    /// Escape closes everything that is open
    pub fn handle_escape(&mut self) -> Vec<ModalKind> {
        let closed = self.modals.escape();
        for kind in &closed {
            self.reset_modal(*kind);
        }
        closed
    }

    /// Click on a dialog's backdrop
    pub fn handle_outside_click(&mut self, kind: ModalKind) -> bool {
        let closed = self.modals.outside_click(kind);
        if closed {
            self.reset_modal(kind);
        }
        closed
    }

    fn reset_modal(&mut self, kind: ModalKind) {
        match kind {
            ModalKind::PdfReceipt => self.receipt.reset(),
            ModalKind::Organization => self.organization_form.reset(),
            ModalKind::Logo => self.logo_form.reset(),
            ModalKind::EmailSettings => self.email_settings_form.reset(),
            ModalKind::EmailSend => {
                self.email_send_form.reset();
                self.current_email_transaction_id = None;
            }
            ModalKind::Items => self.items_form.reset(),
            ModalKind::Feedback => self.feedback_form.reset(),
            ModalKind::Welcome | ModalKind::Terms | ModalKind::Privacy => {}
        }
    }
}
