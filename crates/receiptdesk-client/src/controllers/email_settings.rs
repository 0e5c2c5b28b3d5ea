//! Email delivery settings dialog

use crate::page::Page;
use receiptdesk_core::validation::validate_email;
use receiptdesk_core::{ModalKind, PageAction};

impl Page {
    pub async fn open_email_settings(&mut self) -> PageAction {
        self.open_modal(ModalKind::EmailSettings);

        match self.client.email_settings().await {
            Ok(settings) => self.email_settings_form.populate(&settings),
            Err(e) if e.is_benign() => log::debug!("No email settings yet: {}", e),
            Err(e) => self.fail("load_email_settings", e),
        }
        PageAction::None
    }

    /// A blank password field leaves the stored password untouched
    pub async fn save_email_settings(&mut self) -> PageAction {
        let update = match self.email_settings_form.validate() {
            Ok(update) => update,
            Err(e) => {
                self.notifier.report(&e);
                return PageAction::None;
            }
        };

        match self.client.save_email_settings(&update).await {
            Ok(_) => {
                self.notifier.success("Email settings saved");
                self.close_modal(ModalKind::EmailSettings);
            }
            Err(e) => self.fail("save_email_settings", e),
        }
        PageAction::None
    }

    pub async fn test_email_settings(&mut self, address: &str) -> PageAction {
        if !validate_email(address) {
            self.notifier.error("Please enter a valid email address.");
            return PageAction::None;
        }

        match self.client.send_test_email(address.trim()).await {
            Ok(ack) => {
                let message = ack
                    .message
                    .unwrap_or_else(|| format!("Test email sent to {}", address.trim()));
                self.notifier.success(message);
            }
            Err(e) => self.fail("send_test_email", e),
        }
        PageAction::None
    }
}
