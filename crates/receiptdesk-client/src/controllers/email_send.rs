//! Email-a-receipt dialog

use crate::page::Page;
use receiptdesk_core::{Column, ModalKind, PageAction};

impl Page {
    /// Open for one transaction with the donor's address from the table
    pub fn open_email_send(&mut self, transaction_id: &str) -> PageAction {
        let donor_email = self
            .table
            .row_for_transaction(transaction_id)
            .map(|row| row.cell(Column::DonorEmail).to_string())
            .unwrap_or_default();

        self.open_modal(ModalKind::EmailSend);
        self.email_send_form.prefill(&donor_email);
        self.current_email_transaction_id = Some(transaction_id.to_string());
        PageAction::None
    }

    pub async fn send_receipt_email(&mut self) -> PageAction {
        let Some(transaction_id) = self.current_email_transaction_id.clone() else {
            self.notifier.error("No transaction selected.");
            return PageAction::None;
        };

        let request = match self.email_send_form.validate(&transaction_id) {
            Ok(request) => request,
            Err(e) => {
                self.notifier.report(&e);
                return PageAction::None;
            }
        };

        match self.client.email_receipt(&request).await {
            Ok(_) => {
                self.notifier
                    .success(format!("Receipt sent to {}", request.email));
                self.close_modal(ModalKind::EmailSend);
            }
            Err(e) => self.fail_for("email_receipt", &transaction_id, e),
        }
        PageAction::None
    }
}
