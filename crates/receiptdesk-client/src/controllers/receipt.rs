//! PDF receipt dialog

use crate::page::Page;
use receiptdesk_core::{ModalKind, PageAction, ReceiptStatus};

impl Page {
    /// Open the receipt dialog for a transaction and find out whether its
    /// receipt already exists
    pub async fn open_receipt(&mut self, transaction_id: &str) -> PageAction {
        self.open_modal(ModalKind::PdfReceipt);
        self.receipt.transaction_id = Some(transaction_id.to_string());
        self.receipt.status = ReceiptStatus::Unknown;

        match self.client.check_receipt(transaction_id).await {
            Ok(check) => {
                self.receipt.status = if check.exists {
                    ReceiptStatus::Ready
                } else {
                    ReceiptStatus::NotGenerated
                };
            }
            Err(e) => self.fail_for("check_receipt", transaction_id, e),
        }
        PageAction::None
    }

    /// Generate the receipt for the transaction the dialog shows
    pub async fn generate_receipt(&mut self) -> PageAction {
        let Some(transaction_id) = self.receipt.transaction_id.clone() else {
            self.notifier.error("No transaction selected.");
            return PageAction::None;
        };

        match self.client.generate_receipt(&transaction_id).await {
            Ok(ack) => {
                self.receipt.status = ReceiptStatus::Ready;
                let message = ack
                    .message
                    .unwrap_or_else(|| "Receipt generated successfully".to_string());
                self.notifier.success(message);
            }
            Err(e) => self.fail_for("generate_receipt", &transaction_id, e),
        }
        PageAction::None
    }

    pub async fn generate_all_receipts(&mut self) -> PageAction {
        match self.client.generate_all_receipts().await {
            Ok(results) => {
                self.notifier.success(format!(
                    "Generated {} receipt(s), skipped {}",
                    results.generated, results.skipped
                ));
                PageAction::Reload
            }
            Err(e) => {
                self.fail("generate_all_receipts", e);
                PageAction::None
            }
        }
    }
}
