//! Terms of service and privacy policy dialogs

use crate::page::Page;
use receiptdesk_core::{ModalKind, PageAction};

impl Page {
    pub fn open_terms(&mut self) -> PageAction {
        self.open_modal(ModalKind::Terms);
        PageAction::None
    }

    pub fn open_privacy(&mut self) -> PageAction {
        self.open_modal(ModalKind::Privacy);
        PageAction::None
    }

    pub async fn accept_terms(&mut self) -> PageAction {
        match self.preferences.record_tos_agreement(self.session()).await {
            Ok(_) => {
                self.close_modal(ModalKind::Terms);
            }
            Err(e) => self.fail("record_tos_agreement", e),
        }
        PageAction::None
    }

    pub async fn terms_accepted(&self) -> bool {
        self.preferences.tos_agreed(self.session()).await
    }
}
