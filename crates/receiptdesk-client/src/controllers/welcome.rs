//! Welcome dialog and its "don't show again" preference

use crate::page::Page;
use receiptdesk_core::{ModalKind, PageAction, PersistTier};

impl Page {
    /// Show the welcome dialog once per session while the preference says
    /// so. Returns whether it was opened.
    pub async fn show_welcome_if_needed(&mut self) -> bool {
        if self.session_flags.welcome_shown() {
            return false;
        }
        let show = self.preferences.load_show_welcome(self.session()).await;
        if !show {
            return false;
        }
        self.open_modal(ModalKind::Welcome);
        self.session_flags.mark_welcome_shown();
        true
    }

    pub async fn dismiss_welcome(&mut self, dont_show_again: bool) -> PageAction {
        self.close_modal(ModalKind::Welcome);
        if dont_show_again {
            self.set_welcome_preference(false).await;
        }
        PageAction::None
    }

    /// Persist the preference through the server, local, cookie chain
    pub async fn set_welcome_preference(&mut self, show: bool) -> Option<PersistTier> {
        match self.preferences.save_show_welcome(self.session(), show).await {
            Ok(tier) => {
                log::info!("Welcome preference stored ({:?})", tier);
                Some(tier)
            }
            Err(e) => {
                self.fail("save_welcome_preference", e);
                None
            }
        }
    }

    pub async fn welcome_preference(&self) -> bool {
        self.preferences.load_show_welcome(self.session()).await
    }
}
