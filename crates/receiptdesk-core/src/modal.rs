//! Modal dialog lifecycle
//!
//! Every dialog is either closed or open. Page-level Escape and
//! outside-click events are fanned out to whichever dialogs are open; the
//! caller resets the forms of the dialogs that were closed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalKind {
    PdfReceipt,
    Organization,
    Logo,
    EmailSettings,
    EmailSend,
    Items,
    Welcome,
    Terms,
    Privacy,
    Feedback,
}

impl std::fmt::Display for ModalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ModalKind::PdfReceipt => "pdf_receipt",
            ModalKind::Organization => "organization",
            ModalKind::Logo => "logo",
            ModalKind::EmailSettings => "email_settings",
            ModalKind::EmailSend => "email_send",
            ModalKind::Items => "items",
            ModalKind::Welcome => "welcome",
            ModalKind::Terms => "terms",
            ModalKind::Privacy => "privacy",
            ModalKind::Feedback => "feedback",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModalState {
    Closed,
    Open,
}

/// A dialog form that can be put back into its pristine state
pub trait ModalForm {
    fn reset(&mut self);
}

impl<T: Default> ModalForm for T {
    fn reset(&mut self) {
        *self = T::default();
    }
}

/// Tracks which dialogs are open
#[derive(Debug, Clone, Default)]
pub struct ModalRegistry {
    open: BTreeSet<ModalKind>,
}

impl ModalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, kind: ModalKind) -> ModalState {
        if self.open.contains(&kind) {
            ModalState::Open
        } else {
            ModalState::Closed
        }
    }

    pub fn is_open(&self, kind: ModalKind) -> bool {
        self.open.contains(&kind)
    }

    /// Returns false if the dialog was already open
    pub fn open(&mut self, kind: ModalKind) -> bool {
        let opened = self.open.insert(kind);
        if opened {
            log::debug!("Modal opened: {}", kind);
        }
        opened
    }

    /// Returns false if the dialog was already closed
    pub fn close(&mut self, kind: ModalKind) -> bool {
        let closed = self.open.remove(&kind);
        if closed {
            log::debug!("Modal closed: {}", kind);
        }
        closed
    }

    pub fn visible(&self) -> Vec<ModalKind> {
        self.open.iter().copied().collect()
    }

    /// Page scrolling is suppressed while any dialog is open
    pub fn scroll_locked(&self) -> bool {
        !self.open.is_empty()
    }

    /// Escape closes every visible dialog
    pub fn escape(&mut self) -> Vec<ModalKind> {
        let closed = self.visible();
        self.open.clear();
        closed
    }

    /// A click on a dialog's backdrop closes that dialog
    pub fn outside_click(&mut self, kind: ModalKind) -> bool {
        self.close(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_close_cycle() {
        let mut modals = ModalRegistry::new();
        assert_eq!(modals.state(ModalKind::Logo), ModalState::Closed);
        assert!(modals.open(ModalKind::Logo));
        assert!(!modals.open(ModalKind::Logo));
        assert!(modals.scroll_locked());
        assert!(modals.close(ModalKind::Logo));
        assert!(!modals.close(ModalKind::Logo));
        assert!(!modals.scroll_locked());
    }

    #[test]
    fn test_escape_closes_all_visible() {
        let mut modals = ModalRegistry::new();
        modals.open(ModalKind::Welcome);
        modals.open(ModalKind::Terms);
        let closed = modals.escape();
        assert_eq!(closed, vec![ModalKind::Welcome, ModalKind::Terms]);
        assert!(modals.visible().is_empty());
        assert!(modals.escape().is_empty());
    }

    #[test]
    fn test_outside_click_only_closes_target() {
        let mut modals = ModalRegistry::new();
        modals.open(ModalKind::Welcome);
        modals.open(ModalKind::Privacy);
        assert!(modals.outside_click(ModalKind::Privacy));
        assert!(modals.is_open(ModalKind::Welcome));
        assert!(!modals.outside_click(ModalKind::Feedback));
    }

    #[test]
    fn test_form_reset() {
        #[derive(Default)]
        struct Form {
            email: String,
        }
        let mut form = Form { email: "x@y.org".to_string() };
        form.reset();
        assert!(form.email.is_empty());
    }
}
