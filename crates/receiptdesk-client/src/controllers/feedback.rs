use crate::page::Page;
use receiptdesk_core::{ModalForm, ModalKind, PageAction};

impl Page {
    pub fn open_feedback(&mut self) -> PageAction {
        self.open_modal(ModalKind::Feedback);
        PageAction::None
    }

    pub async fn submit_feedback(&mut self) -> PageAction {
        let feedback = match self.feedback_form.validate() {
            Ok(feedback) => feedback,
            Err(e) => {
                self.notifier.report(&e);
                return PageAction::None;
            }
        };

        match self.client.submit_feedback(&feedback).await {
            Ok(_) => {
                self.notifier.success("Thank you for your feedback!");
                self.close_modal(ModalKind::Feedback);
            }
            Err(e) => self.fail("submit_feedback", e),
        }
        PageAction::None
    }

    pub async fn submit_beta_signup(&mut self) -> PageAction {
        let signup = match self.beta_form.validate() {
            Ok(signup) => signup,
            Err(e) => {
                self.notifier.report(&e);
                return PageAction::None;
            }
        };

        match self.client.submit_beta_signup(&signup).await {
            Ok(_) => {
                self.notifier.success("Thanks for signing up! We'll be in touch.");
                self.beta_form.reset();
            }
            Err(e) => self.fail("submit_beta_signup", e),
        }
        PageAction::None
    }
}
