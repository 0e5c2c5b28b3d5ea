//! Organization profile dialog

use crate::page::Page;
use receiptdesk_core::{ModalKind, PageAction};

impl Page {
    /// Open the dialog with the current organization, if one exists
    pub async fn open_organization(&mut self) -> PageAction {
        self.open_modal(ModalKind::Organization);

        match self.client.current_organization().await {
            Ok(Some(org)) => {
                self.current_organization_id = org.id;
                self.organization_form.populate(&org);
            }
            Ok(None) => {
                log::debug!("No organization saved yet");
                self.current_organization_id = None;
            }
            Err(e) => self.fail("load_organization", e),
        }
        PageAction::None
    }

    /// Validate and save the form. An existing organization is updated in
    /// place, otherwise a new one is created.
    pub async fn save_organization(&mut self) -> PageAction {
        let org = match self.organization_form.validate(self.current_organization_id) {
            Ok(org) => org,
            Err(e) => {
                self.notifier.report(&e);
                return PageAction::None;
            }
        };

        let saved = match self.current_organization_id {
            Some(id) => self.client.update_organization(id, &org).await,
            None => self.client.create_organization(&org).await,
        };

        match saved {
            Ok(saved) => {
                self.current_organization_id = saved.id.or(self.current_organization_id);
                self.notifier.success("Organization details saved successfully");
                self.close_modal(ModalKind::Organization);
                PageAction::Reload
            }
            Err(e) => {
                self.fail("save_organization", e);
                PageAction::None
            }
        }
    }
}
