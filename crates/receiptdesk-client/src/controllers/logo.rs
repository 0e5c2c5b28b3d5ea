//! Logo dialog
//!
//! Picking a file validates it and reads its dimensions for the preview;
//! an oversized image only warns there. The upload itself rejects it.

use crate::page::Page;
use receiptdesk_core::validation::{
    enforce_dimensions, preview_dimension_notice, read_image_dimensions, validate_logo_file,
};
use receiptdesk_core::{Logo, LogoFile, LogoPosition, ModalKind, PageAction};

impl Page {
    /// Open the dialog and load the stored logo without complaining when
    /// there is none
    pub async fn open_logo(&mut self) -> PageAction {
        self.open_modal(ModalKind::Logo);

        match self.client.current_logo().await {
            Ok(Some(logo)) => {
                self.logo_form.position = logo.position;
                self.logo_form.current = Some(logo);
            }
            Ok(None) => self.logo_form.current = None,
            Err(e) => self.fail("load_logo", e),
        }
        PageAction::None
    }

    /// Returns false when the file was rejected
    pub async fn select_logo_file(&mut self, file: LogoFile) -> bool {
        self.logo_form.selected = None;
        self.logo_form.dimensions = None;
        self.logo_form.warning = None;

        if let Err(e) = validate_logo_file(&file, &self.config.logo) {
            self.notifier.report(&e);
            return false;
        }

        let dims = match read_image_dimensions(file.bytes.clone()).await {
            Ok(dims) => dims,
            Err(e) => {
                self.fail("read_logo_dimensions", e);
                return false;
            }
        };

        if let Some(notice) = preview_dimension_notice(dims, &self.config.logo) {
            self.notifier.warning(notice.clone());
            self.logo_form.warning = Some(notice);
        }
        self.logo_form.dimensions = Some(dims);
        self.logo_form.selected = Some(file);
        true
    }

    pub fn set_logo_position(&mut self, position: LogoPosition) {
        self.logo_form.position = position;
    }

    pub async fn upload_logo(&mut self) -> PageAction {
        let (Some(file), Some(dims)) = (self.logo_form.selected.clone(), self.logo_form.dimensions)
        else {
            self.notifier.error("Please select a logo file to upload.");
            return PageAction::None;
        };

        if let Err(e) = enforce_dimensions(dims, &self.config.logo) {
            self.notifier.report(&e);
            return PageAction::None;
        }

        let logo = Logo {
            logo: file.bytes,
            width: dims.width,
            height: dims.height,
            position: self.logo_form.position,
            filename: file.name,
        };

        match self.client.upload_logo(&logo).await {
            Ok(_) => {
                self.notifier.success("Logo uploaded successfully");
                self.close_modal(ModalKind::Logo);
                PageAction::Reload
            }
            Err(e) => {
                self.fail("upload_logo", e);
                PageAction::None
            }
        }
    }

    pub async fn delete_logo(&mut self) -> PageAction {
        match self.client.delete_logo().await {
            Ok(_) => {
                self.logo_form.current = None;
                self.notifier.success("Logo deleted");
                PageAction::None
            }
            Err(e) => {
                self.fail("delete_logo", e);
                PageAction::None
            }
        }
    }
}
