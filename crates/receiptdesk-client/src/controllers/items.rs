//! Transaction items dialog with inline editing

use crate::page::Page;
use receiptdesk_core::{ItemField, ModalKind, PageAction};

impl Page {
    pub async fn open_items(&mut self, transaction_id: &str) -> PageAction {
        self.open_modal(ModalKind::Items);
        self.items_form.transaction_id = Some(transaction_id.to_string());

        match self.client.transaction_items(transaction_id).await {
            Ok(items) => self.items_form.items = items,
            Err(e) => self.fail_for("load_items", transaction_id, e),
        }
        PageAction::None
    }

    pub fn begin_item_edit(&mut self, item_id: &str, field: ItemField) -> bool {
        self.items_form.begin_edit(item_id, field)
    }

    pub fn update_item_edit(&mut self, draft: &str) {
        self.items_form.editor.update(draft);
    }

    pub fn cancel_item_edit(&mut self) {
        self.items_form.editor.cancel();
    }

    /// Finish the open edit. Unchanged values are not sent; a rejected save
    /// restores the previous item.
    pub async fn commit_item_edit(&mut self) -> PageAction {
        let Some(transaction_id) = self.items_form.transaction_id.clone() else {
            self.items_form.editor.cancel();
            return PageAction::None;
        };
        let Some(((item_id, field), value)) = self.items_form.editor.commit() else {
            return PageAction::None;
        };

        let previous = self.items_form.items.clone();
        let item = match self.items_form.apply_edit(&item_id, field, &value) {
            Ok(item) => item,
            Err(e) => {
                self.items_form.items = previous;
                self.notifier.report(&e);
                return PageAction::None;
            }
        };

        match self
            .client
            .update_transaction_item(&transaction_id, &item)
            .await
        {
            Ok(saved) => {
                if let Some(slot) = self.items_form.items.iter_mut().find(|i| i.id == saved.id) {
                    *slot = saved;
                }
                self.notifier.success("Item updated");
            }
            Err(e) => {
                self.items_form.items = previous;
                self.fail_for("update_item", &transaction_id, e);
            }
        }
        PageAction::None
    }
}
