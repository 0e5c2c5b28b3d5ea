//! Inline field editing
//!
//! A field flips into edit mode with its original text; committing yields
//! the new text only when it actually changed.

/// One field being edited in place
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineEdit<K> {
    pub key: K,
    pub original: String,
    pub draft: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineEditor<K> {
    editing: Option<InlineEdit<K>>,
}

impl<K> Default for InlineEditor<K> {
    fn default() -> Self {
        Self { editing: None }
    }
}

impl<K: Clone + PartialEq> InlineEditor<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `key`. Any edit already open is discarded.
    pub fn begin(&mut self, key: K, original: impl Into<String>) {
        let original = original.into();
        self.editing = Some(InlineEdit {
            key,
            draft: original.clone(),
            original,
        });
    }

    pub fn is_editing(&self, key: &K) -> bool {
        self.editing.as_ref().map(|e| &e.key == key).unwrap_or(false)
    }

    pub fn current(&self) -> Option<&InlineEdit<K>> {
        self.editing.as_ref()
    }

    pub fn update(&mut self, draft: impl Into<String>) {
        if let Some(edit) = self.editing.as_mut() {
            edit.draft = draft.into();
        }
    }

    /// Leave edit mode; returns the key and trimmed value if it changed
    pub fn commit(&mut self) -> Option<(K, String)> {
        let edit = self.editing.take()?;
        let value = edit.draft.trim().to_string();
        if value == edit.original {
            None
        } else {
            Some((edit.key, value))
        }
    }

    /// Leave edit mode, returning the original text to restore
    pub fn cancel(&mut self) -> Option<(K, String)> {
        self.editing.take().map(|edit| (edit.key, edit.original))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_returns_changed_value() {
        let mut editor = InlineEditor::new();
        editor.begin(("item-1", "description"), "Books");
        assert!(editor.is_editing(&("item-1", "description")));
        editor.update("  Books and toys ");
        assert_eq!(
            editor.commit(),
            Some((("item-1", "description"), "Books and toys".to_string()))
        );
        assert!(editor.current().is_none());
    }

    #[test]
    fn test_unchanged_commit_is_noop() {
        let mut editor = InlineEditor::new();
        editor.begin(7u32, "same");
        editor.update("same ");
        assert_eq!(editor.commit(), None);
    }

    #[test]
    fn test_cancel_restores_original() {
        let mut editor = InlineEditor::new();
        editor.begin(1u32, "old");
        editor.update("new");
        assert_eq!(editor.cancel(), Some((1, "old".to_string())));
        assert_eq!(editor.commit(), None);
    }
}
