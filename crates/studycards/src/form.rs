//! Transient form state for creating and editing cards.

use crate::card::{CardFields, CardId, FieldsPatch, StudyCard};

/// The text being entered plus which card, if any, the form is editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    /// Name being entered.
    pub name: String,
    /// Notes being entered.
    pub notes: String,
    /// Identifier of the card being edited, or `None` for a new card.
    pub edit_mode: Option<CardId>,
}

impl FormState {
    /// Create an empty form for a new card.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether both required text fields have content.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.notes.is_empty()
    }

    /// Whether the form is bound to an existing card.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.edit_mode.is_some()
    }

    /// Copy a card's text into the form and bind the form to it.
    pub fn begin_edit(&mut self, card: &StudyCard) {
        self.edit_mode = Some(card.id.clone());
        self.name.clone_from(&card.fields.name);
        self.notes.clone_from(&card.fields.notes);
    }

    /// Reset the text fields. Edit-mode is left alone.
    pub fn clear(&mut self) {
        self.name.clear();
        self.notes.clear();
    }

    /// Unbind from any card and reset the text fields.
    pub fn reset(&mut self) {
        self.edit_mode = None;
        self.clear();
    }

    /// Fields for a new card built from the form.
    #[must_use]
    pub fn to_new_fields(&self) -> CardFields {
        CardFields::new(self.name.clone(), self.notes.clone())
    }

    /// A text-only patch built from the form.
    #[must_use]
    pub fn to_patch(&self) -> FieldsPatch {
        FieldsPatch::text(self.name.clone(), self.notes.clone())
    }
}
