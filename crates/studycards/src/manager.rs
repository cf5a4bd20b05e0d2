//! The card manager: form state plus the loaded card list.
//!
//! Each operation issues at most one remote call, waits for it, and only
//! then applies the result to the list. Failures are logged and returned;
//! they never change local state. Operations take `&mut self`, so two
//! operations on the same manager cannot interleave.

use tracing::{debug, error, info, warn};

use crate::card::{CardId, CardList, FieldsPatch, StudyCard};
use crate::error::{Error, Result};
use crate::form::FormState;
use crate::store::{ListQuery, RemoteStore};

/// View-model over a remote card table.
#[derive(Debug)]
pub struct CardManager<S> {
    store: S,
    query: ListQuery,
    cards: CardList,
    form: FormState,
}

/// Log a failed remote operation and pass the result through unchanged.
fn logged<T>(action: &str, result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        error!("Unable to {action}: {err}");
    }
    result
}

impl<S: RemoteStore> CardManager<S> {
    /// Create a manager with the default list query.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_query(store, ListQuery::default())
    }

    /// Create a manager that loads with the given query.
    #[must_use]
    pub fn with_query(store: S, query: ListQuery) -> Self {
        Self {
            store,
            query,
            cards: CardList::new(),
            form: FormState::new(),
        }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The loaded cards.
    #[must_use]
    pub fn cards(&self) -> &CardList {
        &self.cards
    }

    /// The current form.
    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Mutable access to the form's text fields.
    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    /// Cards that have been memorized.
    #[must_use]
    pub fn memorized_cards(&self) -> Vec<&StudyCard> {
        self.cards.memorized()
    }

    /// Cards that have not been memorized yet.
    #[must_use]
    pub fn unmemorized_cards(&self) -> Vec<&StudyCard> {
        self.cards.unmemorized()
    }

    /// Fetch the existing cards and replace the list with them.
    ///
    /// An empty result counts as a failure and leaves the list as it was.
    ///
    /// # Errors
    ///
    /// Returns the store's error, or `Error::NoRecords` for an empty table.
    pub async fn load(&mut self) -> Result<usize> {
        let records = logged("retrieve study cards", self.store.list(&self.query).await)?;
        if records.is_empty() {
            return logged("retrieve study cards", Err(Error::NoRecords));
        }

        let count = records.len();
        self.cards.set_cards(records);
        info!("Loaded {count} study cards");
        Ok(count)
    }

    /// Create a card from the form.
    ///
    /// Does nothing and returns `Ok(None)` if either text field is empty.
    /// On success the new card is appended and the form is cleared.
    ///
    /// # Errors
    ///
    /// Returns the store's error; the list and form are left unchanged.
    pub async fn save(&mut self) -> Result<Option<StudyCard>> {
        if !self.form.is_complete() {
            debug!("Skipping save: name or notes is empty");
            return Ok(None);
        }

        let fields = self.form.to_new_fields();
        let card = logged("save card", self.store.create(&fields).await)?;

        self.cards.push(card.clone());
        self.form.clear();
        info!("Saved card {}", card.id);
        Ok(Some(card))
    }

    /// Send a card's full field set, carrying its memorized flag as given.
    ///
    /// # Errors
    ///
    /// Returns the store's error; the list and form are left unchanged.
    pub async fn set_memorized(&mut self, card: &StudyCard) -> Result<StudyCard> {
        let patch = FieldsPatch::from(&card.fields);
        self.apply_patch(&card.id, &patch).await
    }

    /// Flip the memorized flag of a loaded card.
    ///
    /// # Errors
    ///
    /// Returns `Error::CardNotFound` if the id is not loaded, otherwise the
    /// store's error.
    pub async fn toggle_memorized(&mut self, id: &CardId) -> Result<StudyCard> {
        let mut card = self
            .cards
            .get(id)
            .cloned()
            .ok_or_else(|| Error::CardNotFound { id: id.clone() })?;
        card.fields.memorized = !card.fields.memorized;
        self.set_memorized(&card).await
    }

    /// Bind the form to a card and copy its text into it.
    pub fn begin_edit(&mut self, card: &StudyCard) {
        debug!("Editing card {}", card.id);
        self.form.begin_edit(card);
    }

    /// Send the form's text to the card being edited.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotEditing` without a remote call if no card is being
    /// edited, otherwise the store's error.
    pub async fn update(&mut self) -> Result<StudyCard> {
        let id = self.form.edit_mode.clone().ok_or(Error::NotEditing)?;
        let patch = self.form.to_patch();
        self.apply_patch(&id, &patch).await
    }

    /// Leave edit-mode and clear the form.
    pub fn cancel_edit(&mut self) {
        self.form.reset();
    }

    /// Delete a card and drop it from the list once the store confirms.
    ///
    /// # Errors
    ///
    /// Returns the store's error, or `Error::DeleteNotConfirmed` if the store
    /// answered without confirming.
    pub async fn delete(&mut self, id: &CardId) -> Result<()> {
        let receipt = logged("delete card", self.store.delete(id).await)?;
        if !receipt.deleted {
            return logged(
                "delete card",
                Err(Error::DeleteNotConfirmed { id: id.clone() }),
            );
        }

        let removed = self.cards.remove(id);
        info!("Deleted card {id} ({removed} local entries removed)");
        Ok(())
    }

    /// Reset the form's text fields.
    pub fn clear_form(&mut self) {
        self.form.clear();
    }

    /// Shared update path for edits and memorized toggles.
    ///
    /// On success the matching entry is replaced with the server's copy and
    /// the form leaves edit-mode.
    async fn apply_patch(&mut self, id: &CardId, patch: &FieldsPatch) -> Result<StudyCard> {
        let card = logged("update card", self.store.patch(id, patch).await)?;

        if !self.cards.replace(&card) {
            warn!("Updated card {} is not in the loaded list", card.id);
        }
        self.form.reset();
        info!("Updated card {}", card.id);
        Ok(card)
    }
}
