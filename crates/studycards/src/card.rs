//! Core card types for studycards.
//!
//! This module defines the study card record as the remote table stores it,
//! the partial field sets sent on update, and the in-memory card list with
//! its memorized/unmemorized views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque record identifier assigned by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Wrap an identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The user-visible fields of a study card.
///
/// The remote table omits unchecked checkboxes and empty cells, so every
/// field falls back to its default when missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardFields {
    /// The front of the card.
    #[serde(rename = "Name")]
    pub name: String,
    /// The back of the card.
    #[serde(rename = "Notes")]
    pub notes: String,
    /// Whether the card has been memorized.
    #[serde(rename = "Memorized")]
    pub memorized: bool,
    /// Attachment cells. Always sent empty, kept as raw JSON when read.
    #[serde(rename = "Attachments")]
    pub attachments: Vec<serde_json::Value>,
}

impl CardFields {
    /// Fields for a brand new card: not memorized, no attachments.
    #[must_use]
    pub fn new(name: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            notes: notes.into(),
            memorized: false,
            attachments: Vec::new(),
        }
    }
}

/// A partial set of card fields. Only fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldsPatch {
    /// New name.
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New notes.
    #[serde(rename = "Notes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// New memorized flag.
    #[serde(rename = "Memorized", skip_serializing_if = "Option::is_none")]
    pub memorized: Option<bool>,
    /// New attachments.
    #[serde(rename = "Attachments", skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<serde_json::Value>>,
}

impl FieldsPatch {
    /// A patch that only touches the text fields.
    #[must_use]
    pub fn text(name: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            notes: Some(notes.into()),
            ..Self::default()
        }
    }

    /// Apply this patch on top of existing fields.
    pub fn apply_to(&self, fields: &mut CardFields) {
        if let Some(name) = &self.name {
            fields.name.clone_from(name);
        }
        if let Some(notes) = &self.notes {
            fields.notes.clone_from(notes);
        }
        if let Some(memorized) = self.memorized {
            fields.memorized = memorized;
        }
        if let Some(attachments) = &self.attachments {
            fields.attachments.clone_from(attachments);
        }
    }
}

impl From<&CardFields> for FieldsPatch {
    fn from(fields: &CardFields) -> Self {
        Self {
            name: Some(fields.name.clone()),
            notes: Some(fields.notes.clone()),
            memorized: Some(fields.memorized),
            attachments: Some(fields.attachments.clone()),
        }
    }
}

/// A study card record as returned by the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyCard {
    /// Identifier assigned by the remote store.
    pub id: CardId,

    /// When the remote store created the record.
    #[serde(
        rename = "createdTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_time: Option<DateTime<Utc>>,

    /// The card's fields.
    #[serde(default)]
    pub fields: CardFields,
}

impl StudyCard {
    /// Create a card with the given id and fields.
    #[must_use]
    pub fn new(id: impl Into<CardId>, fields: CardFields) -> Self {
        Self {
            id: id.into(),
            created_time: None,
            fields,
        }
    }

    /// Whether the card has been memorized.
    #[must_use]
    pub fn is_memorized(&self) -> bool {
        self.fields.memorized
    }
}

/// The ordered in-memory list of cards.
///
/// Entries are only ever replaced wholesale with a server response. The
/// memorized and unmemorized views are recomputed on every read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardList {
    cards: Vec<StudyCard>,
}

impl CardList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole sequence.
    pub fn set_cards(&mut self, cards: Vec<StudyCard>) {
        self.cards = cards;
    }

    /// All cards in order.
    #[must_use]
    pub fn cards(&self) -> &[StudyCard] {
        &self.cards
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Find a card by identifier.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&StudyCard> {
        self.cards.iter().find(|card| &card.id == id)
    }

    /// Append a card.
    pub fn push(&mut self, card: StudyCard) {
        self.cards.push(card);
    }

    /// Replace every entry whose id matches `card.id`, keeping positions.
    ///
    /// Returns `true` if at least one entry was replaced.
    pub fn replace(&mut self, card: &StudyCard) -> bool {
        let mut replaced = false;
        let cards = std::mem::take(&mut self.cards)
            .into_iter()
            .map(|existing| {
                if existing.id == card.id {
                    replaced = true;
                    card.clone()
                } else {
                    existing
                }
            })
            .collect();
        self.set_cards(cards);
        replaced
    }

    /// Remove every entry with the given id.
    ///
    /// Returns the number of entries removed.
    pub fn remove(&mut self, id: &CardId) -> usize {
        let before = self.cards.len();
        let cards = std::mem::take(&mut self.cards)
            .into_iter()
            .filter(|card| &card.id != id)
            .collect();
        self.set_cards(cards);
        before - self.cards.len()
    }

    /// Cards that have been memorized.
    #[must_use]
    pub fn memorized(&self) -> Vec<&StudyCard> {
        self.cards.iter().filter(|card| card.is_memorized()).collect()
    }

    /// Cards that have not been memorized yet.
    #[must_use]
    pub fn unmemorized(&self) -> Vec<&StudyCard> {
        self.cards
            .iter()
            .filter(|card| !card.is_memorized())
            .collect()
    }
}

impl From<Vec<StudyCard>> for CardList {
    fn from(cards: Vec<StudyCard>) -> Self {
        Self { cards }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, name: &str, memorized: bool) -> StudyCard {
        let mut fields = CardFields::new(name, format!("{name} notes"));
        fields.memorized = memorized;
        StudyCard::new(id, fields)
    }

    #[test]
    fn test_deserialize_remote_record() {
        let json = r#"{
            "id": "recABC123",
            "createdTime": "2024-01-15T10:30:00.000Z",
            "fields": {"Name": "Ownership", "Notes": "One owner at a time", "Memorized": true}
        }"#;
        let card: StudyCard = serde_json::from_str(json).unwrap();

        assert_eq!(card.id, CardId::from("recABC123"));
        assert!(card.created_time.is_some());
        assert_eq!(card.fields.name, "Ownership");
        assert!(card.is_memorized());
        assert!(card.fields.attachments.is_empty());
    }

    #[test]
    fn test_deserialize_omitted_checkbox_defaults_false() {
        let json = r#"{"id": "rec1", "fields": {"Name": "A", "Notes": "B"}}"#;
        let card: StudyCard = serde_json::from_str(json).unwrap();
        assert!(!card.is_memorized());
        assert!(card.created_time.is_none());
    }

    #[test]
    fn test_deserialize_requires_id() {
        let json = r#"{"fields": {"Name": "A"}}"#;
        assert!(serde_json::from_str::<StudyCard>(json).is_err());
    }

    #[test]
    fn test_new_fields_payload_shape() {
        let value = serde_json::to_value(CardFields::new("Borrow", "Shared or unique")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "Name": "Borrow",
                "Notes": "Shared or unique",
                "Memorized": false,
                "Attachments": []
            })
        );
    }

    #[test]
    fn test_text_patch_only_sends_text() {
        let value = serde_json::to_value(FieldsPatch::text("A", "B")).unwrap();
        assert_eq!(value, serde_json::json!({"Name": "A", "Notes": "B"}));
    }

    #[test]
    fn test_patch_apply_to() {
        let mut fields = CardFields::new("A", "B");
        let patch = FieldsPatch {
            memorized: Some(true),
            ..FieldsPatch::default()
        };
        patch.apply_to(&mut fields);
        assert_eq!(fields.name, "A");
        assert!(fields.memorized);
    }

    #[test]
    fn test_views_partition_list() {
        let list = CardList::from(vec![
            card("rec1", "A", true),
            card("rec2", "B", false),
            card("rec3", "C", true),
            card("rec4", "D", false),
        ]);

        let memorized = list.memorized();
        let unmemorized = list.unmemorized();

        assert_eq!(memorized.len() + unmemorized.len(), list.len());
        for c in list.cards() {
            let in_memorized = memorized.iter().any(|m| m.id == c.id);
            let in_unmemorized = unmemorized.iter().any(|u| u.id == c.id);
            assert!(in_memorized ^ in_unmemorized);
        }
    }

    #[test]
    fn test_replace_keeps_positions() {
        let mut list = CardList::from(vec![
            card("rec1", "A", false),
            card("rec2", "B", false),
            card("rec3", "C", false),
        ]);

        assert!(list.replace(&card("rec2", "B2", true)));

        let names: Vec<_> = list.cards().iter().map(|c| c.fields.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B2", "C"]);
        assert!(!list.replace(&card("rec9", "Z", false)));
    }

    #[test]
    fn test_remove_by_id_not_by_name() {
        let mut list = CardList::from(vec![
            card("rec1", "Same", false),
            card("rec2", "Same", false),
        ]);

        assert_eq!(list.remove(&CardId::from("rec1")), 1);
        assert_eq!(list.len(), 1);
        assert_eq!(list.cards()[0].id, CardId::from("rec2"));
    }

    #[test]
    fn test_get_and_empty() {
        let mut list = CardList::new();
        assert!(list.is_empty());
        list.push(card("rec1", "A", false));
        assert!(list.get(&CardId::from("rec1")).is_some());
        assert!(list.get(&CardId::from("rec2")).is_none());
    }

    #[test]
    fn test_card_id_display() {
        assert_eq!(CardId::new("recQ").to_string(), "recQ");
    }
}
