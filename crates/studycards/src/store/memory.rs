//! In-process remote store.
//!
//! Behaves like the hosted table for the operations the card manager uses:
//! ids are assigned on create, list honors `max_records`, and deleting an
//! unknown id is answered with `deleted: false`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tracing::debug;

use super::{DeleteReceipt, ListQuery, RemoteStore};
use crate::card::{CardFields, CardId, FieldsPatch, StudyCard};
use crate::error::{Error, Result};

/// A remote store backed by a vector in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<StudyCard>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records.
    #[must_use]
    pub fn with_records(records: Vec<StudyCard>) -> Self {
        Self {
            records: Mutex::new(records),
            next_id: AtomicU64::new(0),
        }
    }

    /// A copy of every stored record, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store's lock is poisoned.
    pub fn snapshot(&self) -> Result<Vec<StudyCard>> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<StudyCard>>> {
        self.records
            .lock()
            .map_err(|_| Error::internal("memory store lock poisoned"))
    }

    /// Next generated id not already held by a stored record.
    fn assign_id(&self, records: &[StudyCard]) -> CardId {
        loop {
            let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
            let id = CardId::new(format!("rec{n:014}"));
            if records.iter().all(|record| record.id != id) {
                return id;
            }
        }
    }
}

#[async_trait::async_trait]
impl RemoteStore for MemoryStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<StudyCard>> {
        let records = self.lock()?;
        Ok(records.iter().take(query.max_records).cloned().collect())
    }

    async fn create(&self, fields: &CardFields) -> Result<StudyCard> {
        let mut records = self.lock()?;
        let card = StudyCard {
            id: self.assign_id(&records),
            created_time: Some(Utc::now()),
            fields: fields.clone(),
        };
        debug!("Created record {}", card.id);
        records.push(card.clone());
        Ok(card)
    }

    async fn patch(&self, id: &CardId, fields: &FieldsPatch) -> Result<StudyCard> {
        let mut records = self.lock()?;
        let record = records
            .iter_mut()
            .find(|record| &record.id == id)
            .ok_or(Error::UnexpectedStatus {
                operation: "patch",
                status: 404,
            })?;
        fields.apply_to(&mut record.fields);
        Ok(record.clone())
    }

    async fn delete(&self, id: &CardId) -> Result<DeleteReceipt> {
        let mut records = self.lock()?;
        let before = records.len();
        records.retain(|record| &record.id != id);
        Ok(DeleteReceipt {
            id: id.clone(),
            deleted: records.len() < before,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_assigns_unique_ids() {
        let store = MemoryStore::new();
        let a = store.create(&CardFields::new("A", "a")).await.unwrap();
        let b = store.create(&CardFields::new("B", "b")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert!(a.id.as_str().starts_with("rec"));
        assert!(a.created_time.is_some());
        assert_eq!(store.snapshot().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_skips_seeded_ids() {
        let seeded = StudyCard::new("rec00000000000001", CardFields::new("Seed", "s"));
        let store = MemoryStore::with_records(vec![seeded.clone()]);

        let created = store.create(&CardFields::new("A", "a")).await.unwrap();

        assert_ne!(created.id, seeded.id);
        assert_eq!(created.id, CardId::from("rec00000000000002"));
        assert!(store.delete(&created.id).await.unwrap().deleted);
        assert_eq!(store.snapshot().unwrap(), vec![seeded]);
    }

    #[tokio::test]
    async fn test_list_honors_max_records() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store
                .create(&CardFields::new(format!("card {i}"), "notes"))
                .await
                .unwrap();
        }

        let query = ListQuery {
            max_records: 3,
            view: None,
        };
        let cards = store.list(&query).await.unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].fields.name, "card 0");
    }

    #[tokio::test]
    async fn test_patch_merges_fields() {
        let store = MemoryStore::new();
        let card = store.create(&CardFields::new("A", "a")).await.unwrap();

        let patch = FieldsPatch {
            memorized: Some(true),
            ..FieldsPatch::default()
        };
        let updated = store.patch(&card.id, &patch).await.unwrap();

        assert_eq!(updated.fields.name, "A");
        assert!(updated.fields.memorized);
    }

    #[tokio::test]
    async fn test_patch_unknown_id_is_404() {
        let store = MemoryStore::new();
        let err = store
            .patch(&CardId::from("recMissing"), &FieldsPatch::text("a", "b"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let store = MemoryStore::new();
        let card = store.create(&CardFields::new("A", "a")).await.unwrap();

        assert!(store.delete(&card.id).await.unwrap().deleted);
        assert!(!store.delete(&card.id).await.unwrap().deleted);
        assert!(store.snapshot().unwrap().is_empty());
    }
}
