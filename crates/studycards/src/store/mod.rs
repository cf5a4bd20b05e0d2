//! Remote store abstraction.
//!
//! This module defines the four record operations the card manager needs
//! from the hosted table. `AirtableStore` talks to the real service over
//! HTTP; `MemoryStore` keeps records in process for tests and offline use.

pub mod airtable;
pub mod memory;

use serde::{Deserialize, Serialize};

use crate::card::{CardFields, CardId, FieldsPatch, StudyCard};
use crate::error::Result;

pub use airtable::AirtableStore;
pub use memory::MemoryStore;

/// Default number of records fetched on load.
pub const DEFAULT_MAX_RECORDS: usize = 20;

/// Default view used when listing records.
pub const DEFAULT_VIEW: &str = "Main View";

/// Parameters for a list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Maximum number of records to return.
    pub max_records: usize,
    /// Name of the table view to read from.
    pub view: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            max_records: DEFAULT_MAX_RECORDS,
            view: Some(DEFAULT_VIEW.to_string()),
        }
    }
}

/// Body returned by a delete request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteReceipt {
    /// Identifier of the record the request targeted.
    pub id: CardId,
    /// Whether the store confirmed the deletion.
    pub deleted: bool,
}

/// A hosted table of study card records.
///
/// Implementations report every non-success answer as an error; they never
/// retry.
#[async_trait::async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch up to `query.max_records` records.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is malformed.
    async fn list(&self, query: &ListQuery) -> Result<Vec<StudyCard>>;

    /// Create a record with the given fields and return it with its new id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is malformed.
    async fn create(&self, fields: &CardFields) -> Result<StudyCard>;

    /// Update the given fields of a record and return the whole record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is malformed.
    async fn patch(&self, id: &CardId, fields: &FieldsPatch) -> Result<StudyCard>;

    /// Delete a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is malformed.
    async fn delete(&self, id: &CardId) -> Result<DeleteReceipt>;
}
