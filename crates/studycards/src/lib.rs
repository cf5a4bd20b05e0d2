//! `studycards` - A flashcard manager backed by a hosted spreadsheet table
//!
//! This library provides the card manager view-model, the remote store
//! abstraction it talks to, and the configuration and logging used by the
//! `studycards` binary.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod card;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod manager;
pub mod store;

pub use card::{CardFields, CardId, CardList, FieldsPatch, StudyCard};
pub use config::{Config, RemoteConfig};
pub use error::{Error, Result};
pub use form::FormState;
pub use logging::init_logging;
pub use manager::CardManager;
pub use store::{AirtableStore, DeleteReceipt, ListQuery, MemoryStore, RemoteStore};
