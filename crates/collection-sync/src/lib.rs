//! Collection Sync
//!
//! Keeps a client-side snapshot of a remote REST collection consistent with
//! the server across list, create, update and delete.
//!
//! Layered architecture:
//! - domain: entities, drafts, schema descriptors and form validation
//! - repository: remote collection abstraction and its HTTP implementation
//! - controller: snapshot, edit session and submission state per collection

pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod repository;

mod timeout;

pub use config::ApiConfig;
pub use controller::{
    delete_prompt, CollectionController, ConfirmPrompt, FormState, ListenerId, LoadOutcome, Notice,
    Removal, Row, SessionState, Snapshot, SyncEvent, DELETE_PROMPT,
};
pub use domain::{
    Category, CategoryDraft, CategoryRef, Draft, EntitySchema, FieldErrors, FormValues, ItemId,
    Product, ProductDraft, Resource,
};
pub use error::{ConfigError, FailureKind, RequestError, SyncError, SyncResult};
pub use repository::{HttpCollection, RemoteCollection};
