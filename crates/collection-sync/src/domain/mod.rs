//! Domain Layer
//!
//! Entities, their submission drafts and the schema descriptors that drive
//! form validation and table rendering. No I/O happens here.

mod category;
mod entity;
mod form;
mod lenient;
mod product;
mod schema;

pub use category::{Category, CategoryDraft, CATEGORY_SCHEMA};
pub use entity::{Draft, ItemId, Resource};
pub use form::{FieldError, FieldErrors, FormValues};
pub use product::{CategoryRef, CategorySummary, Product, ProductDraft, PRODUCT_SCHEMA};
pub use schema::{ColumnSpec, EntitySchema, FieldKind, FieldSpec, Rule};
