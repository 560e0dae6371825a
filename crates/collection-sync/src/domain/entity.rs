//! Domain Layer - Core Resource Traits
//!
//! Contract shared by every collection the controller can keep in sync.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::form::{FieldErrors, FormValues};
use super::schema::EntitySchema;

/// Server-assigned identifier (wire name `_id`)
pub type ItemId = String;

/// An item of a remote collection
///
/// The identifier doubles as the client-side display key. Items are plain
/// data and may be handed to reactive views.
pub trait Resource:
    Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Body submitted on create and update
    type Draft: Draft;

    fn schema() -> &'static EntitySchema;

    fn id(&self) -> &str;

    /// Human-readable name, e.g. in the delete prompt
    fn label(&self) -> &str;

    /// Form values for an edit session, identifier included
    fn to_form(&self) -> FormValues;

    /// Display text for a table column
    fn cell(&self, column: &str) -> String;
}

/// Submission shape of a [`Resource`]
pub trait Draft: Clone + Debug + PartialEq + Serialize + 'static {
    /// `None` for a new item
    fn id(&self) -> Option<&str>;

    /// Validate string form values and coerce them into a request body.
    fn from_form(values: &FormValues) -> Result<Self, FieldErrors>;

    fn to_form(&self) -> FormValues;
}
