//! Category Entity
//!
//! Categories group products and carry a display order.

use serde::{Deserialize, Serialize};

use super::entity::{Draft, ItemId, Resource};
use super::form::{FieldErrors, FormValues};
use super::lenient;
use super::schema::{ColumnSpec, EntitySchema, FieldKind, FieldSpec, Rule};

pub static CATEGORY_SCHEMA: EntitySchema = EntitySchema {
    name: "Category",
    path: "category",
    fields: &[
        FieldSpec {
            name: "name",
            label: "Category name",
            kind: FieldKind::Text,
            default: "",
            rules: &[Rule::Required, Rule::MinLength(2)],
        },
        FieldSpec {
            name: "order",
            label: "Order",
            kind: FieldKind::Integer,
            default: "0",
            rules: &[Rule::Required, Rule::Min(0.0)],
        },
    ],
    columns: &[
        ColumnSpec { key: "name", header: "Name", width: 150 },
        ColumnSpec { key: "order", header: "Order", width: 150 },
    ],
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: ItemId,
    pub name: String,
    #[serde(default, deserialize_with = "lenient::i64_or_text")]
    pub order: i64,
}

impl Category {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, order: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            order,
        }
    }
}

impl Resource for Category {
    type Draft = CategoryDraft;

    fn schema() -> &'static EntitySchema {
        &CATEGORY_SCHEMA
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with_id(self.id.clone())
            .with("name", self.name.clone())
            .with("order", self.order.to_string())
    }

    fn cell(&self, column: &str) -> String {
        match column {
            "name" => self.name.clone(),
            "order" => self.order.to_string(),
            _ => String::new(),
        }
    }
}

/// Body of `POST /category` and `PUT /category`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDraft {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub name: String,
    pub order: i64,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>, order: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            order,
        }
    }

    /// Replacement body for an existing category
    pub fn for_item(mut self, id: impl Into<ItemId>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl Draft for CategoryDraft {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn from_form(values: &FormValues) -> Result<Self, FieldErrors> {
        CATEGORY_SCHEMA.validate(values)?;
        Ok(Self {
            id: values.id().map(str::to_string),
            name: values.get("name").trim().to_string(),
            order: values.parse("order").unwrap_or_default(),
        })
    }

    fn to_form(&self) -> FormValues {
        let values = FormValues::new()
            .with("name", self.name.clone())
            .with("order", self.order.to_string());
        match &self.id {
            Some(id) => values.with_id(id.clone()),
            None => values,
        }
    }
}
