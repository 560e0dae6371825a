//! Product Entity
//!
//! Products belong to a category. The server may return the category either
//! as a bare identifier or expanded with its name.

use serde::{Deserialize, Serialize};

use super::entity::{Draft, ItemId, Resource};
use super::form::{FieldErrors, FormValues};
use super::lenient;
use super::schema::{ColumnSpec, EntitySchema, FieldKind, FieldSpec, Rule};

pub static PRODUCT_SCHEMA: EntitySchema = EntitySchema {
    name: "Product",
    path: "product",
    fields: &[
        FieldSpec {
            name: "code",
            label: "Product code",
            kind: FieldKind::Text,
            default: "",
            rules: &[Rule::Required, Rule::MinLength(2)],
        },
        FieldSpec {
            name: "name",
            label: "Product name",
            kind: FieldKind::Text,
            default: "",
            rules: &[Rule::Required, Rule::MinLength(2)],
        },
        FieldSpec {
            name: "description",
            label: "Description",
            kind: FieldKind::TextArea,
            default: "",
            rules: &[Rule::Required, Rule::MinLength(10)],
        },
        FieldSpec {
            name: "price",
            label: "Price",
            kind: FieldKind::Decimal,
            default: "0",
            rules: &[Rule::Required, Rule::Min(0.0)],
        },
        FieldSpec {
            name: "category",
            label: "Category",
            kind: FieldKind::Reference { path: "category" },
            default: "",
            rules: &[Rule::Required],
        },
    ],
    columns: &[
        ColumnSpec { key: "code", header: "Code", width: 120 },
        ColumnSpec { key: "name", header: "Name", width: 180 },
        ColumnSpec { key: "price", header: "Price", width: 100 },
        ColumnSpec { key: "category", header: "Category", width: 150 },
    ],
};

/// Category as embedded in a product row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(ItemId),
    Expanded(CategorySummary),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    #[serde(rename = "_id")]
    pub id: ItemId,
    #[serde(default)]
    pub name: String,
}

impl CategoryRef {
    pub fn id(&self) -> &str {
        match self {
            CategoryRef::Id(id) => id,
            CategoryRef::Expanded(summary) => &summary.id,
        }
    }

    /// Denormalized name, only present on expanded references
    pub fn name(&self) -> Option<&str> {
        match self {
            CategoryRef::Id(_) => None,
            CategoryRef::Expanded(summary) => Some(&summary.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ItemId,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::f64_or_text")]
    pub price: f64,
    #[serde(default)]
    pub category: Option<CategoryRef>,
}

impl Product {
    pub fn category_id(&self) -> Option<&str> {
        self.category.as_ref().map(CategoryRef::id)
    }
}

impl Resource for Product {
    type Draft = ProductDraft;

    fn schema() -> &'static EntitySchema {
        &PRODUCT_SCHEMA
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
            .with("code", self.code.clone())
            .with("name", self.name.clone())
            .with("description", self.description.clone())
            .with("price", self.price.to_string())
            .with("category", self.category_id().unwrap_or_default())
    }

    fn cell(&self, column: &str) -> String {
        match column {
            "code" => self.code.clone(),
            "name" => self.name.clone(),
            "description" => self.description.clone(),
            "price" => format!("{:.2}", self.price),
            "category" => match &self.category {
                Some(c) => c.name().unwrap_or(c.id()).to_string(),
                None => String::new(),
            },
            _ => String::new(),
        }
    }
}

/// Body of `POST /product` and `PUT /product`
///
/// `price` is always a JSON number and `category` always a bare identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDraft {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub code: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: ItemId,
}

impl ProductDraft {
    pub fn for_item(mut self, id: impl Into<ItemId>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl Draft for ProductDraft {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn from_form(values: &FormValues) -> Result<Self, FieldErrors> {
        PRODUCT_SCHEMA.validate(values)?;
        Ok(Self {
            id: values.id().map(str::to_string),
            code: values.get("code").trim().to_string(),
            name: values.get("name").trim().to_string(),
            description: values.get("description").trim().to_string(),
            price: values.parse("price").unwrap_or_default(),
            category: values.get("category").trim().to_string(),
        })
    }

    fn to_form(&self) -> FormValues {
        let values = FormValues::new()
            .with("code", self.code.clone())
            .with("name", self.name.clone())
            .with("description", self.description.clone())
            .with("price", self.price.to_string())
            .with("category", self.category.clone());
        match &self.id {
            Some(id) => values.with_id(id.clone()),
            None => values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(category: serde_json::Value) -> Product {
        serde_json::from_value(json!({
            "_id": "p1",
            "code": "DR-01",
            "name": "Cola",
            "description": "Sparkling soft drink",
            "price": "9.99",
            "category": category
        }))
        .unwrap()
    }

    #[test]
    fn test_category_reference_forms() {
        let bare = row(json!("c1"));
        assert_eq!(bare.category_id(), Some("c1"));
        assert_eq!(bare.cell("category"), "c1");

        let expanded = row(json!({ "_id": "c1", "name": "Drinks" }));
        assert_eq!(expanded.category_id(), Some("c1"));
        assert_eq!(expanded.cell("category"), "Drinks");

        assert_eq!(row(json!(null)).category, None);
    }

    #[test]
    fn test_edit_form_normalizes_category_and_price() {
        let product = row(json!({ "_id": "c1", "name": "Drinks" }));
        assert_eq!(product.price, 9.99);

        let form = product.to_form();
        assert_eq!(form.id(), Some("p1"));
        assert_eq!(form.get("category"), "c1");
        assert_eq!(form.get("price"), "9.99");
    }

    #[test]
    fn test_submitted_price_is_numeric() {
        let values = PRODUCT_SCHEMA
            .defaults()
            .with_id("p1")
            .with("code", "DR-01")
            .with("name", "Cola")
            .with("description", "Sparkling soft drink")
            .with("price", "9.99")
            .with("category", "c1");
        let draft = ProductDraft::from_form(&values).unwrap();
        let body = serde_json::to_value(&draft).unwrap();
        assert!(body["price"].is_number());
        assert_eq!(body["price"].as_f64(), Some(9.99));
        assert_eq!(body["category"], json!("c1"));
        assert_eq!(body["_id"], json!("p1"));
    }

    #[test]
    fn test_blank_form_reports_every_required_field() {
        let errors = ProductDraft::from_form(&PRODUCT_SCHEMA.defaults()).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["code", "name", "description", "category"]);
        assert_eq!(errors.get("category"), Some("Category is required"));
    }

    #[test]
    fn test_short_description() {
        let values = PRODUCT_SCHEMA
            .defaults()
            .with("code", "DR")
            .with("name", "Cola")
            .with("description", "fizzy")
            .with("category", "c1");
        let errors = ProductDraft::from_form(&values).unwrap_err();
        assert_eq!(
            errors.get("description"),
            Some("Description must be at least 10 characters")
        );
        assert_eq!(errors.len(), 1);
    }
}
