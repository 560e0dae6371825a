//! Form values and per-field validation errors.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::entity::ItemId;

/// Raw string values of a form, keyed by field name
///
/// The identifier of the item being edited is kept alongside the fields
/// but is never rendered as an input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    id: Option<ItemId>,
    fields: BTreeMap<String, String>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.fields.insert(name.to_string(), value.into());
    }

    /// Empty string for a field that was never set
    pub fn get(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    /// Trimmed value parsed as `T`
    pub fn parse<T: FromStr>(&self, name: &str) -> Option<T> {
        self.get(name).trim().parse().ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Validation errors in schema field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn remove(&mut self, field: &str) {
        self.0.retain(|e| e.field != field);
    }

    /// First message recorded for `field`
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_field_reads_empty() {
        let values = FormValues::new().with("name", "Drinks");
        assert_eq!(values.get("name"), "Drinks");
        assert_eq!(values.get("order"), "");
        assert_eq!(values.id(), None);
    }

    #[test]
    fn test_parse_trims() {
        let values = FormValues::new().with("price", " 9.99 ");
        assert_eq!(values.parse::<f64>("price"), Some(9.99));
        assert_eq!(values.parse::<i64>("price"), None);
    }

    #[test]
    fn test_field_errors_display() {
        let mut errors = FieldErrors::default();
        errors.push("name", "Category name is required");
        errors.push("order", "Order must be 0 or greater");
        assert_eq!(errors.get("order"), Some("Order must be 0 or greater"));
        assert_eq!(
            errors.to_string(),
            "Category name is required; Order must be 0 or greater"
        );
        assert!(errors.into_result().is_err());
    }
}
