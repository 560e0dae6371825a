//! Entity schema descriptors
//!
//! A schema lists the form fields (with their validation rules) and the
//! table columns of one collection, so a single generic view can render any
//! entity.

use super::form::{FieldErrors, FormValues};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    Required,
    MinLength(usize),
    /// Inclusive lower bound for numeric fields
    Min(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Integer,
    Decimal,
    /// Identifier of an item in another collection, chosen from a list
    Reference { path: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub default: &'static str,
    pub rules: &'static [Rule],
}

impl FieldSpec {
    /// First violated rule, as a user-facing message.
    pub fn check(&self, raw: &str) -> Option<String> {
        let value = raw.trim();
        if value.is_empty() {
            return self
                .rules
                .contains(&Rule::Required)
                .then(|| format!("{} is required", self.label));
        }

        let number = match self.kind {
            FieldKind::Integer => match value.parse::<i64>() {
                Ok(n) => Some(n as f64),
                Err(_) => return Some(format!("{} must be a number", self.label)),
            },
            FieldKind::Decimal => match value.parse::<f64>() {
                Ok(n) if n.is_finite() => Some(n),
                _ => return Some(format!("{} must be a number", self.label)),
            },
            _ => None,
        };

        self.rules.iter().find_map(|rule| match *rule {
            Rule::Required => None,
            Rule::MinLength(min) => (value.chars().count() < min)
                .then(|| format!("{} must be at least {} characters", self.label, min)),
            Rule::Min(min) => number
                .filter(|n| *n < min)
                .map(|_| format!("{} must be {} or greater", self.label, min)),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub key: &'static str,
    pub header: &'static str,
    pub width: u32,
}

#[derive(Debug, PartialEq)]
pub struct EntitySchema {
    /// Singular display name, e.g. "Category"
    pub name: &'static str,
    /// Resource path below the API root, e.g. "category"
    pub path: &'static str,
    pub fields: &'static [FieldSpec],
    pub columns: &'static [ColumnSpec],
}

impl EntitySchema {
    /// Blank form
    pub fn defaults(&self) -> FormValues {
        self.fields
            .iter()
            .fold(FormValues::new(), |values, f| values.with(f.name, f.default))
    }

    pub fn validate(&self, values: &FormValues) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        for field in self.fields {
            if let Some(message) = field.check(values.get(field.name)) {
                errors.push(field.name, message);
            }
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRICE: FieldSpec = FieldSpec {
        name: "price",
        label: "Price",
        kind: FieldKind::Decimal,
        default: "0",
        rules: &[Rule::Required, Rule::Min(0.0)],
    };

    const NOTE: FieldSpec = FieldSpec {
        name: "note",
        label: "Note",
        kind: FieldKind::Text,
        default: "",
        rules: &[Rule::MinLength(3)],
    };

    #[test]
    fn test_required_reported_before_other_rules() {
        assert_eq!(PRICE.check("   "), Some("Price is required".to_string()));
    }

    #[test]
    fn test_numeric_checks() {
        assert_eq!(PRICE.check("abc"), Some("Price must be a number".to_string()));
        assert_eq!(PRICE.check("-1"), Some("Price must be 0 or greater".to_string()));
        assert_eq!(PRICE.check("9.99"), None);
        assert_eq!(PRICE.check("NaN"), Some("Price must be a number".to_string()));
    }

    #[test]
    fn test_optional_field_skips_rules_when_empty() {
        assert_eq!(NOTE.check(""), None);
        assert_eq!(
            NOTE.check("ab"),
            Some("Note must be at least 3 characters".to_string())
        );
    }

    #[test]
    fn test_schema_defaults_and_validate() {
        let schema = EntitySchema {
            name: "Thing",
            path: "thing",
            fields: &[PRICE, NOTE],
            columns: &[],
        };
        let defaults = schema.defaults();
        assert_eq!(defaults.get("price"), "0");
        assert!(schema.validate(&defaults).is_ok());

        let errors = schema
            .validate(&defaults.with("price", "").with("note", "x"))
            .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("price"), Some("Price is required"));
    }
}
