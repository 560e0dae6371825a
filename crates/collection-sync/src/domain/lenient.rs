//! Numeric fields the server may hand back as strings (`"9.99"`) or null.

use serde::de::Error;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
}

pub(crate) fn f64_or_text<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(NumberOrText::Number(n)) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom(format!("number {n} out of range"))),
        Some(NumberOrText::Text(s)) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid number {s:?}"))),
    }
}

pub(crate) fn i64_or_text<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(0),
        Some(NumberOrText::Number(n)) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .ok_or_else(|| D::Error::custom(format!("invalid integer {n}"))),
        Some(NumberOrText::Text(s)) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid integer {s:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "f64_or_text")]
        price: f64,
        #[serde(default, deserialize_with = "i64_or_text")]
        order: i64,
    }

    fn row(value: serde_json::Value) -> Row {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_accepts_numbers_and_strings() {
        let r = row(json!({ "price": "9.99", "order": "3" }));
        assert_eq!(r.price, 9.99);
        assert_eq!(r.order, 3);

        let r = row(json!({ "price": 4, "order": 2.0 }));
        assert_eq!(r.price, 4.0);
        assert_eq!(r.order, 2);
    }

    #[test]
    fn test_missing_and_null_default_to_zero() {
        let r = row(json!({ "price": null }));
        assert_eq!(r.price, 0.0);
        assert_eq!(r.order, 0);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_value::<Row>(json!({ "price": "cheap" })).is_err());
        assert!(serde_json::from_value::<Row>(json!({ "order": 1.5 })).is_err());
    }

    #[test]
    fn test_out_of_range_integer_is_rejected() {
        assert!(serde_json::from_value::<Row>(json!({ "order": 1e20 })).is_err());
        assert!(serde_json::from_value::<Row>(json!({ "order": -1e20 })).is_err());
        assert_eq!(row(json!({ "order": -4.0 })).order, -4);
    }
}
