//! Raw product → clean product.
//!
//! Every field of the output is always populated: missing or malformed
//! input falls back to a default instead of failing the run.

use crate::domain::model::{CleanRecord, RawRating, RawRecord};
use serde_json::Value;

pub const DEFAULT_TEXT: &str = "N/A";
pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 200;

pub fn normalize(raw: &RawRecord) -> CleanRecord {
    let rating = raw.rating.as_ref();

    CleanRecord {
        title: truncate_chars(&coerce_text(raw.title.as_ref()), MAX_TITLE_CHARS),
        price: coerce_price(raw.price.as_ref()),
        category: coerce_text(raw.category.as_ref()),
        description: truncate_chars(
            &coerce_text(raw.description.as_ref()),
            MAX_DESCRIPTION_CHARS,
        ),
        image: coerce_text(raw.image.as_ref()),
        rating: rating
            .and_then(|r: &RawRating| r.rate.as_ref())
            .and_then(as_f64)
            .filter(|v| v.is_finite())
            .unwrap_or(0.0),
        rating_count: rating
            .and_then(|r| r.count.as_ref())
            .and_then(as_count)
            .unwrap_or(0),
    }
}

fn coerce_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => DEFAULT_TEXT.to_string(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string().trim().to_string(),
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn coerce_price(value: Option<&Value>) -> f64 {
    value
        .and_then(as_f64)
        .filter(|p| p.is_finite() && *p >= 0.0)
        .unwrap_or(0.0)
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            // 120.0 這類整數值的浮點數也接受
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawRecord {
        RawRecord::from_value(value)
    }

    #[test]
    fn test_empty_record_gets_defaults() {
        let clean = normalize(&raw(json!({})));

        assert_eq!(
            clean,
            CleanRecord {
                title: "N/A".into(),
                price: 0.0,
                category: "N/A".into(),
                description: "N/A".into(),
                image: "N/A".into(),
                rating: 0.0,
                rating_count: 0,
            }
        );
    }

    #[test]
    fn test_full_record() {
        let clean = normalize(&raw(json!({
            "id": 1,
            "title": "  Fjallraven Backpack  ",
            "price": 109.95,
            "category": "men's clothing",
            "description": "Your perfect pack for everyday use",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": {"rate": 3.9, "count": 120}
        })));

        assert_eq!(clean.title, "Fjallraven Backpack");
        assert_eq!(clean.price, 109.95);
        assert_eq!(clean.category, "men's clothing");
        assert_eq!(clean.rating, 3.9);
        assert_eq!(clean.rating_count, 120);
    }

    #[test]
    fn test_truncation() {
        let clean = normalize(&raw(json!({
            "title": "t".repeat(150),
            "description": "d".repeat(300),
        })));

        assert_eq!(clean.title.chars().count(), 100);
        assert_eq!(clean.description.chars().count(), 200);
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let clean = normalize(&raw(json!({ "title": "é".repeat(120) })));
        assert_eq!(clean.title.chars().count(), 100);
        assert_eq!(clean.title.len(), 200);
    }

    #[test]
    fn test_trim_happens_before_truncation() {
        let title = format!("{}{}", " ".repeat(10), "a".repeat(100));
        let clean = normalize(&raw(json!({ "title": title })));
        assert_eq!(clean.title, "a".repeat(100));
    }

    #[test]
    fn test_price_coercion() {
        assert_eq!(normalize(&raw(json!({"price": "12.5"}))).price, 12.5);
        assert_eq!(normalize(&raw(json!({"price": 7}))).price, 7.0);
        assert_eq!(normalize(&raw(json!({"price": "free"}))).price, 0.0);
        assert_eq!(normalize(&raw(json!({"price": null}))).price, 0.0);
        assert_eq!(normalize(&raw(json!({"price": -3.0}))).price, 0.0);
        assert_eq!(normalize(&raw(json!({"price": [1, 2]}))).price, 0.0);
    }

    #[test]
    fn test_non_string_text_fields_are_stringified() {
        let clean = normalize(&raw(json!({"title": 42, "category": true, "image": null})));
        assert_eq!(clean.title, "42");
        assert_eq!(clean.category, "true");
        assert_eq!(clean.image, "N/A");
    }

    #[test]
    fn test_rating_defaults() {
        let partial = normalize(&raw(json!({"rating": {"rate": 4.1}})));
        assert_eq!(partial.rating, 4.1);
        assert_eq!(partial.rating_count, 0);

        let not_object = normalize(&raw(json!({"rating": "great"})));
        assert_eq!(not_object.rating, 0.0);
        assert_eq!(not_object.rating_count, 0);

        let odd = normalize(&raw(json!({"rating": {"rate": "4.5", "count": 12.0}})));
        assert_eq!(odd.rating, 4.5);
        assert_eq!(odd.rating_count, 12);

        let negative = normalize(&raw(json!({"rating": {"count": -4}})));
        assert_eq!(negative.rating_count, 0);
    }
}
