use serde_json::Value;

use super::format_value;

/// Fields answering each command, in order of priority.
const PRIORITY_KEYS: [&str; 6] = [
    "display",
    "monthly_payment",
    "confirmation",
    "wishlisted",
    "total",
    "count",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_answer(value));
}

fn minimal_answer(value: &Value) -> String {
    // Unwrap the computation envelope or a nested quote
    let inner = value
        .get("result")
        .or_else(|| value.get("quote"))
        .unwrap_or(value);

    for obj in [inner, value] {
        for key in PRIORITY_KEYS {
            if let Some(val) = obj.get(key).filter(|v| !v.is_null()) {
                return format_value(val);
            }
        }
    }

    match inner {
        Value::Object(map) => map
            .iter()
            .next()
            .map(|(key, val)| format!("{}: {}", key, format_value(val)))
            .unwrap_or_default(),
        other => format_value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_answer() {
        let value = json!({
            "result": { "monthly_payment": "797.30", "principal": "18000" },
            "warnings": []
        });
        assert_eq!(minimal_answer(&value), "797.30");
    }

    #[test]
    fn test_quote_display_wins() {
        let value = json!({
            "vin": "BMWX32023",
            "quote": { "monthly_payment": "797.30", "display": "CHF 797.30 pro Monat" }
        });
        assert_eq!(minimal_answer(&value), "CHF 797.30 pro Monat");
    }

    #[test]
    fn test_listing_total() {
        let value = json!({ "cards": [], "total": 0, "wishlist_count": 2 });
        assert_eq!(minimal_answer(&value), "0");
    }

    #[test]
    fn test_fallback_first_field() {
        assert_eq!(minimal_answer(&json!({ "vin": "X" })), "vin: X");
    }
}
