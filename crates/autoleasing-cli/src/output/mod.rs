pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Columns of a listing card worth showing outside the JSON output.
pub(crate) const CARD_COLUMNS: [&str; 6] = [
    "vin",
    "title",
    "condition",
    "price_text",
    "monthly_text",
    "wishlisted",
];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Scalar rendering shared by the plain-text formatters.
pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!("CHF 797.30")), "CHF 797.30");
        assert_eq!(format_value(&json!(null)), "");
        assert_eq!(format_value(&json!(["ABS", "Bluetooth"])), "ABS, Bluetooth");
        assert_eq!(format_value(&json!(true)), "true");
    }
}
