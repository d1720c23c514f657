use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_value, CARD_COLUMNS};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    let Value::Object(map) = value else {
        println!("{}", format_value(value));
        return;
    };

    if let Some(Value::Array(cards)) = map.get("cards") {
        print_cards(cards);
        if let Some(total) = map.get("total") {
            println!("\n{} Fahrzeuge", format_value(total));
        }
    } else if let Some(Value::Array(rows)) = map.get("specifications") {
        if let Some(Value::String(title)) = map.get("title") {
            println!("{}", title);
        }
        print_specifications(rows);
        for key in ["price_text", "monthly_text"] {
            if let Some(Value::String(s)) = map.get(key) {
                println!("{}", s);
            }
        }
    } else if let Some(Value::Object(result)) = map.get("result") {
        print_fields(result);
        print_warnings(map);
    } else {
        print_fields(map);
    }
}

fn print_cards(cards: &[Value]) {
    if cards.is_empty() {
        println!("Keine Fahrzeuge gefunden.");
        return;
    }
    let mut builder = Builder::default();
    builder.push_record(CARD_COLUMNS);
    for card in cards {
        builder.push_record(
            CARD_COLUMNS
                .iter()
                .map(|c| card.get(*c).map(format_value).unwrap_or_default()),
        );
    }
    println!("{}", Table::from(builder));
}

fn print_specifications(rows: &[Value]) {
    let mut builder = Builder::default();
    for row in rows {
        let label = row.get("label").map(format_value).unwrap_or_default();
        let value = row.get("value").map(format_value).unwrap_or_default();
        builder.push_record([label, value]);
    }
    println!("{}", Table::from(builder));
}

fn print_fields(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_warnings(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }
}
