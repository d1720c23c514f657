use serde_json::{Map, Value};
use std::io;

use super::{format_value, CARD_COLUMNS};

type StdoutWriter<'a> = csv::Writer<io::StdoutLock<'a>>;

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            if let Some(Value::Array(cards)) = map.get("cards") {
                write_cards(&mut wtr, cards);
            } else if let Some(Value::Array(rows)) = map.get("specifications") {
                let _ = wtr.write_record(["label", "value"]);
                for row in rows {
                    let _ = wtr.write_record([
                        row.get("label").map(format_value).unwrap_or_default(),
                        row.get("value").map(format_value).unwrap_or_default(),
                    ]);
                }
            } else if let Some(Value::Object(result)) = map.get("result") {
                write_fields(&mut wtr, result);
            } else {
                write_fields(&mut wtr, map);
            }
        }
        _ => {
            let _ = wtr.write_record([format_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_cards(wtr: &mut StdoutWriter<'_>, cards: &[Value]) {
    let _ = wtr.write_record(CARD_COLUMNS);
    for card in cards {
        let row: Vec<String> = CARD_COLUMNS
            .iter()
            .map(|c| card.get(*c).map(format_value).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&row);
    }
}

fn write_fields(wtr: &mut StdoutWriter<'_>, map: &Map<String, Value>) {
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in map {
        let _ = wtr.write_record([key.as_str(), &format_value(val)]);
    }
}
