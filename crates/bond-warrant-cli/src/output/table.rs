use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{cell, columns, flatten};

/// Render output as a table: one field per row for an envelope or object,
/// one row per element for a list of points.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            let body = map.get("result").unwrap_or(value);
            print_fields(body);
            if let Some(Value::Array(warnings)) = map.get("warnings") {
                if !warnings.is_empty() {
                    println!("\nWarnings:");
                    for w in warnings.iter().filter_map(Value::as_str) {
                        println!("  - {}", w);
                    }
                }
            }
            if let Some(Value::String(meth)) = map.get("methodology") {
                println!("\nMethodology: {}", meth);
            }
        }
        Value::Array(rows) => print_rows(rows),
        other => println!("{}", other),
    }
}

fn print_fields(value: &Value) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in flatten(value) {
        let shown = if val.is_null() { "null".to_string() } else { cell(&val) };
        builder.push_record([key, shown]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }
    let flat: Vec<_> = rows.iter().map(flatten).collect();
    let headers = columns(&flat);

    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in &flat {
        let record: Vec<String> = headers
            .iter()
            .map(|h| {
                row.iter()
                    .find(|(k, _)| k == h)
                    .map(|(_, v)| cell(v))
                    .unwrap_or_default()
            })
            .collect();
        builder.push_record(record);
    }
    println!("{}", Table::from(builder));
}
