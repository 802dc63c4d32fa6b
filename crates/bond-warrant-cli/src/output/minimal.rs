use serde_json::Value;

use super::{cell, flatten};

// Most telling figure first; dotted paths into the flattened result.
const PRIORITY_KEYS: [&str; 4] = [
    "adjustedPnL.profitLoss",
    "breakEvenRate",
    "simulatedWarrantValue",
    "currentWarrantValue",
];

/// Print just the headline figure of a result.
///
/// Lists print one `label: value` line per element.
pub fn print_minimal(value: &Value) {
    match value {
        Value::Array(rows) => {
            for row in rows {
                let label = row
                    .get("label")
                    .or_else(|| row.get("id"))
                    .or_else(|| row.get("rate"))
                    .map(cell)
                    .unwrap_or_default();
                println!("{}: {}", label, headline(row.get("result").unwrap_or(row)));
            }
        }
        Value::Object(map) => println!("{}", headline(map.get("result").unwrap_or(value))),
        other => println!("{}", cell(other)),
    }
}

fn headline(value: &Value) -> String {
    let flat = flatten(value);
    for key in PRIORITY_KEYS {
        if let Some((_, v)) = flat.iter().find(|(k, v)| k == key && !v.is_null()) {
            return cell(v);
        }
    }
    // Chart points and payoff rows: everything but the axis fields
    let rest: Vec<String> = flat
        .iter()
        .filter(|(k, _)| k != "label" && k != "xPoints" && k != "rate")
        .map(|(k, v)| format!("{k}={}", cell(v)))
        .collect();
    rest.join(" ")
}
