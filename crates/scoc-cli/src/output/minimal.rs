use serde_json::Value;

/// Print just the key answer value from the output.
///
/// For a single evaluation that is the sCoC ratio; for a ranking it is one
/// `address: scoc` line per property, best first.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Array(rows) => {
            for row in rows {
                let address = row.get("address").and_then(Value::as_str).unwrap_or("?");
                let scoc = row.get("scoc").map(format_minimal).unwrap_or_default();
                println!("{}: {}", address, scoc);
            }
        }
        Value::Object(map) => {
            // Priority list of key output fields
            for key in ["scoc", "base_cash_on_cash", "dscr_stress"] {
                if let Some(val) = map.get(key) {
                    if !val.is_null() {
                        println!("{}", format_minimal(val));
                        return;
                    }
                }
            }
            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, format_minimal(val));
            }
        }
        other => println!("{}", format_minimal(other)),
    }
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
