use serde_json::Value;
use std::io;

/// Format output as CSV on stdout.
///
/// Rankings become one record per property; single evaluations become
/// field,value pairs of the (flattened) result.
pub fn print_csv(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let mut writer = csv::Writer::from_writer(io::stdout());

    let outcome = match result {
        Value::Array(rows) => write_records(&mut writer, rows),
        Value::Object(map) => write_pairs(&mut writer, map),
        other => writer
            .write_record([format_value(other)])
            .map_err(|e| e.to_string().into()),
    };

    if let Err(e) = outcome.and_then(|_| writer.flush().map_err(|e| e.to_string().into())) {
        eprintln!("CSV output error: {}", e);
    }
}

fn write_records(
    writer: &mut csv::Writer<io::Stdout>,
    rows: &[Value],
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(Value::Object(first)) = rows.first() else {
        return Ok(());
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    writer.write_record(&headers)?;

    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                .collect();
            writer.write_record(&record)?;
        }
    }
    Ok(())
}

fn write_pairs(
    writer: &mut csv::Writer<io::Stdout>,
    map: &serde_json::Map<String, Value>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer.write_record(["field", "value"])?;
    for (key, val) in flatten("", map) {
        writer.write_record([key.as_str(), val.as_str()])?;
    }
    Ok(())
}

/// Flatten nested objects with dotted keys (base.net_cash_flow, ...).
fn flatten(prefix: &str, map: &serde_json::Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(nested) => pairs.extend(flatten(&name, nested)),
            other => pairs.push((name, format_value(other))),
        }
    }
    pairs
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        nested => serde_json::to_string(nested).unwrap_or_default(),
    }
}
