use serde_json::Value;
use std::io;

/// Write the result as `field,value` CSV, nested values flattened to
/// dotted paths (`schedule.0.balance`).
pub fn print_csv(value: &Value) {
    let result = value.get("result").unwrap_or(value);
    let mut rows = Vec::new();
    flatten("", result, &mut rows);

    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    let written = wtr
        .write_record(["field", "value"])
        .and_then(|_| rows.iter().try_for_each(|(k, v)| wtr.write_record([k, v])))
        .and_then(|_| wtr.flush().map_err(csv::Error::from));
    if let Err(e) = written {
        tracing::error!("CSV write error: {e}");
    }
}

fn flatten(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        }
    };
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                flatten(&join(key), val, rows);
            }
        }
        Value::Array(items) => {
            for (i, val) in items.iter().enumerate() {
                flatten(&join(&i.to_string()), val, rows);
            }
        }
        Value::String(s) => rows.push((prefix.to_string(), s.clone())),
        Value::Number(n) => rows.push((prefix.to_string(), n.to_string())),
        Value::Bool(b) => rows.push((prefix.to_string(), b.to_string())),
        Value::Null => rows.push((prefix.to_string(), String::new())),
    }
}
