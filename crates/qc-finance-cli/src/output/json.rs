use serde_json::Value;

/// Print the envelope as JSON: indented on a terminal, one line per result
/// when piped so each invocation stays a single JSON record.
pub fn print_json(value: &Value) {
    let pretty = atty::is(atty::Stream::Stdout);
    match render_json(value, pretty) {
        Ok(s) => println!("{s}"),
        Err(e) => tracing::error!("JSON serialization error: {e}"),
    }
}

fn render_json(value: &Value, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
