use qc_finance_core::report::Locale;
use serde_json::Value;
use tabled::{builder::Builder, Table};

use crate::commands::CommandOutput;

/// Human-readable summary with locale-formatted amounts.
///
/// Commands without summary lines fall back to pretty JSON.
pub fn print_report(output: &CommandOutput, locale: Locale) {
    if output.summary.is_empty() {
        super::json::print_json(&output.value);
        return;
    }

    let mut builder = Builder::default();
    for line in &output.summary {
        builder.push_record([line.label.clone(), line.render(locale)]);
    }
    println!("{}", Table::from(builder));

    for warning in warnings(&output.value) {
        println!("! {warning}");
    }
}

fn warnings(value: &Value) -> Vec<&str> {
    value
        .get("warnings")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}
