use serde_json::Value;

/// Headline figure of each calculator, in priority order.
const HEADLINE_KEYS: &[&str] = &[
    "net_income",
    "refund_or_owing",
    "payment",
    "monthly_payment",
    "total_tax",
    "new_rent",
    "private_net_cost",
    "vacation_pay",
    "total_amount",
    "final_balance",
];

/// Print just the headline value of a calculation.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

fn headline(value: &Value) -> String {
    let result = value.get("result").unwrap_or(value);

    if let Value::Object(map) = result {
        if let Some(val) = HEADLINE_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find(|val| !val.is_null())
        {
            return format_minimal(val);
        }
        if let Some((key, val)) = map.iter().next() {
            return format!("{key}: {}", format_minimal(val));
        }
    }

    format_minimal(result)
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
