//! Presentation helpers shared by every calculator result.
//!
//! Results stay unrounded; rounding to cents and locale formatting happen
//! only here, so report, CLI and binding output agree on the same figures.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-CA")]
    EnCa,
    #[serde(rename = "fr-CA")]
    FrCa,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ReportValue {
    Money(Money),
    Rate(Rate),
    Number(Decimal),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLine {
    pub label: String,
    pub value: ReportValue,
}

impl ReportLine {
    pub fn money(label: &str, amount: Money) -> Self {
        ReportLine {
            label: label.into(),
            value: ReportValue::Money(amount),
        }
    }

    pub fn rate(label: &str, rate: Rate) -> Self {
        ReportLine {
            label: label.into(),
            value: ReportValue::Rate(rate),
        }
    }

    pub fn number(label: &str, value: Decimal) -> Self {
        ReportLine {
            label: label.into(),
            value: ReportValue::Number(value),
        }
    }

    pub fn text(label: &str, value: impl Into<String>) -> Self {
        ReportLine {
            label: label.into(),
            value: ReportValue::Text(value.into()),
        }
    }

    pub fn render(&self, locale: Locale) -> String {
        match &self.value {
            ReportValue::Money(m) => format_money(*m, locale),
            ReportValue::Rate(r) => format_rate(*r, locale),
            ReportValue::Number(n) => format_number(*n, locale),
            ReportValue::Text(t) => t.clone(),
        }
    }
}

/// Labelled headline figures of a result, in display order.
pub trait Summarize {
    fn summary(&self) -> Vec<ReportLine>;

    fn render_summary(&self, locale: Locale) -> Vec<(String, String)> {
        self.summary()
            .into_iter()
            .map(|line| {
                let rendered = line.render(locale);
                (line.label, rendered)
            })
            .collect()
    }
}

/// Round to cents, halves away from zero.
pub fn round_money(amount: Money) -> Money {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `$1,234.56` (en-CA) or `1 234,56 $` (fr-CA).
pub fn format_money(amount: Money, locale: Locale) -> String {
    let rounded = round_money(amount);
    let body = group_digits(rounded.abs(), 2, locale);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match locale {
        Locale::EnCa => format!("{sign}${body}"),
        Locale::FrCa => format!("{sign}{body} $"),
    }
}

/// `4.80%` (en-CA) or `4,80 %` (fr-CA) for a decimal rate of 0.048.
pub fn format_rate(rate: Rate, locale: Locale) -> String {
    let pct = (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let body = group_digits(pct.abs(), 2, locale);
    let sign = if pct.is_sign_negative() && !pct.is_zero() { "-" } else { "" };
    match locale {
        Locale::EnCa => format!("{sign}{body}%"),
        Locale::FrCa => format!("{sign}{body} %"),
    }
}

fn format_number(value: Decimal, locale: Locale) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let dp = rounded.normalize().scale().min(2);
    let body = group_digits(rounded.abs(), dp, locale);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{body}")
    } else {
        body
    }
}

fn group_digits(value: Decimal, dp: u32, locale: Locale) -> String {
    let (thousands, decimal_mark) = match locale {
        Locale::EnCa => (',', '.'),
        Locale::FrCa => (' ', ','),
    };
    let text = format!("{:.*}", dp as usize, value);
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(thousands);
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{grouped}{decimal_mark}{f}"),
        None => grouped,
    }
}
