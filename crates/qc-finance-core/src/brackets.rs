//! Progressive (marginal) bracket taxation.
//!
//! One code path for every bracket schedule: personal income tax per
//! authority and the property transfer duties both go through here, the
//! schedules themselves are data.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tables::BracketTable;
use crate::types::{Money, Rate};

/// Portion of an amount that fell into one bracket and the tax it bore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketShare {
    pub min: Money,
    pub max: Option<Money>,
    pub rate: Rate,
    pub taxable_amount: Money,
    pub tax: Money,
}

/// Cumulative tax on `taxable_amount` under `table`.
///
/// Non-positive amounts bear no tax. Equal to the sum of
/// [`compute_bracket_breakdown`] by construction.
pub fn compute_bracket_tax(taxable_amount: Money, table: &BracketTable) -> Money {
    compute_bracket_breakdown(taxable_amount, table)
        .iter()
        .map(|share| share.tax)
        .sum()
}

/// Per-bracket split of `taxable_amount`.
///
/// Brackets are filled from the bottom; the walk stops as soon as the whole
/// amount is allocated, so only brackets actually reached appear. The top
/// bracket absorbs whatever remains, however large.
pub fn compute_bracket_breakdown(taxable_amount: Money, table: &BracketTable) -> Vec<BracketShare> {
    let mut shares = Vec::new();
    if taxable_amount <= Decimal::ZERO {
        return shares;
    }

    let mut remaining = taxable_amount;
    for bracket in table.brackets() {
        if remaining <= Decimal::ZERO {
            break;
        }
        let portion = match bracket.width() {
            Some(width) => remaining.min(width),
            None => remaining,
        };
        shares.push(BracketShare {
            min: bracket.min,
            max: bracket.max,
            rate: bracket.rate,
            taxable_amount: portion,
            tax: portion * bracket.rate,
        });
        remaining -= portion;
    }

    shares
}

/// Rate applied to the next dollar above `taxable_amount`.
pub fn marginal_rate(taxable_amount: Money, table: &BracketTable) -> Rate {
    table
        .brackets()
        .iter()
        .find(|b| b.max.map_or(true, |max| taxable_amount < max))
        .map(|b| b.rate)
        .unwrap_or(Decimal::ZERO)
}
