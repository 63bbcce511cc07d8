use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::brackets::{compute_bracket_breakdown, BracketShare};
use crate::report::{ReportLine, Summarize};
use crate::tables::{BracketTable, RateTable};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::validate;
use crate::QcFinanceResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Municipality {
    /// Any Quebec municipality using the provincial schedule.
    #[default]
    General,
    Montreal,
}

impl Municipality {
    pub fn schedule(self, rates: &RateTable) -> &BracketTable {
        match self {
            Municipality::General => &rates.transfer_tax.general,
            Municipality::Montreal => &rates.transfer_tax.montreal,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferTaxInput {
    pub property_price: Money,
    #[serde(default)]
    pub municipality: Municipality,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferTaxResult {
    pub property_price: Money,
    pub municipality: Municipality,
    pub total_tax: Money,
    pub effective_rate: Rate,
    pub breakdown: Vec<BracketShare>,
}

/// Duties on transfer of an immovable, applied to the full price with no
/// basic exemption.
pub fn calculate_transfer_tax(
    input: &TransferTaxInput,
    rates: &RateTable,
) -> QcFinanceResult<ComputationOutput<TransferTaxResult>> {
    validate::non_negative("property_price", input.property_price)?;

    let schedule = input.municipality.schedule(rates);
    let breakdown = compute_bracket_breakdown(input.property_price, schedule);
    let total_tax: Money = breakdown.iter().map(|share| share.tax).sum();
    let effective_rate = if input.property_price.is_zero() {
        Decimal::ZERO
    } else {
        total_tax / input.property_price
    };

    tracing::debug!(
        price = %input.property_price,
        municipality = ?input.municipality,
        total_tax = %total_tax,
        "transfer tax computed"
    );

    let output = TransferTaxResult {
        property_price: input.property_price,
        municipality: input.municipality,
        total_tax,
        effective_rate,
        breakdown,
    };

    Ok(with_metadata(
        "Transfer duties: progressive brackets on the full price, schedule selected by \
         municipality",
        &serde_json::json!({
            "property_price": input.property_price.to_string(),
            "municipality": input.municipality,
            "schedule": schedule.name(),
        }),
        Vec::new(),
        Some(rates.tax_year),
        output,
    ))
}

impl Summarize for TransferTaxResult {
    fn summary(&self) -> Vec<ReportLine> {
        let mut lines = vec![ReportLine::money("Property price", self.property_price)];
        for share in &self.breakdown {
            let label = match share.max {
                Some(max) => format!("{} to {} at {}", share.min, max, share.rate),
                None => format!("Above {} at {}", share.min, share.rate),
            };
            lines.push(ReportLine::money(&label, share.tax));
        }
        lines.push(ReportLine::money("Total transfer tax", self.total_tax));
        lines.push(ReportLine::rate("Effective rate", self.effective_rate));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::builtin::rates_2025;
    use rust_decimal_macros::dec;

    fn run(price: Money, municipality: Municipality) -> TransferTaxResult {
        let input = TransferTaxInput {
            property_price: price,
            municipality,
        };
        calculate_transfer_tax(&input, &rates_2025().unwrap())
            .unwrap()
            .result
    }

    #[test]
    fn test_general_half_million() {
        // 307.50 + 2,463 + 2,883
        assert_eq!(run(dec!(500_000), Municipality::General).total_tax, dec!(5_653.5));
    }

    #[test]
    fn test_montreal_matches_general_below_its_extra_brackets() {
        assert_eq!(
            run(dec!(500_000), Municipality::Montreal).total_tax,
            run(dec!(500_000), Municipality::General).total_tax
        );
    }

    #[test]
    fn test_montreal_higher_above_threshold() {
        let montreal = run(dec!(800_000), Municipality::Montreal);
        let general = run(dec!(800_000), Municipality::General);
        assert_eq!(montreal.total_tax, dec!(11_392));
        assert_eq!(general.total_tax, dec!(10_153.5));
        assert_eq!(montreal.breakdown.len(), 4);
    }

    #[test]
    fn test_breakdown_sums_and_covers_price() {
        let r = run(dec!(2_500_000), Municipality::Montreal);
        let tax: Money = r.breakdown.iter().map(|s| s.tax).sum();
        let covered: Money = r.breakdown.iter().map(|s| s.taxable_amount).sum();
        assert_eq!(tax, r.total_tax);
        assert_eq!(covered, dec!(2_500_000));
    }

    #[test]
    fn test_zero_price() {
        let r = run(dec!(0), Municipality::General);
        assert_eq!(r.total_tax, dec!(0));
        assert!(r.breakdown.is_empty());
        assert_eq!(r.effective_rate, dec!(0));
    }

    #[test]
    fn test_negative_price_rejected() {
        let input = TransferTaxInput {
            property_price: dec!(-1),
            municipality: Municipality::General,
        };
        assert!(calculate_transfer_tax(&input, &rates_2025().unwrap()).is_err());
    }
}
