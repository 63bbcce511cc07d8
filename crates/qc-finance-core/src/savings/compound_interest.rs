//! Savings growth with monthly contributions under any compounding
//! convention.
//!
//! The projection steps month by month. Each month the balance grows by the
//! monthly factor equivalent to the nominal rate under the chosen
//! compounding, then the contribution is deposited at month end.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::report::{ReportLine, Summarize};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::validate;
use crate::{QcFinanceError, QcFinanceResult};

const MAX_ROOT_ITERATIONS: u32 = 100;
const ROOT_TOLERANCE: Decimal = dec!(0.00000000000000000001);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompoundingFrequency {
    Annually,
    SemiAnnually,
    Quarterly,
    #[default]
    Monthly,
    Daily,
}

impl CompoundingFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            CompoundingFrequency::Annually => 1,
            CompoundingFrequency::SemiAnnually => 2,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Daily => 365,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundInterestInput {
    pub principal: Money,
    #[serde(default)]
    pub monthly_contribution: Money,
    /// Nominal annual rate (0.05 = 5%)
    pub annual_rate: Rate,
    pub years: u32,
    #[serde(default)]
    pub compounding: CompoundingFrequency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsPoint {
    pub year: u32,
    pub balance: Money,
    /// Principal plus every contribution made so far.
    pub contributions: Money,
    pub interest: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterestResult {
    pub final_balance: Money,
    pub total_contributions: Money,
    pub total_interest: Money,
    pub effective_annual_rate: Rate,
    pub projection: Vec<SavingsPoint>,
}

/// `(1 + r/m)^m − 1`
pub fn effective_annual_rate(
    annual_rate: Rate,
    compounding: CompoundingFrequency,
) -> QcFinanceResult<Rate> {
    let m = compounding.periods_per_year();
    let growth = (Decimal::ONE + annual_rate / Decimal::from(m))
        .checked_powu(u64::from(m))
        .ok_or_else(|| QcFinanceError::invalid("annual_rate", "compounding factor overflows"))?;
    Ok(growth - Decimal::ONE)
}

/// Growth factor for one month: the twelfth root of `1 + effective annual rate`.
pub fn monthly_growth_factor(
    annual_rate: Rate,
    compounding: CompoundingFrequency,
) -> QcFinanceResult<Decimal> {
    if compounding == CompoundingFrequency::Monthly {
        return Ok(Decimal::ONE + annual_rate / dec!(12));
    }
    let annual_factor = Decimal::ONE + effective_annual_rate(annual_rate, compounding)?;
    Ok(twelfth_root(annual_factor))
}

/// Newton-Raphson on `y^12 − a`. Only called with `a ≥ 1`, where the
/// iteration converges from above.
fn twelfth_root(a: Decimal) -> Decimal {
    if a == Decimal::ONE {
        return Decimal::ONE;
    }
    let twelve = dec!(12);
    let mut y = Decimal::ONE + (a - Decimal::ONE) / twelve;
    for _ in 0..MAX_ROOT_ITERATIONS {
        let y11 = y.powu(11);
        let next = y - (y11 * y - a) / (twelve * y11);
        if (next - y).abs() < ROOT_TOLERANCE {
            return next;
        }
        y = next;
    }
    y
}

pub fn calculate_compound_interest(
    input: &CompoundInterestInput,
) -> QcFinanceResult<ComputationOutput<CompoundInterestResult>> {
    validate_compound_interest_input(input)?;

    let factor = monthly_growth_factor(input.annual_rate, input.compounding)?;
    let effective_annual_rate = effective_annual_rate(input.annual_rate, input.compounding)?;

    let mut balance = input.principal;
    let mut contributions = input.principal;
    let mut projection = Vec::with_capacity(input.years as usize);

    for year in 1..=input.years {
        for _ in 0..12 {
            balance = balance * factor + input.monthly_contribution;
            contributions += input.monthly_contribution;
        }
        projection.push(SavingsPoint {
            year,
            balance,
            contributions,
            interest: balance - contributions,
        });
    }

    tracing::debug!(
        years = input.years,
        compounding = ?input.compounding,
        final_balance = %balance,
        "compound interest projected"
    );

    let output = CompoundInterestResult {
        final_balance: balance,
        total_contributions: contributions,
        total_interest: balance - contributions,
        effective_annual_rate,
        projection,
    };

    Ok(with_metadata(
        "Compound interest: monthly steps at the equivalent monthly growth factor, \
         contributions deposited at month end",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "monthly_contribution": input.monthly_contribution.to_string(),
            "annual_rate": input.annual_rate.to_string(),
            "compounding": input.compounding,
            "years": input.years,
        }),
        Vec::new(),
        None,
        output,
    ))
}

fn validate_compound_interest_input(input: &CompoundInterestInput) -> QcFinanceResult<()> {
    validate::non_negative("principal", input.principal)?;
    validate::non_negative("monthly_contribution", input.monthly_contribution)?;
    validate::unit_rate("annual_rate", input.annual_rate)?;
    validate::positive_count("years", input.years)?;
    if input.years > 100 {
        return Err(QcFinanceError::invalid("years", "projection is limited to 100 years"));
    }
    Ok(())
}

impl Summarize for CompoundInterestResult {
    fn summary(&self) -> Vec<ReportLine> {
        vec![
            ReportLine::money("Final balance", self.final_balance),
            ReportLine::money("Total contributions", self.total_contributions),
            ReportLine::money("Total interest", self.total_interest),
            ReportLine::rate("Effective annual rate", self.effective_annual_rate),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(
        principal: Money,
        monthly_contribution: Money,
        annual_rate: Rate,
        years: u32,
        compounding: CompoundingFrequency,
    ) -> CompoundInterestInput {
        CompoundInterestInput {
            principal,
            monthly_contribution,
            annual_rate,
            years,
            compounding,
        }
    }

    fn close(a: Decimal, b: Decimal, tol: Decimal) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_annual_compounding_matches_closed_form() {
        let out = calculate_compound_interest(&input(
            dec!(10_000),
            dec!(0),
            dec!(0.05),
            10,
            CompoundingFrequency::Annually,
        ))
        .unwrap();
        // 10,000 * 1.05^10
        assert!(close(out.result.final_balance, dec!(16_288.946268), dec!(0.001)));
        assert_eq!(out.result.effective_annual_rate, dec!(0.05));
        assert_eq!(out.result.projection.len(), 10);
    }

    #[test]
    fn test_quarterly_compounding_one_year() {
        let r = calculate_compound_interest(&input(
            dec!(1_000),
            dec!(0),
            dec!(0.04),
            1,
            CompoundingFrequency::Quarterly,
        ))
        .unwrap()
        .result;
        assert!(close(r.final_balance, dec!(1_040.60401), dec!(0.000001)));
        assert_eq!(r.effective_annual_rate, dec!(0.04060401));
    }

    #[test]
    fn test_monthly_contributions_annuity() {
        let r = calculate_compound_interest(&input(
            dec!(0),
            dec!(100),
            dec!(0.06),
            1,
            CompoundingFrequency::Monthly,
        ))
        .unwrap()
        .result;
        // 100 * ((1.005^12 - 1) / 0.005)
        assert!(close(r.final_balance, dec!(1_233.556237), dec!(0.00001)));
        assert_eq!(r.total_contributions, dec!(1_200));
    }

    #[test]
    fn test_zero_rate_is_sum_of_deposits() {
        let r = calculate_compound_interest(&input(
            dec!(1_000),
            dec!(100),
            dec!(0),
            2,
            CompoundingFrequency::Daily,
        ))
        .unwrap()
        .result;
        assert_eq!(r.final_balance, dec!(3_400));
        assert_eq!(r.total_interest, dec!(0));
        assert_eq!(r.projection[0].contributions, dec!(2_200));
    }

    #[test]
    fn test_more_frequent_compounding_grows_faster() {
        let run = |c| {
            calculate_compound_interest(&input(dec!(10_000), dec!(0), dec!(0.05), 5, c))
                .unwrap()
                .result
                .final_balance
        };
        assert!(run(CompoundingFrequency::Annually) < run(CompoundingFrequency::Quarterly));
        assert!(run(CompoundingFrequency::Quarterly) < run(CompoundingFrequency::Monthly));
        assert!(run(CompoundingFrequency::Monthly) < run(CompoundingFrequency::Daily));
    }

    #[test]
    fn test_twelfth_root() {
        let y = twelfth_root(dec!(1.12));
        assert!(close(y.powu(12), dec!(1.12), dec!(0.0000000001)));
    }

    #[test]
    fn test_rejects_percent_rate() {
        assert!(calculate_compound_interest(&input(
            dec!(1_000),
            dec!(0),
            dec!(5),
            1,
            CompoundingFrequency::Monthly,
        ))
        .is_err());
    }
}
