use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::report::{ReportLine, Summarize};
use crate::tables::RateTable;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::validate;
use crate::{QcFinanceError, QcFinanceResult};

fn default_days_per_year() -> u32 {
    261
}

fn default_children() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaycareInput {
    /// Daily fee charged by the non-subsidized daycare.
    pub private_daily_rate: Money,
    #[serde(default = "default_days_per_year")]
    pub days_per_year: u32,
    #[serde(default = "default_children")]
    pub children: u32,
    pub family_income: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DaycareOption {
    Subsidized,
    Private,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaycareResult {
    pub children: u32,
    pub days_per_year: u32,
    pub subsidized_daily_rate: Money,
    pub subsidized_annual_cost: Money,
    pub private_annual_cost: Money,
    pub credit_rate: Rate,
    pub eligible_expenses: Money,
    pub tax_credit: Money,
    pub private_net_cost: Money,
    /// Private net cost minus subsidized cost; positive when the subsidized
    /// place is cheaper.
    pub difference: Money,
    pub cheaper_option: DaycareOption,
}

/// Compare a subsidized place with a private daycare after the refundable
/// childcare expense credit.
///
/// Eligible expenses are capped per child before the income-tested credit
/// rate is applied. Ties favour the subsidized place.
pub fn calculate_daycare(
    input: &DaycareInput,
    rates: &RateTable,
) -> QcFinanceResult<ComputationOutput<DaycareResult>> {
    validate_daycare_input(input)?;
    let table = &rates.daycare;
    let days = Decimal::from(input.days_per_year);
    let children = Decimal::from(input.children);

    let subsidized_annual_cost = table.subsidized_daily_rate * days * children;

    let private_cost_per_child = input.private_daily_rate * days;
    let private_annual_cost = private_cost_per_child * children;
    let eligible_expenses =
        private_cost_per_child.min(table.max_eligible_expense_per_child) * children;
    let credit_rate = table.credit_rate(input.family_income);
    let tax_credit = eligible_expenses * credit_rate;
    let private_net_cost = private_annual_cost - tax_credit;

    let difference = private_net_cost - subsidized_annual_cost;
    let cheaper_option = if difference >= Decimal::ZERO {
        DaycareOption::Subsidized
    } else {
        DaycareOption::Private
    };

    let mut warnings = Vec::new();
    if private_cost_per_child > table.max_eligible_expense_per_child {
        warnings.push(format!(
            "Private fees exceed the {} per-child eligible expense limit; the excess earns no credit",
            table.max_eligible_expense_per_child
        ));
    }

    for w in &warnings {
        tracing::warn!("{w}");
    }
    tracing::debug!(
        children = input.children,
        credit_rate = %credit_rate,
        difference = %difference,
        "daycare comparison computed"
    );

    let output = DaycareResult {
        children: input.children,
        days_per_year: input.days_per_year,
        subsidized_daily_rate: table.subsidized_daily_rate,
        subsidized_annual_cost,
        private_annual_cost,
        credit_rate,
        eligible_expenses,
        tax_credit,
        private_net_cost,
        difference,
        cheaper_option,
    };

    Ok(with_metadata(
        "Daycare: subsidized daily rate versus private fees net of the income-tested \
         childcare expense credit",
        &serde_json::json!({
            "private_daily_rate": input.private_daily_rate.to_string(),
            "days_per_year": input.days_per_year,
            "children": input.children,
            "family_income": input.family_income.to_string(),
        }),
        warnings,
        Some(rates.tax_year),
        output,
    ))
}

fn validate_daycare_input(input: &DaycareInput) -> QcFinanceResult<()> {
    validate::non_negative("private_daily_rate", input.private_daily_rate)?;
    validate::non_negative("family_income", input.family_income)?;
    validate::positive_count("children", input.children)?;
    validate::positive_count("days_per_year", input.days_per_year)?;
    if input.days_per_year > 366 {
        return Err(QcFinanceError::invalid(
            "days_per_year",
            "cannot exceed the days in a year",
        ));
    }
    Ok(())
}

impl Summarize for DaycareResult {
    fn summary(&self) -> Vec<ReportLine> {
        let cheaper = match self.cheaper_option {
            DaycareOption::Subsidized => "Subsidized",
            DaycareOption::Private => "Private",
        };
        vec![
            ReportLine::number("Children", Decimal::from(self.children)),
            ReportLine::money("Subsidized annual cost", self.subsidized_annual_cost),
            ReportLine::money("Private annual cost", self.private_annual_cost),
            ReportLine::rate("Credit rate", self.credit_rate),
            ReportLine::money("Tax credit", self.tax_credit),
            ReportLine::money("Private net cost", self.private_net_cost),
            ReportLine::money("Difference", self.difference),
            ReportLine::text("Cheaper option", cheaper),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::builtin::rates_2025;
    use rust_decimal_macros::dec;

    fn run(private_daily_rate: Money, children: u32, family_income: Money) -> ComputationOutput<DaycareResult> {
        let input = DaycareInput {
            private_daily_rate,
            days_per_year: 261,
            children,
            family_income,
        };
        calculate_daycare(&input, &rates_2025().unwrap()).unwrap()
    }

    #[test]
    fn test_subsidized_cheaper_middle_income() {
        let out = run(dec!(50), 1, dec!(80_000));
        let r = &out.result;
        assert_eq!(r.subsidized_annual_cost, dec!(2_375.10));
        assert_eq!(r.private_annual_cost, dec!(13_050));
        assert_eq!(r.credit_rate, dec!(0.70));
        assert_eq!(r.eligible_expenses, dec!(11_470));
        assert_eq!(r.tax_credit, dec!(8_029));
        assert_eq!(r.private_net_cost, dec!(5_021));
        assert_eq!(r.difference, dec!(2_645.90));
        assert_eq!(r.cheaper_option, DaycareOption::Subsidized);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_low_income_band() {
        let r = run(dec!(50), 1, dec!(20_000)).result;
        assert_eq!(r.credit_rate, dec!(0.78));
        assert_eq!(r.tax_credit, dec!(8_946.60));
    }

    #[test]
    fn test_cheap_private_daycare_wins() {
        // 7,830 fees, under the cap, 70% credit
        let out = run(dec!(30), 1, dec!(80_000));
        assert_eq!(out.result.private_net_cost, dec!(2_349));
        assert_eq!(out.result.cheaper_option, DaycareOption::Private);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_cap_applies_per_child() {
        let r = run(dec!(50), 2, dec!(80_000)).result;
        assert_eq!(r.eligible_expenses, dec!(22_940));
        assert_eq!(r.subsidized_annual_cost, dec!(4_750.20));
        assert_eq!(r.private_net_cost, dec!(26_100) - dec!(16_058));
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let rates = rates_2025().unwrap();
        let mut input = DaycareInput {
            private_daily_rate: dec!(50),
            days_per_year: 261,
            children: 0,
            family_income: dec!(60_000),
        };
        assert!(calculate_daycare(&input, &rates).is_err());
        input.children = 1;
        input.days_per_year = 400;
        assert!(calculate_daycare(&input, &rates).is_err());
    }
}
