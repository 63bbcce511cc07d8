use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::brackets::{compute_bracket_tax, marginal_rate};
use crate::deductions::compute_payroll_deductions;
use crate::report::{ReportLine, Summarize};
use crate::tables::{IncomeTaxSchedule, RateTable};
use crate::types::{with_metadata, ComputationOutput, Money, PayFrequency, Rate};
use crate::validate;
use crate::QcFinanceResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollInput {
    /// Annual gross employment income
    pub gross_income: Money,
    #[serde(default)]
    pub pay_frequency: PayFrequency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxCalculationResult {
    pub gross_income: Money,
    pub federal_tax: Money,
    pub provincial_tax: Money,
    pub pension_plan: Money,
    pub parental_insurance: Money,
    pub employment_insurance: Money,
    pub total_deductions: Money,
    pub net_income: Money,
    pub average_deduction_rate: Rate,
    pub marginal_rate: Rate,
    pub pay_frequency: PayFrequency,
    pub gross_per_pay: Money,
    pub net_per_pay: Money,
}

/// Tax owed to one authority on `income`.
///
/// The basic personal amount comes off income before the brackets apply;
/// the schedule's abatement then reduces the bracket tax.
pub fn income_tax(income: Money, schedule: &IncomeTaxSchedule) -> Money {
    let taxable = (income - schedule.basic_personal_amount).max(Decimal::ZERO);
    compute_bracket_tax(taxable, &schedule.brackets) * (Decimal::ONE - schedule.abatement_rate)
}

fn income_tax_marginal(income: Money, schedule: &IncomeTaxSchedule) -> Rate {
    let taxable = income - schedule.basic_personal_amount;
    if taxable < Decimal::ZERO {
        return Decimal::ZERO;
    }
    marginal_rate(taxable, &schedule.brackets) * (Decimal::ONE - schedule.abatement_rate)
}

/// Annual net pay after federal and Quebec income tax and the three
/// statutory payroll programs.
pub fn calculate_payroll(
    input: &PayrollInput,
    rates: &RateTable,
) -> QcFinanceResult<ComputationOutput<TaxCalculationResult>> {
    validate::non_negative("gross_income", input.gross_income)?;

    let gross = input.gross_income;
    let federal_tax = income_tax(gross, &rates.federal).max(Decimal::ZERO);
    let provincial_tax = income_tax(gross, &rates.quebec).max(Decimal::ZERO);
    let payroll = compute_payroll_deductions(gross, &rates.payroll);

    let total_deductions = federal_tax
        + provincial_tax
        + payroll.pension_plan
        + payroll.parental_insurance
        + payroll.employment_insurance;
    let net_income = gross - total_deductions;

    let average_deduction_rate = if gross.is_zero() {
        Decimal::ZERO
    } else {
        total_deductions / gross
    };

    let p = &rates.payroll;
    let mut marginal = income_tax_marginal(gross, &rates.federal)
        + income_tax_marginal(gross, &rates.quebec);
    if gross >= p.pension_plan.exemption && gross < p.pension_plan.max_earnings {
        marginal += p.pension_plan.rate;
    }
    if gross < p.parental_insurance.max_earnings {
        marginal += p.parental_insurance.rate;
    }
    if gross < p.employment_insurance.max_earnings {
        marginal += p.employment_insurance.rate;
    }

    let pays = Decimal::from(input.pay_frequency.pays_per_year());
    let output = TaxCalculationResult {
        gross_income: gross,
        federal_tax,
        provincial_tax,
        pension_plan: payroll.pension_plan,
        parental_insurance: payroll.parental_insurance,
        employment_insurance: payroll.employment_insurance,
        total_deductions,
        net_income,
        average_deduction_rate,
        marginal_rate: marginal,
        pay_frequency: input.pay_frequency,
        gross_per_pay: gross / pays,
        net_per_pay: net_income / pays,
    };

    tracing::debug!(
        tax_year = rates.tax_year,
        gross = %gross,
        total_deductions = %total_deductions,
        net = %net_income,
        "payroll computed"
    );

    Ok(with_metadata(
        "Quebec payroll: federal (abated) and Quebec progressive tax after basic personal \
         amounts, plus QPP, QPIP and EI contributions",
        &serde_json::json!({
            "gross_income": gross.to_string(),
            "pay_frequency": input.pay_frequency,
            "federal_basic_personal_amount": rates.federal.basic_personal_amount.to_string(),
            "quebec_basic_personal_amount": rates.quebec.basic_personal_amount.to_string(),
            "federal_abatement_rate": rates.federal.abatement_rate.to_string(),
        }),
        Vec::new(),
        Some(rates.tax_year),
        output,
    ))
}

impl Summarize for TaxCalculationResult {
    fn summary(&self) -> Vec<ReportLine> {
        vec![
            ReportLine::money("Gross income", self.gross_income),
            ReportLine::money("Federal tax", self.federal_tax),
            ReportLine::money("Quebec tax", self.provincial_tax),
            ReportLine::money("QPP", self.pension_plan),
            ReportLine::money("QPIP", self.parental_insurance),
            ReportLine::money("EI", self.employment_insurance),
            ReportLine::money("Total deductions", self.total_deductions),
            ReportLine::money("Net income", self.net_income),
            ReportLine::money("Net per pay", self.net_per_pay),
            ReportLine::rate("Average deduction rate", self.average_deduction_rate),
            ReportLine::rate("Marginal rate", self.marginal_rate),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::builtin::rates_2025;
    use rust_decimal_macros::dec;

    fn run(gross: Money) -> TaxCalculationResult {
        let input = PayrollInput {
            gross_income: gross,
            pay_frequency: PayFrequency::Biweekly,
        };
        calculate_payroll(&input, &rates_2025().unwrap()).unwrap().result
    }

    #[test]
    fn test_sixty_thousand_salary() {
        let r = run(dec!(60_000));
        // Federal: (60,000 - 16,129) * 15% * (1 - 16.5%)
        assert_eq!(r.federal_tax, dec!(43_871) * dec!(0.15) * dec!(0.835));
        // Quebec: 60,000 - 18,571 = 41,429, entirely in the 14% bracket
        assert_eq!(r.provincial_tax, dec!(41_429) * dec!(0.14));
        assert_eq!(r.pension_plan, dec!(3_616));
        assert_eq!(r.parental_insurance, dec!(296.4));
        assert_eq!(r.employment_insurance, dec!(786));
        assert_eq!(
            r.total_deductions,
            r.federal_tax + r.provincial_tax + r.pension_plan + r.parental_insurance
                + r.employment_insurance
        );
        assert_eq!(r.net_income, r.gross_income - r.total_deductions);
        assert_eq!(r.net_per_pay, r.net_income / dec!(26));
    }

    #[test]
    fn test_income_below_basic_amounts_pays_no_income_tax() {
        let r = run(dec!(15_000));
        assert_eq!(r.federal_tax, dec!(0));
        assert_eq!(r.provincial_tax, dec!(0));
        assert!(r.pension_plan > dec!(0));
    }

    #[test]
    fn test_zero_income() {
        let r = run(dec!(0));
        assert_eq!(r.total_deductions, dec!(0));
        assert_eq!(r.net_income, dec!(0));
        assert_eq!(r.average_deduction_rate, dec!(0));
    }

    #[test]
    fn test_negative_income_rejected() {
        let input = PayrollInput {
            gross_income: dec!(-1),
            pay_frequency: PayFrequency::Monthly,
        };
        assert!(calculate_payroll(&input, &rates_2025().unwrap()).is_err());
    }

    #[test]
    fn test_marginal_rate_at_sixty_thousand() {
        let r = run(dec!(60_000));
        let expected = dec!(0.15) * dec!(0.835) + dec!(0.14) + dec!(0.064) + dec!(0.00494) + dec!(0.0131);
        assert_eq!(r.marginal_rate, expected);
    }

    #[test]
    fn test_high_income_programs_capped() {
        let r = run(dec!(300_000));
        assert_eq!(r.pension_plan, dec!(4_339.2));
        assert_eq!(r.employment_insurance, dec!(65_700) * dec!(0.0131));
        assert!(r.net_income > dec!(0));
    }

    #[test]
    fn test_metadata_carries_tax_year() {
        let input = PayrollInput {
            gross_income: dec!(50_000),
            pay_frequency: PayFrequency::Monthly,
        };
        let out = calculate_payroll(&input, &rates_2025().unwrap()).unwrap();
        assert_eq!(out.metadata.tax_year, Some(2025));
        assert!(out.warnings.is_empty());
    }
}
