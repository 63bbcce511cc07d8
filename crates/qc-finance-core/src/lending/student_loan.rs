use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::{amortize, BalancePoint, LoanParameters};
use crate::report::{ReportLine, Summarize};
use crate::tables::RateTable;
use crate::types::{with_metadata, ComputationOutput, Money, PaymentFrequency, Rate};
use crate::validate;
use crate::QcFinanceResult;

const MAX_REPAYMENT_MONTHS: u32 = 360;
const MAX_GRACE_MONTHS: u32 = 120;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentLoanInput {
    pub principal: Money,
    pub annual_rate: Rate,
    pub repayment_months: u32,
    /// Months after studies end during which interest accrues but no
    /// payment is due; accrued interest is added to the balance.
    #[serde(default)]
    pub grace_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentLoanResult {
    pub principal: Money,
    pub grace_interest: Money,
    pub repayment_balance: Money,
    pub monthly_payment: Money,
    pub number_of_payments: u32,
    pub total_paid: Money,
    /// Grace-period interest plus interest over the repayment term.
    pub total_interest: Money,
    pub federal_credit: Money,
    pub quebec_credit: Money,
    pub interest_tax_credit: Money,
    pub net_interest_cost: Money,
    pub schedule: Vec<BalancePoint>,
}

/// Student loan repayment with the non-refundable interest credits.
///
/// The credits are a flat share of interest paid, not of payments.
pub fn calculate_student_loan(
    input: &StudentLoanInput,
    rates: &RateTable,
) -> QcFinanceResult<ComputationOutput<StudentLoanResult>> {
    validate_student_loan_input(input)?;

    let grace_interest =
        input.principal * input.annual_rate * Decimal::from(input.grace_months) / Decimal::from(12u32);
    let repayment_balance = input.principal + grace_interest;

    let loan = amortize(&LoanParameters {
        principal: repayment_balance,
        annual_rate: input.annual_rate,
        frequency: PaymentFrequency::Monthly,
        total_periods: input.repayment_months,
    })?;

    let total_interest = loan.total_interest + grace_interest;
    let credit_rates = &rates.student_loan;
    let federal_credit = total_interest * credit_rates.federal_interest_credit_rate;
    let quebec_credit = total_interest * credit_rates.quebec_interest_credit_rate;
    let interest_tax_credit = federal_credit + quebec_credit;

    tracing::debug!(
        principal = %input.principal,
        payment = %loan.payment,
        credit = %interest_tax_credit,
        "student loan computed"
    );

    let output = StudentLoanResult {
        principal: input.principal,
        grace_interest,
        repayment_balance,
        monthly_payment: loan.payment,
        number_of_payments: loan.number_of_payments,
        total_paid: loan.total_paid,
        total_interest,
        federal_credit,
        quebec_credit,
        interest_tax_credit,
        net_interest_cost: total_interest - interest_tax_credit,
        schedule: loan.schedule,
    };

    Ok(with_metadata(
        "Student loan: simple interest capitalised over the grace period, monthly level \
         payments, federal and Quebec credits as a share of interest paid",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate": input.annual_rate.to_string(),
            "repayment_months": input.repayment_months,
            "grace_months": input.grace_months,
            "combined_credit_rate": credit_rates.combined_credit_rate().to_string(),
        }),
        Vec::new(),
        Some(rates.tax_year),
        output,
    ))
}

fn validate_student_loan_input(input: &StudentLoanInput) -> QcFinanceResult<()> {
    validate::positive("principal", input.principal)?;
    validate::unit_rate("annual_rate", input.annual_rate)?;
    validate::positive_count("repayment_months", input.repayment_months)?;
    validate::at_most("repayment_months", input.repayment_months, MAX_REPAYMENT_MONTHS)?;
    validate::at_most("grace_months", input.grace_months, MAX_GRACE_MONTHS)?;
    Ok(())
}

impl Summarize for StudentLoanResult {
    fn summary(&self) -> Vec<ReportLine> {
        vec![
            ReportLine::money("Principal", self.principal),
            ReportLine::money("Grace-period interest", self.grace_interest),
            ReportLine::money("Monthly payment", self.monthly_payment),
            ReportLine::money("Total interest", self.total_interest),
            ReportLine::money("Interest tax credit", self.interest_tax_credit),
            ReportLine::money("Net interest cost", self.net_interest_cost),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::builtin::rates_2025;
    use rust_decimal_macros::dec;

    fn sample() -> StudentLoanInput {
        StudentLoanInput {
            principal: dec!(20_000),
            annual_rate: dec!(0.0645),
            repayment_months: 120,
            grace_months: 0,
        }
    }

    #[test]
    fn test_credit_is_share_of_interest() {
        let out = calculate_student_loan(&sample(), &rates_2025().unwrap()).unwrap();
        let r = &out.result;
        assert_eq!(r.federal_credit, r.total_interest * dec!(0.15));
        assert_eq!(r.quebec_credit, r.total_interest * dec!(0.20));
        assert_eq!(r.interest_tax_credit, r.federal_credit + r.quebec_credit);
        assert_eq!(r.net_interest_cost, r.total_interest - r.interest_tax_credit);
    }

    #[test]
    fn test_no_grace_means_no_capitalisation() {
        let out = calculate_student_loan(&sample(), &rates_2025().unwrap()).unwrap();
        assert_eq!(out.result.grace_interest, dec!(0));
        assert_eq!(out.result.repayment_balance, dec!(20_000));
        assert_eq!(out.result.total_paid - out.result.total_interest, dec!(20_000));
    }

    #[test]
    fn test_grace_interest_capitalised() {
        let mut input = sample();
        input.grace_months = 6;
        let out = calculate_student_loan(&input, &rates_2025().unwrap()).unwrap();
        // 20,000 * 6.45% * 6/12
        assert_eq!(out.result.grace_interest, dec!(645));
        assert_eq!(out.result.repayment_balance, dec!(20_645));
    }

    #[test]
    fn test_interest_free_loan_has_no_credit() {
        let mut input = sample();
        input.annual_rate = dec!(0);
        let out = calculate_student_loan(&input, &rates_2025().unwrap()).unwrap();
        // 20,000 / 120 does not terminate, so allow for the last-digit residue.
        assert!(out.result.interest_tax_credit.abs() < dec!(0.000001));
    }

    #[test]
    fn test_zero_principal_rejected() {
        let mut input = sample();
        input.principal = dec!(0);
        assert!(calculate_student_loan(&input, &rates_2025().unwrap()).is_err());
    }
}
