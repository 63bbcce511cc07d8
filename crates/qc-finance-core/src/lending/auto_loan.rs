use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::{amortize, BalancePoint, LoanParameters};
use crate::consumer::sales_tax::{compute_sales_tax, SalesTaxResult};
use crate::error::QcFinanceError;
use crate::report::{ReportLine, Summarize};
use crate::tables::RateTable;
use crate::types::{with_metadata, ComputationOutput, Money, PaymentFrequency, Rate};
use crate::validate;
use crate::QcFinanceResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoLoanInput {
    pub vehicle_price: Money,
    #[serde(default)]
    pub down_payment: Money,
    #[serde(default)]
    pub trade_in_value: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
    #[serde(default)]
    pub frequency: PaymentFrequency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoLoanResult {
    pub vehicle_price: Money,
    /// Price less down payment and trade-in; the sales-tax base.
    pub taxable_amount: Money,
    pub sales_tax: SalesTaxResult,
    pub amount_financed: Money,
    pub frequency: PaymentFrequency,
    pub payment: Money,
    pub number_of_payments: u32,
    pub total_paid: Money,
    pub total_interest: Money,
    /// Everything paid for the vehicle: up-front amounts plus loan payments.
    pub total_cost: Money,
    pub schedule: Vec<BalancePoint>,
}

const MAX_TERM_MONTHS: u32 = 120;

/// Number of payments for a term in months at the given frequency.
pub fn periods_for_term(term_months: u32, frequency: PaymentFrequency) -> QcFinanceResult<u32> {
    match frequency {
        PaymentFrequency::Monthly => Ok(term_months),
        // 26 payments per 12 months, rounded to the nearest whole payment.
        PaymentFrequency::Biweekly => term_months
            .checked_mul(26)
            .and_then(|n| n.checked_add(6))
            .map(|n| n / 12)
            .ok_or_else(|| QcFinanceError::invalid("term_months", "number of payments overflows")),
    }
}

/// Vehicle financing with GST/QST charged on the net-of-trade amount.
pub fn calculate_auto_loan(
    input: &AutoLoanInput,
    rates: &RateTable,
) -> QcFinanceResult<ComputationOutput<AutoLoanResult>> {
    validate_auto_loan_input(input)?;

    let taxable_amount = input.vehicle_price - input.down_payment - input.trade_in_value;
    let sales_tax = compute_sales_tax(taxable_amount, &rates.sales_tax);
    let amount_financed = taxable_amount + sales_tax.total_tax;

    let params = LoanParameters {
        principal: amount_financed,
        annual_rate: input.annual_rate,
        frequency: input.frequency,
        total_periods: periods_for_term(input.term_months, input.frequency)?,
    };
    let loan = amortize(&params)?;

    tracing::debug!(
        taxable = %taxable_amount,
        tax = %sales_tax.total_tax,
        payment = %loan.payment,
        "auto loan computed"
    );

    let output = AutoLoanResult {
        vehicle_price: input.vehicle_price,
        taxable_amount,
        amount_financed,
        frequency: input.frequency,
        payment: loan.payment,
        number_of_payments: loan.number_of_payments,
        total_paid: loan.total_paid,
        total_interest: loan.total_interest,
        total_cost: input.down_payment + input.trade_in_value + loan.total_paid,
        schedule: loan.schedule,
        sales_tax,
    };

    Ok(with_metadata(
        "Auto loan: GST and QST on price net of down payment and trade-in, financed with the \
         loan, level-payment amortization",
        &serde_json::json!({
            "vehicle_price": input.vehicle_price.to_string(),
            "down_payment": input.down_payment.to_string(),
            "trade_in_value": input.trade_in_value.to_string(),
            "annual_rate": input.annual_rate.to_string(),
            "term_months": input.term_months,
            "frequency": input.frequency,
        }),
        Vec::new(),
        Some(rates.tax_year),
        output,
    ))
}

fn validate_auto_loan_input(input: &AutoLoanInput) -> QcFinanceResult<()> {
    validate::positive("vehicle_price", input.vehicle_price)?;
    validate::non_negative("down_payment", input.down_payment)?;
    validate::non_negative("trade_in_value", input.trade_in_value)?;
    if input.down_payment + input.trade_in_value > input.vehicle_price {
        return Err(QcFinanceError::invalid(
            "down_payment",
            "down payment and trade-in together exceed the vehicle price",
        ));
    }
    validate::unit_rate("annual_rate", input.annual_rate)?;
    validate::positive_count("term_months", input.term_months)?;
    validate::at_most("term_months", input.term_months, MAX_TERM_MONTHS)?;
    Ok(())
}

impl Summarize for AutoLoanResult {
    fn summary(&self) -> Vec<ReportLine> {
        vec![
            ReportLine::money("Vehicle price", self.vehicle_price),
            ReportLine::money("Taxable amount", self.taxable_amount),
            ReportLine::money("GST", self.sales_tax.gst),
            ReportLine::money("QST", self.sales_tax.qst),
            ReportLine::money("Amount financed", self.amount_financed),
            ReportLine::money("Payment", self.payment),
            ReportLine::money("Total interest", self.total_interest),
            ReportLine::money("Total cost", self.total_cost),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::builtin::rates_2025;
    use rust_decimal_macros::dec;

    fn sample() -> AutoLoanInput {
        AutoLoanInput {
            vehicle_price: dec!(30_000),
            down_payment: dec!(5_000),
            trade_in_value: dec!(0),
            annual_rate: dec!(0.069),
            term_months: 60,
            frequency: PaymentFrequency::Monthly,
        }
    }

    #[test]
    fn test_tax_on_net_of_down_payment() {
        let out = calculate_auto_loan(&sample(), &rates_2025().unwrap()).unwrap();
        assert_eq!(out.result.taxable_amount, dec!(25_000));
        assert_eq!(out.result.sales_tax.total_tax, dec!(3_743.75));
        assert_eq!(out.result.amount_financed, dec!(28_743.75));
    }

    #[test]
    fn test_trade_in_also_reduces_tax_base() {
        let mut input = sample();
        input.down_payment = dec!(2_000);
        input.trade_in_value = dec!(3_000);
        let out = calculate_auto_loan(&input, &rates_2025().unwrap()).unwrap();
        assert_eq!(out.result.sales_tax.total_tax, dec!(3_743.75));
    }

    #[test]
    fn test_payment_and_totals() {
        let out = calculate_auto_loan(&sample(), &rates_2025().unwrap()).unwrap();
        let r = &out.result;
        assert_eq!(r.number_of_payments, 60);
        assert_eq!(r.total_paid, r.payment * dec!(60));
        assert_eq!(r.total_paid - r.total_interest, r.amount_financed);
        assert_eq!(r.total_cost, dec!(5_000) + r.total_paid);
        assert_eq!(r.schedule.len(), 5);
    }

    #[test]
    fn test_biweekly_periods() {
        assert_eq!(periods_for_term(60, PaymentFrequency::Biweekly).unwrap(), 130);
        assert_eq!(periods_for_term(48, PaymentFrequency::Biweekly).unwrap(), 104);
        assert_eq!(periods_for_term(60, PaymentFrequency::Monthly).unwrap(), 60);
        assert!(periods_for_term(200_000_000, PaymentFrequency::Biweekly).is_err());
    }

    #[test]
    fn test_zero_rate_loan() {
        let mut input = sample();
        input.annual_rate = dec!(0);
        let out = calculate_auto_loan(&input, &rates_2025().unwrap()).unwrap();
        assert_eq!(out.result.payment, dec!(28_743.75) / dec!(60));
        assert_eq!(out.result.total_interest, dec!(0));
    }

    #[test]
    fn test_down_payment_above_price_rejected() {
        let mut input = sample();
        input.down_payment = dec!(31_000);
        let err = calculate_auto_loan(&input, &rates_2025().unwrap()).unwrap_err();
        assert!(matches!(err, QcFinanceError::InvalidInput { .. }));
    }

    #[test]
    fn test_zero_term_rejected() {
        let mut input = sample();
        input.term_months = 0;
        assert!(calculate_auto_loan(&input, &rates_2025().unwrap()).is_err());
    }
}
