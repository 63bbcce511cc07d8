use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::{
    accelerated_biweekly, amortize, payment_amount, stress_test, AcceleratedPayoff, BalancePoint,
    LoanParameters, StressTest,
};
use crate::error::QcFinanceError;
use crate::report::{ReportLine, Summarize};
use crate::tables::RateTable;
use crate::types::{with_metadata, ComputationOutput, Money, PaymentFrequency, Rate};
use crate::validate;
use crate::QcFinanceResult;

const MAX_AMORTIZATION_YEARS: u32 = 40;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    pub purchase_price: Money,
    pub down_payment: Money,
    /// Nominal annual contract rate (0.048 = 4.8%)
    pub annual_rate: Rate,
    pub amortization_years: u32,
    #[serde(default)]
    pub frequency: PaymentFrequency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageResult {
    pub purchase_price: Money,
    pub down_payment: Money,
    pub down_payment_ratio: Rate,
    pub minimum_down_payment: Money,
    /// Price less down payment, before any insurance premium.
    pub base_loan: Money,
    pub insurance_rate: Rate,
    pub insurance_premium: Money,
    /// Amount actually amortized (base loan plus premium).
    pub principal: Money,
    pub frequency: PaymentFrequency,
    pub payment: Money,
    pub number_of_payments: u32,
    pub total_paid: Money,
    pub total_interest: Money,
    pub schedule: Vec<BalancePoint>,
    pub stress_test: StressTest,
    pub accelerated_biweekly: AcceleratedPayoff,
}

/// Default-insurance premium on the loan amount (not the price).
///
/// Returns the premium rate and premium. No insurance applies from the
/// insurance-free down payment ratio upwards, inclusive.
pub fn insurance_premium(
    purchase_price: Money,
    down_payment: Money,
    rates: &RateTable,
) -> (Rate, Money) {
    if purchase_price <= Decimal::ZERO {
        return (Decimal::ZERO, Decimal::ZERO);
    }
    let ratio = down_payment / purchase_price;
    let premium_rate = rates.mortgage.premium_rate(ratio);
    let loan = (purchase_price - down_payment).max(Decimal::ZERO);
    (premium_rate, loan * premium_rate)
}

pub fn calculate_mortgage(
    input: &MortgageInput,
    rates: &RateTable,
) -> QcFinanceResult<ComputationOutput<MortgageResult>> {
    validate_mortgage_input(input)?;
    let mut warnings: Vec<String> = Vec::new();
    let rules = &rates.mortgage;

    let down_payment_ratio = input.down_payment / input.purchase_price;
    let minimum_down_payment = rules.minimum_down_payment(input.purchase_price);
    if input.down_payment < minimum_down_payment {
        warnings.push(format!(
            "Down payment {} is below the statutory minimum of {} for a price of {}",
            input.down_payment, minimum_down_payment, input.purchase_price
        ));
    }

    let base_loan = input.purchase_price - input.down_payment;
    let (mut insurance_rate, mut premium) =
        insurance_premium(input.purchase_price, input.down_payment, rates);
    if premium > Decimal::ZERO && input.purchase_price >= rules.max_insurable_price {
        warnings.push(format!(
            "Default insurance is unavailable at a price of {} or more; a down payment of at \
             least {} is required",
            rules.max_insurable_price,
            input.purchase_price * rules.insurance_free_ratio
        ));
        insurance_rate = Decimal::ZERO;
        premium = Decimal::ZERO;
    }
    let principal = base_loan + premium;

    let params = LoanParameters::from_years(
        principal,
        input.annual_rate,
        input.frequency,
        input.amortization_years,
    )?;
    let loan = amortize(&params)?;
    let stress = stress_test(&params, rules.stress_test_buffer)?;

    let monthly_payment = match input.frequency {
        PaymentFrequency::Monthly => loan.payment,
        PaymentFrequency::Biweekly => {
            let monthly = LoanParameters::from_years(
                principal,
                input.annual_rate,
                PaymentFrequency::Monthly,
                input.amortization_years,
            )?;
            payment_amount(principal, input.annual_rate, 12, monthly.total_periods)?
        }
    };
    let accelerated = accelerated_biweekly(
        principal,
        input.annual_rate,
        monthly_payment,
        input.amortization_years,
    )?;
    if let AcceleratedPayoff::NotComputable { reason } = &accelerated {
        warnings.push(format!("Accelerated biweekly comparison unavailable: {reason}"));
    }

    for w in &warnings {
        tracing::warn!("{w}");
    }
    tracing::debug!(
        principal = %principal,
        payment = %loan.payment,
        premium = %premium,
        "mortgage computed"
    );

    let output = MortgageResult {
        purchase_price: input.purchase_price,
        down_payment: input.down_payment,
        down_payment_ratio,
        minimum_down_payment,
        base_loan,
        insurance_rate,
        insurance_premium: premium,
        principal,
        frequency: input.frequency,
        payment: loan.payment,
        number_of_payments: loan.number_of_payments,
        total_paid: loan.total_paid,
        total_interest: loan.total_interest,
        schedule: loan.schedule,
        stress_test: stress,
        accelerated_biweekly: accelerated,
    };

    Ok(with_metadata(
        "Mortgage: default-insurance premium tiered by down payment and added to the loan, \
         level-payment amortization, stress test at contract rate plus buffer, accelerated \
         biweekly comparison",
        &serde_json::json!({
            "purchase_price": input.purchase_price.to_string(),
            "down_payment": input.down_payment.to_string(),
            "annual_rate": input.annual_rate.to_string(),
            "amortization_years": input.amortization_years,
            "frequency": input.frequency,
            "stress_test_buffer": rules.stress_test_buffer.to_string(),
        }),
        warnings,
        Some(rates.tax_year),
        output,
    ))
}

fn validate_mortgage_input(input: &MortgageInput) -> QcFinanceResult<()> {
    validate::positive("purchase_price", input.purchase_price)?;
    validate::non_negative("down_payment", input.down_payment)?;
    if input.down_payment >= input.purchase_price {
        return Err(QcFinanceError::invalid(
            "down_payment",
            "down payment must be less than the purchase price",
        ));
    }
    validate::unit_rate("annual_rate", input.annual_rate)?;
    validate::positive_count("amortization_years", input.amortization_years)?;
    validate::at_most("amortization_years", input.amortization_years, MAX_AMORTIZATION_YEARS)?;
    Ok(())
}

impl Summarize for MortgageResult {
    fn summary(&self) -> Vec<ReportLine> {
        let mut lines = vec![
            ReportLine::money("Purchase price", self.purchase_price),
            ReportLine::money("Down payment", self.down_payment),
            ReportLine::money("Insurance premium", self.insurance_premium),
            ReportLine::money("Mortgage principal", self.principal),
            ReportLine::money("Payment", self.payment),
            ReportLine::money("Total interest", self.total_interest),
            ReportLine::rate("Qualifying rate", self.stress_test.qualifying_rate),
            ReportLine::money("Qualifying payment", self.stress_test.qualifying_payment),
        ];
        if let AcceleratedPayoff::Computable {
            payoff_years,
            interest_saved,
            ..
        } = &self.accelerated_biweekly
        {
            lines.push(ReportLine::number("Accelerated payoff (years)", *payoff_years));
            lines.push(ReportLine::money("Accelerated interest saved", *interest_saved));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::builtin::rates_2025;
    use rust_decimal_macros::dec;

    fn input(price: Money, down: Money) -> MortgageInput {
        MortgageInput {
            purchase_price: price,
            down_payment: down,
            annual_rate: dec!(0.048),
            amortization_years: 25,
            frequency: PaymentFrequency::Monthly,
        }
    }

    #[test]
    fn test_twenty_percent_down_is_uninsured() {
        let rates = rates_2025().unwrap();
        let out = calculate_mortgage(&input(dec!(400_000), dec!(80_000)), &rates).unwrap();
        assert_eq!(out.result.insurance_premium, dec!(0));
        assert_eq!(out.result.principal, dec!(320_000));
    }

    #[test]
    fn test_fifteen_percent_down_premium_on_loan() {
        let rates = rates_2025().unwrap();
        let out = calculate_mortgage(&input(dec!(400_000), dec!(60_000)), &rates).unwrap();
        assert_eq!(out.result.insurance_rate, dec!(0.028));
        assert_eq!(out.result.insurance_premium, dec!(9_520));
        assert_eq!(out.result.principal, dec!(349_520));
    }

    #[test]
    fn test_lower_tiers() {
        let rates = rates_2025().unwrap();
        let (rate, premium) = insurance_premium(dec!(400_000), dec!(40_000), &rates);
        assert_eq!(rate, dec!(0.031));
        assert_eq!(premium, dec!(11_160));
        let (rate, _) = insurance_premium(dec!(400_000), dec!(20_000), &rates);
        assert_eq!(rate, dec!(0.040));
    }

    #[test]
    fn test_below_minimum_down_payment_warns() {
        let rates = rates_2025().unwrap();
        let out = calculate_mortgage(&input(dec!(600_000), dec!(30_000)), &rates).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("statutory minimum")));
    }

    #[test]
    fn test_uninsurable_price_drops_premium() {
        let rates = rates_2025().unwrap();
        let out = calculate_mortgage(&input(dec!(1_600_000), dec!(200_000)), &rates).unwrap();
        assert_eq!(out.result.insurance_premium, dec!(0));
        assert!(out.warnings.iter().any(|w| w.contains("unavailable")));
    }

    #[test]
    fn test_biweekly_frequency() {
        let rates = rates_2025().unwrap();
        let mut i = input(dec!(500_000), dec!(100_000));
        i.frequency = PaymentFrequency::Biweekly;
        let out = calculate_mortgage(&i, &rates).unwrap();
        assert_eq!(out.result.number_of_payments, 650);
        assert!(matches!(
            out.result.accelerated_biweekly,
            AcceleratedPayoff::Computable { .. }
        ));
    }

    #[test]
    fn test_stress_delta_positive() {
        let rates = rates_2025().unwrap();
        let out = calculate_mortgage(&input(dec!(400_000), dec!(80_000)), &rates).unwrap();
        assert_eq!(out.result.stress_test.qualifying_rate, dec!(0.068));
        assert!(out.result.stress_test.payment_delta > dec!(0));
    }

    #[test]
    fn test_down_payment_at_price_rejected() {
        let rates = rates_2025().unwrap();
        assert!(calculate_mortgage(&input(dec!(400_000), dec!(400_000)), &rates).is_err());
    }

    #[test]
    fn test_percent_rate_rejected() {
        let rates = rates_2025().unwrap();
        let mut i = input(dec!(400_000), dec!(80_000));
        i.annual_rate = dec!(4.8);
        assert!(calculate_mortgage(&i, &rates).is_err());
    }
}
