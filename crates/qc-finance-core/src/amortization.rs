//! Level-payment loan amortization shared by the mortgage, auto-loan and
//! student-loan calculators.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::{Deserialize, Serialize};

use crate::error::QcFinanceError;
use crate::types::{Money, PaymentFrequency, Rate, Years};
use crate::validate;
use crate::QcFinanceResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: Money,
    /// Nominal annual rate (0.048 = 4.8%)
    pub annual_rate: Rate,
    pub frequency: PaymentFrequency,
    pub total_periods: u32,
}

impl LoanParameters {
    pub fn from_years(
        principal: Money,
        annual_rate: Rate,
        frequency: PaymentFrequency,
        years: u32,
    ) -> QcFinanceResult<Self> {
        let total_periods = years
            .checked_mul(frequency.periods_per_year())
            .ok_or_else(|| QcFinanceError::invalid("years", "number of payments overflows"))?;
        Ok(LoanParameters {
            principal,
            annual_rate,
            frequency,
            total_periods,
        })
    }
}

/// Outstanding balance at the end of a year of the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub year: u32,
    pub balance: Money,
    pub cumulative_principal: Money,
    pub cumulative_interest: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub payment: Money,
    pub number_of_payments: u32,
    pub total_paid: Money,
    pub total_interest: Money,
    pub schedule: Vec<BalancePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressTest {
    pub qualifying_rate: Rate,
    pub contract_payment: Money,
    pub qualifying_payment: Money,
    pub payment_delta: Money,
}

/// Payoff horizon when the monthly payment is split into 26 half-payments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AcceleratedPayoff {
    Computable {
        biweekly_payment: Money,
        annual_payment: Money,
        payoff_years: Years,
        years_saved: Years,
        interest_saved: Money,
    },
    NotComputable {
        reason: String,
    },
}

/// Rate charged per payment period.
pub fn periodic_rate(annual_rate: Rate, periods_per_year: u32) -> Rate {
    annual_rate / Decimal::from(periods_per_year)
}

/// Level payment `P·r(1+r)^n / ((1+r)^n − 1)` with `r = annual_rate / periods_per_year`.
///
/// At a zero rate the payment is `principal / total_periods`.
pub fn payment_amount(
    principal: Money,
    annual_rate: Rate,
    periods_per_year: u32,
    total_periods: u32,
) -> QcFinanceResult<Money> {
    validate::non_negative("principal", principal)?;
    validate::non_negative("annual_rate", annual_rate)?;
    validate::positive_count("periods_per_year", periods_per_year)?;
    validate::positive_count("total_periods", total_periods)?;

    let r = periodic_rate(annual_rate, periods_per_year);
    if r.is_zero() {
        return Ok(principal / Decimal::from(total_periods));
    }

    let factor = (Decimal::ONE + r)
        .checked_powu(u64::from(total_periods))
        .ok_or_else(|| {
            QcFinanceError::invalid("total_periods", "growth factor overflows for this rate and term")
        })?;
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(QcFinanceError::DivisionByZero {
            context: "annuity payment denominator".into(),
        });
    }

    Ok(principal * r * factor / denominator)
}

/// Year-end balances for a level-payment loan.
///
/// Interest accrues on the running balance each period and the remainder of
/// the payment retires principal. The balance is clamped to exactly zero the
/// moment it would go non-positive, and the final period always retires
/// whatever residue is left, so the last point is zero.
pub fn project_balance(
    principal: Money,
    annual_rate: Rate,
    periods_per_year: u32,
    total_periods: u32,
    payment: Money,
) -> QcFinanceResult<Vec<BalancePoint>> {
    validate::positive_count("periods_per_year", periods_per_year)?;
    let r = periodic_rate(annual_rate, periods_per_year);
    let mut points = Vec::new();
    let mut balance = principal;
    let mut cumulative_principal = Decimal::ZERO;
    let mut cumulative_interest = Decimal::ZERO;

    for period in 1..=total_periods {
        let interest = balance * r;
        let mut principal_portion = payment - interest;
        let finished = principal_portion >= balance || period == total_periods;
        if finished {
            principal_portion = balance;
        }

        balance = (balance - principal_portion).max(Decimal::ZERO);
        cumulative_principal += principal_portion;
        cumulative_interest += interest;

        if finished || period % periods_per_year == 0 {
            points.push(BalancePoint {
                year: period.div_ceil(periods_per_year),
                balance,
                cumulative_principal,
                cumulative_interest,
            });
        }
        if finished {
            break;
        }
    }

    Ok(points)
}

/// Payment, totals and schedule for a loan.
///
/// `total_paid = payment × number_of_payments` and
/// `total_interest = total_paid − principal` hold exactly.
pub fn amortize(params: &LoanParameters) -> QcFinanceResult<LoanResult> {
    let periods_per_year = params.frequency.periods_per_year();
    let payment = payment_amount(
        params.principal,
        params.annual_rate,
        periods_per_year,
        params.total_periods,
    )?;
    let total_paid = payment * Decimal::from(params.total_periods);
    let schedule = project_balance(
        params.principal,
        params.annual_rate,
        periods_per_year,
        params.total_periods,
        payment,
    )?;

    Ok(LoanResult {
        payment,
        number_of_payments: params.total_periods,
        total_paid,
        total_interest: total_paid - params.principal,
        schedule,
    })
}

/// Payment at the contract rate versus at `contract rate + buffer`.
pub fn stress_test(params: &LoanParameters, buffer: Rate) -> QcFinanceResult<StressTest> {
    let periods_per_year = params.frequency.periods_per_year();
    let qualifying_rate = params.annual_rate + buffer;
    let contract_payment = payment_amount(
        params.principal,
        params.annual_rate,
        periods_per_year,
        params.total_periods,
    )?;
    let qualifying_payment = payment_amount(
        params.principal,
        qualifying_rate,
        periods_per_year,
        params.total_periods,
    )?;

    Ok(StressTest {
        qualifying_rate,
        contract_payment,
        qualifying_payment,
        payment_delta: qualifying_payment - contract_payment,
    })
}

/// Years of level annual payments needed to retire `balance`:
/// `n = ln(A / (A − B·r)) / ln(1 + r)`.
///
/// `None` when the payment does not cover the first year's interest, where
/// the logarithm is undefined.
pub fn years_to_payoff(balance: Money, annual_payment: Money, annual_rate: Rate) -> Option<Years> {
    if annual_payment <= Decimal::ZERO || annual_rate < Decimal::ZERO {
        return None;
    }
    if balance <= Decimal::ZERO {
        return Some(Decimal::ZERO);
    }
    if annual_rate.is_zero() {
        return Some(balance / annual_payment);
    }

    let uncovered = annual_payment - balance * annual_rate;
    if uncovered <= Decimal::ZERO {
        return None;
    }
    let numerator = (annual_payment / uncovered).checked_ln()?;
    let denominator = (Decimal::ONE + annual_rate).checked_ln()?;
    if denominator.is_zero() {
        return None;
    }
    Some(numerator / denominator)
}

/// Compare a monthly schedule with paying half the monthly amount every two
/// weeks (26 half-payments, i.e. 13 monthly payments a year).
///
/// The accelerated stream is discounted at the effective annual rate of the
/// monthly schedule.
pub fn accelerated_biweekly(
    principal: Money,
    annual_rate: Rate,
    monthly_payment: Money,
    amortization_years: u32,
) -> QcFinanceResult<AcceleratedPayoff> {
    validate::non_negative("principal", principal)?;
    validate::non_negative("annual_rate", annual_rate)?;

    let monthly_rate = periodic_rate(annual_rate, 12);
    let effective_annual = (Decimal::ONE + monthly_rate)
        .checked_powu(12)
        .ok_or_else(|| QcFinanceError::invalid("annual_rate", "rate too large"))?
        - Decimal::ONE;

    let biweekly_payment = monthly_payment / Decimal::TWO;
    let annual_payment = biweekly_payment * Decimal::from(26u32);

    let Some(payoff_years) = years_to_payoff(principal, annual_payment, effective_annual) else {
        return Ok(AcceleratedPayoff::NotComputable {
            reason: format!(
                "accelerated annual payment {annual_payment} does not cover first-year interest \
                 on {principal} at {effective_annual}"
            ),
        });
    };

    let scheduled_total = monthly_payment * Decimal::from(amortization_years) * Decimal::from(12u32);
    let accelerated_total = annual_payment * payoff_years;

    Ok(AcceleratedPayoff::Computable {
        biweekly_payment,
        annual_payment,
        payoff_years,
        years_saved: Decimal::from(amortization_years) - payoff_years,
        interest_saved: scheduled_total - accelerated_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn reference_loan() -> LoanParameters {
        LoanParameters::from_years(dec!(400_000), dec!(0.048), PaymentFrequency::Monthly, 25).unwrap()
    }

    #[test]
    fn test_reference_monthly_payment() {
        let payment = payment_amount(dec!(400_000), dec!(0.048), 12, 300).unwrap();
        assert!(
            (payment - dec!(2291.988)).abs() < dec!(0.001),
            "got {payment}"
        );
    }

    #[test]
    fn test_biweekly_uses_own_periodic_rate() {
        let biweekly = payment_amount(dec!(400_000), dec!(0.048), 26, 650).unwrap();
        assert!((biweekly - dec!(1057.252)).abs() < dec!(0.001), "got {biweekly}");
        let monthly = payment_amount(dec!(400_000), dec!(0.048), 12, 300).unwrap();
        assert_ne!(biweekly, monthly * dec!(12) / dec!(26));
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        assert_eq!(payment_amount(dec!(12_000), dec!(0), 12, 60).unwrap(), dec!(200));
    }

    #[test]
    fn test_zero_term_rejected() {
        let err = payment_amount(dec!(10_000), dec!(0.05), 12, 0).unwrap_err();
        assert!(matches!(err, QcFinanceError::InvalidInput { .. }));
    }

    #[test]
    fn test_negative_rate_rejected() {
        assert!(payment_amount(dec!(10_000), dec!(-0.01), 12, 12).is_err());
    }

    #[test]
    fn test_amortize_identities() {
        let result = amortize(&reference_loan()).unwrap();
        assert_eq!(result.number_of_payments, 300);
        assert_eq!(result.total_paid, result.payment * dec!(300));
        assert_eq!(result.total_paid - result.total_interest, dec!(400_000));
    }

    #[test]
    fn test_schedule_yearly_and_ends_at_zero() {
        let result = amortize(&reference_loan()).unwrap();
        assert_eq!(result.schedule.len(), 25);
        assert_eq!(result.schedule[0].year, 1);
        assert_eq!(result.schedule.last().unwrap().year, 25);
        assert_eq!(result.schedule.last().unwrap().balance, Decimal::ZERO);
        for pair in result.schedule.windows(2) {
            assert!(pair[1].balance <= pair[0].balance);
        }
    }

    #[test]
    fn test_schedule_principal_sums_to_loan() {
        let result = amortize(&reference_loan()).unwrap();
        let last = result.schedule.last().unwrap();
        assert!((last.cumulative_principal - dec!(400_000)).abs() < dec!(0.000001));
        assert!((last.cumulative_interest - result.total_interest).abs() < dec!(0.01));
    }

    #[test]
    fn test_overpayment_stops_early() {
        let points = project_balance(dec!(10_000), dec!(0.06), 12, 120, dec!(5_000)).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].year, 1);
        assert_eq!(points[0].balance, Decimal::ZERO);
    }

    #[test]
    fn test_zero_periods_per_year_rejected() {
        let err = project_balance(dec!(10_000), dec!(0.06), 0, 120, dec!(100)).unwrap_err();
        assert!(matches!(err, QcFinanceError::InvalidInput { .. }));
    }

    #[test]
    fn test_term_overflow_rejected() {
        let err = LoanParameters::from_years(
            dec!(400_000),
            dec!(0.048),
            PaymentFrequency::Biweekly,
            170_000_000,
        )
        .unwrap_err();
        assert!(matches!(err, QcFinanceError::InvalidInput { ref field, .. } if field == "years"));
    }

    #[test]
    fn test_stress_test_adds_buffer() {
        let st = stress_test(&reference_loan(), dec!(0.02)).unwrap();
        assert_eq!(st.qualifying_rate, dec!(0.068));
        assert!((st.qualifying_payment - dec!(2776.288)).abs() < dec!(0.001));
        assert_eq!(st.payment_delta, st.qualifying_payment - st.contract_payment);
    }

    #[test]
    fn test_years_to_payoff_domain() {
        // Interest alone is 5,000; a 4,000 payment never retires the loan.
        assert_eq!(years_to_payoff(dec!(100_000), dec!(4_000), dec!(0.05)), None);
        assert_eq!(years_to_payoff(dec!(100_000), dec!(5_000), dec!(0.05)), None);
        assert_eq!(years_to_payoff(dec!(100_000), dec!(10_000), dec!(0)), Some(dec!(10)));
        assert_eq!(years_to_payoff(dec!(0), dec!(10_000), dec!(0.05)), Some(dec!(0)));
    }

    #[test]
    fn test_years_to_payoff_matches_annuity() {
        // A 10-year annual annuity should be recovered as 10 years.
        let payment = payment_amount(dec!(100_000), dec!(0.05), 1, 10).unwrap();
        let years = years_to_payoff(dec!(100_000), payment, dec!(0.05)).unwrap();
        assert!((years - dec!(10)).abs() < dec!(0.0001), "got {years}");
    }

    #[test]
    fn test_accelerated_biweekly_shortens_amortization() {
        let monthly = payment_amount(dec!(400_000), dec!(0.048), 12, 300).unwrap();
        match accelerated_biweekly(dec!(400_000), dec!(0.048), monthly, 25).unwrap() {
            AcceleratedPayoff::Computable {
                payoff_years,
                years_saved,
                annual_payment,
                interest_saved,
                ..
            } => {
                assert!((payoff_years - dec!(22.4437)).abs() < dec!(0.001), "got {payoff_years}");
                assert_eq!(annual_payment, monthly * dec!(13));
                assert!(years_saved > dec!(2.5));
                assert!(interest_saved > Decimal::ZERO);
            }
            other => panic!("expected computable payoff, got {other:?}"),
        }
    }

    #[test]
    fn test_accelerated_biweekly_not_computable() {
        let outcome = accelerated_biweekly(dec!(400_000), dec!(0.048), dec!(1_000), 25).unwrap();
        assert!(matches!(outcome, AcceleratedPayoff::NotComputable { .. }));
    }
}
