//! Statutory payroll deductions.
//!
//! Each program is computed on its own from gross earnings; none of them
//! reads another's result.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tables::{InsuranceRates, PayrollRates, PensionPlanRates};
use crate::types::Money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollDeductions {
    pub pension_plan: Money,
    pub parental_insurance: Money,
    pub employment_insurance: Money,
    pub total: Money,
}

/// `rate × (min(earnings, max) − exemption)`, never negative.
pub fn pension_plan_contribution(earnings: Money, rates: &PensionPlanRates) -> Money {
    let pensionable = earnings.min(rates.max_earnings) - rates.exemption;
    (pensionable * rates.rate).max(Decimal::ZERO)
}

pub fn parental_insurance_premium(earnings: Money, rates: &InsuranceRates) -> Money {
    insured_premium(earnings, rates)
}

pub fn employment_insurance_premium(earnings: Money, rates: &InsuranceRates) -> Money {
    insured_premium(earnings, rates)
}

fn insured_premium(earnings: Money, rates: &InsuranceRates) -> Money {
    (earnings.min(rates.max_earnings) * rates.rate).max(Decimal::ZERO)
}

pub fn compute_payroll_deductions(earnings: Money, rates: &PayrollRates) -> PayrollDeductions {
    let pension_plan = pension_plan_contribution(earnings, &rates.pension_plan);
    let parental_insurance = parental_insurance_premium(earnings, &rates.parental_insurance);
    let employment_insurance = employment_insurance_premium(earnings, &rates.employment_insurance);

    PayrollDeductions {
        pension_plan,
        parental_insurance,
        employment_insurance,
        total: pension_plan + parental_insurance + employment_insurance,
    }
}
