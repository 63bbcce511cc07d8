use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::bracket::BracketTable;
use crate::error::QcFinanceError;
use crate::types::{Money, Rate};
use crate::QcFinanceResult;

/// Personal income tax for one authority (federal or Quebec).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeTaxSchedule {
    pub brackets: BracketTable,
    pub basic_personal_amount: Money,
    /// Reduction of computed tax (the federal Quebec abatement). Zero for Quebec.
    #[serde(default)]
    pub abatement_rate: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PensionPlanRates {
    pub rate: Rate,
    pub max_earnings: Money,
    pub exemption: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceRates {
    pub rate: Rate,
    pub max_earnings: Money,
}

/// Employee-side statutory payroll programs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRates {
    /// Quebec Pension Plan
    pub pension_plan: PensionPlanRates,
    /// Quebec Parental Insurance Plan
    pub parental_insurance: InsuranceRates,
    /// Employment Insurance at the reduced Quebec rate
    pub employment_insurance: InsuranceRates,
}

/// Duties on transfer of immovables ("welcome tax").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferTaxRates {
    pub general: BracketTable,
    pub montreal: BracketTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesTaxRates {
    pub gst: Rate,
    pub qst: Rate,
}

impl SalesTaxRates {
    /// GST and QST are both levied on the pre-tax price.
    pub fn combined(&self) -> Rate {
        self.gst + self.qst
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacationPayRates {
    pub base_rate: Rate,
    pub base_weeks: u32,
    pub extended_rate: Rate,
    pub extended_weeks: u32,
    /// Years of continuous service from which the extended rate applies.
    pub extended_service_years: u32,
}

/// One income band of the daycare expense credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditBand {
    #[serde(default)]
    pub max_income: Option<Money>,
    pub rate: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaycareRates {
    pub subsidized_daily_rate: Money,
    pub max_eligible_expense_per_child: Money,
    /// Ascending by `max_income`; the last band is unbounded.
    pub credit_bands: Vec<CreditBand>,
}

impl DaycareRates {
    /// Credit rate for a family income (inclusive upper band limits).
    pub fn credit_rate(&self, family_income: Money) -> Rate {
        self.credit_bands
            .iter()
            .find(|band| band.max_income.map_or(true, |max| family_income <= max))
            .map(|band| band.rate)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Default-insurance premium for down payments at or above `min_down_payment_ratio`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceTier {
    pub min_down_payment_ratio: Rate,
    pub premium_rate: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageRules {
    /// Down payment ratio from which no insurance is required (inclusive).
    pub insurance_free_ratio: Rate,
    /// Descending by `min_down_payment_ratio`; the last tier starts at zero.
    pub insurance_tiers: Vec<InsuranceTier>,
    /// Price at or above which default insurance is unavailable.
    pub max_insurable_price: Money,
    pub stress_test_buffer: Rate,
    pub min_down_payment_first_tier: Money,
    pub min_down_payment_first_rate: Rate,
    pub min_down_payment_above_rate: Rate,
}

impl MortgageRules {
    pub fn premium_rate(&self, down_payment_ratio: Rate) -> Rate {
        if down_payment_ratio >= self.insurance_free_ratio {
            return Decimal::ZERO;
        }
        self.insurance_tiers
            .iter()
            .find(|tier| down_payment_ratio >= tier.min_down_payment_ratio)
            .map(|tier| tier.premium_rate)
            .unwrap_or(Decimal::ZERO)
    }

    /// Statutory minimum down payment for a purchase price.
    pub fn minimum_down_payment(&self, price: Money) -> Money {
        let first = price.min(self.min_down_payment_first_tier);
        let above = (price - self.min_down_payment_first_tier).max(Decimal::ZERO);
        first * self.min_down_payment_first_rate + above * self.min_down_payment_above_rate
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentLoanRates {
    pub federal_interest_credit_rate: Rate,
    pub quebec_interest_credit_rate: Rate,
}

impl StudentLoanRates {
    pub fn combined_credit_rate(&self) -> Rate {
        self.federal_interest_credit_rate + self.quebec_interest_credit_rate
    }
}

/// How the dwelling is heated, when heating is included in the rent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatingType {
    #[default]
    NotIncluded,
    Electricity,
    Gas,
    Oil,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatingAdjustments {
    pub electricity: Rate,
    pub gas: Rate,
    pub oil: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentRules {
    pub base_index: Rate,
    pub heating: HeatingAdjustments,
    /// Annual rate at which major renovation costs are passed on.
    pub renovation_rate: Rate,
}

impl RentRules {
    pub fn heating_adjustment(&self, heating: HeatingType) -> Rate {
        match heating {
            HeatingType::NotIncluded => Decimal::ZERO,
            HeatingType::Electricity => self.heating.electricity,
            HeatingType::Gas => self.heating.gas,
            HeatingType::Oil => self.heating.oil,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RrspRules {
    pub dollar_limit: Money,
}

/// Every rate, cap and bracket schedule for one tax year.
///
/// Authored once per year and never mutated; calculators receive it by
/// reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub tax_year: i32,
    pub federal: IncomeTaxSchedule,
    pub quebec: IncomeTaxSchedule,
    pub payroll: PayrollRates,
    pub transfer_tax: TransferTaxRates,
    pub sales_tax: SalesTaxRates,
    pub vacation_pay: VacationPayRates,
    pub daycare: DaycareRates,
    pub mortgage: MortgageRules,
    pub student_loan: StudentLoanRates,
    pub rent: RentRules,
    pub rrsp: RrspRules,
}

impl RateTable {
    /// Parse a table from JSON and validate it before handing it out.
    pub fn from_json(json: &str) -> QcFinanceResult<Self> {
        let table: RateTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Check every scalar rate and cross-table constraint.
    ///
    /// Bracket tables validate themselves on construction.
    pub fn validate(&self) -> QcFinanceResult<()> {
        let name = format!("rates-{}", self.tax_year);

        for (field, rate) in [
            ("federal.abatement_rate", self.federal.abatement_rate),
            ("quebec.abatement_rate", self.quebec.abatement_rate),
            ("payroll.pension_plan.rate", self.payroll.pension_plan.rate),
            ("payroll.parental_insurance.rate", self.payroll.parental_insurance.rate),
            ("payroll.employment_insurance.rate", self.payroll.employment_insurance.rate),
            ("sales_tax.gst", self.sales_tax.gst),
            ("sales_tax.qst", self.sales_tax.qst),
            ("vacation_pay.base_rate", self.vacation_pay.base_rate),
            ("vacation_pay.extended_rate", self.vacation_pay.extended_rate),
            ("mortgage.insurance_free_ratio", self.mortgage.insurance_free_ratio),
            ("mortgage.stress_test_buffer", self.mortgage.stress_test_buffer),
            ("mortgage.min_down_payment_first_rate", self.mortgage.min_down_payment_first_rate),
            ("mortgage.min_down_payment_above_rate", self.mortgage.min_down_payment_above_rate),
            ("student_loan.federal_interest_credit_rate", self.student_loan.federal_interest_credit_rate),
            ("student_loan.quebec_interest_credit_rate", self.student_loan.quebec_interest_credit_rate),
            ("rent.base_index", self.rent.base_index),
            ("rent.heating.electricity", self.rent.heating.electricity),
            ("rent.heating.gas", self.rent.heating.gas),
            ("rent.heating.oil", self.rent.heating.oil),
            ("rent.renovation_rate", self.rent.renovation_rate),
        ] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(QcFinanceError::malformed(
                    &name,
                    format!("{field} = {rate} outside [0, 1]"),
                ));
            }
        }

        for (field, amount) in [
            ("federal.basic_personal_amount", self.federal.basic_personal_amount),
            ("quebec.basic_personal_amount", self.quebec.basic_personal_amount),
            ("payroll.pension_plan.exemption", self.payroll.pension_plan.exemption),
            ("daycare.subsidized_daily_rate", self.daycare.subsidized_daily_rate),
            ("daycare.max_eligible_expense_per_child", self.daycare.max_eligible_expense_per_child),
            ("rrsp.dollar_limit", self.rrsp.dollar_limit),
        ] {
            if amount < Decimal::ZERO {
                return Err(QcFinanceError::malformed(
                    &name,
                    format!("{field} = {amount} is negative"),
                ));
            }
        }

        for (field, cap) in [
            ("payroll.pension_plan.max_earnings", self.payroll.pension_plan.max_earnings),
            ("payroll.parental_insurance.max_earnings", self.payroll.parental_insurance.max_earnings),
            ("payroll.employment_insurance.max_earnings", self.payroll.employment_insurance.max_earnings),
            ("mortgage.max_insurable_price", self.mortgage.max_insurable_price),
            ("mortgage.min_down_payment_first_tier", self.mortgage.min_down_payment_first_tier),
        ] {
            if cap <= Decimal::ZERO {
                return Err(QcFinanceError::malformed(
                    &name,
                    format!("{field} = {cap} must be positive"),
                ));
            }
        }

        if self.payroll.pension_plan.exemption >= self.payroll.pension_plan.max_earnings {
            return Err(QcFinanceError::malformed(
                &name,
                "pension plan exemption must be below maximum pensionable earnings",
            ));
        }

        self.validate_credit_bands(&name)?;
        self.validate_insurance_tiers(&name)?;

        // Deductions stacked at their top marginal rates must stay below 100%
        // of the last dollar earned, otherwise net income could go negative.
        let top = self.federal.brackets.top_rate() * (Decimal::ONE - self.federal.abatement_rate)
            + self.quebec.brackets.top_rate() * (Decimal::ONE - self.quebec.abatement_rate)
            + self.payroll.pension_plan.rate
            + self.payroll.parental_insurance.rate
            + self.payroll.employment_insurance.rate;
        if top >= Decimal::ONE {
            return Err(QcFinanceError::malformed(
                &name,
                format!("combined top marginal rate {top} reaches 100%"),
            ));
        }

        Ok(())
    }

    fn validate_credit_bands(&self, name: &str) -> QcFinanceResult<()> {
        let bands = &self.daycare.credit_bands;
        if bands.is_empty() {
            return Err(QcFinanceError::malformed(name, "daycare credit bands are empty"));
        }
        let last_idx = bands.len() - 1;
        let mut previous: Option<Money> = None;
        for (i, band) in bands.iter().enumerate() {
            if band.rate < Decimal::ZERO || band.rate > Decimal::ONE {
                return Err(QcFinanceError::malformed(
                    name,
                    format!("daycare credit band {i} rate {} outside [0, 1]", band.rate),
                ));
            }
            match (band.max_income, i == last_idx) {
                (None, true) => {}
                (None, false) => {
                    return Err(QcFinanceError::malformed(
                        name,
                        format!("daycare credit band {i} is unbounded but is not the last band"),
                    ));
                }
                (Some(_), true) => {
                    return Err(QcFinanceError::malformed(
                        name,
                        "last daycare credit band must be unbounded",
                    ));
                }
                (Some(max), false) => {
                    if previous.is_some_and(|p| max <= p) {
                        return Err(QcFinanceError::malformed(
                            name,
                            "daycare credit bands must ascend by max_income",
                        ));
                    }
                    previous = Some(max);
                }
            }
        }
        Ok(())
    }

    fn validate_insurance_tiers(&self, name: &str) -> QcFinanceResult<()> {
        let tiers = &self.mortgage.insurance_tiers;
        let last = tiers
            .last()
            .ok_or_else(|| QcFinanceError::malformed(name, "mortgage insurance tiers are empty"))?;
        if !last.min_down_payment_ratio.is_zero() {
            return Err(QcFinanceError::malformed(
                name,
                "last mortgage insurance tier must start at a zero down payment ratio",
            ));
        }
        for pair in tiers.windows(2) {
            if pair[1].min_down_payment_ratio >= pair[0].min_down_payment_ratio {
                return Err(QcFinanceError::malformed(
                    name,
                    "mortgage insurance tiers must descend by min_down_payment_ratio",
                ));
            }
        }
        for tier in tiers {
            if tier.premium_rate < Decimal::ZERO || tier.premium_rate > Decimal::ONE {
                return Err(QcFinanceError::malformed(
                    name,
                    format!("mortgage premium rate {} outside [0, 1]", tier.premium_rate),
                ));
            }
            if tier.min_down_payment_ratio >= self.mortgage.insurance_free_ratio {
                return Err(QcFinanceError::malformed(
                    name,
                    "mortgage insurance tier starts above the insurance-free ratio",
                ));
            }
        }
        Ok(())
    }
}
