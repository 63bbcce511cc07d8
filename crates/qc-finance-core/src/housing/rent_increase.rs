use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::report::{ReportLine, Summarize};
use crate::tables::{HeatingType, RateTable};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::validate;
use crate::QcFinanceResult;

/// Monthly rent and the dwelling's share of the landlord's annual cost
/// increases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentIncreaseInput {
    pub current_rent: Money,
    #[serde(default)]
    pub heating: HeatingType,
    #[serde(default)]
    pub municipal_tax_increase: Money,
    #[serde(default)]
    pub insurance_increase: Money,
    #[serde(default)]
    pub maintenance_increase: Money,
    #[serde(default)]
    pub renovation_cost: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentIncreaseResult {
    pub current_rent: Money,
    pub base_increase: Money,
    pub heating_increase: Money,
    pub expense_pass_through: Money,
    pub renovation_increase: Money,
    pub total_monthly_increase: Money,
    pub new_rent: Money,
    pub increase_rate: Rate,
}

/// Recommended rent increase as a sum of independent components.
pub fn calculate_rent_increase(
    input: &RentIncreaseInput,
    rates: &RateTable,
) -> QcFinanceResult<ComputationOutput<RentIncreaseResult>> {
    validate_rent_increase_input(input)?;
    let rules = &rates.rent;
    let months = Decimal::from(12u32);

    let base_increase = input.current_rent * rules.base_index;
    let heating_increase = input.current_rent * rules.heating_adjustment(input.heating);
    let expense_pass_through =
        (input.municipal_tax_increase + input.insurance_increase + input.maintenance_increase)
            / months;
    let renovation_increase = input.renovation_cost * rules.renovation_rate / months;

    let total_monthly_increase =
        base_increase + heating_increase + expense_pass_through + renovation_increase;

    tracing::debug!(
        rent = %input.current_rent,
        heating = ?input.heating,
        increase = %total_monthly_increase,
        "rent increase computed"
    );

    let output = RentIncreaseResult {
        current_rent: input.current_rent,
        base_increase,
        heating_increase,
        expense_pass_through,
        renovation_increase,
        total_monthly_increase,
        new_rent: input.current_rent + total_monthly_increase,
        increase_rate: total_monthly_increase / input.current_rent,
    };

    Ok(with_metadata(
        "Rent increase: base index, heating adjustment, monthly pass-through of tax, insurance \
         and maintenance increases, renovation cost at the annual pass-on rate",
        &serde_json::json!({
            "current_rent": input.current_rent.to_string(),
            "heating": input.heating,
            "base_index": rules.base_index.to_string(),
            "renovation_rate": rules.renovation_rate.to_string(),
        }),
        Vec::new(),
        Some(rates.tax_year),
        output,
    ))
}

fn validate_rent_increase_input(input: &RentIncreaseInput) -> QcFinanceResult<()> {
    validate::positive("current_rent", input.current_rent)?;
    validate::non_negative("municipal_tax_increase", input.municipal_tax_increase)?;
    validate::non_negative("insurance_increase", input.insurance_increase)?;
    validate::non_negative("maintenance_increase", input.maintenance_increase)?;
    validate::non_negative("renovation_cost", input.renovation_cost)?;
    Ok(())
}

impl Summarize for RentIncreaseResult {
    fn summary(&self) -> Vec<ReportLine> {
        vec![
            ReportLine::money("Current rent", self.current_rent),
            ReportLine::money("Base increase", self.base_increase),
            ReportLine::money("Heating adjustment", self.heating_increase),
            ReportLine::money("Expense pass-through", self.expense_pass_through),
            ReportLine::money("Renovation", self.renovation_increase),
            ReportLine::money("Monthly increase", self.total_monthly_increase),
            ReportLine::money("New rent", self.new_rent),
            ReportLine::rate("Increase", self.increase_rate),
        ]
    }
}
