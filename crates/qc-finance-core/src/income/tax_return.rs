use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::payroll::income_tax;
use crate::report::{ReportLine, Summarize};
use crate::tables::RateTable;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::validate;
use crate::QcFinanceResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxReturnInput {
    pub employment_income: Money,
    #[serde(default)]
    pub other_income: Money,
    #[serde(default)]
    pub rrsp_deduction: Money,
    #[serde(default)]
    pub union_dues: Money,
    pub federal_tax_withheld: Money,
    pub quebec_tax_withheld: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxFormResult {
    pub total_income: Money,
    pub total_deductions: Money,
    pub federal_taxable_income: Money,
    pub quebec_taxable_income: Money,
    pub federal_tax_owed: Money,
    pub quebec_tax_owed: Money,
    /// Withheld minus owed; positive means a federal refund.
    pub federal_balance: Money,
    /// Withheld minus owed; positive means a Quebec refund.
    pub quebec_balance: Money,
    pub total_tax_paid: Money,
    pub total_tax_owed: Money,
    pub refund_or_owing: Money,
    pub is_refund: bool,
}

/// Combined position across both authorities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub total_paid: Money,
    pub total_owed: Money,
    /// `total_paid − total_owed`; positive is a refund, negative a balance due.
    pub refund_or_owing: Money,
    pub is_refund: bool,
}

pub fn settle(
    federal_paid: Money,
    federal_owed: Money,
    quebec_paid: Money,
    quebec_owed: Money,
) -> Settlement {
    let total_paid = federal_paid + quebec_paid;
    let total_owed = federal_owed + quebec_owed;
    let refund_or_owing = total_paid - total_owed;
    Settlement {
        total_paid,
        total_owed,
        refund_or_owing,
        is_refund: refund_or_owing > Decimal::ZERO,
    }
}

/// Simplified annual return: income less RRSP and union dues, each
/// authority's basic personal amount, bracket tax, then comparison with
/// what was withheld at source.
pub fn estimate_tax_return(
    input: &TaxReturnInput,
    rates: &RateTable,
) -> QcFinanceResult<ComputationOutput<TaxFormResult>> {
    validate_tax_return_input(input)?;
    let mut warnings: Vec<String> = Vec::new();

    let total_income = input.employment_income + input.other_income;
    let total_deductions = input.rrsp_deduction + input.union_dues;
    if total_deductions > total_income {
        warnings.push(format!(
            "Deductions ({total_deductions}) exceed total income ({total_income}); \
             taxable income floored at zero"
        ));
    }
    if input.rrsp_deduction > rates.rrsp.dollar_limit {
        warnings.push(format!(
            "RRSP deduction {} exceeds the {} dollar limit of {}",
            input.rrsp_deduction, rates.tax_year, rates.rrsp.dollar_limit
        ));
    }

    let net_income = (total_income - total_deductions).max(Decimal::ZERO);
    let federal_taxable_income =
        (net_income - rates.federal.basic_personal_amount).max(Decimal::ZERO);
    let quebec_taxable_income =
        (net_income - rates.quebec.basic_personal_amount).max(Decimal::ZERO);

    let federal_tax_owed = income_tax(net_income, &rates.federal);
    let quebec_tax_owed = income_tax(net_income, &rates.quebec);

    let settlement = settle(
        input.federal_tax_withheld,
        federal_tax_owed,
        input.quebec_tax_withheld,
        quebec_tax_owed,
    );

    for w in &warnings {
        tracing::warn!(tax_year = rates.tax_year, "{w}");
    }
    tracing::debug!(
        tax_year = rates.tax_year,
        owed = %settlement.total_owed,
        paid = %settlement.total_paid,
        is_refund = settlement.is_refund,
        "tax return estimated"
    );

    let output = TaxFormResult {
        total_income,
        total_deductions,
        federal_taxable_income,
        quebec_taxable_income,
        federal_tax_owed,
        quebec_tax_owed,
        federal_balance: input.federal_tax_withheld - federal_tax_owed,
        quebec_balance: input.quebec_tax_withheld - quebec_tax_owed,
        total_tax_paid: settlement.total_paid,
        total_tax_owed: settlement.total_owed,
        refund_or_owing: settlement.refund_or_owing,
        is_refund: settlement.is_refund,
    };

    Ok(with_metadata(
        "Simplified federal and Quebec return: RRSP and union dues deducted, basic personal \
         amounts removed, progressive tax compared with amounts withheld",
        &serde_json::json!({
            "employment_income": input.employment_income.to_string(),
            "other_income": input.other_income.to_string(),
            "rrsp_deduction": input.rrsp_deduction.to_string(),
            "union_dues": input.union_dues.to_string(),
        }),
        warnings,
        Some(rates.tax_year),
        output,
    ))
}

fn validate_tax_return_input(input: &TaxReturnInput) -> QcFinanceResult<()> {
    validate::non_negative("employment_income", input.employment_income)?;
    validate::non_negative("other_income", input.other_income)?;
    validate::non_negative("rrsp_deduction", input.rrsp_deduction)?;
    validate::non_negative("union_dues", input.union_dues)?;
    validate::non_negative("federal_tax_withheld", input.federal_tax_withheld)?;
    validate::non_negative("quebec_tax_withheld", input.quebec_tax_withheld)?;
    Ok(())
}

impl Summarize for TaxFormResult {
    fn summary(&self) -> Vec<ReportLine> {
        vec![
            ReportLine::money("Total income", self.total_income),
            ReportLine::money("Deductions", self.total_deductions),
            ReportLine::money("Federal taxable income", self.federal_taxable_income),
            ReportLine::money("Quebec taxable income", self.quebec_taxable_income),
            ReportLine::money("Federal tax owed", self.federal_tax_owed),
            ReportLine::money("Quebec tax owed", self.quebec_tax_owed),
            ReportLine::money("Tax withheld", self.total_tax_paid),
            ReportLine::money(
                if self.is_refund { "Refund" } else { "Balance due" },
                self.refund_or_owing.abs(),
            ),
        ]
    }
}
