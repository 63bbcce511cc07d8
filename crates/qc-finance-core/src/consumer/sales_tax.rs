use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::report::{ReportLine, Summarize};
use crate::tables::{RateTable, SalesTaxRates};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::validate;
use crate::QcFinanceResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesTaxInput {
    pub amount: Money,
    /// `amount` already includes GST and QST and must be split back out.
    #[serde(default)]
    pub tax_included: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesTaxResult {
    pub pre_tax_amount: Money,
    pub gst_rate: Rate,
    pub qst_rate: Rate,
    pub gst: Money,
    pub qst: Money,
    pub total_tax: Money,
    pub total_amount: Money,
}

/// GST and QST on a pre-tax amount.
pub fn compute_sales_tax(pre_tax_amount: Money, rates: &SalesTaxRates) -> SalesTaxResult {
    let gst = pre_tax_amount * rates.gst;
    let qst = pre_tax_amount * rates.qst;
    SalesTaxResult {
        pre_tax_amount,
        gst_rate: rates.gst,
        qst_rate: rates.qst,
        gst,
        qst,
        total_tax: gst + qst,
        total_amount: pre_tax_amount + gst + qst,
    }
}

/// Split a tax-included amount into its pre-tax price and taxes.
pub fn remove_sales_tax(tax_included_amount: Money, rates: &SalesTaxRates) -> SalesTaxResult {
    let pre_tax = tax_included_amount / (Decimal::ONE + rates.combined());
    compute_sales_tax(pre_tax, rates)
}

pub fn calculate_sales_tax(
    input: &SalesTaxInput,
    rates: &RateTable,
) -> QcFinanceResult<ComputationOutput<SalesTaxResult>> {
    validate::non_negative("amount", input.amount)?;

    let output = if input.tax_included {
        remove_sales_tax(input.amount, &rates.sales_tax)
    } else {
        compute_sales_tax(input.amount, &rates.sales_tax)
    };

    tracing::debug!(
        amount = %input.amount,
        tax_included = input.tax_included,
        total_tax = %output.total_tax,
        "sales tax computed"
    );

    Ok(with_metadata(
        "GST and QST levied independently on the pre-tax price",
        &serde_json::json!({
            "amount": input.amount.to_string(),
            "tax_included": input.tax_included,
        }),
        Vec::new(),
        Some(rates.tax_year),
        output,
    ))
}

impl Summarize for SalesTaxResult {
    fn summary(&self) -> Vec<ReportLine> {
        vec![
            ReportLine::money("Pre-tax amount", self.pre_tax_amount),
            ReportLine::money("GST", self.gst),
            ReportLine::money("QST", self.qst),
            ReportLine::money("Total tax", self.total_tax),
            ReportLine::money("Total", self.total_amount),
        ]
    }
}
