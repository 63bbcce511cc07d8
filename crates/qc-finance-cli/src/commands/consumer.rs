use clap::Args;
use rust_decimal::Decimal;

use qc_finance_core::consumer::sales_tax::{self, SalesTaxInput};

use super::{CommandOutput, CommandResult, Context};
use crate::input;

/// Arguments for the GST/QST calculation
#[derive(Args)]
pub struct SalesTaxArgs {
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// The amount already includes GST and QST
    #[arg(long)]
    pub tax_included: bool,

    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_sales_tax(args: SalesTaxArgs, ctx: &Context) -> CommandResult {
    let tax_input: SalesTaxInput = match input::load(args.input.as_deref())? {
        Some(loaded) => loaded,
        None => SalesTaxInput {
            amount: args.amount.ok_or("--amount is required (or provide --input)")?,
            tax_included: args.tax_included,
        },
    };
    CommandOutput::from_computation(sales_tax::calculate_sales_tax(&tax_input, &ctx.rates)?)
}
